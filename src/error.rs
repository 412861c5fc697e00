use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while constructing symbol
/// identities, assembling the documentation graph, and ingesting XML documentation files.
/// Each variant provides specific context about the failure mode to enable appropriate
/// error handling.
///
/// # Error Categories
///
/// ## Construction Errors
/// - [`Error::Malformed`] - Malformed identity value or documentation ID string
/// - [`Error::Empty`] - Empty input provided
///
/// ## Consistency Errors
/// - [`Error::InconsistentModel`] - A graph insertion violated a structural invariant
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::XmlError`] - XML parsing errors from the documentation file reader
///
/// Resolution misses (a documentation comment referencing a symbol that is not part of the
/// documented assembly) are **not** errors: lookups return [`Option`] and batch resolution
/// collects misses as warnings in a report. Documentation comments routinely reference
/// framework or third-party symbols that are legitimately absent from the graph.
///
/// # Examples
///
/// ```rust
/// use dotdocs::{Error, model::identity::TypeIdentity};
///
/// match TypeIdentity::new("System", "") {
///     Ok(_) => println!("Constructed identity"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed identity: {} ({}:{})", message, file, line);
///     }
///     Err(e) => {
///         eprintln!("Other error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A value was malformed and could not be constructed or parsed.
    ///
    /// This error indicates that an identity value failed its shape validation (e.g. an
    /// empty member name) or that a documentation ID string does not conform to the
    /// compiler-emitted grammar. The error includes the source location where the
    /// malformation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A graph insertion violated a structural invariant of the documentation model.
    ///
    /// Every mutating operation on the documentation graph validates the edge it is about
    /// to create: assembly names must be unique, a type's namespace must match the
    /// namespace node it is inserted under, a nested type's enclosing identity must match
    /// its declaring type, and a member's defining type must match the type it is added
    /// to. The carried message names both conflicting identities so the offending
    /// metadata can be diagnosed at the exact point of introduction.
    ///
    /// An inconsistency is a defect in the upstream metadata reading and aborts the
    /// current run; it is never caught-and-continued inside the library.
    #[error("Inconsistent documentation model - {0}")]
    InconsistentModel(String),

    /// Provided input was empty.
    ///
    /// This error occurs when an empty documentation file or buffer is provided where
    /// actual XML documentation data was expected.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading XML documentation files
    /// from disk, such as permission issues or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the XML parser while reading a documentation file.
    ///
    /// The quick-xml crate is used for pull-parsing compiler-emitted documentation
    /// files. This error wraps any failures from that parsing layer, with the file
    /// position appended where available.
    #[error("{0}")]
    XmlError(String),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories or for wrapping external
    /// library errors with additional context.
    #[error("{0}")]
    Error(String),
}

impl From<quick_xml::Error> for Error {
    fn from(error: quick_xml::Error) -> Self {
        Error::XmlError(error.to_string())
    }
}
