//! Ingestion of compiler-emitted XML documentation files.
//!
//! Two stages: [`reader`] pulls the XML shape into `(id string, content)` entries
//! with [`quick_xml`], and [`ids`] parses the ID strings into structural
//! [`DocRef`](crate::model::resolver::DocRef) values the resolver can match
//! against the graph.
//!
//! # Examples
//!
//! ```rust
//! use dotdocs::xmldoc;
//!
//! let xml = r#"<doc><members>
//!     <member name="T:Acme.Widget"><summary>A widget.</summary></member>
//! </members></doc>"#;
//!
//! let file = xmldoc::reader::read_str(xml)?;
//! let (entries, malformed) = file.parse_refs();
//! assert_eq!(entries.len(), 1);
//! assert!(malformed.is_empty());
//! # Ok::<(), dotdocs::Error>(())
//! ```

pub mod ids;
pub mod reader;
