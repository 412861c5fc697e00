// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # dotdocs
//!
//! A symbol model for .NET API reference documentation. `dotdocs` merges what a
//! compiled assembly knows about its types and members with what the compiler's
//! XML documentation file says about them, into one consistent, queryable graph.
//!
//! ## Features
//!
//! - **Structural identities** - Types and members are denoted by immutable
//!   values that compare equal across sources: an identity decoded from binary
//!   metadata equals one parsed from a documentation ID string for the same
//!   symbol, generic parameters included
//! - **Fail-fast graph construction** - Every insertion into the documentation
//!   graph validates consistency up front; the model never holds an edge that
//!   contradicts the identities at its ends
//! - **Canonical signatures** - One display signature per member, identical
//!   whether rendered from the rich binary source or the lossy textual one
//! - **Exact-match resolution** - Cross-references resolve by structural
//!   equality only; misses are reported, never raised
//! - **XML documentation ingestion** - A pull parser for compiler-emitted
//!   documentation files and their member ID encoding
//!
//! ## Quick Start
//!
//! ```rust
//! use dotdocs::prelude::*;
//!
//! let graph = DocGraph::new();
//! graph.add_assembly("Acme.Widgets", Some("1.0.0".to_string()))?;
//!
//! let widget = TypeIdentity::new("Acme", "Widget")?;
//! let type_doc = graph.add_type("Acme.Widgets", widget.clone())?;
//! type_doc.add_method(MethodDoc::new(MethodIdentity::new(
//!     widget, "Render", 1, vec![TypeSignature::MethodVar(0)], None,
//! )?))?;
//!
//! let resolver = Resolver::new(&graph);
//! let reference = dotdocs::xmldoc::ids::parse("M:Acme.Widget.Render``1(``0)")?;
//! assert!(resolver.resolve(&reference).is_some());
//! # Ok::<(), dotdocs::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `dotdocs` is organized into a small number of layers:
//!
//! - [`model::identity`] - The equality foundation: [`model::identity::TypeIdentity`],
//!   [`model::identity::MemberIdentity`] and the signature-position type shapes
//! - [`model::graph`] - The owned node arena with fail-fast validation
//! - [`model::format`] - Canonical display signature rendering
//! - [`model::resolver`] - Exact-match reference resolution and batch content
//!   attachment
//! - [`xmldoc`] - XML documentation file reading and ID string parsing
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Consistency
//! violations during graph construction are [`Error::InconsistentModel`];
//! malformed input is [`Error::Malformed`] with file/line context. A reference
//! that does not resolve is **not** an error - resolution misses are a normal
//! condition and surface through
//! [`ResolutionReport`](model::resolver::ResolutionReport).

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use dotdocs::prelude::*;
///
/// let graph = DocGraph::new();
/// graph.add_assembly("Acme.Widgets", None)?;
/// # Ok::<(), dotdocs::Error>(())
/// ```
pub mod prelude;

/// The documentation object model: identities, graph, formatter, resolver.
///
/// # Key Components
///
/// - [`model::identity`] - Structural identities with cross-source equality
/// - [`model::graph::DocGraph`] - The owned node arena and ingestion API
/// - [`model::format`] - Canonical display signatures
/// - [`model::resolver::Resolver`] - Exact-match cross-reference resolution
pub mod model;

/// Ingestion of compiler-emitted XML documentation files.
///
/// - [`xmldoc::reader`] - Pull parser for the `<doc><members>` file shape
/// - [`xmldoc::ids`] - Parser for `T:`/`M:`/`P:`/`F:`/`E:`/`N:` ID strings
pub mod xmldoc;

/// `dotdocs` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. Used consistently throughout the crate for all fallible
/// operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `dotdocs` Error type
///
/// The main error type for all operations in this crate: malformed input,
/// documentation-model consistency violations, file access and XML parsing.
pub use error::Error;
