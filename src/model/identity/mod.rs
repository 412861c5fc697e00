//! Symbol identity model for the documentation graph.
//!
//! This module provides the immutable value types that uniquely denote symbols of a
//! documented assembly, regardless of which source produced them. Two sources describe
//! the same symbols with different, information-asymmetric encodings: binary metadata
//! (rich) and textual documentation references (lossy). The identity model is the
//! contract both encodings converge on.
//!
//! # Module Structure
//!
//! - [`types`](self) - [`TypeIdentity`] and [`TypeSignature`]
//! - [`members`](self) - [`MemberIdentity`] and its four variants
//!
//! # Key Components
//!
//! - [`TypeIdentity`] - Namespace, simple name, generic arity, optional enclosing type
//! - [`TypeSignature`] - Type shapes in parameter/return position
//! - [`MemberIdentity`] - Closed sum over method/property/field/event identities
//!
//! # Equality Law
//!
//! Construction validates shape only (non-empty names); identities know nothing about
//! the graph. Equality and hashing are structural and deterministic: identical field
//! values compare equal and hash identically across independently constructed
//! instances. Generic parameters participate by count and index, never by name - the
//! textual encoding cannot carry names, and excluding them is what makes cross-source
//! reconciliation possible.
//!
//! # Examples
//!
//! ```rust
//! use dotdocs::model::identity::{MethodIdentity, TypeIdentity, TypeSignature};
//!
//! let widget = TypeIdentity::new("Acme", "Widget")?;
//!
//! // Built from binary metadata: knows the parameter is the method's generic
//! // parameter, and knows the return type.
//! let rich = MethodIdentity::new(
//!     widget.clone(),
//!     "Render",
//!     1,
//!     vec![TypeSignature::MethodVar(0)],
//!     Some(TypeSignature::named("System", "Void")?),
//! )?;
//!
//! // Built from a textual reference: same structure, no return type.
//! let lossy = MethodIdentity::new(widget, "Render", 1, vec![TypeSignature::MethodVar(0)], None)?;
//!
//! assert_eq!(rich, lossy);
//! # Ok::<(), dotdocs::Error>(())
//! ```

pub use members::{
    EventIdentity, FieldIdentity, MemberIdentity, MethodIdentity, PropertyIdentity,
};
pub use types::{TypeIdentity, TypeSignature};

mod members;
mod types;
