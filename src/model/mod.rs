//! The documentation object model.
//!
//! Four layers, lowest first:
//!
//! - [`identity`] - structural identities for types and members, the equality
//!   foundation that lets descriptions from independent sources (compiled
//!   metadata, XML documentation files) agree on which symbol they describe.
//! - [`content`] - the generic narrative content tree attached to nodes.
//! - [`graph`] - the owned node arena: assemblies, namespaces, types, members,
//!   with fail-fast consistency validation at every insertion.
//! - [`format`] and [`resolver`] - the read-only consumers: canonical display
//!   signatures and exact-match cross-reference resolution.

pub mod content;
pub mod format;
pub mod graph;
pub mod identity;
pub mod resolver;
