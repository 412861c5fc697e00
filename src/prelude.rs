//! # dotdocs Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! from the dotdocs library. Import this module to get quick access to the
//! essential types for building and querying a documentation model.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotdocs operations
pub use crate::Error;

/// The result type used throughout dotdocs
pub use crate::Result;

// ================================================================================================
// Identities
// ================================================================================================

/// Structural identities with cross-source equality
pub use crate::model::identity::{
    EventIdentity, FieldIdentity, MemberIdentity, MethodIdentity, PropertyIdentity,
    TypeIdentity, TypeSignature,
};

// ================================================================================================
// Documentation Graph
// ================================================================================================

/// The graph itself and its node handles
pub use crate::model::graph::{
    AssemblyDoc, AssemblyDocRc, DocGraph, NamespaceDoc, NamespaceDocRc, TypeDoc, TypeDocRc,
};

/// Member nodes and their binary-source definitions
pub use crate::model::graph::{
    EventDef, EventDoc, EventDocRc, FieldDef, FieldDoc, FieldDocRc, MemberModifiers,
    MethodDef, MethodDoc, MethodDocRc, ParameterDef, PropertyDef, PropertyDoc,
    PropertyDocRc, TypeDef, TypeKind, TypeModifiers,
};

/// Narrative content attached to nodes
pub use crate::model::content::{ContentNode, ContentSlot, DocContent};

// ================================================================================================
// Formatting and Resolution
// ================================================================================================

/// Operator overload classification and display tokens
pub use crate::model::format::OperatorKind;

/// Cross-reference resolution
pub use crate::model::resolver::{DocNode, DocRef, ResolutionReport, Resolver};
