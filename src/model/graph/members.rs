//! Member nodes of the documentation graph.
//!
//! One node per member symbol: methods (including constructors and operator
//! overloads), properties, fields and events. Each node wraps exactly one identity
//! plus the structural definition details available when the node was built from
//! binary metadata, and the narrative content slot the resolver fills in later.
//!
//! # Key Types
//! - [`MethodDoc`], [`PropertyDoc`], [`FieldDoc`], [`EventDoc`] - Member nodes
//! - [`MethodDef`], [`PropertyDef`], [`FieldDef`], [`EventDef`] - Binary definition details
//! - [`MemberModifiers`] - Attribute flags decoded from binary metadata
//!
//! # Node Lifecycle
//!
//! A node's identity is immutable once constructed. The only late-written state is the
//! narrative content slot, which the resolver fills during the resolution phase.

use std::sync::Arc;

use bitflags::bitflags;

use crate::model::{
    content::ContentSlot,
    identity::{EventIdentity, FieldIdentity, MethodIdentity, PropertyIdentity, TypeSignature},
};

/// Reference to a [`MethodDoc`]
pub type MethodDocRc = Arc<MethodDoc>;
/// Reference to a [`PropertyDoc`]
pub type PropertyDocRc = Arc<PropertyDoc>;
/// Reference to a [`FieldDoc`]
pub type FieldDocRc = Arc<FieldDoc>;
/// Reference to a [`EventDoc`]
pub type EventDocRc = Arc<EventDoc>;

/// A vector that holds a list of [`MethodDoc`]
pub type MethodDocList = Arc<boxcar::Vec<MethodDocRc>>;
/// A vector that holds a list of [`PropertyDoc`]
pub type PropertyDocList = Arc<boxcar::Vec<PropertyDocRc>>;
/// A vector that holds a list of [`FieldDoc`]
pub type FieldDocList = Arc<boxcar::Vec<FieldDocRc>>;
/// A vector that holds a list of [`EventDoc`]
pub type EventDocList = Arc<boxcar::Vec<EventDocRc>>;

bitflags! {
    /// Member attribute flags decoded from binary metadata.
    ///
    /// A flattened view of the attribute bits the different member tables carry
    /// (visibility, static/instance, inheritance modifiers); rendering uses these for
    /// declaration prefixes. Textual references carry no flags, so nodes built from
    /// them leave the definition empty.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MemberModifiers: u32 {
        /// Member is visible outside the assembly
        const PUBLIC = 0x0001;
        /// Member is visible to the assembly only
        const INTERNAL = 0x0002;
        /// Member is visible to the declaring type and derived types
        const PROTECTED = 0x0004;
        /// Member is visible to the declaring type only
        const PRIVATE = 0x0008;
        /// Member belongs to the type rather than to instances
        const STATIC = 0x0010;
        /// Member has no implementation in the declaring type
        const ABSTRACT = 0x0020;
        /// Member may be overridden in derived types
        const VIRTUAL = 0x0040;
        /// Member overrides a base declaration
        const OVERRIDE = 0x0080;
        /// Member cannot be overridden further
        const SEALED = 0x0100;
        /// Field can only be assigned in a constructor
        const READONLY = 0x0200;
        /// Field is a compile-time constant
        const CONST = 0x0400;
    }
}

/// One parameter of a method or indexer, as known from binary metadata.
///
/// The name exists only on the binary side; identity never carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDef {
    /// Parameter name from the Param table.
    pub name: String,
    /// Parameter type.
    pub signature: TypeSignature,
}

impl ParameterDef {
    /// Create a parameter definition.
    #[must_use]
    pub fn new(name: impl Into<String>, signature: TypeSignature) -> Self {
        ParameterDef {
            name: name.into(),
            signature,
        }
    }
}

/// Structural details of a method as decoded from binary metadata.
///
/// Everything the identity cannot carry: generic parameter **names**, parameter
/// names, the guaranteed return type and the attribute flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodDef {
    /// Names of the method's own generic type parameters, in declaration order.
    ///
    /// The length matches the identity's arity when metadata is well-formed.
    pub generic_params: Vec<String>,
    /// Named, typed parameters in declaration order.
    pub parameters: Vec<ParameterDef>,
    /// The return type. Binary metadata always knows it.
    pub return_type: Option<TypeSignature>,
    /// Attribute flags.
    pub modifiers: MemberModifiers,
}

/// Structural details of a property as decoded from binary metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyDef {
    /// The property type.
    pub property_type: Option<TypeSignature>,
    /// Named, typed index parameters; empty for non-indexed properties.
    pub index_parameters: Vec<ParameterDef>,
    /// Whether the property has a getter.
    pub has_getter: bool,
    /// Whether the property has a setter.
    pub has_setter: bool,
    /// Attribute flags.
    pub modifiers: MemberModifiers,
}

/// Structural details of a field as decoded from binary metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDef {
    /// The field type.
    pub field_type: Option<TypeSignature>,
    /// Attribute flags.
    pub modifiers: MemberModifiers,
}

/// Structural details of an event as decoded from binary metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDef {
    /// The delegate type of the event handler.
    pub handler_type: Option<TypeSignature>,
    /// Attribute flags.
    pub modifiers: MemberModifiers,
}

/// Documentation node for a method, constructor or operator overload.
pub struct MethodDoc {
    /// The method's structural identity.
    pub identity: MethodIdentity,
    /// Binary definition details; `None` for nodes not built from binary metadata.
    pub definition: Option<MethodDef>,
    /// Narrative content attached by the resolver.
    pub content: ContentSlot,
}

impl MethodDoc {
    /// Create a method node from identity alone.
    #[must_use]
    pub fn new(identity: MethodIdentity) -> Self {
        MethodDoc {
            identity,
            definition: None,
            content: ContentSlot::new(),
        }
    }

    /// Create a method node from binary metadata.
    #[must_use]
    pub fn from_definition(identity: MethodIdentity, definition: MethodDef) -> Self {
        MethodDoc {
            identity,
            definition: Some(definition),
            content: ContentSlot::new(),
        }
    }

    /// The canonical display signature of this method.
    ///
    /// Used as a page heading and as the overload disambiguation key. Rendering is
    /// delegated to [`crate::model::format`] and prefers the binary definition when
    /// one is present.
    #[must_use]
    pub fn signature(&self) -> String {
        crate::model::format::method_signature(self)
    }
}

impl std::fmt::Debug for MethodDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDoc")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Documentation node for a property or indexer.
pub struct PropertyDoc {
    /// The property's structural identity.
    pub identity: PropertyIdentity,
    /// Binary definition details; `None` for nodes not built from binary metadata.
    pub definition: Option<PropertyDef>,
    /// Narrative content attached by the resolver.
    pub content: ContentSlot,
}

impl PropertyDoc {
    /// Create a property node from identity alone.
    #[must_use]
    pub fn new(identity: PropertyIdentity) -> Self {
        PropertyDoc {
            identity,
            definition: None,
            content: ContentSlot::new(),
        }
    }

    /// Create a property node from binary metadata.
    #[must_use]
    pub fn from_definition(identity: PropertyIdentity, definition: PropertyDef) -> Self {
        PropertyDoc {
            identity,
            definition: Some(definition),
            content: ContentSlot::new(),
        }
    }

    /// The canonical display signature of this property.
    #[must_use]
    pub fn signature(&self) -> String {
        crate::model::format::property_signature(self)
    }
}

impl std::fmt::Debug for PropertyDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDoc")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Documentation node for a field.
pub struct FieldDoc {
    /// The field's structural identity.
    pub identity: FieldIdentity,
    /// Binary definition details; `None` for nodes not built from binary metadata.
    pub definition: Option<FieldDef>,
    /// Narrative content attached by the resolver.
    pub content: ContentSlot,
}

impl FieldDoc {
    /// Create a field node from identity alone.
    #[must_use]
    pub fn new(identity: FieldIdentity) -> Self {
        FieldDoc {
            identity,
            definition: None,
            content: ContentSlot::new(),
        }
    }

    /// Create a field node from binary metadata.
    #[must_use]
    pub fn from_definition(identity: FieldIdentity, definition: FieldDef) -> Self {
        FieldDoc {
            identity,
            definition: Some(definition),
            content: ContentSlot::new(),
        }
    }

    /// The canonical display signature of this field: its name.
    #[must_use]
    pub fn signature(&self) -> String {
        self.identity.name().to_string()
    }
}

impl std::fmt::Debug for FieldDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDoc")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Documentation node for an event.
pub struct EventDoc {
    /// The event's structural identity.
    pub identity: EventIdentity,
    /// Binary definition details; `None` for nodes not built from binary metadata.
    pub definition: Option<EventDef>,
    /// Narrative content attached by the resolver.
    pub content: ContentSlot,
}

impl EventDoc {
    /// Create an event node from identity alone.
    #[must_use]
    pub fn new(identity: EventIdentity) -> Self {
        EventDoc {
            identity,
            definition: None,
            content: ContentSlot::new(),
        }
    }

    /// Create an event node from binary metadata.
    #[must_use]
    pub fn from_definition(identity: EventIdentity, definition: EventDef) -> Self {
        EventDoc {
            identity,
            definition: Some(definition),
            content: ContentSlot::new(),
        }
    }

    /// The canonical display signature of this event: its name.
    #[must_use]
    pub fn signature(&self) -> String {
        self.identity.name().to_string()
    }
}

impl std::fmt::Debug for EventDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDoc")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
