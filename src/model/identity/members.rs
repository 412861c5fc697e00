//! Structural member identities for the documentation model.
//!
//! This module defines [`MemberIdentity`], a closed sum over the four member kinds a
//! type can declare (methods, properties, fields, events), and the per-kind identity
//! values. Exhaustive matching over the sum ensures new member kinds cannot be silently
//! mishandled in the formatter or the graph builder.
//!
//! # Key Types
//! - [`MemberIdentity`] - Closed sum over the four member identity variants
//! - [`MethodIdentity`] - Name, generic arity, parameter types, optional return type
//! - [`PropertyIdentity`] - Name and index parameter types
//! - [`FieldIdentity`], [`EventIdentity`] - Name only
//!
//! # Equality Contract
//!
//! Identities of different variants are never equal (a method and a property with the
//! same defining type and name are distinct symbols). Within one variant, equality is
//! structural and deterministic across sources: a [`MethodIdentity`] built from a lossy
//! textual reference equals one built from full binary metadata describing the same
//! method, because generic parameters participate by index and count only, never by
//! name.
//!
//! # Examples
//!
//! ```rust
//! use dotdocs::model::identity::{MemberIdentity, MethodIdentity, PropertyIdentity, TypeIdentity};
//!
//! let widget = TypeIdentity::new("Acme", "Widget")?;
//!
//! let method = MemberIdentity::Method(MethodIdentity::new(widget.clone(), "Count", 0, vec![], None)?);
//! let property = MemberIdentity::Property(PropertyIdentity::new(widget, "Count", vec![])?);
//!
//! // Same defining type and name, different member kinds: never equal
//! assert_ne!(method, property);
//! # Ok::<(), dotdocs::Error>(())
//! ```

use std::hash::{Hash, Hasher};

use crate::{
    model::identity::{TypeIdentity, TypeSignature},
    Result,
};

/// Structural identity of a type member, as a closed sum over the member kinds.
///
/// Every variant carries the identity of its defining type. Two identities of
/// different variants are never equal, which the derived enum equality gives for free:
/// the discriminant participates in both `PartialEq` and `Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberIdentity {
    /// A method, constructor or operator overload.
    Method(MethodIdentity),
    /// A property, indexed or not.
    Property(PropertyIdentity),
    /// A field.
    Field(FieldIdentity),
    /// An event.
    Event(EventIdentity),
}

impl MemberIdentity {
    /// The identity of the type that defines this member.
    #[must_use]
    pub fn defining_type(&self) -> &TypeIdentity {
        match self {
            MemberIdentity::Method(method) => &method.defining_type,
            MemberIdentity::Property(property) => &property.defining_type,
            MemberIdentity::Field(field) => &field.defining_type,
            MemberIdentity::Event(event) => &event.defining_type,
        }
    }

    /// The member's own name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MemberIdentity::Method(method) => &method.name,
            MemberIdentity::Property(property) => &property.name,
            MemberIdentity::Field(field) => &field.name,
            MemberIdentity::Event(event) => &event.name,
        }
    }

    /// The same member identity rebased onto a different defining type.
    ///
    /// Used when a lossy textual reference mis-partitioned the declaring type's
    /// path and the corrected type identity has been established separately.
    #[must_use]
    pub fn with_defining_type(&self, defining_type: TypeIdentity) -> MemberIdentity {
        let mut rebased = self.clone();
        match &mut rebased {
            MemberIdentity::Method(method) => method.defining_type = defining_type,
            MemberIdentity::Property(property) => property.defining_type = defining_type,
            MemberIdentity::Field(field) => field.defining_type = defining_type,
            MemberIdentity::Event(event) => event.defining_type = defining_type,
        }
        rebased
    }
}

/// Structural identity of a method, constructor or operator overload.
///
/// # Equality Semantics
///
/// **Important**: the [`return_type`](Self::return_type) field participates in equality
/// **only when both operands carry one**. The textual documentation encoding includes a
/// return type solely for conversion operators (the `~ReturnType` suffix), because
/// `op_Implicit`/`op_Explicit` overloads can differ by return type alone; every other
/// reference omits it. The conditional rule lets a return-type-free reference match a
/// fully specified binary definition while still disambiguating conversion operators.
///
/// This makes equality deliberately non-transitive: a return-type-free identity can
/// equal two identities with different return types that are unequal to each other.
/// The rule is preserved from the original model as a documented policy - hash-based
/// containers must not use `MethodIdentity` as a key, and the graph performs member
/// lookup by scanning instead.
///
/// The `Hash` implementation excludes the return type entirely so that equal values
/// always hash identically.
#[derive(Debug, Clone)]
pub struct MethodIdentity {
    /// Identity of the type declaring this method.
    defining_type: TypeIdentity,

    /// Method name in documentation form.
    ///
    /// Constructors are normalized to `#ctor` / `#cctor` at construction time, so
    /// identities built from binary metadata (`.ctor`) and from documentation IDs
    /// (`#ctor`) compare equal without special cases in `PartialEq`.
    name: String,

    /// Count of the method's own generic type parameters.
    arity: u32,

    /// Parameter types, in declaration order.
    parameters: Vec<TypeSignature>,

    /// Return type, when the producing source carries one.
    ///
    /// Binary metadata always knows it; textual references carry it only for
    /// conversion operators.
    return_type: Option<TypeSignature>,
}

impl MethodIdentity {
    /// Create a method identity.
    ///
    /// Compiled constructor names (`.ctor`, `.cctor`) are normalized to their
    /// documentation forms (`#ctor`, `#cctor`).
    ///
    /// # Arguments
    /// * `defining_type` - Identity of the declaring type
    /// * `name` - Method name, must not be empty
    /// * `arity` - Count of the method's own generic type parameters
    /// * `parameters` - Parameter types in declaration order
    /// * `return_type` - Return type, if the source carries one
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn new(
        defining_type: TypeIdentity,
        name: impl Into<String>,
        arity: u32,
        parameters: Vec<TypeSignature>,
        return_type: Option<TypeSignature>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(malformed_error!("Method name must not be empty"));
        }

        let name = match name.as_str() {
            ".ctor" => "#ctor".to_string(),
            ".cctor" => "#cctor".to_string(),
            _ => name,
        };

        Ok(MethodIdentity {
            defining_type,
            name,
            arity,
            parameters,
            return_type,
        })
    }

    /// The identity of the declaring type.
    #[must_use]
    pub fn defining_type(&self) -> &TypeIdentity {
        &self.defining_type
    }

    /// The method name in documentation form (`#ctor` for constructors).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Count of the method's own generic type parameters.
    #[must_use]
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// Parameter types, in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[TypeSignature] {
        &self.parameters
    }

    /// The return type, when the producing source carries one.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeSignature> {
        self.return_type.as_ref()
    }

    /// Whether this identity denotes an instance or static constructor.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == "#ctor" || self.name == "#cctor"
    }
}

impl PartialEq for MethodIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.defining_type == other.defining_type
            && self.name == other.name
            && self.arity == other.arity
            && self.parameters == other.parameters
            && match (&self.return_type, &other.return_type) {
                // Note: the return type participates only when both operands specify
                // it. A reference without one matches any return type; conversion
                // operator references carry it to tell overloads apart.
                (Some(left), Some(right)) => left == right,
                _ => true,
            }
    }
}

impl Eq for MethodIdentity {}

impl Hash for MethodIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.defining_type.hash(state);
        self.name.hash(state);
        self.arity.hash(state);
        self.parameters.hash(state);
        // Note: the return type is excluded from the hash. Equality only considers it
        // when both operands carry one, so including it would let equal values hash
        // differently.
    }
}

/// Structural identity of a property.
///
/// Indexed properties (indexers) carry their index parameter types; the list is empty
/// for regular properties. Overloaded indexers differ only by that list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyIdentity {
    /// Identity of the type declaring this property.
    defining_type: TypeIdentity,
    /// Property name.
    name: String,
    /// Index parameter types, in declaration order. Empty for non-indexed properties.
    parameters: Vec<TypeSignature>,
}

impl PropertyIdentity {
    /// Create a property identity.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn new(
        defining_type: TypeIdentity,
        name: impl Into<String>,
        parameters: Vec<TypeSignature>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(malformed_error!("Property name must not be empty"));
        }

        Ok(PropertyIdentity {
            defining_type,
            name,
            parameters,
        })
    }

    /// The identity of the declaring type.
    #[must_use]
    pub fn defining_type(&self) -> &TypeIdentity {
        &self.defining_type
    }

    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index parameter types; empty for non-indexed properties.
    #[must_use]
    pub fn parameters(&self) -> &[TypeSignature] {
        &self.parameters
    }

    /// Whether this property is an indexer.
    #[must_use]
    pub fn is_indexer(&self) -> bool {
        !self.parameters.is_empty()
    }
}

/// Structural identity of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldIdentity {
    /// Identity of the type declaring this field.
    defining_type: TypeIdentity,
    /// Field name.
    name: String,
}

impl FieldIdentity {
    /// Create a field identity.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn new(defining_type: TypeIdentity, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(malformed_error!("Field name must not be empty"));
        }

        Ok(FieldIdentity {
            defining_type,
            name,
        })
    }

    /// The identity of the declaring type.
    #[must_use]
    pub fn defining_type(&self) -> &TypeIdentity {
        &self.defining_type
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Structural identity of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventIdentity {
    /// Identity of the type declaring this event.
    defining_type: TypeIdentity,
    /// Event name.
    name: String,
}

impl EventIdentity {
    /// Create an event identity.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn new(defining_type: TypeIdentity, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(malformed_error!("Event name must not be empty"));
        }

        Ok(EventIdentity {
            defining_type,
            name,
        })
    }

    /// The identity of the declaring type.
    #[must_use]
    pub fn defining_type(&self) -> &TypeIdentity {
        &self.defining_type
    }

    /// The event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
