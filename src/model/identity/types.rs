//! Structural type identities for the documentation model.
//!
//! This module defines [`TypeIdentity`], the immutable value that uniquely denotes one
//! named type, and [`TypeSignature`], the shapes a type can take in a parameter or
//! return position of a member signature (named types, generic instantiations, generic
//! parameter references, arrays, by-reference types).
//!
//! # Cross-Source Equality
//!
//! Identities are produced by two independent sources that carry different amounts of
//! information: binary metadata (rich - knows generic parameter names) and textual
//! documentation references (lossy - knows only arity and positional indices). Equality
//! and hashing are purely structural so that both sources converge on the same value:
//! generic parameters are identified by index, never by name.
//!
//! # Key Types
//! - [`TypeIdentity`] - Namespace, simple name, generic arity, optional enclosing type
//! - [`TypeSignature`] - A type as it appears inside a member signature
//!
//! # Examples
//!
//! ```rust
//! use dotdocs::model::identity::TypeIdentity;
//!
//! let widget = TypeIdentity::new("Acme", "Widget")?;
//! let nested = TypeIdentity::nested(widget.clone(), "Builder")?;
//!
//! // A nested identity inherits the namespace of its enclosing type
//! assert_eq!(nested.namespace(), "Acme");
//! assert_eq!(nested.full_name(), "Acme.Widget.Builder");
//! # Ok::<(), dotdocs::Error>(())
//! ```

use std::fmt;

use crate::Result;

/// Structural identity of a named .NET type.
///
/// A `TypeIdentity` denotes exactly one type declaration: its namespace (an ordered
/// dot-separated path, possibly empty), its simple name (without the compiler's
/// `` `n `` arity suffix), the number of its own generic type parameters, and - for
/// nested types - the identity of the enclosing type.
///
/// # Equality Semantics
///
/// Two identities are equal iff namespace, name, arity and the enclosing identity
/// (recursively) are all equal. Equality is structural and independent of which source
/// produced the value, so an identity decoded from binary metadata compares equal to
/// one parsed from a textual documentation reference describing the same type.
///
/// # Invariant
///
/// An identity with an enclosing type always has a namespace equal to the enclosing
/// identity's namespace. The [`TypeIdentity::nested`] constructor derives the namespace
/// from the enclosing identity, so the invariant holds by construction and is not
/// re-checked anywhere else.
///
/// # Examples
///
/// ```rust
/// use dotdocs::model::identity::TypeIdentity;
///
/// let list = TypeIdentity::generic("System.Collections.Generic", "List", 1)?;
/// assert_eq!(list.arity(), 1);
/// assert_eq!(list.to_string(), "System.Collections.Generic.List");
/// # Ok::<(), dotdocs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    /// Namespace path, dot-separated. Empty for types in the global namespace.
    namespace: String,
    /// Simple type name without arity suffix.
    name: String,
    /// Count of the type's own generic parameters (not inherited from enclosing types).
    arity: u32,
    /// Identity of the enclosing type, for nested types.
    enclosing: Option<Box<TypeIdentity>>,
}

impl TypeIdentity {
    /// Create an identity for a non-generic, non-nested type.
    ///
    /// # Arguments
    /// * `namespace` - Dot-separated namespace path, may be empty
    /// * `name` - Simple type name, must not be empty
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Self::generic(namespace, name, 0)
    }

    /// Create an identity for a generic, non-nested type.
    ///
    /// # Arguments
    /// * `namespace` - Dot-separated namespace path, may be empty
    /// * `name` - Simple type name without arity suffix, must not be empty
    /// * `arity` - Count of the type's own generic parameters
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn generic(
        namespace: impl Into<String>,
        name: impl Into<String>,
        arity: u32,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(malformed_error!("Type name must not be empty"));
        }

        Ok(TypeIdentity {
            namespace: namespace.into(),
            name,
            arity,
            enclosing: None,
        })
    }

    /// Create an identity for a non-generic nested type.
    ///
    /// The namespace is taken from the enclosing identity, which keeps the
    /// namespace-consistency invariant intact by construction.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn nested(enclosing: TypeIdentity, name: impl Into<String>) -> Result<Self> {
        Self::nested_generic(enclosing, name, 0)
    }

    /// Create an identity for a generic nested type.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn nested_generic(
        enclosing: TypeIdentity,
        name: impl Into<String>,
        arity: u32,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(malformed_error!("Type name must not be empty"));
        }

        Ok(TypeIdentity {
            namespace: enclosing.namespace.clone(),
            name,
            arity,
            enclosing: Some(Box::new(enclosing)),
        })
    }

    /// Create an identity from a compiled type name that may carry an arity suffix.
    ///
    /// Binary metadata encodes generic types as `` Name`n `` (e.g. `` List`1 ``); this
    /// strips the suffix into the arity so both sources produce the same identity.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the name is empty or the suffix is not a
    /// valid number.
    pub fn from_compiled(namespace: impl Into<String>, raw_name: &str) -> Result<Self> {
        let (name, arity) = split_arity_suffix(raw_name)?;
        Self::generic(namespace, name, arity)
    }

    /// Create a nested identity from a compiled type name that may carry an arity suffix.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the name is empty or the suffix is not a
    /// valid number.
    pub fn nested_from_compiled(enclosing: TypeIdentity, raw_name: &str) -> Result<Self> {
        let (name, arity) = split_arity_suffix(raw_name)?;
        Self::nested_generic(enclosing, name, arity)
    }

    /// The namespace path of this type. Empty for the global namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The ordered namespace segments.
    pub fn namespace_segments(&self) -> impl Iterator<Item = &str> {
        self.namespace.split('.').filter(|s| !s.is_empty())
    }

    /// The simple name of this type, without arity suffix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Count of the type's own generic parameters.
    #[must_use]
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// The identity of the enclosing type, if this is a nested type.
    #[must_use]
    pub fn enclosing(&self) -> Option<&TypeIdentity> {
        self.enclosing.as_deref()
    }

    /// Whether this identity denotes a nested type.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.enclosing.is_some()
    }

    /// The full dotted name of this type: namespace, enclosing type names and own name.
    ///
    /// Used in diagnostics and as the textual form in error messages, e.g.
    /// `Namespace1.Class1.Class2` for a nested type.
    #[must_use]
    pub fn full_name(&self) -> String {
        let mut result = String::new();
        self.write_full_name(&mut result);
        result
    }

    fn write_full_name(&self, out: &mut String) {
        if let Some(enclosing) = &self.enclosing {
            enclosing.write_full_name(out);
            out.push('.');
        } else if !self.namespace.is_empty() {
            out.push_str(&self.namespace);
            out.push('.');
        }
        out.push_str(&self.name);
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Split a compiled type or method name into simple name and arity.
///
/// `` List`1 `` becomes `("List", 1)`; a name without a backtick has arity 0.
fn split_arity_suffix(raw_name: &str) -> Result<(&str, u32)> {
    match raw_name.rsplit_once('`') {
        Some((name, suffix)) => {
            if name.is_empty() {
                return Err(malformed_error!(
                    "Type name '{}' has no characters before its arity suffix",
                    raw_name
                ));
            }
            let arity = suffix.parse::<u32>().map_err(|_| {
                malformed_error!("Invalid arity suffix in type name '{}'", raw_name)
            })?;
            Ok((name, arity))
        }
        None => {
            if raw_name.is_empty() {
                return Err(malformed_error!("Type name must not be empty"));
            }
            Ok((raw_name, 0))
        }
    }
}

/// A type as it appears inside a member signature.
///
/// Parameter and return positions can hold more shapes than plain named types: generic
/// instantiations (`List<string>`), references to a generic parameter of the declaring
/// type or of the method itself, arrays and by-reference types. Generic parameters are
/// represented **by index** - the textual documentation encoding (`` `0 ``, `` ``0 ``)
/// never carries their names, so names cannot participate in identity.
///
/// # Examples
///
/// ```rust
/// use dotdocs::model::identity::{TypeIdentity, TypeSignature};
///
/// // List<string>
/// let list_of_string = TypeSignature::GenericInstance {
///     definition: TypeIdentity::generic("System.Collections.Generic", "List", 1)?,
///     args: vec![TypeSignature::Named(TypeIdentity::new("System", "String")?)],
/// };
///
/// // The method's first generic parameter, regardless of what the source named it
/// let method_var = TypeSignature::MethodVar(0);
/// assert_ne!(list_of_string, method_var);
/// # Ok::<(), dotdocs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    /// A named type, given by its identity.
    Named(TypeIdentity),
    /// A generic type instantiation, e.g. `List<string>`.
    GenericInstance {
        /// Identity of the open generic definition.
        definition: TypeIdentity,
        /// The type arguments, in declaration order.
        args: Vec<TypeSignature>,
    },
    /// A generic parameter of the declaring type, by index.
    TypeVar(u32),
    /// A generic parameter of the method, by index.
    MethodVar(u32),
    /// An array type.
    Array {
        /// Element type of the array.
        element: Box<TypeSignature>,
        /// Number of dimensions; 1 for a single-dimensional array.
        rank: u32,
    },
    /// A by-reference type (`ref` / `out` parameter).
    ByRef(Box<TypeSignature>),
}

impl TypeSignature {
    /// Convenience constructor for a named type signature.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Ok(TypeSignature::Named(TypeIdentity::new(namespace, name)?))
    }

    /// The named identity at the root of this signature, if there is one.
    ///
    /// Generic parameter references have no identity of their own; arrays and byref
    /// wrappers defer to their element type.
    #[must_use]
    pub fn identity(&self) -> Option<&TypeIdentity> {
        match self {
            TypeSignature::Named(identity) => Some(identity),
            TypeSignature::GenericInstance { definition, .. } => Some(definition),
            TypeSignature::Array { element, .. } | TypeSignature::ByRef(element) => {
                element.identity()
            }
            TypeSignature::TypeVar(_) | TypeSignature::MethodVar(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_rejects_empty_name() {
        assert!(TypeIdentity::new("System", "").is_err());
        assert!(TypeIdentity::generic("System", "", 1).is_err());
    }

    #[test]
    fn test_empty_namespace_is_allowed() {
        let identity = TypeIdentity::new("", "Global").unwrap();
        assert_eq!(identity.namespace(), "");
        assert_eq!(identity.full_name(), "Global");
    }

    #[test]
    fn test_structural_equality_across_instances() {
        let a = TypeIdentity::generic("System.Collections.Generic", "List", 1).unwrap();
        let b = TypeIdentity::generic("System.Collections.Generic", "List", 1).unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_arity_participates_in_equality() {
        let non_generic = TypeIdentity::new("System", "Tuple").unwrap();
        let generic = TypeIdentity::generic("System", "Tuple", 2).unwrap();

        assert_ne!(non_generic, generic);
    }

    #[test]
    fn test_nested_type_inherits_namespace() {
        let outer = TypeIdentity::new("Namespace1", "Class1").unwrap();
        let inner = TypeIdentity::nested(outer.clone(), "Class2").unwrap();

        assert_eq!(inner.namespace(), "Namespace1");
        assert_eq!(inner.enclosing(), Some(&outer));
        assert!(inner.is_nested());
        assert_eq!(inner.full_name(), "Namespace1.Class1.Class2");
    }

    #[test]
    fn test_nested_equality_is_recursive() {
        let outer_a = TypeIdentity::new("N1", "C1").unwrap();
        let outer_b = TypeIdentity::new("N1", "C2").unwrap();

        let inner_a = TypeIdentity::nested(outer_a.clone(), "Inner").unwrap();
        let inner_a2 = TypeIdentity::nested(outer_a, "Inner").unwrap();
        let inner_b = TypeIdentity::nested(outer_b, "Inner").unwrap();

        assert_eq!(inner_a, inner_a2);
        assert_ne!(inner_a, inner_b);
    }

    #[test]
    fn test_from_compiled_strips_arity_suffix() {
        let identity = TypeIdentity::from_compiled("System.Collections.Generic", "List`1").unwrap();

        assert_eq!(identity.name(), "List");
        assert_eq!(identity.arity(), 1);

        let plain = TypeIdentity::from_compiled("System", "String").unwrap();
        assert_eq!(plain.name(), "String");
        assert_eq!(plain.arity(), 0);
    }

    #[test]
    fn test_from_compiled_rejects_invalid_suffix() {
        assert!(TypeIdentity::from_compiled("System", "List`x").is_err());
        assert!(TypeIdentity::from_compiled("System", "`1").is_err());
        assert!(TypeIdentity::from_compiled("System", "").is_err());
    }

    #[test]
    fn test_compiled_name_equals_plain_construction() {
        let from_compiled =
            TypeIdentity::from_compiled("System.Collections.Generic", "Dictionary`2").unwrap();
        let from_parts =
            TypeIdentity::generic("System.Collections.Generic", "Dictionary", 2).unwrap();

        assert_eq!(from_compiled, from_parts);
        assert_eq!(hash_of(&from_compiled), hash_of(&from_parts));
    }

    #[test]
    fn test_namespace_segments() {
        let identity = TypeIdentity::new("System.Collections.Generic", "List").unwrap();
        let segments: Vec<&str> = identity.namespace_segments().collect();

        assert_eq!(segments, vec!["System", "Collections", "Generic"]);

        let global = TypeIdentity::new("", "Global").unwrap();
        assert_eq!(global.namespace_segments().count(), 0);
    }

    #[test]
    fn test_signature_generic_parameters_compare_by_index() {
        // Two sources describing the same parameter: one knows it as 'T', the other
        // only as position 0. Both encode MethodVar(0) and therefore compare equal.
        let from_binary = TypeSignature::MethodVar(0);
        let from_textual = TypeSignature::MethodVar(0);

        assert_eq!(from_binary, from_textual);
        assert_ne!(TypeSignature::MethodVar(0), TypeSignature::MethodVar(1));
        assert_ne!(TypeSignature::MethodVar(0), TypeSignature::TypeVar(0));
    }

    #[test]
    fn test_signature_generic_instance_equality() {
        let list = TypeIdentity::generic("System.Collections.Generic", "List", 1).unwrap();
        let string = TypeIdentity::new("System", "String").unwrap();

        let a = TypeSignature::GenericInstance {
            definition: list.clone(),
            args: vec![TypeSignature::Named(string.clone())],
        };
        let b = TypeSignature::GenericInstance {
            definition: list.clone(),
            args: vec![TypeSignature::Named(string)],
        };
        let c = TypeSignature::GenericInstance {
            definition: list,
            args: vec![TypeSignature::MethodVar(0)],
        };

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_signature_identity_traversal() {
        let string = TypeIdentity::new("System", "String").unwrap();
        let array = TypeSignature::Array {
            element: Box::new(TypeSignature::Named(string.clone())),
            rank: 1,
        };
        let byref = TypeSignature::ByRef(Box::new(array.clone()));

        assert_eq!(array.identity(), Some(&string));
        assert_eq!(byref.identity(), Some(&string));
        assert_eq!(TypeSignature::MethodVar(0).identity(), None);
    }
}
