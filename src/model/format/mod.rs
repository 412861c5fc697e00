//! Canonical display signature rendering.
//!
//! Produces a single canonical string per member, used both as a page heading and as
//! an overload-disambiguation key. Signatures can be rendered from two sources of
//! different richness: a binary-derived definition (knows generic parameter names) or
//! a lossy textual identity (knows only arity). Both code paths must converge on
//! byte-identical output whenever the textual path has enough information to
//! reconstruct the member - this equivalence is a tested property.
//!
//! # Rendering Rules
//!
//! 1. Display name: constructors use the (un-arity-suffixed) simple name of the
//!    declaring type; operator overloads use the canonical [`OperatorKind`] token;
//!    everything else uses the member's own name.
//! 2. Generic clause: actual parameter names when the binary source supplies them;
//!    otherwise synthesized placeholders - `T` for a single parameter, `T1`..`Tn`
//!    for more. The placeholder rule is a deliberate lossy-recovery policy: the
//!    textual encoding never carries parameter names, so the formatter must produce
//!    some stable, deterministic name.
//! 3. Parameter list: conversion operators render `(<source> to <target>)`; indexed
//!    properties render `[...]`; everything else renders comma-joined parameter type
//!    display names in parentheses.
//!
//! # Examples
//!
//! ```rust
//! use dotdocs::model::{
//!     format,
//!     identity::{MethodIdentity, TypeIdentity, TypeSignature},
//! };
//!
//! let widget = TypeIdentity::new("Acme", "Widget")?;
//! let identity =
//!     MethodIdentity::new(widget, "Render", 1, vec![TypeSignature::MethodVar(0)], None)?;
//!
//! assert_eq!(format::method_identity_signature(&identity), "Render<T>(T)");
//! # Ok::<(), dotdocs::Error>(())
//! ```

use crate::model::{
    graph::{MethodDoc, PropertyDoc},
    identity::{MethodIdentity, PropertyIdentity, TypeIdentity, TypeSignature},
};

pub use operators::OperatorKind;

mod operators;

/// Generic parameter names available while rendering one member signature.
///
/// The binary path fills the name slices from definition details; the textual path
/// leaves them empty and placeholder names are synthesized from the arities.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericContext<'a> {
    type_params: &'a [String],
    type_arity: u32,
    method_params: &'a [String],
    method_arity: u32,
}

impl<'a> GenericContext<'a> {
    /// Context for a member of a (possibly generic) declaring type.
    #[must_use]
    pub fn new(
        type_params: &'a [String],
        type_arity: u32,
        method_params: &'a [String],
        method_arity: u32,
    ) -> Self {
        GenericContext {
            type_params,
            type_arity,
            method_params,
            method_arity,
        }
    }

    /// Display name for the declaring type's generic parameter at `index`.
    #[must_use]
    pub fn type_param(&self, index: u32) -> String {
        named_or_placeholder(self.type_params, index, self.type_arity)
    }

    /// Display name for the method's generic parameter at `index`.
    #[must_use]
    pub fn method_param(&self, index: u32) -> String {
        named_or_placeholder(self.method_params, index, self.method_arity)
    }
}

/// The synthesized name for a generic parameter only known by position.
///
/// A single parameter is shown as `T`, multiple as `T1`..`Tn` in declaration order.
#[must_use]
pub fn placeholder_name(index: u32, arity: u32) -> String {
    if arity == 1 {
        "T".to_string()
    } else {
        format!("T{}", index + 1)
    }
}

fn named_or_placeholder(names: &[String], index: u32, arity: u32) -> String {
    match names.get(index as usize) {
        Some(name) => name.clone(),
        None => placeholder_name(index, arity),
    }
}

/// Render the canonical display signature of a method node.
///
/// Prefers the binary definition when present (actual generic parameter names);
/// otherwise falls back to the identity-only rendering. Declaring-type generic
/// parameters get placeholder names here; use [`method_signature_in`] (or
/// [`crate::model::graph::TypeDoc::method_signature`]) when the declaring
/// type's names are known.
#[must_use]
pub fn method_signature(doc: &MethodDoc) -> String {
    method_signature_in(doc, &[])
}

/// Render the canonical display signature of a method node with the declaring
/// type's generic parameter names in scope.
#[must_use]
pub fn method_signature_in(doc: &MethodDoc, type_params: &[String]) -> String {
    let type_arity = doc.identity.defining_type().arity();
    match &doc.definition {
        Some(definition) => {
            let context = GenericContext::new(
                type_params,
                type_arity,
                &definition.generic_params,
                doc.identity.arity(),
            );
            render_method(&doc.identity, definition.return_type.as_ref(), &context)
        }
        None => {
            let context = GenericContext::new(type_params, type_arity, &[], doc.identity.arity());
            render_method(&doc.identity, doc.identity.return_type(), &context)
        }
    }
}

/// Render the canonical display signature from a method identity alone.
///
/// Generic parameters get placeholder names; the textual encoding cannot carry the
/// real ones.
#[must_use]
pub fn method_identity_signature(identity: &MethodIdentity) -> String {
    let context = GenericContext::new(
        &[],
        identity.defining_type().arity(),
        &[],
        identity.arity(),
    );
    render_method(identity, identity.return_type(), &context)
}

fn render_method(
    identity: &MethodIdentity,
    return_type: Option<&TypeSignature>,
    context: &GenericContext<'_>,
) -> String {
    let mut signature = String::new();

    let operator_kind = OperatorKind::from_method_name(identity.name());
    if identity.is_constructor() {
        signature.push_str(identity.defining_type().name());
    } else if let Some(kind) = operator_kind {
        signature.push_str(kind.token());
    } else {
        signature.push_str(identity.name());
    }

    if identity.arity() > 0 {
        signature.push('<');
        for index in 0..identity.arity() {
            if index > 0 {
                signature.push_str(", ");
            }
            signature.push_str(&context.method_param(index));
        }
        signature.push('>');
    }

    signature.push('(');
    let conversion = operator_kind.is_some_and(|kind| kind.is_conversion());
    match (conversion, identity.parameters().first(), return_type) {
        (true, Some(source), Some(target)) => {
            signature.push_str(&type_display(source, context));
            signature.push_str(" to ");
            signature.push_str(&type_display(target, context));
        }
        _ => {
            for (index, parameter) in identity.parameters().iter().enumerate() {
                if index > 0 {
                    signature.push_str(", ");
                }
                signature.push_str(&type_display(parameter, context));
            }
        }
    }
    signature.push(')');

    signature
}

/// Render the canonical display signature of a property node.
#[must_use]
pub fn property_signature(doc: &PropertyDoc) -> String {
    property_signature_in(doc, &[])
}

/// Render the canonical display signature of a property node with the declaring
/// type's generic parameter names in scope.
#[must_use]
pub fn property_signature_in(doc: &PropertyDoc, type_params: &[String]) -> String {
    render_property(&doc.identity, type_params)
}

/// Render the canonical display signature from a property identity alone.
///
/// Indexed properties render their index parameters in square brackets; everything
/// else is just the property name.
#[must_use]
pub fn property_identity_signature(identity: &PropertyIdentity) -> String {
    render_property(identity, &[])
}

fn render_property(identity: &PropertyIdentity, type_params: &[String]) -> String {
    let mut signature = String::new();
    signature.push_str(identity.name());

    if identity.is_indexer() {
        let context =
            GenericContext::new(type_params, identity.defining_type().arity(), &[], 0);
        signature.push('[');
        for (index, parameter) in identity.parameters().iter().enumerate() {
            if index > 0 {
                signature.push_str(", ");
            }
            signature.push_str(&type_display(parameter, &context));
        }
        signature.push(']');
    }

    signature
}

/// Render the canonical display name of a type in signature position.
///
/// Named types use the C# keyword for `System` primitives and the simple name chain
/// otherwise; open generic types get a placeholder clause; generic instantiations,
/// arrays and by-reference types nest consistently (`List<string>`, `int[,]`,
/// `ref T`). Generic parameter references resolve through `context`.
#[must_use]
pub fn type_display(signature: &TypeSignature, context: &GenericContext<'_>) -> String {
    match signature {
        TypeSignature::Named(identity) => {
            let mut display = named_display(identity);
            if identity.arity() > 0 {
                display.push('<');
                for index in 0..identity.arity() {
                    if index > 0 {
                        display.push_str(", ");
                    }
                    display.push_str(&placeholder_name(index, identity.arity()));
                }
                display.push('>');
            }
            display
        }
        TypeSignature::GenericInstance { definition, args } => {
            let mut display = named_display(definition);
            display.push('<');
            for (index, arg) in args.iter().enumerate() {
                if index > 0 {
                    display.push_str(", ");
                }
                display.push_str(&type_display(arg, context));
            }
            display.push('>');
            display
        }
        TypeSignature::TypeVar(index) => context.type_param(*index),
        TypeSignature::MethodVar(index) => context.method_param(*index),
        TypeSignature::Array { element, rank } => {
            let mut display = type_display(element, context);
            display.push('[');
            for _ in 1..*rank {
                display.push(',');
            }
            display.push(']');
            display
        }
        TypeSignature::ByRef(element) => {
            format!("ref {}", type_display(element, context))
        }
    }
}

/// The display name of a named type: C# keyword for `System` primitives, otherwise
/// the chain of simple names for nested types.
fn named_display(identity: &TypeIdentity) -> String {
    if let Some(keyword) = csharp_keyword(identity) {
        return keyword.to_string();
    }

    match identity.enclosing() {
        Some(enclosing) => format!("{}.{}", named_display(enclosing), identity.name()),
        None => identity.name().to_string(),
    }
}

fn csharp_keyword(identity: &TypeIdentity) -> Option<&'static str> {
    if identity.namespace() != "System" || identity.is_nested() || identity.arity() > 0 {
        return None;
    }

    Some(match identity.name() {
        "Void" => "void",
        "Boolean" => "bool",
        "Char" => "char",
        "SByte" => "sbyte",
        "Byte" => "byte",
        "Int16" => "short",
        "UInt16" => "ushort",
        "Int32" => "int",
        "UInt32" => "uint",
        "Int64" => "long",
        "UInt64" => "ulong",
        "Single" => "float",
        "Double" => "double",
        "Decimal" => "decimal",
        "String" => "string",
        "Object" => "object",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::{MethodDef, ParameterDef};

    fn widget() -> TypeIdentity {
        TypeIdentity::new("Acme", "Widget").unwrap()
    }

    fn int32() -> TypeSignature {
        TypeSignature::named("System", "Int32").unwrap()
    }

    fn string() -> TypeSignature {
        TypeSignature::named("System", "String").unwrap()
    }

    #[test]
    fn test_plain_method() {
        let identity =
            MethodIdentity::new(widget(), "Load", 0, vec![string(), int32()], None).unwrap();

        assert_eq!(method_identity_signature(&identity), "Load(string, int)");
    }

    #[test]
    fn test_parameterless_method() {
        let identity = MethodIdentity::new(widget(), "Clear", 0, vec![], None).unwrap();

        assert_eq!(method_identity_signature(&identity), "Clear()");
    }

    #[test]
    fn test_constructor_uses_declaring_type_name() {
        let identity = MethodIdentity::new(widget(), ".ctor", 0, vec![int32()], None).unwrap();

        assert_eq!(method_identity_signature(&identity), "Widget(int)");
    }

    #[test]
    fn test_constructor_of_generic_type_has_no_arity_suffix() {
        let cache = TypeIdentity::generic("Acme", "Cache", 2).unwrap();
        let identity = MethodIdentity::new(cache, "#ctor", 0, vec![], None).unwrap();

        assert_eq!(method_identity_signature(&identity), "Cache()");
    }

    #[test]
    fn test_single_generic_parameter_placeholder() {
        let identity = MethodIdentity::new(
            widget(),
            "Render",
            1,
            vec![TypeSignature::MethodVar(0)],
            None,
        )
        .unwrap();

        assert_eq!(method_identity_signature(&identity), "Render<T>(T)");
    }

    #[test]
    fn test_multiple_generic_parameter_placeholders() {
        let identity = MethodIdentity::new(
            widget(),
            "Map",
            2,
            vec![TypeSignature::MethodVar(0), TypeSignature::MethodVar(1)],
            None,
        )
        .unwrap();

        assert_eq!(method_identity_signature(&identity), "Map<T1, T2>(T1, T2)");
    }

    #[test]
    fn test_binary_and_textual_paths_converge() {
        // Same logical method, described by both sources. The binary path knows the
        // generic parameter names K and V; the textual path synthesizes T1 and T2.
        // Everything else matches byte for byte.
        let identity = MethodIdentity::new(
            widget(),
            "Map",
            2,
            vec![int32(), string()],
            Some(TypeSignature::named("System", "Void").unwrap()),
        )
        .unwrap();

        let definition = MethodDef {
            generic_params: vec!["K".to_string(), "V".to_string()],
            parameters: vec![
                ParameterDef::new("key", int32()),
                ParameterDef::new("value", string()),
            ],
            return_type: Some(TypeSignature::named("System", "Void").unwrap()),
            modifiers: Default::default(),
        };

        let doc = MethodDoc::from_definition(identity.clone(), definition);
        assert_eq!(doc.signature(), "Map<K, V>(int, string)");
        assert_eq!(method_identity_signature(&identity), "Map<T1, T2>(int, string)");
    }

    #[test]
    fn test_paths_identical_without_generics() {
        let identity = MethodIdentity::new(widget(), "Load", 0, vec![string()], None).unwrap();

        let from_definition = MethodDoc::from_definition(
            identity.clone(),
            MethodDef {
                parameters: vec![ParameterDef::new("path", string())],
                return_type: Some(TypeSignature::named("System", "Boolean").unwrap()),
                ..Default::default()
            },
        );

        assert_eq!(from_definition.signature(), method_identity_signature(&identity));
    }

    #[test]
    fn test_addition_operator_token() {
        let identity = MethodIdentity::new(
            widget(),
            "op_Addition",
            0,
            vec![TypeSignature::Named(widget()), TypeSignature::Named(widget())],
            Some(TypeSignature::Named(widget())),
        )
        .unwrap();

        assert_eq!(method_identity_signature(&identity), "+(Widget, Widget)");
    }

    #[test]
    fn test_explicit_conversion_renders_source_to_target() {
        let identity = MethodIdentity::new(
            widget(),
            "op_Explicit",
            0,
            vec![TypeSignature::Named(widget())],
            Some(int32()),
        )
        .unwrap();

        assert_eq!(
            method_identity_signature(&identity),
            "Explicit(Widget to int)"
        );
    }

    #[test]
    fn test_implicit_conversion_renders_source_to_target() {
        let identity = MethodIdentity::new(
            widget(),
            "op_Implicit",
            0,
            vec![TypeSignature::Named(widget())],
            Some(string()),
        )
        .unwrap();

        assert_eq!(
            method_identity_signature(&identity),
            "Implicit(Widget to string)"
        );
    }

    #[test]
    fn test_conversion_without_return_type_falls_back_to_parameter_list() {
        // A reference that somehow omits the ~ReturnType suffix still renders
        // deterministically.
        let identity = MethodIdentity::new(
            widget(),
            "op_Explicit",
            0,
            vec![TypeSignature::Named(widget())],
            None,
        )
        .unwrap();

        assert_eq!(method_identity_signature(&identity), "Explicit(Widget)");
    }

    #[test]
    fn test_declaring_type_parameter_names_in_method_signature() {
        let cache = TypeIdentity::generic("Acme", "Cache", 2).unwrap();
        let identity = MethodIdentity::new(
            cache,
            "Store",
            0,
            vec![TypeSignature::TypeVar(0), TypeSignature::TypeVar(1)],
            Some(TypeSignature::named("System", "Void").unwrap()),
        )
        .unwrap();
        let doc = MethodDoc::from_definition(
            identity.clone(),
            MethodDef {
                parameters: vec![
                    ParameterDef::new("key", TypeSignature::TypeVar(0)),
                    ParameterDef::new("value", TypeSignature::TypeVar(1)),
                ],
                return_type: Some(TypeSignature::named("System", "Void").unwrap()),
                ..Default::default()
            },
        );

        let names = vec!["TKey".to_string(), "TValue".to_string()];
        assert_eq!(method_signature_in(&doc, &names), "Store(TKey, TValue)");
        // Without the names, placeholders stand in.
        assert_eq!(method_signature(&doc), "Store(T1, T2)");
        assert_eq!(method_identity_signature(&identity), "Store(T1, T2)");
    }

    #[test]
    fn test_declaring_type_parameter_names_in_indexer_signature() {
        let cache = TypeIdentity::generic("Acme", "Cache", 2).unwrap();
        let identity =
            PropertyIdentity::new(cache, "Item", vec![TypeSignature::TypeVar(0)]).unwrap();
        let doc = PropertyDoc::new(identity);

        let names = vec!["TKey".to_string(), "TValue".to_string()];
        assert_eq!(property_signature_in(&doc, &names), "Item[TKey]");
        assert_eq!(property_signature(&doc), "Item[T1]");
    }

    #[test]
    fn test_property_signature() {
        let identity = PropertyIdentity::new(widget(), "Count", vec![]).unwrap();

        assert_eq!(property_identity_signature(&identity), "Count");
    }

    #[test]
    fn test_indexer_signature() {
        let identity =
            PropertyIdentity::new(widget(), "Item", vec![int32(), string()]).unwrap();

        assert_eq!(property_identity_signature(&identity), "Item[int, string]");
    }

    #[test]
    fn test_generic_instance_display() {
        let list = TypeIdentity::generic("System.Collections.Generic", "List", 1).unwrap();
        let nested = TypeSignature::GenericInstance {
            definition: list.clone(),
            args: vec![TypeSignature::GenericInstance {
                definition: list,
                args: vec![string()],
            }],
        };

        assert_eq!(
            type_display(&nested, &GenericContext::default()),
            "List<List<string>>"
        );
    }

    #[test]
    fn test_open_generic_display_uses_placeholders() {
        let dictionary =
            TypeIdentity::generic("System.Collections.Generic", "Dictionary", 2).unwrap();

        assert_eq!(
            type_display(&TypeSignature::Named(dictionary), &GenericContext::default()),
            "Dictionary<T1, T2>"
        );
    }

    #[test]
    fn test_array_and_byref_display() {
        let array = TypeSignature::Array {
            element: Box::new(int32()),
            rank: 1,
        };
        let matrix = TypeSignature::Array {
            element: Box::new(int32()),
            rank: 2,
        };
        let byref = TypeSignature::ByRef(Box::new(string()));

        let context = GenericContext::default();
        assert_eq!(type_display(&array, &context), "int[]");
        assert_eq!(type_display(&matrix, &context), "int[,]");
        assert_eq!(type_display(&byref, &context), "ref string");
    }

    #[test]
    fn test_nested_type_display() {
        let builder = TypeIdentity::nested(widget(), "Builder").unwrap();

        assert_eq!(
            type_display(&TypeSignature::Named(builder), &GenericContext::default()),
            "Widget.Builder"
        );
    }

    #[test]
    fn test_non_primitive_system_type_keeps_its_name() {
        let date_time = TypeSignature::named("System", "DateTime").unwrap();

        assert_eq!(
            type_display(&date_time, &GenericContext::default()),
            "DateTime"
        );
    }
}
