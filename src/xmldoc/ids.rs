//! Parser for .NET documentation ID strings.
//!
//! Compiler-emitted documentation files identify every symbol with an ID string:
//! a one-letter kind prefix, a colon, and an encoded symbol path. This module
//! parses those strings into [`DocRef`] values built from structural identities,
//! so a textual reference compares equal to the identity a binary source produced
//! for the same symbol.
//!
//! Supported forms:
//!
//! - `N:Acme.Widgets` - namespace
//! - `T:Acme.Widget`, ``T:System.Collections.Generic.List`1`` - types, with
//!   compiled arity suffixes
//! - `M:Acme.Widget.#ctor(System.Int32)` - constructors
//! - ``M:Acme.Widget.Render``1(`0)`` - generic methods; ```` ``n ```` is the
//!   method's arity, `` `i `` / ```` ``i ```` reference a type or method generic
//!   parameter by index
//! - `M:Acme.Widget.op_Explicit(Acme.Widget)~System.Int32` - conversion
//!   operators carry the return type after `~`
//! - `P:Acme.Widget.Item(System.Int32)` - indexers
//! - `F:`, `E:` - fields and events
//! - parameter encodings: `{...}` generic instantiations, `[]`/`[,]` arrays
//!   (with or without `0:` bound markers), trailing `@` for by-reference
//!
//! The encoding gives no way to tell a namespace segment from an enclosing-type
//! segment when neither carries an arity marker; the parser treats everything
//! before the last plain segment as namespace, and the resolver compensates by
//! reinterpreting trailing namespace segments as nested types on a lookup miss.

use crate::{
    model::{
        identity::{
            EventIdentity, FieldIdentity, MemberIdentity, MethodIdentity,
            PropertyIdentity, TypeIdentity, TypeSignature,
        },
        resolver::DocRef,
    },
    Result,
};

/// Parse a documentation ID string into a [`DocRef`].
///
/// # Errors
///
/// Returns [`crate::Error::Malformed`] for strings that do not follow the
/// documented encoding: missing or unknown prefix, empty paths, unbalanced
/// brackets, parameter lists on member kinds that cannot carry them.
pub fn parse(id: &str) -> Result<DocRef> {
    let Some((prefix, rest)) = id.split_once(':') else {
        return Err(malformed_error!(
            "Documentation ID '{}' has no kind prefix",
            id
        ));
    };

    if rest.is_empty() {
        return Err(malformed_error!("Documentation ID '{}' has an empty path", id));
    }

    match prefix {
        "N" => Ok(DocRef::Namespace(rest.to_string())),
        "T" => Ok(DocRef::Type(parse_type_path(rest)?)),
        "M" => {
            let parts = split_member(rest)?;
            let (name, arity) = split_method_arity(parts.name)?;
            let parameters = parse_parameter_list(parts.parameters)?;
            let return_type = match parts.return_type {
                Some(encoded) => Some(parse_type_ref(encoded)?),
                None => None,
            };
            Ok(DocRef::Member(MemberIdentity::Method(MethodIdentity::new(
                parse_type_path(parts.type_path)?,
                name,
                arity,
                parameters,
                return_type,
            )?)))
        }
        "P" => {
            let parts = split_member(rest)?;
            if parts.return_type.is_some() {
                return Err(malformed_error!(
                    "Property ID '{}' cannot carry a return type",
                    id
                ));
            }
            let parameters = parse_parameter_list(parts.parameters)?;
            Ok(DocRef::Member(MemberIdentity::Property(
                PropertyIdentity::new(parse_type_path(parts.type_path)?, parts.name, parameters)?,
            )))
        }
        "F" => {
            let parts = split_member(rest)?;
            if parts.parameters.is_some() || parts.return_type.is_some() {
                return Err(malformed_error!(
                    "Field ID '{}' cannot carry a parameter list",
                    id
                ));
            }
            Ok(DocRef::Member(MemberIdentity::Field(FieldIdentity::new(
                parse_type_path(parts.type_path)?,
                parts.name,
            )?)))
        }
        "E" => {
            let parts = split_member(rest)?;
            if parts.parameters.is_some() || parts.return_type.is_some() {
                return Err(malformed_error!(
                    "Event ID '{}' cannot carry a parameter list",
                    id
                ));
            }
            Ok(DocRef::Member(MemberIdentity::Event(EventIdentity::new(
                parse_type_path(parts.type_path)?,
                parts.name,
            )?)))
        }
        _ => Err(malformed_error!(
            "Documentation ID '{}' has unknown kind prefix '{}'",
            id,
            prefix
        )),
    }
}

/// The raw pieces of a member ID path.
struct MemberParts<'a> {
    type_path: &'a str,
    name: &'a str,
    parameters: Option<&'a str>,
    return_type: Option<&'a str>,
}

/// Split `Ns.Type.Member(Params)~Return` into its pieces.
fn split_member(rest: &str) -> Result<MemberParts<'_>> {
    let (path, parameters, return_type) = match rest.find('(') {
        Some(open) => {
            let Some(close) = rest.rfind(')') else {
                return Err(malformed_error!(
                    "Member ID '{}' has an unterminated parameter list",
                    rest
                ));
            };
            if close < open {
                return Err(malformed_error!(
                    "Member ID '{}' has an unterminated parameter list",
                    rest
                ));
            }
            let trailing = &rest[close + 1..];
            let return_type = match trailing.strip_prefix('~') {
                Some(encoded) if !encoded.is_empty() => Some(encoded),
                Some(_) => {
                    return Err(malformed_error!(
                        "Member ID '{}' has an empty return type",
                        rest
                    ))
                }
                None if trailing.is_empty() => None,
                None => {
                    return Err(malformed_error!(
                        "Member ID '{}' has trailing characters after its parameter list",
                        rest
                    ))
                }
            };
            (&rest[..open], Some(&rest[open + 1..close]), return_type)
        }
        None => (rest, None, None),
    };

    let Some((type_path, name)) = path.rsplit_once('.') else {
        return Err(malformed_error!(
            "Member ID '{}' does not name a declaring type",
            rest
        ));
    };
    if name.is_empty() {
        return Err(malformed_error!("Member ID '{}' has an empty member name", rest));
    }

    Ok(MemberParts {
        type_path,
        name,
        parameters,
        return_type,
    })
}

/// Split a method name from its ```` ``n ```` arity suffix.
fn split_method_arity(name: &str) -> Result<(&str, u32)> {
    match name.split_once("``") {
        Some((bare, suffix)) => {
            if bare.is_empty() {
                return Err(malformed_error!(
                    "Method name '{}' has no characters before its arity suffix",
                    name
                ));
            }
            let arity = suffix.parse::<u32>().map_err(|_| {
                malformed_error!("Invalid arity suffix in method name '{}'", name)
            })?;
            Ok((bare, arity))
        }
        None => Ok((name, 0)),
    }
}

/// Parse a type path such as ``System.Collections.Generic.Dictionary`2`` or
/// ``Acme.Outer`1.Inner``.
///
/// Everything before the first segment carrying an arity marker is namespace; if
/// no segment carries one, the last segment alone is the type.
pub(crate) fn parse_type_path(path: &str) -> Result<TypeIdentity> {
    let segments = split_top_level(path, '.');
    if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
        return Err(malformed_error!("Invalid type path '{}'", path));
    }

    let type_start = segments
        .iter()
        .position(|segment| segment.contains('`'))
        .unwrap_or(segments.len() - 1);

    let namespace = segments[..type_start].join(".");
    let mut identity: Option<TypeIdentity> = None;
    for segment in &segments[type_start..] {
        identity = Some(match identity {
            None => TypeIdentity::from_compiled(namespace.clone(), segment)?,
            Some(enclosing) => TypeIdentity::nested_from_compiled(enclosing, segment)?,
        });
    }

    // The loop runs at least once; segments is non-empty.
    identity.ok_or_else(|| malformed_error!("Invalid type path '{}'", path))
}

/// Parse a comma-separated parameter list (commas inside `{}` do not split).
fn parse_parameter_list(parameters: Option<&str>) -> Result<Vec<TypeSignature>> {
    let Some(parameters) = parameters else {
        return Ok(Vec::new());
    };
    if parameters.is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(parameters, ',')
        .iter()
        .map(|encoded| parse_type_ref(encoded))
        .collect()
}

/// Parse one encoded type reference from a parameter or return position.
fn parse_type_ref(encoded: &str) -> Result<TypeSignature> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(malformed_error!("Empty type reference"));
    }

    // Trailing @ marks a by-reference parameter.
    if let Some(inner) = encoded.strip_suffix('@') {
        return Ok(TypeSignature::ByRef(Box::new(parse_type_ref(inner)?)));
    }

    // Trailing [...] marks an array; the bracket content is either empty, commas,
    // or `0:`-style bound markers separated by commas.
    if let Some(open) = find_array_suffix(encoded) {
        let inner = &encoded[..open];
        let bounds = &encoded[open + 1..encoded.len() - 1];
        let rank = u32::try_from(bounds.split(',').count()).map_err(|_| {
            malformed_error!("Invalid array rank in type reference '{}'", encoded)
        })?;
        return Ok(TypeSignature::Array {
            element: Box::new(parse_type_ref(inner)?),
            rank,
        });
    }

    // Generic parameter references: ``i for the method, `i for the type.
    if let Some(index) = encoded.strip_prefix("``") {
        let index = index.parse::<u32>().map_err(|_| {
            malformed_error!("Invalid method generic parameter reference '{}'", encoded)
        })?;
        return Ok(TypeSignature::MethodVar(index));
    }
    if let Some(index) = encoded.strip_prefix('`') {
        let index = index.parse::<u32>().map_err(|_| {
            malformed_error!("Invalid type generic parameter reference '{}'", encoded)
        })?;
        return Ok(TypeSignature::TypeVar(index));
    }

    if encoded.contains('{') {
        return parse_generic_instance(encoded);
    }

    Ok(TypeSignature::Named(parse_type_path(encoded)?))
}

/// Parse a generic instantiation such as
/// `System.Collections.Generic.List{System.String}`.
///
/// Nested instantiations (`Outer{T}.Inner{U}`) flatten their arguments in
/// declaration order, outermost first.
fn parse_generic_instance(encoded: &str) -> Result<TypeSignature> {
    let segments = split_top_level(encoded, '.');
    if segments.iter().any(|s| s.is_empty()) {
        return Err(malformed_error!("Invalid type reference '{}'", encoded));
    }

    let type_start = segments
        .iter()
        .position(|segment| segment.contains('{') || segment.contains('`'))
        .unwrap_or(segments.len() - 1);

    let namespace = segments[..type_start].join(".");
    let mut identity: Option<TypeIdentity> = None;
    let mut args = Vec::new();

    for segment in &segments[type_start..] {
        let (raw_name, segment_args) = match segment.find('{') {
            Some(open) => {
                let Some(close) = segment.rfind('}') else {
                    return Err(malformed_error!(
                        "Unbalanced braces in type reference '{}'",
                        encoded
                    ));
                };
                let inner = &segment[open + 1..close];
                let segment_args: Vec<TypeSignature> = split_top_level(inner, ',')
                    .iter()
                    .map(|arg| parse_type_ref(arg))
                    .collect::<Result<_>>()?;
                (&segment[..open], segment_args)
            }
            None => (*segment, Vec::new()),
        };

        let arity = u32::try_from(segment_args.len())
            .map_err(|_| malformed_error!("Invalid type reference '{}'", encoded))?;
        identity = Some(match identity {
            None if arity > 0 => {
                let plain = TypeIdentity::from_compiled(namespace.clone(), raw_name)?;
                TypeIdentity::generic(plain.namespace(), plain.name(), arity)?
            }
            None => TypeIdentity::from_compiled(namespace.clone(), raw_name)?,
            Some(enclosing) if arity > 0 => {
                let plain = TypeIdentity::nested_from_compiled(enclosing.clone(), raw_name)?;
                TypeIdentity::nested_generic(enclosing, plain.name(), arity)?
            }
            Some(enclosing) => TypeIdentity::nested_from_compiled(enclosing, raw_name)?,
        });
        args.extend(segment_args);
    }

    let Some(definition) = identity else {
        return Err(malformed_error!("Invalid type reference '{}'", encoded));
    };

    if args.is_empty() {
        Ok(TypeSignature::Named(definition))
    } else {
        Ok(TypeSignature::GenericInstance { definition, args })
    }
}

/// Find the opening bracket of a trailing array suffix, if the reference ends
/// with one whose content is only bound markers and commas.
fn find_array_suffix(encoded: &str) -> Option<usize> {
    if !encoded.ends_with(']') {
        return None;
    }
    let open = encoded.rfind('[')?;
    let bounds = &encoded[open + 1..encoded.len() - 1];
    let valid = bounds
        .split(',')
        .all(|bound| bound.is_empty() || bound.chars().all(|c| c.is_ascii_digit() || c == ':'));
    valid.then_some(open)
}

/// Split on `separator` at brace and bracket depth zero.
///
/// Brackets matter as well as braces: the bound markers of a multi-dimensional
/// array suffix (`[0:,0:]`) contain commas that must not split a parameter
/// list.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (index, c) in text.char_indices() {
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type(id: &str) -> TypeIdentity {
        match parse(id).unwrap() {
            DocRef::Type(identity) => identity,
            other => panic!("Expected type reference, got {other:?}"),
        }
    }

    fn parse_method(id: &str) -> MethodIdentity {
        match parse(id).unwrap() {
            DocRef::Member(MemberIdentity::Method(identity)) => identity,
            other => panic!("Expected method reference, got {other:?}"),
        }
    }

    #[test]
    fn test_namespace_id() {
        assert_eq!(
            parse("N:Acme.Widgets").unwrap(),
            DocRef::Namespace("Acme.Widgets".to_string())
        );
    }

    #[test]
    fn test_plain_type_id() {
        let identity = parse_type("T:Acme.Widgets.Button");

        assert_eq!(identity.namespace(), "Acme.Widgets");
        assert_eq!(identity.name(), "Button");
        assert_eq!(identity.arity(), 0);
    }

    #[test]
    fn test_generic_type_id() {
        let identity = parse_type("T:System.Collections.Generic.Dictionary`2");

        assert_eq!(identity.namespace(), "System.Collections.Generic");
        assert_eq!(identity.name(), "Dictionary");
        assert_eq!(identity.arity(), 2);
    }

    #[test]
    fn test_nested_type_after_generic_segment() {
        let identity = parse_type("T:Acme.Outer`1.Inner");

        assert_eq!(identity.namespace(), "Acme");
        assert_eq!(identity.name(), "Inner");
        assert!(identity.is_nested());
        assert_eq!(identity.enclosing().unwrap().arity(), 1);
    }

    #[test]
    fn test_global_namespace_type() {
        let identity = parse_type("T:Widget");

        assert_eq!(identity.namespace(), "");
        assert_eq!(identity.name(), "Widget");
    }

    #[test]
    fn test_method_with_parameters() {
        let identity = parse_method("M:Acme.Widget.Load(System.String,System.Int32)");

        assert_eq!(identity.name(), "Load");
        assert_eq!(identity.parameters().len(), 2);
        assert_eq!(
            identity.parameters()[0],
            TypeSignature::named("System", "String").unwrap()
        );
    }

    #[test]
    fn test_parameterless_method() {
        let identity = parse_method("M:Acme.Widget.Clear");

        assert_eq!(identity.name(), "Clear");
        assert!(identity.parameters().is_empty());
    }

    #[test]
    fn test_constructor_id() {
        let identity = parse_method("M:Acme.Widget.#ctor(System.Int32)");

        assert!(identity.is_constructor());
        assert_eq!(identity.defining_type().name(), "Widget");
    }

    #[test]
    fn test_generic_method_with_parameter_references() {
        let identity = parse_method("M:Acme.Widget.Render``1(``0)");

        assert_eq!(identity.name(), "Render");
        assert_eq!(identity.arity(), 1);
        assert_eq!(identity.parameters(), &[TypeSignature::MethodVar(0)]);
    }

    #[test]
    fn test_type_parameter_reference() {
        let identity = parse_method("M:Acme.Cache`1.Store(`0)");

        assert_eq!(identity.defining_type().arity(), 1);
        assert_eq!(identity.parameters(), &[TypeSignature::TypeVar(0)]);
    }

    #[test]
    fn test_conversion_operator_with_return_type() {
        let identity = parse_method("M:Acme.Widget.op_Explicit(Acme.Widget)~System.Int32");

        assert_eq!(identity.name(), "op_Explicit");
        assert_eq!(
            identity.return_type(),
            Some(&TypeSignature::named("System", "Int32").unwrap())
        );
    }

    #[test]
    fn test_generic_instance_parameter() {
        let identity =
            parse_method("M:Acme.Widget.AddAll(System.Collections.Generic.List{System.String})");

        let TypeSignature::GenericInstance { definition, args } = &identity.parameters()[0]
        else {
            panic!("Expected generic instance");
        };
        assert_eq!(definition.name(), "List");
        assert_eq!(definition.arity(), 1);
        assert_eq!(args, &vec![TypeSignature::named("System", "String").unwrap()]);
    }

    #[test]
    fn test_nested_generic_instance_parameter() {
        let identity = parse_method(
            "M:Acme.Widget.Tally(System.Collections.Generic.Dictionary{System.String,System.Collections.Generic.List{System.Int32}})",
        );

        let TypeSignature::GenericInstance { definition, args } = &identity.parameters()[0]
        else {
            panic!("Expected generic instance");
        };
        assert_eq!(definition.name(), "Dictionary");
        assert_eq!(args.len(), 2);
        assert!(matches!(&args[1], TypeSignature::GenericInstance { .. }));
    }

    #[test]
    fn test_array_and_byref_parameters() {
        let identity =
            parse_method("M:Acme.Widget.Fill(System.Int32[],System.Int32[0:,0:],System.String@)");

        assert_eq!(
            identity.parameters()[0],
            TypeSignature::Array {
                element: Box::new(TypeSignature::named("System", "Int32").unwrap()),
                rank: 1,
            }
        );
        assert_eq!(
            identity.parameters()[1],
            TypeSignature::Array {
                element: Box::new(TypeSignature::named("System", "Int32").unwrap()),
                rank: 2,
            }
        );
        assert_eq!(
            identity.parameters()[2],
            TypeSignature::ByRef(Box::new(TypeSignature::named("System", "String").unwrap()))
        );
    }

    #[test]
    fn test_multi_dimensional_array_inside_generic_instance() {
        let identity = parse_method(
            "M:Acme.Widget.Sum(System.Collections.Generic.List{System.Int32[0:,0:]})",
        );

        assert_eq!(identity.parameters().len(), 1);
        let TypeSignature::GenericInstance { args, .. } = &identity.parameters()[0] else {
            panic!("Expected generic instance parameter");
        };
        assert_eq!(
            args[0],
            TypeSignature::Array {
                element: Box::new(TypeSignature::named("System", "Int32").unwrap()),
                rank: 2,
            }
        );
    }

    #[test]
    fn test_indexer_id() {
        let DocRef::Member(MemberIdentity::Property(identity)) =
            parse("P:Acme.Widget.Item(System.Int32)").unwrap()
        else {
            panic!("Expected property reference");
        };

        assert!(identity.is_indexer());
        assert_eq!(identity.parameters().len(), 1);
    }

    #[test]
    fn test_field_and_event_ids() {
        assert!(matches!(
            parse("F:Acme.Widget.MaxSize").unwrap(),
            DocRef::Member(MemberIdentity::Field(_))
        ));
        assert!(matches!(
            parse("E:Acme.Widget.Clicked").unwrap(),
            DocRef::Member(MemberIdentity::Event(_))
        ));
    }

    #[test]
    fn test_field_with_parameter_list_rejected() {
        assert!(parse("F:Acme.Widget.MaxSize(System.Int32)").is_err());
    }

    #[test]
    fn test_malformed_ids_rejected() {
        assert!(parse("Acme.Widget").is_err());
        assert!(parse("X:Acme.Widget").is_err());
        assert!(parse("T:").is_err());
        assert!(parse("M:NoTypePath").is_err());
        assert!(parse("M:Acme.Widget.Load(System.String").is_err());
    }
}
