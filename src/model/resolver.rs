//! Reference resolution over a completed documentation graph.
//!
//! A [`DocRef`] is a parsed cross-reference (from an XML documentation file or an
//! inline `cref`); [`Resolver`] maps it to the graph node it denotes, by exact
//! structural identity only. There is no fuzzy matching: a reference written
//! against a different overload, arity or parameter list simply does not resolve.
//! Unresolved references are a normal condition (stale docs, references into
//! assemblies outside the documented set) and are reported, never raised as
//! errors.
//!
//! # Examples
//!
//! ```rust
//! use dotdocs::model::{
//!     graph::DocGraph,
//!     identity::TypeIdentity,
//!     resolver::{DocRef, Resolver},
//! };
//!
//! let graph = DocGraph::new();
//! graph.add_assembly("Acme.Widgets", None)?;
//! graph.add_type("Acme.Widgets", TypeIdentity::new("Acme", "Widget")?)?;
//!
//! let resolver = Resolver::new(&graph);
//! let node = resolver.resolve(&DocRef::Type(TypeIdentity::new("Acme", "Widget")?));
//! assert!(node.is_some());
//! # Ok::<(), dotdocs::Error>(())
//! ```

use rayon::prelude::*;

use crate::model::{
    content::DocContent,
    graph::{
        DocGraph, EventDocRc, FieldDocRc, MethodDocRc, NamespaceDocRc, PropertyDocRc,
        TypeDocRc,
    },
    identity::{MemberIdentity, TypeIdentity, TypeSignature},
};

/// A parsed cross-reference into the documentation model.
#[derive(Debug, Clone, PartialEq)]
pub enum DocRef {
    /// A namespace reference (`N:` form).
    Namespace(String),
    /// A type reference.
    Type(TypeIdentity),
    /// A member reference.
    Member(MemberIdentity),
}

impl std::fmt::Display for DocRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocRef::Namespace(path) => write!(f, "N:{path}"),
            DocRef::Type(identity) => write!(f, "T:{identity}"),
            DocRef::Member(identity) => {
                write!(f, "{}:{}.{}", match identity {
                    MemberIdentity::Method(_) => 'M',
                    MemberIdentity::Property(_) => 'P',
                    MemberIdentity::Field(_) => 'F',
                    MemberIdentity::Event(_) => 'E',
                }, identity.defining_type(), identity.name())?;

                // Overloadable members reproduce their full ID form so that
                // unresolved-reference reports stay unambiguous.
                match identity {
                    MemberIdentity::Method(method) => {
                        if method.arity() > 0 {
                            write!(f, "``{}", method.arity())?;
                        }
                        write_id_parameters(f, method.parameters())?;
                        if let Some(return_type) = method.return_type() {
                            write!(f, "~{}", signature_id_text(return_type))?;
                        }
                        Ok(())
                    }
                    MemberIdentity::Property(property) => {
                        write_id_parameters(f, property.parameters())
                    }
                    _ => Ok(()),
                }
            }
        }
    }
}

fn write_id_parameters(
    f: &mut std::fmt::Formatter<'_>,
    parameters: &[TypeSignature],
) -> std::fmt::Result {
    if parameters.is_empty() {
        return Ok(());
    }

    f.write_str("(")?;
    for (index, parameter) in parameters.iter().enumerate() {
        if index > 0 {
            f.write_str(",")?;
        }
        f.write_str(&signature_id_text(parameter))?;
    }
    f.write_str(")")
}

/// The documentation-ID spelling of a type in parameter or return position.
fn signature_id_text(signature: &TypeSignature) -> String {
    match signature {
        TypeSignature::Named(identity) => {
            let mut text = identity.full_name();
            if identity.arity() > 0 {
                text.push('`');
                text.push_str(&identity.arity().to_string());
            }
            text
        }
        TypeSignature::GenericInstance { definition, args } => {
            let mut text = definition.full_name();
            text.push('{');
            for (index, arg) in args.iter().enumerate() {
                if index > 0 {
                    text.push(',');
                }
                text.push_str(&signature_id_text(arg));
            }
            text.push('}');
            text
        }
        TypeSignature::TypeVar(index) => format!("`{index}"),
        TypeSignature::MethodVar(index) => format!("``{index}"),
        TypeSignature::Array { element, rank } => {
            let mut text = signature_id_text(element);
            text.push('[');
            for _ in 1..*rank {
                text.push(',');
            }
            text.push(']');
            text
        }
        TypeSignature::ByRef(element) => {
            let mut text = signature_id_text(element);
            text.push('@');
            text
        }
    }
}

/// A resolved documentation node.
#[derive(Debug, Clone)]
pub enum DocNode {
    /// A namespace node.
    Namespace(NamespaceDocRc),
    /// A type node.
    Type(TypeDocRc),
    /// A method node.
    Method(MethodDocRc),
    /// A property node.
    Property(PropertyDocRc),
    /// A field node.
    Field(FieldDocRc),
    /// An event node.
    Event(EventDocRc),
}

/// Outcome of a batch content-attachment pass.
///
/// Misses are warnings, not failures: the report carries the display form of
/// every reference that did not resolve so the caller can surface them.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    /// Number of entries that resolved and had their content attached.
    pub resolved: usize,
    /// Display forms of the references that did not resolve.
    pub unresolved: Vec<String>,
}

impl ResolutionReport {
    /// Whether every entry resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolves [`DocRef`] values against a completed [`DocGraph`].
pub struct Resolver<'a> {
    graph: &'a DocGraph,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `graph`.
    #[must_use]
    pub fn new(graph: &'a DocGraph) -> Self {
        Resolver { graph }
    }

    /// Resolve a reference to its node. `None` means the reference does not
    /// denote anything in this graph - not an error.
    ///
    /// Member lookup scans the resolved type's member lists with identity
    /// equality. The conditional return-type rule of
    /// [`MethodIdentity`](crate::model::identity::MethodIdentity) applies, so a
    /// reference carrying a return type (a conversion-operator disambiguation)
    /// matches only the overload with that return type, while a reference
    /// without one matches on name, arity and parameters alone.
    #[must_use]
    pub fn resolve(&self, reference: &DocRef) -> Option<DocNode> {
        match reference {
            DocRef::Namespace(path) => {
                self.graph.namespace(path).map(DocNode::Namespace)
            }
            DocRef::Type(identity) => self.lookup_type(identity).map(DocNode::Type),
            DocRef::Member(identity) => {
                let type_doc = self.lookup_type(identity.defining_type())?;
                if type_doc.identity == *identity.defining_type() {
                    self.resolve_member(&type_doc, identity)
                } else {
                    let rebased = identity.with_defining_type(type_doc.identity.clone());
                    self.resolve_member(&type_doc, &rebased)
                }
            }
        }
    }

    /// Look up a type, compensating for the textual encoding's ambiguity.
    ///
    /// Documentation ID strings cannot distinguish a namespace segment from a
    /// non-generic enclosing type, so `Acme.Widget.Builder` parses as type
    /// `Builder` in namespace `Acme.Widget`. On a direct miss, trailing
    /// namespace segments are reinterpreted as enclosing types, one at a time,
    /// until an exact structural match is found.
    fn lookup_type(&self, identity: &TypeIdentity) -> Option<TypeDocRc> {
        if let Some(found) = self.graph.get_type(identity) {
            return Some(found);
        }
        if identity.is_nested() {
            return None;
        }

        let segments: Vec<&str> = identity.namespace_segments().collect();
        for split in (0..segments.len()).rev() {
            let namespace = segments[..split].join(".");
            let mut chain = TypeIdentity::generic(namespace, segments[split], 0).ok()?;
            for segment in &segments[split + 1..] {
                chain = TypeIdentity::nested(chain, *segment).ok()?;
            }
            let candidate =
                TypeIdentity::nested_generic(chain, identity.name(), identity.arity()).ok()?;
            if let Some(found) = self.graph.get_type(&candidate) {
                return Some(found);
            }
        }
        None
    }

    fn resolve_member(
        &self,
        type_doc: &TypeDocRc,
        identity: &MemberIdentity,
    ) -> Option<DocNode> {
        match identity {
            MemberIdentity::Method(method) => type_doc
                .methods()
                .iter()
                .find(|(_, existing)| &existing.identity == method)
                .map(|(_, existing)| DocNode::Method(existing.clone())),
            MemberIdentity::Property(property) => type_doc
                .properties()
                .iter()
                .find(|(_, existing)| &existing.identity == property)
                .map(|(_, existing)| DocNode::Property(existing.clone())),
            MemberIdentity::Field(field) => type_doc
                .fields()
                .iter()
                .find(|(_, existing)| &existing.identity == field)
                .map(|(_, existing)| DocNode::Field(existing.clone())),
            MemberIdentity::Event(event) => type_doc
                .events()
                .iter()
                .find(|(_, existing)| &existing.identity == event)
                .map(|(_, existing)| DocNode::Event(existing.clone())),
        }
    }

    /// Resolve a batch of `(reference, content)` entries in parallel and attach
    /// each content tree to its node.
    ///
    /// Attachment replaces any previously attached content wholesale. Entries
    /// that do not resolve are collected into the report's `unresolved` list.
    #[must_use]
    pub fn attach_all(&self, entries: Vec<(DocRef, DocContent)>) -> ResolutionReport {
        let total = entries.len();
        let unresolved: Vec<String> = entries
            .into_par_iter()
            .filter_map(|(reference, content)| {
                match self.resolve(&reference) {
                    Some(node) => {
                        attach(&node, content);
                        None
                    }
                    None => Some(reference.to_string()),
                }
            })
            .collect();

        ResolutionReport {
            resolved: total - unresolved.len(),
            unresolved,
        }
    }
}

fn attach(node: &DocNode, content: DocContent) {
    match node {
        DocNode::Namespace(namespace) => namespace.content.attach(content),
        DocNode::Type(type_doc) => type_doc.content.attach(content),
        DocNode::Method(method) => method.content.attach(content),
        DocNode::Property(property) => property.content.attach(content),
        DocNode::Field(field) => field.content.attach(content),
        DocNode::Event(event) => event.content.attach(content),
    }
}
