//! Documentation graph: node arena, ingestion entry points and query API.
//!
//! [`DocGraph`] owns every node of the model. Assemblies and namespaces live in
//! ordered [`SkipMap`]s for deterministic traversal; a [`DashMap`] keyed by
//! [`TypeIdentity`] gives O(1) type lookup for the resolver. Child nodes hold
//! weak handles back to their parents, so ownership is a strict tree rooted in
//! the graph.
//!
//! All ingestion entry points fail fast with [`Error::InconsistentModel`] when an
//! insertion would contradict the identities involved - an unknown assembly, a
//! duplicate identity, a namespace that does not match the type's, a nested type
//! added at namespace level. A failed insertion never leaves a partial edge
//! behind.
//!
//! # Examples
//!
//! ```rust
//! use dotdocs::model::{graph::DocGraph, identity::TypeIdentity};
//!
//! let graph = DocGraph::new();
//! graph.add_assembly("Acme.Widgets", Some("1.0.0".to_string()))?;
//!
//! let widget = graph.add_type("Acme.Widgets", TypeIdentity::new("Acme", "Widget")?)?;
//! assert_eq!(widget.namespace().unwrap().path(), "Acme");
//! # Ok::<(), dotdocs::Error>(())
//! ```

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use dashmap::{mapref::entry::Entry, DashMap};

use crate::{model::identity::TypeIdentity, Error, Result};

pub use assembly::{AssemblyDoc, AssemblyDocRc, AssemblyDocRef};
pub use members::{
    EventDef, EventDoc, EventDocList, EventDocRc, FieldDef, FieldDoc, FieldDocList,
    FieldDocRc, MemberModifiers, MethodDef, MethodDoc, MethodDocList, MethodDocRc,
    ParameterDef, PropertyDef, PropertyDoc, PropertyDocList, PropertyDocRc,
};
pub use namespace::{NamespaceDoc, NamespaceDocList, NamespaceDocRc, NamespaceDocRef};
pub use types::{TypeDef, TypeDoc, TypeDocList, TypeDocRc, TypeKind, TypeModifiers};

mod assembly;
mod members;
mod namespace;
mod types;

/// The documentation model for a set of assemblies.
///
/// Construction is single-threaded; the storage types are nevertheless
/// `Send + Sync`, so a completed graph can be queried from many threads.
pub struct DocGraph {
    assemblies: SkipMap<String, AssemblyDocRc>,
    namespaces: SkipMap<String, NamespaceDocRc>,
    types: DashMap<TypeIdentity, TypeDocRc>,
}

impl DocGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        DocGraph {
            assemblies: SkipMap::new(),
            namespaces: SkipMap::new(),
            types: DashMap::new(),
        }
    }

    /// Register an assembly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if an assembly with that name is
    /// already registered, or [`Error::Malformed`] for an empty name.
    pub fn add_assembly(
        &self,
        name: &str,
        version: Option<String>,
    ) -> Result<AssemblyDocRc> {
        if self.assemblies.contains_key(name) {
            return Err(Error::InconsistentModel(format!(
                "Assembly '{name}' already exists"
            )));
        }

        let assembly = Arc::new(AssemblyDoc::new(name, version)?);
        self.assemblies.insert(name.to_string(), assembly.clone());
        Ok(assembly)
    }

    /// Look up an assembly by name.
    #[must_use]
    pub fn assembly(&self, name: &str) -> Option<AssemblyDocRc> {
        self.assemblies.get(name).map(|entry| entry.value().clone())
    }

    /// All registered assemblies, ordered by name.
    #[must_use]
    pub fn assemblies(&self) -> Vec<AssemblyDocRc> {
        self.assemblies
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Get the namespace node for `path`, creating it (and any missing ancestor
    /// namespaces) on first use. Idempotent; the same path always yields the
    /// same node.
    pub fn get_or_add_namespace(&self, path: &str) -> NamespaceDocRc {
        if !path.is_empty() {
            if let Some((parent, _)) = path.rsplit_once('.') {
                self.get_or_add_namespace(parent);
            }
        }

        self.namespaces
            .get_or_insert_with(path.to_string(), || Arc::new(NamespaceDoc::new(path)))
            .value()
            .clone()
    }

    /// Look up a namespace by dot path.
    #[must_use]
    pub fn namespace(&self, path: &str) -> Option<NamespaceDocRc> {
        self.namespaces.get(path).map(|entry| entry.value().clone())
    }

    /// All namespaces, ordered by dot path.
    #[must_use]
    pub fn namespaces(&self) -> Vec<NamespaceDocRc> {
        self.namespaces
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Register a namespace-level type in `assembly_name`, deriving and creating
    /// its namespace from the identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if the assembly is unknown, the
    /// identity is nested (nested types go through [`Self::add_nested_type`]),
    /// or the identity is already registered.
    pub fn add_type(&self, assembly_name: &str, identity: TypeIdentity) -> Result<TypeDocRc> {
        let namespace = self.get_or_add_namespace(identity.namespace());
        self.add_type_to_namespace(assembly_name, &namespace, identity)
    }

    /// Register a namespace-level type in an explicitly provided namespace node.
    ///
    /// Lower-level entry point behind [`Self::add_type`]; the namespace's path
    /// must equal the identity's namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] on an unknown assembly, a nested
    /// identity, a namespace mismatch, or a duplicate identity.
    pub fn add_type_to_namespace(
        &self,
        assembly_name: &str,
        namespace: &NamespaceDocRc,
        identity: TypeIdentity,
    ) -> Result<TypeDocRc> {
        let Some(assembly) = self.assembly(assembly_name) else {
            return Err(Error::InconsistentModel(format!(
                "Cannot add type '{identity}' to unknown assembly '{assembly_name}'"
            )));
        };

        if let Some(declaring) = identity.enclosing() {
            return Err(Error::InconsistentModel(format!(
                "Cannot add type '{identity}' at namespace level because it is nested in type '{declaring}'"
            )));
        }

        if namespace.path() != identity.namespace() {
            return Err(Error::InconsistentModel(format!(
                "Mismatch between namespace of type '{}' and id of parent namespace '{}'",
                identity,
                namespace.path()
            )));
        }

        let type_doc = Arc::new(TypeDoc::new(
            identity,
            AssemblyDocRef::new(&assembly),
            NamespaceDocRef::new(namespace),
        ));
        self.register_type(&type_doc)?;

        namespace.link_type(&type_doc);
        assembly.link_namespace(namespace);
        Ok(type_doc)
    }

    /// Register a type nested inside `declaring`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if the identity is not nested
    /// directly under `declaring`'s identity, or if it is already registered.
    pub fn add_nested_type(
        &self,
        declaring: &TypeDocRc,
        identity: TypeIdentity,
    ) -> Result<TypeDocRc> {
        if self.types.contains_key(&identity) {
            return Err(Error::InconsistentModel(format!(
                "Type '{identity}' already exists"
            )));
        }

        let (assembly, namespace) = declaring.parent_refs();
        let type_doc = Arc::new(TypeDoc::new(identity, assembly, namespace));

        declaring.add_nested_type(&type_doc)?;
        self.register_type(&type_doc)?;
        Ok(type_doc)
    }

    fn register_type(&self, type_doc: &TypeDocRc) -> Result<()> {
        match self.types.entry(type_doc.identity.clone()) {
            Entry::Occupied(_) => Err(Error::InconsistentModel(format!(
                "Type '{}' already exists",
                type_doc.identity
            ))),
            Entry::Vacant(entry) => {
                entry.insert(type_doc.clone());
                Ok(())
            }
        }
    }

    /// Look up a type node by structural identity.
    #[must_use]
    pub fn get_type(&self, identity: &TypeIdentity) -> Option<TypeDocRc> {
        self.types.get(identity).map(|entry| entry.value().clone())
    }

    /// All registered types, nested included, in unspecified order.
    #[must_use]
    pub fn types(&self) -> Vec<TypeDocRc> {
        self.types.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of registered types, nested included.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for DocGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocGraph")
            .field("assemblies", &self.assemblies.len())
            .field("namespaces", &self.namespaces.len())
            .field("types", &self.types.len())
            .finish()
    }
}
