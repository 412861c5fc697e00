//! Namespace documentation node and its weak handle.

use std::sync::{Arc, Weak};

use crate::model::{
    content::ContentSlot,
    graph::types::{TypeDocList, TypeDocRc},
};

/// A reference-counted handle to a [`NamespaceDoc`]
pub type NamespaceDocRc = Arc<NamespaceDoc>;

/// A vector that holds [`NamespaceDocRc`] instances
pub type NamespaceDocList = Arc<boxcar::Vec<NamespaceDocRc>>;

/// Documentation node for one namespace, unique per dot path.
///
/// Namespaces are shared: types from several assemblies may land in the same
/// namespace node. The empty path is the global namespace.
pub struct NamespaceDoc {
    path: String,
    types: TypeDocList,
    /// Narrative content attached to the namespace.
    pub content: ContentSlot,
}

impl NamespaceDoc {
    /// Create a new namespace node for the given dot path (empty = global).
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        NamespaceDoc {
            path: path.into(),
            types: Arc::new(boxcar::Vec::new()),
            content: ContentSlot::new(),
        }
    }

    /// The full dot path, e.g. `Acme.Widgets.Internal`. Empty for the global
    /// namespace.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The last path segment, e.g. `Internal`, or the empty string for the
    /// global namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or("")
    }

    /// The dot path of the parent namespace, or `None` for top-level and
    /// global namespaces.
    #[must_use]
    pub fn parent_path(&self) -> Option<&str> {
        let (parent, _) = self.path.rsplit_once('.')?;
        Some(parent)
    }

    /// Whether this is the global (empty-path) namespace.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.path.is_empty()
    }

    /// The non-nested types declared directly in this namespace, in insertion
    /// order.
    #[must_use]
    pub fn types(&self) -> &TypeDocList {
        &self.types
    }

    pub(crate) fn link_type(&self, type_doc: &TypeDocRc) {
        self.types.push(type_doc.clone());
    }
}

impl std::fmt::Debug for NamespaceDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceDoc")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// A weak handle to a [`NamespaceDoc`], used for child-to-parent links.
#[derive(Clone, Debug)]
pub struct NamespaceDocRef {
    weak_ref: Weak<NamespaceDoc>,
}

impl NamespaceDocRef {
    /// Create a new `NamespaceDocRef` from a strong reference
    pub fn new(strong_ref: &NamespaceDocRc) -> Self {
        NamespaceDocRef {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Try to upgrade to a strong reference (if still alive)
    #[must_use]
    pub fn upgrade(&self) -> Option<NamespaceDocRc> {
        self.weak_ref.upgrade()
    }

    /// Get the dot path of the referenced namespace (if still alive)
    #[must_use]
    pub fn path(&self) -> Option<String> {
        self.upgrade().map(|namespace| namespace.path.clone())
    }
}

impl From<NamespaceDocRc> for NamespaceDocRef {
    fn from(strong_ref: NamespaceDocRc) -> Self {
        Self::new(&strong_ref)
    }
}
