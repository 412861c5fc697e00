//! Assembly-level documentation node.

use std::sync::{Arc, Weak};

use crate::{
    model::{
        content::ContentSlot,
        graph::namespace::{NamespaceDocList, NamespaceDocRc},
    },
    Result,
};

/// A reference-counted handle to an [`AssemblyDoc`]
pub type AssemblyDocRc = Arc<AssemblyDoc>;

/// The root documentation node for one assembly.
///
/// An assembly owns strong handles to the namespaces it contributes types to.
/// Namespaces are shared between assemblies; the graph deduplicates them by dot
/// path, so the same [`NamespaceDoc`](crate::model::graph::NamespaceDoc) instance
/// may be listed by several assemblies.
pub struct AssemblyDoc {
    name: String,
    version: Option<String>,
    namespaces: NamespaceDocList,
    /// Narrative content attached to the assembly itself.
    pub content: ContentSlot,
}

impl AssemblyDoc {
    /// Create a new assembly node.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if `name` is empty.
    pub fn new(name: impl Into<String>, version: Option<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name must not be empty"));
        }

        Ok(AssemblyDoc {
            name,
            version,
            namespaces: Arc::new(boxcar::Vec::new()),
            content: ContentSlot::new(),
        })
    }

    /// The simple assembly name, e.g. `Acme.Widgets`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The assembly version string, when the source knew one.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The namespaces this assembly contributes types to, in insertion order.
    #[must_use]
    pub fn namespaces(&self) -> &NamespaceDocList {
        &self.namespaces
    }

    /// Record that this assembly contributes to `namespace`. Idempotent.
    pub(crate) fn link_namespace(&self, namespace: &NamespaceDocRc) {
        let already_linked = self
            .namespaces
            .iter()
            .any(|(_, existing)| Arc::ptr_eq(existing, namespace));
        if !already_linked {
            self.namespaces.push(namespace.clone());
        }
    }
}

impl std::fmt::Debug for AssemblyDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssemblyDoc")
            .field("name", &self.name)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// A weak handle to an [`AssemblyDoc`], used for child-to-parent links.
#[derive(Clone, Debug)]
pub struct AssemblyDocRef {
    weak_ref: Weak<AssemblyDoc>,
}

impl AssemblyDocRef {
    /// Create a new `AssemblyDocRef` from a strong reference
    pub fn new(strong_ref: &AssemblyDocRc) -> Self {
        AssemblyDocRef {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Try to upgrade to a strong reference (if still alive)
    #[must_use]
    pub fn upgrade(&self) -> Option<AssemblyDocRc> {
        self.weak_ref.upgrade()
    }

    /// Get the name of the referenced assembly (if still alive)
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|assembly| assembly.name.clone())
    }
}

impl From<AssemblyDocRc> for AssemblyDocRef {
    fn from(strong_ref: AssemblyDocRc) -> Self {
        Self::new(&strong_ref)
    }
}
