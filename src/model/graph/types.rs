//! Type documentation node: nested types, member lists and insertion validation.
//!
//! [`TypeDoc`] is the central node of the documentation graph. Child lists are
//! append-only [`boxcar::Vec`] collections; parent links (assembly, namespace) are
//! weak handles so the graph's arena stays cycle-free. All insertion entry points
//! validate identity consistency **before** touching any list - a failed insertion
//! leaves the node unchanged.

use std::sync::{Arc, OnceLock};

use crate::{
    model::{
        content::ContentSlot,
        graph::{
            assembly::AssemblyDocRef,
            members::{
                EventDoc, EventDocList, EventDocRc, FieldDoc, FieldDocList, FieldDocRc,
                MethodDoc, MethodDocList, MethodDocRc, PropertyDoc, PropertyDocList,
                PropertyDocRc,
            },
            namespace::NamespaceDocRef,
        },
        identity::TypeIdentity,
    },
    Error, Result,
};

/// A reference-counted handle to a [`TypeDoc`]
pub type TypeDocRc = Arc<TypeDoc>;

/// A vector that holds [`TypeDocRc`] instances
pub type TypeDocList = Arc<boxcar::Vec<TypeDocRc>>;

/// The fundamental kind of a .NET type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A reference type declared with `class`
    Class,
    /// A value type declared with `struct`
    Struct,
    /// An `interface` declaration
    Interface,
    /// An `enum` declaration
    Enum,
    /// A `delegate` declaration
    Delegate,
}

bitflags::bitflags! {
    /// Attribute flags of a type as decoded from binary metadata.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeModifiers: u32 {
        /// Type is publicly visible
        const PUBLIC = 0x0001;
        /// Type is only visible within its assembly
        const INTERNAL = 0x0002;
        /// Type cannot be inherited from
        const SEALED = 0x0004;
        /// Type cannot be instantiated directly
        const ABSTRACT = 0x0008;
        /// Type is static (sealed + abstract in metadata terms)
        const STATIC = 0x0010;
    }
}

/// Structural details of a type as decoded from binary metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// The fundamental kind.
    pub kind: TypeKind,
    /// Names of the type's own generic parameters, in declaration order.
    pub generic_params: Vec<String>,
    /// The base type, when there is a meaningful one.
    pub base_type: Option<crate::model::identity::TypeSignature>,
    /// Implemented interfaces.
    pub interfaces: Vec<crate::model::identity::TypeSignature>,
    /// Attribute flags.
    pub modifiers: TypeModifiers,
}

/// Documentation node for one type.
///
/// Created through [`DocGraph`](crate::model::graph::DocGraph) entry points only,
/// which guarantee the identity is registered exactly once. Member insertion
/// validates that the member's defining type matches this node's identity, and
/// nested-type insertion validates the enclosing relationship - the graph never
/// holds an edge that contradicts the identities at its ends.
pub struct TypeDoc {
    /// The structural identity this node documents.
    pub identity: TypeIdentity,
    assembly: AssemblyDocRef,
    namespace: NamespaceDocRef,
    definition: OnceLock<TypeDef>,
    nested_types: TypeDocList,
    methods: MethodDocList,
    properties: PropertyDocList,
    fields: FieldDocList,
    events: EventDocList,
    /// Narrative content attached to the type itself.
    pub content: ContentSlot,
}

impl TypeDoc {
    pub(crate) fn new(
        identity: TypeIdentity,
        assembly: AssemblyDocRef,
        namespace: NamespaceDocRef,
    ) -> Self {
        TypeDoc {
            identity,
            assembly,
            namespace,
            definition: OnceLock::new(),
            nested_types: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            properties: Arc::new(boxcar::Vec::new()),
            fields: Arc::new(boxcar::Vec::new()),
            events: Arc::new(boxcar::Vec::new()),
            content: ContentSlot::new(),
        }
    }

    /// The assembly this type belongs to (if still alive).
    #[must_use]
    pub fn assembly(&self) -> Option<crate::model::graph::AssemblyDocRc> {
        self.assembly.upgrade()
    }

    /// The namespace this type belongs to (if still alive).
    #[must_use]
    pub fn namespace(&self) -> Option<crate::model::graph::NamespaceDocRc> {
        self.namespace.upgrade()
    }

    /// Binary-source structural details, when a binary source supplied them.
    #[must_use]
    pub fn definition(&self) -> Option<&TypeDef> {
        self.definition.get()
    }

    /// Attach binary-source details to this node. Write-once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if details were already attached.
    pub fn set_definition(&self, definition: TypeDef) -> Result<()> {
        self.definition.set(definition).map_err(|_| {
            Error::InconsistentModel(format!(
                "Type '{}' already has binary definition details",
                self.identity
            ))
        })
    }

    /// The nested types declared directly inside this type, in insertion order.
    #[must_use]
    pub fn nested_types(&self) -> &TypeDocList {
        &self.nested_types
    }

    /// The methods (including constructors and operators) of this type.
    #[must_use]
    pub fn methods(&self) -> &MethodDocList {
        &self.methods
    }

    /// The properties of this type.
    #[must_use]
    pub fn properties(&self) -> &PropertyDocList {
        &self.properties
    }

    /// The fields of this type.
    #[must_use]
    pub fn fields(&self) -> &FieldDocList {
        &self.fields
    }

    /// The events of this type.
    #[must_use]
    pub fn events(&self) -> &EventDocList {
        &self.events
    }

    /// The canonical display signature of `method`, rendered with this type's
    /// generic parameter names in scope when binary details supplied them.
    #[must_use]
    pub fn method_signature(&self, method: &MethodDoc) -> String {
        crate::model::format::method_signature_in(method, self.generic_param_names())
    }

    /// The canonical display signature of `property`, rendered with this type's
    /// generic parameter names in scope when binary details supplied them.
    #[must_use]
    pub fn property_signature(&self, property: &PropertyDoc) -> String {
        crate::model::format::property_signature_in(property, self.generic_param_names())
    }

    fn generic_param_names(&self) -> &[String] {
        self.definition
            .get()
            .map_or(&[], |definition| definition.generic_params.as_slice())
    }

    /// Insert a nested type node under this type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if `nested` has no declaring type in
    /// its identity, or if its declaring type is not this node's identity.
    pub fn add_nested_type(&self, nested: &TypeDocRc) -> Result<()> {
        let Some(declaring) = nested.identity.enclosing() else {
            return Err(Error::InconsistentModel(format!(
                "Cannot initialize nested type for type '{}' because it has no declaring type",
                nested.identity
            )));
        };

        if declaring != &self.identity {
            return Err(Error::InconsistentModel(format!(
                "Mismatch between id of type '{}' and id of declaring type '{}'",
                nested.identity, self.identity
            )));
        }

        self.nested_types.push(nested.clone());
        Ok(())
    }

    /// Insert a method node into this type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if the method's defining type is not
    /// this node's identity, or if an equal method identity is already present.
    pub fn add_method(&self, method: MethodDoc) -> Result<MethodDocRc> {
        self.check_defining_type(method.identity.defining_type())?;
        if self
            .methods
            .iter()
            .any(|(_, existing)| existing.identity == method.identity)
        {
            return Err(self.duplicate_member(method.identity.name()));
        }

        let method = Arc::new(method);
        self.methods.push(method.clone());
        Ok(method)
    }

    /// Insert a property node into this type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if the property's defining type is not
    /// this node's identity, or if an equal property identity is already present.
    pub fn add_property(&self, property: PropertyDoc) -> Result<PropertyDocRc> {
        self.check_defining_type(property.identity.defining_type())?;
        if self
            .properties
            .iter()
            .any(|(_, existing)| existing.identity == property.identity)
        {
            return Err(self.duplicate_member(property.identity.name()));
        }

        let property = Arc::new(property);
        self.properties.push(property.clone());
        Ok(property)
    }

    /// Insert a field node into this type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if the field's defining type is not
    /// this node's identity, or if an equal field identity is already present.
    pub fn add_field(&self, field: FieldDoc) -> Result<FieldDocRc> {
        self.check_defining_type(field.identity.defining_type())?;
        if self
            .fields
            .iter()
            .any(|(_, existing)| existing.identity == field.identity)
        {
            return Err(self.duplicate_member(field.identity.name()));
        }

        let field = Arc::new(field);
        self.fields.push(field.clone());
        Ok(field)
    }

    /// Insert an event node into this type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentModel`] if the event's defining type is not
    /// this node's identity, or if an equal event identity is already present.
    pub fn add_event(&self, event: EventDoc) -> Result<EventDocRc> {
        self.check_defining_type(event.identity.defining_type())?;
        if self
            .events
            .iter()
            .any(|(_, existing)| existing.identity == event.identity)
        {
            return Err(self.duplicate_member(event.identity.name()));
        }

        let event = Arc::new(event);
        self.events.push(event.clone());
        Ok(event)
    }

    pub(crate) fn parent_refs(&self) -> (AssemblyDocRef, NamespaceDocRef) {
        (self.assembly.clone(), self.namespace.clone())
    }

    fn check_defining_type(&self, defining: &TypeIdentity) -> Result<()> {
        if defining == &self.identity {
            Ok(())
        } else {
            Err(Error::InconsistentModel(format!(
                "Cannot add member with a declaring type of '{}' to type '{}'",
                defining, self.identity
            )))
        }
    }

    fn duplicate_member(&self, name: &str) -> Error {
        Error::InconsistentModel(format!(
            "Member '{}' already exists in type '{}'",
            name, self.identity
        ))
    }
}

impl std::fmt::Debug for TypeDoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDoc")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
