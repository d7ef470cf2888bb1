//
// sdir.rs
// The MGSDL Compiler
//

//! Defines SDIR, the Schema Definition Intermediate Representation.
//! SDIR is the typed, fully-resolved form of an MGSDL document: it
//! is built once per compilation by `sdirgen`, is immutable from
//! then on, and is the input of dependency sorting and of code
//! generation.

use std::collections::BTreeMap;


/// A bit of terminology:
///
/// * Simple types are everything a field can hold directly:
///   primitives (`String`, `Number`, `Boolean`, `Date`) and
///   by-name references (enums, object references, nested
///   schemas, externals).
/// * Container types wrap exactly one simple type: arrays and
///   maps. Containers cannot nest; this is encoded in the types
///   below rather than checked at runtime.
/// * Entity is the collective name for schemas (embeddable,
///   never independently persisted) and models (persisted, with
///   identity and timestamps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleType {
    /// UTF-8 string primitive.
    String,
    /// Numeric primitive.
    Number,
    /// Boolean primitive.
    Boolean,
    /// Point-in-time primitive.
    Date,
    /// A reference to a declared enumeration, by name.
    Enum(String),
    /// An object reference. The target list holds the models the
    /// reference may point to: empty means untyped, a single entry
    /// is unambiguous, and multiple entries require a caller-supplied
    /// discriminator at run time.
    ObjectId(Vec<String>),
    /// A reference to a declared embeddable schema, by name.
    Schema(String),
    /// A reference to a declared external type, by name. Externals
    /// are opaque and never persisted; they are only valid in
    /// virtual fields.
    External(String),
}

/// The resolved type of a field: either a simple type directly,
/// or a single level of container around one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// A simple type, stored inline.
    Simple(SimpleType),
    /// An ordered list of elements.
    Array {
        /// The element type.
        element: SimpleType,
        /// Whether each element must be present (non-null).
        element_required: bool,
    },
    /// A string-keyed map of elements.
    Map {
        /// The element type.
        element: SimpleType,
        /// Whether each element must be present (non-null).
        element_required: bool,
    },
}

impl DataType {
    /// Returns the simple type this field bottoms out in: the inline
    /// type, or the element type of a container.
    pub fn simple(&self) -> &SimpleType {
        match *self {
            DataType::Simple(ref ty)            => ty,
            DataType::Array { ref element, .. } => element,
            DataType::Map { ref element, .. }   => element,
        }
    }

    /// The name of the schema this type references, directly or
    /// through a container; `None` for every other kind of type.
    pub fn schema_ref(&self) -> Option<&str> {
        match *self.simple() {
            SimpleType::Schema(ref name) => Some(name),
            _                            => None,
        }
    }

    /// Whether this type references an external type, directly or
    /// through a container.
    pub fn uses_external(&self) -> bool {
        matches!(*self.simple(), SimpleType::External(_))
    }
}

/// One resolved field of a schema or model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// The resolved type of the field.
    pub data_type: DataType,
    /// Whether the field must be present.
    pub is_required: bool,
    /// Whether the field is indexed.
    pub is_index: bool,
    /// Whether the field value is unique across instances.
    pub is_unique: bool,
    /// Whether the field is read-only after creation.
    pub is_immutable: bool,
    /// Whether the field is computed at run time instead of persisted.
    pub is_virtual: bool,
    /// Whether the field value passes through a caller-supplied validator.
    pub is_validatable: bool,
}

impl FieldDef {
    /// Whether this field's object reference is ambiguous (more than
    /// one target model) and therefore needs a caller-supplied
    /// discriminator at run time.
    pub fn needs_discriminator(&self) -> bool {
        match *self.data_type.simple() {
            SimpleType::ObjectId(ref targets) => targets.len() > 1,
            _                                 => false,
        }
    }

    /// Whether this field needs any caller-supplied behavior at all:
    /// validation, virtual get/set, or discriminator resolution.
    pub fn needs_config(&self) -> bool {
        self.is_validatable || self.is_virtual || self.needs_discriminator()
    }
}

/// A resolved field map: field name → field definition.
pub type Schema = BTreeMap<String, FieldDef>;

/// A resolved enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    /// The enumeration's values, in declaration order.
    pub values: Vec<String>,
}

/// A resolved persisted model. Models get an identity plus
/// creation/update timestamps in the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDef {
    /// The model's field map.
    pub schema: Schema,
}

/// A resolved tagged union of models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDef {
    /// The names of the member models, in declaration order.
    pub models: Vec<String>,
}

/// Top-level container for the complete, resolved definition of one
/// MGSDL document. Built once per compilation and consumed entirely
/// by the code generator; there is no lifecycle beyond a single
/// `compile` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sdir {
    /// Declared enumerations, by name.
    pub enums: BTreeMap<String, EnumDef>,
    /// Declared embeddable schemas, by name.
    pub schemas: BTreeMap<String, Schema>,
    /// Declared persisted models, by name.
    pub models: BTreeMap<String, ModelDef>,
    /// Declared unions, by name.
    pub unions: BTreeMap<String, UnionDef>,
    /// Declared external type names, in declaration order.
    pub externals: Vec<String>,
}

impl Sdir {
    /// Creates an empty SDIR value.
    pub fn new() -> Self {
        Sdir::default()
    }
}
