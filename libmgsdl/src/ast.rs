//
// ast.rs
// The MGSDL Compiler
//

//! Defines the raw, unresolved Abstract Syntax Tree of an MGSDL
//! document. Nodes borrow directly from the source text; type
//! tokens and reference names are left as strings, to be resolved
//! by `sdirgen`.

/// The complete, raw parse result of one MGSDL source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prog<'a> {
    /// Top-level declarations, in order of appearance.
    pub items: Vec<Item<'a>>,
}

/// A top-level source item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<'a> {
    /// An `enum` declaration.
    EnumDecl(EnumDecl<'a>),
    /// A `schema` (embeddable sub-schema) declaration.
    SchemaDecl(SchemaDecl<'a>),
    /// A `model` (persisted entity) declaration.
    ModelDecl(ModelDecl<'a>),
    /// An `external` (opaque type) declaration.
    ExternalDecl(ExternalDecl<'a>),
    /// A `union` (tagged union of models) declaration.
    UnionDecl(UnionDecl<'a>),
}

/// An enumeration: a name and an ordered list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl<'a> {
    /// The name of the enumeration.
    pub name: &'a str,
    /// The enumeration's values. Order is semantic: it becomes the
    /// declaration order of the generated enumeration.
    pub values: Vec<&'a str>,
}

/// An embeddable sub-schema: a name and a list of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDecl<'a> {
    /// The name of the schema.
    pub name: &'a str,
    /// The schema's fields, in order of appearance.
    pub fields: Vec<FieldDecl<'a>>,
}

/// A persisted entity model: a name and a list of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDecl<'a> {
    /// The name of the model.
    pub name: &'a str,
    /// The model's fields, in order of appearance.
    pub fields: Vec<FieldDecl<'a>>,
}

/// An opaque, externally-supplied type. Carries no structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalDecl<'a> {
    /// The name of the external type.
    pub name: &'a str,
}

/// A tagged union of previously-declared models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDecl<'a> {
    /// The name of the union.
    pub name: &'a str,
    /// The names of the member models, in declaration order.
    pub members: Vec<&'a str>,
}

/// One field line within a `schema` or `model` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl<'a> {
    /// The name of the field.
    pub name: &'a str,
    /// The field's declared type.
    pub ty: TyDecl<'a>,
    /// The field's directive flags.
    pub directives: Directives,
}

/// A raw field type annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TyDecl<'a> {
    /// The shape of the annotation.
    pub kind: TyKind<'a>,
    /// Whether the field carries the `!` (required) marker.
    pub required: bool,
}

/// The shape of a raw field type annotation. Container element
/// types are bare tokens: containers cannot nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TyKind<'a> {
    /// A bare type token, e.g. `String` or `Point`.
    Named(&'a str),
    /// An array type, `[Elem]`, with an independent
    /// element-required marker: `[Elem!]`.
    Array {
        /// The element type token.
        element: &'a str,
        /// Whether the element carries the `!` marker.
        element_required: bool,
    },
    /// A map type, `Map<Elem>`, with an independent
    /// element-required marker: `Map<Elem!>`.
    Map {
        /// The element type token.
        element: &'a str,
        /// Whether the element carries the `!` marker.
        element_required: bool,
    },
}

/// The set of recognized `@directive` annotations of one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directives {
    /// `@index`: the field is indexed.
    pub is_index: bool,
    /// `@unique`: the field value is unique across instances.
    pub is_unique: bool,
    /// `@immutable`: the field cannot change after creation.
    pub is_immutable: bool,
    /// `@virtual`: the field is computed, not persisted.
    pub is_virtual: bool,
    /// `@validate`: the field value passes through a caller-supplied validator.
    pub is_validatable: bool,
}

impl Directives {
    /// Builds the flag set from a list of directive name tokens.
    /// Unrecognized names are ignored; the parser rejects them
    /// before this is called.
    pub fn from_names(names: &[&str]) -> Self {
        Directives {
            is_index:       names.contains(&"index"),
            is_unique:      names.contains(&"unique"),
            is_immutable:   names.contains(&"immutable"),
            is_virtual:     names.contains(&"virtual"),
            is_validatable: names.contains(&"validate"),
        }
    }
}
