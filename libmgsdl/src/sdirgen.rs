//
// sdirgen.rs
// The MGSDL Compiler
//

//! This module takes the raw AST and typechecks it: every top-level
//! name is registered and checked for uniqueness across all
//! declaration kinds, union memberships are verified against the
//! declared models, and every field's type token is resolved to a
//! `DataType` against the full set of declared names. The result is
//! SDIR, ready for dependency sorting and code generation.

use std::collections::BTreeSet;
use crate::ast::*;
use crate::error::{ Error, Result };
use crate::sdir::*;


/// Given the raw declarations of an MGSDL document, resolves them
/// into SDIR.
///
/// # Arguments
///
/// * `prog`: the parsed declarations.
///
/// # Return value
///
/// * `Ok(Sdir)` if the program was semantically valid.
/// * `Err(_)` on the first duplicate name, unknown union member,
///   unresolvable type token, or non-virtual external field.
pub fn generate_sdir(prog: &Prog) -> Result<Sdir> {
    SdirGen::new().generate(prog)
}

/// The declared names of one document, bucketed by declaration kind.
/// Resolution consults these sets in a fixed order.
#[derive(Debug, Default)]
struct NamedTypes {
    enums:     BTreeSet<String>,
    schemas:   BTreeSet<String>,
    models:    BTreeSet<String>,
    externals: BTreeSet<String>,
    unions:    BTreeSet<String>,
}

#[derive(Debug)]
struct SdirGen {
    sdir:  Sdir,
    names: NamedTypes,
}

impl SdirGen {
    fn new() -> SdirGen {
        SdirGen {
            sdir:  Sdir::new(),
            names: NamedTypes::default(),
        }
    }

    fn generate(mut self, prog: &Prog) -> Result<Sdir> {
        self.declare_names(prog)?;
        self.define_unions(prog)?;
        self.define_enums(prog)?;
        self.define_schemas(prog)?;
        self.define_models(prog)?;

        Ok(self.sdir)
    }

    // Register every top-level name before resolving anything.
    // Names share a single namespace: a collision between any two
    // declaration kinds is an error.
    fn declare_names(&mut self, prog: &Prog) -> Result<()> {
        let mut all_names = BTreeSet::new();

        for item in &prog.items {
            let (name, bucket) = match *item {
                Item::EnumDecl(ref decl)     => (decl.name, &mut self.names.enums),
                Item::SchemaDecl(ref decl)   => (decl.name, &mut self.names.schemas),
                Item::ModelDecl(ref decl)    => (decl.name, &mut self.names.models),
                Item::ExternalDecl(ref decl) => (decl.name, &mut self.names.externals),
                Item::UnionDecl(ref decl)    => (decl.name, &mut self.names.unions),
            };

            if !all_names.insert(name) {
                return Err(Error::DuplicateName { name: name.to_owned() });
            }

            bucket.insert(name.to_owned());

            if let Item::ExternalDecl(ref decl) = *item {
                self.sdir.externals.push(decl.name.to_owned());
            }
        }

        Ok(())
    }

    fn define_unions(&mut self, prog: &Prog) -> Result<()> {
        for item in &prog.items {
            let decl = match *item {
                Item::UnionDecl(ref decl) => decl,
                _ => continue,
            };

            let unknown: Vec<String> = decl.members.iter()
                .filter(|member| !self.names.models.contains(**member))
                .map(|member| (*member).to_owned())
                .collect();

            if !unknown.is_empty() {
                return Err(Error::UnknownUnionMember {
                    union:  decl.name.to_owned(),
                    models: unknown,
                });
            }

            self.sdir.unions.insert(
                decl.name.to_owned(),
                UnionDef {
                    models: decl.members.iter().map(|member| (*member).to_owned()).collect(),
                },
            );
        }

        Ok(())
    }

    fn define_enums(&mut self, prog: &Prog) -> Result<()> {
        for item in &prog.items {
            let decl = match *item {
                Item::EnumDecl(ref decl) => decl,
                _ => continue,
            };

            self.sdir.enums.insert(
                decl.name.to_owned(),
                EnumDef {
                    values: decl.values.iter().map(|value| (*value).to_owned()).collect(),
                },
            );
        }

        Ok(())
    }

    fn define_schemas(&mut self, prog: &Prog) -> Result<()> {
        for item in &prog.items {
            let decl = match *item {
                Item::SchemaDecl(ref decl) => decl,
                _ => continue,
            };

            let schema = self.resolve_fields(&decl.fields)?;
            self.sdir.schemas.insert(decl.name.to_owned(), schema);
        }

        Ok(())
    }

    fn define_models(&mut self, prog: &Prog) -> Result<()> {
        for item in &prog.items {
            let decl = match *item {
                Item::ModelDecl(ref decl) => decl,
                _ => continue,
            };

            let schema = self.resolve_fields(&decl.fields)?;
            self.sdir.models.insert(decl.name.to_owned(), ModelDef { schema });
        }

        Ok(())
    }

    fn resolve_fields(&self, fields: &[FieldDecl]) -> Result<Schema> {
        let mut schema = Schema::new();

        for field in fields {
            let def = self.resolve_field(field)?;

            if schema.insert(field.name.to_owned(), def).is_some() {
                return Err(Error::DuplicateField { field: field.name.to_owned() });
            }
        }

        Ok(schema)
    }

    fn resolve_field(&self, field: &FieldDecl) -> Result<FieldDef> {
        let data_type = match field.ty.kind {
            TyKind::Named(token) => {
                DataType::Simple(self.resolve_simple_type(field.name, token)?)
            },
            TyKind::Array { element, element_required } => DataType::Array {
                element: self.resolve_simple_type(field.name, element)?,
                element_required,
            },
            TyKind::Map { element, element_required } => DataType::Map {
                element: self.resolve_simple_type(field.name, element)?,
                element_required,
            },
        };

        // Externals are opaque and never persisted.
        if data_type.uses_external() && !field.directives.is_virtual {
            return Err(Error::ExternalInPersistedField { field: field.name.to_owned() });
        }

        Ok(FieldDef {
            data_type,
            is_required:    field.ty.required,
            is_index:       field.directives.is_index,
            is_unique:      field.directives.is_unique,
            is_immutable:   field.directives.is_immutable,
            is_virtual:     field.directives.is_virtual,
            is_validatable: field.directives.is_validatable,
        })
    }

    // Resolution order is a contract, not an accident: primitives win
    // over user-defined names, and the literal `ObjectId` token wins
    // over external/model/union/schema names. First match decides.
    fn resolve_simple_type(&self, field: &str, token: &str) -> Result<SimpleType> {
        match token {
            "String"  => return Ok(SimpleType::String),
            "Number"  => return Ok(SimpleType::Number),
            "Boolean" => return Ok(SimpleType::Boolean),
            "Date"    => return Ok(SimpleType::Date),
            _ => {},
        }

        if self.names.enums.contains(token) {
            return Ok(SimpleType::Enum(token.to_owned()));
        }

        if token == "ObjectId" {
            return Ok(SimpleType::ObjectId(Vec::new()));
        }

        if self.names.externals.contains(token) {
            return Ok(SimpleType::External(token.to_owned()));
        }

        if self.names.models.contains(token) {
            return Ok(SimpleType::ObjectId(vec![token.to_owned()]));
        }

        if let Some(union) = self.sdir.unions.get(token) {
            return Ok(SimpleType::ObjectId(union.models.clone()));
        }

        if self.names.schemas.contains(token) {
            return Ok(SimpleType::Schema(token.to_owned()));
        }

        Err(Error::UnknownType {
            field:     field.to_owned(),
            type_name: token.to_owned(),
        })
    }
}
