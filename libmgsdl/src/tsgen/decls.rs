//
// tsgen/decls.rs
// The MGSDL Compiler
//

//! Declaration emitters: enumerations, per-entity document
//! interfaces, and the generated configuration interface that
//! describes every caller-supplied hook.

use crate::sdir::*;
use crate::tsgen::schema_type_name;


pub(crate) fn enum_decl(name: &str, def: &EnumDef) -> String {
    let mut lines = vec![format!("export enum {} {{", name)];

    for value in &def.values {
        lines.push(format!("{} = '{}',", value, value));
    }

    lines.push("}".to_owned());
    lines.join("\n")
}

// Document interface of one entity. Every entity gets an identity
// field; persisted models additionally get the timestamp pair and
// extend mongoose's Document.
pub(crate) fn interface(type_name: &str, schema: &Schema, persisted: bool) -> String {
    let mut lines = Vec::new();

    if persisted {
        lines.push(format!("export interface {} extends Document {{", type_name));
    } else {
        lines.push(format!("export interface {} {{", type_name));
    }

    lines.push("id: string;".to_owned());

    if persisted {
        lines.push("createdAt: Date;".to_owned());
        lines.push("updatedAt: Date;".to_owned());
    }

    for (name, field) in schema {
        let prefix = if field.is_immutable { "readonly " } else { "" };
        let suffix = if field.is_required { "" } else { " | null | undefined" };
        lines.push(format!("{}{}: {}{};", prefix, name, type_name_of(&field.data_type), suffix));
    }

    lines.push("}".to_owned());
    lines.join("\n")
}

// The configuration interface consumed by the generated factory.
// Every entity appears; fields that need no caller-supplied behavior
// are omitted, and an entity with no such fields is fully optional.
pub(crate) fn config_interface(sdir: &Sdir) -> String {
    let mut lines = vec!["export interface DbConfig {".to_owned()];

    let schemas = sdir.schemas.iter().map(|(name, schema)| (name, schema));
    let models = sdir.models.iter().map(|(name, model)| (name, &model.schema));

    for (name, schema) in schemas.chain(models) {
        lines.extend(config_entity(name, schema));
    }

    lines.push("}".to_owned());
    lines.join("\n")
}

fn config_entity(name: &str, schema: &Schema) -> Vec<String> {
    let needy: Vec<_> = schema.iter()
        .filter(|&(_, field)| field.needs_config())
        .collect();

    if needy.is_empty() {
        return vec![format!("{}?: {{}};", name)];
    }

    let mut lines = vec![format!("{}: {{", name)];

    for (field_name, field) in needy {
        lines.push(format!("{}: {{", field_name));

        if field.is_validatable {
            lines.push("validate: (value: unknown) => boolean;".to_owned());
        }

        if field.is_virtual {
            lines.push("get?: () => unknown;".to_owned());
            lines.push("set?: (value: unknown) => void;".to_owned());
        }

        if field.needs_discriminator() {
            lines.push("resolveRef: () => string;".to_owned());
        }

        lines.push("};".to_owned());
    }

    lines.push("};".to_owned());
    lines
}

fn type_name_of(data_type: &DataType) -> String {
    match *data_type {
        DataType::Simple(ref ty) => simple_type_name(ty),
        DataType::Array { ref element, element_required } => {
            if element_required {
                format!("{}[]", simple_type_name(element))
            } else {
                format!("({} | null)[]", simple_type_name(element))
            }
        },
        DataType::Map { ref element, element_required } => {
            if element_required {
                format!("Map<string, {}>", simple_type_name(element))
            } else {
                format!("Map<string, {} | null>", simple_type_name(element))
            }
        },
    }
}

fn simple_type_name(ty: &SimpleType) -> String {
    match *ty {
        SimpleType::String             => "string".to_owned(),
        SimpleType::Number             => "number".to_owned(),
        SimpleType::Boolean            => "boolean".to_owned(),
        SimpleType::Date               => "Date".to_owned(),
        SimpleType::Enum(ref name)     => name.clone(),
        SimpleType::ObjectId(_)        => "Types.ObjectId".to_owned(),
        SimpleType::Schema(ref name)   => schema_type_name(name),
        SimpleType::External(ref name) => name.clone(),
    }
}
