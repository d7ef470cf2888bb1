//
// tsgen/mongoose.rs
// The MGSDL Compiler
//

//! Runtime construction emitters: the factory function, per-entity
//! `new Schema(...)` blocks, deferred patch blocks for recursive
//! schemas, and the wiring of caller-supplied virtual accessors,
//! validators, and reference discriminators.

use crate::error::Result;
use crate::sdir::*;
use crate::tsgen::{ document_type_name, model_const_name, schema_const_name, schema_type_name };


// The factory builds every schema and model handle from one caller
// -supplied configuration object. Construction happens inside the
// factory body because virtual, validator, and discriminator wiring
// closes over that object.
pub(crate) fn factory(sdir: &Sdir, sorted: &[(&str, &Schema)]) -> Result<String> {
    let mut lines = vec!["export function createDb(config: DbConfig) {".to_owned()];

    for &(name, schema) in sorted {
        lines.push(String::new());
        lines.extend(construction(name, schema, false)?);
        lines.extend(patch_block(name, schema)?);
        lines.extend(hooks(name, schema));
    }

    for (name, model) in &sdir.models {
        lines.push(String::new());
        lines.extend(construction(name, &model.schema, true)?);
        lines.extend(patch_block(name, &model.schema)?);
        lines.extend(hooks(name, &model.schema));
    }

    lines.push(String::new());
    lines.push("return {".to_owned());

    for &(name, _) in sorted {
        lines.push(format!("{},", schema_const_name(name)));
    }

    for name in sdir.models.keys() {
        lines.push(format!(
            "{}: model<{}>('{}', {}),",
            model_const_name(name),
            document_type_name(name),
            name,
            schema_const_name(name),
        ));
    }

    lines.push("};".to_owned());
    lines.push("}".to_owned());

    Ok(lines.join("\n"))
}

// The main construction block of one entity. Regular fields only:
// virtual fields are wired separately, and fields referencing the
// entity's own schema are deferred to the patch block, as the
// schema constant does not exist yet on the right-hand side of its
// own initializer.
fn construction(name: &str, schema: &Schema, persisted: bool) -> Result<Vec<String>> {
    let type_name = if persisted { document_type_name(name) } else { schema_type_name(name) };
    let mut lines = vec![format!("const {} = new Schema<{}>({{", schema_const_name(name), type_name)];

    for (field_name, field) in regular_fields(name, schema) {
        lines.push(format!("{}: {},", field_name, field_descriptor(name, field_name, field)?));
    }

    if persisted {
        lines.push("}, { timestamps: true });".to_owned());
    } else {
        lines.push("});".to_owned());
    }

    Ok(lines)
}

// Appends the entity's self-referencing fields to the constructed
// schema object.
fn patch_block(name: &str, schema: &Schema) -> Result<Vec<String>> {
    let recursive: Vec<_> = schema.iter()
        .filter(|&(_, field)| !field.is_virtual && field.data_type.schema_ref() == Some(name))
        .collect();

    if recursive.is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = vec![String::new(), format!("{}.add({{", schema_const_name(name))];

    for (field_name, field) in recursive {
        lines.push(format!("{}: {},", field_name, field_descriptor(name, field_name, field)?));
    }

    lines.push("});".to_owned());
    Ok(lines)
}

// Call-throughs to caller-supplied behavior. Getters and setters are
// not synthesized: only the halves the caller actually supplied are
// wired.
fn hooks(name: &str, schema: &Schema) -> Vec<String> {
    let constant = schema_const_name(name);
    let mut lines = Vec::new();

    for (field_name, field) in schema {
        if field.is_virtual {
            lines.push(String::new());
            lines.push(format!("if (config.{}.{}.get) {{", name, field_name));
            lines.push(format!("{}.virtual('{}').get(config.{}.{}.get);", constant, field_name, name, field_name));
            lines.push("}".to_owned());
            lines.push(format!("if (config.{}.{}.set) {{", name, field_name));
            lines.push(format!("{}.virtual('{}').set(config.{}.{}.set);", constant, field_name, name, field_name));
            lines.push("}".to_owned());
        }

        if field.is_validatable {
            lines.push(format!("{}.path('{}').validate(config.{}.{}.validate);", constant, field_name, name, field_name));
        }
    }

    lines
}

fn regular_fields<'a>(name: &str, schema: &'a Schema) -> Vec<(&'a String, &'a FieldDef)> {
    schema.iter()
        .filter(|&(_, field)| !field.is_virtual)
        .filter(|&(_, field)| field.data_type.schema_ref() != Some(name))
        .collect()
}

// One field's complete storage descriptor: presence/index flags plus
// the type part, with containers wrapping a recursively rendered
// element descriptor.
fn field_descriptor(entity: &str, field_name: &str, field: &FieldDef) -> Result<String> {
    let mut parts = Vec::new();

    if field.is_required {
        parts.push("required: true".to_owned());
    }
    if field.is_index {
        parts.push("index: true".to_owned());
    }
    if field.is_unique {
        parts.push("unique: true".to_owned());
    }
    if field.is_immutable {
        parts.push("immutable: true".to_owned());
    }

    match field.data_type {
        DataType::Simple(ref ty) => {
            parts.push(data_descriptor(entity, field_name, ty)?);
        },
        DataType::Array { ref element, element_required } => {
            let mut element_parts = vec![data_descriptor(entity, field_name, element)?];
            if element_required {
                element_parts.push("required: true".to_owned());
            }
            parts.push(format!("type: [{{ {} }}]", element_parts.join(", ")));
        },
        DataType::Map { ref element, element_required } => {
            let mut element_parts = vec![data_descriptor(entity, field_name, element)?];
            if element_required {
                element_parts.push("required: true".to_owned());
            }
            parts.push(format!("type: Map, of: {{ {} }}", element_parts.join(", ")));
        },
    }

    Ok(format!("{{ {} }}", parts.join(", ")))
}

fn data_descriptor(entity: &str, field_name: &str, ty: &SimpleType) -> Result<String> {
    let descriptor = match *ty {
        SimpleType::String  => "type: String".to_owned(),
        SimpleType::Number  => "type: Number".to_owned(),
        SimpleType::Boolean => "type: Boolean".to_owned(),
        SimpleType::Date    => "type: Date".to_owned(),
        SimpleType::Enum(ref name) => format!("type: String, enum: {}", name),
        SimpleType::ObjectId(ref targets) => match targets.len() {
            0 => "type: Schema.Types.ObjectId".to_owned(),
            1 => format!("type: Schema.Types.ObjectId, ref: '{}'", targets[0]),
            // Ambiguous references resolve their target model per
            // instance, through the caller-supplied discriminator.
            _ => format!("type: Schema.Types.ObjectId, ref: config.{}.{}.resolveRef", entity, field_name),
        },
        SimpleType::Schema(ref name) => format!("type: {}", schema_const_name(name)),
        SimpleType::External(ref name) => bug!(
            "external type '{}' reached the storage descriptor of field '{}'",
            name,
            field_name,
        ),
    };

    Ok(descriptor)
}
