//
// tsgen/mod.rs
// The MGSDL Compiler
//

//! TSGen, the backend of the MGSDL compiler. Takes resolved SDIR and
//! the topological schema order, and renders the complete generated
//! TypeScript module: type declarations, a configuration interface
//! describing every caller-supplied hook, and a factory function
//! that constructs the mongoose schema and model handles.
//!
//! Rendering is two-phase: the emitters produce structurally correct
//! but unindented lines, and a final whitespace-normalization pass
//! re-indents the assembled text.

mod decls;
mod mongoose;

use std::collections::BTreeMap;
use heck::ToLowerCamelCase;
use crate::error::{ Error, Result };
use crate::sdir::{ Schema, Sdir };


/// A bunch of centralized settings governing the behavior of TSGen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Import path for each declared external type name. Every
    /// declared external must have an entry; compilation fails
    /// otherwise.
    pub external_import_paths: BTreeMap<String, String>,
}

/// Given the resolved SDIR of an MGSDL document, the topological
/// schema order, and codegen configuration, renders the complete
/// generated TypeScript source text.
///
/// # Arguments:
///
/// * `sdir`: the resolved definition.
/// * `sorted`: the schemas in dependency order, as produced by
///   `toposort::sort_schemas`.
/// * `config`: code generation parameters.
///
/// # Return value:
///
/// * `Ok(String)` holding the full generated module.
/// * `Err(Error::MissingExternalMapping)` if any declared external
///   lacks an import path.
pub fn generate(sdir: &Sdir, sorted: &[(&str, &Schema)], config: &CodegenConfig) -> Result<String> {
    check_external_mappings(sdir, config)?;

    let mut blocks = Vec::new();

    blocks.push(imports(sdir, config));

    for (name, def) in &sdir.enums {
        blocks.push(decls::enum_decl(name, def));
    }

    for &(name, schema) in sorted {
        blocks.push(decls::interface(&schema_type_name(name), schema, false));
    }

    for (name, model) in &sdir.models {
        blocks.push(decls::interface(&document_type_name(name), &model.schema, true));
    }

    blocks.push(decls::config_interface(sdir));
    blocks.push(mongoose::factory(sdir, sorted)?);

    reindent(&blocks.join("\n\n"))
}

/// Re-indents the assembled output text. Nesting is tracked with a
/// counter: a trimmed line that starts with a closing brace or
/// parenthesis decrements the counter before indentation is applied,
/// and a line ending with an opening brace or parenthesis increments
/// it afterwards. The counter must never go negative; if it would,
/// the renderer itself produced unbalanced output.
///
/// # Arguments:
///
/// * `text`: the assembled, arbitrarily-indented output.
///
/// # Return value:
///
/// * `Ok(String)` with every line re-indented (2 spaces per level).
/// * `Err(Error::IndentationImbalance)` on counter underflow. ICE.
pub fn reindent(text: &str) -> Result<String> {
    const INDENT: &str = "  ";

    let mut depth = 0_usize;
    let mut out = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            out.push('\n');
            continue;
        }

        if trimmed.starts_with(|ch| ch == '}' || ch == ')') {
            depth = match depth.checked_sub(1) {
                Some(depth) => depth,
                None => return Err(Error::IndentationImbalance { line: trimmed.to_owned() }),
            };
        }

        for _ in 0..depth {
            out.push_str(INDENT);
        }

        out.push_str(trimmed);
        out.push('\n');

        if trimmed.ends_with(|ch| ch == '{' || ch == '(') {
            depth += 1;
        }
    }

    Ok(out)
}

fn check_external_mappings(sdir: &Sdir, config: &CodegenConfig) -> Result<()> {
    let missing: Vec<String> = sdir.externals.iter()
        .filter(|name| !config.external_import_paths.contains_key(*name))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingExternalMapping { externals: missing })
    }
}

fn imports(sdir: &Sdir, config: &CodegenConfig) -> String {
    let mut lines = vec!["import { Schema, model, Types, Document } from 'mongoose';".to_owned()];

    for name in &sdir.externals {
        // Presence is validated up front in check_external_mappings().
        lines.push(format!("import {{ {} }} from '{}';", name, config.external_import_paths[name]));
    }

    lines.join("\n")
}

//
// Naming conventions for generated program elements
//

// Interface name of an embeddable schema's document type.
pub(crate) fn schema_type_name(name: &str) -> String {
    format!("{}SchemaDocument", name)
}

// Interface name of a persisted model's document type.
pub(crate) fn document_type_name(name: &str) -> String {
    format!("{}Document", name)
}

// Local constant holding a constructed schema object.
pub(crate) fn schema_const_name(name: &str) -> String {
    format!("{}Schema", name).to_lower_camel_case()
}

// Property name of a model handle in the factory's return value.
pub(crate) fn model_const_name(name: &str) -> String {
    format!("{}Model", name)
}
