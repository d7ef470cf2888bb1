//
// lib.rs
// The MGSDL Compiler
//

//! This library provides the programmatic interface for the MGSDL
//! compiler and Domain-Specific Language. MGSDL describes document
//! database layouts: enumerations, embeddable sub-schemas, persisted
//! entity models, opaque external types, and tagged unions of models.
//! The compiler turns such a description into TypeScript source text:
//! type declarations plus mongoose schema/model construction code.
//!
//! The crate is composed of several modules, each of which roughly
//! corresponds to a single step in the compilation pipeline:
//!
//! * `parser` performs grammar analysis of the source text and outputs an…
//! * `ast`, an Abstract Syntax Tree of raw, unresolved declarations.
//! * `sdirgen` takes the AST and typechecks it, then emits…
//! * `sdir`, the Schema Definition Intermediate Representation.
//! * `toposort` orders embeddable schemas by their reference graph,
//!   so that every schema is constructed before its referrers.
//! * `tsgen` is the back-end that generates the actual TypeScript code.
//! * `util` contains miscellaneous helper types and functions.
//! * `error` contains type definitions for uniformly describing
//!   syntactic, semantic, and internal compiler errors.
//!
//! The whole pipeline is pure and synchronous: `compile` maps one
//! source string and one configuration to one output string, with no
//! process-wide state, so distinct compilations may run concurrently.

#![deny(missing_debug_implementations, missing_copy_implementations,
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unstable_features,
        unused_import_braces, unused_qualifications, missing_docs)]

#[macro_use]
pub mod error;
pub mod util;
pub mod ast;
pub mod parser;
pub mod sdir;
pub mod sdirgen;
pub mod toposort;
pub mod tsgen;

use crate::error::Result;
use crate::tsgen::CodegenConfig;

/// Compiles MGSDL source text into generated TypeScript source text.
///
/// This is the complete pipeline: grammar parsing, semantic
/// resolution, dependency ordering, and code generation, in that
/// order. Emission only begins after every earlier stage has
/// succeeded, so no partial output is ever produced.
///
/// # Arguments
///
/// * `source`: the MGSDL source text.
/// * `config`: code generation parameters; see `tsgen::CodegenConfig`.
///
/// # Return value
///
/// * `Ok(String)` holding the generated module on success.
/// * `Err(Error)` describing the first failure otherwise; see the
///   docs of `error::Error` for the possible conditions.
pub fn compile(source: &str, config: &CodegenConfig) -> Result<String> {
    let prog = parser::parse(source)?;
    let sdir = sdirgen::generate_sdir(&prog)?;
    let sorted = toposort::sort_schemas(&sdir.schemas)?;

    tsgen::generate(&sdir, &sorted, config)
}
