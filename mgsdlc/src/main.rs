//
// main.rs
// The MGSDL Compiler
//

//! `mgsdlc` is the command-line driver for the MGSDL compiler.
//!
//! ## Basic usage:
//!
//! `mgsdlc -i src/db.mgsdl -o src/generated/db.ts`
//!
//! There are two modes of invocation:
//!
//! * Direct mode: `-i`/`--input` names the MGSDL source file and
//!   `-o`/`--output` names the TypeScript file to be written. No
//!   external import paths can be supplied in this mode, so it only
//!   works for schemas that declare no `external` types.
//! * Config mode: `-c`/`--config` names a JSON configuration file of
//!   the shape
//!
//!   ```json
//!   {
//!       "inputFile": "src/db.mgsdl",
//!       "outputFile": "src/generated/db.ts",
//!       "externalImportPaths": { "UserDetailsInterface": "../externals" }
//!   }
//!   ```
//!
//!   where `externalImportPaths` maps every declared external type
//!   name to the module path it is imported from in the generated
//!   code. Unknown keys in the configuration file are rejected.
//!
//! Both modes run the full compiler on the input text and write the
//! returned module to the output path verbatim. Nothing is written
//! unless compilation succeeds.
//!
//! ## Exit Status
//!
//! The compiler exits with status `0` if the compilation succeeds,
//! and with a non-zero status otherwise.

#![deny(missing_debug_implementations, missing_copy_implementations,
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unstable_features,
        unused_import_braces, unused_qualifications, missing_docs)]

#[macro_use]
extern crate clap;

use std::collections::BTreeMap;
use std::fs;
use std::io::{ stderr, Write };
use std::process;
use std::time::Instant;
use serde::Deserialize;
use mgsdl::error::Result;
use mgsdl::tsgen::CodegenConfig;
use mgsdl::util::{ Diagnostic, DiagnosticKind, PACKAGE_INFO };


// Reporting elapsed time for each stage of the compiler pipeline
macro_rules! stopwatch {
    ($msg: expr, $code: expr) => ({
        eprint!("    {:.<40}", $msg);
        stderr().flush().expect("Could not flush stderr");
        let t0 = Instant::now();
        let val = $code;
        let t1 = Instant::now();
        let dt = t1 - t0;
        let secs = dt.as_secs() as f64 + f64::from(dt.subsec_nanos()) * 1e-9;
        let message = format!("{:6.1} ms", secs * 1e3);
        eprintln!("{}", Diagnostic::new(message, DiagnosticKind::Info));
        val
    })
}

//
// Parsing Command-Line Arguments
//

type ArgResult<T> = std::result::Result<T, String>;

// The configuration file accepted in `--config` mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    input_file: String,
    output_file: String,
    #[serde(default)]
    external_import_paths: BTreeMap<String, String>,
}

#[derive(Debug)]
struct CmdArgs {
    input_file: String,
    output_file: String,
    codegen_config: CodegenConfig,
}

impl CmdArgs {
    fn new() -> ArgResult<Self> {
        let args = clap_app!(mgsdlc =>
            (version: PACKAGE_INFO.version)
            (about:   PACKAGE_INFO.description)
            (@arg input:  -i --input  +takes_value "Input MGSDL schema file")
            (@arg output: -o --output +takes_value "Output TypeScript file")
            (@arg config: -c --config +takes_value "JSON configuration file")
        ).get_matches();

        if let Some(path) = args.value_of("config") {
            if args.value_of("input").is_some() || args.value_of("output").is_some() {
                return Err("--config cannot be combined with --input/--output".to_owned());
            }

            return Self::from_config_file(path);
        }

        let input_file = args.value_of("input")
            .ok_or("either --config, or both --input and --output, must be given")?
            .to_owned();
        let output_file = args.value_of("output")
            .ok_or("either --config, or both --input and --output, must be given")?
            .to_owned();

        Ok(CmdArgs {
            input_file,
            output_file,
            codegen_config: CodegenConfig::default(),
        })
    }

    fn from_config_file(path: &str) -> ArgResult<Self> {
        let contents = fs::read_to_string(path).map_err(
            |error| format!("cannot read config file '{}': {}", path, error)
        )?;
        let config: ConfigFile = serde_json::from_str(&contents).map_err(
            |error| format!("malformed config file '{}': {}", path, error)
        )?;

        Ok(CmdArgs {
            input_file:  config.input_file,
            output_file: config.output_file,
            codegen_config: CodegenConfig {
                external_import_paths: config.external_import_paths,
            },
        })
    }
}

//
// Entry point
//

fn mgsdlc_main(args: &CmdArgs) -> Result<()> {
    let source = stopwatch!("Reading Source", {
        fs::read_to_string(&args.input_file)?
    });

    let output = stopwatch!("Compiling", {
        mgsdl::compile(&source, &args.codegen_config)?
    });

    stopwatch!("Writing Output", {
        fs::write(&args.output_file, output)?
    });

    Ok(())
}

fn main() {
    eprintln!();
    eprintln!("    The MGSDL Compiler, version {}", PACKAGE_INFO.version);
    eprintln!();

    let args = CmdArgs::new().unwrap_or_else(|error| {
        eprint!("    {}\n\n", Diagnostic::new(error, DiagnosticKind::Error));
        process::exit(1);
    });

    mgsdlc_main(&args).unwrap_or_else(|error| {
        eprint!("\n    {}\n\n", Diagnostic::new(error, DiagnosticKind::Error));
        process::exit(1);
    });

    eprintln!();
    eprintln!("    {}", Diagnostic::new("Compilation Successful", DiagnosticKind::Success));
    eprintln!();
}
