//
// error.rs
// The MGSDL Compiler
//

//! This module defines types for representing possible errors
//! that may be generated during the compilation of some MGSDL
//! source code. It also provides useful macros for reporting
//! internal compiler errors in a way that is consistent across
//! modules.

use std::io;
use std::result;
use std::fmt::{ self, Display, Formatter };
use itertools::join;
use crate::util::Location;


/// Internal helper for macros `bug!()` and `lazy_bug!()`.
macro_rules! unreachable_error {
    ($msg: expr) => {
        $crate::error::Error::Unreachable {
            message: $msg,
            file: file!(),
            line: line!() as usize,
        }
    }
}

/// Indicates a compiler error. Makes the current function return
/// an `Error::Unreachable`. This is basically a non-panicking
/// substitute for the standard `unreachable!()` macro.
macro_rules! bug {
    ($msg: expr) => {
        return Err(unreachable_error!($msg.to_owned()))
    };
    ($fmt: expr, $($args: tt)*) => {
        return Err(unreachable_error!(format!($fmt, $($args)*)))
    };
}

/// Similar to `bug!()`, but it yields a closure that returns an
/// `Error::Unreachable`. Useful for handling errors efficiently,
/// lazily, primarily using `Option::ok_or_else()`.
macro_rules! lazy_bug {
    ($msg: expr) => {
        || unreachable_error!($msg.to_owned())
    };
    ($fmt: expr, $($args: tt)*) => {
        || unreachable_error!(format!($fmt, $($args)*))
    };
}


/// An error that may occur while compiling MGSDL source code.
/// This can be either a user-induced error (e.g. a syntax error
/// or an unresolvable type name), or an Internal Compiler Error
/// (abbreviated ICE), i.e. a bug. Every user-induced condition
/// is a distinct variant, so that callers can branch on cause.
#[derive(Debug)]
pub enum Error {
    /// I/O error, probably coming from the OS, not MGSDL itself.
    Io(io::Error),
    /// Two top-level declarations, of any kinds, share a name.
    DuplicateName {
        /// The name that was declared more than once.
        name: String,
    },
    /// Two fields within one declaration body share a name.
    DuplicateField {
        /// The offending field name.
        field: String,
    },
    /// Part of the input was not covered by the grammar.
    UnexpectedSyntax {
        /// The unmatched, non-whitespace remainder of the scanned text.
        fragment: String,
        /// The human-readable position of the first offending character.
        location: Location,
    },
    /// One or more field directives are not recognized.
    UnknownDirective {
        /// The unrecognized directive names, in order of appearance.
        directives: Vec<String>,
    },
    /// A field's type token did not resolve to any known type.
    UnknownType {
        /// The name of the field carrying the unresolvable type.
        field: String,
        /// The offending type token.
        type_name: String,
    },
    /// A union declaration references undeclared model names.
    UnknownUnionMember {
        /// The name of the offending union.
        union: String,
        /// The member names that are not declared models.
        models: Vec<String>,
    },
    /// The schema reference graph contains a cycle spanning
    /// two or more distinct schemas.
    CycleDetected,
    /// An external type was used for a field that is not virtual.
    /// External types are never persisted.
    ExternalInPersistedField {
        /// The name of the offending field.
        field: String,
    },
    /// One or more declared external types have no import path
    /// in the supplied code generation configuration.
    MissingExternalMapping {
        /// Every declared external lacking a mapping, in declaration order.
        externals: Vec<String>,
    },
    /// The indentation counter of the output normalization pass
    /// went negative. ICE.
    IndentationImbalance {
        /// The rendered line on which the imbalance was detected.
        line: String,
    },
    /// Some unreachable code was reached as a result of a bug/unforeseen condition. ICE.
    Unreachable {
        /// Description of the bug.
        message: String,
        /// Source file inside the MGSDL compiler that caused the bug.
        file: &'static str,
        /// Source line index within the offending file.
        line: usize,
    },
}

/// Convenience type alias for expressing `Result`s of MGSDL `Error`s.
pub type Result<T> = result::Result<T, Error>;


impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _                  => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "I/O error: {}", err),
            Error::DuplicateName { ref name } => write!(
                f, "Duplicate top-level name '{}'", name
            ),
            Error::DuplicateField { ref field } => write!(
                f, "Duplicate field '{}'", field
            ),
            Error::UnexpectedSyntax { ref fragment, location } => write!(
                f, "Unexpected syntax at {} near:\n{}", location, fragment
            ),
            Error::UnknownDirective { ref directives } => write!(
                f, "Unknown directives: {}", join(directives, ", ")
            ),
            Error::UnknownType { ref field, ref type_name } => write!(
                f, "Field '{}' has unknown type '{}'", field, type_name
            ),
            Error::UnknownUnionMember { ref union, ref models } => write!(
                f, "Unknown model names in union '{}': {}", union, join(models, ", ")
            ),
            Error::CycleDetected => f.write_str(
                "Cycle detected between schemas"
            ),
            Error::ExternalInPersistedField { ref field } => write!(
                f, "Cannot use external types for non-virtual fields (field '{}')", field
            ),
            Error::MissingExternalMapping { ref externals } => write!(
                f, "Missing externals in input config: {}", join(externals, ", ")
            ),
            Error::IndentationImbalance { ref line } => write!(
                f,
                "Internal Compiler Error: indentation underflow before line '{}'. This is a bug.",
                line,
            ),
            Error::Unreachable { ref message, file, line } => write!(
                f,
                "Internal Compiler Error: Reached unreachable code: {}, in file {}, line {}. This is a bug.",
                message,
                file,
                line,
            ),
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}
