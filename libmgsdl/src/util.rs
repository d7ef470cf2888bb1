//
// util.rs
// The MGSDL Compiler
//

//! The `util` module provides various useful helper functions and
//! types used throughout the MGSDL source tree: package metadata,
//! colored diagnostic formatting, and grapheme-cluster-accurate
//! source location handling.

use std::fmt::{ self, Display, Formatter };
use unicode_segmentation::UnicodeSegmentation;


/// Type of a global descriptor that holds information about
/// the current version of the MGSDL package (library and compiler).
/// The purpose of a global instance of this struct is to provide
/// user-readable version information in a uniform manner throughout
/// the code base, and for potential 3rd-party tooling.
#[derive(Debug, Clone, Copy)]
pub struct PackageInfo {
    /// The name of the MGSDL package.
    pub name: &'static str,
    /// The version of the MGSDL package.
    pub version: &'static str,
    /// A short summary of this package.
    pub description: &'static str,
}

/// Holds metadata about the MGSDL package as defined in the Cargo manifest.
pub static PACKAGE_INFO: PackageInfo = PackageInfo {
    name:        env!["CARGO_PKG_NAME"],
    version:     env!["CARGO_PKG_VERSION"],
    description: env!["CARGO_PKG_DESCRIPTION"],
};

/// Used for distinguishing between the types of
/// diagnostic that the compiler can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// A message without any special attributes or coloring.
    Default,
    /// An informative message, eg. compilation progress or performance.
    Info,
    /// A highlighted part of a diagnostic.
    Highlight,
    /// Indicates successful compilation.
    Success,
    /// Indicates that an error occurred during compilation.
    Error,
}

/// Returns `DiagnosticKind::Default`.
impl Default for DiagnosticKind {
    fn default() -> Self {
        DiagnosticKind::Default
    }
}

/// A string which, when `Display`ed, looks pretty and colorful.
/// It is used for formatting diagnostic messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Diagnostic<T> {
    value: T,
    kind: DiagnosticKind,
}

impl<T> Diagnostic<T> {
    /// Makes a pretty-printable diagnostic that displays
    /// a given value in the specified diagnostic style.
    ///
    /// # Arguments:
    ///
    /// * `value`: the value to be pretty-printed.
    /// * `kind`: the diagnostic style to apply when pretty-printing.
    ///
    /// # Return value:
    ///
    /// An initialized `Diagnostic` instance.
    pub fn new(value: T, kind: DiagnosticKind) -> Self {
        Diagnostic { value, kind }
    }

    /// Consumes `self` and returns the inner value, discarding style information.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Returns the diagnostic kind associated with this instance.
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }
}

impl<T> AsRef<T> for Diagnostic<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T> AsMut<T> for Diagnostic<T> {
    fn as_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T> From<T> for Diagnostic<T> {
    fn from(value: T) -> Self {
        Self::new(value, DiagnosticKind::Default)
    }
}

impl<T> Display for Diagnostic<T> where T: Display {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let reset = "\x1b[0m";
        let color = match self.kind {
            DiagnosticKind::Default   => "",
            DiagnosticKind::Info      => "\x1b[1;33m",
            DiagnosticKind::Highlight => "\x1b[1;36m",
            DiagnosticKind::Success   => "\x1b[1;32m",
            DiagnosticKind::Error     => "\x1b[1;31m",
        };

        write!(f, "{}{}{}{}", reset, color, self.value, reset)
    }
}

/// Represents the location of a single extended grapheme cluster
/// in the source fed to the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// 1-based line index within the source.
    pub line: usize,
    /// 1-based character index within the line.
    pub column: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "line {}, char {}", self.line, self.column)
    }
}

/// Computes the human-readable location of the character found
/// at the specified byte offset within the source string.
///
/// # Arguments:
///
/// * `source`: the complete source string.
/// * `offset`: a byte offset pointing at a character boundary in `source`.
///
/// # Return value:
///
/// The 1-based line and column of the pointed-to character, counted
/// in extended grapheme clusters.
pub fn location_at(source: &str, offset: usize) -> Location {
    let prefix = &source[..offset];
    let line_breaks: &[char] = &['\n', '\x0b', '\x0c', '\r', '\u{0085}', '\u{2028}', '\u{2029}'];

    match prefix.rfind(line_breaks) {
        // -1 because the \n itself doesn't count,
        // +1 because humans start counting at 1.
        Some(index) => Location {
            line:   1 + grapheme_count_by(prefix, |g| g.contains(line_breaks)),
            column: grapheme_count(&prefix[index..]) - 1 + 1,
        },
        None => Location {
            line:   1,
            column: grapheme_count(prefix) + 1,
        },
    }
}

/// Returns the number of extended grapheme clusters in `string`.
/// Useful for counting 'characters' in accordance with a user's
/// notion of a 'character' or grapheme. Mainly used for generating
/// visually accurate source location data.
///
/// # Arguments:
///
/// * `string`: a string slice.
///
/// # Return value:
///
/// The number of extended grapheme clusters in `string`.
pub fn grapheme_count(string: &str) -> usize {
    string.graphemes(true).count()
}

/// Counts the grapheme clusters in a string that satisfy a condition.
///
/// # Arguments:
///
/// * `string`: a string slice.
/// * `pred`: a predicate function invoked for each extended grapheme
///   cluster in `string`.
///
/// # Return value:
///
/// The number of extended grapheme clusters in `string`
/// for which `pred` returned `true`.
pub fn grapheme_count_by<P: Fn(&str) -> bool>(string: &str, pred: P) -> usize {
    string.graphemes(true).filter(|&g| pred(g)).count()
}
