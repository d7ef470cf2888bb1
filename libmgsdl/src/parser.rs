//
// parser.rs
// The MGSDL Compiler
//

//! This module contains the grammar parser: it breaks unstructured
//! MGSDL source text into raw top-level declarations and field
//! lines. Scanning is regex-driven with full input coverage: every
//! span the grammar does not match is subtracted from the scanned
//! text, and any non-whitespace remainder is reported verbatim as
//! a syntax error. There are no silent partial matches.

use regex::{ Captures, Regex };
use crate::ast::*;
use crate::error::{ Error, Result };
use crate::util::location_at;


/// Matches one top-level declaration: a braced `enum`/`model`/`schema`
/// body, a bare `external` name, or a `union` membership list.
const TOP_LEVEL_PATTERN: &str =
    r"(?:(enum|model|schema) ([^{]*) \{([^}]*)\})|(?:external (\w*))|(?:union (\w*) = ([\w |]*))";

/// Matches one `name: type @directives` field line. The type is a bare
/// token, a `[Elem]` array, or a `Map<Elem>` map; both the element and
/// the field itself take an independent `!` (required) marker.
const FIELD_PATTERN: &str =
    r"(\w+): (?:\[(\w+)(!?)\]|Map<(\w+)(!?)>|(\w+))(!?)([^\n]*)";

/// Matches one `@directive` annotation.
const DIRECTIVE_PATTERN: &str = r"@(\w+)";

/// Matches one enumeration value.
const VALUE_PATTERN: &str = r"(\w+)";

/// The directive names the grammar recognizes.
const DIRECTIVES: &[&str] = &["index", "unique", "immutable", "virtual", "validate"];


/// Given an MGSDL source string, returns the raw declarations
/// extracted from it, or an error if any part of the input is not
/// covered by the grammar.
///
/// # Arguments
///
/// * `source`: the complete MGSDL source text.
///
/// # Return value
///
/// * `Ok(Prog)` if the source was syntactically correct.
/// * `Err(Error::UnexpectedSyntax)` reporting the exact unmatched
///   fragment otherwise.
/// * `Err(Error::UnknownDirective)` if a field carries an
///   unrecognized directive.
pub fn parse(source: &str) -> Result<Prog> {
    Parser::new().parse(source)
}

#[derive(Debug)]
struct Parser {
    top_level: Regex,
    field:     Regex,
    directive: Regex,
    value:     Regex,
}

impl Parser {
    fn new() -> Parser {
        Parser {
            top_level: Regex::new(TOP_LEVEL_PATTERN).unwrap(),
            field:     Regex::new(FIELD_PATTERN).unwrap(),
            directive: Regex::new(DIRECTIVE_PATTERN).unwrap(),
            value:     Regex::new(VALUE_PATTERN).unwrap(),
        }
    }

    fn parse<'a>(&self, source: &'a str) -> Result<Prog<'a>> {
        let mut items = Vec::new();

        for cap in self.scan_covered(&self.top_level, source, 0, source)? {
            items.push(self.parse_top_level(&cap, source)?);
        }

        Ok(Prog { items })
    }

    fn parse_top_level<'a>(&self, cap: &Captures<'a>, source: &str) -> Result<Item<'a>> {
        if let Some(keyword) = cap.get(1) {
            let name = cap.get(2).ok_or_else(lazy_bug!("missing declaration name"))?.as_str();
            let body = cap.get(3).ok_or_else(lazy_bug!("missing declaration body"))?;

            return match keyword.as_str() {
                "enum" => Ok(Item::EnumDecl(EnumDecl {
                    name,
                    values: self.parse_enum_body(body.as_str(), body.start(), source)?,
                })),
                "schema" => Ok(Item::SchemaDecl(SchemaDecl {
                    name,
                    fields: self.parse_fields(body.as_str(), body.start(), source)?,
                })),
                "model" => Ok(Item::ModelDecl(ModelDecl {
                    name,
                    fields: self.parse_fields(body.as_str(), body.start(), source)?,
                })),
                lexeme => bug!("unhandled declaration keyword '{}'", lexeme),
            };
        }

        if let Some(name) = cap.get(4) {
            return Ok(Item::ExternalDecl(ExternalDecl { name: name.as_str() }));
        }

        if let Some(name) = cap.get(5) {
            let members = cap.get(6)
                .ok_or_else(lazy_bug!("missing union membership list"))?
                .as_str()
                .split('|')
                .map(str::trim)
                .collect();

            return Ok(Item::UnionDecl(UnionDecl { name: name.as_str(), members }));
        }

        bug!("top-level match without a declaration group")
    }

    fn parse_enum_body<'a>(&self, body: &'a str, base: usize, source: &str) -> Result<Vec<&'a str>> {
        self.scan_covered(&self.value, body, base, source)?
            .iter()
            .map(|cap| {
                cap.get(1)
                    .map(|value| value.as_str())
                    .ok_or_else(lazy_bug!("missing enum value group"))
            })
            .collect()
    }

    fn parse_fields<'a>(&self, body: &'a str, base: usize, source: &str) -> Result<Vec<FieldDecl<'a>>> {
        let mut fields = Vec::new();
        let mut unknown = Vec::new();

        for cap in self.scan_covered(&self.field, body, base, source)? {
            let name = cap.get(1).ok_or_else(lazy_bug!("missing field name"))?.as_str();

            let kind = if let Some(element) = cap.get(2) {
                TyKind::Array {
                    element:          element.as_str(),
                    element_required: marker(&cap, 3),
                }
            } else if let Some(element) = cap.get(4) {
                TyKind::Map {
                    element:          element.as_str(),
                    element_required: marker(&cap, 5),
                }
            } else if let Some(token) = cap.get(6) {
                TyKind::Named(token.as_str())
            } else {
                bug!("field '{}' matched without a type group", name)
            };

            let ty = TyDecl { kind, required: marker(&cap, 7) };

            let directives = match cap.get(8) {
                Some(tail) => self.parse_directives(tail.as_str(), base + tail.start(), source)?,
                None       => Vec::new(),
            };

            // Unknown directives are collected across the whole body
            // and reported together.
            unknown.extend(
                directives.iter()
                    .filter(|d| !DIRECTIVES.contains(d))
                    .map(|d| (*d).to_owned())
            );

            fields.push(FieldDecl {
                name,
                ty,
                directives: Directives::from_names(&directives),
            });
        }

        if unknown.is_empty() {
            Ok(fields)
        } else {
            Err(Error::UnknownDirective { directives: unknown })
        }
    }

    fn parse_directives<'a>(&self, tail: &'a str, base: usize, source: &str) -> Result<Vec<&'a str>> {
        if tail.is_empty() {
            return Ok(Vec::new());
        }

        self.scan_covered(&self.directive, tail, base, source)?
            .iter()
            .map(|cap| {
                cap.get(1)
                    .map(|directive| directive.as_str())
                    .ok_or_else(lazy_bug!("missing directive name group"))
            })
            .collect()
    }

    // Scans `text` (a slice of `source` starting at byte `base`) and
    // verifies full coverage: the concatenation of all unmatched spans
    // must be whitespace-only, otherwise its trimmed value is reported
    // along with the location of the first offending character.
    fn scan_covered<'a>(
        &self,
        regex: &Regex,
        text: &'a str,
        base: usize,
        source: &str,
    ) -> Result<Vec<Captures<'a>>> {
        let caps: Vec<_> = regex.captures_iter(text).collect();

        let mut residual = String::new();
        let mut offender = None;
        let mut cursor = 0;

        for cap in &caps {
            let matched = cap.get(0).ok_or_else(lazy_bug!("capture without a whole match"))?;
            note_gap(&text[cursor..matched.start()], base + cursor, &mut residual, &mut offender);
            cursor = matched.end();
        }

        note_gap(&text[cursor..], base + cursor, &mut residual, &mut offender);

        match offender {
            None => Ok(caps),
            Some(offset) => Err(Error::UnexpectedSyntax {
                fragment: residual.trim().to_owned(),
                location: location_at(source, offset),
            }),
        }
    }
}

// Records one unmatched span, remembering the absolute offset of the
// first non-whitespace character across all spans.
fn note_gap(gap: &str, start: usize, residual: &mut String, offender: &mut Option<usize>) {
    if offender.is_none() {
        if let Some(index) = gap.find(|ch: char| !ch.is_whitespace()) {
            *offender = Some(start + index);
        }
    }

    residual.push_str(gap);
}

// Whether the optional `!` marker group matched a literal `!`.
fn marker(cap: &Captures, group: usize) -> bool {
    cap.get(group).map_or(false, |m| m.as_str() == "!")
}
