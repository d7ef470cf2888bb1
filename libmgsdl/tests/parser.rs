//
// tests/parser.rs
// The MGSDL Compiler
//

#![deny(missing_debug_implementations, missing_copy_implementations,
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unstable_features,
        unused_import_braces, unused_qualifications)]

use mgsdl::ast::*;
use mgsdl::error::Error;
use mgsdl::parser::parse;
use mgsdl::util::Location;


fn parse_valid(source: &str) -> Prog {
    parse(source).expect("valid source was rejected")
}

fn parse_invalid(source: &str) -> Error {
    match parse(source) {
        Ok(_) => panic!("invalid source was accepted"),
        Err(error) => error,
    }
}

fn syntax_error(source: &str) -> (String, Location) {
    match parse_invalid(source) {
        Error::UnexpectedSyntax { fragment, location } => (fragment, location),
        error => panic!("parser returned a non-syntactic error: {}", error),
    }
}

fn named_field<'a>(name: &'a str, token: &'a str, required: bool) -> FieldDecl<'a> {
    FieldDecl {
        name,
        ty: TyDecl {
            kind: TyKind::Named(token),
            required,
        },
        directives: Directives::default(),
    }
}

#[test]
fn empty_source() {
    let prog = parse_valid("");
    assert!(prog.items.is_empty());
}

#[test]
fn whitespace_only_source() {
    let prog = parse_valid("  \n\t  \n");
    assert!(prog.items.is_empty());
}

#[test]
fn valid_declaration_of_every_kind() {
    let source = "enum Color { Red Green }\n\
                  schema Point {\n\
                  x: Number!\n\
                  y: Number!\n\
                  }\n\
                  model Shape { name: String! }\n\
                  external Widget\n\
                  union Ref = Shape | Other";

    let prog = parse_valid(source);

    let expected = vec![
        Item::EnumDecl(EnumDecl {
            name: "Color",
            values: vec!["Red", "Green"],
        }),
        Item::SchemaDecl(SchemaDecl {
            name: "Point",
            fields: vec![
                named_field("x", "Number", true),
                named_field("y", "Number", true),
            ],
        }),
        Item::ModelDecl(ModelDecl {
            name: "Shape",
            fields: vec![named_field("name", "String", true)],
        }),
        Item::ExternalDecl(ExternalDecl { name: "Widget" }),
        Item::UnionDecl(UnionDecl {
            name: "Ref",
            members: vec!["Shape", "Other"],
        }),
    ];

    assert_eq!(prog.items, expected);
}

#[test]
fn enum_value_order_is_preserved() {
    let prog = parse_valid("enum Priority { Highest High Low Lowest }");

    match prog.items[0] {
        Item::EnumDecl(ref decl) => {
            assert_eq!(decl.values, ["Highest", "High", "Low", "Lowest"]);
        },
        ref item => panic!("expected an enum declaration, found {:?}", item),
    }
}

#[test]
fn field_type_forms() {
    let source = "schema Forms {\n\
                  plain: Tag\n\
                  needed: Tag!\n\
                  list: [Tag]\n\
                  full_list: [Tag!]!\n\
                  lookup: Map<Tag>\n\
                  full_lookup: Map<Tag!>!\n\
                  }";

    let prog = parse_valid(source);

    let fields = match prog.items[0] {
        Item::SchemaDecl(ref decl) => &decl.fields,
        ref item => panic!("expected a schema declaration, found {:?}", item),
    };

    let kinds: Vec<_> = fields.iter().map(|field| (field.name, field.ty)).collect();

    assert_eq!(kinds, [
        ("plain", TyDecl { kind: TyKind::Named("Tag"), required: false }),
        ("needed", TyDecl { kind: TyKind::Named("Tag"), required: true }),
        ("list", TyDecl {
            kind: TyKind::Array { element: "Tag", element_required: false },
            required: false,
        }),
        ("full_list", TyDecl {
            kind: TyKind::Array { element: "Tag", element_required: true },
            required: true,
        }),
        ("lookup", TyDecl {
            kind: TyKind::Map { element: "Tag", element_required: false },
            required: false,
        }),
        ("full_lookup", TyDecl {
            kind: TyKind::Map { element: "Tag", element_required: true },
            required: true,
        }),
    ]);
}

#[test]
fn all_directives_are_recognized() {
    let source = "model M { f: String! @index @unique @immutable @virtual @validate }";
    let prog = parse_valid(source);

    let field = match prog.items[0] {
        Item::ModelDecl(ref decl) => decl.fields[0],
        ref item => panic!("expected a model declaration, found {:?}", item),
    };

    assert_eq!(field.directives, Directives {
        is_index:       true,
        is_unique:      true,
        is_immutable:   true,
        is_virtual:     true,
        is_validatable: true,
    });
}

#[test]
fn unknown_directives_are_collected_across_the_body() {
    let source = "model M {\n\
                  a: String @frobnicate\n\
                  b: Number @index @bogus\n\
                  }";

    match parse_invalid(source) {
        Error::UnknownDirective { directives } => {
            assert_eq!(directives, ["frobnicate", "bogus"]);
        },
        error => panic!("expected an unknown-directive error, found {}", error),
    }
}

#[test]
fn residual_top_level_text_is_reported_verbatim() {
    let (fragment, location) = syntax_error("enum Color { Red } bogus");

    assert_eq!(fragment, "bogus");
    assert_eq!(location, Location { line: 1, column: 20 });
}

#[test]
fn field_line_without_colon_is_reported_verbatim() {
    let (fragment, _) = syntax_error("model M { x Number }");
    assert_eq!(fragment, "x Number");
}

#[test]
fn residual_location_spans_lines() {
    let (fragment, location) = syntax_error("model M {\n  name: String\n  bogus line\n}");

    assert_eq!(fragment, "bogus line");
    assert_eq!(location, Location { line: 3, column: 3 });
}

#[test]
fn trailing_garbage_after_field_type_is_reported() {
    let (fragment, _) = syntax_error("model M { x: Number frob }");
    assert_eq!(fragment, "frob");
}

#[test]
fn enum_body_punctuation_is_rejected() {
    let (fragment, _) = syntax_error("enum E { Red, Green }");
    assert_eq!(fragment, ",");
}

#[test]
fn missing_space_before_brace_is_rejected() {
    let (fragment, _) = syntax_error("enum Color{ Red }");
    assert_eq!(fragment, "enum Color{ Red }");
}

// Field lines end at the newline; a second field on the same line is
// swallowed by the directive tail and must not silently parse.
#[test]
fn two_fields_on_one_line_are_rejected() {
    let (fragment, _) = syntax_error("schema Point { x: Number! y: Number! }");
    assert_eq!(fragment, "y: Number!");
}
