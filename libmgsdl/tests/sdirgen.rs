//
// tests/sdirgen.rs
// The MGSDL Compiler
//

#![deny(missing_debug_implementations, missing_copy_implementations,
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unstable_features,
        unused_import_braces, unused_qualifications)]

use mgsdl::error::Error;
use mgsdl::parser::parse;
use mgsdl::sdir::*;
use mgsdl::sdirgen::generate_sdir;


fn try_generate(source: &str) -> Result<Sdir, Error> {
    let prog = parse(source).expect("test source must be grammatical");
    generate_sdir(&prog)
}

fn sdir_for_valid_source(source: &str) -> Sdir {
    try_generate(source).expect("valid source was rejected")
}

fn sema_error_for_invalid_source(source: &str) -> Error {
    match try_generate(source) {
        Ok(_) => panic!("invalid source was accepted"),
        Err(error) => error,
    }
}

fn field_type<'a>(sdir: &'a Sdir, model: &str, field: &str) -> &'a DataType {
    &sdir.models[model].schema[field].data_type
}

#[test]
fn empty_source() {
    let sdir = sdir_for_valid_source("");

    assert!(sdir.enums.is_empty());
    assert!(sdir.schemas.is_empty());
    assert!(sdir.models.is_empty());
    assert!(sdir.unions.is_empty());
    assert!(sdir.externals.is_empty());
}

#[test]
fn duplicate_names_across_all_kinds() {
    let cases: &[(&str, &str)] = &[
        ("model Foo { a: String }\nmodel Foo { b: String }",  "Foo"),
        ("schema Bar { a: String }\nmodel Bar { b: String }", "Bar"),
        ("enum Qux { A }\nmodel Qux { b: String }",           "Qux"),
        ("external Baz\nenum Baz { A }",                      "Baz"),
        ("model P { a: String }\nunion P = P",                "P"),
        ("external Dup\nexternal Dup",                        "Dup"),
    ];

    for &(source, expected) in cases {
        match sema_error_for_invalid_source(source) {
            Error::DuplicateName { name } => assert_eq!(name, expected),
            error => panic!("expected a duplicate-name error, found {}", error),
        }
    }
}

#[test]
fn primitives_resolve_first() {
    let sdir = sdir_for_valid_source(
        "model M {\n\
         a: String\n\
         b: Number\n\
         c: Boolean\n\
         d: Date\n\
         }"
    );

    assert_eq!(*field_type(&sdir, "M", "a"), DataType::Simple(SimpleType::String));
    assert_eq!(*field_type(&sdir, "M", "b"), DataType::Simple(SimpleType::Number));
    assert_eq!(*field_type(&sdir, "M", "c"), DataType::Simple(SimpleType::Boolean));
    assert_eq!(*field_type(&sdir, "M", "d"), DataType::Simple(SimpleType::Date));
}

#[test]
fn enum_reference_resolves() {
    let sdir = sdir_for_valid_source("enum Color { Red Green }\nmodel M { c: Color }");

    assert_eq!(
        *field_type(&sdir, "M", "c"),
        DataType::Simple(SimpleType::Enum("Color".to_owned())),
    );
    assert_eq!(sdir.enums["Color"].values, ["Red", "Green"]);
}

#[test]
fn bare_object_id_is_untyped() {
    let sdir = sdir_for_valid_source("model M { r: ObjectId }");

    assert_eq!(
        *field_type(&sdir, "M", "r"),
        DataType::Simple(SimpleType::ObjectId(Vec::new())),
    );
}

#[test]
fn model_reference_has_one_target() {
    let sdir = sdir_for_valid_source("model A { x: String }\nmodel M { a: A }");

    assert_eq!(
        *field_type(&sdir, "M", "a"),
        DataType::Simple(SimpleType::ObjectId(vec!["A".to_owned()])),
    );
}

#[test]
fn union_reference_carries_targets_in_order() {
    let sdir = sdir_for_valid_source(
        "model P { x: String }\n\
         model Q { x: String }\n\
         union U = Q | P\n\
         model M { u: U }"
    );

    assert_eq!(
        *field_type(&sdir, "M", "u"),
        DataType::Simple(SimpleType::ObjectId(vec!["Q".to_owned(), "P".to_owned()])),
    );
}

#[test]
fn schema_reference_resolves() {
    let sdir = sdir_for_valid_source("schema S { x: Number }\nmodel M { s: S }");

    assert_eq!(
        *field_type(&sdir, "M", "s"),
        DataType::Simple(SimpleType::Schema("S".to_owned())),
    );
}

#[test]
fn self_referential_schema_is_accepted() {
    let sdir = sdir_for_valid_source("schema Node {\nvalue: Number!\nnext: Node\n}");

    assert_eq!(
        sdir.schemas["Node"]["next"].data_type,
        DataType::Simple(SimpleType::Schema("Node".to_owned())),
    );
}

#[test]
fn containers_resolve_their_element() {
    let sdir = sdir_for_valid_source(
        "model M {\n\
         tags: [String!]!\n\
         attrs: Map<Number>\n\
         }"
    );

    assert_eq!(*field_type(&sdir, "M", "tags"), DataType::Array {
        element:          SimpleType::String,
        element_required: true,
    });
    assert!(sdir.models["M"].schema["tags"].is_required);

    assert_eq!(*field_type(&sdir, "M", "attrs"), DataType::Map {
        element:          SimpleType::Number,
        element_required: false,
    });
    assert!(!sdir.models["M"].schema["attrs"].is_required);
}

#[test]
fn directives_map_to_field_flags() {
    let sdir = sdir_for_valid_source(
        "model M { slug: String! @index @unique @immutable @validate }"
    );

    let field = &sdir.models["M"].schema["slug"];

    assert!(field.is_required);
    assert!(field.is_index);
    assert!(field.is_unique);
    assert!(field.is_immutable);
    assert!(field.is_validatable);
    assert!(!field.is_virtual);
}

#[test]
fn unknown_type_names_field_and_token() {
    match sema_error_for_invalid_source("model M { x: Whatever }") {
        Error::UnknownType { field, type_name } => {
            assert_eq!(field, "x");
            assert_eq!(type_name, "Whatever");
        },
        error => panic!("expected an unknown-type error, found {}", error),
    }
}

#[test]
fn union_members_must_be_models() {
    let source = "model P { x: String }\n\
                  schema Q { x: String }\n\
                  union U = P | Q | R";

    match sema_error_for_invalid_source(source) {
        Error::UnknownUnionMember { union, models } => {
            assert_eq!(union, "U");
            assert_eq!(models, ["Q", "R"]);
        },
        error => panic!("expected an unknown-union-member error, found {}", error),
    }
}

#[test]
fn external_fields_must_be_virtual() {
    let invalid = [
        "external W\nmodel M { w: W }",
        "external W\nmodel M { w: [W] }",
        "external W\nmodel M { w: Map<W> }",
        "external W\nschema S { w: W }",
    ];

    for source in &invalid {
        match sema_error_for_invalid_source(source) {
            Error::ExternalInPersistedField { field } => assert_eq!(field, "w"),
            error => panic!("expected an external-in-persisted-field error, found {}", error),
        }
    }

    let sdir = sdir_for_valid_source("external W\nmodel M { w: W @virtual }");
    let field = &sdir.models["M"].schema["w"];

    assert!(field.is_virtual);
    assert_eq!(field.data_type, DataType::Simple(SimpleType::External("W".to_owned())));
    assert_eq!(sdir.externals, ["W"]);
}

#[test]
fn duplicate_fields_within_a_body() {
    let source = "model M {\nx: String\nx: Number\n}";

    match sema_error_for_invalid_source(source) {
        Error::DuplicateField { field } => assert_eq!(field, "x"),
        error => panic!("expected a duplicate-field error, found {}", error),
    }
}

#[test]
fn externals_are_recorded_in_declaration_order() {
    let sdir = sdir_for_valid_source("external Zeta\nexternal Alpha");
    assert_eq!(sdir.externals, ["Zeta", "Alpha"]);
}
