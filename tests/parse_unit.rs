// tests/parse_unit.rs
//
// Parser behavior: package clause, declaration structure, doc-comment
// attachment, unknown type shapes, and the fatal error tier.

use go_builtin_doc::ast::{Decl, ValueKind};
use go_builtin_doc::{parse_unit, LoadError, Resolver};

#[test]
fn missing_package_clause_is_fatal() {
    let err = parse_unit("test.go", "const A = 1\n").unwrap_err();
    assert!(matches!(err, LoadError::NoPackageClause { .. }));

    let err = parse_unit("test.go", "").unwrap_err();
    assert!(matches!(err, LoadError::NoPackageClause { .. }));
}

#[test]
fn top_level_garbage_is_fatal() {
    let err = parse_unit("test.go", "package p\n@@@\n").unwrap_err();
    match err {
        LoadError::Syntax { diags, .. } => assert!(!diags.is_empty()),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn parses_declaration_kinds_in_order() {
    let src = "\
package builtin

const ok = 1

var n int

type rune int32

func f()
";
    let unit = parse_unit("test.go", src).expect("parses");
    assert_eq!(unit.resolve(unit.package_name), "builtin");
    assert_eq!(unit.decls.len(), 4);
    assert!(matches!(
        unit.decls[0],
        Decl::Value {
            kind: ValueKind::Const,
            ..
        }
    ));
    assert!(matches!(
        unit.decls[1],
        Decl::Value {
            kind: ValueKind::Var,
            ..
        }
    ));
    assert!(matches!(unit.decls[2], Decl::Type { .. }));
    assert!(matches!(unit.decls[3], Decl::Func(_)));
}

#[test]
fn doc_requires_adjacent_line() {
    // A blank line between comment and declaration breaks attachment.
    let src = "\
package builtin

// Orphaned comment.

func f()
";
    let unit = parse_unit("test.go", src).expect("parses");
    let Decl::Func(func) = &unit.decls[0] else {
        panic!("expected func")
    };
    assert_eq!(func.doc, None);
}

#[test]
fn trailing_comment_is_not_next_doc() {
    let src = "\
package builtin

const A = 1 // trailing, not B's doc
const B = 2
";
    let unit = parse_unit("test.go", src).expect("parses");
    let Decl::Value { specs, .. } = &unit.decls[1] else {
        panic!("expected value decl")
    };
    assert_eq!(specs[0].doc, None);
}

#[test]
fn multi_line_doc_joins_paragraph() {
    let src = "\
package builtin

// cap returns the capacity of v.
// The result is never negative.
func cap()
";
    let unit = parse_unit("test.go", src).expect("parses");
    let Decl::Func(func) = &unit.decls[0] else {
        panic!("expected func")
    };
    assert_eq!(
        func.doc.as_deref(),
        Some("cap returns the capacity of v.\nThe result is never negative.\n")
    );
}

#[test]
fn alias_flag_distinguishes_binding_style() {
    let src = "\
package builtin

type any = interface{}
type rune int32
";
    let unit = parse_unit("test.go", src).expect("parses");
    let Decl::Type { specs, .. } = &unit.decls[0] else {
        panic!("expected type decl")
    };
    assert!(specs[0].alias);
    let Decl::Type { specs, .. } = &unit.decls[1] else {
        panic!("expected type decl")
    };
    assert!(!specs[0].alias);
}

#[test]
fn function_body_is_skipped() {
    let src = "\
package builtin

func f() { panic(0) }

const after = 1
";
    let unit = parse_unit("test.go", src).expect("parses");
    assert_eq!(unit.decls.len(), 2);
    let mut resolver = Resolver::new(&unit);
    assert_eq!(resolver.resolve("after").unwrap().decl, "const after = 1");
}

#[test]
fn unknown_shape_degrades_and_diagnoses_on_render() {
    // struct{} is outside the variant set: the parse succeeds, the field
    // renders as its bare name, and exactly one diagnostic surfaces.
    let src = "package builtin\n\nfunc f(s struct{}) int\n";
    let unit = parse_unit("test.go", src).expect("unknown shapes still parse");

    let mut resolver = Resolver::new(&unit);
    let rec = resolver.resolve("f").expect("f resolves");
    assert_eq!(rec.decl, "func f(s) int");
    assert_eq!(resolver.take_diags().len(), 1);
}

#[test]
fn no_diagnostic_for_plain_absence() {
    let src = "package builtin\n\nfunc f(s struct{}) int\n";
    let unit = parse_unit("test.go", src).expect("parses");
    let mut resolver = Resolver::new(&unit);
    assert!(resolver.resolve("missing").is_none());
    // The unknown shape was never rendered, so no diagnostics either.
    assert!(resolver.take_diags().is_empty());
}

#[test]
fn type_parameter_list_is_dropped_from_signature() {
    let src = "package builtin\n\nfunc min[T cmp.Ordered](x T, y ...T) T\n";
    let unit = parse_unit("test.go", src).expect("parses");
    let mut resolver = Resolver::new(&unit);
    let rec = resolver.resolve("min").expect("min resolves");
    assert_eq!(rec.decl, "func min(x T, y ...T) T");
}

#[test]
fn constraint_operators_in_type_parameters_lex_cleanly() {
    let src = "package builtin\n\nfunc clear[T ~[]Type | ~map[Type]Type1](t T)\n";
    let unit = parse_unit("test.go", src).expect("parses");
    let mut resolver = Resolver::new(&unit);
    let rec = resolver.resolve("clear").expect("clear resolves");
    assert_eq!(rec.decl, "func clear(t T)");
    assert!(resolver.take_diags().is_empty());
}

#[test]
fn receiver_fields_parse_into_func_decl() {
    let src = "package builtin\n\nfunc (r Reader) Read(p []byte) (n int, err error)\n";
    let unit = parse_unit("test.go", src).expect("parses");
    let Decl::Func(func) = &unit.decls[0] else {
        panic!("expected func")
    };
    assert_eq!(func.recv.len(), 1);
    assert_eq!(func.signature.params.len(), 1);
    assert_eq!(func.signature.results.len(), 2);
}

#[test]
fn interface_methods_parse_in_order() {
    let src = "\
package builtin

type error interface {
\tError() string
\tUnwrap() error
}
";
    let unit = parse_unit("test.go", src).expect("parses");
    let mut resolver = Resolver::new(&unit);
    let rec = resolver.resolve("error").expect("error resolves");
    assert_eq!(
        rec.decl,
        "type error interface {\n\tError() string\n\tUnwrap() error\n}"
    );
}

#[test]
fn positions_are_one_based_file_line_column() {
    let src = "package builtin\nconst A = 1\n";
    let unit = parse_unit("test.go", src).expect("parses");
    let Decl::Value { specs, .. } = &unit.decls[0] else {
        panic!("expected value decl")
    };
    assert_eq!(unit.position(specs[0].names[0].pos), "test.go:2:7");
}
