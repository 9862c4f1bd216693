use codemark_engine::{AnnotationKind, BuildOptions, Builder, Code, PackageDoc};
use codemark_syntax::PackageScope;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Print and annotate the last declaration of `src`.
fn annotate_last(src: &str) -> Code {
    let mut builder = Builder::new(BuildOptions::default());
    builder.add_source("p.go", src);
    let pkg = builder.parse_sources();
    let file = &pkg.files[0].file;
    assert!(pkg.files[0].errors.is_empty(), "{:?}", pkg.files[0].errors);
    let scope = PackageScope::new([file]);
    let decl = file.decls.last().expect("a declaration");
    builder.print_decl(decl, &scope)
}

fn found(code: &Code) -> Vec<(&str, AnnotationKind)> {
    code.annotations
        .iter()
        .map(|a| (code.slice(a), a.kind))
        .collect()
}

use AnnotationKind::{Anchor, Builtin, Comment, Link, PackageLink};

#[rstest]
#[case::type_spec("type ID string", vec![("string", Builtin)])]
#[case::method(
    "type T int\n\nfunc (t *T) Get(key string) (T, error)",
    vec![("T", Link), ("string", Builtin), ("T", Link), ("error", Builtin)]
)]
#[case::value_spec("const Max, Min = 10, -10", vec![("Max", Anchor), ("Min", Anchor)])]
#[case::typed_value(
    "type Options struct{}\n\nvar Default Options = Options{}",
    vec![("Default", Anchor), ("Options", Link), ("Options", Link)]
)]
#[case::import_alias("import f \"fmt\"", vec![])]
#[case::package_selector(
    "import \"net/http\"\n\nvar H http.Handler",
    vec![("H", Anchor), ("http", PackageLink), ("Handler", Link)]
)]
#[case::interop_selector(
    "import \"C\"\n\nvar Size C.size_t",
    vec![("Size", Anchor), ("C", PackageLink)]
)]
#[case::field_selector(
    "type T struct{ F int }\n\nvar X = T{}.F",
    vec![("X", Anchor), ("T", Link)]
)]
#[case::undeclared_identifier("var X = foo", vec![("X", Anchor)])]
#[case::builtin_function("var N = len(\"ab\")", vec![("N", Anchor), ("len", Builtin)])]
#[case::unexported_type("type t int\n\nvar X t", vec![("X", Anchor)])]
#[case::statements_and_labels(
    "func F() {\nloop:\n\tfor i := range 10 {\n\t\tprintln(i)\n\t\tbreak loop\n\t}\n}",
    vec![("println", Builtin)]
)]
#[case::struct_members(
    "type Point struct {\n\tX, Y  int\n\tlabel string\n}",
    vec![("X", Anchor), ("Y", Anchor), ("int", Builtin), ("label", Anchor), ("string", Builtin)]
)]
#[case::interface_methods(
    "type R interface {\n\tRead(p []byte) (int, error)\n}",
    vec![("Read", Anchor), ("byte", Builtin), ("int", Builtin), ("error", Builtin)]
)]
#[case::type_parameters(
    "type List[T any] struct {\n\tnext *List[T]\n}",
    vec![("next", Anchor), ("List", Link)]
)]
#[case::hex_float_literal(
    "const N = 1\n\nvar X = 0x1.8p1 * N",
    vec![("X", Anchor), ("N", Link)]
)]
#[case::block_comment_between_fields(
    "type T struct {\n\tX int /* x */\n\tY string\n}",
    vec![("X", Anchor), ("int", Builtin), ("/* x */", Comment), ("Y", Anchor), ("string", Builtin)]
)]
fn annotations_follow_printed_order(
    #[case] decls: &str,
    #[case] expected: Vec<(&str, AnnotationKind)>,
) {
    let code = annotate_last(&format!("package p\n\n{decls}\n"));
    assert_eq!(found(&code), expected, "in {:?}", code.text);
}

#[test]
fn package_links_carry_import_paths() {
    let code = annotate_last(
        "package p\n\nimport (\n\t\"io\"\n\tpath \"path/filepath\"\n)\n\nfunc Walk(root string, r io.Reader) path.WalkFunc\n",
    );
    assert_eq!(code.text, "func Walk(root string, r io.Reader) path.WalkFunc");
    assert_eq!(code.paths, vec!["io", "path/filepath"]);
    let paths: Vec<_> = code
        .annotations
        .iter()
        .map(|a| (code.link_name(a), code.path(a)))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("string", None),
            ("io", Some("io")),
            ("Reader", Some("io")),
            ("path", Some("path/filepath")),
            ("WalkFunc", Some("path/filepath")),
        ]
    );
}

#[test]
fn comments_in_struct_bodies_are_annotated() {
    let code = annotate_last(
        "package p\n\ntype Config struct {\n\t// Name identifies the config.\n\tName string // required\n}\n",
    );
    let comments: Vec<_> = found(&code)
        .into_iter()
        .filter(|(_, kind)| *kind == AnnotationKind::Comment)
        .map(|(text, _)| text)
        .collect();
    assert_eq!(comments, vec!["// Name identifies the config.", "// required"]);
}

#[test]
fn block_comments_keep_the_package_intact() {
    const SRC: &str = "/* Copyright 2024 */\n\n// Package p does things.\npackage p\n\n// T is a pair.\ntype T struct {\n\tX int /* x */\n\tY string\n}\n";
    let mut checked = Builder::new(BuildOptions::default());
    checked.add_source("p.go", SRC);
    let pkg = checked.parse_sources();
    assert!(!pkg.has_errors(), "{:?}", pkg.files[0].errors);

    let mut builder = Builder::new(BuildOptions::default());
    builder.add_source("p.go", SRC);
    let doc = builder.build_package("example.com/p");
    assert_eq!(doc.name, "p");
    assert_eq!(doc.doc, "Package p does things.\n");
    let t = doc.type_named("T").expect("T documented");
    assert!(t.decl.text.contains("/* x */"), "{:?}", t.decl.text);
    assert!(t.decl.text.contains("Y string"), "{:?}", t.decl.text);
}

#[test]
fn hex_float_constants_print_whole() {
    let code = annotate_last("package p\n\nconst X = 0x1p-2\n");
    assert_eq!(code.text, "const X = 0x1p-2");
    assert_eq!(found(&code), vec![("X", Anchor)]);
}

const PACKAGE: &str = r#"// Package store keeps things.
package store

import (
	"context"
	"errors"
	"sync"
)

// ErrNotFound is returned for missing keys.
var ErrNotFound = errors.New("not found")

const (
	// DefaultSize is the initial capacity.
	DefaultSize = 16
	maxSize     = 1 << 20
)

// Store is a concurrent map.
type Store[K comparable, V any] struct {
	mu    sync.RWMutex
	items map[K]V // guarded by mu
	Hooks []func(ctx context.Context, key K) error
}

// New returns an empty store.
func New[K comparable, V any]() *Store[K, V] {
	return &Store[K, V]{items: make(map[K]V, DefaultSize)}
}

// Get looks a key up.
func (s *Store[K, V]) Get(ctx context.Context, key K) (V, error) {
	s.mu.RLock()
	defer s.mu.RUnlock()
	v, ok := s.items[key]
	if !ok {
		return v, ErrNotFound
	}
	return v, nil
}
"#;

fn build_store() -> PackageDoc {
    let mut builder = Builder::new(BuildOptions::default());
    builder.add_source("store.go", PACKAGE);
    builder.build_package("example.com/store")
}

fn all_code(doc: &PackageDoc) -> Vec<&Code> {
    let mut code = Vec::new();
    code.extend(doc.consts.iter().map(|v| &v.decl));
    code.extend(doc.vars.iter().map(|v| &v.decl));
    code.extend(doc.funcs.iter().map(|f| &f.decl));
    for ty in &doc.types {
        code.push(&ty.decl);
        code.extend(ty.funcs.iter().map(|f| &f.decl));
        code.extend(ty.methods.iter().map(|f| &f.decl));
    }
    code
}

#[test]
fn annotations_are_sorted_disjoint_and_in_bounds() {
    let doc = build_store();
    let code = all_code(&doc);
    assert_eq!(code.len(), 5);
    for c in code {
        let mut last_end = 0;
        for a in &c.annotations {
            assert!(a.pos >= last_end, "overlap in {:?}", c.text);
            assert!(a.pos < a.end && a.end <= c.text.len());
            assert!(c.text.is_char_boundary(a.pos) && c.text.is_char_boundary(a.end));
            if let Some(i) = a.path_index {
                assert!(i < c.paths.len());
            }
            last_end = a.end;
        }
    }
}

#[test]
fn segments_reassemble_the_text() {
    let doc = build_store();
    for c in all_code(&doc) {
        let joined: String = c.segments().into_iter().map(|(_, s)| s).collect();
        assert_eq!(joined, c.text);
    }
}

#[test]
fn building_twice_gives_the_same_documentation() {
    assert_eq!(build_store(), build_store());
}

#[test]
fn generic_package_is_documented() {
    let doc = build_store();
    let store = doc.type_named("Store").expect("Store documented");
    assert_eq!(store.funcs[0].name, "New");
    assert_eq!(store.methods[0].name, "Get");
    assert_eq!(
        store.methods[0].decl.text,
        "func (s *Store[K, V]) Get(ctx context.Context, key K) (V, error)"
    );
    insta::assert_snapshot!(store.decl.text, @r"
    type Store[K comparable, V any] struct {
        mu    sync.RWMutex
        items map[K]V // guarded by mu
        Hooks []func(ctx context.Context, key K) error
    }
    ");
    assert_eq!(doc.vars[0].names, vec!["ErrNotFound"]);
    assert_eq!(doc.consts[0].decl.text, "const (\n    // DefaultSize is the initial capacity.\n    DefaultSize = 16\n)");
}

#[test]
fn positions_point_into_registered_files() {
    let doc = build_store();
    let store = doc.type_named("Store").expect("Store documented");
    assert_eq!(store.pos.file, Some(0));
    assert_eq!(store.pos.line, 20);
    assert_eq!(store.pos.line_span, Some(4));
    assert_eq!(doc.files[0], "store.go");
}

#[test]
fn serializes_to_json() {
    let code = annotate_last("package p\n\nimport \"io\"\n\nvar R io.Reader\n");
    let json = serde_json::to_value(&code).expect("serializable");
    assert_eq!(
        json,
        serde_json::json!({
            "text": "var R io.Reader",
            "annotations": [
                {"pos": 4, "end": 5, "kind": "anchor"},
                {"pos": 6, "end": 8, "kind": "package_link", "path_index": 0},
                {"pos": 9, "end": 15, "kind": "link", "path_index": 0},
            ],
            "paths": ["io"],
        })
    );
}
