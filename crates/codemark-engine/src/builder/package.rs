//! Assembling a [`PackageDoc`] from the registered sources.

use codemark_syntax::PackageScope;
use codemark_syntax::ast::{
    CommentGroup, Decl, DeclKeyword, Expr, FuncDecl, GenDecl, Spec, TypeSpec, is_exported,
};

use super::{Builder, ParsedPackage, collect_examples};
use crate::models::{ExampleDoc, FuncDoc, PackageDoc, TypeDoc, ValueDoc};

fn doc_text(doc: Option<&CommentGroup>) -> String {
    doc.map(CommentGroup::text).unwrap_or_default()
}

impl Builder {
    /// Parse the registered sources and document the package's exported
    /// declarations.
    ///
    /// Files named `*_test.go` contribute examples only. Files with syntax
    /// errors are documented from whatever was recovered.
    pub fn build_package(&mut self, import_path: &str) -> PackageDoc {
        let parsed = self.parse_sources();
        let scope = PackageScope::new(parsed.package_files().map(|f| &f.file));

        let mut doc = PackageDoc {
            import_path: import_path.to_string(),
            files: self.sources.iter().map(|s| s.name.clone()).collect(),
            ..PackageDoc::default()
        };
        if let Some(first) = parsed.package_files().next() {
            doc.name = first.file.name.name.clone();
        }
        doc.doc = parsed
            .package_files()
            .find_map(|f| f.file.doc.as_ref())
            .map(CommentGroup::text)
            .unwrap_or_default();

        let mut funcs = Vec::new();
        for source in parsed.package_files() {
            for decl in &source.file.decls {
                match decl {
                    Decl::Gen(gen_decl) => match gen_decl.keyword {
                        DeclKeyword::Const => doc.consts.extend(self.value_doc(gen_decl, &scope)),
                        DeclKeyword::Var => doc.vars.extend(self.value_doc(gen_decl, &scope)),
                        DeclKeyword::Type => {
                            let types = self.type_docs(gen_decl, &scope);
                            doc.types.extend(types);
                        }
                        DeclKeyword::Import => {}
                    },
                    Decl::Func(func) if func.name.is_exported() => funcs.push(func),
                    Decl::Func(_) | Decl::Bad(_) => {}
                }
            }
        }

        for func in funcs {
            let func_doc = self.func_doc(func, &scope);
            match func.receiver_type_name() {
                Some(recv) => match doc.types.iter_mut().find(|t| t.name == recv) {
                    Some(ty) => ty.methods.push(func_doc),
                    None => log::debug!("skipping method {recv}.{}", func_doc.name),
                },
                None => match constructed_type(func).and_then(|name| {
                    doc.types.iter_mut().find(|t| t.name == name)
                }) {
                    Some(ty) => ty.funcs.push(func_doc),
                    None => doc.funcs.push(func_doc),
                },
            }
        }

        if self.options.include_examples {
            self.attach_examples(&parsed, &mut doc);
        }
        log::debug!(
            "documented {import_path}: {} consts, {} vars, {} funcs, {} types",
            doc.consts.len(),
            doc.vars.len(),
            doc.funcs.len(),
            doc.types.len()
        );
        doc
    }

    /// The exported specs of a `const` or `var` declaration, printed as one
    /// declaration.
    fn value_doc(&mut self, decl: &GenDecl, scope: &PackageScope) -> Option<ValueDoc> {
        let specs: Vec<Spec> = decl
            .specs
            .iter()
            .filter(|spec| match spec {
                Spec::Value(value) => value.names.iter().any(|n| n.is_exported()),
                _ => false,
            })
            .cloned()
            .collect();
        if specs.is_empty() {
            return None;
        }
        let names = specs
            .iter()
            .filter_map(|spec| match spec {
                Spec::Value(value) => Some(value),
                _ => None,
            })
            .flat_map(|value| &value.names)
            .filter(|n| n.is_exported())
            .map(|n| n.name.clone())
            .collect();
        let shown = Decl::Gen(GenDecl {
            specs,
            ..decl.clone()
        });
        log::debug!("printing {} declaration", decl.keyword.as_str());
        Some(ValueDoc {
            names,
            doc: doc_text(decl.doc.as_ref()),
            decl: self.print_decl(&shown, scope),
            pos: self.position(decl.span()),
        })
    }

    /// One entry per exported type, each printed as its own declaration.
    fn type_docs(&mut self, decl: &GenDecl, scope: &PackageScope) -> Vec<TypeDoc> {
        let mut docs = Vec::new();
        for spec in &decl.specs {
            let Spec::Type(ty) = spec else {
                continue;
            };
            if !ty.name.is_exported() {
                continue;
            }
            let doc = match (&ty.doc, decl.specs.len()) {
                (Some(doc), _) => doc.text(),
                (None, 1) => doc_text(decl.doc.as_ref()),
                (None, _) => String::new(),
            };
            let shown = single_type_decl(decl, ty);
            log::debug!("printing type {}", ty.name.name);
            docs.push(TypeDoc {
                name: ty.name.name.clone(),
                doc,
                decl: self.print_decl(&shown, scope),
                pos: self.position(ty.span()),
                funcs: Vec::new(),
                methods: Vec::new(),
                examples: Vec::new(),
            });
        }
        docs
    }

    fn func_doc(&mut self, func: &FuncDecl, scope: &PackageScope) -> FuncDoc {
        log::debug!("printing func {}", func.name.name);
        let source = if self.options.include_source {
            self.print_source(func)
        } else {
            None
        };
        FuncDoc {
            name: func.name.name.clone(),
            recv: func.receiver_type_name().map(str::to_string),
            doc: doc_text(func.doc.as_ref()),
            decl: self.print_decl(&Decl::Func(func.signature()), scope),
            pos: self.position(func.span()),
            source,
            examples: Vec::new(),
        }
    }

    fn attach_examples(&mut self, parsed: &ParsedPackage, doc: &mut PackageDoc) {
        for source in parsed.test_files() {
            for example in collect_examples(&source.file) {
                let mut output = example.output.clone();
                let code = self.print_example(&example.body, &example.comments, &mut output);
                let example_doc = ExampleDoc {
                    name: example.name.clone(),
                    doc: example.doc,
                    code,
                    output,
                    unordered: example.unordered,
                };
                if let Err(dropped) = attach_example(doc, example_doc) {
                    log::debug!("no declaration for Example{}", dropped.name);
                }
            }
        }
    }
}

/// `type T ...` on its own, without the surrounding group.
fn single_type_decl(decl: &GenDecl, ty: &TypeSpec) -> Decl {
    Decl::Gen(GenDecl {
        doc: None,
        keyword: decl.keyword,
        keyword_pos: decl.keyword_pos,
        lparen: None,
        specs: vec![Spec::Type(ty.clone())],
        rparen: None,
    })
}

/// The type a function constructs: the name of its first result, with a
/// pointer and type arguments stripped, if that is an exported identifier.
fn constructed_type(func: &FuncDecl) -> Option<&str> {
    let mut ty = &func.ty.results.as_ref()?.list.first()?.ty;
    loop {
        ty = match ty {
            Expr::Star { x, .. } | Expr::Index { x, .. } => x,
            Expr::Ident(id) if id.is_exported() => return Some(&id.name),
            _ => return None,
        };
    }
}

/// The declaration an example name refers to, with any lowercase
/// `_suffix` removed: `Reader_Read_first` yields `Reader_Read`.
fn example_target(name: &str) -> &str {
    match name.rfind('_') {
        Some(i) if name[i + 1..].starts_with(char::is_lowercase) => &name[..i],
        _ => name,
    }
}

fn attach_example(doc: &mut PackageDoc, example: ExampleDoc) -> Result<(), ExampleDoc> {
    let target = example_target(&example.name).to_string();
    if target.is_empty() {
        doc.examples.push(example);
        return Ok(());
    }
    if let Some(func) = doc.funcs.iter_mut().find(|f| f.name == target) {
        func.examples.push(example);
        return Ok(());
    }
    if let Some(ty) = doc.types.iter_mut().find(|t| t.name == target) {
        ty.examples.push(example);
        return Ok(());
    }
    if let Some(ctor) = doc
        .types
        .iter_mut()
        .flat_map(|t| t.funcs.iter_mut())
        .find(|f| f.name == target)
    {
        ctor.examples.push(example);
        return Ok(());
    }
    if let Some((ty_name, method)) = target.split_once('_')
        && is_exported(method)
        && let Some(m) = doc
            .types
            .iter_mut()
            .filter(|t| t.name == ty_name)
            .flat_map(|t| t.methods.iter_mut())
            .find(|m| m.name == method)
    {
        m.examples.push(example);
        return Ok(());
    }
    Err(example)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildOptions, Builder};
    use crate::models::AnnotationKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const LIB: &str = r#"// Package shapes measures things.
package shapes

import "math"

// Unit of measure.
const (
	Metre = 1
	inch  = 0.0254
)

var defaultShape = Circle{}

// Shape has an area.
type Shape interface {
	Area() float64
}

type (
	// Circle is round.
	Circle struct {
		R float64
	}
	square struct{ side float64 }
)

// NewCircle makes a circle.
func NewCircle(r float64) *Circle {
	return &Circle{R: r}
}

// Area of the circle.
func (c Circle) Area() float64 {
	return math.Pi * c.R * c.R
}

func (s square) Area() float64 { return s.side * s.side }

// Total sums areas.
func Total(shapes ...Shape) float64 {
	return 0
}

func helper() {}
"#;

    const TESTS: &str = "package shapes_test\n\nimport \"fmt\"\n\nfunc Example() {\n\tfmt.Println(1)\n\t// Output: 1\n}\n\nfunc ExampleCircle_Area() {\n\tfmt.Println(3.14)\n\t// Output:\n\t// 3.14\n}\n\nfunc ExampleTotal_empty() {\n\tfmt.Println(0)\n}\n\nfunc ExampleNewCircle() {}\n\nfunc ExampleMissing() {}\n";

    fn build(options: BuildOptions) -> PackageDoc {
        let mut builder = Builder::new(options);
        builder.add_source("shapes.go", LIB);
        builder.add_source("shapes_test.go", TESTS);
        builder.build_package("example.com/shapes")
    }

    #[test]
    fn package_level_declarations() {
        let doc = build(BuildOptions::default());
        assert_eq!(doc.name, "shapes");
        assert_eq!(doc.doc, "Package shapes measures things.\n");
        assert_eq!(doc.files, vec!["shapes.go", "shapes_test.go"]);

        assert_eq!(doc.consts.len(), 1);
        assert_eq!(doc.consts[0].names, vec!["Metre"]);
        assert_eq!(doc.consts[0].doc, "Unit of measure.\n");
        assert_eq!(doc.consts[0].decl.text, "const (\n    Metre = 1\n)");
        assert!(doc.vars.is_empty());

        let names: Vec<_> = doc.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Shape", "Circle"]);
        let funcs: Vec<_> = doc.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(funcs, vec!["Total"]);
    }

    #[test]
    fn types_collect_constructors_and_methods() {
        let doc = build(BuildOptions::default());
        let circle = doc.type_named("Circle").unwrap();
        assert_eq!(circle.doc, "Circle is round.\n");
        assert_eq!(circle.decl.text, "type Circle struct {\n    R float64\n}");
        assert_eq!(circle.funcs[0].name, "NewCircle");
        assert_eq!(circle.methods[0].name, "Area");
        assert_eq!(circle.methods[0].recv.as_deref(), Some("Circle"));
        assert_eq!(circle.methods[0].decl.text, "func (c Circle) Area() float64");

        let snippet = circle.methods[0].source.as_ref().unwrap();
        assert_eq!(snippet.line, 33);
        assert!(snippet.text.starts_with("func (c Circle) Area() float64 {\n"));
        assert!(snippet.text.ends_with("}\n"));

        let links: Vec<_> = circle.funcs[0]
            .decl
            .annotations
            .iter()
            .filter(|a| a.kind == AnnotationKind::Link)
            .map(|a| circle.funcs[0].decl.slice(a))
            .collect();
        assert_eq!(links, vec!["Circle"]);
    }

    #[test]
    fn examples_attach_by_name() {
        let doc = build(BuildOptions::default());
        assert_eq!(doc.examples.len(), 1);
        assert_eq!(doc.examples[0].code.text, "fmt.Println(1)");
        assert_eq!(doc.examples[0].output, "1\n");

        let circle = doc.type_named("Circle").unwrap();
        assert_eq!(circle.methods[0].examples[0].output, "3.14\n");
        assert_eq!(circle.funcs[0].examples.len(), 1);

        let total = doc.func_named("Total").unwrap();
        assert_eq!(total.examples[0].name, "Total_empty");
        assert_eq!(total.examples[0].output, "");
    }

    #[test]
    fn options_turn_off_sources_and_examples() {
        let doc = build(BuildOptions {
            include_source: false,
            include_examples: false,
            ..BuildOptions::default()
        });
        assert!(doc.examples.is_empty());
        assert!(doc.func_named("Total").unwrap().source.is_none());
        assert!(doc.func_named("Total").unwrap().examples.is_empty());
    }

    #[rstest]
    #[case("", "")]
    #[case("_second", "")]
    #[case("Reader", "Reader")]
    #[case("Reader_Read", "Reader_Read")]
    #[case("Reader_Read_first", "Reader_Read")]
    #[case("F_x", "F")]
    fn example_targets(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(example_target(name), expected);
    }
}
