//! Runnable examples: collection from test files and display formatting.
//!
//! An example is a function `ExampleXxx()` in a `_test` file. Its body is
//! shown without the wrapping braces, and a trailing `// Output:` comment
//! is split off as the expected output.

use std::sync::OnceLock;

use codemark_syntax::ast::{BlockStmt, CommentGroup, Decl, File};
use regex::Regex;

use super::Builder;
use crate::annotate::correlate;
use crate::models::Code;

/// An example function found in a test file.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Name with the `Example` prefix removed.
    pub name: String,
    pub doc: String,
    pub body: BlockStmt,
    /// Comment groups inside the body.
    pub comments: Vec<CommentGroup>,
    /// Text of the output comment, markers and prefix removed.
    pub output: String,
    pub has_output: bool,
    pub unordered: bool,
}

/// `// Output:` anywhere in printed example text.
fn output_sentinel() -> &'static Regex {
    static SENTINEL: OnceLock<Regex> = OnceLock::new();
    SENTINEL.get_or_init(|| {
        Regex::new(r"(?i)//[[:space:]]*(unordered )?output:")
            .expect("Invalid output sentinel regex")
    })
}

/// `Output:` at the start of comment text.
fn output_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"(?i)^[[:space:]]*(unordered )?output:")
            .expect("Invalid output prefix regex")
    })
}

/// Examples declared in `file`, in source order.
pub fn collect_examples(file: &File) -> Vec<Example> {
    let mut examples = Vec::new();
    for decl in &file.decls {
        let Decl::Func(func) = decl else {
            continue;
        };
        let Some(name) = example_suffix(&func.name.name) else {
            continue;
        };
        let Some(body) = &func.body else {
            continue;
        };
        let no_results = func.ty.results.as_ref().is_none_or(|r| r.list.is_empty());
        if func.recv.is_some() || !func.ty.params.list.is_empty() || !no_results {
            log::debug!("skipping {}: examples take no arguments", func.name.name);
            continue;
        }
        let comments = file.comments_within(body.span());
        let (output, has_output, unordered) = match example_output(&comments) {
            Some((output, unordered)) => (output, true, unordered),
            None => (String::new(), false, false),
        };
        examples.push(Example {
            name: name.to_string(),
            doc: func.doc.as_ref().map(CommentGroup::text).unwrap_or_default(),
            body: body.clone(),
            comments,
            output,
            has_output,
            unordered,
        });
    }
    examples
}

/// `Example`, `ExampleF`, `ExampleT_M`, `Example_suffix`: the part after
/// `Example`, provided it does not continue a lowercase word.
fn example_suffix(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("Example")?;
    match rest.chars().next() {
        Some(c) if c.is_lowercase() => None,
        _ => Some(rest),
    }
}

/// The expected output from the last comment group of an example body.
fn example_output(comments: &[CommentGroup]) -> Option<(String, bool)> {
    let text = comments.last()?.text();
    let found = output_prefix().captures(&text)?;
    let unordered = found.get(1).is_some();
    let rest = text[found.get(0)?.end()..].trim_start_matches(' ');
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    Some((rest.to_string(), unordered))
}

/// Unwrap a printed example body: drop the outer braces and one level of
/// indentation. When an output comment is present the text is cut before
/// it and trimmed; otherwise the surrounding newlines stay. `None` if
/// `text` is not a braced block.
pub fn format_example_text(text: &str, tab_width: usize) -> Option<String> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    let indent = format!("\n{}", " ".repeat(tab_width));
    let body = inner.replace(&indent, "\n");
    match output_sentinel().find(&body) {
        Some(found) => Some(body[..found.start()].trim().to_string()),
        None => Some(body),
    }
}

impl Builder {
    /// Render an example body with its comments.
    ///
    /// When the rendering is a braced block it is unwrapped with
    /// [`format_example_text`]. Otherwise the output comment is still part
    /// of the displayed code, so `output` is cleared. Only comments are
    /// annotated.
    pub fn print_example(
        &mut self,
        body: &BlockStmt,
        comments: &[CommentGroup],
        output: &mut String,
    ) -> Code {
        if let Err(code) = self.render("example", |printer, buf| {
            printer.print_block(body, comments, buf)
        }) {
            return code;
        }
        let text = match format_example_text(&self.buf, self.options.printer.tab_width) {
            Some(text) => text,
            None => {
                output.clear();
                self.buf.clone()
            }
        };
        Code {
            annotations: correlate::comments(&text),
            text,
            paths: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildOptions;
    use crate::models::AnnotationKind;
    use codemark_syntax::{FileSet, parse_file};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn output_comment_is_cut_from_block() {
        let out = format_example_text("{\n    call()\n    // Output:\n    // result\n}", 4);
        assert_eq!(out.as_deref(), Some("call()"));
    }

    #[rstest]
    #[case("{\n    a()\n    b()\n}", Some("\na()\nb()\n"))]
    #[case("{\n    a()\n    // unordered output: x\n}", Some("a()"))]
    #[case("{\n    a()\n    //OUTPUT:\n}", Some("a()"))]
    #[case("{\n    if x {\n        y()\n    }\n    // Output: z\n}", Some("if x {\n    y()\n}"))]
    #[case("{\n    if x {\n        y()\n    }\n}", Some("\nif x {\n    y()\n}\n"))]
    #[case("{}", Some(""))]
    #[case("x()", None)]
    #[case("{", None)]
    fn unwrapping(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(format_example_text(text, 4).as_deref(), expected);
    }

    #[rstest]
    #[case("Example", Some(""))]
    #[case("ExampleReader", Some("Reader"))]
    #[case("ExampleReader_Read", Some("Reader_Read"))]
    #[case("Example_second", Some("_second"))]
    #[case("Examples", None)]
    #[case("TestExample", None)]
    fn example_names(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(example_suffix(name), expected);
    }

    const TEST_FILE: &str = "package p_test\n\nimport \"fmt\"\n\n// ExampleHello greets.\nfunc ExampleHello() {\n\tfmt.Println(\"hello\") // greet\n\t// Output:\n\t// hello\n}\n\nfunc ExampleSort() {\n\tfmt.Println(2, 1)\n\t// Unordered output: 1\n\t// 2\n}\n\nfunc ExampleBad(t int) {}\n\nfunc ExampleNoOutput() {\n\tfmt.Println()\n}\n";

    #[test]
    fn collects_examples_with_output() {
        let mut fset = FileSet::new();
        let file = parse_file(&mut fset, "p_test.go", TEST_FILE).file;
        let examples = collect_examples(&file);
        let names: Vec<_> = examples.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Hello", "Sort", "NoOutput"]);

        assert_eq!(examples[0].doc, "ExampleHello greets.\n");
        assert_eq!(examples[0].output, "hello\n");
        assert!(examples[0].has_output && !examples[0].unordered);
        assert_eq!(examples[1].output, "1\n2\n");
        assert!(examples[1].unordered);
        assert!(!examples[2].has_output);
    }

    #[test]
    fn print_example_shows_code_without_output() {
        let mut builder = Builder::new(BuildOptions::default());
        builder.add_source("p_test.go", TEST_FILE);
        let pkg = builder.parse_sources();
        let examples = collect_examples(&pkg.files[0].file);

        let mut output = examples[0].output.clone();
        let code = builder.print_example(&examples[0].body, &examples[0].comments, &mut output);
        assert_eq!(code.text, "fmt.Println(\"hello\") // greet");
        assert_eq!(output, "hello\n");
        assert_eq!(code.annotations.len(), 1);
        assert_eq!(code.annotations[0].kind, AnnotationKind::Comment);
        assert_eq!(code.slice(&code.annotations[0]), "// greet");
        assert!(code.paths.is_empty());
    }
}
