//! Annotated declaration text.

use std::ops::Range;

use serde::Serialize;

/// What an annotated range of [`Code::text`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// Reference to an exported declaration, in this package or in the
    /// package named by `path_index`.
    Link,
    /// A name declared by this declaration: a field, method, constant or
    /// variable.
    Anchor,
    Comment,
    /// Reference to the imported package named by `path_index`.
    PackageLink,
    /// Reference to a predeclared identifier such as `int` or `len`.
    Builtin,
}

impl AnnotationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationKind::Link => "link",
            AnnotationKind::Anchor => "anchor",
            AnnotationKind::Comment => "comment",
            AnnotationKind::PackageLink => "package_link",
            AnnotationKind::Builtin => "builtin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub pos: usize,
    pub end: usize,
    pub kind: AnnotationKind,
    /// Index into [`Code::paths`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_index: Option<usize>,
}

impl Annotation {
    pub fn range(&self) -> Range<usize> {
        self.pos..self.end
    }
}

/// Rendered text of one declaration or example with its annotations.
///
/// Annotations are sorted by `pos`, never overlap, and lie within `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Code {
    pub text: String,
    pub annotations: Vec<Annotation>,
    /// Import paths referenced from the text, in order of first use.
    pub paths: Vec<String>,
}

impl Code {
    /// A `Code` carrying a diagnostic in place of the rendering.
    pub fn from_error(err: &dyn std::fmt::Display) -> Self {
        Self {
            text: err.to_string(),
            ..Self::default()
        }
    }

    /// The annotated slice of the text.
    pub fn slice(&self, annotation: &Annotation) -> &str {
        self.text.get(annotation.range()).unwrap_or_default()
    }

    pub fn path(&self, annotation: &Annotation) -> Option<&str> {
        annotation
            .path_index
            .and_then(|i| self.paths.get(i))
            .map(String::as_str)
    }

    /// The name a link points at within its package: the text after the
    /// last `.` of the annotated slice.
    pub fn link_name(&self, annotation: &Annotation) -> &str {
        let text = self.slice(annotation);
        text.rsplit('.').next().unwrap_or(text)
    }

    /// Split the text into consecutive pieces, each either plain or covered
    /// by one annotation. Concatenating the pieces yields the text.
    pub fn segments(&self) -> Vec<(Option<&Annotation>, &str)> {
        let mut segments = Vec::with_capacity(self.annotations.len() * 2 + 1);
        let mut last = 0;
        for annotation in &self.annotations {
            if annotation.pos > last {
                segments.push((None, &self.text[last..annotation.pos]));
            }
            segments.push((Some(annotation), self.slice(annotation)));
            last = annotation.end;
        }
        if last < self.text.len() {
            segments.push((None, &self.text[last..]));
        }
        segments
    }
}
