//! Documentation records for a package and its declarations.

use serde::Serialize;

use super::{Code, Pos};

/// Raw source text of a function, for "view source" displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSnippet {
    pub text: String,
    pub filename: String,
    /// 1-based line of the first line in `text`.
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleDoc {
    /// Suffix after `Example`: empty for the package example, `F` for
    /// function `F`, `T_M` for method `M` of `T`, plus any `_suffix`.
    pub name: String,
    pub doc: String,
    pub code: Code,
    /// Expected output; empty when the example has none or the body could
    /// not be shown without its output comment.
    pub output: String,
    pub unordered: bool,
}

/// A `const` or `var` declaration group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueDoc {
    pub names: Vec<String>,
    pub doc: String,
    pub decl: Code,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuncDoc {
    pub name: String,
    /// Receiver base type name, for methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv: Option<String>,
    pub doc: String,
    pub decl: Code,
    pub pos: Pos,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSnippet>,
    pub examples: Vec<ExampleDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDoc {
    pub name: String,
    pub doc: String,
    pub decl: Code,
    pub pos: Pos,
    /// Functions returning this type.
    pub funcs: Vec<FuncDoc>,
    pub methods: Vec<FuncDoc>,
    pub examples: Vec<ExampleDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageDoc {
    pub import_path: String,
    pub name: String,
    pub doc: String,
    /// Registered file names, indexed by [`Pos::file`].
    pub files: Vec<String>,
    pub consts: Vec<ValueDoc>,
    pub vars: Vec<ValueDoc>,
    pub funcs: Vec<FuncDoc>,
    pub types: Vec<TypeDoc>,
    pub examples: Vec<ExampleDoc>,
}

impl PackageDoc {
    pub fn type_named(&self, name: &str) -> Option<&TypeDoc> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn func_named(&self, name: &str) -> Option<&FuncDoc> {
        self.funcs.iter().find(|f| f.name == name)
    }
}
