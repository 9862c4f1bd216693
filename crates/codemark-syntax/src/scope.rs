//! Name resolution for identifiers in a package.
//!
//! The annotation visitor needs to know, for each identifier it meets,
//! whether it refers to a package-level declaration (and whether that is
//! exported), to an imported package, or to nothing declared at all. That
//! question is answered through the [`Resolver`] trait; [`PackageScope`] is
//! the implementation built from a package's parsed files.

use std::collections::{HashMap, HashSet};

use crate::ast::{Decl, Expr, FieldList, File, Ident, Spec};
use crate::source::{BytePos, Span};

/// What an identifier refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Not declared in any scope the resolver knows about: a predeclared
    /// name, or a local the resolver does not track.
    Unbound,
    /// Declared in the package or in an enclosing function or type.
    Declared { exported: bool },
    /// The name of an imported package.
    Import { path: String },
}

impl Binding {
    pub fn is_bound(&self) -> bool {
        !matches!(self, Binding::Unbound)
    }
}

/// Answers what an identifier refers to.
pub trait Resolver {
    fn resolve(&self, ident: &Ident) -> Binding;
}

impl<F> Resolver for F
where
    F: Fn(&Ident) -> Binding,
{
    fn resolve(&self, ident: &Ident) -> Binding {
        self(ident)
    }
}

#[derive(Debug)]
struct FileScope {
    span: Span,
    imports: HashMap<String, String>,
}

/// Parameters and type parameters visible inside one declaration.
#[derive(Debug)]
struct LocalScope {
    span: Span,
    names: HashSet<String>,
}

/// Package-level names, per-file imports, and declaration-local names.
#[derive(Debug, Default)]
pub struct PackageScope {
    package: HashMap<String, bool>,
    files: Vec<FileScope>,
    locals: Vec<LocalScope>,
}

impl PackageScope {
    pub fn new<'a>(files: impl IntoIterator<Item = &'a File>) -> Self {
        let mut scope = Self::default();
        for file in files {
            scope.add_file(file);
        }
        scope
    }

    fn add_file(&mut self, file: &File) {
        let mut imports = HashMap::new();
        for import in file.imports() {
            let Some(path) = import.path.unquote() else {
                continue;
            };
            let name = match &import.name {
                Some(name) if name.name == "_" || name.name == "." => continue,
                Some(name) => name.name.clone(),
                None => default_import_name(&path).to_string(),
            };
            imports.insert(name, path);
        }
        self.files.push(FileScope {
            span: file.span,
            imports,
        });

        for decl in &file.decls {
            match decl {
                Decl::Func(func) => {
                    if func.recv.is_none() && !func.name.is_blank() {
                        self.declare(&func.name);
                    }
                    let mut names = HashSet::new();
                    for list in [
                        func.recv.as_ref(),
                        func.ty.type_params.as_ref(),
                        Some(&func.ty.params),
                        func.ty.results.as_ref(),
                    ]
                    .into_iter()
                    .flatten()
                    {
                        collect_field_names(list, &mut names);
                    }
                    // Receiver type parameters: `func (l *List[T]) ...`
                    if let Some(recv) = &func.recv {
                        for field in &recv.list {
                            collect_receiver_type_params(&field.ty, &mut names);
                        }
                    }
                    self.add_locals(func.span(), names);
                }
                Decl::Gen(gen_decl) => {
                    for spec in &gen_decl.specs {
                        match spec {
                            Spec::Value(value) => {
                                for name in &value.names {
                                    self.declare(name);
                                }
                            }
                            Spec::Type(ty) => {
                                self.declare(&ty.name);
                                if let Some(params) = &ty.type_params {
                                    let mut names = HashSet::new();
                                    collect_field_names(params, &mut names);
                                    self.add_locals(ty.span(), names);
                                }
                            }
                            Spec::Import(_) => {}
                        }
                    }
                }
                Decl::Bad(_) => {}
            }
        }
    }

    fn declare(&mut self, name: &Ident) {
        if !name.is_blank() {
            self.package.insert(name.name.clone(), name.is_exported());
        }
    }

    fn add_locals(&mut self, span: Span, names: HashSet<String>) {
        if !names.is_empty() {
            self.locals.push(LocalScope { span, names });
        }
    }

    /// Whether `name` is declared at package level.
    pub fn is_declared(&self, name: &str) -> bool {
        self.package.contains_key(name)
    }

    fn file_at(&self, pos: BytePos) -> Option<&FileScope> {
        self.files
            .iter()
            .find(|f| f.span.start <= pos && pos <= f.span.end)
    }
}

impl Resolver for PackageScope {
    fn resolve(&self, ident: &Ident) -> Binding {
        let pos = ident.span.start;
        let local = self.locals.iter().any(|scope| {
            scope.span.start <= pos && pos < scope.span.end && scope.names.contains(&ident.name)
        });
        if local {
            return Binding::Declared { exported: false };
        }
        if let Some(&exported) = self.package.get(&ident.name) {
            return Binding::Declared { exported };
        }
        if let Some(path) = self
            .file_at(pos)
            .and_then(|file| file.imports.get(&ident.name))
        {
            return Binding::Import { path: path.clone() };
        }
        Binding::Unbound
    }
}

fn collect_field_names(list: &FieldList, names: &mut HashSet<String>) {
    for field in &list.list {
        names.extend(
            field
                .names
                .iter()
                .filter(|n| !n.is_blank())
                .map(|n| n.name.clone()),
        );
    }
}

fn collect_receiver_type_params(ty: &Expr, names: &mut HashSet<String>) {
    match ty {
        Expr::Star { x, .. } | Expr::Paren { x, .. } => collect_receiver_type_params(x, names),
        Expr::Index { indices, .. } => {
            for index in indices {
                if let Expr::Ident(id) = index {
                    names.insert(id.name.clone());
                }
            }
        }
        _ => {}
    }
}

/// The name a package is imported under when no alias is given: the last
/// path element, skipping a major-version suffix and any `.vN` or `go-`
/// decoration (`gopkg.in/yaml.v3` imports as `yaml`).
pub fn default_import_name(path: &str) -> &str {
    let mut elems = path.rsplit('/');
    let mut last = elems.next().unwrap_or(path);
    if is_major_version(last)
        && let Some(prev) = elems.next()
    {
        last = prev;
    }
    let last = last.strip_prefix("go-").unwrap_or(last);
    match last.split_once('.') {
        Some((name, _)) if !name.is_empty() => name,
        _ => last,
    }
}

fn is_major_version(elem: &str) -> bool {
    elem.strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}
