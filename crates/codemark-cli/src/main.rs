use anyhow::{Context, Result, bail};
use codemark_config::Config;
use codemark_engine::{BuildOptions, Builder, Code, ExampleDoc, FuncDoc, PackageDoc, Pos};
use codemark_syntax::PrinterConfig;
use std::collections::HashSet;
use std::{env, path::PathBuf, process};

const USAGE: &str = "Usage: codemark-cli [--json] <import-path> <file-or-glob>...";

#[derive(Debug, PartialEq)]
struct Args {
    import_path: String,
    patterns: Vec<String>,
    json: bool,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut json = false;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            _ => positional.push(arg.clone()),
        }
    }
    let (import_path, patterns) = positional.split_first()?;
    if patterns.is_empty() {
        return None;
    }
    Some(Args {
        import_path: import_path.clone(),
        patterns: patterns.to_vec(),
        json,
    })
}

fn build_options(config: &Config) -> BuildOptions {
    BuildOptions {
        printer: PrinterConfig {
            tab_width: config.tab_width,
        },
        interop_namespaces: config.interop_namespaces.clone(),
        include_source: config.include_source,
        include_examples: config.include_examples,
    }
}

/// The files named by `patterns`, in argument order. Glob matches are
/// sorted; a glob that matches nothing is an error.
fn expand_patterns(config: &Config, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let pattern = config.resolve_pattern(pattern);
        if !pattern.contains(['*', '?', '[']) {
            files.push(PathBuf::from(pattern));
            continue;
        }
        let mut matched = glob::glob(&pattern)
            .with_context(|| format!("Invalid file pattern '{pattern}'"))?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to list files matching '{pattern}'"))?;
        if matched.is_empty() {
            bail!("No files match '{pattern}'");
        }
        matched.sort();
        files.extend(matched);
    }
    let mut seen = HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    Ok(files)
}

fn load_sources(builder: &mut Builder, files: &[PathBuf]) -> Result<()> {
    for path in files {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file '{}'", path.display()))?;
        builder.add_source(&path.to_string_lossy(), data);
    }
    Ok(())
}

fn indented(out: &mut String, text: &str, indent: &str) {
    for line in text.lines() {
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}

/// 1-based line and column of a byte offset.
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}

fn write_entry(out: &mut String, files: &[String], decl: &Code, doc: &str, pos: &Pos) {
    out.push('\n');
    out.push_str(&decl.text);
    out.push('\n');
    indented(out, doc, "    ");
    if let Some(file) = pos.file.and_then(|i| files.get(i)) {
        out.push_str(&format!("    {file}:{}\n", pos.line));
    }
    for annotation in &decl.annotations {
        let (line, column) = line_col(&decl.text, annotation.pos);
        out.push_str(&format!(
            "    {line}:{column} {} {}",
            annotation.kind.as_str(),
            decl.slice(annotation)
        ));
        if let Some(path) = decl.path(annotation) {
            out.push_str(&format!(" ({path})"));
        }
        out.push('\n');
    }
}

fn write_examples(out: &mut String, examples: &[ExampleDoc]) {
    for example in examples {
        out.push_str(&format!("\nExample{}:\n", example.name));
        indented(out, &example.code.text, "    ");
        if !example.output.is_empty() {
            out.push_str(if example.unordered {
                "    Unordered output:\n"
            } else {
                "    Output:\n"
            });
            indented(out, &example.output, "        ");
        }
    }
}

fn write_func(out: &mut String, files: &[String], func: &FuncDoc) {
    write_entry(out, files, &func.decl, &func.doc, &func.pos);
    write_examples(out, &func.examples);
}

/// Plain-text rendering in the spirit of `go doc`, with every annotation
/// listed under its declaration.
fn render_package(doc: &PackageDoc) -> String {
    let mut out = format!(
        "package {} // import \"{}\"\n",
        doc.name, doc.import_path
    );
    if !doc.doc.is_empty() {
        out.push('\n');
        indented(&mut out, &doc.doc, "");
    }
    write_examples(&mut out, &doc.examples);

    for (title, values) in [("CONSTANTS", &doc.consts), ("VARIABLES", &doc.vars)] {
        if values.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{title}\n"));
        for value in values {
            write_entry(&mut out, &doc.files, &value.decl, &value.doc, &value.pos);
        }
    }
    if !doc.funcs.is_empty() {
        out.push_str("\nFUNCTIONS\n");
        for func in &doc.funcs {
            write_func(&mut out, &doc.files, func);
        }
    }
    if !doc.types.is_empty() {
        out.push_str("\nTYPES\n");
        for ty in &doc.types {
            write_entry(&mut out, &doc.files, &ty.decl, &ty.doc, &ty.pos);
            write_examples(&mut out, &ty.examples);
            for func in ty.funcs.iter().chain(&ty.methods) {
                write_func(&mut out, &doc.files, func);
            }
        }
    }
    out
}

fn run(args: Args) -> Result<()> {
    let config = Config::load_or_default().context("Failed to load configuration")?;
    let files = expand_patterns(&config, &args.patterns)?;
    log::info!(
        "documenting {} from {} file(s)",
        args.import_path,
        files.len()
    );

    let mut builder = Builder::new(build_options(&config));
    load_sources(&mut builder, &files)?;
    let doc = builder.build_package(&args.import_path);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render_package(&doc));
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&args) else {
        eprintln!("{USAGE}");
        eprintln!("Settings are read from {}", Config::config_path().display());
        process::exit(1);
    };
    run(args)
}
