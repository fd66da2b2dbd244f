use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use encoding_rs::{Encoding, UTF_8};
use thiserror::Error;

use xsdcpp::cli::Cli;
use xsdcpp::generator::{CodegenError, CppCodeGenerator, CppGenConfig};
use xsdcpp::xsd::{self, Schema, XsdError};

#[derive(Debug, Error)]
enum Error {
    #[error("cannot read {path} : {source}")]
    SchemaIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path} : {source}")]
    SchemaParse {
        path: PathBuf,
        source: roxmltree::Error,
    },
    #[error(transparent)]
    Xsd(#[from] XsdError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
    #[error("invalid root element(-r) : {0}")]
    UnknownRoot(String),
    #[error("missing -r/--root option : please specify the names of root elements. Possible root elements are: {0}")]
    MissingRoot(String),
    #[error("unsupported backend : java")]
    JavaBackend,
    #[error("cannot write {path} : {source}")]
    OutputIo {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut included = vec![cli.input.clone()];
    let schema = parse_schema_file(&cli.input, &mut included)?;

    if cli.root.is_empty() {
        // Without -r, the schema must have an unambiguous document root.
        if schema.element_map.len() > 1 {
            let candidates = schema
                .element_map
                .keys()
                .map(|name| format!("\"{name}\""))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::MissingRoot(candidates));
        }
    } else {
        for root in &cli.root {
            if !schema.element_map.contains_key(root) {
                return Err(Error::UnknownRoot(root.clone()));
            }
        }
    }

    if cli.java {
        return Err(Error::JavaBackend);
    }
    if cli.cpp {
        let include_dir = cli.out_dir.join("include");
        std::fs::create_dir_all(&include_dir).map_err(|source| Error::OutputIo {
            path: include_dir.clone(),
            source,
        })?;
        let config = CppGenConfig {
            package: cli.package.clone(),
            writer: cli.writer,
            gen_enums: !cli.gen_parser_only,
            gen_parser: !cli.gen_enums_only,
            boolean_getter: cli.boolean_getter,
            use_tinyxml: cli.tinyxml,
            root_elements: if cli.root.is_empty() {
                None
            } else {
                Some(cli.root.clone())
            },
        };
        let mut generator = CppCodeGenerator::new(&schema, config)?;
        generator.print(&cli.out_dir)?;
    }

    if let Some(depfile) = &cli.depfile {
        write_dep_file(depfile, &included).map_err(|source| Error::OutputIo {
            path: depfile.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Reads and maps one schema document, then follows its includes
/// transitively, resolving each location against the including file's
/// directory. Every visited path lands in `included` for the depfile.
fn parse_schema_file(path: &Path, included: &mut Vec<PathBuf>) -> Result<Schema, Error> {
    let bytes = std::fs::read(path).map_err(|source| Error::SchemaIo {
        path: path.to_path_buf(),
        source,
    })?;
    let (text, _, _) = Encoding::decode(UTF_8, &bytes);
    let document = roxmltree::Document::parse(&text).map_err(|source| Error::SchemaParse {
        path: path.to_path_buf(),
        source,
    })?;
    let mut schema = xsd::read_schema(&document)?;
    let include_locations = schema.includes.clone();
    for location in include_locations {
        let sibling = match path.parent() {
            Some(parent) => parent.join(&location),
            None => PathBuf::from(&location),
        };
        included.push(sibling.clone());
        let child = parse_schema_file(&sibling, included)?;
        schema.include(child);
    }
    Ok(schema)
}

/// Single ninja-style line: whitespace-continued list of all schema files.
fn write_dep_file(path: &Path, files: &[PathBuf]) -> std::io::Result<()> {
    let list = files
        .iter()
        .map(|file| file.display().to_string())
        .collect::<Vec<_>>()
        .join(" \\\n  ");
    std::fs::write(path, format!("  {list}\n"))
}
