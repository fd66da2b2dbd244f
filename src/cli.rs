use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// The XSD schema file to compile
    #[arg(value_parser)]
    pub input: PathBuf,

    /// Package name of the output; dot-separated tokens become nested
    /// namespaces and the output file name stem
    #[arg(short, long)]
    pub package: String,

    /// Output directory
    #[arg(short, long = "outDir", default_value = ".")]
    pub out_dir: PathBuf,

    /// Generate C++ code
    #[arg(short, long)]
    pub cpp: bool,

    /// Generate Java code (not provided by this tool)
    #[arg(short, long)]
    pub java: bool,

    /// Also generate writer code
    #[arg(short, long)]
    pub writer: bool,

    /// Generate isX() instead of getX() for boolean members
    #[arg(short, long = "booleanGetter")]
    pub boolean_getter: bool,

    /// Generate code that uses libtinyxml2 instead of libxml2. Smaller
    /// binaries, but no XInclude substitution or entity refs
    #[arg(short, long)]
    pub tinyxml: bool,

    /// Only generate the enum converters
    #[arg(short = 'e', long = "genEnumsOnly", conflicts_with = "gen_parser_only")]
    pub gen_enums_only: bool,

    /// Only generate the XML parser
    #[arg(short = 'x', long = "genParserOnly")]
    pub gen_parser_only: bool,

    /// Restrict entrypoints to this root element; repeatable
    #[arg(short, long)]
    pub root: Vec<String>,

    /// Write a ninja-style depfile listing all included schemas
    #[arg(short, long)]
    pub depfile: Option<PathBuf>,
}
