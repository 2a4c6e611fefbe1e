use crate::config::GeneratorConfig;
use crate::transpiler::rewrite::RewriteRule;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "listmodel-to-cpp",
    about = "Generate a QAbstractListModel C++ class from a QML ListModel file",
    version
)]
pub struct Cli {
    /// QML file whose root object is a ListModel
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Directory for the generated files (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Class name (defaults to the input file name without extension)
    #[arg(long, value_name = "NAME")]
    pub class_name: Option<String>,

    /// Rename calls in values, e.g. qsTr=tr. May be repeated
    #[arg(long = "rewrite", value_name = "FROM=TO")]
    pub rewrites: Vec<RewriteRule>,

    /// Do not apply the built-in qsTr/qsTrId/qsTranslate renames
    #[arg(long)]
    pub no_default_rewrites: bool,

    /// Print the generated files instead of writing them
    #[arg(long)]
    pub stdout: bool,

    /// Print the parsed model as JSON before generating
    #[arg(long)]
    pub dump_model: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            output_dir: self.output_dir.clone(),
            class_name: self.class_name.clone(),
            use_default_rewrites: !self.no_default_rewrites,
            rewrites: self.rewrites.clone(),
            to_stdout: self.stdout,
        }
    }
}
