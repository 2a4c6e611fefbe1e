pub mod codegen;
pub mod output;
pub mod parser;
pub mod rewrite;
pub mod validation;

pub use codegen::{GeneratedModel, ListModelCodeGenerator};
pub use parser::parse_source;

use crate::config::GeneratorConfig;
use crate::errors::ModelError;
use crate::model::ListModel;
use anyhow::{Context, Result};
use log::info;
use output::{ArtifactSink, FileSink, WriterSink, emit_artifacts};
use std::fs;
use std::path::{Path, PathBuf};

/// Parse and validate a QML `ListModel` document into a model named `name`.
pub fn parse_model(name: &str, source: &str) -> Result<ListModel> {
    let records = parse_source(source)?;
    validation::build_model(name, records)
}

/// Convenience function to turn QML source directly into the two C++ artifacts,
/// using the default rewrite table.
pub fn transpile(name: &str, source: &str) -> Result<GeneratedModel> {
    let model = parse_model(name, source)?;
    ListModelCodeGenerator::new()?.generate(&model)
}

/// Load `input` and build its model according to `config`.
pub fn load_model(input: &Path, config: &GeneratorConfig) -> Result<ListModel> {
    if !input.exists() {
        return Err(ModelError::InputNotFound(input.to_path_buf()).into());
    }

    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;

    let model = parse_model(&config.class_name_for(input), &source)?;
    info!(
        "{}: {} records, schema {}",
        input.display(),
        model.row_count(),
        model.schema
    );
    Ok(model)
}

/// Render `model` and hand both artifacts to the sink selected by `config`.
pub fn generate_artifacts(
    model: &ListModel,
    input: &Path,
    config: &GeneratorConfig,
) -> Result<(PathBuf, PathBuf)> {
    let generator = ListModelCodeGenerator::with_rewrites(config.rewrite_table())?;
    let generated = generator.generate(model)?;

    let mut sink: Box<dyn ArtifactSink> = if config.to_stdout {
        Box::new(WriterSink::stdout())
    } else {
        Box::new(FileSink::new(config.output_dir_for(input)))
    };

    emit_artifacts(sink.as_mut(), &generated)
}

/// Full run for one input file: load, validate, generate, write.
pub fn transpile_file(input: &Path, config: &GeneratorConfig) -> Result<(PathBuf, PathBuf)> {
    let model = load_model(input, config)?;
    generate_artifacts(&model, input, config)
}
