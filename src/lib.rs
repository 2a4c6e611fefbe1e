pub mod cli;
pub mod config;
pub mod errors;
pub mod model;
pub mod transpiler;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use errors::{ConfigError, ModelError};
pub use model::{ListModel, Record, Schema};
pub use transpiler::validation::SchemaError;
pub use transpiler::{GeneratedModel, ListModelCodeGenerator, parse_model, transpile, transpile_file};
