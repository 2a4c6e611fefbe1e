// src/transpiler/validation/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("The first ListElement (line {line}) defines no properties")]
    EmptySchema { line: usize },

    #[error(
        "All properties in model should be explicitly defined for every ListElement. \
         ListElement {element} (line {line}) differs in: {}{}",
        .differing.join(", "),
        describe(.missing, .unexpected)
    )]
    Mismatch {
        element: usize,
        line: usize,
        /// Symmetric difference against the schema, sorted
        differing: Vec<String>,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

fn describe(missing: &[String], unexpected: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing {}", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        parts.push(format!("unexpected {}", unexpected.join(", ")));
    }
    format!(" ({})", parts.join("; "))
}
