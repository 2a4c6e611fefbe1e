use crate::model::{ListModel, Record, Schema};
use anyhow::Result;
use log::debug;

pub mod errors;
mod tests;

pub use errors::SchemaError;

/// Derives the schema from the first record and checks every other record against it.
///
/// The comparison is order-insensitive. The first mismatch aborts validation; no
/// best-effort schema is produced.
pub fn validate_schema(records: &[Record]) -> Result<Schema> {
    let Some(first) = records.first() else {
        return Err(crate::errors::ModelError::NoElements.into());
    };

    let schema = Schema::from_record(first);
    if schema.is_empty() {
        return Err(SchemaError::EmptySchema { line: first.line }.into());
    }
    debug!("schema from ListElement 1: {}", schema);

    let expected = schema.key_set();
    for record in &records[1..] {
        let actual = record.keys();
        if actual == expected {
            continue;
        }

        let missing: Vec<String> = expected.difference(&actual).map(|s| s.to_string()).collect();
        let unexpected: Vec<String> = actual.difference(&expected).map(|s| s.to_string()).collect();
        let differing = expected
            .symmetric_difference(&actual)
            .map(|s| s.to_string())
            .collect();

        return Err(SchemaError::Mismatch {
            element: record.index + 1,
            line: record.line,
            differing,
            missing,
            unexpected,
        }
        .into());
    }

    Ok(schema)
}

/// Validate `records` and assemble the model named `name`.
pub fn build_model(name: &str, records: Vec<Record>) -> Result<ListModel> {
    let schema = validate_schema(&records)?;
    Ok(ListModel::new(name, schema, records))
}
