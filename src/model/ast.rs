use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single `name: value` statement of a `ListElement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    /// Raw value expression, exactly as written in the source (trailing whitespace removed)
    pub value: String,
    pub line: usize,
}

/// One `ListElement` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub index: usize,
    pub line: usize,
    pub properties: Vec<Property>,
}

impl Record {
    pub fn new(index: usize, line: usize) -> Self {
        Self {
            index,
            line,
            properties: Vec::new(),
        }
    }

    /// Get the raw value of a property by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }

    /// Property names of this record, order-insensitive
    pub fn keys(&self) -> BTreeSet<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Sorted, de-duplicated property names shared by every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    properties: Vec<String>,
}

impl Schema {
    pub fn from_record(record: &Record) -> Self {
        let properties = record
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { properties }
    }

    pub fn names(&self) -> &[String] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.properties.first().map(String::as_str)
    }

    pub fn key_set(&self) -> BTreeSet<&str> {
        self.properties.iter().map(String::as_str).collect()
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{{}}}", self.properties.join(", "))
    }
}

/// A validated list model. Built once per run and not mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ListModel {
    pub name: String,
    pub schema: Schema,
    pub records: Vec<Record>,
}

impl ListModel {
    pub fn new(name: impl Into<String>, schema: Schema, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            schema,
            records,
        }
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Raw values of each record, in schema order
    pub fn rows(&self) -> Vec<Vec<&str>> {
        self.records
            .iter()
            .map(|record| {
                self.schema
                    .names()
                    .iter()
                    .filter_map(|name| record.get(name))
                    .collect()
            })
            .collect()
    }

    /// Base name of the generated files
    pub fn file_stem(&self) -> String {
        self.name.to_lowercase()
    }
}

/// `name` -> `NameRole`
pub fn role_identifier(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("{}{}Role", first.to_uppercase(), chars.as_str()),
        None => "Role".to_string(),
    }
}

/// `name` -> `m_names`
pub fn field_identifier(property: &str) -> String {
    format!("m_{}s", property)
}
