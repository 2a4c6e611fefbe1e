pub mod ast;

pub use ast::{ListModel, Property, Record, Schema, field_identifier, role_identifier};
