// src/errors.rs
use std::path::PathBuf;
use thiserror::Error;

/// Input and structural failures. All of them abort generation.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("File '{}' does not exist.", .0.display())]
    InputNotFound(PathBuf),

    #[error("'{0}' is not a valid C++ class name; rename the file or pass --class-name")]
    InvalidClassName(String),

    #[error("Properties '{first}' and '{second}' both map to the role {role}")]
    RoleCollision {
        role: String,
        first: String,
        second: String,
    },

    #[error("QML file must contain ListModel as the root object.")]
    MissingRoot,

    #[error("No ListElement objects found.")]
    NoElements,

    #[error("Syntax error at line {line}, column {column}: expected {expected}")]
    Syntax {
        line: usize,
        column: usize,
        expected: String,
    },

    #[error("ListElement {element} (line {line}) defines property '{property}' more than once")]
    DuplicateProperty {
        element: usize,
        line: usize,
        property: String,
    },

    #[error(
        "ListElement {element} (line {line}): value of '{property}' spans multiple lines, which is not supported"
    )]
    MultilineValue {
        element: usize,
        line: usize,
        property: String,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid rewrite rule '{0}': expected FROM=TO, e.g. qsTr=tr")]
    InvalidRewriteRule(String),
}
