
use crate::errors::ModelError;
use crate::model::{Property, Record};
use anyhow::Result;
use log::debug;
use peg::error::ParseError;
use peg::str::LineCol;

/// A `ListElement { ... }` block found directly inside the root `ListModel`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBlock<'a> {
    /// Text between the outer braces, nested braces included
    pub body: &'a str,
    /// Byte offset of the `ListElement` keyword
    pub start: usize,
    /// Byte offset of `body`
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawProperty<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub offset: usize,
}

peg::parser! {
    grammar qml_parser() for str {
        rule line_comment() = "//" [^'\n']*
        rule block_comment() = "/*" (!"*/" [_])* "*/"
        rule comment() = quiet!{ line_comment() / block_comment() }

        rule string() = quiet!{
            "\"" ("\\" [_] / [^'"' | '\\'])* "\""
            / "'" ("\\" [_] / [^'\'' | '\\'])* "'"
            / "`" [^'`']* "`"
        }

        rule ident_char() = ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']

        rule identifier() -> &'input str
            = quiet!{ $(['a'..='z' | 'A'..='Z' | '_'] ident_char()*) }
            / expected!("identifier")

        rule padding() = [' ' | '\t' | '\r' | '\n']*
        rule _() = quiet!{ ([' ' | '\t' | '\r' | '\n'] / comment())* }

        // Brace-balanced text; braces inside strings and comments do not count
        rule balanced() = (comment() / string() / "{" balanced() "}" / [^'{' | '}'])*

        rule element() -> ElementBlock<'input>
            = start:position!() "ListElement" !ident_char() _ "{"
              offset:position!() body:$(balanced()) "}" {
                ElementBlock { body, start, offset }
            }

        rule member() -> Option<ElementBlock<'input>>
            = e:element() { Some(e) }
            / comment() { None }
            / string() { None }
            / identifier() { None }
            / "{" balanced() "}" { None }
            / [^'{' | '}'] { None }

        rule root_object() -> Vec<ElementBlock<'input>>
            = "ListModel" !ident_char() _ "{" members:member()* "}" {
                members.into_iter().flatten().collect()
            }

        rule root() -> Vec<ElementBlock<'input>>
            = padding() r:root_object() { r }

        rule skip() = comment() / string() / identifier() {} / [_] {}

        // The root must start a line; leading whitespace is ignored
        pub rule document() -> Vec<ElementBlock<'input>>
            = r:root() [_]* { r }
            / (!("\n" root()) skip())* "\n" r:root() [_]* { r }

        rule marker() = padding() "ListModel" !ident_char() _ "{"

        pub rule root_marker()
            = marker() [_]*
            / (!("\n" marker()) skip())* "\n" marker() [_]*

        rule hspace() = [' ' | '\t']
        rule separator() = quiet!{ ([' ' | '\t' | '\r' | '\n' | ';'] / comment())* }

        rule nested() = "{" inner() "}" / "[" inner() "]" / "(" inner() ")"
        rule inner() = (comment() / string() / nested() / [^'{' | '}' | '[' | ']' | '(' | ')'])*

        rule value_atom()
            = string()
            / nested()
            / !("//" / "/*") [^'\n' | '\r' | ';' | '{' | '}' | '[' | ']' | '(' | ')']

        // A line ending in an operator continues on the next one
        rule continued_line()
            = line:$(value_atom()+) {? if ends_with_operator(line) { Ok(()) } else { Err("operator") } }

        rule line_break() = "\r"? "\n" hspace()*

        rule value() -> &'input str
            = $((continued_line() line_break())* value_atom()+)

        rule property() -> RawProperty<'input>
            = offset:position!() name:identifier() hspace()* ":" hspace()* value:value() {
                RawProperty { name, value: value.trim_end(), offset }
            }

        pub rule element_body() -> Vec<RawProperty<'input>>
            = separator() properties:(property() ** separator()) separator() { properties }
    }
}

fn ends_with_operator(line: &str) -> bool {
    line.trim_end().ends_with(|c: char| "+-*/%&|^!~<>=?:,.".contains(c))
}

/// 1-based line and column of a byte offset
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

fn syntax_error(source: &str, base: usize, err: ParseError<LineCol>) -> ModelError {
    let (line, column) = line_col(source, base + err.location.offset);
    ModelError::Syntax {
        line,
        column,
        expected: err.expected.to_string(),
    }
}

/// Locate the root `ListModel` and return its direct `ListElement` children.
pub fn extract_elements(source: &str) -> Result<Vec<ElementBlock<'_>>> {
    if qml_parser::root_marker(source).is_err() {
        return Err(ModelError::MissingRoot.into());
    }

    let elements = qml_parser::document(source).map_err(|e| syntax_error(source, 0, e))?;
    if elements.is_empty() {
        return Err(ModelError::NoElements.into());
    }

    debug!("found {} ListElement blocks", elements.len());
    Ok(elements)
}

/// Parse the `name: value` statements of one element.
///
/// `index` is the zero-based position of the element in the model.
pub fn parse_record(source: &str, index: usize, element: &ElementBlock<'_>) -> Result<Record> {
    let (line, _) = line_col(source, element.start);
    let raw = qml_parser::element_body(element.body)
        .map_err(|e| syntax_error(source, element.offset, e))?;

    let mut record = Record::new(index, line);
    for property in raw {
        if record.contains(property.name) {
            return Err(ModelError::DuplicateProperty {
                element: index + 1,
                line,
                property: property.name.to_string(),
            }
            .into());
        }
        if property.value.contains('\n') {
            return Err(ModelError::MultilineValue {
                element: index + 1,
                line,
                property: property.name.to_string(),
            }
            .into());
        }

        let (property_line, _) = line_col(source, element.offset + property.offset);
        record.properties.push(Property {
            name: property.name.to_string(),
            value: property.value.to_string(),
            line: property_line,
        });
    }

    Ok(record)
}

/// Extract and parse every record of a QML `ListModel` document.
pub fn parse_source(source: &str) -> Result<Vec<Record>> {
    extract_elements(source)?
        .iter()
        .enumerate()
        .map(|(index, element)| parse_record(source, index, element))
        .collect()
}
