use crate::errors::ModelError;
use crate::model::{ListModel, field_identifier, role_identifier};
use crate::transpiler::rewrite::{RewriteTable, is_identifier};
use anyhow::{Result, anyhow};
use log::debug;
use serde::Serialize;
use tera::{Context, Tera};

const HEADER_TEMPLATE_NAME: &str = "model.h";
const SOURCE_TEMPLATE_NAME: &str = "model.cpp";
const HEADER_TEMPLATE: &str = include_str!("templates/model.h.tera");
const SOURCE_TEMPLATE: &str = include_str!("templates/model.cpp.tera");

#[derive(Serialize)]
struct PropertyView<'a> {
    name: &'a str,
    role: String,
    field: String,
}

#[derive(Serialize)]
struct ClassView<'a> {
    class_name: &'a str,
    header_file: &'a str,
    row_field: String,
    insert_params: String,
    properties: Vec<PropertyView<'a>>,
    /// Argument list of each `insert` call, in record order
    rows: Vec<String>,
}

/// The two rendered artifacts of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModel {
    pub class_name: String,
    pub header_file: String,
    pub source_file: String,
    pub header: String,
    pub source: String,
}

/// Renders a validated [`ListModel`] into a `QAbstractListModel` subclass.
pub struct ListModelCodeGenerator {
    tera: Tera,
    rewrites: RewriteTable,
}

impl ListModelCodeGenerator {
    pub fn new() -> Result<Self> {
        Self::with_rewrites(RewriteTable::default())
    }

    pub fn with_rewrites(rewrites: RewriteTable) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            (HEADER_TEMPLATE_NAME, HEADER_TEMPLATE),
            (SOURCE_TEMPLATE_NAME, SOURCE_TEMPLATE),
        ])?;

        Ok(Self { tera, rewrites })
    }

    pub fn generate(&self, model: &ListModel) -> Result<GeneratedModel> {
        if !is_identifier(&model.name) {
            return Err(ModelError::InvalidClassName(model.name.clone()).into());
        }

        let first = model
            .schema
            .first()
            .ok_or_else(|| anyhow!("Model '{}' has no properties", model.name))?;

        let stem = model.file_stem();
        let header_file = format!("{}.h", stem);
        let source_file = format!("{}.cpp", stem);

        let properties: Vec<PropertyView<'_>> = model
            .schema
            .names()
            .iter()
            .map(|name| PropertyView {
                name,
                role: role_identifier(name),
                field: field_identifier(name),
            })
            .collect();

        for (i, property) in properties.iter().enumerate() {
            if let Some(other) = properties[..i].iter().find(|p| p.role == property.role) {
                return Err(ModelError::RoleCollision {
                    role: property.role.clone(),
                    first: other.name.to_string(),
                    second: property.name.to_string(),
                }
                .into());
            }
        }

        let insert_params = model
            .schema
            .names()
            .iter()
            .map(|name| format!("const QString &{}", name))
            .collect::<Vec<_>>()
            .join(", ");

        let rows = model
            .rows()
            .into_iter()
            .map(|values| {
                values
                    .into_iter()
                    .map(|value| self.rewrites.apply(value).into_owned())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect();

        let view = ClassView {
            class_name: &model.name,
            header_file: &header_file,
            row_field: field_identifier(first),
            insert_params,
            properties,
            rows,
        };
        let context = Context::from_serialize(&view)?;

        let header = self.render(HEADER_TEMPLATE_NAME, &context)?;
        let source = self.render(SOURCE_TEMPLATE_NAME, &context)?;
        debug!(
            "rendered {} ({} bytes) and {} ({} bytes)",
            header_file,
            header.len(),
            source_file,
            source.len()
        );

        Ok(GeneratedModel {
            class_name: model.name.clone(),
            header_file,
            source_file,
            header,
            source,
        })
    }

    fn render(&self, template: &str, context: &Context) -> Result<String> {
        let mut rendered = self.tera.render(template, context)?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}
