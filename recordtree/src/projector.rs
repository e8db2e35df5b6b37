//! Metadata projection.
//!
//! Projection walks the full schema and the metadata schema side by side
//! over one data instance. Containers are always reproduced so the result
//! keeps the instance's shape; a leaf survives only when the metadata schema
//! has an entry for it at the same position.
//!
//! An array whose template is a bare leaf is treated as a single value: it
//! is copied whole when the metadata schema has an entry under the array's
//! key and left out otherwise.

use log::debug;
use serde_json::{Map, Value};

use crate::data::{Fields, MetadataSchemaNode, ROOT_PATH, SchemaNode, index_path, key_path};

/// Errors raised when an instance does not follow its schema.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("expected {expected} at {path}, found {actual}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        actual: String,
    },

    #[error("missing {expected} at {path}")]
    MissingField {
        path: String,
        expected: &'static str,
    },
}

/// Project `data` onto the leaves marked in `metadata`.
///
/// # Errors
///
/// Returns [`ProjectError`] when a container in `data` is missing or has the
/// wrong JSON type. A missing leaf projects as an empty string.
pub fn project(
    schema: &SchemaNode,
    metadata: &MetadataSchemaNode,
    data: &Value,
) -> Result<Value, ProjectError> {
    project_node(schema, Some(metadata), data, ROOT_PATH)
}

fn project_node(
    schema: &SchemaNode,
    metadata: Option<&MetadataSchemaNode>,
    data: &Value,
    path: &str,
) -> Result<Value, ProjectError> {
    match schema {
        SchemaNode::Leaf => Ok(data.clone()),
        SchemaNode::Object(fields) => project_object(fields, metadata, data, path),
        SchemaNode::Array(template) => project_array(template, metadata, data, path),
    }
}

fn project_object(
    fields: &Fields,
    metadata: Option<&MetadataSchemaNode>,
    data: &Value,
    path: &str,
) -> Result<Value, ProjectError> {
    let Value::Object(values) = data else {
        return Err(mismatch(path, "object", data));
    };
    let meta_fields = metadata.and_then(SchemaNode::fields);
    let mut projected = Map::new();

    for (key, field) in fields {
        let field_path = key_path(path, key);
        let field_meta = meta_fields.and_then(|m| m.get(key));
        let value = values.get(key);

        match field {
            SchemaNode::Leaf => {
                if field_meta.is_some() {
                    let value = value.cloned().unwrap_or_else(|| Value::String(String::new()));
                    projected.insert(key.clone(), value);
                } else {
                    debug!("{field_path} excluded from metadata");
                }
            }
            SchemaNode::Array(template) if template.is_leaf() && field_meta.is_none() => {
                debug!("{field_path} excluded from metadata");
            }
            _ => {
                let value = value.ok_or_else(|| ProjectError::MissingField {
                    path: field_path.clone(),
                    expected: container_kind(field),
                })?;
                let value = project_node(field, field_meta, value, &field_path)?;
                projected.insert(key.clone(), value);
            }
        }
    }

    Ok(Value::Object(projected))
}

fn project_array(
    template: &SchemaNode,
    metadata: Option<&MetadataSchemaNode>,
    data: &Value,
    path: &str,
) -> Result<Value, ProjectError> {
    let Value::Array(items) = data else {
        return Err(mismatch(path, "array", data));
    };

    if template.is_leaf() {
        return Ok(match metadata {
            Some(_) => data.clone(),
            None => Value::Array(Vec::new()),
        });
    }

    let meta_template = metadata.and_then(SchemaNode::template);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| project_node(template, meta_template, item, &index_path(path, i)))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn mismatch(path: &str, expected: &'static str, actual: &Value) -> ProjectError {
    ProjectError::ShapeMismatch {
        path: path.to_string(),
        expected,
        actual: format!("{actual}"),
    }
}

fn container_kind(node: &SchemaNode) -> &'static str {
    match node {
        SchemaNode::Leaf => "leaf",
        SchemaNode::Object(_) => "object",
        SchemaNode::Array(_) => "array",
    }
}
