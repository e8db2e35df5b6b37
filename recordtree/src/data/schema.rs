use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::data::{ROOT_PATH, index_path, key_path};

/// Ordered field table of an object node, keyed by field name.
pub type Fields = IndexMap<String, SchemaNode>;

/// One node of a record schema.
///
/// On disk a schema is plain JSON: a leaf is an empty string, an object is a
/// JSON object and an array is a one-element JSON array holding the template
/// that every element follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Scalar text field.
    Leaf,
    /// Named fields in definition order.
    Object(Fields),
    /// Sequence whose elements all follow the boxed template.
    Array(Box<SchemaNode>),
}

/// Sparse mirror of a [`SchemaNode`] marking the leaves that are projected
/// into the metadata index.
///
/// A leaf key is present only when it was marked for inclusion. Containers
/// are always present so projection can descend into them.
pub type MetadataSchemaNode = SchemaNode;

/// Errors raised while decoding a schema document.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unsupported schema node at {path}: {actual}")]
    UnsupportedNode { path: String, actual: String },

    #[error("array at {path} must hold exactly one template, found {len}")]
    ArrayTemplate { path: String, len: usize },

    #[error("schema root must be an object, found {actual}")]
    RootNotObject { actual: String },
}

impl SchemaNode {
    /// An object node with no fields.
    pub fn object() -> Self {
        SchemaNode::Object(Fields::new())
    }

    /// Wrap `template` into an array node.
    pub fn array(template: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(template))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, SchemaNode::Leaf)
    }

    /// Fields of an object node.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            SchemaNode::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Element template of an array node.
    pub fn template(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Array(template) => Some(template),
            _ => None,
        }
    }

    /// Look up a direct child of an object node.
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.fields().and_then(|fields| fields.get(key))
    }

    /// Count the leaves reachable from this node, array templates included once.
    pub fn leaf_count(&self) -> usize {
        match self {
            SchemaNode::Leaf => 1,
            SchemaNode::Object(fields) => fields.values().map(SchemaNode::leaf_count).sum(),
            SchemaNode::Array(template) => template.leaf_count(),
        }
    }

    /// Encode the node in the on-disk schema format.
    pub fn as_json(&self) -> Value {
        match self {
            SchemaNode::Leaf => Value::String(String::new()),
            SchemaNode::Object(fields) => {
                let map: Map<String, Value> = fields
                    .iter()
                    .map(|(key, node)| (key.clone(), node.as_json()))
                    .collect();
                Value::Object(map)
            }
            SchemaNode::Array(template) => Value::Array(vec![template.as_json()]),
        }
    }

    /// Decode a schema document whose root must be an object.
    pub fn from_root_json(value: &Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::RootNotObject {
                actual: json_kind(value).to_string(),
            });
        }
        Self::from_json_at(value, ROOT_PATH)
    }

    fn from_json_at(value: &Value, path: &str) -> Result<Self, SchemaError> {
        match value {
            // Any string marks a leaf; the canonical form is "".
            Value::String(_) => Ok(SchemaNode::Leaf),
            Value::Object(map) => {
                let mut fields = Fields::with_capacity(map.len());
                for (key, child) in map {
                    let node = Self::from_json_at(child, &key_path(path, key))?;
                    fields.insert(key.clone(), node);
                }
                Ok(SchemaNode::Object(fields))
            }
            Value::Array(items) => match items.as_slice() {
                [template] => Ok(SchemaNode::array(Self::from_json_at(
                    template,
                    &index_path(path, 0),
                )?)),
                _ => Err(SchemaError::ArrayTemplate {
                    path: path.to_string(),
                    len: items.len(),
                }),
            },
            _ => Err(SchemaError::UnsupportedNode {
                path: path.to_string(),
                actual: format!("{value}"),
            }),
        }
    }
}

impl TryFrom<&Value> for SchemaNode {
    type Error = SchemaError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_json_at(value, ROOT_PATH)
    }
}

/// The full schema of a submodule together with its metadata schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPair {
    /// Every field an instance carries.
    pub schema: SchemaNode,
    /// Fields copied into the metadata index.
    pub metadata: MetadataSchemaNode,
}

impl Default for SchemaPair {
    fn default() -> Self {
        Self {
            schema: SchemaNode::object(),
            metadata: SchemaNode::object(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
