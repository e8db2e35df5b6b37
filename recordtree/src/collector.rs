//! Schema-guided data collection.

use log::debug;
use serde_json::{Map, Value};

use crate::{
    data::{Fields, SchemaNode},
    options::BuildOptions,
    prompt::{PromptError, Prompter},
};

/// Prompts for every leaf of a schema and assembles the answers into a JSON
/// instance with the same shape.
pub struct DataCollector<P> {
    prompter: P,
    indent_width: usize,
}

impl<P: Prompter> DataCollector<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            indent_width: BuildOptions::default().indent_width,
        }
    }

    /// Spaces of prompt indentation per nesting level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Collect one instance of `schema`.
    ///
    /// Leaves become strings exactly as typed, objects keep the schema's
    /// field order and arrays hold at least one element.
    pub fn collect(&mut self, schema: &SchemaNode) -> Result<Value, PromptError> {
        self.collect_node(schema, "value", 0)
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.indent_width)
    }

    fn collect_node(
        &mut self,
        node: &SchemaNode,
        label: &str,
        depth: usize,
    ) -> Result<Value, PromptError> {
        match node {
            SchemaNode::Leaf => self.collect_leaf(label, depth),
            SchemaNode::Object(fields) => self.collect_object(fields, depth),
            SchemaNode::Array(template) => self.collect_array(template, label, depth),
        }
    }

    fn collect_leaf(&mut self, label: &str, depth: usize) -> Result<Value, PromptError> {
        let answer = self
            .prompter
            .ask(&format!("{}{label}: ", self.indent(depth)))?;
        Ok(Value::String(answer))
    }

    fn collect_object(&mut self, fields: &Fields, depth: usize) -> Result<Value, PromptError> {
        let indent = self.indent(depth);
        let mut data = Map::new();

        for (key, field) in fields {
            let value = match field {
                SchemaNode::Leaf => self.collect_leaf(key, depth)?,
                SchemaNode::Object(_) => {
                    self.prompter.say(&format!("{indent}{key}:"))?;
                    self.collect_node(field, key, depth + 1)?
                }
                SchemaNode::Array(_) => {
                    self.prompter.say(&format!("{indent}{key} (array):"))?;
                    self.collect_node(field, key, depth + 1)?
                }
            };
            data.insert(key.clone(), value);
        }

        Ok(Value::Object(data))
    }

    fn collect_array(
        &mut self,
        template: &SchemaNode,
        label: &str,
        depth: usize,
    ) -> Result<Value, PromptError> {
        let indent = self.indent(depth);
        let mut items = Vec::new();

        loop {
            let item_label = format!("{label}[{}]", items.len());
            let item = self.collect_node(template, &item_label, depth + 1)?;
            items.push(item);
            debug!("collected {item_label}");

            if !self
                .prompter
                .confirm(&format!("{indent}Add another item to the array? (y/n): "))?
            {
                break;
            }
        }

        Ok(Value::Array(items))
    }
}
