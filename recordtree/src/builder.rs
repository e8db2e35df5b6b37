//! Interactive schema construction.
//!
//! The builder asks for one field name at a time, depth first, starting from
//! an empty root object. Nested fields open a new level that is defined the
//! same way; the sentinel word (`done` by default) closes a level. Leaves
//! can be marked for the metadata index as they are defined.

use log::{debug, info, warn};

use crate::{
    data::{Fields, SchemaNode, SchemaPair},
    options::{BuildOptions, Termination},
    prompt::{PromptError, Prompter},
};

/// What the caller of a level should do once that level returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Keep asking for fields at the parent level.
    Continue,
    /// Close the parent level as well.
    Stop,
}

/// Builds a [`SchemaPair`] from interactive answers.
pub struct SchemaBuilder<P> {
    prompter: P,
    options: BuildOptions,
}

impl<P: Prompter> SchemaBuilder<P> {
    pub fn new(prompter: P, options: BuildOptions) -> Self {
        Self { prompter, options }
    }

    /// Run the whole definition dialogue.
    ///
    /// # Errors
    ///
    /// Fails only when the prompt transport fails or input ends; nothing is
    /// returned for a partially defined schema.
    pub fn build(&mut self) -> Result<SchemaPair, PromptError> {
        let mut fields = Fields::new();
        let mut metadata = Fields::new();
        self.ask_fields(&mut fields, &mut metadata, 0)?;

        let pair = SchemaPair {
            schema: SchemaNode::Object(fields),
            metadata: SchemaNode::Object(metadata),
        };
        info!(
            "schema defined: {} leaves, {} marked for metadata",
            pair.schema.leaf_count(),
            pair.metadata.leaf_count()
        );
        Ok(pair)
    }

    fn ask_fields(
        &mut self,
        fields: &mut Fields,
        metadata: &mut Fields,
        depth: usize,
    ) -> Result<Flow, PromptError> {
        let indent = self.options.indent(depth);

        loop {
            let name = self.prompter.ask(&format!(
                "{indent}Enter a field name (or type '{}' to finish): ",
                self.options.done_keyword
            ))?;
            if self.options.is_done(&name) {
                return Ok(match self.options.termination {
                    Termination::Level => Flow::Continue,
                    Termination::Session => Flow::Stop,
                });
            }

            if fields.contains_key(&name) {
                warn!("field {name:?} redefined at depth {depth}");
                metadata.shift_remove(&name);
            }

            let nested = self
                .prompter
                .confirm(&format!("{indent}Is this field a nested structure? (y/n): "))?;

            let mut flow = Flow::Continue;
            if nested {
                let is_array = self
                    .prompter
                    .confirm(&format!("{indent}Is this field an array? (y/n): "))?;

                let mut child = Fields::new();
                let mut meta_child = Fields::new();
                flow = self.ask_fields(&mut child, &mut meta_child, depth + 1)?;

                let (node, meta_node) = if is_array {
                    (
                        SchemaNode::array(SchemaNode::Object(child)),
                        SchemaNode::array(SchemaNode::Object(meta_child)),
                    )
                } else {
                    (SchemaNode::Object(child), SchemaNode::Object(meta_child))
                };
                debug!("nested field {name:?} defined (array: {is_array})");
                fields.insert(name.clone(), node);
                metadata.insert(name.clone(), meta_node);
            } else {
                debug!("leaf field {name:?} defined");
                fields.insert(name.clone(), SchemaNode::Leaf);
            }

            let include = self
                .prompter
                .confirm(&format!("{indent}Include \"{name}\" in metadata? (y/n): "))?;
            if include {
                if nested {
                    // Containers always reach the metadata schema; their
                    // leaves decide what gets projected.
                    warn!("metadata inclusion of nested field {name:?} ignored");
                } else {
                    metadata.insert(name, SchemaNode::Leaf);
                }
            }

            if flow == Flow::Stop {
                return Ok(Flow::Stop);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use serde_json::json;

    fn build_with(answers: &[&str], options: BuildOptions) -> (SchemaPair, ScriptedPrompter) {
        let mut prompter = ScriptedPrompter::new(answers.iter().copied());
        let pair = SchemaBuilder::new(&mut prompter, options).build().unwrap();
        (pair, prompter)
    }

    #[test]
    fn test_flat_schema() {
        let (pair, prompter) = build_with(
            &["name", "n", "y", "color", "n", "n", "DONE"],
            BuildOptions::default(),
        );

        assert_eq!(pair.schema.as_json(), json!({ "name": "", "color": "" }));
        assert_eq!(pair.metadata.as_json(), json!({ "name": "" }));
        assert_eq!(prompter.remaining(), 0);
        assert_eq!(
            prompter.transcript()[..3],
            [
                "Enter a field name (or type 'done' to finish): ",
                "Is this field a nested structure? (y/n): ",
                "Include \"name\" in metadata? (y/n): ",
            ]
        );
    }

    #[test]
    fn test_nested_object_and_array() {
        let answers = [
            "title", "n", "y", //
            "owner", "y", "n", // nested object
            "  first", "n", "y", //
            "last", "n", "n", //
            "done", "n", // close owner, skip metadata
            "parts", "y", "y", // array of objects
            "sku", "n", "y", //
            "done", "y", // close template, redundant inclusion
            "done",
        ];
        let (pair, prompter) = build_with(&answers, BuildOptions::default());

        assert_eq!(
            pair.schema.as_json(),
            json!({
                "title": "",
                "owner": { "  first": "", "last": "" },
                "parts": [{ "sku": "" }]
            })
        );
        assert_eq!(
            pair.metadata.as_json(),
            json!({
                "title": "",
                "owner": { "  first": "" },
                "parts": [{ "sku": "" }]
            })
        );
        assert!(
            prompter
                .transcript()
                .contains(&"  Enter a field name (or type 'done' to finish): ".to_string())
        );
    }

    #[test]
    fn test_level_termination_keeps_parent_open() {
        let answers = [
            "outer", "y", "n", //
            "inner", "n", "n", //
            "done", "n", //
            "after", "n", "n", //
            "done",
        ];
        let (pair, _) = build_with(&answers, BuildOptions::default());
        assert_eq!(
            pair.schema.as_json(),
            json!({ "outer": { "inner": "" }, "after": "" })
        );
    }

    #[test]
    fn test_session_termination_closes_every_level() {
        let options = BuildOptions {
            termination: Termination::Session,
            ..Default::default()
        };
        let answers = [
            "outer", "y", "n", //
            "deeper", "y", "y", //
            "leaf", "n", "y", //
            "done", // closes all three levels
            "y",    // metadata question for "deeper" is still asked
            "n",    // and for "outer"
        ];
        let (pair, prompter) = build_with(&answers, options);

        assert_eq!(
            pair.schema.as_json(),
            json!({ "outer": { "deeper": [{ "leaf": "" }] } })
        );
        assert_eq!(
            pair.metadata.as_json(),
            json!({ "outer": { "deeper": [{ "leaf": "" }] } })
        );
        assert_eq!(prompter.remaining(), 0);
        assert_eq!(
            prompter.transcript().last().unwrap(),
            "Include \"outer\" in metadata? (y/n): "
        );
    }

    #[test]
    fn test_empty_name_and_redefinition() {
        let answers = [
            "", "n", "y", // empty name is a literal key
            "size", "n", "y", //
            "size", "y", "n", // redefined as nested object
            "w", "n", "n", //
            "done", "n", //
            "done",
        ];
        let (pair, _) = build_with(&answers, BuildOptions::default());

        assert_eq!(pair.schema.as_json(), json!({ "": "", "size": { "w": "" } }));
        assert_eq!(pair.metadata.as_json(), json!({ "": "", "size": {} }));
    }

    #[test]
    fn test_custom_sentinel() {
        let options = BuildOptions {
            done_keyword: "end".to_string(),
            ..Default::default()
        };
        let (pair, prompter) = build_with(&["done", "n", "n", "End"], options);

        assert_eq!(pair.schema.as_json(), json!({ "done": "" }));
        assert_eq!(
            prompter.transcript()[0],
            "Enter a field name (or type 'end' to finish): "
        );
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut prompter = ScriptedPrompter::new(["name", "n"]);
        let result = SchemaBuilder::new(&mut prompter, BuildOptions::default()).build();
        assert!(matches!(result, Err(PromptError::EndOfInput { .. })));
    }
}
