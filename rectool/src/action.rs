//! The `submodule` and `add` actions.
//!
//! - `submodule` asks for a folder name and defines its schema.
//! - `add` asks for a folder and an instance name, collects the instance,
//!   stores it and refreshes the folder's metadata index.

use anyhow::{Context, Result};
use colored::Colorize;
use recordtree::{BuildOptions, DataCollector, Prompter, Repository, SchemaBuilder, project};

use crate::ctx::AppContext;

/// Action selected at the start of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Define the schema of a submodule.
    Submodule,
    /// Add one instance to a submodule.
    Add,
    /// Anything else, kept verbatim.
    Invalid(String),
}

impl Action {
    /// Match an action word exactly.
    pub fn parse(input: &str) -> Self {
        match input {
            "submodule" => Action::Submodule,
            "add" => Action::Add,
            other => Action::Invalid(other.to_string()),
        }
    }
}

/// How an action ended. None of these is a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Schema files written for the folder.
    SubmoduleCreated { folder: String },
    /// Instance stored and metadata index updated.
    InstanceAdded {
        folder: String,
        name: String,
        replaced: bool,
    },
    /// `add` on a folder without a schema; nothing was written.
    MissingStructure { folder: String },
    /// Unknown action word.
    InvalidAction(String),
}

/// Runs actions against a prompt transport and a repository.
pub struct ActionHandler<P, R> {
    prompter: P,
    repository: R,
    options: BuildOptions,
}

impl<P: Prompter, R: Repository> ActionHandler<P, R> {
    pub fn new(prompter: P, repository: R, options: BuildOptions) -> Self {
        Self {
            prompter,
            repository,
            options,
        }
    }

    /// Run one session: read the action unless given, then dispatch it.
    ///
    /// # Errors
    ///
    /// Returns an error when prompting or storage fails.
    pub fn run(&mut self, action: Option<&str>) -> Result<Outcome> {
        let action = match action {
            Some(action) => action.to_string(),
            None => self.prompter.ask("Enter action (submodule/add): ")?,
        };
        self.dispatch(Action::parse(&action))
    }

    /// Handle an already parsed action.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        match action {
            Action::Submodule => self.handle_submodule(),
            Action::Add => self.handle_add(),
            Action::Invalid(word) => {
                debug!("invalid action {word:?}");
                self.prompter.say(
                    &"Invalid action. Use \"submodule\" or \"add\"."
                        .yellow()
                        .to_string(),
                )?;
                Ok(Outcome::InvalidAction(word))
            }
        }
    }

    /// Define a submodule schema and write both schema files.
    pub fn handle_submodule(&mut self) -> Result<Outcome> {
        let folder = self.prompter.ask("Enter folder name: ")?;
        info!("defining schema for {folder:?}");

        let pair = SchemaBuilder::new(&mut self.prompter, self.options.clone()).build()?;
        let (structure, metadata) = self
            .repository
            .save_schemas(&folder, &pair)
            .with_context(|| format!("Failed to save schemas of {folder:?}"))?;

        self.prompter.say(
            &format!("Structure file created at {}", structure.display())
                .green()
                .to_string(),
        )?;
        self.prompter.say(
            &format!("Metadata structure file created at {}", metadata.display())
                .green()
                .to_string(),
        )?;
        Ok(Outcome::SubmoduleCreated { folder })
    }

    /// Collect one instance, store it and update the metadata index.
    pub fn handle_add(&mut self) -> Result<Outcome> {
        let folder = self.prompter.ask("Enter folder name where to add: ")?;
        let name = self.prompter.ask("Enter add name: ")?;

        if !self.repository.has_schema(&folder) {
            self.prompter
                .say(&"Structure file does not exist!".yellow().to_string())?;
            return Ok(Outcome::MissingStructure { folder });
        }

        let pair = self
            .repository
            .load_schemas(&folder)
            .with_context(|| format!("Failed to load schemas of {folder:?}"))?;

        let data = DataCollector::new(&mut self.prompter)
            .with_indent_width(self.options.indent_width)
            .collect(&pair.schema)?;

        let projected = project(&pair.schema, &pair.metadata, &data)
            .with_context(|| format!("Failed to project metadata of {name:?}"))?;
        let mut index = self
            .repository
            .load_index(&folder)
            .with_context(|| format!("Failed to load metadata index of {folder:?}"))?;
        let replaced = index.upsert(&name, projected).is_some();
        if replaced {
            info!("replaced metadata entry {name:?}");
        }
        debug!(
            "metadata index of {folder:?} holds {:?}",
            index.names().collect::<Vec<_>>()
        );

        let info_path = self
            .repository
            .save_instance(&folder, &name, &data)
            .with_context(|| format!("Failed to save instance {name:?}"))?;
        self.prompter.say(
            &format!("Data added to \"{}\".", info_path.display())
                .green()
                .to_string(),
        )?;

        let index_path = self
            .repository
            .save_index(&folder, &index)
            .with_context(|| format!("Failed to save metadata index of {folder:?}"))?;
        self.prompter.say(
            &format!("Metadata updated in \"{}\".", index_path.display())
                .green()
                .to_string(),
        )?;

        Ok(Outcome::InstanceAdded {
            folder,
            name,
            replaced,
        })
    }
}

impl<P: Prompter> ActionHandler<P, recordtree::FsRepository> {
    /// Handler rooted at the context's workspace with its configured options.
    pub fn from_context(ctx: &AppContext, prompter: P) -> Self {
        Self::new(prompter, ctx.repository(), ctx.build_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordtree::{FsRepository, ScriptedPrompter, Value};
    use serde_json::json;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn handler<'a>(
        root: &Path,
        prompter: &'a mut ScriptedPrompter,
    ) -> ActionHandler<&'a mut ScriptedPrompter, FsRepository> {
        ActionHandler::new(prompter, FsRepository::new(root), BuildOptions::default())
    }

    fn read(path: impl AsRef<Path>) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn define_widgets(root: &Path) {
        let mut prompter = ScriptedPrompter::new([
            "submodule", "widgets", //
            "name", "n", "y", //
            "tags", "y", "y", // array of objects
            "label", "n", "n", //
            "code", "n", "y", //
            "done", "n", //
            "done",
        ]);
        let outcome = handler(root, &mut prompter).run(None).unwrap();
        assert_eq!(
            outcome,
            Outcome::SubmoduleCreated {
                folder: "widgets".to_string()
            }
        );
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("submodule"), Action::Submodule);
        assert_eq!(Action::parse("add"), Action::Add);
        assert_eq!(Action::parse("Add"), Action::Invalid("Add".to_string()));
    }

    #[test]
    fn test_submodule_writes_both_schemas() {
        let tmp = TempDir::new().unwrap();
        define_widgets(tmp.path());

        let dir = tmp.path().join("widgets");
        assert_eq!(
            read(dir.join(".structure")),
            json!({ "name": "", "tags": [{ "label": "", "code": "" }] })
        );
        assert_eq!(
            read(dir.join(".metadataStructure")),
            json!({ "name": "", "tags": [{ "code": "" }] })
        );
    }

    #[test]
    fn test_add_stores_instance_and_metadata() {
        let tmp = TempDir::new().unwrap();
        define_widgets(tmp.path());

        let mut prompter = ScriptedPrompter::new([
            "widgets", "w1", //
            "widget", //
            "red", "r", "y", //
            "blue", "b", "n",
        ]);
        let outcome = handler(tmp.path(), &mut prompter).run(Some("add")).unwrap();
        assert_eq!(
            outcome,
            Outcome::InstanceAdded {
                folder: "widgets".to_string(),
                name: "w1".to_string(),
                replaced: false,
            }
        );

        let dir = tmp.path().join("widgets");
        assert_eq!(
            read(dir.join("w1/info.json")),
            json!({
                "name": "widget",
                "tags": [
                    { "label": "red", "code": "r" },
                    { "label": "blue", "code": "b" }
                ]
            })
        );
        assert_eq!(
            read(dir.join("metadata.json")),
            json!({ "w1": { "name": "widget", "tags": [{ "code": "r" }, { "code": "b" }] } })
        );
        assert!(
            prompter
                .transcript()
                .iter()
                .any(|line| line.contains("Metadata updated in"))
        );
    }

    #[test]
    fn test_add_same_name_overwrites() {
        let tmp = TempDir::new().unwrap();
        define_widgets(tmp.path());

        let mut first = ScriptedPrompter::new(["widgets", "w1", "a", "l1", "c1", "n"]);
        handler(tmp.path(), &mut first).run(Some("add")).unwrap();
        let mut other = ScriptedPrompter::new(["widgets", "w2", "z", "l9", "c9", "n"]);
        handler(tmp.path(), &mut other).run(Some("add")).unwrap();

        let mut second = ScriptedPrompter::new(["widgets", "w1", "b", "l2", "", "n"]);
        let outcome = handler(tmp.path(), &mut second).run(Some("add")).unwrap();
        assert!(matches!(outcome, Outcome::InstanceAdded { replaced: true, .. }));

        let dir = tmp.path().join("widgets");
        assert_eq!(
            read(dir.join("w1/info.json")),
            json!({ "name": "b", "tags": [{ "label": "l2", "code": "" }] })
        );
        assert_eq!(
            read(dir.join("metadata.json")),
            json!({
                "w1": { "name": "b", "tags": [{ "code": "" }] },
                "w2": { "name": "z", "tags": [{ "code": "c9" }] }
            })
        );
    }

    #[test]
    fn test_add_without_structure_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new(["add", "ghost", "g1"]);

        let outcome = handler(tmp.path(), &mut prompter).run(None).unwrap();
        assert_eq!(
            outcome,
            Outcome::MissingStructure {
                folder: "ghost".to_string()
            }
        );
        assert!(
            prompter
                .transcript()
                .last()
                .unwrap()
                .contains("Structure file does not exist!")
        );
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_action() {
        let tmp = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new(["delete"]);

        let outcome = handler(tmp.path(), &mut prompter).run(None).unwrap();
        assert_eq!(outcome, Outcome::InvalidAction("delete".to_string()));
        assert!(
            prompter
                .transcript()
                .last()
                .unwrap()
                .contains("Invalid action.")
        );
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_interrupted_add_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        define_widgets(tmp.path());

        let mut prompter = ScriptedPrompter::new(["widgets", "w1", "widget", "red"]);
        assert!(handler(tmp.path(), &mut prompter).run(Some("add")).is_err());
        assert!(!tmp.path().join("widgets/w1").exists());
        assert!(!tmp.path().join("widgets/metadata.json").exists());
    }

    #[test]
    fn test_broken_index_stores_no_instance() {
        let tmp = TempDir::new().unwrap();
        define_widgets(tmp.path());
        let index_path = tmp.path().join("widgets/metadata.json");
        fs::write(&index_path, "{ broken").unwrap();

        let mut prompter = ScriptedPrompter::new(["widgets", "w1", "widget", "red", "r", "n"]);
        assert!(handler(tmp.path(), &mut prompter).run(Some("add")).is_err());
        assert!(!tmp.path().join("widgets/w1").exists());
        assert_eq!(fs::read_to_string(&index_path).unwrap(), "{ broken");
    }

    #[test]
    fn test_from_context_uses_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".rectool.toml"),
            "done_keyword = \"end\"\ntermination = \"session\"\n",
        )
        .unwrap();
        let ctx = AppContext::init(tmp.path().to_path_buf(), None).unwrap();

        let mut prompter = ScriptedPrompter::new([
            "s", //
            "o", "y", "n", //
            "k", "n", "y", //
            "END", // closes both levels
            "n",
        ]);
        ActionHandler::from_context(&ctx, &mut prompter)
            .run(Some("submodule"))
            .unwrap();
        assert_eq!(
            read(tmp.path().join("s/.structure")),
            json!({ "o": { "k": "" } })
        );
    }
}
