//! # recordtree
//!
//! Recursive record schemas for interactive, schema-driven data entry.
//!
//! A record schema is a tree of text leaves, named objects and arrays that
//! hold exactly one element template. Alongside every schema lives a sparse
//! twin, the metadata schema, which marks the leaves that should be copied
//! into a consolidated metadata index.
//!
//! ## Features
//!
//! - Interactive schema definition, one field at a time ([`SchemaBuilder`])
//! - Schema-guided value collection producing JSON instances ([`DataCollector`])
//! - Metadata projection that keeps only marked leaves ([`project`])
//! - Whole-document JSON persistence for schemas, instances and the index
//! - A pluggable prompt transport ([`Prompter`]) for terminals, scripts and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recordtree::{BuildOptions, DataCollector, LinePrompter, SchemaBuilder, project};
//!
//! let mut prompter = LinePrompter::stdio();
//! let pair = SchemaBuilder::new(&mut prompter, BuildOptions::default())
//!     .build()
//!     .unwrap();
//!
//! let data = DataCollector::new(&mut prompter).collect(&pair.schema).unwrap();
//! let entry = project(&pair.schema, &pair.metadata, &data).unwrap();
//! println!("{entry:#}");
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema tree, metadata index and their JSON encoding
//! - [`prompt`] - Text prompt transport
//! - [`builder`] - Interactive schema construction
//! - [`collector`] - Schema-guided data collection
//! - [`projector`] - Metadata projection
//! - [`repository`] - JSON document storage per submodule folder

/// Schema tree, metadata index and their JSON encoding.
pub mod data;

/// Builder options shared by the interactive algorithms.
pub mod options;

/// Text prompt transport used by every interactive step.
pub mod prompt;

/// Interactive schema construction.
pub mod builder;

/// Schema-guided data collection.
pub mod collector;

/// Metadata projection from data instances.
pub mod projector;

/// Whole-document JSON storage for submodules.
pub mod repository;

pub use builder::SchemaBuilder;
pub use collector::DataCollector;
pub use data::{MetadataIndex, MetadataSchemaNode, SchemaError, SchemaNode, SchemaPair};
pub use options::{BuildOptions, Termination};
pub use projector::{ProjectError, project};
pub use prompt::{LinePrompter, PromptError, Prompter, ScriptedPrompter};
pub use repository::{FsRepository, Repository, RepositoryError};
pub use serde_json::Value;
