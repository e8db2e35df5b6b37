//! Schema tree, metadata index and their JSON encoding.
//!
//! - [`schema`] - The recursive [`SchemaNode`] and its metadata twin
//! - [`index`] - The per-submodule [`MetadataIndex`]

/// Recursive schema nodes and the on-disk schema encoding.
pub mod schema;

/// Metadata index keyed by instance name.
pub mod index;

pub use index::MetadataIndex;
pub use schema::{Fields, MetadataSchemaNode, SchemaError, SchemaNode, SchemaPair};

/// Path of the document root in error messages.
pub(crate) const ROOT_PATH: &str = "$";

/// Join an object key onto a dotted path.
pub(crate) fn key_path(parent: &str, key: &str) -> String {
    format!("{parent}.{key}")
}

/// Join an array position onto a dotted path.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
