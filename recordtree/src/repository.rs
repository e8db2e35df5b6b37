//! Whole-document JSON storage for submodules.
//!
//! A submodule is a folder holding:
//!
//! - `.structure` - the full schema
//! - `.metadataStructure` - the metadata schema
//! - `<instance>/info.json` - one data instance per subfolder
//! - `metadata.json` - the metadata index
//!
//! Every document is read and written whole.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::info;
use serde_json::Value;

use crate::data::{MetadataIndex, SchemaError, SchemaNode, SchemaPair};

/// File name of the full schema inside a submodule folder.
pub const STRUCTURE_FILE: &str = ".structure";
/// File name of the metadata schema inside a submodule folder.
pub const METADATA_STRUCTURE_FILE: &str = ".metadataStructure";
/// File name of an instance document inside its instance folder.
pub const INFO_FILE: &str = "info.json";
/// File name of the metadata index inside a submodule folder.
pub const METADATA_INDEX_FILE: &str = "metadata.json";

/// Errors raised by a [`Repository`].
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid schema in {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("metadata index {} is not a JSON object", path.display())]
    InvalidIndex { path: PathBuf },
}

/// Storage for submodule schemas, instances and metadata indexes.
///
/// Write methods return the location of the written document.
pub trait Repository {
    /// Whether the submodule has a full schema.
    fn has_schema(&self, submodule: &str) -> bool;

    /// Persist both schemas of a submodule, creating its folder.
    fn save_schemas(
        &self,
        submodule: &str,
        pair: &SchemaPair,
    ) -> Result<(PathBuf, PathBuf), RepositoryError>;

    /// Load both schemas of a submodule.
    fn load_schemas(&self, submodule: &str) -> Result<SchemaPair, RepositoryError>;

    /// Persist one instance, replacing any previous instance of that name.
    fn save_instance(
        &self,
        submodule: &str,
        name: &str,
        data: &Value,
    ) -> Result<PathBuf, RepositoryError>;

    /// Load the metadata index, empty when it does not exist yet.
    fn load_index(&self, submodule: &str) -> Result<MetadataIndex, RepositoryError>;

    /// Rewrite the metadata index.
    fn save_index(
        &self,
        submodule: &str,
        index: &MetadataIndex,
    ) -> Result<PathBuf, RepositoryError>;
}

/// [`Repository`] backed by folders under a root directory.
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
}

impl FsRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder of a submodule.
    pub fn submodule_dir(&self, submodule: &str) -> PathBuf {
        self.root.join(submodule)
    }

    fn read_json(path: &Path) -> Result<Option<Value>, RepositoryError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(RepositoryError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| RepositoryError::Json {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write_json(path: &Path, value: &Value) -> Result<(), RepositoryError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| RepositoryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(value).map_err(|source| {
            RepositoryError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, content).map_err(|source| RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("wrote {}", path.display());
        Ok(())
    }

    fn read_schema(path: &Path) -> Result<SchemaNode, RepositoryError> {
        let value = Self::read_json(path)?.ok_or_else(|| RepositoryError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "schema file does not exist"),
        })?;
        SchemaNode::from_root_json(&value).map_err(|source| RepositoryError::Schema {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Repository for FsRepository {
    fn has_schema(&self, submodule: &str) -> bool {
        self.submodule_dir(submodule).join(STRUCTURE_FILE).is_file()
    }

    fn save_schemas(
        &self,
        submodule: &str,
        pair: &SchemaPair,
    ) -> Result<(PathBuf, PathBuf), RepositoryError> {
        let dir = self.submodule_dir(submodule);
        let structure = dir.join(STRUCTURE_FILE);
        let metadata = dir.join(METADATA_STRUCTURE_FILE);

        Self::write_json(&structure, &pair.schema.as_json())?;
        Self::write_json(&metadata, &pair.metadata.as_json())?;
        Ok((structure, metadata))
    }

    fn load_schemas(&self, submodule: &str) -> Result<SchemaPair, RepositoryError> {
        let dir = self.submodule_dir(submodule);
        Ok(SchemaPair {
            schema: Self::read_schema(&dir.join(STRUCTURE_FILE))?,
            metadata: Self::read_schema(&dir.join(METADATA_STRUCTURE_FILE))?,
        })
    }

    fn save_instance(
        &self,
        submodule: &str,
        name: &str,
        data: &Value,
    ) -> Result<PathBuf, RepositoryError> {
        let path = self.submodule_dir(submodule).join(name).join(INFO_FILE);
        Self::write_json(&path, data)?;
        Ok(path)
    }

    fn load_index(&self, submodule: &str) -> Result<MetadataIndex, RepositoryError> {
        let path = self.submodule_dir(submodule).join(METADATA_INDEX_FILE);
        match Self::read_json(&path)? {
            None => Ok(MetadataIndex::new()),
            Some(value) => {
                MetadataIndex::from_json(value).ok_or(RepositoryError::InvalidIndex { path })
            }
        }
    }

    fn save_index(
        &self,
        submodule: &str,
        index: &MetadataIndex,
    ) -> Result<PathBuf, RepositoryError> {
        let path = self.submodule_dir(submodule).join(METADATA_INDEX_FILE);
        Self::write_json(&path, &index.as_json())?;
        Ok(path)
    }
}
