//! JSON checkpoint store for pipeline stages.
//!
//! Each stage is computed once and written to `<output_dir>/<artifact>`.
//! Later runs read the artifact back instead of recomputing it; an existing
//! artifact is never overwritten.

use factcheck_core::FactSet;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::artifacts::ArtifactKind;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to build {kind}: {message}")]
    Build { kind: ArtifactKind, message: String },
}

/// Artifact directory of one fact set.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    fact_set: FactSet,
}

impl ArtifactStore {
    /// Open (and create if needed) the artifact directory.
    pub fn open(root: impl Into<PathBuf>, fact_set: FactSet) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root, fact_set })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn fact_set(&self) -> FactSet {
        self.fact_set
    }

    #[must_use]
    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.file_name(self.fact_set))
    }

    #[must_use]
    pub fn exists(&self, kind: ArtifactKind) -> bool {
        self.path(kind).is_file()
    }

    /// Read an artifact, `None` when it has not been written yet.
    pub fn load<T: DeserializeOwned>(&self, kind: ArtifactKind) -> Result<Option<T>, StoreError> {
        let path = self.path(kind);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let value =
            serde_json::from_str(&content).map_err(|source| StoreError::Json { path, source })?;
        Ok(Some(value))
    }

    /// Write an artifact as pretty JSON through a temporary file.
    ///
    /// Fails with an I/O error if the artifact already exists.
    pub fn save<T: Serialize>(&self, kind: ArtifactKind, value: &T) -> Result<(), StoreError> {
        let path = self.path(kind);
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        let json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;

        let mut file = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        file.persist_noclobber(&path).map_err(|e| io_err(e.error))?;

        info!("Saved {kind} to {}", path.display());
        Ok(())
    }

    /// Return the cached artifact, or compute, save and return it.
    pub fn load_or_create<T, F>(&self, kind: ArtifactKind, create: F) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> anyhow::Result<T>,
    {
        if let Some(value) = self.load(kind)? {
            debug!("Using cached {kind} from {}", self.path(kind).display());
            return Ok(value);
        }
        let value = create().map_err(|e| build_error(kind, &e))?;
        self.save(kind, &value)?;
        Ok(value)
    }

    /// Async counterpart of [`ArtifactStore::load_or_create`].
    pub async fn load_or_create_async<T, F, Fut>(
        &self,
        kind: ArtifactKind,
        create: F,
    ) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        if let Some(value) = self.load(kind)? {
            debug!("Using cached {kind} from {}", self.path(kind).display());
            return Ok(value);
        }
        let value = create().await.map_err(|e| build_error(kind, &e))?;
        self.save(kind, &value)?;
        Ok(value)
    }
}

fn build_error(kind: ArtifactKind, error: &anyhow::Error) -> StoreError {
    StoreError::Build {
        kind,
        message: format!("{error:#}"),
    }
}
