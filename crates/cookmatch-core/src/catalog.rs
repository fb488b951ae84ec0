//! JSON catalog on disk, used as the candidate source by the CLI.
//!
//! Layout: `<root>/providers/**/*.json` and `<root>/listings/**/*.json`, each
//! file holding a JSON array of records. Files are read in path order so the
//! structural order of the candidate set is deterministic.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::query::CoarseFilter;
use crate::traits::{Candidate, CandidateSource};
use crate::types::EntityKind;

#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    pub fn kind_dir(&self, kind: EntityKind) -> PathBuf { self.root.join(kind.catalog_dir()) }

    /// Read every record of `C`'s entity kind.
    pub fn load<C>(&self) -> Result<Vec<C>>
    where
        C: Candidate + DeserializeOwned,
    {
        let kind = C::profile().kind;
        let dir = self.kind_dir(kind);
        if !dir.is_dir() {
            return Err(Error::NotFound(format!("{} catalog directory {}", kind, dir.display())));
        }
        let files = self.list_json_files(&dir)?;
        let mut records = Vec::new();
        for file_path in &files {
            let batch: Vec<C> = self.read_records(file_path)?;
            debug!(file = %file_path.display(), count = batch.len(), "loaded catalog file");
            records.extend(batch);
        }
        debug!(%kind, files = files.len(), records = records.len(), "catalog loaded");
        Ok(records)
    }

    fn read_records<C: DeserializeOwned>(&self, file_path: &Path) -> Result<Vec<C>> {
        let content = fs::read_to_string(file_path)?;
        serde_json::from_str(&content).map_err(|source| Error::Catalog { path: file_path.to_path_buf(), source })
    }

    fn list_json_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root) {
            let entry = entry.map_err(|e| Error::Operation(format!("walking {}: {}", root.display(), e)))?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                json_files.push(path.to_path_buf());
            }
        }
        json_files.sort();
        Ok(json_files)
    }
}

/// A flat file store cannot evaluate predicates, so the coarse filter is ignored.
impl<C> CandidateSource<C> for Catalog
where
    C: Candidate + DeserializeOwned,
{
    fn fetch(&self, _coarse: &CoarseFilter<'_>) -> anyhow::Result<Vec<C>> { Ok(self.load()?) }
}
