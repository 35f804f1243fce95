//! Label data store
//!
//! The whole catalog lives in one JSON file. Every read re-parses the file
//! and every write replaces it whole; nothing is cached.
//!
//! Writes inside this process are serialized by a write lock around
//! load-modify-save, so two concurrent admin edits cannot lose each other's
//! changes. Other processes writing the same file are not coordinated with:
//! the last writer wins.

use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use shared::{Catalog, CatalogError, CatalogResult, Kit, MoveDirection, Part};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Label store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Label data I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Label data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// JSON file backed catalog store
#[derive(Debug)]
pub struct LabelStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LabelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the catalog; a missing file is an empty catalog
    ///
    /// A file that exists but does not parse is an error, never replaced.
    pub fn load(&self) -> StoreResult<Catalog> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Label data file missing, starting empty");
                return Ok(Catalog::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        Ok(serde_json::from_slice(&raw)?)
    }

    /// Overwrite the file with `catalog`
    ///
    /// Written to a sibling temp file and renamed into place, so readers
    /// see either the old or the new document.
    pub fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        let json = serde_json::to_vec(catalog)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&json).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), kits = catalog.len(), "Label data saved");
        Ok(())
    }

    /// Load, apply `edit`, save; nothing is written when `edit` fails
    pub fn update<T>(&self, edit: impl FnOnce(&mut Catalog) -> CatalogResult<T>) -> StoreResult<T> {
        let _guard = self.write_lock.lock();
        let mut catalog = self.load()?;
        let result = edit(&mut catalog)?;
        self.save(&catalog)?;
        Ok(result)
    }

    /// Parts of one kit, in order
    pub fn kit(&self, kit_number: &str) -> StoreResult<Kit> {
        let catalog = self.load()?;
        catalog
            .kit(kit_number)
            .cloned()
            .ok_or_else(|| CatalogError::KitNotFound(kit_number.to_string()).into())
    }

    #[instrument(skip(self, description))]
    pub fn add_part(&self, kit_number: &str, part_number: &str, description: &str) -> StoreResult<()> {
        self.update(|catalog| catalog.add_part(kit_number, part_number, description))?;
        info!("Part added");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn delete_part(&self, kit_number: &str, part_id: &str) -> StoreResult<Part> {
        let removed = self.update(|catalog| catalog.delete_part(kit_number, part_id))?;
        info!("Part deleted");
        Ok(removed)
    }

    /// Swap a part with its neighbour; returns whether it moved and the new
    /// part order of the kit
    ///
    /// A move past either end leaves the file as it is.
    #[instrument(skip(self))]
    pub fn move_part(
        &self,
        kit_number: &str,
        part_id: &str,
        direction: MoveDirection,
    ) -> StoreResult<(bool, Vec<String>)> {
        let _guard = self.write_lock.lock();
        let mut catalog = self.load()?;

        let moved = catalog.move_part(kit_number, part_id, direction)?;
        let order = catalog
            .part_order(kit_number)?
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        if moved {
            self.save(&catalog)?;
        }

        info!(moved, "Part move handled");
        Ok((moved, order))
    }
}
