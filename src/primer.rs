//! Primed module sources
//!
//! A primer hands out the already-prepared source text of a module, keyed by
//! the source path recorded in the manifest, and the live file metadata used
//! by debug mode. Jammer never transforms what it reads.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::Result;

/// Live metadata of a module source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStat {
    /// Modification time, unix seconds
    pub modified: i64,
    pub len: u64,
}

/// Source content store
pub trait Primer {
    /// Read the primed content of a module source
    fn read_primed(&self, path: &Path) -> Result<String>;

    /// Stat a module source
    fn metadata(&self, path: &Path) -> Result<SourceStat>;
}

/// Primer reading sources from a directory on disk
#[derive(Debug, Clone)]
pub struct FsPrimer {
    root: PathBuf,
}

impl FsPrimer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Primer for FsPrimer {
    fn read_primed(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        std::fs::read_to_string(&full_path)
            .map_err(|e| crate::file_error_context!(full_path.display(), e))
    }

    fn metadata(&self, path: &Path) -> Result<SourceStat> {
        let full_path = self.resolve(path);
        let metadata = std::fs::metadata(&full_path)
            .map_err(|e| crate::file_error_context!(full_path.display(), e))?;
        let modified = metadata
            .modified()
            .map_err(|e| crate::file_error_context!(full_path.display(), e))?;
        let modified = match modified.duration_since(UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
            Err(before) => -i64::try_from(before.duration().as_secs()).unwrap_or(i64::MAX),
        };
        Ok(SourceStat {
            modified,
            len: metadata.len(),
        })
    }
}
