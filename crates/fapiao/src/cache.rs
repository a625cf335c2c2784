//! Durable per-file cache of interpreted invoice records.
//!
//! The key is purely path-derived: `cache_res_<basename>.json`, co-located
//! with the source file. Identical content under different file names is
//! re-interpreted; identical names in different directories get independent
//! entries. Content hashing is deliberately not used.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::CacheError;
use crate::model::InvoiceInfo;

const CACHE_PREFIX: &str = "cache_res_";

#[derive(Debug, Default)]
pub struct InvoiceCache;

impl InvoiceCache {
    pub fn new() -> Self {
        Self
    }

    /// Cache entry location for a source file.
    pub fn entry_path(source: &Path) -> PathBuf {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let dir = source.parent().unwrap_or_else(|| Path::new(""));
        dir.join(format!("{}{}.json", CACHE_PREFIX, file_name))
    }

    /// Returns the cached record for `source`, or `None` when there is no
    /// entry. A corrupt or unreadable entry logs a warning and reads as
    /// absent so the caller falls through to fresh interpretation.
    pub fn lookup(&self, source: &Path) -> Option<InvoiceInfo> {
        let path = Self::entry_path(source);
        if !path.exists() {
            return None;
        }

        match self.read_entry(&path) {
            Ok(info) => {
                debug!("Cache hit: {}", path.display());
                Some(info)
            }
            Err(e) => {
                warn!("Discarding unusable cache entry: {}", e);
                None
            }
        }
    }

    /// Serializes the full record to the entry location, overwriting any
    /// previous entry unconditionally.
    pub fn store(&self, source: &Path, info: &InvoiceInfo) -> Result<(), CacheError> {
        let path = Self::entry_path(source);
        let json = serde_json::to_string_pretty(info).map_err(|e| CacheError::Encode {
            path: path.clone(),
            source: e,
        })?;

        std::fs::write(&path, json).map_err(|e| CacheError::Write {
            path: path.clone(),
            source: e,
        })?;

        debug!("Cache entry written: {}", path.display());
        Ok(())
    }

    fn read_entry(&self, path: &Path) -> Result<InvoiceInfo, CacheError> {
        let content = std::fs::read_to_string(path).map_err(|e| CacheError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| CacheError::Decode {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
