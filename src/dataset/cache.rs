use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{load_dataset, Dataset};

/// Identifies one on-disk version of a source file. When either component
/// changes the cached parse is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Version {
    modified: SystemTime,
    len: u64,
}

struct Entry {
    version: Version,
    dataset: Arc<Dataset>,
}

/// Per-path cache of parsed datasets, invalidated on file modification.
///
/// Every `load` stats the file; a cached entry is reused only while the
/// file's mtime and length are unchanged. Parsing happens outside the
/// lock, so two first-access callers may both parse — they compute the
/// same value and the second insert wins harmlessly.
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, Entry>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn load(&self, path: &Path) -> Result<Arc<Dataset>> {
        let version = stat_version(path).inspect_err(|_| {
            // A file that vanished must not keep serving from cache.
            self.entries.lock().unwrap().remove(path);
        })?;

        {
            let entries = self.entries.lock().unwrap();
            if let Some(entry) = entries.get(path) {
                if entry.version == version {
                    debug!(path = %path.display(), "dataset cache hit");
                    return Ok(Arc::clone(&entry.dataset));
                }
            }
        }

        let dataset = Arc::new(load_dataset(path)?);
        info!(
            path = %path.display(),
            rows = dataset.len(),
            "parsed dataset into cache"
        );

        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            path.to_path_buf(),
            Entry {
                version,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

fn stat_version(path: &Path) -> Result<Version> {
    let meta = fs::metadata(path)
        .with_context(|| format!("reading csv source `{}`", path.display()))?;
    let modified = meta
        .modified()
        .with_context(|| format!("reading mtime of `{}`", path.display()))?;
    Ok(Version {
        modified,
        len: meta.len(),
    })
}
