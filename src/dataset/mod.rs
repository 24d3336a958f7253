pub mod cache;
pub mod parse;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub use cache::DatasetCache;
pub use parse::parse_csv;

/// One data row: column name → raw string value. Fields a ragged row did
/// not supply are absent rather than empty.
pub type Record = BTreeMap<String, String>;

/// All records from one CSV source, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names in header order.
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read a CSV file and parse it into a `Dataset`.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading csv source `{}`", path.display()))?;
    parse_csv(&text).with_context(|| format!("parsing csv source `{}`", path.display()))
}
