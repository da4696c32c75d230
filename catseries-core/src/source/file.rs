//! Local-file source provider, for offline runs and fixtures.

use super::provider::{expect_array, FetchError, SourceProvider};
use crate::domain::SourceId;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names used by [`FileProvider::in_dir`], matching the upstream endpoints.
pub const DEFAULT_FILE_NAMES: [&str; 3] = ["data1.json", "data2.json", "data3.json"];

/// Reads each source's raw array from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileProvider {
    a: PathBuf,
    b: PathBuf,
    c: PathBuf,
}

impl FileProvider {
    pub fn new(a: impl Into<PathBuf>, b: impl Into<PathBuf>, c: impl Into<PathBuf>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }

    /// `dir/data1.json`, `dir/data2.json`, `dir/data3.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let [a, b, c] = DEFAULT_FILE_NAMES;
        Self::new(dir.join(a), dir.join(b), dir.join(c))
    }

    pub fn path(&self, source: SourceId) -> &Path {
        match source {
            SourceId::A => &self.a,
            SourceId::B => &self.b,
            SourceId::C => &self.c,
        }
    }
}

impl SourceProvider for FileProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self, source: SourceId) -> Result<Vec<Value>, FetchError> {
        let path = self.path(source);
        let location = path.display().to_string();
        debug!(%source, path = %location, "reading source file");

        let content = std::fs::read_to_string(path).map_err(|e| FetchError::Io {
            location: location.clone(),
            message: e.to_string(),
        })?;

        let doc: Value = serde_json::from_str(&content)
            .map_err(|e| FetchError::ResponseFormat(format!("{location}: {e}")))?;

        expect_array(&location, doc)
    }
}
