//! File-backed record source

use std::fs;
use std::io;
use std::path::PathBuf;

use goalcast_core::error::SourceError;
use goalcast_core::model::{RecordKind, RecordSource};

/// Reads provider documents from `<dir>/<kind>.json`.
///
/// ```text
/// records/
///   net_worth.json
///   bank_transactions.json
///   mutual_fund_transactions.json   (optional)
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.key()))
    }
}

impl RecordSource for DirectorySource {
    fn fetch(&self, kind: RecordKind) -> Result<serde_json::Value, SourceError> {
        let path = self.path_for(kind);
        tracing::debug!(path = %path.display(), %kind, "reading records");

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(kind));
            }
            Err(e) => {
                return Err(SourceError::Unavailable {
                    kind,
                    reason: format!("{}: {e}", path.display()),
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| SourceError::Unavailable {
            kind,
            reason: format!("{}: invalid JSON: {e}", path.display()),
        })
    }
}
