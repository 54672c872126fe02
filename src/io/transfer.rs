use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use tempfile::NamedTempFile;

use crate::io::store::{StoreError, TaskStore};
use crate::model::{Query, Task};

/// Error type for JSON export/import
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("could not access {path}: {source}")]
    Io {
        path: String,
        source: io::Error,
    },
    #[error("could not parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a single imported record was skipped
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("title is empty")]
    EmptyTitle,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of an import: created tasks plus per-record failures
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<Task>,
    pub failed: Vec<(String, RecordError)>,
}

/// Write every task as pretty JSON. Returns the number exported.
pub fn export_tasks(store: &dyn TaskStore, path: &Path) -> Result<usize, TransferError> {
    let tasks = store.list(&Query::all())?;
    let json = serde_json::to_string_pretty(&tasks)?;
    atomic_write(path, json.as_bytes()).map_err(|e| TransferError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(tasks.len())
}

/// Create each record from the file as a new task. Identifiers in the file are ignored.
pub fn import_tasks(store: &mut dyn TaskStore, path: &Path) -> Result<ImportReport, TransferError> {
    let text = fs::read_to_string(path).map_err(|e| TransferError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records: Vec<Task> = serde_json::from_str(&text)?;
    let now = Utc::now();

    let mut report = ImportReport::default();
    for record in records {
        let title = record.title.trim();
        if title.is_empty() {
            tracing::warn!("import skipped a record with no title");
            report.failed.push((record.title, RecordError::EmptyTitle));
            continue;
        }
        let mut task = Task::new(title);
        task.description = record.description;
        task.tags = record.tags;
        task.due = record.due;
        task.completed = record.completed;
        task.completed_at = record.completed_at;
        task.priority = record.priority;
        task.normalize(now);

        match store.create(task) {
            Ok(created) => report.imported.push(created),
            Err(e) => {
                tracing::warn!(title = %record.title, error = %e, "import skipped a record");
                report.failed.push((record.title, e.into()));
            }
        }
    }
    Ok(report)
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
