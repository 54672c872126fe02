use crate::model::{Query, Task, TaskId};

/// Error type for task persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task #{0} not found")]
    NotFound(TaskId),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not encode tags: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Durable collection of tasks.
///
/// Implementations own identifier assignment and timestamps: `create` stamps
/// `id`, `created_at` and `updated_at`; `update` refreshes `updated_at`.
/// `list` must honor the filter and ordering rules of [`crate::ops::query::apply`].
pub trait TaskStore: Send {
    fn create(&mut self, task: Task) -> Result<Task, StoreError>;
    fn get(&self, id: TaskId) -> Result<Task, StoreError>;
    fn list(&self, query: &Query) -> Result<Vec<Task>, StoreError>;
    fn update(&mut self, task: Task) -> Result<Task, StoreError>;
    fn delete(&mut self, id: TaskId) -> Result<(), StoreError>;
    /// Distinct tags in use, sorted
    fn tags(&self) -> Result<Vec<String>, StoreError>;
}
