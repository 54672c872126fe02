use std::collections::BTreeSet;

use chrono::{DateTime, Local, TimeDelta, Utc};

use crate::io::store::{StoreError, TaskStore};
use crate::model::{Query, Task, TaskId};
use crate::ops::query;

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    next_id: TaskId,
    /// Creation stamps are strictly increasing so newest-first is well defined
    last_created: DateTime<Utc>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tasks: Vec::new(),
            next_id: 1,
            last_created: DateTime::<Utc>::default(),
        }
    }

    /// Number of stored tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl TaskStore for MemoryStore {
    fn create(&mut self, mut task: Task) -> Result<Task, StoreError> {
        let now = Utc::now().max(self.last_created + TimeDelta::microseconds(1));
        self.last_created = now;
        task.id = self.next_id.max(1);
        self.next_id = task.id + 1;
        task.created_at = now;
        task.updated_at = now;
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn get(&self, id: TaskId) -> Result<Task, StoreError> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self, q: &Query) -> Result<Vec<Task>, StoreError> {
        Ok(query::apply(q, self.tasks.iter().cloned(), Local::now()))
    }

    fn update(&mut self, mut task: Task) -> Result<Task, StoreError> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(StoreError::NotFound(task.id))?;
        task.created_at = slot.created_at;
        task.updated_at = Utc::now();
        *slot = task.clone();
        Ok(task)
    }

    fn delete(&mut self, id: TaskId) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn tags(&self) -> Result<Vec<String>, StoreError> {
        let set: BTreeSet<&String> = self.tasks.iter().flat_map(|t| t.tags.iter()).collect();
        Ok(set.into_iter().cloned().collect())
    }
}
