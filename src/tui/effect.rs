use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::io::store::{StoreError, TaskStore};
use crate::model::{Query, Task, TaskId};

use super::form::Draft;

/// A persistence request produced by a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Load(Query),
    LoadTags,
    Create(Task),
    /// Write a modified copy of a listed task (completion, priority)
    Update(Task),
    /// Apply form fields to the stored record with this id
    Edit { id: TaskId, draft: Draft },
    Delete(Vec<TaskId>),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Load(_) => "load",
            Effect::LoadTags => "load-tags",
            Effect::Create(_) => "create",
            Effect::Update(_) => "update",
            Effect::Edit { .. } => "edit",
            Effect::Delete(_) => "delete",
        }
    }
}

/// Result of an [`Effect`], fed back into the state machine
#[derive(Debug)]
pub enum Completion {
    Loaded(Result<Vec<Task>, StoreError>),
    TagsLoaded(Result<Vec<String>, StoreError>),
    Created(Result<Task, StoreError>),
    Updated(Result<Task, StoreError>),
    Edited(Result<Task, StoreError>),
    /// `removed` lists ids no longer in the store, including ones that were
    /// already gone. `result` holds the first failure.
    Deleted {
        removed: Vec<TaskId>,
        result: Result<(), StoreError>,
    },
}

/// Run one effect against the store.
pub fn execute(store: &mut dyn TaskStore, effect: Effect) -> Completion {
    tracing::debug!(effect = effect.name(), "executing");
    let completion = match effect {
        Effect::Load(query) => Completion::Loaded(store.list(&query)),
        Effect::LoadTags => Completion::TagsLoaded(store.tags()),
        Effect::Create(task) => Completion::Created(store.create(task)),
        Effect::Update(task) => Completion::Updated(store.update(task)),
        Effect::Edit { id, draft } => {
            let result = store.get(id).and_then(|mut task| {
                draft.apply_to(&mut task);
                store.update(task)
            });
            Completion::Edited(result)
        }
        Effect::Delete(ids) => {
            let mut removed = Vec::with_capacity(ids.len());
            let mut result = Ok(());
            for id in ids {
                match store.delete(id) {
                    Ok(()) => removed.push(id),
                    // deleted elsewhere; carry on with the rest
                    Err(e) if e.is_not_found() => {
                        removed.push(id);
                        if result.is_ok() {
                            result = Err(e);
                        }
                    }
                    Err(e) => {
                        result = Err(e);
                        break;
                    }
                }
            }
            Completion::Deleted { removed, result }
        }
    };
    if let Some(err) = completion.error() {
        tracing::warn!(error = %err, "store operation failed");
    }
    completion
}

impl Completion {
    fn error(&self) -> Option<&StoreError> {
        match self {
            Completion::Loaded(r) => r.as_ref().err(),
            Completion::TagsLoaded(r) => r.as_ref().err(),
            Completion::Created(r) | Completion::Updated(r) | Completion::Edited(r) => {
                r.as_ref().err()
            }
            Completion::Deleted { result, .. } => result.as_ref().err(),
        }
    }
}

/// Background thread that owns the store and runs effects one at a time
pub struct Worker {
    requests: Option<Sender<Effect>>,
    completions: Receiver<Completion>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub fn spawn(mut store: Box<dyn TaskStore>) -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<Effect>();
        let (completion_tx, completion_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("todo-store".into())
            .spawn(move || {
                for effect in request_rx {
                    let completion = execute(store.as_mut(), effect);
                    if completion_tx.send(completion).is_err() {
                        break;
                    }
                }
                tracing::debug!("store worker stopped");
            })?;

        Ok(Worker {
            requests: Some(request_tx),
            completions: completion_rx,
            handle: Some(handle),
        })
    }

    /// Queue an effect. Fails only if the worker thread has gone away.
    pub fn submit(&self, effect: Effect) -> io::Result<()> {
        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| io::Error::other("store worker stopped"))?;
        sender
            .send(effect)
            .map_err(|_| io::Error::other("store worker stopped"))
    }

    /// Wait up to `timeout` for a finished effect.
    pub fn poll(&self, timeout: Duration) -> io::Result<Option<Completion>> {
        match self.completions.recv_timeout(timeout) {
            Ok(completion) => Ok(Some(completion)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::other("store worker stopped")),
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
