use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::io::store::{StoreError, TaskStore};
use crate::model::{Query, Task, TaskId};
use crate::ops::query;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    tags TEXT NOT NULL DEFAULT '[]',
    due_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    completed_at TEXT,
    completed INTEGER NOT NULL DEFAULT 0,
    priority INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_todos_completed ON todos(completed);
CREATE INDEX IF NOT EXISTS idx_todos_due_date ON todos(due_date);
CREATE INDEX IF NOT EXISTS idx_todos_priority ON todos(priority);
"#;

const COLUMNS: &str =
    "id, title, description, tags, due_date, created_at, updated_at, completed_at, completed, priority";

/// SQLite-backed task store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`, including parent directories.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn)
    }

    /// A private database that lives as long as the store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("task database ready");
        Ok(SqliteStore { conn })
    }

    fn all_rows(&self) -> Result<Vec<Task>, StoreError> {
        let sql = format!("SELECT {} FROM todos ORDER BY id", COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_task)?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }
}

impl TaskStore for SqliteStore {
    fn create(&mut self, mut task: Task) -> Result<Task, StoreError> {
        let now = Utc::now();
        task.created_at = now;
        task.updated_at = now;
        self.conn.execute(
            "INSERT INTO todos (title, description, tags, due_date, created_at, updated_at, completed_at, completed, priority)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.title,
                task.description,
                serde_json::to_string(&task.tags)?,
                task.due.map(to_text),
                to_text(task.created_at),
                to_text(task.updated_at),
                task.completed_at.map(to_text),
                task.completed,
                task.priority,
            ],
        )?;
        task.id = self.conn.last_insert_rowid();
        tracing::debug!(id = task.id, "created task");
        Ok(task)
    }

    fn get(&self, id: TaskId) -> Result<Task, StoreError> {
        let sql = format!("SELECT {} FROM todos WHERE id = ?1", COLUMNS);
        self.conn
            .query_row(&sql, [id], row_to_task)
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self, q: &Query) -> Result<Vec<Task>, StoreError> {
        Ok(query::apply(q, self.all_rows()?, Local::now()))
    }

    fn update(&mut self, mut task: Task) -> Result<Task, StoreError> {
        task.updated_at = Utc::now();
        let changed = self.conn.execute(
            "UPDATE todos SET title = ?1, description = ?2, tags = ?3, due_date = ?4,
                 updated_at = ?5, completed_at = ?6, completed = ?7, priority = ?8
             WHERE id = ?9",
            params![
                task.title,
                task.description,
                serde_json::to_string(&task.tags)?,
                task.due.map(to_text),
                to_text(task.updated_at),
                task.completed_at.map(to_text),
                task.completed,
                task.priority,
                task.id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(task.id));
        }
        tracing::debug!(id = task.id, "updated task");
        // created_at is immutable; return what is actually stored
        self.get(task.id)
    }

    fn delete(&mut self, id: TaskId) -> Result<(), StoreError> {
        let changed = self.conn.execute("DELETE FROM todos WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::debug!(id, "deleted task");
        Ok(())
    }

    fn tags(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT tags FROM todos")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut set = BTreeSet::new();
        for raw in rows {
            let raw = raw?;
            match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(tags) => set.extend(tags),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable tag list"),
            }
        }
        Ok(set.into_iter().collect())
    }
}

fn to_text(t: DateTime<Utc>) -> String {
    t.to_rfc3339()
}

fn parse_time(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_opt_time(idx: usize, text: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    text.map(|t| parse_time(idx, &t)).transpose()
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let tags_raw: String = row.get(3)?;
    let tags = serde_json::from_str(&tags_raw).unwrap_or_default();
    let priority: i64 = row.get(9)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        tags,
        due: parse_opt_time(4, row.get(4)?)?,
        created_at: parse_time(5, &row.get::<_, String>(5)?)?,
        updated_at: parse_time(6, &row.get::<_, String>(6)?)?,
        completed_at: parse_opt_time(7, row.get(7)?)?,
        completed: row.get(8)?,
        priority: priority.clamp(0, 5) as u8,
    })
}
