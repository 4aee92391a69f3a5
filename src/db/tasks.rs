use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskFilter, TaskStatus};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const TASK_COLUMNS: &str = "id, name, phase, start, duration, responsible, status, percent_complete, \
     milestone, parent, depends_on, notes, external_task, external_milestone, created_at";
const INSERT_TASK: &str = "INSERT INTO tasks (name, phase, start, duration, responsible, status, percent_complete, \
     milestone, parent, depends_on, notes, external_task, external_milestone) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const UPDATE_TASK: &str = "UPDATE tasks SET name = ?2, phase = ?3, start = ?4, duration = ?5, responsible = ?6, \
     status = ?7, percent_complete = ?8, milestone = ?9, parent = ?10, depends_on = ?11, notes = ?12, \
     external_task = ?13, external_milestone = ?14 WHERE id = ?1";
const UPDATE_TASK_START: &str = "UPDATE tasks SET start = ?2 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const CLEAR_PARENT_REFS: &str = "UPDATE tasks SET parent = NULL WHERE parent = ?1";
const CLEAR_DEPENDS_REFS: &str = "UPDATE tasks SET depends_on = NULL WHERE depends_on = ?1";

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    pub fn new() -> Result<Tasks> {
        let db = Db::new()?;
        Ok(Tasks { conn: db.conn })
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            name: row.get(1)?,
            phase: row.get(2)?,
            start: row.get(3)?,
            duration: row.get(4)?,
            responsible: row.get(5)?,
            status: TaskStatus::parse(&row.get::<_, String>(6)?),
            percent_complete: row.get(7)?,
            milestone: row.get(8)?,
            parent: row.get(9)?,
            depends_on: row.get(10)?,
            notes: row.get(11)?,
            external_task: row.get(12)?,
            external_milestone: row.get(13)?,
            created_at: row.get(14)?,
        })
    }

    /// Inserts a task and returns its assigned id.
    pub fn insert(&mut self, task: &Task) -> Result<i64> {
        self.conn.execute(
            INSERT_TASK,
            params![
                task.name,
                task.phase,
                task.start,
                task.duration,
                task.responsible,
                task.status.as_str(),
                task.percent_complete,
                task.milestone,
                task.parent,
                task.depends_on,
                task.notes,
                task.external_task,
                task.external_milestone,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Updates a task in place by id.
    pub fn update(&mut self, task: &Task) -> Result<()> {
        let id = task.id.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound("<unsaved>".to_string())))?;
        let affected = self.conn.execute(
            UPDATE_TASK,
            params![
                id,
                task.name,
                task.phase,
                task.start,
                task.duration,
                task.responsible,
                task.status.as_str(),
                task.percent_complete,
                task.milestone,
                task.parent,
                task.depends_on,
                task.notes,
                task.external_task,
                task.external_milestone,
            ],
        )?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFound(id.to_string())));
        }
        Ok(())
    }

    /// Persists a start date computed by the scheduling engine.
    pub fn set_start(&mut self, id: i64, start: NaiveDate) -> Result<()> {
        let affected = self.conn.execute(UPDATE_TASK_START, params![id, start.format("%Y-%m-%d").to_string()])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFound(id.to_string())));
        }
        Ok(())
    }

    /// Deletes a task and clears any parent / depends_on references to it.
    pub fn delete(&mut self, id: i64) -> Result<usize> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        if affected > 0 {
            self.conn.execute(CLEAR_PARENT_REFS, params![id])?;
            self.conn.execute(CLEAR_DEPENDS_REFS, params![id])?;
        }
        Ok(affected)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(&format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS), params![id], Self::map_row)
            .optional()?;
        Ok(task)
    }

    /// All tasks sharing a name; more than one means the name is ambiguous
    /// as a reference.
    pub fn get_by_name(&mut self, name: &str) -> Result<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM tasks WHERE name = ?1 ORDER BY id", TASK_COLUMNS))?;
        let rows = stmt.query_map(params![name], Self::map_row)?;
        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Fetches tasks in id order, the collection order the scheduling
    /// engine's first-seen tie-break is defined over.
    pub fn fetch(&mut self, filter: TaskFilter) -> Result<Vec<Task>> {
        let select = format!("SELECT {} FROM tasks", TASK_COLUMNS);
        let (sql, params) = match filter {
            TaskFilter::All => (format!("{} ORDER BY id", select), vec![]),
            TaskFilter::Phase(phase) => (format!("{} WHERE phase = ?1 ORDER BY id", select), vec![phase]),
            TaskFilter::Status(status) => (
                format!("{} WHERE status = ?1 ORDER BY id", select),
                vec![status.as_str().to_string()],
            ),
            TaskFilter::ByIds(ids) => (
                format!(
                    "{} WHERE id IN ({}) ORDER BY id",
                    select,
                    vec!["?"; ids.len()].join(", ")
                ),
                ids.iter().map(|id| id.to_string()).collect(),
            ),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), Self::map_row)?;
        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }
}
