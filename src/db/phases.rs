use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const INSERT_PHASE: &str = "INSERT INTO phases (name) VALUES (?1)";
const DELETE_PHASE: &str = "DELETE FROM phases WHERE id = ?1";
const SELECT_ALL_PHASES: &str = "SELECT id, name, created_at FROM phases ORDER BY id";
const SELECT_PHASE_BY_NAME: &str = "SELECT id, name, created_at FROM phases WHERE name = ?1";
const SELECT_PHASE_BY_ID: &str = "SELECT id, name, created_at FROM phases WHERE id = ?1";

/// A named grouping label for outline and schedule display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    pub id: Option<i64>,
    pub name: String,
    pub created_at: Option<String>,
}

impl Phase {
    pub fn new(name: String) -> Self {
        Self {
            id: None,
            name,
            created_at: None,
        }
    }
}

pub struct Phases {
    conn: Connection,
}

impl Phases {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { conn: db.conn })
    }

    /// Create a new phase
    pub fn create(&mut self, phase: &Phase) -> Result<i64> {
        self.conn.execute(INSERT_PHASE, params![phase.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Delete a phase
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_PHASE, params![id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::PhaseNotFound(id.to_string())));
        }
        Ok(())
    }

    /// List all phases in creation order
    pub fn list(&mut self) -> Result<Vec<Phase>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_PHASES)?;
        let rows = stmt.query_map([], |row| {
            Ok(Phase {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        let mut phases = Vec::new();
        for phase in rows {
            phases.push(phase?);
        }
        Ok(phases)
    }

    pub fn get_by_name(&mut self, name: &str) -> Result<Option<Phase>> {
        let phase = self
            .conn
            .query_row(SELECT_PHASE_BY_NAME, params![name], |row| {
                Ok(Phase {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })
            .optional()?;
        Ok(phase)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Phase>> {
        let phase = self
            .conn
            .query_row(SELECT_PHASE_BY_ID, params![id], |row| {
                Ok(Phase {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })
            .optional()?;
        Ok(phase)
    }
}
