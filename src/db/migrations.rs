//! Database schema migration management and versioning.
//!
//! Migrations evolve the schema over time while keeping existing data
//! loadable. Each migration runs inside its own transaction and is recorded
//! in a `migrations` table, so a database can be opened by any newer version
//! of the application and brought up to date exactly once.
//!
//! Version 2 is the one-time compatibility shim for legacy data: early
//! databases referenced `parent` and `depends_on` by task *name* (or by an
//! id rendered as text, depending on the writer). The shim resolves both
//! styles to integer id columns; unresolvable references become NULL.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use planr::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("planr.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single database migration with its transformation function.
#[derive(Clone)]
struct Migration {
    /// Unique version number for ordering and tracking
    version: u32,
    /// Human-readable name describing the migration's purpose
    name: &'static str,
    /// Applies the schema changes within a transaction
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, applied in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Registers all database migrations in chronological order.
    fn register_migrations(&mut self) {
        // Version 1: base tables and indices. The tasks table keeps the
        // legacy shape: parent and depends_on are TEXT columns that may hold
        // either a task name or an id rendered as text, and start/duration
        // are TEXT because legacy records carry values that do not parse.
        self.add_migration(1, "create_tables_and_indices", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER NOT NULL PRIMARY KEY,
        name TEXT NOT NULL,
        phase TEXT,
        start TEXT,
        duration TEXT,
        responsible TEXT,
        status TEXT NOT NULL DEFAULT 'Not Started',
        percent_complete REAL NOT NULL DEFAULT 0,
        milestone TEXT,
        parent TEXT,
        depends_on TEXT,
        notes TEXT,
        external_task BOOLEAN NOT NULL DEFAULT FALSE,
        external_milestone BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS phases (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
                [],
            )?;

            // Index tasks by phase for grouped schedule queries
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_phase ON tasks(phase)", [])?;
            // Index tasks by status for filtered listings
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status)", [])?;

            Ok(())
        });

        // Version 2: resolve legacy name references to stable ids.
        // Purely-numeric reference text passes through as an id; anything
        // else is treated as a task name and resolves to the lowest id with
        // that name; references that match nothing become NULL.
        self.add_migration(2, "resolve_name_references", |tx| {
            tx.execute("ALTER TABLE tasks ADD COLUMN parent_id INTEGER", [])?;
            tx.execute("ALTER TABLE tasks ADD COLUMN depends_on_id INTEGER", [])?;

            tx.execute(
                "UPDATE tasks SET parent_id = CAST(TRIM(parent) AS INTEGER)
                 WHERE parent IS NOT NULL AND TRIM(parent) != '' AND TRIM(parent) NOT GLOB '*[^0-9]*'",
                [],
            )?;
            tx.execute(
                "UPDATE tasks SET depends_on_id = CAST(TRIM(depends_on) AS INTEGER)
                 WHERE depends_on IS NOT NULL AND TRIM(depends_on) != '' AND TRIM(depends_on) NOT GLOB '*[^0-9]*'",
                [],
            )?;

            tx.execute(
                "UPDATE tasks SET parent_id = (SELECT MIN(t.id) FROM tasks t WHERE t.name = TRIM(tasks.parent))
                 WHERE parent_id IS NULL AND parent IS NOT NULL AND TRIM(parent) != ''",
                [],
            )?;
            tx.execute(
                "UPDATE tasks SET depends_on_id = (SELECT MIN(t.id) FROM tasks t WHERE t.name = TRIM(tasks.depends_on))
                 WHERE depends_on_id IS NULL AND depends_on IS NOT NULL AND TRIM(depends_on) != ''",
                [],
            )?;

            tx.execute("ALTER TABLE tasks DROP COLUMN parent", [])?;
            tx.execute("ALTER TABLE tasks DROP COLUMN depends_on", [])?;
            tx.execute("ALTER TABLE tasks RENAME COLUMN parent_id TO parent", [])?;
            tx.execute("ALTER TABLE tasks RENAME COLUMN depends_on_id TO depends_on", [])?;

            Ok(())
        });
    }

    /// Applies every migration newer than the database's recorded version.
    pub fn migrate(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;
        let current = get_db_version(conn)?;

        for migration in self.migrations.iter().filter(|m| m.version > current) {
            let tx = conn.transaction()?;
            (migration.up)(&tx)?;
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            tx.commit()?;
            crate::msg_debug!(format!("applied migration v{} ({})", migration.version, migration.name));
        }
        Ok(())
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest migration version recorded in the database (0 for a fresh file).
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    conn.execute(MIGRATIONS_TABLE, [])?;
    let version = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM migrations", [], |row| row.get(0))?;
    Ok(version)
}

/// Initializes a connection by applying all pending migrations.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().migrate(conn)
}
