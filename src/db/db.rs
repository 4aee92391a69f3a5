use crate::db::migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "planr.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the application database and applies any pending migrations.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let mut conn = Connection::open(db_file_path)?;
        migrations::init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }
}
