//! Temporary databases for repository tests.

use std::sync::Arc;

use chrono::NaiveDate;
use diesel::prelude::*;
use tempfile::TempDir;

use crate::db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbPool, WriteHandle,
};

pub(crate) struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Keeps the database file alive for the test's duration.
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = dir.path().join("test.db").to_string_lossy().to_string();
        init(&db_path).expect("Failed to init database");
        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        TestDb {
            pool,
            writer,
            _dir: dir,
        }
    }

    /// Inserts a category row directly, bypassing the writer.
    pub fn seed_category(&self, id: &str, name: &str, kind: &str, owner: Option<&str>) {
        use crate::schema::categories;
        let mut conn = get_connection(&self.pool).expect("Failed to get connection");
        diesel::insert_into(categories::table)
            .values((
                categories::id.eq(id),
                categories::name.eq(name),
                categories::category_type.eq(kind),
                categories::owner_id.eq(owner),
            ))
            .execute(&mut conn)
            .expect("Failed to seed category");
    }
}

pub(crate) fn d(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}
