use std::sync::Arc;

use spendfolio_core::db::{self, DbPool};

/// Creates a fresh SQLite database with migrations applied inside the given
/// temp directory and returns a pool on it.
pub fn setup_pool(dir: &std::path::Path) -> Arc<DbPool> {
    let db_path = db::init(dir.to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    pool
}
