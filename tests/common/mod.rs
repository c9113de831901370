//! Helpers for integration tests.
#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use support_desk::db::{DbPool, establish_connection_pool};
use support_desk::repository::DieselRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Throw-away SQLite file with the support desk schema applied.
///
/// The file and its WAL companions are removed when the value is dropped,
/// so every test should pass a filename of its own.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        remove_database_files(filename);

        let pool = establish_connection_pool(filename).expect("Failed to open test database.");
        let mut conn = pool.get().expect("Failed to check out test connection.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to apply migrations.");

        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Repository over this database with the default page size.
    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        remove_database_files(&self.filename);
    }
}

fn remove_database_files(filename: &str) {
    for path in [
        filename.to_string(),
        format!("{filename}-shm"),
        format!("{filename}-wal"),
    ] {
        std::fs::remove_file(path).ok();
    }
}
