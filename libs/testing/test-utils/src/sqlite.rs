//! SQLite test infrastructure
//!
//! An in-memory database with every migration applied. Needs no external
//! services, so it backs the default test suites.

use database::sql::{SqlConfig, connect_from_config, run_migrations};
use migration::Migrator;
use sea_orm::DatabaseConnection;

/// Migrated in-memory SQLite database.
///
/// The pool is pinned to a single connection: every new SQLite connection to
/// `sqlite::memory:` would otherwise open a fresh, empty database. The
/// database disappears when the last clone of the connection is dropped.
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        let connection = connect_from_config(SqlConfig::in_memory_sqlite())
            .await
            .expect("Failed to open in-memory SQLite database");

        run_migrations::<Migrator>(&connection, "test")
            .await
            .expect("Failed to run migrations");

        tracing::debug!("Test database ready (SQLite in-memory)");
        Self { connection }
    }

    /// Get a cloned connection (useful for passing to repositories)
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
