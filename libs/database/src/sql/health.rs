use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Run `SELECT 1` against the pool.
///
/// # Example
/// ```ignore
/// database::sql::check_health(&db).await?;
/// ```
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running database health check");

    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_owned());
    db.query_one(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("SELECT 1 failed: {}", e)))?;

    debug!("Database health check passed");
    Ok(())
}
