//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod repository_provider;
pub mod reservation_repository;
pub mod transition_repository;
pub mod user_repository;
pub mod vehicle_model_repository;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Like [`db_err`], but a unique-key violation becomes a `Conflict`.
fn insert_err(entity: &str, key: &str, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict(format!("{} {} already exists", entity, key))
        }
        _ => db_err(e),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::DatabaseConnection;
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::{init_database, migrator::Migrator, DatabaseConfig};

    /// Fresh migrated in-memory SQLite database
    pub async fn database() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
