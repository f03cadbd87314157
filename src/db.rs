use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

/// Connects, applies SQLite tuning and brings the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    if db.get_database_backend() == sea_orm::DatabaseBackend::Sqlite {
        run_pragmas(&db).await?;
    }

    Migrator::up(&db, None).await?;

    Ok(db)
}

async fn run_pragmas(db: &DatabaseConnection) -> AppResult<()> {
    let pragmas = [
        "PRAGMA journal_mode = WAL",
        "PRAGMA synchronous = NORMAL",
        "PRAGMA foreign_keys = ON",
        "PRAGMA busy_timeout = 5000",
    ];

    for pragma in pragmas {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            pragma.to_string(),
        ))
        .await?;
    }

    Ok(())
}
