//! Database migration utilities

use sqlx::{Sqlite, migrate::MigrateDatabase};

use crate::Config;

/// Create the database if needed and apply every pending migration
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Migrating database {}", config.database.url);

    let pool = crate::db::create_write_pool(&config.database.url).await?;
    crate::db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations applied");

    Ok(())
}

/// Drop the database and run migrations
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    if Sqlite::database_exists(&config.database.url).await? {
        Sqlite::drop_database(&config.database.url).await?;
        tracing::info!("Dropped database: {}", config.database.url);
    }

    migrate(config).await
}
