// src/database.rs
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Connects to Postgres and applies the embedded migrations.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
