//! CLI subcommands.

pub mod migrate;
pub mod seed;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use migrate::MigrationError;

/// Read the database URL, preferring `PLAYBOX_DATABASE_URL`.
fn database_url() -> Result<SecretString, MigrationError> {
    dotenvy::dotenv().ok();

    ["PLAYBOX_DATABASE_URL", "DATABASE_URL"]
        .into_iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .map(SecretString::from)
        .ok_or(MigrationError::MissingEnvVar("PLAYBOX_DATABASE_URL"))
}

/// Open a small pool for one-off commands.
async fn connect() -> Result<PgPool, MigrationError> {
    let url = database_url()?;
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(url.expose_secret())
        .await?;
    Ok(pool)
}
