//! Database module
//!
//! Connection pooling, schema migrations and the submission table.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::create_pool;

/// Apply the migrations embedded from `./migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
