use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::utils::AppError;

pub type ConnectionPool = PgPool;

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(
        connection_string: &str,
        max_connections: u32,
        run_migrations: bool,
    ) -> Result<ConnectionPool, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(connection_string)
            .await?;

        if run_migrations {
            info!("Running database migrations");
            sqlx::migrate!("./migrations").run(&pool).await?;
        }

        Ok(pool)
    }
}
