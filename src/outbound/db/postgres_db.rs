use crate::configuration::DatabaseSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

mod user_repo;

#[derive(Clone, Debug)]
pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(configuration: &DatabaseSettings) -> PostgresDb {
        PostgresDb {
            pool: PgPoolOptions::new()
                .acquire_timeout(std::time::Duration::from_secs(2))
                .connect_lazy_with(configuration.with_db()),
        }
    }

    pub fn from_pool(pool: PgPool) -> PostgresDb {
        PostgresDb { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
