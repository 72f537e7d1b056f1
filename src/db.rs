pub mod propertydb;
pub mod seed;

use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct DBClient {
    pool: SqlitePool,
}

impl DBClient {
    pub fn new(pool: SqlitePool) -> Self {
        DBClient { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
