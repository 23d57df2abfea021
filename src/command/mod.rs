mod shopping_cart;

use sqlx::SqlitePool;

/// Write side of the storage, backed by the single-connection write pool.
#[derive(Clone)]
pub struct Command {
    write_db: SqlitePool,
}

impl Command {
    pub fn new(write_db: SqlitePool) -> Self {
        Self { write_db }
    }
}
