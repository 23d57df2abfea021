mod recipe;
mod shopping_cart;
mod user;

pub use recipe::*;
pub use user::*;

use sqlx::SqlitePool;

/// Read side of the storage, backed by the read-only pool.
#[derive(Clone)]
pub struct Query {
    read_db: SqlitePool,
}

impl Query {
    pub fn new(read_db: SqlitePool) -> Self {
        Self { read_db }
    }
}
