use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

/// Short recipe representation returned by the cart endpoints
#[derive(Debug, Clone, Default, Serialize, FromRow)]
pub struct RecipeShortRow {
    pub id: String,
    pub name: String,
    pub cooking_time: i64,
}

impl super::Query {
    pub async fn find_recipe(&self, id: &str) -> anyhow::Result<Option<RecipeShortRow>> {
        let statement = sea_query::Query::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeShortRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}
