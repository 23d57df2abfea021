use foodgram_db::table::ShoppingCart;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use ulid::Ulid;

impl super::Command {
    /// Returns `false` when the recipe already was in the user's cart.
    pub async fn add_to_shopping_cart(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> anyhow::Result<bool> {
        let statement = Query::insert()
            .into_table(ShoppingCart::Table)
            .columns([
                ShoppingCart::Id,
                ShoppingCart::UserId,
                ShoppingCart::RecipeId,
                ShoppingCart::CreatedAt,
            ])
            .values_panic([
                Ulid::new().to_string().into(),
                user_id.into(),
                recipe_id.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .on_conflict(
                OnConflict::columns([ShoppingCart::UserId, ShoppingCart::RecipeId])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::debug!(
            user = user_id,
            recipe = recipe_id,
            added = result.rows_affected() > 0,
            "shopping cart insert"
        );

        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when the recipe was not in the user's cart.
    pub async fn remove_from_shopping_cart(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> anyhow::Result<bool> {
        let statement = Query::delete()
            .from_table(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
            .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
