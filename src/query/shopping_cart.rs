use foodgram_db::table::{Ingredient, RecipeIngredient, ShoppingCart};
use foodgram_shopping::IngredientLine;
use sea_query::{Expr, ExprTrait, JoinType, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
struct CartLineRow {
    name: String,
    measurement_unit: String,
    amount: i64,
}

impl From<CartLineRow> for IngredientLine {
    fn from(row: CartLineRow) -> Self {
        IngredientLine::new(row.name, row.measurement_unit, row.amount)
    }
}

impl super::Query {
    /// Ingredient lines of every recipe in the user's shopping cart, in no particular order.
    pub async fn shopping_cart_lines(&self, user_id: &str) -> anyhow::Result<Vec<IngredientLine>> {
        let statement = sea_query::Query::select()
            .columns([
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .column((RecipeIngredient::Table, RecipeIngredient::Amount))
            .from(ShoppingCart::Table)
            .join(
                JoinType::InnerJoin,
                RecipeIngredient::Table,
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .equals((ShoppingCart::Table, ShoppingCart::RecipeId)),
            )
            .join(
                JoinType::InnerJoin,
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, CartLineRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(IngredientLine::from).collect())
    }
}
