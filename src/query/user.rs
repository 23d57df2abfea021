use foodgram_db::table::{AuthToken, User};
use sea_query::{Expr, ExprTrait, JoinType, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Default, FromRow)]
pub struct AuthUserRow {
    pub id: String,
    pub username: String,
}

impl super::Query {
    pub async fn find_user_by_token(&self, key: &str) -> anyhow::Result<Option<AuthUserRow>> {
        let statement = sea_query::Query::select()
            .columns([(User::Table, User::Id), (User::Table, User::Username)])
            .from(AuthToken::Table)
            .join(
                JoinType::InnerJoin,
                User::Table,
                Expr::col((AuthToken::Table, AuthToken::UserId)).equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((AuthToken::Table, AuthToken::Key)).eq(key))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, AuthUserRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}
