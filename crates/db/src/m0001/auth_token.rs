use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{AuthToken, User};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(AuthToken::Table)
        .col(
            ColumnDef::new(AuthToken::Key)
                .string()
                .not_null()
                .string_len(40)
                .primary_key(),
        )
        .col(
            ColumnDef::new(AuthToken::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(AuthToken::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(AuthToken::Table, AuthToken::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(AuthToken::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
