use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Trip;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Trip::Table)
        .col(
            ColumnDef::new(Trip::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Trip::Name).string().not_null())
        .col(
            ColumnDef::new(Trip::StartDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(Trip::EndDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(ColumnDef::new(Trip::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Trip::Table).to_owned()
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
