use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Location, Trip};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Location::Table)
        .col(
            ColumnDef::new(Location::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Location::TripId).integer().not_null())
        .col(ColumnDef::new(Location::Name).string().not_null())
        .col(ColumnDef::new(Location::Description).string().null())
        .col(
            ColumnDef::new(Location::Color)
                .string()
                .not_null()
                .string_len(6),
        )
        .col(ColumnDef::new(Location::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(Location::Table, Location::TripId)
                .to(Trip::Table, Trip::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Location::Table).to_owned()
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
