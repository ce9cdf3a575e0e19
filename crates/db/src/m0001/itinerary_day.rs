use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{ItineraryDay, Trip};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ItineraryDay::Table)
        .col(
            ColumnDef::new(ItineraryDay::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(ItineraryDay::TripId).integer().not_null())
        .col(
            ColumnDef::new(ItineraryDay::Day)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(ItineraryDay::PrimaryLocationId)
                .integer()
                .null(),
        )
        .col(
            ColumnDef::new(ItineraryDay::TransferLocationId)
                .integer()
                .null(),
        )
        .col(ColumnDef::new(ItineraryDay::Notes).text().null())
        .col(ColumnDef::new(ItineraryDay::Summary).text().null())
        .col(
            ColumnDef::new(ItineraryDay::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .from(ItineraryDay::Table, ItineraryDay::TripId)
                .to(Trip::Table, Trip::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ItineraryDay::Table).to_owned()
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
