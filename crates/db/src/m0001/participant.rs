use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::{Participant, Trip};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Participant::Table)
        .col(ColumnDef::new(Participant::TripId).integer().not_null())
        .col(ColumnDef::new(Participant::Email).string().not_null())
        .col(
            ColumnDef::new(Participant::Role)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(Participant::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(Participant::TripId)
                .col(Participant::Email),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Participant::Table, Participant::TripId)
                .to(Trip::Table, Trip::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Participant::Table).to_owned()
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
