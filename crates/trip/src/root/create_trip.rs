use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::{Date, OffsetDateTime};
use tripboard_db::table::Trip;
use validator::Validate;

#[derive(Validate)]
pub struct CreateTripInput {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(name = %input.name))]
    pub async fn create_trip(&self, input: CreateTripInput) -> tripboard_shared::Result<i64> {
        input.validate()?;

        if input.start_date > input.end_date {
            tripboard_shared::user!(
                "Trip cannot end ({}) before it starts ({})",
                input.end_date,
                input.start_date
            );
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(Trip::Table)
            .columns([Trip::Name, Trip::StartDate, Trip::EndDate, Trip::CreatedAt])
            .values_panic([
                input.name.trim().to_owned().into(),
                tripboard_shared::format_date(input.start_date).into(),
                tripboard_shared::format_date(input.end_date).into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .last_insert_rowid();

        tracing::info!(trip_id = id, "trip created");

        Ok(id)
    }
}
