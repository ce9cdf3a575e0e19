use sea_query::{OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use tripboard_db::table::Participant;
use tripboard_shared::trip::Role;
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct AddParticipantInput {
    pub trip_id: i64,
    #[validate(email)]
    pub email: String,
    pub role: Role,
}

impl super::Command {
    /// Adds `email` to the trip, or changes their role if already there.
    pub async fn add_participant(&self, input: AddParticipantInput) -> tripboard_shared::Result<()> {
        input.validate()?;

        if repository::find_trip(&self.read_db, input.trip_id)
            .await?
            .is_none()
        {
            tripboard_shared::not_found!("trip {} not found", input.trip_id);
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(Participant::Table)
            .columns([
                Participant::TripId,
                Participant::Email,
                Participant::Role,
                Participant::CreatedAt,
            ])
            .values_panic([
                input.trip_id.into(),
                input.email.to_lowercase().into(),
                input.role.to_string().into(),
                now.into(),
            ])
            .on_conflict(
                OnConflict::columns([Participant::TripId, Participant::Email])
                    .update_column(Participant::Role)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(trip_id = input.trip_id, role = %input.role, "participant saved");

        Ok(())
    }
}
