use regex::Regex;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use std::sync::LazyLock;
use time::OffsetDateTime;
use tripboard_db::table::{ItineraryDay, Location};
use validator::Validate;

use crate::repository;

static RE_HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9a-fA-F]{6}$").unwrap());

#[derive(Validate)]
pub struct LocationInput {
    pub trip_id: i64,
    #[validate(length(min = 1, max = 60))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(regex(path = *RE_HEX_COLOR, message = "Color must be six hex digits, e.g. 3b82f6"))]
    pub color: String,
}

#[derive(Validate)]
pub struct UpdateLocationInput {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(regex(path = *RE_HEX_COLOR, message = "Color must be six hex digits, e.g. 3b82f6"))]
    pub color: String,
}

fn normalize_color(color: &str) -> String {
    color.trim_start_matches('#').to_lowercase()
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_owned())
        .filter(|d| !d.is_empty())
}

impl super::Command {
    pub async fn add_location(&self, input: LocationInput) -> tripboard_shared::Result<i64> {
        input.validate()?;

        let name = input.name.trim().to_owned();
        if name.is_empty() {
            tripboard_shared::user!("Location name is required");
        }

        if repository::find_trip(&self.read_db, input.trip_id)
            .await?
            .is_none()
        {
            tripboard_shared::not_found!("trip {} not found", input.trip_id);
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(Location::Table)
            .columns([
                Location::TripId,
                Location::Name,
                Location::Description,
                Location::Color,
                Location::CreatedAt,
            ])
            .values_panic([
                input.trip_id.into(),
                name.into(),
                normalize_description(input.description).into(),
                normalize_color(&input.color).into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .last_insert_rowid();

        tracing::info!(trip_id = input.trip_id, location_id = id, "location added");

        Ok(id)
    }

    pub async fn update_location(
        &self,
        id: i64,
        input: UpdateLocationInput,
    ) -> tripboard_shared::Result<()> {
        input.validate()?;

        let name = input.name.trim().to_owned();
        if name.is_empty() {
            tripboard_shared::user!("Location name is required");
        }

        let statement = Query::update()
            .table(Location::Table)
            .value(Location::Name, name)
            .value(Location::Description, normalize_description(input.description))
            .value(Location::Color, normalize_color(&input.color))
            .and_where(Expr::col(Location::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            tripboard_shared::not_found!("location {id} not found");
        }

        Ok(())
    }

    /// Deletes the location and nulls every itinerary reference to it in the
    /// same transaction.
    pub async fn delete_location(&self, id: i64) -> tripboard_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        for column in [
            ItineraryDay::PrimaryLocationId,
            ItineraryDay::TransferLocationId,
        ] {
            let statement = Query::update()
                .table(ItineraryDay::Table)
                .value(column.clone(), Option::<i64>::None)
                .and_where(Expr::col(column).eq(id))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        let statement = Query::delete()
            .from_table(Location::Table)
            .and_where(Expr::col(Location::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            tripboard_shared::not_found!("location {id} not found");
        }

        tx.commit().await?;

        tracing::info!(location_id = id, "location deleted");

        Ok(())
    }
}
