use std::ops::Deref;

use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use time::OffsetDateTime;
use tripboard_db::table;
use tripboard_shared::trip::Location;

use crate::{ItineraryDay, ItineraryStore, TripRange};

#[derive(FromRow)]
pub struct ItineraryDayRow {
    pub id: i64,
    pub trip_id: i64,
    pub day: String,
    pub primary_location_id: Option<i64>,
    pub transfer_location_id: Option<i64>,
    pub notes: Option<String>,
    pub summary: Option<String>,
}

impl TryFrom<ItineraryDayRow> for ItineraryDay {
    type Error = tripboard_shared::Error;

    fn try_from(value: ItineraryDayRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(value.id),
            trip_id: value.trip_id,
            date: tripboard_shared::parse_date(&value.day)?,
            primary_location_id: value.primary_location_id,
            transfer_location_id: value.transfer_location_id,
            notes: value.notes,
            summary: value.summary,
        })
    }
}

fn select_days() -> sea_query::SelectStatement {
    Query::select()
        .columns([
            table::ItineraryDay::Id,
            table::ItineraryDay::TripId,
            table::ItineraryDay::Day,
            table::ItineraryDay::PrimaryLocationId,
            table::ItineraryDay::TransferLocationId,
            table::ItineraryDay::Notes,
            table::ItineraryDay::Summary,
        ])
        .from(table::ItineraryDay::Table)
        .to_owned()
}

/// [`ItineraryStore`] backed by the SQLite database.
#[derive(Clone)]
pub struct SqliteStore(pub tripboard_shared::State);

impl Deref for SqliteStore {
    type Target = tripboard_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl SqliteStore {
    pub fn new(state: tripboard_shared::State) -> Self {
        Self(state)
    }

    fn trips(&self) -> tripboard_trip::Query {
        tripboard_trip::Query::new(self.0.clone())
    }
}

#[async_trait::async_trait]
impl ItineraryStore for SqliteStore {
    async fn fetch_trip_date_range(&self, trip_id: i64) -> tripboard_shared::Result<TripRange> {
        let Some(trip) = self.trips().find_trip(trip_id).await? else {
            tripboard_shared::not_found!("trip {trip_id} not found");
        };

        TripRange::new(trip.start_date, trip.end_date)
            .map_err(|err| tripboard_shared::Error::Server(err.to_string()))
    }

    async fn fetch_itinerary_days(
        &self,
        trip_id: i64,
    ) -> tripboard_shared::Result<Vec<ItineraryDay>> {
        let statement = select_days()
            .and_where(Expr::col(table::ItineraryDay::TripId).eq(trip_id))
            .order_by(table::ItineraryDay::Day, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, ItineraryDayRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    #[tracing::instrument(skip(self, days), fields(days = days.len()))]
    async fn persist_itinerary_days(
        &self,
        trip_id: i64,
        days: &[ItineraryDay],
    ) -> tripboard_shared::Result<Vec<ItineraryDay>> {
        if days.is_empty() {
            return Ok(vec![]);
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let mut statement = Query::insert()
            .into_table(table::ItineraryDay::Table)
            .columns([
                table::ItineraryDay::TripId,
                table::ItineraryDay::Day,
                table::ItineraryDay::PrimaryLocationId,
                table::ItineraryDay::TransferLocationId,
                table::ItineraryDay::Notes,
                table::ItineraryDay::Summary,
                table::ItineraryDay::UpdatedAt,
            ])
            .to_owned();

        for day in days {
            if day.trip_id != trip_id {
                tripboard_shared::bail!(
                    "itinerary day {} belongs to trip {}, not {trip_id}",
                    day.date,
                    day.trip_id
                );
            }

            statement.values_panic([
                trip_id.into(),
                tripboard_shared::format_date(day.date).into(),
                day.primary_location_id.into(),
                day.transfer_location_id.into(),
                day.notes.to_owned().into(),
                day.summary.to_owned().into(),
                now.into(),
            ]);
        }

        statement.on_conflict(
            OnConflict::columns([table::ItineraryDay::TripId, table::ItineraryDay::Day])
                .update_columns([
                    table::ItineraryDay::PrimaryLocationId,
                    table::ItineraryDay::TransferLocationId,
                    table::ItineraryDay::Notes,
                    table::ItineraryDay::Summary,
                    table::ItineraryDay::UpdatedAt,
                ])
                .to_owned(),
        );

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let mut tx = self.write_db.begin().await?;
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = select_days()
            .and_where(Expr::col(table::ItineraryDay::TripId).eq(trip_id))
            .and_where(
                Expr::col(table::ItineraryDay::Day).is_in(
                    days.iter()
                        .map(|day| tripboard_shared::format_date(day.date)),
                ),
            )
            .order_by(table::ItineraryDay::Day, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, ItineraryDayRow, _>(&sql, values)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(trip_id, "itinerary days saved");

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn fetch_locations(&self, trip_id: i64) -> tripboard_shared::Result<Vec<Location>> {
        self.trips().list_locations(trip_id).await
    }
}
