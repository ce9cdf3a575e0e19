use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use tripboard_db::table::{Location, Participant, Trip};
use tripboard_shared::trip::{self, Role};

#[derive(FromRow)]
pub struct TripRow {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

impl TryFrom<TripRow> for trip::Trip {
    type Error = tripboard_shared::Error;

    fn try_from(value: TripRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            name: value.name,
            start_date: tripboard_shared::parse_date(&value.start_date)?,
            end_date: tripboard_shared::parse_date(&value.end_date)?,
        })
    }
}

#[derive(FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub trip_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

impl From<LocationRow> for trip::Location {
    fn from(value: LocationRow) -> Self {
        Self {
            id: value.id,
            trip_id: value.trip_id,
            name: value.name,
            description: value.description,
            color: value.color,
        }
    }
}

pub(crate) async fn find_trip(
    pool: &SqlitePool,
    id: i64,
) -> tripboard_shared::Result<Option<trip::Trip>> {
    let statement = Query::select()
        .columns([Trip::Id, Trip::Name, Trip::StartDate, Trip::EndDate])
        .from(Trip::Table)
        .and_where(Expr::col(Trip::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let row = sqlx::query_as_with::<_, TripRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    row.map(TryInto::try_into).transpose()
}

fn select_locations() -> sea_query::SelectStatement {
    Query::select()
        .columns([
            Location::Id,
            Location::TripId,
            Location::Name,
            Location::Description,
            Location::Color,
        ])
        .from(Location::Table)
        .to_owned()
}

pub(crate) async fn find_location(
    pool: &SqlitePool,
    id: i64,
) -> tripboard_shared::Result<Option<trip::Location>> {
    let statement = select_locations()
        .and_where(Expr::col(Location::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let row = sqlx::query_as_with::<_, LocationRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Into::into))
}

pub(crate) async fn list_locations(
    pool: &SqlitePool,
    trip_id: i64,
) -> tripboard_shared::Result<Vec<trip::Location>> {
    let statement = select_locations()
        .and_where(Expr::col(Location::TripId).eq(trip_id))
        .order_by(Location::Name, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, LocationRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn find_role(
    pool: &SqlitePool,
    trip_id: i64,
    email: &str,
) -> tripboard_shared::Result<Option<Role>> {
    let statement = Query::select()
        .column(Participant::Role)
        .from(Participant::Table)
        .and_where(Expr::col(Participant::TripId).eq(trip_id))
        .and_where(Expr::col(Participant::Email).eq(email.to_lowercase()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let row = sqlx::query_as_with::<_, (sqlx::types::Text<Role>,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(role,)| role.0))
}
