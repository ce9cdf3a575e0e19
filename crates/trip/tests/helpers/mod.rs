use std::{path::PathBuf, str::FromStr};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use time::Date;
use tripboard_trip::{CreateTripInput, LocationInput};

pub struct TestState {
    pub pool: SqlitePool,
    pub command: tripboard_trip::Command,
    pub query: tripboard_trip::Query,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    tripboard_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    let state = tripboard_shared::State::new(pool.clone());

    Ok(TestState {
        pool,
        command: tripboard_trip::Command::new(state.clone()),
        query: tripboard_trip::Query::new(state),
    })
}

#[allow(dead_code)]
pub async fn create_trip(state: &TestState, start: Date, end: Date) -> anyhow::Result<i64> {
    Ok(state
        .command
        .create_trip(CreateTripInput {
            name: "Lisbon".to_owned(),
            start_date: start,
            end_date: end,
        })
        .await?)
}

#[allow(dead_code)]
pub async fn add_location(
    state: &TestState,
    trip_id: i64,
    name: impl Into<String>,
) -> anyhow::Result<i64> {
    Ok(state
        .command
        .add_location(LocationInput {
            trip_id,
            name: name.into(),
            description: None,
            color: "#3B82F6".to_owned(),
        })
        .await?)
}
