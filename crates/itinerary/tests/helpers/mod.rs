use std::{
    path::PathBuf,
    str::FromStr,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicI64, Ordering},
    },
};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use time::Date;
use tripboard_itinerary::{ItineraryDay, ItineraryStore, SqliteStore, TripRange};
use tripboard_shared::trip::Location;
use tripboard_trip::{CreateTripInput, LocationInput};

pub struct TestState {
    pub pool: SqlitePool,
    pub command: tripboard_trip::Command,
    pub store: SqliteStore,
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
        store: SqliteStore::new(state),
    })
}

#[allow(dead_code)]
pub async fn create_trip(state: &TestState, start: Date, end: Date) -> anyhow::Result<i64> {
    Ok(state
        .command
        .create_trip(CreateTripInput {
            name: "Kyoto".to_owned(),
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
            color: "f59e0b".to_owned(),
        })
        .await?)
}

/// In-memory store recording every persisted batch. Can be switched to fail
/// or to never answer.
#[allow(dead_code)]
pub struct MemoryStore {
    pub range: TripRange,
    pub days: Mutex<Vec<ItineraryDay>>,
    pub batches: Mutex<Vec<Vec<ItineraryDay>>>,
    pub failing: AtomicBool,
    pub stalled: AtomicBool,
    next_id: AtomicI64,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new(range: TripRange) -> Self {
        Self {
            range,
            days: Mutex::new(vec![]),
            batches: Mutex::new(vec![]),
            failing: AtomicBool::new(false),
            stalled: AtomicBool::new(false),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn stall(&self, stalled: bool) {
        self.stalled.store(stalled, Ordering::SeqCst);
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn batches(&self) -> Vec<Vec<ItineraryDay>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ItineraryStore for MemoryStore {
    async fn fetch_trip_date_range(&self, _trip_id: i64) -> tripboard_shared::Result<TripRange> {
        Ok(self.range)
    }

    async fn fetch_itinerary_days(
        &self,
        trip_id: i64,
    ) -> tripboard_shared::Result<Vec<ItineraryDay>> {
        Ok(self
            .days
            .lock()
            .unwrap()
            .iter()
            .filter(|day| day.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn persist_itinerary_days(
        &self,
        _trip_id: i64,
        days: &[ItineraryDay],
    ) -> tripboard_shared::Result<Vec<ItineraryDay>> {
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        if self.failing.load(Ordering::SeqCst) {
            tripboard_shared::bail!("database is locked");
        }

        let mut stored = self.days.lock().unwrap();
        let mut saved = vec![];
        for day in days {
            let id = stored
                .iter()
                .find(|existing| existing.date == day.date)
                .and_then(|existing| existing.id)
                .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst));

            let mut day = day.clone();
            day.id = Some(id);

            stored.retain(|existing| existing.date != day.date);
            stored.push(day.clone());
            saved.push(day);
        }

        self.batches.lock().unwrap().push(days.to_vec());

        Ok(saved)
    }

    async fn fetch_locations(&self, _trip_id: i64) -> tripboard_shared::Result<Vec<Location>> {
        Ok(vec![])
    }
}
