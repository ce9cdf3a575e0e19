use tripboard_shared::trip::Location;

use crate::{ItineraryDay, TripRange};

/// Persistence collaborator the editor loads from and saves to.
#[async_trait::async_trait]
pub trait ItineraryStore: Send + Sync {
    async fn fetch_trip_date_range(&self, trip_id: i64) -> tripboard_shared::Result<TripRange>;

    async fn fetch_itinerary_days(
        &self,
        trip_id: i64,
    ) -> tripboard_shared::Result<Vec<ItineraryDay>>;

    /// Upserts `days` keyed by `(trip_id, date)`. Either every row is written
    /// or none is. Returns the saved records with their ids.
    async fn persist_itinerary_days(
        &self,
        trip_id: i64,
        days: &[ItineraryDay],
    ) -> tripboard_shared::Result<Vec<ItineraryDay>>;

    async fn fetch_locations(&self, trip_id: i64) -> tripboard_shared::Result<Vec<Location>>;
}
