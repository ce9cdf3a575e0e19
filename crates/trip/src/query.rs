use std::ops::Deref;

use tripboard_shared::trip::{Location, Role, Trip};

use crate::repository;

#[derive(Clone)]
pub struct Query(pub tripboard_shared::State);

impl Deref for Query {
    type Target = tripboard_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    pub fn new(state: tripboard_shared::State) -> Self {
        Self(state)
    }

    pub async fn find_trip(&self, id: i64) -> tripboard_shared::Result<Option<Trip>> {
        repository::find_trip(&self.read_db, id).await
    }

    pub async fn find_location(&self, id: i64) -> tripboard_shared::Result<Option<Location>> {
        repository::find_location(&self.read_db, id).await
    }

    pub async fn list_locations(&self, trip_id: i64) -> tripboard_shared::Result<Vec<Location>> {
        repository::list_locations(&self.read_db, trip_id).await
    }

    /// Role of `email` on the trip, `None` when they do not take part in it.
    pub async fn role(
        &self,
        trip_id: i64,
        email: impl AsRef<str>,
    ) -> tripboard_shared::Result<Option<Role>> {
        repository::find_role(&self.read_db, trip_id, email.as_ref()).await
    }

    /// Role of `email` when they may edit the trip's itinerary.
    pub async fn ensure_editor(
        &self,
        trip_id: i64,
        email: impl AsRef<str>,
    ) -> tripboard_shared::Result<Role> {
        match self.role(trip_id, email).await? {
            Some(role) if role.can_edit_itinerary() => Ok(role),
            _ => tripboard_shared::forbidden!(),
        }
    }
}
