mod itinerary_day;
mod itinerary_day_trip_day_idx;
mod location;
mod participant;
mod trip;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "tripboard",
    "m0001",
    vec_box![],
    vec_box![
        trip::CreateTable,
        location::CreateTable,
        participant::CreateTable,
        itinerary_day::CreateTable,
        itinerary_day_trip_day_idx::Operation
    ]
);
