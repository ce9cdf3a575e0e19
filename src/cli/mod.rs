pub mod itinerary;
pub mod location;
pub mod participant;
pub mod trip;

use time::Date;

pub(crate) fn parse_date(value: &str) -> Result<Date, String> {
    tripboard_shared::parse_date(value).map_err(|err| err.to_string())
}

pub(crate) async fn state(config: &tripboard::Config) -> anyhow::Result<tripboard_shared::State> {
    let pool =
        tripboard::create_pool(&config.database.url, config.database.max_connections).await?;

    Ok(tripboard_shared::State::new(pool))
}
