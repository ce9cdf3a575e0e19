use clap::Subcommand;
use tripboard_trip::{LocationInput, UpdateLocationInput};

#[derive(Subcommand)]
pub enum LocationCommand {
    /// Add a location to a trip
    Add {
        #[arg(long)]
        trip: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Hex color, e.g. 3b82f6
        #[arg(long)]
        color: String,
    },
    /// Replace a location's name, description and color
    Update {
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: String,
    },
    /// Delete a location; days pointing at it are left without one
    Remove { id: i64 },
    /// List a trip's locations
    List {
        #[arg(long)]
        trip: i64,
    },
}

pub async fn run(config: tripboard::Config, command: LocationCommand) -> anyhow::Result<()> {
    let state = super::state(&config).await?;
    let trips = tripboard_trip::Command::new(state.clone());

    match command {
        LocationCommand::Add {
            trip,
            name,
            description,
            color,
        } => {
            let id = trips
                .add_location(LocationInput {
                    trip_id: trip,
                    name,
                    description,
                    color,
                })
                .await?;

            println!("{id}");
        }
        LocationCommand::Update {
            id,
            name,
            description,
            color,
        } => {
            trips
                .update_location(
                    id,
                    UpdateLocationInput {
                        name,
                        description,
                        color,
                    },
                )
                .await?;
        }
        LocationCommand::Remove { id } => trips.delete_location(id).await?,
        LocationCommand::List { trip } => {
            let query = tripboard_trip::Query::new(state);

            for location in query.list_locations(trip).await? {
                println!(
                    "{:>4}  #{}  {:<7}  {}",
                    location.id,
                    location.color,
                    location.text_color(),
                    location.name
                );
            }
        }
    }

    Ok(())
}
