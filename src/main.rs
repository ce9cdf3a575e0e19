use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;
mod migrate;

/// tripboard - collaborative trip itineraries
#[derive(Parser)]
#[command(name = "tripboard")]
#[command(about = "Plan trip itineraries day by day", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Manage trips
    #[command(subcommand)]
    Trip(cli::trip::TripCommand),
    /// Manage a trip's locations
    #[command(subcommand)]
    Location(cli::location::LocationCommand),
    /// Manage who takes part in a trip
    #[command(subcommand)]
    Participant(cli::participant::ParticipantCommand),
    /// View and edit the day-by-day plan
    #[command(subcommand)]
    Itinerary(cli::itinerary::ItineraryCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = tripboard::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    tripboard::observability::init_observability(
        "tripboard",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Migrate => migrate::migrate(&config).await,
        Commands::Reset => migrate::reset(&config).await,
        Commands::Trip(command) => cli::trip::run(config, command).await,
        Commands::Location(command) => cli::location::run(config, command).await,
        Commands::Participant(command) => cli::participant::run(config, command).await,
        Commands::Itinerary(command) => cli::itinerary::run(config, command).await,
    }
}
