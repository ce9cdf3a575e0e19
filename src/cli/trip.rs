use clap::Subcommand;
use time::Date;
use tripboard_trip::CreateTripInput;

#[derive(Subcommand)]
pub enum TripCommand {
    /// Create a trip spanning START..=END
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, value_parser = super::parse_date)]
        start: Date,

        #[arg(long, value_parser = super::parse_date)]
        end: Date,
    },
}

pub async fn run(config: tripboard::Config, command: TripCommand) -> anyhow::Result<()> {
    let state = super::state(&config).await?;
    let trips = tripboard_trip::Command::new(state);

    match command {
        TripCommand::Create { name, start, end } => {
            let id = trips
                .create_trip(CreateTripInput {
                    name,
                    start_date: start,
                    end_date: end,
                })
                .await?;

            println!("{id}");
        }
    }

    Ok(())
}
