use clap::{Subcommand, ValueEnum};
use tripboard_trip::AddParticipantInput;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Admin,
    Traveler,
}

impl From<Role> for tripboard_shared::trip::Role {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Traveler => Self::Traveler,
        }
    }
}

#[derive(Subcommand)]
pub enum ParticipantCommand {
    /// Add someone to a trip, or change their role
    Add {
        #[arg(long)]
        trip: i64,

        #[arg(long)]
        email: String,

        #[arg(long, value_enum, default_value_t = Role::Traveler)]
        role: Role,
    },
}

pub async fn run(config: tripboard::Config, command: ParticipantCommand) -> anyhow::Result<()> {
    let state = super::state(&config).await?;
    let trips = tripboard_trip::Command::new(state);

    match command {
        ParticipantCommand::Add { trip, email, role } => {
            trips
                .add_participant(AddParticipantInput {
                    trip_id: trip,
                    email: email.to_owned(),
                    role: role.into(),
                })
                .await?;

            tracing::info!("{email} added to trip {trip}");
        }
    }

    Ok(())
}
