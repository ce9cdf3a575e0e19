use std::ops::Deref;

mod add_participant;
mod create_trip;
mod location;

pub use add_participant::AddParticipantInput;
pub use create_trip::CreateTripInput;
pub use location::{LocationInput, UpdateLocationInput};

#[derive(Clone)]
pub struct Command(pub tripboard_shared::State);

impl Deref for Command {
    type Target = tripboard_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub fn new(state: tripboard_shared::State) -> Self {
        Self(state)
    }
}
