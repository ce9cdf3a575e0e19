use time::Date;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("{date} is outside of the trip ({start} to {end})")]
    OutOfRange { date: Date, start: Date, end: Date },

    #[error("trip starts on {start} but ends on {end}")]
    InvalidRange { start: Date, end: Date },

    #[error("itinerary is not in edit mode")]
    NotEditing,

    #[error("a save is already in progress")]
    CommitInFlight,

    /// Fetching the trip range or its days failed.
    #[error("{0}")]
    Load(tripboard_shared::Error),

    /// Saving the pending changes failed.
    #[error("{0}")]
    Persist(tripboard_shared::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
