use time::Date;

/// One calendar date's plan within one trip.
///
/// `id` is `None` until the row has been persisted. When
/// `transfer_location_id` is set, `primary_location_id` is the location the
/// traveler leaves from and `transfer_location_id` the one they move to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItineraryDay {
    pub id: Option<i64>,
    pub trip_id: i64,
    pub date: Date,
    pub primary_location_id: Option<i64>,
    pub transfer_location_id: Option<i64>,
    pub notes: Option<String>,
    pub summary: Option<String>,
}

impl ItineraryDay {
    pub fn empty(trip_id: i64, date: Date) -> Self {
        Self {
            id: None,
            trip_id,
            date,
            primary_location_id: None,
            transfer_location_id: None,
            notes: None,
            summary: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_transfer(&self) -> bool {
        self.transfer_location_id.is_some()
    }

    /// True when nothing has been planned for the day.
    pub fn is_blank(&self) -> bool {
        self.primary_location_id.is_none()
            && self.transfer_location_id.is_none()
            && self.notes.is_none()
            && self.summary.is_none()
    }

    pub fn apply(&mut self, patch: &DayPatch) {
        if let Some(value) = patch.primary_location_id {
            self.primary_location_id = value;
        }

        if let Some(value) = patch.transfer_location_id {
            self.transfer_location_id = value;
        }

        if let Some(ref value) = patch.notes {
            self.notes = value.to_owned();
        }

        if let Some(ref value) = patch.summary {
            self.summary = value.to_owned();
        }
    }
}

/// Partial record merged into an [`ItineraryDay`].
///
/// The outer `Option` says whether the field is touched at all; the inner one
/// is the new (possibly null) value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayPatch {
    pub primary_location_id: Option<Option<i64>>,
    pub transfer_location_id: Option<Option<i64>>,
    pub notes: Option<Option<String>>,
    pub summary: Option<Option<String>>,
}

impl DayPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary_location(mut self, id: Option<i64>) -> Self {
        self.primary_location_id = Some(id);
        self
    }

    pub fn transfer_location(mut self, id: Option<i64>) -> Self {
        self.transfer_location_id = Some(id);
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn summary(mut self, summary: Option<String>) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Patch that overwrites every field with the values of `previous`.
    pub(crate) fn restore(previous: &ItineraryDay) -> Self {
        Self::new()
            .primary_location(previous.primary_location_id)
            .transfer_location(previous.transfer_location_id)
            .notes(previous.notes.to_owned())
            .summary(previous.summary.to_owned())
    }
}
