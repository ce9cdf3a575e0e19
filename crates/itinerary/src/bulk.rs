use time::Date;

use crate::{DayPatch, DraftItinerary, ItineraryDay};

pub enum BulkEdit<'a> {
    /// Same partial record for every date.
    Fields(DayPatch),
    /// Partial record derived from the date and its current record.
    PerDate(&'a dyn Fn(Date, &ItineraryDay) -> DayPatch),
}

/// Applies `edit` to every date of `dates` that belongs to the trip and
/// returns the resulting draft. Dates outside the trip range are skipped.
pub fn apply_to_selection(
    draft: &DraftItinerary,
    dates: &[Date],
    edit: &BulkEdit<'_>,
) -> DraftItinerary {
    let mut next = draft.clone();

    for &date in dates {
        let Some(current) = next.get(date) else {
            tracing::debug!(trip_id = next.trip_id(), %date, "skipping date outside of trip");
            continue;
        };

        let patch = match edit {
            BulkEdit::Fields(patch) => patch.clone(),
            BulkEdit::PerDate(derive) => derive(date, current),
        };

        if let Err(err) = next.update_in_place(date, &patch) {
            tracing::debug!(%date, "{err}");
        }
    }

    next
}

/// Sets the primary location of every date and drops any transfer.
pub fn assign_location(draft: &DraftItinerary, dates: &[Date], location_id: i64) -> DraftItinerary {
    let patch = DayPatch::new()
        .primary_location(Some(location_id))
        .transfer_location(None);

    apply_to_selection(draft, dates, &BulkEdit::Fields(patch))
}

/// Every date stays at `from`; the traveler moves on to `to` on the last
/// date of the selection.
pub fn assign_transfer(draft: &DraftItinerary, dates: &[Date], from: i64, to: i64) -> DraftItinerary {
    let range = draft.range();
    let Some(last) = dates.iter().copied().filter(|d| range.contains(*d)).max() else {
        return draft.clone();
    };

    let derive = move |date: Date, _: &ItineraryDay| {
        DayPatch::new()
            .primary_location(Some(from))
            .transfer_location((date == last).then_some(to))
    };

    apply_to_selection(draft, dates, &BulkEdit::PerDate(&derive))
}

/// Overwrites notes only; locations are left as they are.
pub fn assign_notes(draft: &DraftItinerary, dates: &[Date], notes: Option<String>) -> DraftItinerary {
    apply_to_selection(draft, dates, &BulkEdit::Fields(DayPatch::new().notes(notes)))
}

pub fn assign_summary(
    draft: &DraftItinerary,
    dates: &[Date],
    summary: Option<String>,
) -> DraftItinerary {
    apply_to_selection(draft, dates, &BulkEdit::Fields(DayPatch::new().summary(summary)))
}

/// A bulk change the user can apply to the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assignment {
    Location(i64),
    Transfer { from: i64, to: i64 },
    Notes(Option<String>),
    Summary(Option<String>),
}

impl Assignment {
    pub fn apply(&self, draft: &DraftItinerary, dates: &[Date]) -> DraftItinerary {
        match self {
            Assignment::Location(id) => assign_location(draft, dates, *id),
            Assignment::Transfer { from, to } => assign_transfer(draft, dates, *from, *to),
            Assignment::Notes(notes) => assign_notes(draft, dates, notes.to_owned()),
            Assignment::Summary(summary) => assign_summary(draft, dates, summary.to_owned()),
        }
    }

    /// Locations the assignment points days at.
    pub fn location_ids(&self) -> Vec<i64> {
        match self {
            Assignment::Location(id) => vec![*id],
            Assignment::Transfer { from, to } => vec![*from, *to],
            Assignment::Notes(_) | Assignment::Summary(_) => vec![],
        }
    }

    pub fn describe(&self, days: usize) -> String {
        match self {
            Assignment::Location(id) => format!("assign location {id} to {days} day(s)"),
            Assignment::Transfer { from, to } => {
                format!("assign transfer {from} -> {to} over {days} day(s)")
            }
            Assignment::Notes(_) => format!("edit notes of {days} day(s)"),
            Assignment::Summary(_) => format!("edit summary of {days} day(s)"),
        }
    }
}
