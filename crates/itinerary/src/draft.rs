use std::collections::BTreeMap;

use time::Date;

use crate::{DayPatch, EditorError, ItineraryDay, Result};

/// Inclusive `[start, end]` span of a trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TripRange {
    start: Date,
    end: Date,
}

impl TripRange {
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if start > end {
            return Err(EditorError::InvalidRange { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start).whole_days() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |date| {
            date.next_day().filter(|next| *next <= end)
        })
    }

    pub(crate) fn check(&self, date: Date) -> Result<()> {
        if self.contains(date) {
            return Ok(());
        }

        Err(EditorError::OutOfRange {
            date,
            start: self.start,
            end: self.end,
        })
    }
}

/// Working copy of a trip's itinerary: exactly one record per date of the
/// trip range, no gaps and no extras.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftItinerary {
    trip_id: i64,
    range: TripRange,
    days: BTreeMap<Date, ItineraryDay>,
}

impl DraftItinerary {
    pub fn initialize(
        trip_id: i64,
        range: TripRange,
        persisted: impl IntoIterator<Item = ItineraryDay>,
    ) -> Self {
        let mut days = range
            .dates()
            .map(|date| (date, ItineraryDay::empty(trip_id, date)))
            .collect::<BTreeMap<_, _>>();

        for day in persisted {
            if day.trip_id != trip_id {
                tracing::warn!(
                    trip_id,
                    other_trip_id = day.trip_id,
                    date = %day.date,
                    "ignoring itinerary day of another trip"
                );
                continue;
            }

            match days.get_mut(&day.date) {
                Some(slot) => *slot = day,
                None => tracing::warn!(
                    trip_id,
                    date = %day.date,
                    "ignoring itinerary day outside of trip range"
                ),
            }
        }

        Self {
            trip_id,
            range,
            days,
        }
    }

    pub fn trip_id(&self) -> i64 {
        self.trip_id
    }

    pub fn range(&self) -> TripRange {
        self.range
    }

    pub fn get(&self, date: Date) -> Option<&ItineraryDay> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &ItineraryDay> {
        self.days.values()
    }

    /// Returns a copy with `patch` merged into the record of `date`.
    pub fn update(&self, date: Date, patch: &DayPatch) -> Result<Self> {
        let mut next = self.clone();
        next.update_in_place(date, patch)?;

        Ok(next)
    }

    pub(crate) fn update_in_place(&mut self, date: Date, patch: &DayPatch) -> Result<()> {
        self.range.check(date)?;

        let trip_id = self.trip_id;
        self.days
            .entry(date)
            .or_insert_with(|| ItineraryDay::empty(trip_id, date))
            .apply(patch);

        Ok(())
    }

    /// Copies the ids of freshly saved records onto the matching dates.
    pub(crate) fn mark_persisted(&mut self, saved: &[ItineraryDay]) {
        for day in saved.iter().filter(|day| day.trip_id == self.trip_id) {
            if let Some(slot) = self.days.get_mut(&day.date) {
                slot.id = day.id;
            }
        }
    }

    /// Records that differ from the same date in `snapshot`. Dates missing
    /// from `snapshot` always count as changed.
    pub fn diff(&self, snapshot: &DraftItinerary) -> Vec<ItineraryDay> {
        self.days
            .values()
            .filter(|day| snapshot.days.get(&day.date) != Some(*day))
            .cloned()
            .collect()
    }
}
