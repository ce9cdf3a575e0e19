use std::collections::VecDeque;

use crate::{DayPatch, DraftItinerary, ItineraryDay};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub description: String,
    /// Records of the touched dates as they were before the action.
    pub inverse: Vec<ItineraryDay>,
}

impl HistoryEntry {
    /// `None` when `after` does not differ from `before`.
    pub fn capture(
        description: impl Into<String>,
        before: &DraftItinerary,
        after: &DraftItinerary,
    ) -> Option<Self> {
        let inverse = after
            .diff(before)
            .into_iter()
            .filter_map(|day| before.get(day.date).cloned())
            .collect::<Vec<_>>();

        if inverse.is_empty() {
            return None;
        }

        Some(Self {
            description: description.into(),
            inverse,
        })
    }

    pub fn revert(&self, draft: &DraftItinerary) -> DraftItinerary {
        let mut next = draft.clone();

        for previous in self.inverse.iter() {
            if let Err(err) = next.update_in_place(previous.date, &DayPatch::restore(previous)) {
                tracing::warn!("{err}");
            }
        }

        next
    }
}

/// Bounded undo stack owned by an edit session. The oldest entry is dropped
/// once `capacity` is reached.
#[derive(Clone, Debug)]
pub struct ActionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ActionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }

        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }

        self.entries.push_back(entry);
    }

    /// Description of the action `undo` would revert.
    pub fn peek(&self) -> Option<&str> {
        self.entries.back().map(|entry| entry.description.as_str())
    }

    /// Reverts the latest action on `draft`.
    pub fn undo(&mut self, draft: &DraftItinerary) -> Option<(String, DraftItinerary)> {
        let entry = self.entries.pop_back()?;
        let reverted = entry.revert(draft);

        Some((entry.description, reverted))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TripRange, assign_location, assign_notes};
    use time::macros::date;

    fn june() -> DraftItinerary {
        let range = TripRange::new(date!(2024 - 06 - 01), date!(2024 - 06 - 05)).unwrap();
        DraftItinerary::initialize(1, range, vec![])
    }

    #[test]
    fn test_capture_skips_noop_actions() {
        let draft = june();

        assert!(HistoryEntry::capture("nothing", &draft, &draft).is_none());
    }

    #[test]
    fn test_undo_restores_previous_records() {
        let mut history = ActionHistory::default();
        let start = june();
        let dates = [date!(2024 - 06 - 02), date!(2024 - 06 - 03)];

        let first = assign_location(&start, &dates, 4);
        history.push(HistoryEntry::capture("location", &start, &first).unwrap());
        let second = assign_notes(&first, &dates[..1], Some("late check-in".to_owned()));
        history.push(HistoryEntry::capture("notes", &first, &second).unwrap());

        let (description, reverted) = history.undo(&second).unwrap();
        assert_eq!(description, "notes");
        assert_eq!(reverted, first);

        let (description, reverted) = history.undo(&reverted).unwrap();
        assert_eq!(description, "location");
        assert_eq!(reverted, start);

        assert!(history.undo(&reverted).is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = ActionHistory::new(2);
        let start = june();

        for (i, date) in [
            date!(2024 - 06 - 01),
            date!(2024 - 06 - 02),
            date!(2024 - 06 - 03),
        ]
        .into_iter()
        .enumerate()
        {
            let after = assign_location(&start, &[date], 1);
            history.push(HistoryEntry::capture(format!("action {i}"), &start, &after).unwrap());
        }

        assert_eq!(history.len(), 2);
        assert_eq!(history.peek(), Some("action 2"));
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut history = ActionHistory::new(0);
        let start = june();
        let after = assign_location(&start, &[date!(2024 - 06 - 01)], 1);

        history.push(HistoryEntry::capture("x", &start, &after).unwrap());

        assert!(history.is_empty());
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut history = ActionHistory::new(usize::MAX);
        let start = june();
        let after = assign_location(&start, &[date!(2024 - 06 - 01)], 1);

        history.push(HistoryEntry::capture("x", &start, &after).unwrap());

        assert_eq!(history.capacity(), usize::MAX);
        assert_eq!(history.len(), 1);
    }
}
