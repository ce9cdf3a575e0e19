use std::collections::BTreeSet;

use time::Date;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Pointer is down on `anchor` and currently over `current`.
    RangeSelecting { anchor: Date, current: Date },
    /// Contiguous inclusive range, `start <= end`, spanning at least two dates.
    RangeSelected { start: Date, end: Date },
    /// Individually toggled dates, never empty.
    Toggled(BTreeSet<Date>),
}

/// Tracks which calendar dates a bulk edit targets.
///
/// Input-agnostic: the caller translates pointer, touch or keyboard events
/// into `begin_range_select`/`extend_range_select`/`end_range_select`.
/// A press released on the same date it started is a click and toggles that
/// date; only a press dragged over several dates yields a range.
#[derive(Clone, Debug, Default)]
pub struct SelectionEngine {
    state: SelectionState,
    toggles_before_press: BTreeSet<Date>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn begin_range_select(&mut self, date: Date) {
        self.toggles_before_press = match std::mem::take(&mut self.state) {
            SelectionState::Toggled(dates) => dates,
            _ => BTreeSet::new(),
        };

        self.state = SelectionState::RangeSelecting {
            anchor: date,
            current: date,
        };
    }

    pub fn extend_range_select(&mut self, date: Date) {
        let SelectionState::RangeSelecting { anchor, current } = &mut self.state else {
            return;
        };

        *current = date;

        if date != *anchor {
            self.toggles_before_press.clear();
        }
    }

    pub fn end_range_select(&mut self) {
        let SelectionState::RangeSelecting { anchor, current } = self.state else {
            return;
        };

        if anchor != current {
            self.state = SelectionState::RangeSelected {
                start: anchor.min(current),
                end: anchor.max(current),
            };
            self.toggles_before_press.clear();

            return;
        }

        let mut dates = std::mem::take(&mut self.toggles_before_press);
        if !dates.remove(&anchor) {
            dates.insert(anchor);
        }

        self.state = if dates.is_empty() {
            SelectionState::Idle
        } else {
            SelectionState::Toggled(dates)
        };
    }

    /// Flips `date` in the toggle set. Ignored while a drag is in progress; a
    /// finished range is dropped in favour of a fresh toggle set.
    pub fn toggle_date(&mut self, date: Date) {
        match &mut self.state {
            SelectionState::RangeSelecting { .. } => {}
            SelectionState::Toggled(dates) => {
                if !dates.remove(&date) {
                    dates.insert(date);
                }

                if dates.is_empty() {
                    self.state = SelectionState::Idle;
                }
            }
            SelectionState::Idle | SelectionState::RangeSelected { .. } => {
                self.state = SelectionState::Toggled(BTreeSet::from([date]));
            }
        }
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
        self.toggles_before_press.clear();
    }

    /// Inclusive bounds of the live or finished range.
    pub fn range(&self) -> Option<(Date, Date)> {
        match self.state {
            SelectionState::RangeSelecting { anchor, current } => {
                Some((anchor.min(current), anchor.max(current)))
            }
            SelectionState::RangeSelected { start, end } => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_in_selection(&self, date: Date) -> bool {
        if let Some((start, end)) = self.range() {
            return start <= date && date <= end;
        }

        match &self.state {
            SelectionState::Toggled(dates) => dates.contains(&date),
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, SelectionState::Idle)
    }

    /// Selected dates in chronological order.
    pub fn selected_dates(&self) -> Vec<Date> {
        if let Some((start, end)) = self.range() {
            return std::iter::successors(Some(start), |date| {
                date.next_day().filter(|next| *next <= end)
            })
            .collect();
        }

        match &self.state {
            SelectionState::Toggled(dates) => dates.iter().copied().collect(),
            _ => vec![],
        }
    }

    /// Chronologically last selected date, whatever order it was picked in.
    pub fn last_date(&self) -> Option<Date> {
        if let Some((_, end)) = self.range() {
            return Some(end);
        }

        match &self.state {
            SelectionState::Toggled(dates) => dates.last().copied(),
            _ => None,
        }
    }
}
