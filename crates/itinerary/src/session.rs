use time::Date;

use crate::{
    ActionHistory, Assignment, DayPatch, DraftItinerary, EditorError, HistoryEntry,
    ItineraryDay, ItineraryStore, Result, SelectionEngine,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Viewing,
    Editing,
    /// A save is in flight; nothing else may change until it resolves.
    Committing,
}

/// One user's editing session over a trip's itinerary.
///
/// Holds the last persisted snapshot next to the working draft. Edits only
/// touch the draft; `commit` sends the difference to the store and `rollback`
/// throws the draft away.
#[derive(Debug)]
pub struct EditSession {
    snapshot: DraftItinerary,
    draft: DraftItinerary,
    selection: SelectionEngine,
    history: ActionHistory,
    mode: Mode,
    last_error: Option<String>,
}

impl EditSession {
    pub fn new(snapshot: DraftItinerary) -> Self {
        Self {
            draft: snapshot.clone(),
            snapshot,
            selection: SelectionEngine::new(),
            history: ActionHistory::default(),
            mode: Mode::Viewing,
            last_error: None,
        }
    }

    pub fn with_history(mut self, history: ActionHistory) -> Self {
        self.history = history;
        self
    }

    #[tracing::instrument(skip(store))]
    pub async fn load<S: ItineraryStore + ?Sized>(store: &S, trip_id: i64) -> Result<Self> {
        let range = store
            .fetch_trip_date_range(trip_id)
            .await
            .map_err(EditorError::Load)?;
        let days = store
            .fetch_itinerary_days(trip_id)
            .await
            .map_err(EditorError::Load)?;

        Ok(Self::new(DraftItinerary::initialize(trip_id, range, days)))
    }

    pub fn snapshot(&self) -> &DraftItinerary {
        &self.snapshot
    }

    pub fn draft(&self) -> &DraftItinerary {
        &self.draft
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionEngine {
        &mut self.selection
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    /// Message of the last failed save, until dismissed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn begin_edit(&mut self) -> Result<()> {
        if self.mode == Mode::Committing {
            return Err(EditorError::CommitInFlight);
        }

        self.mode = Mode::Editing;

        Ok(())
    }

    fn ensure_editing(&self) -> Result<()> {
        match self.mode {
            Mode::Editing => Ok(()),
            Mode::Committing => Err(EditorError::CommitInFlight),
            Mode::Viewing => Err(EditorError::NotEditing),
        }
    }

    /// Replaces the draft with `next` and records how to get back. Returns the
    /// number of days that changed.
    fn record(&mut self, description: String, next: DraftItinerary) -> usize {
        let Some(entry) = HistoryEntry::capture(description, &self.draft, &next) else {
            return 0;
        };

        let changed = entry.inverse.len();
        self.history.push(entry);
        self.draft = next;

        changed
    }

    pub fn update_day(&mut self, date: Date, patch: &DayPatch) -> Result<usize> {
        self.ensure_editing()?;

        let next = self.draft.update(date, patch)?;

        Ok(self.record(format!("edit {date}"), next))
    }

    /// Applies `assignment` to the current selection, then clears it. An empty
    /// selection changes nothing.
    pub fn apply(&mut self, assignment: &Assignment) -> Result<usize> {
        self.ensure_editing()?;

        let dates = self.selection.selected_dates();
        self.selection.clear();

        if dates.is_empty() {
            return Ok(0);
        }

        let next = assignment.apply(&self.draft, &dates);
        let changed = self.record(assignment.describe(dates.len()), next);

        tracing::debug!(
            trip_id = self.draft.trip_id(),
            selected = dates.len(),
            changed,
            "{assignment:?}"
        );

        Ok(changed)
    }

    /// Reverts the latest edit and returns its description.
    pub fn undo(&mut self) -> Result<Option<String>> {
        self.ensure_editing()?;

        let Some((description, draft)) = self.history.undo(&self.draft) else {
            return Ok(None);
        };

        self.draft = draft;

        Ok(Some(description))
    }

    /// Days that differ from the snapshot, i.e. what `commit` would send.
    pub fn pending_changes(&self) -> Vec<ItineraryDay> {
        self.draft.diff(&self.snapshot)
    }

    pub fn has_changes(&self) -> bool {
        self.draft != self.snapshot
    }

    /// Saves the pending changes through `store`.
    ///
    /// On success the draft becomes the new snapshot and the session leaves
    /// edit mode. On failure the draft is left exactly as it was, the session
    /// stays in edit mode and the message is kept in [`Self::last_error`].
    #[tracing::instrument(skip_all, fields(trip_id = self.draft.trip_id()))]
    pub async fn commit<S: ItineraryStore + ?Sized>(&mut self, store: &S) -> Result<usize> {
        if self.mode == Mode::Committing {
            return Err(EditorError::CommitInFlight);
        }

        let changed = self.pending_changes();

        if changed.is_empty() {
            self.finish();
            return Ok(0);
        }

        let trip_id = self.draft.trip_id();
        let result = {
            let _guard = CommitGuard::enter(&mut self.mode);
            store.persist_itinerary_days(trip_id, &changed).await
        };

        match result {
            Ok(saved) => {
                tracing::info!(days = changed.len(), "itinerary committed");
                self.draft.mark_persisted(&saved);
                self.snapshot = self.draft.clone();
                self.finish();

                Ok(changed.len())
            }
            Err(err) => {
                tracing::error!(days = changed.len(), "failed to commit itinerary: {err}");
                self.last_error = Some(err.to_string());

                Err(EditorError::Persist(err))
            }
        }
    }

    /// Discards the draft and returns to the snapshot.
    pub fn rollback(&mut self) -> &DraftItinerary {
        self.draft = self.snapshot.clone();
        self.finish();

        &self.draft
    }

    fn finish(&mut self) {
        self.mode = Mode::Viewing;
        self.selection.clear();
        self.history.clear();
        self.last_error = None;
    }
}

/// Holds the session in [`Mode::Committing`] while a save is awaited. Back to
/// [`Mode::Editing`] once dropped, including when the save future is.
struct CommitGuard<'a> {
    mode: &'a mut Mode,
}

impl<'a> CommitGuard<'a> {
    fn enter(mode: &'a mut Mode) -> Self {
        *mode = Mode::Committing;
        Self { mode }
    }
}

impl Drop for CommitGuard<'_> {
    fn drop(&mut self) {
        *self.mode = Mode::Editing;
    }
}
