mod helpers;

use temp_dir::TempDir;
use time::macros::date;
use tripboard_itinerary::{
    Assignment, DayPatch, EditSession, EditorError, ItineraryDay, ItineraryStore, Mode, TripRange,
};

use crate::helpers::MemoryStore;

fn plan(day: &ItineraryDay) -> (time::Date, Option<i64>, Option<i64>, Option<String>) {
    (
        day.date,
        day.primary_location_id,
        day.transfer_location_id,
        day.notes.to_owned(),
    )
}

#[tokio::test]
async fn test_commit_persists_only_changed_days() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let trip_id =
        helpers::create_trip(&state, date!(2024 - 10 - 01), date!(2024 - 10 - 07)).await?;
    let kyoto = helpers::add_location(&state, trip_id, "Kyoto").await?;
    let osaka = helpers::add_location(&state, trip_id, "Osaka").await?;

    let mut session = EditSession::load(&state.store, trip_id).await?;
    assert_eq!(session.draft().len(), 7);
    assert!(state.store.fetch_itinerary_days(trip_id).await?.is_empty());

    session.begin_edit()?;
    session
        .selection_mut()
        .begin_range_select(date!(2024 - 10 - 01));
    session
        .selection_mut()
        .extend_range_select(date!(2024 - 10 - 03));
    session.selection_mut().end_range_select();
    session.apply(&Assignment::Location(kyoto))?;

    session.selection_mut().toggle_date(date!(2024 - 10 - 04));
    session.apply(&Assignment::Transfer {
        from: kyoto,
        to: osaka,
    })?;

    assert_eq!(session.pending_changes().len(), 4);
    assert_eq!(session.commit(&state.store).await?, 4);
    assert_eq!(session.mode(), Mode::Viewing);
    assert!(!session.has_changes());

    let stored = state.store.fetch_itinerary_days(trip_id).await?;
    assert_eq!(stored.len(), 4);
    assert!(stored.iter().all(|day| day.id.is_some()));

    let reloaded = EditSession::load(&state.store, trip_id).await?;
    let expected = session.draft().iter().map(plan).collect::<Vec<_>>();
    let actual = reloaded.draft().iter().map(plan).collect::<Vec<_>>();
    assert_eq!(actual, expected);
    assert_eq!(reloaded.draft(), session.draft());
    assert!(session.snapshot().get(date!(2024 - 10 - 01)).unwrap().is_persisted());
    assert!(!session.snapshot().get(date!(2024 - 10 - 05)).unwrap().is_persisted());

    let transfer = reloaded.draft().get(date!(2024 - 10 - 04)).unwrap();
    assert_eq!(transfer.primary_location_id, Some(kyoto));
    assert_eq!(transfer.transfer_location_id, Some(osaka));

    Ok(())
}

#[tokio::test]
async fn test_commit_updates_existing_rows() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let trip_id =
        helpers::create_trip(&state, date!(2024 - 10 - 01), date!(2024 - 10 - 03)).await?;

    let mut session = EditSession::load(&state.store, trip_id).await?;
    session.begin_edit()?;
    session.update_day(
        date!(2024 - 10 - 02),
        &DayPatch::new().notes(Some("Fushimi Inari at dawn".to_owned())),
    )?;
    session.commit(&state.store).await?;

    let mut session = EditSession::load(&state.store, trip_id).await?;
    let id = session.draft().get(date!(2024 - 10 - 02)).unwrap().id;
    session.begin_edit()?;
    session.update_day(
        date!(2024 - 10 - 02),
        &DayPatch::new().summary(Some("Temples".to_owned())),
    )?;
    session.commit(&state.store).await?;

    let stored = state.store.fetch_itinerary_days(trip_id).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].notes.as_deref(), Some("Fushimi Inari at dawn"));
    assert_eq!(stored[0].summary.as_deref(), Some("Temples"));

    Ok(())
}

#[tokio::test]
async fn test_load_unknown_trip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let result = EditSession::load(&state.store, 42).await;

    assert!(matches!(
        result,
        Err(EditorError::Load(tripboard_shared::Error::NotFound(_)))
    ));

    Ok(())
}

#[tokio::test]
async fn test_failed_commit_keeps_draft() -> anyhow::Result<()> {
    let store = MemoryStore::new(TripRange::new(
        date!(2024 - 10 - 01),
        date!(2024 - 10 - 05),
    )?);
    let mut session = EditSession::load(&store, 1).await?;
    session.begin_edit()?;
    session.selection_mut().toggle_date(date!(2024 - 10 - 02));
    session.selection_mut().toggle_date(date!(2024 - 10 - 04));
    session.apply(&Assignment::Location(9))?;

    let before = session.draft().clone();
    store.fail(true);

    let result = session.commit(&store).await;

    assert!(matches!(result, Err(EditorError::Persist(_))));
    assert_eq!(session.draft(), &before);
    assert_eq!(session.mode(), Mode::Editing);
    assert_eq!(session.last_error(), Some("database is locked"));
    assert_eq!(session.pending_changes().len(), 2);
    assert!(store.batches().is_empty());

    session.dismiss_error();
    assert_eq!(session.last_error(), None);

    store.fail(false);
    assert_eq!(session.commit(&store).await?, 2);
    assert_eq!(store.batches().len(), 1);
    assert_eq!(store.batches()[0].len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_commit_without_changes_skips_store() -> anyhow::Result<()> {
    let store = MemoryStore::new(TripRange::new(
        date!(2024 - 10 - 01),
        date!(2024 - 10 - 02),
    )?);
    let mut session = EditSession::load(&store, 1).await?;
    session.begin_edit()?;

    assert_eq!(session.commit(&store).await?, 0);
    assert_eq!(session.mode(), Mode::Viewing);
    assert!(store.batches().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_rollback_discards_draft() -> anyhow::Result<()> {
    let store = MemoryStore::new(TripRange::new(
        date!(2024 - 10 - 01),
        date!(2024 - 10 - 03),
    )?);
    let mut session = EditSession::load(&store, 1).await?;
    session.begin_edit()?;
    session.selection_mut().toggle_date(date!(2024 - 10 - 01));
    session.apply(&Assignment::Notes(Some("Arrive".to_owned())))?;

    session.rollback();

    assert!(!session.has_changes());
    assert_eq!(session.mode(), Mode::Viewing);
    assert!(matches!(session.undo(), Err(EditorError::NotEditing)));

    session.begin_edit()?;
    assert_eq!(session.commit(&store).await?, 0);
    assert!(store.batches().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_abandoned_commit_returns_to_editing() -> anyhow::Result<()> {
    let store = MemoryStore::new(TripRange::new(
        date!(2024 - 10 - 01),
        date!(2024 - 10 - 03),
    )?);
    let mut session = EditSession::load(&store, 1).await?;
    session.begin_edit()?;
    session.selection_mut().toggle_date(date!(2024 - 10 - 02));
    session.apply(&Assignment::Location(4))?;

    let before = session.draft().clone();
    store.stall(true);

    let timed_out =
        tokio::time::timeout(std::time::Duration::from_millis(20), session.commit(&store)).await;

    assert!(timed_out.is_err());
    assert_eq!(session.mode(), Mode::Editing);
    assert_eq!(session.draft(), &before);
    assert!(store.batches().is_empty());

    store.stall(false);
    assert_eq!(session.commit(&store).await?, 1);
    assert_eq!(session.mode(), Mode::Viewing);

    Ok(())
}

#[tokio::test]
async fn test_commit_assigns_ids_to_new_days() -> anyhow::Result<()> {
    let store = MemoryStore::new(TripRange::new(
        date!(2024 - 10 - 01),
        date!(2024 - 10 - 03),
    )?);
    let mut session = EditSession::load(&store, 1).await?;
    session.begin_edit()?;
    session.update_day(
        date!(2024 - 10 - 03),
        &DayPatch::new().summary(Some("Fly home".to_owned())),
    )?;

    session.commit(&store).await?;

    let day = session.draft().get(date!(2024 - 10 - 03)).unwrap();
    assert!(day.is_persisted());
    assert_eq!(session.snapshot(), session.draft());
    assert!(session.pending_changes().is_empty());

    let reloaded = EditSession::load(&store, 1).await?;
    assert_eq!(reloaded.draft(), session.draft());

    Ok(())
}
