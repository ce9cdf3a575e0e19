use std::collections::{BTreeSet, HashMap};

use clap::{Args, Subcommand};
use time::Date;
use tripboard_itinerary::{
    ActionHistory, Assignment, EditSession, ItineraryDay, ItineraryStore, SqliteStore,
};
use tripboard_shared::trip::Location;

#[derive(Subcommand)]
pub enum ItineraryCommand {
    /// Print every day of a trip
    Show {
        #[arg(long)]
        trip: i64,

        #[arg(long)]
        json: bool,
    },
    /// Apply a bulk change to a range or a set of dates and save it
    Assign(AssignArgs),
}

#[derive(Args)]
pub struct AssignArgs {
    #[arg(long)]
    trip: i64,

    /// Participant email; must be allowed to edit the itinerary
    #[arg(long = "as")]
    email: String,

    /// First date of a contiguous range
    #[arg(long, value_parser = super::parse_date, requires = "to", conflicts_with = "date")]
    from: Option<Date>,

    /// Last date of a contiguous range
    #[arg(long, value_parser = super::parse_date, requires = "from")]
    to: Option<Date>,

    /// Individual date, may be repeated
    #[arg(long, value_parser = super::parse_date)]
    date: Vec<Date>,

    /// Print the days that would change without saving them
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    change: Change,
}

#[derive(Subcommand)]
enum Change {
    /// Stay at one location; clears any transfer
    Location { id: i64 },
    /// Move from one location to another on the last selected day
    Transfer { from: i64, to: i64 },
    /// Replace notes; omit TEXT to clear them
    Notes { text: Option<String> },
    /// Replace the summary; omit TEXT to clear it
    Summary { text: Option<String> },
}

impl From<Change> for Assignment {
    fn from(value: Change) -> Self {
        match value {
            Change::Location { id } => Assignment::Location(id),
            Change::Transfer { from, to } => Assignment::Transfer { from, to },
            Change::Notes { text } => Assignment::Notes(text),
            Change::Summary { text } => Assignment::Summary(text),
        }
    }
}

pub async fn run(config: tripboard::Config, command: ItineraryCommand) -> anyhow::Result<()> {
    let state = super::state(&config).await?;
    let store = SqliteStore::new(state.clone());

    match command {
        ItineraryCommand::Show { trip, json } => show(&store, trip, json).await,
        ItineraryCommand::Assign(args) => {
            let query = tripboard_trip::Query::new(state);
            let role = query.ensure_editor(args.trip, &args.email).await?;
            tracing::debug!(%role, "editing as {}", args.email);

            let history = ActionHistory::new(config.editor.history_capacity);
            assign(&store, args, history).await
        }
    }
}

async fn show(store: &SqliteStore, trip_id: i64, json: bool) -> anyhow::Result<()> {
    let session = EditSession::load(store, trip_id).await?;
    let locations = store
        .fetch_locations(trip_id)
        .await?
        .into_iter()
        .map(|location| (location.id, location))
        .collect::<HashMap<_, _>>();

    if json {
        let days = session
            .draft()
            .iter()
            .map(|day| day_json(day, &locations))
            .collect::<Vec<_>>();

        println!("{}", serde_json::to_string_pretty(&days)?);

        return Ok(());
    }

    for day in session.draft().iter() {
        println!("{}", day_line(day, &locations));
    }

    Ok(())
}

#[tracing::instrument(skip_all, fields(trip_id = args.trip, email = %args.email))]
async fn assign(
    store: &SqliteStore,
    args: AssignArgs,
    history: ActionHistory,
) -> anyhow::Result<()> {
    let mut session = EditSession::load(store, args.trip).await?.with_history(history);
    session.begin_edit()?;

    let selection = session.selection_mut();
    match (args.from, args.to) {
        (Some(from), Some(to)) => {
            selection.begin_range_select(from);
            selection.extend_range_select(to);
            selection.end_range_select();
        }
        _ => {
            for date in args.date.iter().copied().collect::<BTreeSet<_>>() {
                selection.toggle_date(date);
            }
        }
    }

    if session.selection().is_empty() {
        anyhow::bail!("select days with --from/--to or --date");
    }

    let outside = session
        .selection()
        .selected_dates()
        .into_iter()
        .filter(|date| !session.draft().range().contains(*date))
        .count();

    if outside > 0 {
        tracing::warn!(outside, "ignoring selected days outside of the trip");
    }

    let locations = store
        .fetch_locations(args.trip)
        .await?
        .into_iter()
        .map(|location| (location.id, location))
        .collect::<HashMap<_, _>>();

    let assignment = Assignment::from(args.change);
    if let Some(id) = assignment
        .location_ids()
        .into_iter()
        .find(|id| !locations.contains_key(id))
    {
        return Err(tripboard_shared::Error::User(format!(
            "location {id} does not belong to trip {}",
            args.trip
        ))
        .into());
    }

    session.apply(&assignment)?;

    for day in session.pending_changes() {
        println!("{}", day_line(&day, &locations));
    }

    if args.dry_run {
        session.rollback();
        return Ok(());
    }

    let saved = session.commit(store).await?;
    tracing::info!("{saved} day(s) saved");

    Ok(())
}

fn location_name(id: Option<i64>, locations: &HashMap<i64, Location>) -> String {
    match id {
        Some(id) => locations
            .get(&id)
            .map(|location| location.name.to_owned())
            .unwrap_or_else(|| format!("#{id}")),
        None => "-".to_owned(),
    }
}

fn day_line(day: &ItineraryDay, locations: &HashMap<i64, Location>) -> String {
    let mut place = location_name(day.primary_location_id, locations);

    if day.has_transfer() {
        place = format!(
            "{place} -> {}",
            location_name(day.transfer_location_id, locations)
        );
    }

    let mut line = format!("{}  {place}", tripboard_shared::format_date(day.date));

    if let Some(summary) = &day.summary {
        line.push_str(&format!("  [{summary}]"));
    }

    if let Some(notes) = &day.notes {
        line.push_str(&format!("  {notes}"));
    }

    line
}

fn day_json(day: &ItineraryDay, locations: &HashMap<i64, Location>) -> serde_json::Value {
    let location = |id: Option<i64>| {
        id.and_then(|id| locations.get(&id)).map(|location| {
            serde_json::json!({
                "id": location.id,
                "name": location.name,
                "color": format!("#{}", location.color),
                "text_color": location.text_color(),
            })
        })
    };

    serde_json::json!({
        "date": tripboard_shared::format_date(day.date),
        "primary_location": location(day.primary_location_id),
        "transfer_location": location(day.transfer_location_id),
        "notes": day.notes,
        "summary": day.summary,
    })
}
