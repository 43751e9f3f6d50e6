use std::collections::HashSet;

use crate::{
    error::{ArbiterError, Result},
    types::{StandingEntry, Tournament},
};

/// One completed event together with its rank-ordered standings,
/// best finisher first.
#[derive(Debug, Clone)]
pub struct EventStandings {
    pub tournament: Tournament,
    pub standings: Vec<StandingEntry>,
}

/// A username accepted from one event, with its local qualification rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedEntry {
    pub rank: u32,
    pub username: String,
}

/// Newly qualified usernames from a single event, in acceptance order.
///
/// `insufficient` is set when the event ran out of eligible candidates
/// before reaching the per-event cap. It is advice for the operator to
/// fetch more standings, not a failure.
#[derive(Debug, Clone)]
pub struct EventReport {
    pub tournament_id: String,
    pub entries: Vec<QualifiedEntry>,
    pub insufficient: bool,
}

/// Result of one aggregation pass over a sequence of events.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub qualified: HashSet<String>,
    pub reports: Vec<EventReport>,
}

/// Title predicate matching the restricted variant: untitled players or
/// lichess masters only.
pub fn untitled_or_lm(entry: &StandingEntry) -> bool {
    match entry.title.as_deref() {
        None | Some("LM") => true,
        Some(_) => false,
    }
}

/// Select up to `cap_per_event` newly qualified usernames from each event,
/// in event order, deduplicating across events.
///
/// `events` must already be sorted ascending by start timestamp and each
/// event's standings must be in rank order; qualification is first come
/// first served across both orderings. Usernames are compared
/// case-sensitively. Pure data transformation: no I/O, deterministic.
pub fn aggregate(
    events: &[EventStandings],
    cap_per_event: usize,
    title_filter: Option<&dyn Fn(&StandingEntry) -> bool>,
) -> Result<Aggregation> {
    if cap_per_event == 0 {
        return Err(ArbiterError::InvalidCap { cap: cap_per_event });
    }
    for pair in events.windows(2) {
        if pair[1].tournament.starts_at < pair[0].tournament.starts_at {
            return Err(ArbiterError::EventsNotSorted {
                tournament_id: pair[1].tournament.id.clone(),
                starts_at: pair[1].tournament.starts_at,
                previous: pair[0].tournament.starts_at,
            });
        }
    }

    let mut qualified = HashSet::new();
    let mut reports = Vec::with_capacity(events.len());

    for event in events {
        let mut entries = Vec::new();
        for entry in &event.standings {
            if qualified.contains(&entry.username) {
                continue;
            }
            if let Some(filter) = title_filter {
                if !filter(entry) {
                    continue;
                }
            }
            qualified.insert(entry.username.clone());
            entries.push(QualifiedEntry {
                rank: entries.len() as u32 + 1,
                username: entry.username.clone(),
            });
            if entries.len() == cap_per_event {
                break;
            }
        }
        let insufficient = entries.len() < cap_per_event;
        reports.push(EventReport {
            tournament_id: event.tournament.id.clone(),
            entries,
            insufficient,
        });
    }

    Ok(Aggregation { qualified, reports })
}
