use chrono::{TimeZone, Utc};

use crate::{
    aggregate::EventReport,
    partition::Partition,
    types::Tournament,
};

/// Format an epoch-ms timestamp the way the qualification announcements
/// do: day, month name, hour on the hour, UTC.
pub fn format_start_time(starts_at_ms: i64) -> String {
    match Utc.timestamp_millis_opt(starts_at_ms).single() {
        Some(dt) => dt.format("%d. %B %H:00").to_string(),
        None => starts_at_ms.to_string(),
    }
}

/// Markdown section header linking to the tournament page.
pub fn format_event_header(tournament: &Tournament, base_url: &str) -> String {
    format!(
        "#### [{} — {}]({}/tournament/{})",
        tournament.full_name,
        format_start_time(tournament.starts_at),
        base_url,
        tournament.id
    )
}

/// Ranked list of newly qualified players, plus the operator advice line
/// when the event ran out of candidates before the cap.
pub fn format_event_report(report: &EventReport) -> String {
    let mut output = String::new();
    for entry in &report.entries {
        output.push_str(&format!("{}. {}\n", entry.rank, entry.username));
    }
    if report.insufficient {
        output.push_str("Warning: ran out of candidates before the cap; re-run with a larger --nb\n");
    }
    output
}

/// The two final listings of the check report.
pub fn format_partition(partition: &Partition) -> String {
    let mut output = String::new();

    output.push_str("The following players should be warned about RU/BY flags:\n");
    for username in &partition.flagged {
        output.push_str(username);
        output.push('\n');
    }

    output.push_str("\nThe following players are closed or banned:\n");
    for username in &partition.banned {
        output.push_str(username);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::QualifiedEntry;

    #[test]
    fn start_time_renders_utc_on_the_hour() {
        // 2023-07-05 14:30:00 UTC
        assert_eq!(format_start_time(1688567400000), "05. July 14:00");
    }

    #[test]
    fn event_header_links_to_tournament() {
        let tournament = Tournament {
            id: "abc123".to_string(),
            full_name: "FIDE Offerspill World Fischer Random".to_string(),
            starts_at: 1688567400000,
            finishes_at: 1688571000000,
        };
        assert_eq!(
            format_event_header(&tournament, "https://lichess.org"),
            "#### [FIDE Offerspill World Fischer Random — 05. July 14:00](https://lichess.org/tournament/abc123)"
        );
    }

    #[test]
    fn report_lists_ranked_usernames() {
        let report = EventReport {
            tournament_id: "abc123".to_string(),
            entries: vec![
                QualifiedEntry {
                    rank: 1,
                    username: "alice".to_string(),
                },
                QualifiedEntry {
                    rank: 2,
                    username: "bob".to_string(),
                },
            ],
            insufficient: false,
        };
        assert_eq!(format_event_report(&report), "1. alice\n2. bob\n");
    }

    #[test]
    fn insufficient_report_carries_advice() {
        let report = EventReport {
            tournament_id: "abc123".to_string(),
            entries: vec![],
            insufficient: true,
        };
        assert!(format_event_report(&report).contains("larger --nb"));
    }

    #[test]
    fn partition_listing_order() {
        let partition = Partition {
            flagged: vec!["anna".to_string(), "Boris".to_string()],
            banned: vec!["mallory".to_string()],
        };
        let output = format_partition(&partition);
        let flags_at = output.find("anna").unwrap();
        let bans_at = output.find("mallory").unwrap();
        assert!(flags_at < bans_at);
        assert!(output.contains("closed or banned"));
    }
}
