use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;

use arbiter_core::{
    CheckParams, EventStandings, GameStats, Lichess, PartitionOptions, StandingEntry, SwissEvent,
    Tournament, aggregate, events_path, format_event_header, format_event_report, format_partition,
    is_fresh, load_token, partition_profiles, read_ndjson, results_path, swiss_games_path,
    untitled_or_lm, write_ndjson, write_text,
};

#[derive(Parser)]
#[command(name = "arbiter")]
#[command(
    about = "Check lichess tournament qualification standings and aggregate game statistics"
)]
struct Cli {
    /// Directory for cached API responses. Defaults to the platform data dir.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Determine qualified players across a series of completed events
    Check {
        /// Account whose created tournaments form the event series
        #[arg(long)]
        creator: Option<String>,

        /// Substring the tournament full name must contain
        #[arg(long)]
        filter: Option<String>,

        /// Standings to request per event
        #[arg(long)]
        nb: Option<usize>,

        /// Maximum newly qualified players per event
        #[arg(long)]
        cap: Option<usize>,

        /// Only accept untitled players and lichess masters
        #[arg(long)]
        lm_only: bool,

        /// Re-fetch even if cached files exist
        #[arg(short, long)]
        force: bool,
    },
    /// Aggregate game/move/position counts over archived tournaments
    Stats {
        /// Directory of NDJSON game dumps to scan
        #[arg(long, default_value = "swisses")]
        swiss_dir: PathBuf,

        /// Swiss tournaments listing whose game dumps are downloaded into
        /// the swiss dir when missing
        #[arg(long, default_value = "fide-swisses.ndjson")]
        swisses_file: PathBuf,

        /// Events listings whose arenas contribute slim totals
        #[arg(long)]
        events_file: Vec<PathBuf>,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

async fn load_events(
    api: &Lichess,
    data_dir: &Path,
    creator: &str,
    filter: &str,
    force: bool,
) -> Result<Vec<Tournament>> {
    let path = events_path(data_dir);
    if !force && fs::try_exists(&path).await.unwrap_or(false) {
        println!(
            "{} Events list {}",
            style("✓").green().bold(),
            style("(cached)").dim()
        );
        return Ok(read_ndjson(&path).await?);
    }

    let spinner = create_spinner("Downloading events list...");
    let events = api.created_tournaments(creator, filter).await?;
    write_ndjson(&path, &events).await?;
    spinner.finish_with_message(format!(
        "{} Events list: {} tournaments",
        style("✓").green().bold(),
        events.len()
    ));
    tokio::time::sleep(Duration::from_secs(2)).await;
    Ok(events)
}

async fn load_standings(
    api: &Lichess,
    data_dir: &Path,
    tournament: &Tournament,
    nb: usize,
    force: bool,
) -> Result<Vec<StandingEntry>> {
    let path = results_path(data_dir, &tournament.id);
    if force || !is_fresh(&path, nb).await {
        let spinner = create_spinner(&format!("Fetching results for {}...", tournament.id));
        let body = api.tournament_results(&tournament.id, nb).await?;
        write_text(&path, &body).await?;
        spinner.finish_with_message(format!(
            "{} Results for {}",
            style("✓").green().bold(),
            style(&tournament.id).dim()
        ));
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
    Ok(read_ndjson(&path).await?)
}

async fn run_check(
    data_dir: &Path,
    creator: String,
    filter: String,
    nb: usize,
    cap: usize,
    lm_only: bool,
    force: bool,
) -> Result<()> {
    let token = load_token(Path::new("."));
    let api = Lichess::new(token);

    fs::create_dir_all(data_dir.join("events")).await?;

    let mut events = load_events(&api, data_dir, &creator, &filter, force).await?;
    events.sort_by_key(|e| e.starts_at);

    let now = now_ms();
    let completed: Vec<Tournament> = events.into_iter().filter(|e| e.is_finished(now)).collect();

    println!("\n{}", style("Checking top rankers").cyan().bold());

    let mut event_standings = Vec::with_capacity(completed.len());
    for tournament in completed {
        let standings = load_standings(&api, data_dir, &tournament, nb, force).await?;
        event_standings.push(EventStandings {
            tournament,
            standings,
        });
    }

    let title_filter: Option<&dyn Fn(&StandingEntry) -> bool> =
        if lm_only { Some(&untitled_or_lm) } else { None };
    let aggregation = aggregate(&event_standings, cap, title_filter)?;

    for (event, report) in event_standings.iter().zip(&aggregation.reports) {
        println!();
        println!(
            "{}",
            format_event_header(&event.tournament, api.base_url())
        );
        print!("{}", format_event_report(report));
    }

    println!("\n{}", style("Checking flags and bans").cyan().bold());

    let mut usernames: Vec<String> = aggregation.qualified.into_iter().collect();
    usernames.sort_by_key(|u| u.to_lowercase());

    let partition = partition_profiles(&usernames, &api, &PartitionOptions::default()).await?;

    println!();
    print!("{}", format_partition(&partition));

    Ok(())
}

async fn download_swisses(api: &Lichess, swiss_dir: &Path, swisses_file: &Path) -> Result<()> {
    let swisses: Vec<SwissEvent> = read_ndjson(swisses_file).await?;
    fs::create_dir_all(swiss_dir).await?;

    for swiss in &swisses {
        let path = swiss_games_path(swiss_dir, &swiss.id);
        if fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }
        let spinner = create_spinner(&format!("Downloading games for {}...", swiss.name));
        let body = api.swiss_games(&swiss.id).await?;
        write_text(&path, &body).await?;
        spinner.finish_with_message(format!(
            "{} Games for {}",
            style("✓").green().bold(),
            style(&swiss.name).dim()
        ));
    }
    Ok(())
}

async fn run_stats(
    swiss_dir: PathBuf,
    swisses_file: PathBuf,
    events_files: Vec<PathBuf>,
) -> Result<()> {
    let token = load_token(Path::new("."));
    let api = Lichess::new(token);

    if fs::try_exists(&swisses_file).await.unwrap_or(false) {
        download_swisses(&api, &swiss_dir, &swisses_file).await?;
    }

    let mut stats = GameStats::new();

    if fs::try_exists(&swiss_dir).await.unwrap_or(false) {
        let spinner = create_spinner(&format!("Scanning {}...", swiss_dir.display()));
        stats.add_ndjson_dir(&swiss_dir).await?;
        spinner.finish_with_message(format!(
            "{} Scanned {}",
            style("✓").green().bold(),
            style(swiss_dir.display()).dim()
        ));
    }

    for file in &events_files {
        let tournaments: Vec<Tournament> = read_ndjson(file).await?;
        for tournament in &tournaments {
            let spinner = create_spinner(&format!("Downloading info for {}...", tournament.id));
            let info = api.tournament_info(&tournament.id).await?;
            stats.add_arena_totals(&info);
            spinner.finish_with_message(format!(
                "{} Info for {}",
                style("✓").green().bold(),
                style(&tournament.id).dim()
            ));
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    println!();
    print!("{}", stats.summary());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli
        .data_dir
        .unwrap_or_else(arbiter_core::default_data_dir);

    println!(
        "\n{}  {}\n",
        style("arbiter").cyan().bold(),
        style("Tournament Qualification Checker").dim()
    );

    match cli.command {
        Command::Check {
            creator,
            filter,
            nb,
            cap,
            lm_only,
            force,
        } => {
            let defaults = CheckParams::default();
            run_check(
                &data_dir,
                creator.unwrap_or(defaults.creator),
                filter.unwrap_or(defaults.name_filter),
                nb.unwrap_or(defaults.nb),
                cap.unwrap_or(defaults.cap),
                lm_only,
                force,
            )
            .await
        }
        Command::Stats {
            swiss_dir,
            swisses_file,
            events_file,
        } => run_stats(swiss_dir, swisses_file, events_file).await,
    }
}
