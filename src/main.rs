use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handball_insights::calculate::{round1, RankedRow};
use handball_insights::config::AppConfig;
use handball_insights::models::{
    Event, Gauge, Match, MatchScope, MetricKey, ReportMode, ReportRequest, Zone, ZoneMap, CATALOG,
};
use handball_insights::pipeline::{Analyzer, Report};
use handball_insights::storage::{read_events, read_matches, JsonlWriter, StorageConfig};

#[derive(Parser)]
#[command(name = "handball-insights")]
#[command(about = "Handball match analytics from free-text event logs")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Offensive or defensive gauges
    Report {
        /// Report mode: offensive or defensive
        #[arg(long, default_value = "offensive")]
        mode: ReportMode,

        /// Restrict to one match (default: all matches)
        #[arg(long = "match")]
        match_id: Option<String>,

        /// Take this team's perspective
        #[arg(long)]
        team: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Append the report to derived/reports.jsonl
        #[arg(long)]
        save: bool,
    },

    /// Rank single-match performances by a metric
    Rank {
        /// Metric slug, e.g. turnovers or shooting_efficiency
        criterion: MetricKey,

        /// Number of rows (default from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Restrict to one match
        #[arg(long = "match")]
        match_id: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Shot chart or goalkeeper save map per zone
    Zones {
        #[arg(long, default_value = "offensive")]
        mode: ReportMode,

        #[arg(long = "match")]
        match_id: Option<String>,

        #[arg(long)]
        team: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Per-player shooting and goalkeeping figures
    Players {
        #[arg(long = "match")]
        match_id: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show team attribution per match
    Teams {
        #[arg(long)]
        json: bool,
    },

    /// List the metric catalog
    Metrics,
}

fn scope(match_id: Option<String>) -> MatchScope {
    match match_id {
        Some(id) => MatchScope::SingleMatch(id.into()),
        None => MatchScope::AllMatches,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_gauges(gauges: &[Gauge]) {
    println!(
        "{:<36} {:>7} {:>13} {:>9} {:>15}",
        "Metric", "Value", "Count", "Band", "Objective"
    );
    for g in gauges {
        let band = g
            .color_band
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        let objective = match &g.objective {
            Some(o) => format!("{} {}", o, g.objective_status),
            None => g.objective_status.to_string(),
        };
        println!(
            "{:<36} {:>6.1}% {:>13} {:>9} {:>15}",
            g.label,
            round1(g.percentage),
            g.display_count,
            band,
            objective
        );
    }
}

fn print_zones(zones: &ZoneMap, mode: ReportMode) {
    let success = match mode {
        ReportMode::Offensive => "Goals",
        ReportMode::Defensive => "Saves",
    };
    println!("{:<18} {:>6} {:>6} {:>7}", "Zone", "Shots", success, "Rate");
    for zone in Zone::ALL {
        let tally = zones.get(zone);
        if tally.shots == 0 {
            continue;
        }
        println!(
            "{:<18} {:>6} {:>6} {:>6.1}%",
            zone.label(),
            tally.shots,
            tally.successes,
            round1(tally.rate())
        );
    }
}

fn print_report(report: &Report) {
    println!("\n=== {:?} report ===", report.mode);
    for m in &report.matches {
        println!(
            "  {} : {} vs {} ({} confidence)",
            m.label, m.team, m.opponent, m.confidence
        );
    }
    println!();
    print_gauges(&report.gauges);

    if !report.timeline.is_empty() {
        println!("\nTimeline (for/against):");
        for w in &report.timeline {
            println!(
                "  {:>3}-{:<3} min  {:>3} / {:<3}",
                w.start_ms / 60_000,
                w.end_ms / 60_000,
                w.goals_for,
                w.goals_against
            );
        }
    }

    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for w in &report.warnings {
            println!("  - {}", w);
        }
    }
}

fn print_ranking(ranked: &[RankedRow]) {
    for r in ranked {
        let value = match r.value {
            Some(v) => format!("{:.1}", v),
            None => "-".to_string(),
        };
        let round = r
            .row
            .round
            .map(|n| format!("J{}", n))
            .unwrap_or_default();
        println!(
            "{:>3}. {:<20} {:>7} ({:>7})  vs {:<20} {} {}",
            r.position, r.row.team, value, r.display_count, r.row.opponent, r.row.match_label, round
        );
    }
}

fn load(storage: &StorageConfig) -> Result<(Vec<Event>, Vec<Match>)> {
    let events = read_events(storage)
        .with_context(|| format!("Failed to load events from {:?}", storage.events_path()))?;
    let matches = read_matches(storage)
        .with_context(|| format!("Failed to load matches from {:?}", storage.matches_path()))?;
    tracing::info!("Loaded {} events over {} match descriptors", events.len(), matches.len());
    Ok((events, matches))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Invalid config file {:?}", cli.config))?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting handball-insights v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(cli.data_dir.clone().unwrap_or_else(|| config.data_dir.clone()));
    let analyzer = Analyzer::from_config(&config)?;

    match cli.command {
        Commands::Report {
            mode,
            match_id,
            team,
            json,
            save,
        } => {
            let (events, matches) = load(&storage)?;
            let mut request = ReportRequest::new(mode, scope(match_id));
            if let Some(team) = team.as_deref() {
                request = request.for_team(team);
            }
            let report = analyzer.report(&events, &matches, &request);

            if save {
                let writer = JsonlWriter::new(storage.reports_path());
                writer.append(&report)?;
                tracing::info!("Saved report to {:?}", writer.path());
            }

            if json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }

        Commands::Rank {
            criterion,
            limit,
            match_id,
            json,
        } => {
            let limit = limit.unwrap_or(config.analysis.ranking_limit);
            if limit == 0 {
                bail!("--limit must be greater than 0");
            }
            let (events, matches) = load(&storage)?;
            let ranked = analyzer.rankings(&events, &matches, &scope(match_id), criterion, limit);

            if json {
                print_json(&ranked)?;
            } else {
                println!("\n=== Top {} by {} ===", limit, criterion.label());
                print_ranking(&ranked);
            }
        }

        Commands::Zones {
            mode,
            match_id,
            team,
            json,
        } => {
            let (events, matches) = load(&storage)?;
            let mut request = ReportRequest::new(mode, scope(match_id));
            if let Some(team) = team.as_deref() {
                request = request.for_team(team);
            }
            let report = analyzer.report(&events, &matches, &request);

            if json {
                print_json(&report.zone_map)?;
            } else {
                print_zones(&report.zone_map, mode);
            }
        }

        Commands::Players { match_id, json } => {
            let (events, _) = load(&storage)?;
            let reports = analyzer.player_reports(&events, &scope(match_id));

            if json {
                print_json(&reports)?;
            } else {
                println!(
                    "{:<24} {:>6} {:>6} {:>7} {:>8} {:>6} {:>6} {:>7}",
                    "Player", "Shots", "Goals", "Shot%", "Assists", "Faced", "Saves", "Save%"
                );
                for r in &reports {
                    println!(
                        "{:<24} {:>6} {:>6} {:>6.1}% {:>8} {:>6} {:>6} {:>6.1}%",
                        r.player.name,
                        r.shots,
                        r.goals,
                        round1(r.shooting_percentage()),
                        r.assists,
                        r.shots_faced,
                        r.saves,
                        round1(r.save_percentage())
                    );
                }
            }
        }

        Commands::Teams { json } => {
            let (events, matches) = load(&storage)?;
            let teams = analyzer.teams(&events, &matches);

            if json {
                print_json(&teams)?;
            } else {
                for t in &teams {
                    let r = &t.resolution;
                    println!(
                        "{:<30} {:>5} events  {} vs {}  [{}{}]",
                        t.label,
                        t.event_count,
                        if r.team.is_empty() { "?" } else { r.team.as_str() },
                        if r.opponent.is_empty() { "?" } else { r.opponent.as_str() },
                        r.confidence,
                        if r.declared { ", declared" } else { "" }
                    );
                }
            }
        }

        Commands::Metrics => {
            for def in CATALOG.iter() {
                println!(
                    "{:<30} {:<10} {:<15} {}",
                    def.slug,
                    format!("{:?}", def.mode).to_lowercase(),
                    if def.lower_is_better() {
                        "lower-better"
                    } else {
                        "higher-better"
                    },
                    analyzer.objective_for(def.key).unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
