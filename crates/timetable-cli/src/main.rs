//! Timetable - a command-line viewer for cohort schedules.
//!
//! Reads a schedule export (JSON records from the timetable service, or an
//! `.ics` file), applies a hierarchical group filter and prints the
//! matching events as JSON, or prints the inferred group forest.

mod config;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use timetable_core::{
    CalendarEvent, EngineConfig, EventFilter, EventRecordParser, GroupHierarchyBuilder, IcsImporter,
};

const USAGE: &str = "\
Usage: timetable <FILE> [--groups \"BUT2 DV1.1,BUT1\"] [--ics] [--tree] [--save-groups]

  --groups        Comma-separated group names to filter by (default: from config)
  --ics           Read FILE as an iCalendar file (implied by a .ics extension)
  --tree          Print the group hierarchy instead of events
  --save-groups   Remember --groups as the default filter";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    file: PathBuf,
    groups: Option<Vec<String>>,
    ics: bool,
    tree: bool,
    save_groups: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut file = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--groups" => {
                let value = iter.next().context("--groups needs a value")?;
                parsed.groups = Some(split_groups(value));
            }
            "--ics" => parsed.ics = true,
            "--tree" => parsed.tree = true,
            "--save-groups" => parsed.save_groups = true,
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            path => {
                if file.is_some() {
                    bail!("Only one input file is supported");
                }
                file = Some(PathBuf::from(path));
            }
        }
    }

    parsed.file = file.context("Missing input file")?;
    if parsed.save_groups && parsed.groups.is_none() {
        bail!("--save-groups requires --groups");
    }
    Ok(parsed)
}

fn split_groups(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}

fn is_ics_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("ics"))
        .unwrap_or(false)
}

/// Initialize the tracing subscriber for logging
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer))
        .with(filter)
        .init();
    guard
}

fn load_events(engine: &EngineConfig, text: &str, ics: bool) -> Result<Vec<CalendarEvent>> {
    let events = if ics {
        IcsImporter::new(engine).parse(text)?
    } else {
        EventRecordParser::new(engine).parse(text)?
    };
    Ok(events)
}

fn print_forest(engine: &EngineConfig, events: &[CalendarEvent]) -> Result<()> {
    let forest = GroupHierarchyBuilder::new(engine).extract_groups(events)?;
    for cohort in &forest {
        print!("{}", cohort.hierarchy.render_tree());
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    if raw_args.is_empty() || raw_args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }
    let args = parse_args(&raw_args)?;

    let _guard = init_tracing();
    info!(file = %args.file.display(), "timetable starting");

    let mut config = config::Config::load()?;

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let events = load_events(&config.engine, &text, args.ics || is_ics_path(&args.file))?;

    if args.tree {
        return print_forest(&config.engine, &events);
    }

    let groups = args
        .groups
        .clone()
        .unwrap_or_else(|| config.default_groups.clone());
    let visible = EventFilter::new(&config.engine).filter(&events, &groups)?;
    info!(shown = visible.len(), total = events.len(), "Filtered events");
    println!("{}", serde_json::to_string_pretty(&*visible)?);

    if args.save_groups {
        config.default_groups = groups;
        config.save()?;
        info!("Saved default groups");
    }

    Ok(())
}
