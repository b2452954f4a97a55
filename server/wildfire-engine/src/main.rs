//! Binary entrypoint.
//!
//! `serve` reads JSON lines from stdin, one InboundFilter per line, and writes
//! JSON lines to stdout. Output lines are either:
//! - A DashboardView (one per valid filter line)
//! - An ErrorOutput (when a line fails to parse or validate)
//!
//! `query` runs a single refresh from flags and prints the table; `controls`
//! prints the sidebar bounds. Logs go to stderr (`RUST_LOG`).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use wildfire_engine::types::{ErrorOutput, FilterSpec, InboundFilter, SortOrder};
use wildfire_engine::{Engine, EngineError, RecordStore};

#[derive(Parser)]
#[command(
  name = "wildfire-engine",
  about = "Filter and summarize California wildfire incidents for the dashboard"
)]
struct Cli {
  /// CSV export of the incident spreadsheet
  #[arg(long, global = true, default_value = "California_Fire_Incidents.csv")]
  data: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Read filter JSON lines on stdin, write one dashboard view per line
  Serve,
  /// Run one refresh from flags
  Query {
    /// Inclusive year range, e.g. 2015..2018
    #[arg(long, value_parser = parse_year_range)]
    years: Option<(i32, i32)>,
    /// Inclusive acreage range, e.g. 0..5000
    #[arg(long, value_parser = parse_acre_range)]
    acres: Option<(f64, f64)>,
    /// Only major incidents
    #[arg(long)]
    major: bool,
    /// None | "Max First" | "Min First"
    #[arg(long, default_value = "None", value_parser = parse_sort)]
    sort: SortOrder,
    /// Print the full dashboard view as JSON instead of a table
    #[arg(long)]
    json: bool,
  },
  /// Print the sidebar widget bounds as JSON
  Controls,
}

fn main() {
  pretty_env_logger::init();
  let cli = Cli::parse();

  let store = match RecordStore::load(&cli.data) {
    Ok(s) => s,
    Err(e) => {
      log::error!("dataset load failed: {}", e);
      let _ = writeln!(io::stderr(), "wildfire-engine: {}", e);
      process::exit(1);
    }
  };
  let engine = Engine::with_defaults(store);

  let result = match cli.command {
    Commands::Serve => serve(&engine),
    Commands::Query {
      years,
      acres,
      major,
      sort,
      json,
    } => query(&engine, years, acres, major, sort, json),
    Commands::Controls => print_json(&engine.controls()),
  };

  if let Err(e) = result {
    let _ = writeln!(io::stderr(), "wildfire-engine: {}", e);
    process::exit(1);
  }
}

fn serve(engine: &Engine) -> Result<(), Box<dyn std::error::Error>> {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());

  for line in stdin.lock().lines() {
    let line = line?;

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let raw: InboundFilter = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        log::warn!("rejected filter line: {}", e);
        write_line(&mut out, &ErrorOutput::new(format!("json parse: {}", e)))?;
        continue;
      }
    };

    match engine.process(&raw) {
      Ok(view) => write_line(&mut out, &view)?,
      Err(e) => {
        log::warn!("rejected filter line: {}", e);
        let err = match &e {
          EngineError::Validation { field, reason } => {
            ErrorOutput::new(reason.clone()).with_field(field.clone())
          }
          _ => ErrorOutput::new(e.to_string()),
        };
        write_line(&mut out, &err)?;
      }
    }
    // One refresh per line; flush so the frontend sees it before sending the next.
    out.flush()?;
  }

  out.flush()?;
  Ok(())
}

fn query(
  engine: &Engine,
  years: Option<(i32, i32)>,
  acres: Option<(f64, f64)>,
  major: bool,
  sort: SortOrder,
  json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
  let controls = engine.controls();
  let spec = FilterSpec::new(
    years.unwrap_or((controls.year_min, controls.year_max)),
    acres.unwrap_or((controls.acre_min as f64, controls.acre_max as f64)),
    major,
    sort,
  );
  let view = engine.refresh(&spec);

  if json {
    return print_json(&view);
  }

  println!(
    "{:<6} {:<32} {:<16} {:>12} {:<6} {:>10}",
    "YEAR", "NAME", "COUNTY", "ACRES", "MAJOR", "PERSONNEL"
  );
  println!("{}", "-".repeat(88));
  for fire in &view.table {
    let name = if fire.name.len() > 32 {
      format!("{}...", fire.name.chars().take(29).collect::<String>())
    } else {
      fire.name.clone()
    };
    println!(
      "{:<6} {:<32} {:<16} {:>12} {:<6} {:>10}",
      fire.archive_year,
      name,
      fire.county.as_deref().unwrap_or("-"),
      fire.acres_burned,
      fire.major_incident.map_or("-", |m| if m { "yes" } else { "no" }),
      fire.personnel_involved.map_or_else(|| "-".to_string(), |p| p.to_string()),
    );
  }
  println!(
    "\n{} of {} incident(s), {} on the map",
    view.selected,
    view.total_records,
    view.map.marker_count()
  );
  Ok(())
}

fn write_line<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> io::Result<()> {
  serde_json::to_writer(&mut *out, value)?;
  writeln!(out)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn split_range(s: &str) -> Result<(&str, &str), String> {
  s.split_once("..")
    .map(|(lo, hi)| (lo.trim(), hi.trim()))
    .ok_or_else(|| format!("expected MIN..MAX, got {s:?}"))
}

fn parse_year_range(s: &str) -> Result<(i32, i32), String> {
  let (lo, hi) = split_range(s)?;
  let lo: i32 = lo.parse().map_err(|e| format!("{lo:?}: {e}"))?;
  let hi: i32 = hi.parse().map_err(|e| format!("{hi:?}: {e}"))?;
  Ok((lo, hi))
}

fn parse_acre_range(s: &str) -> Result<(f64, f64), String> {
  let (lo, hi) = split_range(s)?;
  let lo: f64 = lo.parse().map_err(|e| format!("{lo:?}: {e}"))?;
  let hi: f64 = hi.parse().map_err(|e| format!("{hi:?}: {e}"))?;
  if !lo.is_finite() || !hi.is_finite() {
    return Err("acreage bounds must be finite".to_string());
  }
  Ok((lo, hi))
}

fn parse_sort(s: &str) -> Result<SortOrder, String> {
  SortOrder::from_str_loose(s).ok_or_else(|| format!("unknown sort {s:?}; expected None|Max First|Min First"))
}
