mod aggregate;
mod aliases;
mod dates;
mod extract;
mod filter;
mod graph;
mod parser;
mod places;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use report_types::Dataset;

use crate::aliases::AliasResolver;
use crate::filter::{FilterMachine, FilterView, SelectionEvent};

const OUTPUT_DIR: &str = "output";
const DATASET_FILE: &str = "dataset.json";

#[derive(Parser)]
#[command(
    name = "report_extract",
    about = "Incident report normalization and cross-filter pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline over a raw report file → output/dataset.json
    Extract {
        /// Path to the flat incident report text file
        #[arg(default_value = "reports.txt")]
        input: PathBuf,
        /// Block-separator keyword line
        #[arg(long, default_value = parser::DEFAULT_SEPARATOR)]
        separator: String,
        /// JSON alias table (alias → canonical) replacing the built-in one
        #[arg(long)]
        aliases: Option<PathBuf>,
    },
    /// Select an entity and print the filtered reports + highlight set
    Entity {
        /// Canonical entity name, e.g. "William Smith" or "OrgX"
        name: Vec<String>,
    },
    /// Select a location key and print the filtered reports
    Location {
        /// Cleaned location, e.g. "CityA"
        key: Vec<String>,
    },
    /// Select an inclusive date range (YYYY-MM-DD) and print the reports
    Range { from: String, to: String },
    /// Print summary statistics from the cached dataset
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Extract {
            input,
            separator,
            aliases,
        }) => run_extract(&input, &separator, aliases.as_deref()),
        Some(Command::Entity { name }) => run_select(SelectionEvent::Entity(name.join(" "))),
        Some(Command::Location { key }) => run_select(SelectionEvent::Location(key.join(" "))),
        Some(Command::Range { from, to }) => {
            let start = parse_iso_date(&from)?;
            let end = parse_iso_date(&to)?;
            run_select(SelectionEvent::TimeRange(start, end))
        }
        Some(Command::Stats) => run_stats(),
        // Default: extract from ./reports.txt
        None => run_extract(Path::new("reports.txt"), parser::DEFAULT_SEPARATOR, None),
    }
}

fn parse_iso_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn output_path(name: &str) -> PathBuf {
    Path::new(OUTPUT_DIR).join(name)
}

fn write_json<T: serde::Serialize>(name: &str, data: &T) -> Result<()> {
    let path = output_path(name);
    let json = serde_json::to_string_pretty(data).context("JSON serialization failed")?;
    std::fs::write(&path, &json).with_context(|| format!("cannot write {}", path.display()))?;
    eprintln!("  {} ({} bytes)", path.display(), json.len());
    Ok(())
}

fn read_dataset() -> Dataset {
    let path = output_path(DATASET_FILE);
    let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        eprintln!("Run `report_extract extract <file>` first to generate the dataset.");
        std::process::exit(1);
    });
    serde_json::from_str(&json).unwrap_or_else(|e| {
        eprintln!("Cannot parse {}: {e}", path.display());
        eprintln!("The JSON may be from an older format. Re-run extraction.");
        std::process::exit(1);
    })
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: full pipeline → output/dataset.json
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(input: &Path, separator: &str, alias_file: Option<&Path>) -> Result<()> {
    eprintln!("Reading reports from: {}", input.display());

    // Load failure is fatal for the session; everything after this point is
    // a total in-memory computation.
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("cannot read report file {}", input.display()))?;

    let resolver = match alias_file {
        Some(path) => AliasResolver::from_json_file(path)?,
        None => AliasResolver::new(),
    };
    eprintln!("Alias table: {} entries", resolver.len());

    let parsed = parser::parse(&text, separator);
    eprintln!(
        "Parsed {} reports ({} blocks dropped for missing ID)",
        parsed.records.len(),
        parsed.dropped_blocks
    );

    let data = extract::build_dataset(&parsed.records, &resolver);
    print_stats(&data);

    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  WRITING OUTPUT FILES");
    eprintln!("══════════════════════════════════════════\n");

    std::fs::create_dir_all(OUTPUT_DIR).context("cannot create output/")?;
    write_json(DATASET_FILE, &data)?;

    eprintln!("\nDone. Query with:");
    eprintln!("  cargo run -- entity \"William Smith\"");
    eprintln!("  cargo run -- location CityA");
    eprintln!("  cargo run -- range 1998-01-01 1998-12-31");
    Ok(())
}

fn print_stats(data: &Dataset) {
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  CORPUS STATISTICS");
    eprintln!("══════════════════════════════════════════");

    let dated = data.reports.iter().filter(|r| r.date.is_some()).count();
    eprintln!("\nReports: {} ({} dated)", data.reports.len(), dated);
    eprintln!(
        "Entities: {} persons, {} organizations",
        data.persons.len(),
        data.organizations.len()
    );
    eprintln!(
        "Network: {} nodes, {} co-occurrence edges",
        data.network.nodes.len(),
        data.network.links.len()
    );

    eprintln!("\nTop locations:");
    for count in data.location_counts.iter().take(10) {
        eprintln!("  {}: {} reports", count.location, count.count);
    }

    if let (Some(first), Some(last)) = (data.timeline.first(), data.timeline.last()) {
        eprintln!(
            "\nTimeline: {} months, {} – {}",
            data.timeline.len(),
            first.date.format("%Y-%m"),
            last.date.format("%Y-%m")
        );
    } else {
        eprintln!("\nTimeline: no dated reports");
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  QUERY MODES: drive the filter machine over the cached dataset
// ═══════════════════════════════════════════════════════════════════════

fn run_select(event: SelectionEvent) -> Result<()> {
    let data = read_dataset();

    let mut machine = FilterMachine::new();
    machine.handle(event);
    let view = machine.recompute(&data);

    eprintln!(
        "{} of {} reports match",
        view.reports.len(),
        data.reports.len()
    );

    #[derive(serde::Serialize)]
    struct QueryResult<'a> {
        selection: report_types::Selection,
        report_count: usize,
        reports: Vec<&'a report_types::Report>,
        #[serde(skip_serializing_if = "Option::is_none")]
        network_highlight: Option<Vec<&'a str>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location_highlight: Option<&'a str>,
    }

    let FilterView {
        selection,
        reports,
        network_highlight,
        location_highlight,
    } = &view;

    let result = QueryResult {
        selection: selection.clone(),
        report_count: reports.len(),
        reports: reports.clone(),
        network_highlight: network_highlight
            .as_ref()
            .map(|set| set.iter().map(String::as_str).collect()),
        location_highlight: location_highlight.as_deref(),
    };

    let json = serde_json::to_string_pretty(&result).context("JSON serialization")?;
    println!("{json}");
    Ok(())
}

fn run_stats() -> Result<()> {
    let data = read_dataset();
    print_stats(&data);
    Ok(())
}
