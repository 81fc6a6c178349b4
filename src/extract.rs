//! Pipeline assembly: raw records → normalized reports → full dataset.
//!
//! Multi-valued fields are `;`-split here (the parser deals in raw strings
//! only), the three normalizers are applied per record, and the derived
//! structures (entity universe, network, aggregates) are computed once.

use report_types::{Dataset, Report};

use crate::aggregate::{location_counts, timeline_buckets};
use crate::aliases::AliasResolver;
use crate::dates::normalize_date;
use crate::graph::{EntityCatalog, GraphBuilder};
use crate::parser::RawRecord;
use crate::places::clean_place;

/// Split a `;`-delimited field into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize one raw record into a report. Total: every malformed input has
/// a defined fallback (absent date, pass-through alias, `Unknown` place).
pub fn normalize_record(raw: &RawRecord, aliases: &AliasResolver) -> Report {
    let persons = raw.persons.as_deref().map(split_list).unwrap_or_default();
    let persons_resolved = persons
        .iter()
        .map(|p| aliases.resolve(p).to_string())
        .collect();

    let places = raw.places.as_deref().map(split_list).unwrap_or_default();
    let places_clean = places.iter().map(|p| clean_place(p)).collect();

    Report {
        id: raw.id.clone(),
        date: raw.date.as_deref().and_then(normalize_date),
        persons,
        persons_resolved,
        organizations: raw
            .organizations
            .as_deref()
            .map(split_list)
            .unwrap_or_default(),
        places,
        places_clean,
        description: raw.description.clone().unwrap_or_default(),
    }
}

/// Run the whole derivation over parsed records. The result is immutable
/// thereafter; only the filter machine recomputes anything per event.
pub fn build_dataset(records: &[RawRecord], aliases: &AliasResolver) -> Dataset {
    let reports: Vec<Report> = records
        .iter()
        .map(|r| normalize_record(r, aliases))
        .collect();

    let catalog = EntityCatalog::from_reports(&reports);
    let network = GraphBuilder::new().build(&catalog, &reports);
    let location_counts = location_counts(&reports);
    let timeline = timeline_buckets(&reports);

    Dataset {
        persons: catalog.persons.into_iter().collect(),
        organizations: catalog.organizations.into_iter().collect(),
        network,
        location_counts,
        timeline,
        reports,
    }
}
