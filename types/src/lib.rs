use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Normalized incident report ───────────────────────────────────────────

/// One incident record after normalization.
///
/// `date` is `None` when the raw report date was missing or unparseable,
/// even after day repair. `persons_resolved` always has the same length and
/// order as `persons`; `places_clean` may be shorter than `places` (empty
/// raw entries are dropped during cleaning).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons_resolved: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places_clean: Vec<String>,
    /// Free text, owned by the rendering layer; the pipeline only reads it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Report {
    /// Whether the given canonical entity name is mentioned in this report,
    /// either as a resolved person or as an organization.
    pub fn mentions_entity(&self, name: &str) -> bool {
        self.persons_resolved.iter().any(|p| p == name)
            || self.organizations.iter().any(|o| o == name)
    }

    /// All entity mentions in this report, persons first, order preserved,
    /// duplicates kept (pairing logic de-duplicates later).
    pub fn entity_mentions(&self) -> impl Iterator<Item = &str> {
        self.persons_resolved
            .iter()
            .chain(self.organizations.iter())
            .map(String::as_str)
    }
}

// ── Entity universe ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Organization,
}

// ── Co-occurrence network ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
}

/// An undirected co-occurrence edge, witnessed by the first report in which
/// the pair appeared together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkLink {
    pub source: String,
    pub target: String,
    pub report_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

// ── Aggregate buckets ────────────────────────────────────────────────────

/// Count of reports mentioning one cleaned location. Sorted descending by
/// count in `Dataset::location_counts`; zero-count keys never appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

/// Count of dated reports in one year-month bucket (`date` is the first of
/// the month). Sorted ascending in `Dataset::timeline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineBucket {
    pub date: NaiveDate,
    pub count: usize,
}

// ── Current selection (emitted to the renderer) ──────────────────────────

/// The active filter dimension. At most one is ever active; the state
/// machine enforces this through its transition rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    None,
    Entity { name: String },
    Location { key: String },
    TimeRange { start: NaiveDate, end: NaiveDate },
}

// ── The full produced data model ─────────────────────────────────────────

/// Everything the rendering collaborator consumes, computed once per corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub reports: Vec<Report>,
    /// Canonical person names, sorted.
    pub persons: Vec<String>,
    /// Organization names, sorted.
    pub organizations: Vec<String>,
    pub network: Network,
    pub location_counts: Vec<LocationCount>,
    pub timeline: Vec<TimelineBucket>,
}
