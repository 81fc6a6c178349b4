//! Raw report parsing.
//!
//! Splits the flat source text into report blocks and named fields. This
//! stage yields raw strings only; `;`-splitting of multi-valued fields and
//! all normalization happen later in `extract`.

use std::sync::LazyLock;

use regex::Regex;

/// Default block-separator keyword (a line consisting of exactly this word
/// introduces a new report block). Overridable via `--separator`.
pub const DEFAULT_SEPARATOR: &str = "REPORT";

// Field header: an uppercase word followed by a colon, e.g. "REPORTDATE: 3/12/1998".
// Anything until the next header (or end of block) continues the field value.
static RE_FIELD_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z0-9_]*):\s*(.*)$").unwrap());

// ── Recognized field names ───────────────────────────────────────────────

/// The enumerated set of recognized field headers. Unrecognized headers land
/// in the `Unknown` bucket (case-folded) so parsing stays total and the raw
/// record remains auditable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordField {
    Id,
    ReportDate,
    Persons,
    Places,
    Organizations,
    ReportDescription,
    Unknown(String),
}

impl RecordField {
    pub fn from_header(name: &str) -> Self {
        match name {
            "ID" => Self::Id,
            "REPORTDATE" => Self::ReportDate,
            "PERSONS" => Self::Persons,
            "PLACES" => Self::Places,
            "ORGANIZATIONS" => Self::Organizations,
            "REPORTDESCRIPTION" => Self::ReportDescription,
            other => Self::Unknown(other.to_ascii_lowercase()),
        }
    }
}

// ── Raw record ───────────────────────────────────────────────────────────

/// One report block with trimmed raw field strings. A `RawRecord` always has
/// a non-empty id; blocks without one never leave the parser.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub id: String,
    pub date: Option<String>,
    pub persons: Option<String>,
    pub places: Option<String>,
    pub organizations: Option<String>,
    pub description: Option<String>,
    /// Unrecognized fields, header case-folded to lowercase.
    pub extra: Vec<(String, String)>,
}

/// Parser output: the kept records plus the count of blocks dropped for
/// lacking an `ID` field (tolerated, not an error).
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<RawRecord>,
    pub dropped_blocks: usize,
}

// ── Parsing ──────────────────────────────────────────────────────────────

/// Parse the full raw text into report records.
///
/// Grammar: blocks are introduced by `separator` on its own line; within a
/// block, `UPPERCASE: rest` starts a field and subsequent non-header lines
/// are appended space-joined until the next header or end of block. Text
/// before the first separator is treated as a block too (it is dropped
/// unless it happens to carry an `ID` field).
pub fn parse(text: &str, separator: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim() == separator {
            finish_block(&block, &mut outcome);
            block.clear();
        } else {
            block.push(line);
        }
    }
    finish_block(&block, &mut outcome);

    outcome
}

fn finish_block(lines: &[&str], outcome: &mut ParseOutcome) {
    if lines.iter().all(|l| l.trim().is_empty()) {
        // Blank runs between separator lines are not blocks at all.
        return;
    }
    match parse_block(lines) {
        Some(record) => outcome.records.push(record),
        None => outcome.dropped_blocks += 1,
    }
}

/// Parse one block's lines into a record. Returns `None` when the block has
/// no recognizable non-empty `ID` field (the only validation performed;
/// malformed field bodies are kept as best-effort text).
fn parse_block(lines: &[&str]) -> Option<RawRecord> {
    let mut record = RawRecord::default();
    let mut current: Option<(RecordField, Vec<&str>)> = None;
    let mut id: Option<String> = None;

    for line in lines {
        if let Some(caps) = RE_FIELD_HEADER.captures(line) {
            if let Some((field, body)) = current.take() {
                store_field(&mut record, &mut id, field, &body);
            }
            let field = RecordField::from_header(&caps[1]);
            current = Some((field, vec![caps.get(2).map_or("", |m| m.as_str())]));
        } else if let Some((_, body)) = current.as_mut() {
            // Continuation line; blank lines are kept and collapse under the
            // final trim.
            body.push(line);
        }
        // Lines before the first field header carry no field; skipped.
    }
    if let Some((field, body)) = current.take() {
        store_field(&mut record, &mut id, field, &body);
    }

    let id = id.filter(|i| !i.is_empty())?;
    record.id = id;
    Some(record)
}

fn store_field(record: &mut RawRecord, id: &mut Option<String>, field: RecordField, body: &[&str]) {
    let value = body.join(" ").trim().to_string();
    match field {
        RecordField::Id => *id = Some(value),
        RecordField::ReportDate => record.date = Some(value),
        RecordField::Persons => record.persons = Some(value),
        RecordField::Places => record.places = Some(value),
        RecordField::Organizations => record.organizations = Some(value),
        RecordField::ReportDescription => record.description = Some(value),
        RecordField::Unknown(name) => record.extra.push((name, value)),
    }
}
