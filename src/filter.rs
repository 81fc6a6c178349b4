//! Cross-filter selection state.
//!
//! One owned state object with an explicit transition per selection event,
//! and one pure recompute over the immutable dataset. The three dimensions
//! (entity, location, time range) are mutually exclusive by the transition
//! rules, not by representation, so the recompute composes all three
//! predicates and would keep working if exclusivity were ever relaxed.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use report_types::{Dataset, Report, Selection};

// ── Events ───────────────────────────────────────────────────────────────

/// A user selection event from the rendering collaborator.
#[derive(Debug, Clone)]
pub enum SelectionEvent {
    Entity(String),
    Location(String),
    TimeRange(NaiveDate, NaiveDate),
    /// Brush cleared with no range selected.
    ClearTimeRange,
    Reset,
}

// ── State ────────────────────────────────────────────────────────────────

/// The three filter dimensions. Initialized to all-`None`; mutated only by
/// `FilterMachine::handle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub entity: Option<String>,
    pub location: Option<String>,
    pub time_range: Option<(NaiveDate, NaiveDate)>,
}

impl FilterState {
    pub fn is_clear(&self) -> bool {
        self.entity.is_none() && self.location.is_none() && self.time_range.is_none()
    }

    /// Composed predicate over one report. Absent dates never match a time
    /// range; an entity/location not present in the dataset simply matches
    /// nothing.
    fn matches(&self, report: &Report) -> bool {
        if let Some(entity) = &self.entity {
            if !report.mentions_entity(entity) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !report.places_clean.iter().any(|p| p == location) {
                return false;
            }
        }
        if let Some((start, end)) = self.time_range {
            match report.date {
                Some(date) => {
                    if date < start || date > end {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }
}

// ── Machine ──────────────────────────────────────────────────────────────

/// Everything the rendering collaborator needs after a selection change.
#[derive(Debug)]
pub struct FilterView<'a> {
    pub selection: Selection,
    pub reports: Vec<&'a Report>,
    /// When an entity is selected: that entity plus its direct neighbors in
    /// the network. `None` means the network renders at full emphasis.
    pub network_highlight: Option<BTreeSet<String>>,
    /// When a location is selected: the bar to render at full emphasis.
    pub location_highlight: Option<String>,
}

#[derive(Debug, Default)]
pub struct FilterMachine {
    state: FilterState,
}

impl FilterMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Single entry point for all selection events.
    pub fn handle(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::Entity(name) => self.select_entity(name),
            SelectionEvent::Location(key) => self.select_location(key),
            SelectionEvent::TimeRange(start, end) => self.select_time_range(start, end),
            SelectionEvent::ClearTimeRange => self.clear_time_range(),
            SelectionEvent::Reset => self.reset(),
        }
    }

    /// Selecting the already-selected entity toggles it off; anything else
    /// selects it and clears the other two dimensions.
    pub fn select_entity(&mut self, name: String) {
        if self.state.entity.as_deref() == Some(name.as_str()) {
            self.state.entity = None;
        } else {
            self.state = FilterState {
                entity: Some(name),
                ..FilterState::default()
            };
        }
    }

    pub fn select_location(&mut self, key: String) {
        if self.state.location.as_deref() == Some(key.as_str()) {
            self.state.location = None;
        } else {
            self.state = FilterState {
                location: Some(key),
                ..FilterState::default()
            };
        }
    }

    pub fn select_time_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.state = FilterState {
            time_range: Some((start, end)),
            ..FilterState::default()
        };
    }

    pub fn clear_time_range(&mut self) {
        self.state.time_range = None;
    }

    pub fn reset(&mut self) {
        self.state = FilterState::default();
    }

    pub fn selection(&self) -> Selection {
        if let Some(name) = &self.state.entity {
            Selection::Entity { name: name.clone() }
        } else if let Some(key) = &self.state.location {
            Selection::Location { key: key.clone() }
        } else if let Some((start, end)) = self.state.time_range {
            Selection::TimeRange { start, end }
        } else {
            Selection::None
        }
    }

    /// Pure recompute: filtered reports plus the derived highlight sets.
    /// No highlight is produced for a time-range selection; both the
    /// network and location views return to full emphasis then.
    pub fn recompute<'a>(&self, data: &'a Dataset) -> FilterView<'a> {
        let reports: Vec<&Report> = data
            .reports
            .iter()
            .filter(|r| self.state.matches(r))
            .collect();

        let network_highlight = self
            .state
            .entity
            .as_deref()
            .map(|entity| neighbor_set(data, entity));
        let location_highlight = self.state.location.clone();

        FilterView {
            selection: self.selection(),
            reports,
            network_highlight,
            location_highlight,
        }
    }
}

/// The selected entity plus every node directly linked to it.
fn neighbor_set(data: &Dataset, entity: &str) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    set.insert(entity.to_string());
    for link in &data.network.links {
        if link.source == entity {
            set.insert(link.target.clone());
        } else if link.target == entity {
            set.insert(link.source.clone());
        }
    }
    set
}
