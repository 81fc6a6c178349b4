//! Entity catalog and co-occurrence graph construction.

use std::collections::{BTreeSet, HashSet};

use report_types::{EntityKind, Network, NetworkLink, NetworkNode, Report};

// ── Entity catalog ───────────────────────────────────────────────────────

/// The de-duplicated universe of canonical entity names across all reports.
/// `BTreeSet` keeps node order (and the serialized form) deterministic.
#[derive(Debug, Default)]
pub struct EntityCatalog {
    pub persons: BTreeSet<String>,
    pub organizations: BTreeSet<String>,
}

impl EntityCatalog {
    /// One pass over the reports: canonical persons from `persons_resolved`,
    /// organizations verbatim. Duplicates collapse by exact name identity.
    pub fn from_reports(reports: &[Report]) -> Self {
        let mut catalog = Self::default();
        for report in reports {
            for person in &report.persons_resolved {
                catalog.persons.insert(person.clone());
            }
            for org in &report.organizations {
                catalog.organizations.insert(org.clone());
            }
        }
        catalog
    }
}

// ── Graph builder ────────────────────────────────────────────────────────

/// Builds the undirected co-occurrence network. The pair-dedup set is owned
/// here, constructed per build, never ambient module state.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    seen_pairs: HashSet<(String, String)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes: every cataloged entity tagged with its kind (a name appearing
    /// in both sets keeps the `person` tag, persons first). Edges: for each
    /// report, every unordered pair of distinct names among its mentions,
    /// deduplicated corpus-wide by sorted pair key and witnessed by the
    /// first report that produced the pair. Self-pairs (the same canonical
    /// name twice in one report, e.g. via alias collapse) are never linked.
    ///
    /// O(sum of k^2) over per-report mention counts k; fine while reports
    /// name a handful of entities each.
    pub fn build(mut self, catalog: &EntityCatalog, reports: &[Report]) -> Network {
        let mut nodes: Vec<NetworkNode> = Vec::new();
        for person in &catalog.persons {
            nodes.push(NetworkNode {
                id: person.clone(),
                kind: EntityKind::Person,
            });
        }
        for org in &catalog.organizations {
            if catalog.persons.contains(org) {
                continue;
            }
            nodes.push(NetworkNode {
                id: org.clone(),
                kind: EntityKind::Organization,
            });
        }

        let mut links: Vec<NetworkLink> = Vec::new();
        for report in reports {
            let mentions: Vec<&str> = report.entity_mentions().collect();
            for i in 0..mentions.len() {
                for j in (i + 1)..mentions.len() {
                    let (source, target) = (mentions[i], mentions[j]);
                    if source == target {
                        continue;
                    }
                    if self.mark_pair(source, target) {
                        links.push(NetworkLink {
                            source: source.to_string(),
                            target: target.to_string(),
                            report_id: report.id.clone(),
                        });
                    }
                }
            }
        }

        Network { nodes, links }
    }

    /// Record an unordered pair; returns true the first time it is seen.
    fn mark_pair(&mut self, a: &str, b: &str) -> bool {
        let key = if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };
        self.seen_pairs.insert(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str, persons: &[&str], orgs: &[&str]) -> Report {
        Report {
            id: id.to_string(),
            date: None,
            persons: persons.iter().map(|s| s.to_string()).collect(),
            persons_resolved: persons.iter().map(|s| s.to_string()).collect(),
            organizations: orgs.iter().map(|s| s.to_string()).collect(),
            places: Vec::new(),
            places_clean: Vec::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_catalog_collapses_duplicates() {
        let reports = vec![
            report("r1", &["Alice", "Bob"], &["OrgX"]),
            report("r2", &["Alice"], &["OrgX", "OrgY"]),
        ];
        let catalog = EntityCatalog::from_reports(&reports);
        assert_eq!(catalog.persons.len(), 2);
        assert_eq!(catalog.organizations.len(), 2);
    }

    #[test]
    fn test_edges_deduplicated_across_reports() {
        let reports = vec![
            report("r1", &["Alice", "Bob"], &[]),
            report("r2", &["Bob", "Alice"], &[]),
        ];
        let catalog = EntityCatalog::from_reports(&reports);
        let net = GraphBuilder::new().build(&catalog, &reports);
        assert_eq!(net.links.len(), 1);
        // Witnessed by the first report that produced the pair.
        assert_eq!(net.links[0].report_id, "r1");
    }

    #[test]
    fn test_no_self_loops_after_alias_collapse() {
        // Two raw mentions resolving to the same canonical name.
        let reports = vec![report("r1", &["Alice", "Alice"], &[])];
        let catalog = EntityCatalog::from_reports(&reports);
        let net = GraphBuilder::new().build(&catalog, &reports);
        assert!(net.links.is_empty());
        assert_eq!(net.nodes.len(), 1);
    }

    #[test]
    fn test_no_unordered_pair_appears_twice() {
        let reports = vec![
            report("r1", &["Alice", "Bob", "Cara"], &["OrgX"]),
            report("r2", &["Cara", "Alice"], &["OrgX"]),
        ];
        let catalog = EntityCatalog::from_reports(&reports);
        let net = GraphBuilder::new().build(&catalog, &reports);
        let mut keys: Vec<(String, String)> = net
            .links
            .iter()
            .map(|l| {
                if l.source <= l.target {
                    (l.source.clone(), l.target.clone())
                } else {
                    (l.target.clone(), l.source.clone())
                }
            })
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert!(net.links.iter().all(|l| l.source != l.target));
    }

    #[test]
    fn test_end_to_end_scenario_edges() {
        // R1: Alice + OrgX, R2: Alice + OrgY. No OrgX-OrgY edge.
        let reports = vec![
            report("A1", &["Alice"], &["OrgX"]),
            report("A2", &["Alice"], &["OrgY"]),
        ];
        let catalog = EntityCatalog::from_reports(&reports);
        let net = GraphBuilder::new().build(&catalog, &reports);

        assert_eq!(net.nodes.len(), 3);
        let alice = net.nodes.iter().find(|n| n.id == "Alice").unwrap();
        assert_eq!(alice.kind, EntityKind::Person);
        let orgx = net.nodes.iter().find(|n| n.id == "OrgX").unwrap();
        assert_eq!(orgx.kind, EntityKind::Organization);

        assert_eq!(net.links.len(), 2);
        let has = |a: &str, b: &str, rid: &str| {
            net.links.iter().any(|l| {
                ((l.source == a && l.target == b) || (l.source == b && l.target == a))
                    && l.report_id == rid
            })
        };
        assert!(has("Alice", "OrgX", "A1"));
        assert!(has("Alice", "OrgY", "A2"));
        assert!(!net
            .links
            .iter()
            .any(|l| l.source.starts_with("Org") && l.target.starts_with("Org")));
    }

    #[test]
    fn test_person_tag_wins_on_name_collision() {
        let reports = vec![report("r1", &["Acme"], &["Acme", "OrgX"])];
        let catalog = EntityCatalog::from_reports(&reports);
        let net = GraphBuilder::new().build(&catalog, &reports);
        let acme: Vec<_> = net.nodes.iter().filter(|n| n.id == "Acme").collect();
        assert_eq!(acme.len(), 1);
        assert_eq!(acme[0].kind, EntityKind::Person);
    }
}
