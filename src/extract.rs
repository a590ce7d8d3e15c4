//! Neighborhood extraction: the subgraph shown for a selected entity.
//!
//! For a specific entity the extractor collects its direct rows, expands one
//! hop to every row touching an entity of those rows, de-duplicates, and
//! finally bounds the result by a random sample of `cap` rows. The "All"
//! selection is a random overview sample of the whole store.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::KnowledgeGraph;
use crate::store::{Triplet, Triplets};

/// Maximum number of rows in the "All" overview.
pub const ALL_SAMPLE_LIMIT: usize = 1000;

/// Sentinel choice meaning "no specific entity".
pub const ALL_CHOICE: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Entity(String),
}

impl Selection {
    /// Maps a choice from the selection control, treating `"All"` as the sentinel.
    pub fn from_choice(choice: &str) -> Self {
        if choice == ALL_CHOICE {
            Selection::All
        } else {
            Selection::Entity(choice.to_string())
        }
    }

    pub fn entity(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Entity(e) => Some(e),
        }
    }

    pub fn label(&self) -> &str {
        self.entity().unwrap_or(ALL_CHOICE)
    }
}

impl From<Option<String>> for Selection {
    fn from(value: Option<String>) -> Self {
        value.map_or(Selection::All, |s| Selection::from_choice(&s))
    }
}

/// Which endpoint of a row the selected entity has to occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Source,
    Target,
}

/// Entity type the user explores from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterCategory {
    #[default]
    ClinicalTrial,
    Drug,
    Condition,
    Outcome,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 4] = [
        FilterCategory::ClinicalTrial,
        FilterCategory::Drug,
        FilterCategory::Condition,
        FilterCategory::Outcome,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterCategory::ClinicalTrial => "Clinical Trial",
            FilterCategory::Drug => "Drug",
            FilterCategory::Condition => "Condition",
            FilterCategory::Outcome => "Outcome",
        }
    }

    pub fn role(self) -> EndpointRole {
        match self {
            FilterCategory::ClinicalTrial | FilterCategory::Drug => EndpointRole::Source,
            FilterCategory::Condition | FilterCategory::Outcome => EndpointRole::Target,
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete input of one extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub selection: Selection,
    pub category: FilterCategory,
    pub cap: usize,
}

impl Query {
    pub fn new(selection: Selection, category: FilterCategory, cap: usize) -> Self {
        Self {
            selection,
            category,
            cap,
        }
    }
}

/// Uniform sample of `amount` rows without replacement, kept in input order.
pub fn sample_rows<T: Clone, R: Rng + ?Sized>(rows: &[T], amount: usize, rng: &mut R) -> Vec<T> {
    let amount = amount.min(rows.len());
    let mut picked = rand::seq::index::sample(rng, rows.len(), amount).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| rows[i].clone()).collect()
}

fn direct_rows<'a>(entity: &str, role: EndpointRole, triplets: &'a Triplets) -> Vec<&'a Triplet> {
    triplets
        .iter()
        .filter(|t| match role {
            EndpointRole::Source => t.source == entity,
            EndpointRole::Target => t.target == entity,
        })
        .collect()
}

/// Direct rows followed by their one-hop expansion, de-duplicated on the full row.
fn neighborhood_rows<'a>(
    entity: &str,
    role: EndpointRole,
    triplets: &'a Triplets,
) -> Vec<&'a Triplet> {
    let direct = direct_rows(entity, role, triplets);

    let connected: HashSet<&str> = direct
        .iter()
        .flat_map(|t| [t.source.as_str(), t.target.as_str()])
        .collect();

    let extended = triplets.iter().filter(|t| {
        connected.contains(t.source.as_str()) || connected.contains(t.target.as_str())
    });

    let mut seen: HashSet<&Triplet> = HashSet::new();
    let combined: Vec<&Triplet> = direct
        .iter()
        .copied()
        .chain(extended)
        .filter(|t| seen.insert(*t))
        .collect();

    log::debug!(
        "neighborhood of {entity:?}: {} direct, {} connected entities, {} combined rows",
        direct.len(),
        connected.len(),
        combined.len()
    );
    combined
}

/// Rows selected by `query`, before graph construction.
pub fn extract_rows<R: Rng + ?Sized>(
    query: &Query,
    triplets: &Triplets,
    rng: &mut R,
) -> Vec<Triplet> {
    let Some(entity) = query.selection.entity() else {
        return sample_rows(triplets, ALL_SAMPLE_LIMIT, rng);
    };

    let combined = neighborhood_rows(entity, query.category.role(), triplets);
    if combined.len() > query.cap {
        log::info!(
            "neighborhood of {entity:?} has {} rows, sampling down to {}",
            combined.len(),
            query.cap
        );
        return sample_rows(&combined, query.cap, rng)
            .into_iter()
            .cloned()
            .collect();
    }
    combined.into_iter().cloned().collect()
}

/// Extracts the bounded neighborhood graph described by `query`.
pub fn extract<R: Rng + ?Sized>(query: &Query, triplets: &Triplets, rng: &mut R) -> KnowledgeGraph {
    let rows = extract_rows(query, triplets, rng);
    let graph = KnowledgeGraph::from_triplets(&rows);
    log::debug!(
        "extracted {} nodes and {} edges for {} / {}",
        graph.node_count(),
        graph.edge_count(),
        query.category,
        query.selection.label()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn example() -> Triplets {
        Triplets::new(vec![
            Triplet::new("NCT001", "treats", "DrugA"),
            Triplet::new("DrugA", "has_condition", "CancerX"),
            Triplet::new("NCT002", "treats", "DrugA"),
        ])
    }

    #[test]
    fn selection_from_choice() {
        assert_eq!(Selection::from_choice("All"), Selection::All);
        assert_eq!(
            Selection::from_choice("DrugA"),
            Selection::Entity("DrugA".into())
        );
        assert_eq!(Selection::from(None), Selection::All);
    }

    #[test]
    fn drug_uses_source_occurrence() {
        let t = example();
        let direct = direct_rows("DrugA", FilterCategory::Drug.role(), &t);
        assert_eq!(direct, vec![&t[1]]);
    }

    #[test]
    fn condition_uses_target_occurrence() {
        let t = example();
        let direct = direct_rows("CancerX", FilterCategory::Condition.role(), &t);
        assert_eq!(direct, vec![&t[1]]);
        assert!(direct_rows("CancerX", EndpointRole::Source, &t).is_empty());
    }

    #[test]
    fn one_hop_expansion_reaches_neighbor_edges() {
        let t = example();
        let q = Query::new(Selection::from_choice("DrugA"), FilterCategory::Drug, 500);
        let rows = extract_rows(&q, &t, &mut rng());
        // direct row first, then every row touching DrugA or CancerX
        assert_eq!(rows, vec![t[1].clone(), t[0].clone(), t[2].clone()]);

        let g = extract(&q, &t, &mut rng());
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn combined_is_deduplicated_on_full_row() {
        let t = Triplets::new(vec![
            Triplet::new("A", "r", "B"),
            Triplet::new("A", "r", "B"),
            Triplet::new("A", "s", "B"),
        ]);
        let q = Query::new(Selection::from_choice("A"), FilterCategory::Drug, 500);
        let rows = extract_rows(&q, &t, &mut rng());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn unknown_entity_gives_empty_graph() {
        let q = Query::new(Selection::from_choice("Nope"), FilterCategory::Drug, 100);
        let g = extract(&q, &example(), &mut rng());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn cap_truncates_to_exact_size() {
        let rows: Vec<_> = (0..50)
            .map(|i| Triplet::new("Hub", "links", format!("Leaf{i}")))
            .collect();
        let t = Triplets::new(rows);
        let q = Query::new(Selection::from_choice("Hub"), FilterCategory::Drug, 20);
        let picked = extract_rows(&q, &t, &mut rng());
        assert_eq!(picked.len(), 20);
        assert!(picked.iter().all(|p| t.contains(p)));
    }

    #[test]
    fn all_is_bounded_sample() {
        let rows: Vec<_> = (0..1500)
            .map(|i| Triplet::new(format!("S{i}"), "r", format!("T{i}")))
            .collect();
        let t = Triplets::new(rows);
        let q = Query::new(Selection::All, FilterCategory::Drug, 20);
        let g = extract(&q, &t, &mut rng());
        assert_eq!(g.edge_count(), ALL_SAMPLE_LIMIT);

        let small = example();
        let g = extract(&q, &small, &mut rng());
        assert_eq!(g.edge_count(), small.len());
    }

    #[test]
    fn same_seed_same_sample() {
        let rows: Vec<_> = (0..300)
            .map(|i| Triplet::new("Hub", "r", format!("T{i}")))
            .collect();
        let t = Triplets::new(rows);
        let q = Query::new(Selection::from_choice("Hub"), FilterCategory::Drug, 25);
        let a = extract_rows(&q, &t, &mut StdRng::seed_from_u64(3));
        let b = extract_rows(&q, &t, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn sample_rows_never_exceeds_input() {
        let v = vec![1, 2, 3];
        assert_eq!(sample_rows(&v, 10, &mut rng()), v);
        assert!(sample_rows(&v, 0, &mut rng()).is_empty());
    }
}
