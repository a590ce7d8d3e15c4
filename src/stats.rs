use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classify::{Classifier, EntityCategory};
use crate::graph::KnowledgeGraph;

/// Number of nodes per display category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub clinical_trials: usize,
    pub drugs: usize,
    pub conditions: usize,
    pub outcomes: usize,
    pub other: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: EntityCategory) -> usize {
        match category {
            EntityCategory::ClinicalTrial => self.clinical_trials,
            EntityCategory::Drug => self.drugs,
            EntityCategory::Condition => self.conditions,
            EntityCategory::Outcome => self.outcomes,
            EntityCategory::Other => self.other,
        }
    }

    fn bump(&mut self, category: EntityCategory) {
        match category {
            EntityCategory::ClinicalTrial => self.clinical_trials += 1,
            EntityCategory::Drug => self.drugs += 1,
            EntityCategory::Condition => self.conditions += 1,
            EntityCategory::Outcome => self.outcomes += 1,
            EntityCategory::Other => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        EntityCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// `(category, count)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityCategory, usize)> + '_ {
        EntityCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Summary of the currently extracted subgraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub categories: CategoryCounts,
    /// Relation label tally, most frequent first, ties by label.
    pub relations: Vec<(String, usize)>,
}

impl GraphStats {
    pub fn compute(g: &KnowledgeGraph, classifier: &Classifier) -> Self {
        let mut categories = CategoryCounts::default();
        for node in g.nodes() {
            categories.bump(classifier.classify(node));
        }

        let mut tally: HashMap<&str, usize> = HashMap::new();
        for (_, relation, _) in g.edges() {
            *tally.entry(relation).or_default() += 1;
        }
        let mut relations: Vec<(String, usize)> = tally
            .into_iter()
            .map(|(r, n)| (r.to_string(), n))
            .collect();
        relations.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            node_count: g.node_count(),
            edge_count: g.edge_count(),
            categories,
            relations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Triplet, Triplets};

    fn stats(rows: Vec<Triplet>) -> GraphStats {
        let t = Triplets::new(rows);
        GraphStats::compute(&KnowledgeGraph::from_triplets(&t), &Classifier::new(&t))
    }

    #[test]
    fn counts_partition_nodes() {
        let s = stats(vec![
            Triplet::new("NCT001", "treats", "DrugA"),
            Triplet::new("DrugA", "has_condition", "CancerX"),
            Triplet::new("NCT002", "primary_outcome", "Survival"),
            Triplet::new("NCT002", "sponsored_by", "Acme"),
        ]);
        assert_eq!(s.node_count, 6);
        assert_eq!(s.edge_count, 4);
        assert_eq!(s.categories.clinical_trials, 2);
        assert_eq!(s.categories.drugs, 1);
        assert_eq!(s.categories.conditions, 1);
        assert_eq!(s.categories.outcomes, 1);
        assert_eq!(s.categories.other, 1);
        assert_eq!(s.categories.total(), s.node_count);
    }

    #[test]
    fn relations_sorted_by_frequency_then_label() {
        let s = stats(vec![
            Triplet::new("A", "b_rel", "B"),
            Triplet::new("A", "a_rel", "C"),
            Triplet::new("B", "c_rel", "C"),
            Triplet::new("C", "c_rel", "A"),
        ]);
        assert_eq!(
            s.relations,
            vec![
                ("c_rel".to_string(), 2),
                ("a_rel".to_string(), 1),
                ("b_rel".to_string(), 1),
            ]
        );
    }

    #[test]
    fn empty_graph_has_zero_stats() {
        let s = stats(Vec::new());
        assert!(s.is_empty());
        assert_eq!(s.categories.total(), 0);
        assert!(s.relations.is_empty());
        assert_eq!(s.categories.iter().count(), EntityCategory::ALL.len());
    }
}
