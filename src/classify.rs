use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extract::FilterCategory;
use crate::store::Triplets;

/// Substring that marks a clinical trial identifier (e.g. `NCT01234567`).
pub const TRIAL_MARKER: &str = "NCT";

const RELATION_CONDITION: &str = "condition";
const RELATION_OUTCOME: &str = "outcome";

/// Display category of an entity.
///
/// Variant order is the classification priority: the first matching
/// category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityCategory {
    ClinicalTrial,
    Drug,
    Condition,
    Outcome,
    Other,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 5] = [
        EntityCategory::ClinicalTrial,
        EntityCategory::Drug,
        EntityCategory::Condition,
        EntityCategory::Outcome,
        EntityCategory::Other,
    ];

    /// Plural label used by the statistics view.
    pub fn display_name(self) -> &'static str {
        match self {
            EntityCategory::ClinicalTrial => "Clinical Trials",
            EntityCategory::Drug => "Drugs",
            EntityCategory::Condition => "Conditions",
            EntityCategory::Outcome => "Outcomes",
            EntityCategory::Other => "Other",
        }
    }

    /// Stable key used as the node group of the widget backend.
    pub fn group(self) -> &'static str {
        match self {
            EntityCategory::ClinicalTrial => "clinical_trial",
            EntityCategory::Drug => "drug",
            EntityCategory::Condition => "condition",
            EntityCategory::Outcome => "outcome",
            EntityCategory::Other => "other",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

pub fn is_trial_id(entity: &str) -> bool {
    entity.contains(TRIAL_MARKER)
}

fn relation_mentions(relation: &str, needle: &str) -> bool {
    relation.to_lowercase().contains(needle)
}

/// Entity sets derived from naming and relation-label heuristics.
///
/// The sets overlap. Any source that is not a trial lands in `drugs`, which
/// mislabels other source-typed entities; this is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classifier {
    clinical_trials: BTreeSet<String>,
    drugs: BTreeSet<String>,
    conditions: BTreeSet<String>,
    outcomes: BTreeSet<String>,
}

impl Classifier {
    pub fn new(triplets: &Triplets) -> Self {
        let mut c = Self::default();
        for t in triplets {
            if is_trial_id(&t.source) {
                c.clinical_trials.insert(t.source.clone());
            } else {
                c.drugs.insert(t.source.clone());
            }
            if relation_mentions(&t.relation, RELATION_CONDITION) {
                c.conditions.insert(t.target.clone());
            }
            if relation_mentions(&t.relation, RELATION_OUTCOME) {
                c.outcomes.insert(t.target.clone());
            }
        }
        log::debug!(
            "classified entities: {} trials, {} drugs, {} conditions, {} outcomes",
            c.clinical_trials.len(),
            c.drugs.len(),
            c.conditions.len(),
            c.outcomes.len()
        );
        c
    }

    /// Single first-match categorization.
    pub fn classify(&self, entity: &str) -> EntityCategory {
        if is_trial_id(entity) {
            EntityCategory::ClinicalTrial
        } else if self.drugs.contains(entity) {
            EntityCategory::Drug
        } else if self.conditions.contains(entity) {
            EntityCategory::Condition
        } else if self.outcomes.contains(entity) {
            EntityCategory::Outcome
        } else {
            EntityCategory::Other
        }
    }

    pub fn clinical_trials(&self) -> &BTreeSet<String> {
        &self.clinical_trials
    }

    pub fn drugs(&self) -> &BTreeSet<String> {
        &self.drugs
    }

    pub fn conditions(&self) -> &BTreeSet<String> {
        &self.conditions
    }

    pub fn outcomes(&self) -> &BTreeSet<String> {
        &self.outcomes
    }

    /// Sorted entities offered as starting points for `category`.
    pub fn choices(&self, category: FilterCategory) -> &BTreeSet<String> {
        match category {
            FilterCategory::ClinicalTrial => &self.clinical_trials,
            FilterCategory::Drug => &self.drugs,
            FilterCategory::Condition => &self.conditions,
            FilterCategory::Outcome => &self.outcomes,
        }
    }
}
