use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::classify::EntityCategory;

/// Marker appearance of one entity category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleCategory {
    pub color: Color32,
    pub size: f32,
}

impl StyleCategory {
    pub const fn new(color: Color32, size: f32) -> Self {
        Self { color, size }
    }
}

/// Colors and sizes used by both rendering backends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleGraph {
    pub clinical_trial: StyleCategory,
    pub drug: StyleCategory,
    pub condition: StyleCategory,
    pub outcome: StyleCategory,
    pub other: StyleCategory,
    pub edge: Color32,
    pub edge_width: f32,
    pub marker_outline: Color32,
}

impl Default for StyleGraph {
    fn default() -> Self {
        Self {
            clinical_trial: StyleCategory::new(Color32::from_rgb(0x1f, 0x77, 0xb4), 20.), // Blue
            drug: StyleCategory::new(Color32::from_rgb(0xff, 0x7f, 0x0e), 25.),           // Orange
            condition: StyleCategory::new(Color32::from_rgb(0x2c, 0xa0, 0x2c), 22.),      // Green
            outcome: StyleCategory::new(Color32::from_rgb(0x94, 0x67, 0xbd), 18.),        // Purple
            other: StyleCategory::new(Color32::from_rgb(0xd6, 0x27, 0x28), 15.),          // Red
            edge: Color32::from_rgb(0x88, 0x88, 0x88),
            edge_width: 1.,
            marker_outline: Color32::from_rgb(0x2f, 0x4f, 0x4f), // Dark Slate Grey
        }
    }
}

impl StyleGraph {
    pub fn category(&self, category: EntityCategory) -> StyleCategory {
        match category {
            EntityCategory::ClinicalTrial => self.clinical_trial,
            EntityCategory::Drug => self.drug,
            EntityCategory::Condition => self.condition,
            EntityCategory::Outcome => self.outcome,
            EntityCategory::Other => self.other,
        }
    }
}

/// `#rrggbb` form used in HTML documents.
pub fn to_hex(c: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_of_palette() {
        let style = StyleGraph::default();
        assert_eq!(to_hex(style.clinical_trial.color), "#1f77b4");
        assert_eq!(to_hex(style.other.color), "#d62728");
        assert_eq!(to_hex(style.edge), "#888888");
    }

    #[test]
    fn sizes_follow_category() {
        let style = StyleGraph::default();
        assert_eq!(style.category(EntityCategory::Drug).size, 25.);
        assert_eq!(style.category(EntityCategory::Outcome).size, 18.);
    }
}
