use egui::{Color32, Pos2, Rect};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use super::{GraphRenderer, RenderContext};
use crate::classify::{Classifier, EntityCategory};
use crate::error::RenderError;
use crate::graph::KnowledgeGraph;
use crate::layouts::force_directed::{
    ForceDirected, ForceDirectedState, FruchtermanReingoldWithCenterGravity,
    FruchtermanReingoldWithCenterGravityState,
};
use crate::layouts::Layout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMarker {
    pub label: String,
    pub pos: Pos2,
    pub category: EntityCategory,
    pub color: Color32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSegment {
    pub from: Pos2,
    pub to: Pos2,
    pub relation: String,
}

/// Laid-out subgraph ready to be painted: line segments for edges and
/// category-styled markers for nodes, in layout coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceFigure {
    pub title: String,
    pub edges: Vec<EdgeSegment>,
    pub nodes: Vec<NodeMarker>,
    /// Bounding box of node centers, `Rect::NOTHING` when empty.
    pub bounds: Rect,
    pub edge_color: Color32,
    pub edge_width: f32,
    pub outline: Color32,
}

impl Default for ForceFigure {
    fn default() -> Self {
        let ctx = RenderContext::default();
        Self {
            title: ctx.title,
            edges: Vec::new(),
            nodes: Vec::new(),
            bounds: Rect::NOTHING,
            edge_color: ctx.style.edge,
            edge_width: ctx.style.edge_width,
            outline: ctx.style.marker_outline,
        }
    }
}

impl ForceFigure {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Topmost marker whose disc contains `pos`; `scale` converts marker
    /// sizes (diameters in pixels) to layout units.
    pub fn node_at(&self, pos: Pos2, scale: f32) -> Option<&NodeMarker> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.pos.distance(pos) <= n.size * 0.5 * scale)
    }
}

/// Spring-layout backend. Deterministic for a fixed layout seed.
#[derive(Debug, Clone, Default)]
pub struct ForceDirectedRenderer {
    pub layout: ForceDirectedState<FruchtermanReingoldWithCenterGravityState>,
}

impl ForceDirectedRenderer {
    pub fn new(layout: ForceDirectedState<FruchtermanReingoldWithCenterGravityState>) -> Self {
        Self { layout }
    }
}

impl GraphRenderer for ForceDirectedRenderer {
    type Output = ForceFigure;

    fn render(
        &self,
        g: &KnowledgeGraph,
        classifier: &Classifier,
        ctx: &RenderContext,
    ) -> Result<ForceFigure, RenderError> {
        let mut figure = ForceFigure {
            title: ctx.title.clone(),
            edge_color: ctx.style.edge,
            edge_width: ctx.style.edge_width,
            outline: ctx.style.marker_outline,
            ..Default::default()
        };
        if g.is_empty() {
            return Ok(figure);
        }

        let positions =
            ForceDirected::<FruchtermanReingoldWithCenterGravity>::from_state(self.layout.clone())
                .run(g);

        figure.nodes = g
            .nodes()
            .zip(positions.as_slice())
            .map(|(label, pos)| {
                let category = classifier.classify(label);
                let style = ctx.style.category(category);
                NodeMarker {
                    label: label.to_string(),
                    pos: *pos,
                    category,
                    color: style.color,
                    size: style.size,
                }
            })
            .collect();

        figure.edges = g
            .g()
            .edge_references()
            .filter_map(|e| {
                Some(EdgeSegment {
                    from: positions.get(e.source().index())?,
                    to: positions.get(e.target().index())?,
                    relation: e.weight().clone(),
                })
            })
            .collect();

        figure.bounds = positions.bounds();
        Ok(figure)
    }
}
