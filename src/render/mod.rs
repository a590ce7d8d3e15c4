//! Presentation backends for an extracted subgraph.
//!
//! Both backends consume the same `(KnowledgeGraph, Classifier)` pair and only
//! look up colors and sizes by category; relation labels are passed through.

mod figure;
mod raster;
mod widget;

pub use figure::{EdgeSegment, ForceDirectedRenderer, ForceFigure, NodeMarker};
pub use raster::{rasterize, RasterImage};
pub use widget::{WidgetDocument, WidgetRenderer};

use serde::{Deserialize, Serialize};

use crate::classify::Classifier;
use crate::error::RenderError;
use crate::extract::Selection;
use crate::graph::KnowledgeGraph;
use crate::style::StyleGraph;

/// Hint shown when the widget backend is asked for an image.
pub const SCREENSHOT_HINT: &str = "For the network widget, please use your browser's screenshot \
functionality (Ctrl+Shift+S or Cmd+Shift+S)";

/// Title and style shared by every backend for one render call.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub title: String,
    pub style: StyleGraph,
}

impl RenderContext {
    pub fn new(title: impl Into<String>, style: StyleGraph) -> Self {
        Self {
            title: title.into(),
            style,
        }
    }

    /// `"Knowledge Graph: <entity>"`, or the full network for the "All" selection.
    pub fn for_selection(selection: &Selection, style: StyleGraph) -> Self {
        let subject = selection.entity().unwrap_or("Full Network");
        Self::new(format!("Knowledge Graph: {subject}"), style)
    }
}

/// A rendering backend.
pub trait GraphRenderer {
    type Output;

    /// Renders `g`. An empty graph yields a valid "nothing to show" output.
    fn render(
        &self,
        g: &KnowledgeGraph,
        classifier: &Classifier,
        ctx: &RenderContext,
    ) -> Result<Self::Output, RenderError>;
}

/// Which backend the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VizBackend {
    #[default]
    ForceDirected,
    NetworkWidget,
}

impl VizBackend {
    pub const ALL: [VizBackend; 2] = [VizBackend::ForceDirected, VizBackend::NetworkWidget];

    pub fn label(self) -> &'static str {
        match self {
            VizBackend::ForceDirected => "Force-directed",
            VizBackend::NetworkWidget => "Network widget",
        }
    }
}

/// Result of an image export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Png(Vec<u8>),
    Unsupported(&'static str),
}

/// Exports the current view of `backend` as a PNG when the backend supports it.
pub fn export_image(
    backend: VizBackend,
    figure: &ForceFigure,
    width: u32,
    height: u32,
) -> Result<ExportOutcome, RenderError> {
    match backend {
        VizBackend::ForceDirected => {
            let png = rasterize(figure, width, height)?.encode_png()?;
            Ok(ExportOutcome::Png(png))
        }
        VizBackend::NetworkWidget => Ok(ExportOutcome::Unsupported(SCREENSHOT_HINT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_follows_selection() {
        let ctx = RenderContext::for_selection(&Selection::All, StyleGraph::default());
        assert_eq!(ctx.title, "Knowledge Graph: Full Network");
        let ctx = RenderContext::for_selection(
            &Selection::Entity("DrugA".into()),
            StyleGraph::default(),
        );
        assert_eq!(ctx.title, "Knowledge Graph: DrugA");
    }

    #[test]
    fn widget_backend_has_no_image_export() {
        let out = export_image(VizBackend::NetworkWidget, &ForceFigure::default(), 10, 10).unwrap();
        assert_eq!(out, ExportOutcome::Unsupported(SCREENSHOT_HINT));
    }

    #[test]
    fn force_backend_exports_png() {
        let out = export_image(VizBackend::ForceDirected, &ForceFigure::default(), 16, 8).unwrap();
        let ExportOutcome::Png(bytes) = out else {
            panic!("expected png");
        };
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
