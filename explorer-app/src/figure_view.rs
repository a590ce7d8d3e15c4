use egui::{
    Align2, Color32, FontId, Id, Painter, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2, Widget,
};
use kg_explorer::{EdgeSegment, ForceFigure, NodeMarker};

use crate::ui_consts::{FIT_PADDING, ZOOM_STEP};

const KEY: &str = "kg_explorer_figure_view";

/// Pointer distance, in pixels, at which an edge counts as hovered.
const EDGE_HOVER_DISTANCE: f32 = 4.0;
const LABEL_FONT_SIZE: f32 = 11.0;
const TITLE_FONT_SIZE: f32 = 16.0;

/// Zoom and pan of the figure view, kept in egui memory between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewMetadata {
    /// Whether the view still has to be fitted to the figure
    pub needs_fit: bool,
    /// Current zoom factor
    pub zoom: f32,
    /// Offset of the figure origin from the top left of the widget
    pub pan: Vec2,
}

impl Default for ViewMetadata {
    fn default() -> Self {
        Self {
            needs_fit: true,
            zoom: 1.,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewMetadata {
    pub fn load(ui: &Ui) -> Self {
        ui.data_mut(|data| data.get_temp::<ViewMetadata>(Id::new(KEY)).unwrap_or_default())
    }

    pub fn save(self, ui: &Ui) {
        ui.data_mut(|data| data.insert_temp(Id::new(KEY), self));
    }

    /// Requests a fit on the next frame, used after the figure changes.
    pub fn reset(ui: &Ui) {
        ViewMetadata::default().save(ui);
    }

    pub fn canvas_to_screen(&self, rect: Rect, pos: Pos2) -> Pos2 {
        rect.min + self.pan + pos.to_vec2() * self.zoom
    }

    pub fn screen_to_canvas(&self, rect: Rect, pos: Pos2) -> Pos2 {
        ((pos - rect.min - self.pan) / self.zoom).to_pos2()
    }

    /// Zooms and pans so `bounds` fills `rect` with some padding.
    pub fn fit(&mut self, rect: Rect, bounds: Rect) {
        self.needs_fit = false;
        if !bounds.is_finite() {
            return;
        }

        let size = bounds.size() * (1. + FIT_PADDING);
        let zoom_x = if size.x > f32::EPSILON {
            rect.width() / size.x
        } else {
            f32::INFINITY
        };
        let zoom_y = if size.y > f32::EPSILON {
            rect.height() / size.y
        } else {
            f32::INFINITY
        };
        let zoom = zoom_x.min(zoom_y);
        self.zoom = if zoom.is_finite() && zoom > 0. { zoom } else { 1. };
        self.pan = rect.size() * 0.5 - bounds.center().to_vec2() * self.zoom;
    }

    /// Zoom by `delta` keeping the canvas point under `center` fixed.
    fn zoom_around(&mut self, rect: Rect, delta: f32, center: Option<Pos2>) {
        let center = center.unwrap_or(rect.center()) - rect.min;
        let graph_center = (center - self.pan) / self.zoom;
        let new_zoom = self.zoom * (1. + delta);
        self.pan += graph_center * self.zoom - graph_center * new_zoom;
        self.zoom = new_zoom;
    }
}

/// Distance from `p` to the segment `a`-`b`.
pub fn segment_distance(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0., 1.);
    p.distance(a + ab * t)
}

/// Paints a [`ForceFigure`] with zoom, pan and hover labels.
pub struct FigureView<'a> {
    figure: &'a ForceFigure,
    labels: bool,
}

impl<'a> FigureView<'a> {
    pub fn new(figure: &'a ForceFigure) -> Self {
        Self {
            figure,
            labels: true,
        }
    }

    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    fn handle_navigation(ui: &Ui, response: &Response, meta: &mut ViewMetadata) {
        if response.hovered() {
            ui.input(|i| {
                let delta = i.zoom_delta();
                if delta == 1. {
                    return;
                }
                let step = ZOOM_STEP * (delta - 1.).signum();
                meta.zoom_around(response.rect, step, i.pointer.hover_pos());
            });
        }

        if response.dragged() {
            meta.pan += response.drag_delta();
        }
        if response.double_clicked() {
            meta.needs_fit = true;
        }
    }

    fn draw_edge(&self, p: &Painter, rect: Rect, meta: &ViewMetadata, e: &EdgeSegment) {
        p.line_segment(
            [
                meta.canvas_to_screen(rect, e.from),
                meta.canvas_to_screen(rect, e.to),
            ],
            Stroke::new(self.figure.edge_width, self.figure.edge_color),
        );
    }

    fn draw_node(&self, p: &Painter, rect: Rect, meta: &ViewMetadata, n: &NodeMarker) {
        let center = meta.canvas_to_screen(rect, n.pos);
        let radius = n.size * 0.5;
        p.circle(center, radius, n.color, Stroke::new(1., self.figure.outline));
        if self.labels {
            p.text(
                center - Vec2::new(0., radius + 2.),
                Align2::CENTER_BOTTOM,
                &n.label,
                FontId::proportional(LABEL_FONT_SIZE),
                p.ctx().style().visuals.text_color(),
            );
        }
    }

    fn hover_text(&self, rect: Rect, meta: &ViewMetadata, pointer: Pos2) -> Option<String> {
        let canvas = meta.screen_to_canvas(rect, pointer);
        if let Some(n) = self.figure.node_at(canvas, 1. / meta.zoom) {
            return Some(format!("{}\n{}", n.label, n.category.display_name()));
        }
        self.figure
            .edges
            .iter()
            .find(|e| {
                segment_distance(
                    pointer,
                    meta.canvas_to_screen(rect, e.from),
                    meta.canvas_to_screen(rect, e.to),
                ) <= EDGE_HOVER_DISTANCE
            })
            .map(|e| e.relation.clone())
    }
}

impl Widget for FigureView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let mut meta = ViewMetadata::load(ui);
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        if meta.needs_fit {
            meta.fit(rect, self.figure.bounds);
        }
        Self::handle_navigation(ui, &response, &mut meta);

        for e in &self.figure.edges {
            self.draw_edge(&painter, rect, &meta, e);
        }
        for n in &self.figure.nodes {
            self.draw_node(&painter, rect, &meta, n);
        }

        painter.text(
            rect.center_top() + Vec2::new(0., 4.),
            Align2::CENTER_TOP,
            &self.figure.title,
            FontId::proportional(TITLE_FONT_SIZE),
            ui.visuals().strong_text_color(),
        );
        if self.figure.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No graph data to display",
                FontId::proportional(TITLE_FONT_SIZE),
                Color32::GRAY,
            );
        }

        let hover = response
            .hover_pos()
            .and_then(|pos| self.hover_text(rect, &meta, pos));
        meta.save(ui);

        match hover {
            Some(text) => response.on_hover_text_at_pointer(text),
            None => response,
        }
    }
}
