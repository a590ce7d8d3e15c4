use std::io::Cursor;

use egui::{Color32, Pos2, Rect, Vec2};
use image::{ImageFormat, RgbaImage};

use super::ForceFigure;
use crate::error::RenderError;

/// Margin around the laid-out nodes, in pixels.
const PADDING: f32 = 24.;

/// Software-rendered force figure.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color32>,
}

impl RasterImage {
    fn new(width: u32, height: u32, fill: Color32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    fn put(&mut self, x: i64, y: i64, color: Color32) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.);
        let half = (width * 0.5).floor() as i64;
        for i in 0..=steps as i64 {
            let p = from + delta * (i as f32 / steps);
            let (cx, cy) = (p.x.round() as i64, p.y.round() as i64);
            for dy in -half..=half {
                for dx in -half..=half {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn disc(&mut self, center: Pos2, radius: f32, fill: Color32, outline: Color32) {
        let r = radius.max(1.);
        let (x0, x1) = ((center.x - r).floor() as i64, (center.x + r).ceil() as i64);
        let (y0, y1) = ((center.y - r).floor() as i64, (center.y + r).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Pos2::new(x as f32, y as f32).distance(center);
                if d <= r - 1. {
                    self.put(x, y, fill);
                } else if d <= r {
                    self.put(x, y, outline);
                }
            }
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|c| c.to_array()).collect();
        let img = RgbaImage::from_raw(self.width, self.height, raw).ok_or(
            RenderError::ImageSize {
                width: self.width,
                height: self.height,
            },
        )?;

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Maps layout coordinates into the padded pixel area, keeping aspect ratio.
fn fit(bounds: Rect, width: u32, height: u32) -> impl Fn(Pos2) -> Pos2 {
    let target = Rect::from_min_size(Pos2::ZERO, Vec2::new(width as f32, height as f32))
        .shrink(PADDING.min(width as f32 / 4.).min(height as f32 / 4.));
    let size = bounds.size();
    let scale = if size.x > f32::EPSILON || size.y > f32::EPSILON {
        (target.width() / size.x.max(f32::EPSILON)).min(target.height() / size.y.max(f32::EPSILON))
    } else {
        1.
    };
    let src_center = bounds.center();
    let dst_center = target.center();
    move |p: Pos2| dst_center + (p - src_center) * scale
}

/// Paints `figure` on a white canvas of `width` x `height` pixels.
pub fn rasterize(figure: &ForceFigure, width: u32, height: u32) -> Result<RasterImage, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::ImageSize { width, height });
    }

    let mut img = RasterImage::new(width, height, Color32::WHITE);
    if figure.is_empty() {
        return Ok(img);
    }

    let to_px = fit(figure.bounds, width, height);
    for e in &figure.edges {
        img.line(to_px(e.from), to_px(e.to), figure.edge_width, figure.edge_color);
    }
    for n in &figure.nodes {
        img.disc(to_px(n.pos), n.size * 0.5, n.color, figure.outline);
    }

    log::debug!(
        "rasterized {} nodes and {} edges at {width}x{height}",
        figure.nodes.len(),
        figure.edges.len()
    );
    Ok(img)
}
