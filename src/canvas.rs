//! The compositing canvas every renderer draws onto.
//!
//! [`Canvas`] owns one contiguous RGBA buffer (a `tiny_skia` pixmap) and
//! exposes the handful of alpha-blended primitives the motifs need. Shapes are
//! anti-aliased and composited source-over; per-pixel passes go through
//! [`RowBand`]s, which hand out disjoint row ranges of the buffer.

use std::ops::Range;

use image::RgbaImage;
use resvg::tiny_skia::{
    ColorU8, FillRule, Paint, Path, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Stroke,
    Transform,
};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::font::{self, FontHandle};
use crate::geometry::Point2D;

// ============================================================================
// Canvas
// ============================================================================

/// A square, initially transparent RGBA canvas.
#[derive(Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Creates a fully transparent `size` x `size` canvas.
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(Error::invalid("size", "canvas size must be positive"));
        }
        let pixmap = Pixmap::new(size, size)
            .ok_or_else(|| Error::invalid("size", format!("cannot allocate {size}x{size}")))?;
        Ok(Self { pixmap })
    }

    /// Width and height in pixels.
    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    /// Fills a closed polygon. Degenerate polygons draw nothing.
    pub fn fill_polygon(&mut self, points: &[Point2D], color: Color) {
        if let Some(path) = polygon_path(points) {
            self.fill_path(&path, color);
        }
    }

    /// Strokes the closed outline of a polygon.
    pub fn stroke_polygon(&mut self, points: &[Point2D], color: Color, width: f32) {
        if let Some(path) = polygon_path(points) {
            self.stroke_path(&path, color, width);
        }
    }

    /// Draws a straight segment with butt caps.
    pub fn draw_line(&mut self, from: Point2D, to: Point2D, color: Color, width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, color, width);
        }
    }

    /// Fills an axis-aligned ellipse centered on `center`.
    pub fn fill_ellipse(&mut self, center: Point2D, rx: f32, ry: f32, color: Color) {
        let path = Rect::from_xywh(center.x - rx, center.y - ry, rx * 2.0, ry * 2.0)
            .and_then(PathBuilder::from_oval);
        if let Some(path) = path {
            self.fill_path(&path, color);
        }
    }

    /// Fills a circle.
    pub fn fill_circle(&mut self, center: Point2D, radius: f32, color: Color) {
        self.fill_ellipse(center, radius, radius, color);
    }

    /// Draws `text` with its top edge centered on `anchor`.
    pub fn draw_text(&mut self, text: &str, font: &FontHandle, anchor: Point2D, color: Color) {
        if color.a == 0 || text.is_empty() {
            return;
        }
        font::draw_text(self, text, font, anchor, color);
    }

    /// Overwrites a single pixel without blending. Out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let size = self.size();
        if x >= size || y >= size {
            return;
        }
        self.pixmap.pixels_mut()[(y * size + x) as usize] = premultiply(color);
    }

    /// Reads a pixel back as straight-alpha RGBA, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let size = self.size();
        if x >= size || y >= size {
            return None;
        }
        self.pixmap.pixel(x, y).map(demultiply)
    }

    /// Splits the buffer into bands of `rows_per_band` rows.
    ///
    /// Bands never overlap, so each can be filled independently; the last band
    /// may be shorter.
    pub fn bands_mut(&mut self, rows_per_band: u32) -> impl Iterator<Item = RowBand<'_>> {
        let width = self.pixmap.width();
        let rows = rows_per_band.max(1);
        self.pixmap
            .pixels_mut()
            .chunks_mut((width * rows) as usize)
            .enumerate()
            .map(move |(i, pixels)| RowBand {
                first_row: i as u32 * rows,
                width,
                pixels,
            })
    }

    /// Converts the canvas into a straight-alpha image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let size = self.size();
        let mut img = RgbaImage::new(size, size);
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            *dst = demultiply(*src).into();
        }
        img
    }

    pub(crate) fn fill_path(&mut self, path: &Path, color: Color) {
        if color.a == 0 {
            return;
        }
        self.pixmap.fill_path(
            path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    pub(crate) fn stroke_path(&mut self, path: &Path, color: Color, width: f32) {
        if color.a == 0 || width <= 0.0 {
            return;
        }
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint(color), &stroke, Transform::identity(), None);
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

// ============================================================================
// RowBand
// ============================================================================

/// A mutable, contiguous run of full canvas rows.
pub struct RowBand<'a> {
    first_row: u32,
    width: u32,
    pixels: &'a mut [PremultipliedColorU8],
}

impl RowBand<'_> {
    /// The absolute canvas rows covered by this band.
    pub fn rows(&self) -> Range<u32> {
        let count = self.pixels.len() as u32 / self.width;
        self.first_row..self.first_row + count
    }

    /// Pixels per row.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Writes a pixel addressed in absolute canvas coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the band.
    pub fn put(&mut self, x: u32, y: u32, color: Color) {
        assert!(x < self.width, "column {x} outside band of width {}", self.width);
        let local = (y - self.first_row) * self.width + x;
        self.pixels[local as usize] = premultiply(color);
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn polygon_path(points: &[Point2D]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

fn premultiply(color: Color) -> PremultipliedColorU8 {
    ColorU8::from_rgba(color.r, color.g, color.b, color.a).premultiply()
}

fn demultiply(pixel: PremultipliedColorU8) -> Color {
    let c = pixel.demultiply();
    Color::rgba(c.red(), c.green(), c.blue(), c.alpha())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build_shield_outline;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = Canvas::new(8).unwrap();
        assert_eq!(canvas.size(), 8);
        assert_eq!(canvas.pixel(3, 3), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(8, 0), None);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Canvas::new(0),
            Err(Error::InvalidParameter { name: "size", .. })
        ));
    }

    #[test]
    fn polygon_fill_covers_interior() {
        let mut canvas = Canvas::new(64).unwrap();
        let outline = build_shield_outline(Point2D::new(32.0, 32.0), 20.0);
        canvas.fill_polygon(&outline, RED);

        assert_eq!(canvas.pixel(32, 32), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn degenerate_polygon_draws_nothing() {
        let mut canvas = Canvas::new(16).unwrap();
        let outline = build_shield_outline(Point2D::new(8.0, 8.0), 0.0);
        canvas.fill_polygon(&outline, RED);
        assert_eq!(canvas.to_rgba_image(), Canvas::new(16).unwrap().to_rgba_image());
    }

    #[test]
    fn translucent_draw_blends_over() {
        let mut canvas = Canvas::new(10).unwrap();
        canvas.fill_ellipse(Point2D::new(5.0, 5.0), 20.0, 20.0, RED);
        canvas.fill_circle(Point2D::new(5.0, 5.0), 20.0, BLUE.with_alpha(128));

        let pixel = canvas.pixel(5, 5).unwrap();
        assert!(pixel.r > 0, "should keep some red");
        assert!(pixel.b > 0, "should gain some blue");
        assert_eq!(pixel.a, 255);
    }

    #[test]
    fn line_is_drawn_between_endpoints() {
        let mut canvas = Canvas::new(20).unwrap();
        canvas.draw_line(Point2D::new(2.0, 10.0), Point2D::new(18.0, 10.0), RED, 2.0);
        assert!(canvas.pixel(10, 9).unwrap().a > 200);
        assert_eq!(canvas.pixel(10, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn reads_outside_the_canvas_are_none() {
        let mut canvas = Canvas::new(8).unwrap();
        canvas.set_pixel(0, 1, RED);

        // one past the row end must not wrap into the next row
        assert_eq!(canvas.pixel(8, 0), None);
        assert_eq!(canvas.pixel(0, 8), None);
        assert_eq!(canvas.pixel(0, 1), Some(RED));
    }

    #[test]
    fn set_pixel_overwrites_and_ignores_out_of_range() {
        let mut canvas = Canvas::new(4).unwrap();
        canvas.set_pixel(1, 2, RED);
        canvas.set_pixel(1, 2, BLUE);
        canvas.set_pixel(9, 9, BLUE);
        assert_eq!(canvas.pixel(1, 2), Some(BLUE));
    }

    #[test]
    fn bands_partition_rows() {
        let mut canvas = Canvas::new(10).unwrap();
        let ranges: Vec<_> = canvas.bands_mut(4).map(|band| band.rows()).collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..10]);

        for mut band in canvas.bands_mut(3) {
            for y in band.rows() {
                band.put(y, y, RED);
            }
        }
        for i in 0..10 {
            assert_eq!(canvas.pixel(i, i), Some(RED));
        }
        assert_eq!(canvas.pixel(1, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn rgba_export_is_straight_alpha() {
        let mut canvas = Canvas::new(2).unwrap();
        canvas.set_pixel(0, 0, Color::rgba(200, 100, 50, 255));
        let img = canvas.to_rgba_image();
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [0, 0, 0, 0]);
    }
}
