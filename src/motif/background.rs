//! Radial gradient background.

use super::{Motif, RenderContext};
use crate::canvas::Canvas;
use crate::color::{Color, DEEP_BLUE, EDGE_BLUE, MID_BLUE};
use crate::error::{Error, Result};
use crate::geometry::Point2D;

/// Rows handed out per band during the fill.
const BAND_ROWS: u32 = 64;

/// A gradient key: `color` applies at normalized distance `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub threshold: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(threshold: f32, color: Color) -> Self {
        Self { threshold, color }
    }
}

// ============================================================================
// RadialGradient
// ============================================================================

/// Piecewise-linear radial gradient filling the whole canvas.
#[derive(Debug, Clone)]
pub struct RadialGradient {
    stops: Vec<GradientStop>,
}

impl RadialGradient {
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    /// Deep blue core fading out to a lighter steel blue at the corners.
    pub fn brand() -> Self {
        Self::new(vec![
            GradientStop::new(0.0, DEEP_BLUE),
            GradientStop::new(0.4, DEEP_BLUE),
            GradientStop::new(0.7, MID_BLUE),
            GradientStop::new(1.0, EDGE_BLUE),
        ])
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}

impl Motif for RadialGradient {
    fn name(&self) -> &'static str {
        "radial-gradient"
    }

    fn draw(&self, ctx: &mut RenderContext) -> Result<()> {
        render_radial_gradient(&mut ctx.canvas, ctx.center, &self.stops)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Fills every pixel of `canvas` from `stops`, keyed by distance to `center`.
///
/// Distances are normalized by the distance from `center` to the farthest
/// corner pixel, so that corner gets the last stop exactly.
pub fn render_radial_gradient(
    canvas: &mut Canvas,
    center: Point2D,
    stops: &[GradientStop],
) -> Result<()> {
    validate_stops(stops)?;

    let edge = (canvas.size() - 1) as f32;
    let max_radius = [(0.0, 0.0), (edge, 0.0), (0.0, edge), (edge, edge)]
        .into_iter()
        .map(|(x, y)| center.distance(Point2D::new(x, y)))
        .fold(0.0_f32, f32::max);

    for mut band in canvas.bands_mut(BAND_ROWS) {
        for y in band.rows() {
            for x in 0..band.width() {
                let distance = center.distance(Point2D::new(x as f32, y as f32));
                let ratio = if max_radius > 0.0 {
                    distance / max_radius
                } else {
                    0.0
                };
                band.put(x, y, sample(stops, ratio));
            }
        }
    }

    Ok(())
}

/// Evaluates the gradient at `ratio`, clamped to `[0, 1]`.
///
/// Channels are truncated toward zero after interpolation.
pub fn sample(stops: &[GradientStop], ratio: f32) -> Color {
    let Some((first, rest)) = stops.split_first() else {
        return Color::TRANSPARENT;
    };
    let ratio = ratio.clamp(0.0, 1.0);
    if ratio < first.threshold {
        return first.color;
    }

    let mut lower = first;
    for upper in rest {
        if ratio < upper.threshold {
            let span = upper.threshold - lower.threshold;
            let t = if span > 0.0 {
                (ratio - lower.threshold) / span
            } else {
                1.0
            };
            return lerp(lower.color, upper.color, t);
        }
        lower = upper;
    }

    lower.color
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    let channel = |from: u8, to: u8| -> u8 {
        (from as f32 + (to as f32 - from as f32) * t) as u8
    };
    Color::rgba(
        channel(a.r, b.r),
        channel(a.g, b.g),
        channel(a.b, b.b),
        channel(a.a, b.a),
    )
}

fn validate_stops(stops: &[GradientStop]) -> Result<()> {
    if stops.is_empty() {
        return Err(Error::invalid("stops", "gradient needs at least one stop"));
    }
    if stops.windows(2).any(|w| w[1].threshold < w[0].threshold) {
        return Err(Error::invalid("stops", "thresholds must be non-decreasing"));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motif::center_of;

    fn brand_canvas(size: u32) -> Canvas {
        let mut canvas = Canvas::new(size).unwrap();
        render_radial_gradient(&mut canvas, center_of(size), RadialGradient::brand().stops())
            .unwrap();
        canvas
    }

    #[test]
    fn center_pixel_is_first_stop() {
        let canvas = brand_canvas(64);
        assert_eq!(canvas.pixel(32, 32), Some(DEEP_BLUE));
    }

    #[test]
    fn farthest_corner_is_last_stop() {
        let canvas = brand_canvas(64);
        assert_eq!(canvas.pixel(0, 0), Some(EDGE_BLUE));

        // the other corners sit closer and land inside the last interval
        let center = center_of(64);
        let max_radius = center.distance(Point2D::new(0.0, 0.0));
        let stops = RadialGradient::brand();
        for (x, y) in [(63, 0), (0, 63), (63, 63)] {
            let c = canvas.pixel(x, y).unwrap();
            let ratio = center.distance(Point2D::new(x as f32, y as f32)) / max_radius;
            assert!(ratio > 0.7 && ratio < 1.0);
            assert_eq!(c, sample(stops.stops(), ratio));
            assert_ne!(c, EDGE_BLUE);
            assert!(c.b >= MID_BLUE.b && c.b < EDGE_BLUE.b);
        }
    }

    #[test]
    fn every_pixel_is_opaque() {
        let img = brand_canvas(33).to_rgba_image();
        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn channels_are_monotonic_outward() {
        let stops = RadialGradient::brand();
        let mut previous = sample(stops.stops(), 0.0);
        for step in 1..=200 {
            let current = sample(stops.stops(), step as f32 / 200.0);
            assert!(current.r >= previous.r);
            assert!(current.g >= previous.g);
            assert!(current.b >= previous.b);
            previous = current;
        }
        assert_eq!(previous, EDGE_BLUE);
    }

    #[test]
    fn sample_interpolates_inside_interval() {
        let stops = [
            GradientStop::new(0.0, Color::rgb(0, 0, 0)),
            GradientStop::new(1.0, Color::rgb(200, 100, 50)),
        ];
        assert_eq!(sample(&stops, 0.5), Color::rgb(100, 50, 25));
        assert_eq!(sample(&stops, -3.0), Color::rgb(0, 0, 0));
        assert_eq!(sample(&stops, 7.0), Color::rgb(200, 100, 50));
    }

    #[test]
    fn single_stop_fills_solid() {
        let mut canvas = Canvas::new(9).unwrap();
        let stops = [GradientStop::new(0.5, MID_BLUE)];
        render_radial_gradient(&mut canvas, center_of(9), &stops).unwrap();
        assert!(canvas.to_rgba_image().pixels().all(|p| p.0 == [0, 24, 64, 255]));
    }

    #[test]
    fn invalid_stops_are_rejected() {
        let mut canvas = Canvas::new(4).unwrap();
        let err = render_radial_gradient(&mut canvas, center_of(4), &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "stops", .. }));

        let unsorted = [
            GradientStop::new(0.8, DEEP_BLUE),
            GradientStop::new(0.2, EDGE_BLUE),
        ];
        assert!(render_radial_gradient(&mut canvas, center_of(4), &unsorted).is_err());
    }

    #[test]
    fn one_pixel_canvas_uses_first_stop() {
        let canvas = brand_canvas(1);
        assert_eq!(canvas.pixel(0, 0), Some(DEEP_BLUE));
    }
}
