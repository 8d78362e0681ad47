//! Horizontal divider between the two text blocks.

use super::{Motif, RenderContext};
use crate::color::{Color, CYAN};
use crate::error::Result;
use crate::geometry::Point2D;

/// How the divider line is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DividerStyle {
    /// One opaque segment.
    Solid,
    /// Many short segments fading out toward both ends, with circuit nodes.
    Faded {
        segments: u32,
        peak_alpha: u8,
        /// Nodes sit at `cx + i * node_spacing * r` for `i in -nodes..=nodes`.
        nodes: i32,
        node_spacing: f32,
    },
}

/// A divider centered on the emblem, spanning `cx ± half_span * r`.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerMotif {
    pub style: DividerStyle,
    pub half_span: f32,
    pub color: Color,
    /// Line width in master pixels.
    pub width: f32,
}

impl DividerMotif {
    /// The plain line used on the adaptive foreground.
    pub fn solid() -> Self {
        Self {
            style: DividerStyle::Solid,
            half_span: 0.4,
            color: CYAN,
            width: 2.0,
        }
    }

    /// The faded line with five circuit nodes.
    pub fn faded() -> Self {
        Self {
            style: DividerStyle::Faded {
                segments: 50,
                peak_alpha: 100,
                nodes: 2,
                node_spacing: 0.2,
            },
            ..Self::solid()
        }
    }
}

/// Alpha of the sub-segment starting at `t` in `[0, 1)`.
///
/// Full `peak` across the middle; linear ramps over the outer fifth on each
/// side.
pub fn segment_alpha(t: f64, peak: u8) -> u8 {
    if (0.2..=0.8).contains(&t) {
        return peak;
    }
    let ramp = (t / 0.2).min((1.0 - t) / 0.2).clamp(0.0, 1.0);
    (f64::from(peak) * ramp) as u8
}

impl Motif for DividerMotif {
    fn name(&self) -> &'static str {
        "divider"
    }

    fn draw(&self, ctx: &mut RenderContext) -> Result<()> {
        let y = ctx.center.y;
        let start = ctx.center.x - ctx.radius * self.half_span;
        let end = ctx.center.x + ctx.radius * self.half_span;
        let width = ctx.px(self.width);

        match self.style {
            DividerStyle::Solid => {
                ctx.canvas
                    .draw_line(Point2D::new(start, y), Point2D::new(end, y), self.color, width);
            }
            DividerStyle::Faded {
                segments,
                peak_alpha,
                nodes,
                node_spacing,
            } => {
                let span = end - start;
                for i in 0..segments {
                    let t = f64::from(i) / f64::from(segments);
                    let x1 = start + span * i as f32 / segments as f32;
                    let x2 = start + span * (i + 1) as f32 / segments as f32;
                    let color = self.color.with_alpha(segment_alpha(t, peak_alpha));
                    ctx.canvas
                        .draw_line(Point2D::new(x1, y), Point2D::new(x2, y), color, width);
                }

                let halo = ctx.px(4.0);
                let dot = ctx.px(2.0);
                for i in -nodes..=nodes {
                    let node = Point2D::new(ctx.center.x + i as f32 * ctx.radius * node_spacing, y);
                    ctx.canvas.fill_circle(node, halo, self.color.with_alpha(80));
                    ctx.canvas.fill_circle(node, dot, self.color);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    #[test]
    fn segment_alpha_ramps_at_both_ends() {
        assert_eq!(segment_alpha(0.0, 100), 0);
        assert_eq!(segment_alpha(0.1, 100), 50);
        assert_eq!(segment_alpha(0.2, 100), 100);
        assert_eq!(segment_alpha(0.5, 100), 100);
        assert_eq!(segment_alpha(0.8, 100), 100);
        assert_eq!(segment_alpha(0.98, 100), 10);
    }

    #[test]
    fn faded_alpha_is_symmetric() {
        for i in 0..10 {
            let t = f64::from(i) / 50.0;
            let mirrored = segment_alpha(1.0 - t, 100);
            assert!((segment_alpha(t, 100) as i16 - mirrored as i16).abs() <= 1);
        }
    }

    #[test]
    fn solid_divider_is_opaque_across_span() {
        let mut ctx = RenderContext::new(Canvas::new(1024).unwrap(), 400.0);
        DividerMotif::solid().draw(&mut ctx).unwrap();

        assert_eq!(ctx.canvas.pixel(512 - 150, 511), Some(CYAN));
        assert_eq!(ctx.canvas.pixel(512 + 150, 511), Some(CYAN));
        // span ends at cx ± 160
        assert_eq!(ctx.canvas.pixel(512 + 170, 511), Some(Color::TRANSPARENT));
    }

    #[test]
    fn faded_divider_is_dim_at_ends_and_has_nodes() {
        let mut ctx = RenderContext::new(Canvas::new(1024).unwrap(), 400.0);
        DividerMotif::faded().draw(&mut ctx).unwrap();

        // node centers at cx + i * 80
        for i in -2..=2 {
            let x = (512 + i * 80) as u32;
            assert_eq!(ctx.canvas.pixel(x, 512), Some(CYAN));
        }

        let middle = ctx.canvas.pixel(512 + 40, 511).unwrap();
        let outer = ctx.canvas.pixel(512 - 155, 511).unwrap();
        assert!(outer.a < middle.a);
    }
}
