//! Corner "targeting" accents.

use super::{Motif, RenderContext};
use crate::color::{Color, CYAN, WHITE};
use crate::error::Result;
use crate::geometry::build_corner_accent_positions;

/// Concentric dots with a cross at each of the four accent positions.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerAccents {
    /// `(radius, color)` pairs in master pixels, drawn in order.
    pub dots: [(f32, Color); 3],
    /// Half-length of each cross arm in master pixels.
    pub cross_half: f32,
    pub cross_width: f32,
    pub cross_color: Color,
}

impl Default for CornerAccents {
    fn default() -> Self {
        Self {
            dots: [(6.0, CYAN.with_alpha(100)), (3.0, CYAN), (1.0, WHITE)],
            cross_half: 10.0,
            cross_width: 2.0,
            cross_color: CYAN.with_alpha(150),
        }
    }
}

impl Motif for CornerAccents {
    fn name(&self) -> &'static str {
        "corner-accents"
    }

    fn draw(&self, ctx: &mut RenderContext) -> Result<()> {
        let half = ctx.px(self.cross_half);
        let width = ctx.px(self.cross_width);

        for p in build_corner_accent_positions(ctx.center, ctx.radius) {
            for (radius, color) in self.dots {
                ctx.canvas.fill_circle(p, ctx.px(radius), color);
            }
            ctx.canvas
                .draw_line(p.offset(-half, 0.0), p.offset(half, 0.0), self.cross_color, width);
            ctx.canvas
                .draw_line(p.offset(0.0, -half), p.offset(0.0, half), self.cross_color, width);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    #[test]
    fn accents_land_on_all_four_positions() {
        let mut ctx = RenderContext::new(Canvas::new(1024).unwrap(), 400.0);
        CornerAccents::default().draw(&mut ctx).unwrap();

        for (x, y) in [(272, 312), (752, 312), (312, 752), (712, 752)] {
            let arm = ctx.canvas.pixel(x + 8, y).unwrap();
            assert!(arm.a > 0, "missing cross arm at ({x}, {y})");
            let far = ctx.canvas.pixel(x + 20, y + 20).unwrap();
            assert_eq!(far, Color::TRANSPARENT);
        }
    }

    #[test]
    fn dots_are_layered_bright_to_center() {
        let mut ctx = RenderContext::new(Canvas::new(1024).unwrap(), 400.0);
        CornerAccents::default().draw(&mut ctx).unwrap();

        // the mid dot is opaque cyan just off the white core and the arms
        assert_eq!(ctx.canvas.pixel(272 + 1, 312 + 1), Some(CYAN));

        // the outer halo is translucent where no cross arm reaches
        let halo = ctx.canvas.pixel(272 + 4, 312 + 3).unwrap();
        assert!(halo.a > 0 && halo.a < 255);
    }
}
