//! Circuit DNA double helix.

use super::{Motif, RenderContext};
use crate::color::{Color, CYAN, ELECTRIC_BLUE};
use crate::error::Result;
use crate::geometry::build_helix_strands;

/// Two crossing strands joined by rungs with node caps.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixMotif {
    /// Points per strand.
    pub samples: usize,
    /// Rungs between the strands, sampled independently of the strands.
    pub rungs: usize,
    pub left_color: Color,
    pub right_color: Color,
    pub rung_color: Color,
    pub node_color: Color,
    /// Strand and rung width in master pixels.
    pub width: f32,
    /// Node radius in master pixels.
    pub node_radius: f32,
}

impl Default for HelixMotif {
    fn default() -> Self {
        Self {
            samples: 40,
            rungs: 8,
            left_color: CYAN.with_alpha(150),
            right_color: ELECTRIC_BLUE.with_alpha(150),
            rung_color: CYAN.with_alpha(80),
            node_color: CYAN,
            width: 2.0,
            node_radius: 2.0,
        }
    }
}

impl Motif for HelixMotif {
    fn name(&self) -> &'static str {
        "helix"
    }

    fn draw(&self, ctx: &mut RenderContext) -> Result<()> {
        let width = ctx.px(self.width);
        let node_radius = ctx.px(self.node_radius);

        let (left, right) = build_helix_strands(ctx.center, ctx.radius, self.samples)?;
        for (a, b) in left.iter().zip(&left[1..]) {
            ctx.canvas.draw_line(*a, *b, self.left_color, width);
        }
        for (a, b) in right.iter().zip(&right[1..]) {
            ctx.canvas.draw_line(*a, *b, self.right_color, width);
        }

        let (rung_left, rung_right) = build_helix_strands(ctx.center, ctx.radius, self.rungs)?;
        for (l, r) in rung_left.into_iter().zip(rung_right) {
            ctx.canvas.draw_line(l, r, self.rung_color, width);
            ctx.canvas.fill_circle(l, node_radius, self.node_color);
            ctx.canvas.fill_circle(r, node_radius, self.node_color);
        }

        Ok(())
    }
}
