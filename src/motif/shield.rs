//! Shield fill, outline and glowing border.

use super::{Motif, RenderContext};
use crate::color::{Color, CYAN};
use crate::error::Result;
use crate::geometry::{build_shield_outline, scale_about};

/// A stroked outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Color,
    /// Stroke width in master pixels.
    pub width: f32,
}

impl Outline {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

// ============================================================================
// ShieldGlow
// ============================================================================

/// A soft bloom of enlarged, increasingly faint outline copies.
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldGlow {
    /// Number of enlarged copies.
    pub copies: u32,
    /// Growth per copy, as a fraction of each point's offset from the center.
    pub step: f32,
    /// Alpha the innermost copy approaches.
    pub peak_alpha: u8,
    pub color: Color,
    /// Stroke width of each copy in master pixels.
    pub width: f32,
}

impl Default for ShieldGlow {
    fn default() -> Self {
        Self {
            copies: 10,
            step: 0.02,
            peak_alpha: 50,
            color: CYAN,
            width: 2.0,
        }
    }
}

impl ShieldGlow {
    /// Returns `(growth, color)` for each copy, outermost first.
    ///
    /// Copy `i` grows by `i * step` and has alpha `peak * (1 - i / copies)`,
    /// so the largest copy is fully transparent and the smallest the brightest.
    pub fn layers(&self) -> Vec<(f32, Color)> {
        (1..=self.copies)
            .rev()
            .map(|i| {
                let fade = 1.0 - f64::from(i) / f64::from(self.copies);
                let alpha = (f64::from(self.peak_alpha) * fade) as u8;
                (i as f32 * self.step, self.color.with_alpha(alpha))
            })
            .collect()
    }
}

// ============================================================================
// ShieldMotif
// ============================================================================

/// The shield emblem: optional fill, optional glow, optional crisp outline,
/// drawn in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShieldMotif {
    pub fill: Option<Color>,
    pub glow: Option<ShieldGlow>,
    pub outline: Option<Outline>,
}

impl ShieldMotif {
    /// A solid shield without a border.
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    /// Only the shield border.
    pub fn border(outline: Outline) -> Self {
        Self {
            outline: Some(outline),
            ..Self::default()
        }
    }

    pub fn with_glow(mut self, glow: ShieldGlow) -> Self {
        self.glow = Some(glow);
        self
    }
}

impl Motif for ShieldMotif {
    fn name(&self) -> &'static str {
        "shield"
    }

    fn draw(&self, ctx: &mut RenderContext) -> Result<()> {
        if ctx.radius <= 0.0 {
            return Ok(());
        }
        let outline = build_shield_outline(ctx.center, ctx.radius);

        if let Some(fill) = self.fill {
            ctx.canvas.fill_polygon(&outline, fill);
        }

        if let Some(glow) = &self.glow {
            let width = ctx.px(glow.width);
            for (growth, color) in glow.layers() {
                let enlarged = scale_about(&outline, ctx.center, growth);
                ctx.canvas.stroke_polygon(&enlarged, color, width);
            }
        }

        if let Some(stroke) = self.outline {
            let width = ctx.px(stroke.width);
            ctx.canvas.stroke_polygon(&outline, stroke.color, width);
        }

        Ok(())
    }
}
