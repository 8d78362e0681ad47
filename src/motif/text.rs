//! Glowing and gradient text.
//!
//! Both effects are expressed as an ordered list of [`DrawInstruction`]s that
//! is built first and executed afterwards, so the layering can be inspected
//! without rasterizing anything.

use super::{DrawInstruction, Motif, RenderContext};
use crate::color::Color;
use crate::error::Result;
use crate::font::FontHandle;
use crate::geometry::Point2D;

/// A run of text placed with its top edge centered on `anchor`.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub text: String,
    pub font: FontHandle,
    /// Top-center of the text box, in canvas pixels.
    pub anchor: Point2D,
    pub color: Color,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, font: FontHandle, anchor: Point2D, color: Color) -> Self {
        Self {
            text: text.into(),
            font,
            anchor,
            color,
        }
    }

    fn run(&self, ctx: &mut RenderContext, instructions: &[DrawInstruction]) {
        for step in instructions {
            let anchor = self.anchor.offset(ctx.px(step.dx), ctx.px(step.dy));
            ctx.canvas.draw_text(&self.text, &self.font, anchor, step.color);
        }
    }
}

/// `layers` copies fading in toward the text, faintest first.
fn glow_steps(color: Color, layers: u32, peak_alpha: u8) -> impl Iterator<Item = DrawInstruction> {
    (1..=layers).rev().map(move |k| {
        let fade = 1.0 - f64::from(k) / f64::from(layers);
        let alpha = (f64::from(peak_alpha) * fade) as u8;
        DrawInstruction::at_anchor(color.with_alpha(alpha))
    })
}

// ============================================================================
// TextGlow
// ============================================================================

/// Text drawn over a stack of translucent copies of itself.
///
/// With `layers == 0` this is plain text.
#[derive(Debug, Clone)]
pub struct TextGlow {
    pub block: TextBlock,
    pub layers: u32,
    pub peak_alpha: u8,
}

impl TextGlow {
    pub fn new(block: TextBlock) -> Self {
        Self {
            block,
            layers: 8,
            peak_alpha: 40,
        }
    }

    /// The text alone, without glow copies.
    pub fn plain(block: TextBlock) -> Self {
        Self {
            layers: 0,
            ..Self::new(block)
        }
    }

    /// Glow copies faintest first, then the opaque text.
    pub fn instructions(&self) -> Vec<DrawInstruction> {
        let color = self.block.color;
        glow_steps(color, self.layers, self.peak_alpha)
            .chain(std::iter::once(DrawInstruction::at_anchor(color.with_alpha(255))))
            .collect()
    }
}

impl Motif for TextGlow {
    fn name(&self) -> &'static str {
        "text-glow"
    }

    fn draw(&self, ctx: &mut RenderContext) -> Result<()> {
        self.block.run(ctx, &self.instructions());
        Ok(())
    }
}

// ============================================================================
// GradientText
// ============================================================================

/// A drop shadow offset in master pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub dx: f32,
    pub dy: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::rgba(0, 0, 0, 120),
            dx: 6.0,
            dy: 6.0,
        }
    }
}

/// Glowing text with a drop shadow and a faked vertical color gradient.
///
/// The gradient is a few opaque copies stacked one master pixel apart, each
/// with its hue rotated a little further than the previous one.
#[derive(Debug, Clone)]
pub struct GradientText {
    pub block: TextBlock,
    pub glow_layers: u32,
    pub peak_alpha: u8,
    pub shadow: Option<Shadow>,
    pub bands: u32,
    /// Hue rotation between consecutive bands, in degrees.
    pub hue_step: f32,
}

impl GradientText {
    pub fn new(block: TextBlock) -> Self {
        Self {
            block,
            glow_layers: 8,
            peak_alpha: 40,
            shadow: Some(Shadow::default()),
            bands: 3,
            hue_step: 20.0,
        }
    }

    /// Glow, shadow, then the hue bands from top to bottom.
    pub fn instructions(&self) -> Vec<DrawInstruction> {
        let color = self.block.color.with_alpha(255);
        let mut steps: Vec<_> = glow_steps(color, self.glow_layers, self.peak_alpha).collect();

        if let Some(shadow) = self.shadow {
            steps.push(DrawInstruction::offset(shadow.color, shadow.dx, shadow.dy));
        }

        steps.extend((0..self.bands).map(|band| {
            let shifted = color.shift_hue(band as f32 * self.hue_step);
            DrawInstruction::offset(shifted, 0.0, band as f32)
        }));
        steps
    }
}

impl Motif for GradientText {
    fn name(&self) -> &'static str {
        "gradient-text"
    }

    fn draw(&self, ctx: &mut RenderContext) -> Result<()> {
        self.block.run(ctx, &self.instructions());
        Ok(())
    }
}
