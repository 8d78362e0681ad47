//! Motif infrastructure for icon composition.
//!
//! Every drawn element of the icon (background, shield, helix, text, divider,
//! accents) is a small configuration value implementing [`Motif`]. The
//! composer lines motifs up in a fixed order and runs them against one
//! [`RenderContext`], which carries the canvas and the shared geometry.
//!
//! # Architecture
//!
//! ```text
//! Geometry Builder ──► Motif::draw ──► Canvas primitives
//!                          ▲
//!                    RenderContext
//!            (canvas, center, radius, pixel scale)
//! ```
//!
//! All pixel dimensions inside motifs (stroke widths, dot radii, offsets) are
//! written for the 1024-pixel master and scaled with [`RenderContext::px`].

pub mod accent;
pub mod background;
pub mod divider;
pub mod helix;
pub mod shield;
pub mod text;

pub use accent::CornerAccents;
pub use background::{render_radial_gradient, GradientStop, RadialGradient};
pub use divider::{DividerMotif, DividerStyle};
pub use helix::HelixMotif;
pub use shield::{Outline, ShieldGlow, ShieldMotif};
pub use text::{GradientText, Shadow, TextBlock, TextGlow};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::Result;
use crate::geometry::Point2D;

/// Size the pixel constants of the motifs are written for.
pub const MASTER_SIZE: u32 = 1024;

/// Canvas center for a square canvas of `size`, snapped to whole pixels.
pub fn center_of(size: u32) -> Point2D {
    let c = (size / 2) as f32;
    Point2D::new(c, c)
}

// ============================================================================
// Render Context
// ============================================================================

/// State shared by all motifs of one render pass.
pub struct RenderContext {
    /// The canvas being drawn on.
    pub canvas: Canvas,

    /// Center of the emblem.
    pub center: Point2D,

    /// Emblem radius in pixels; shield and motif proportions derive from it.
    pub radius: f32,

    unit: f32,
}

impl RenderContext {
    /// Wraps `canvas`, centering the emblem on it.
    pub fn new(canvas: Canvas, radius: f32) -> Self {
        let size = canvas.size();
        Self {
            center: center_of(size),
            radius,
            unit: size as f32 / MASTER_SIZE as f32,
            canvas,
        }
    }

    /// Converts a master-size pixel length to this canvas.
    pub fn px(&self, master_px: f32) -> f32 {
        master_px * self.unit
    }

    pub fn size(&self) -> u32 {
        self.canvas.size()
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

// ============================================================================
// Motif trait
// ============================================================================

/// A decorative element that knows how to draw itself.
pub trait Motif {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Draws onto `ctx.canvas`.
    fn draw(&self, ctx: &mut RenderContext) -> Result<()>;
}

// ============================================================================
// Draw instructions
// ============================================================================

/// One step of a layered draw: a color and an offset from the anchor, in
/// master pixels.
///
/// Glow and shadow effects are lists of these, executed front to back in list
/// order, so the first entry ends up lowest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInstruction {
    pub color: Color,
    pub dx: f32,
    pub dy: f32,
}

impl DrawInstruction {
    /// An instruction drawn exactly at the anchor.
    pub fn at_anchor(color: Color) -> Self {
        Self {
            color,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn offset(color: Color, dx: f32, dy: f32) -> Self {
        Self { color, dx, dy }
    }
}
