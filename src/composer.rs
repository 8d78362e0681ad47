//! Icon composition.
//!
//! Each [`IconVariant`] is a fixed motif pipeline. [`IconComposer`] builds the
//! pipeline for a requested size, runs it over a fresh canvas and wraps the
//! result in an [`IconImage`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::{CYAN, ELECTRIC_BLUE, SHIELD_NAVY, SHIELD_NAVY_LIGHT};
use crate::error::{Error, Result};
use crate::font::{FontFace, FontProvider};
use crate::geometry::Point2D;
use crate::icon::IconImage;
use crate::motif::{
    center_of, CornerAccents, DividerMotif, GradientText, HelixMotif, Motif, Outline,
    RadialGradient, RenderContext, ShieldGlow, ShieldMotif, TextBlock, TextGlow,
};

/// Label drawn by the simple text variant.
const SIMPLE_LABEL: &str = "Ad Rig";

// ============================================================================
// IconVariant
// ============================================================================

/// The icon designs the composer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconVariant {
    /// Launcher icon: gradient background, glowing shield and text.
    Main,
    /// Adaptive-icon foreground on a transparent background.
    Foreground,
    /// Gradient "Ad Rig" wordmark without the shield.
    SimpleText,
}

impl IconVariant {
    pub const ALL: [IconVariant; 3] = [Self::Main, Self::Foreground, Self::SimpleText];

    /// Whether the variant covers every pixel and is saved without alpha.
    pub fn is_opaque(self) -> bool {
        matches!(self, Self::Main)
    }

    /// Kebab-case name, as used in export plans.
    pub fn name(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Foreground => "foreground",
            Self::SimpleText => "simple-text",
        }
    }

    /// Shield radius for a canvas of `size`.
    fn radius(self, size: u32) -> f32 {
        let fraction = match self {
            Self::Main => 0.38,
            Self::Foreground | Self::SimpleText => 0.35,
        };
        (f64::from(size) * fraction).floor() as f32
    }
}

impl fmt::Display for IconVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// IconComposer
// ============================================================================

/// Renders icon variants at arbitrary sizes.
///
/// Every call starts from a blank canvas, so renders are independent of each
/// other and of call order.
///
/// # Example
///
/// ```
/// use adrig_icongen::{FontProvider, IconComposer, IconVariant};
///
/// let composer = IconComposer::new(FontProvider::builtin_only());
/// let icon = composer.compose(IconVariant::Main, 64).unwrap();
/// assert_eq!(icon.size(), 64);
/// assert!(icon.is_opaque());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IconComposer {
    fonts: FontProvider,
}

impl IconComposer {
    /// Creates a composer that draws text with faces from `fonts`.
    pub fn new(fonts: FontProvider) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &FontProvider {
        &self.fonts
    }

    /// Lists the motifs drawn for `variant` at `size`, bottom layer first.
    pub fn pipeline(&self, variant: IconVariant, size: u32) -> Vec<Box<dyn Motif>> {
        let face = self.fonts.load();
        match variant {
            IconVariant::Main => main_pipeline(&face, size),
            IconVariant::Foreground => foreground_pipeline(&face, size),
            IconVariant::SimpleText => simple_text_pipeline(&face, size),
        }
    }

    /// Runs the pipeline of `variant` over a fresh `size` x `size` canvas.
    pub fn compose_canvas(&self, variant: IconVariant, size: u32) -> Result<Canvas> {
        if size == 0 {
            return Err(Error::invalid("size", "icon size must be at least 1"));
        }

        let canvas = Canvas::new(size)?;
        let mut ctx = RenderContext::new(canvas, variant.radius(size));
        for motif in self.pipeline(variant, size) {
            tracing::trace!(motif = motif.name(), "drawing");
            motif.draw(&mut ctx)?;
        }

        tracing::debug!(%variant, size, "composed icon");
        Ok(ctx.into_canvas())
    }

    /// Renders `variant` at `size` pixels.
    pub fn compose(&self, variant: IconVariant, size: u32) -> Result<IconImage> {
        let canvas = self.compose_canvas(variant, size)?;
        Ok(IconImage::new(canvas.to_rgba_image(), variant))
    }
}

// ============================================================================
// Pipelines
// ============================================================================

/// "Ad" above the divider and "Rig" below it, sized from the shield radius.
fn wordmark(face: &FontFace, center: Point2D, radius: f32) -> [TextBlock; 2] {
    [
        TextBlock::new(
            "Ad",
            face.at_size((radius * 0.5).floor()),
            Point2D::new(center.x, center.y - radius * 0.45),
            CYAN,
        ),
        TextBlock::new(
            "Rig",
            face.at_size((radius * 0.48).floor()),
            Point2D::new(center.x, center.y + radius * 0.05),
            ELECTRIC_BLUE,
        ),
    ]
}

fn main_pipeline(face: &FontFace, size: u32) -> Vec<Box<dyn Motif>> {
    let radius = IconVariant::Main.radius(size);
    let [ad, rig] = wordmark(face, center_of(size), radius);

    vec![
        Box::new(RadialGradient::brand()),
        Box::new(ShieldMotif::filled(SHIELD_NAVY)),
        Box::new(HelixMotif::default()),
        Box::new(TextGlow::new(ad)),
        Box::new(TextGlow::new(rig)),
        Box::new(DividerMotif::faded()),
        Box::new(CornerAccents::default()),
        Box::new(ShieldMotif::border(Outline::new(CYAN, 3.0)).with_glow(ShieldGlow::default())),
    ]
}

fn foreground_pipeline(face: &FontFace, size: u32) -> Vec<Box<dyn Motif>> {
    let radius = IconVariant::Foreground.radius(size);
    let [ad, rig] = wordmark(face, center_of(size), radius);

    vec![
        Box::new(ShieldMotif::filled(SHIELD_NAVY_LIGHT)),
        Box::new(HelixMotif::default()),
        Box::new(TextGlow::plain(ad)),
        Box::new(TextGlow::plain(rig)),
        Box::new(DividerMotif::solid()),
        Box::new(CornerAccents::default()),
        Box::new(ShieldMotif::border(Outline::new(CYAN, 4.0))),
    ]
}

fn simple_text_pipeline(face: &FontFace, size: u32) -> Vec<Box<dyn Motif>> {
    let center = center_of(size);
    let font_size = (f64::from(size) * 0.16).floor() as f32;
    let label = TextBlock::new(
        SIMPLE_LABEL,
        face.at_size(font_size),
        Point2D::new(center.x, center.y - font_size * 0.45),
        CYAN,
    );

    vec![Box::new(GradientText::new(label))]
}
