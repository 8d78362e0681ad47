//! RGBA colors and the brand palette.

use palette::{Hsl, IntoColor, Srgb};

// ============================================================================
// Color
// ============================================================================

/// An 8-bit straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Creates a color with the given alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Returns the same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn as_tuple(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Returns `#rrggbb`, ignoring alpha.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Rotates the hue by `degrees` in HSL space, keeping alpha.
    pub fn shift_hue(self, degrees: f32) -> Self {
        let rgb = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let mut hsl: Hsl = rgb.into_color();
        hsl.hue += degrees;
        let rotated: Srgb = hsl.into_color();

        Self::rgba(
            (rotated.red.clamp(0.0, 1.0) * 255.0).round() as u8,
            (rotated.green.clamp(0.0, 1.0) * 255.0).round() as u8,
            (rotated.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
            self.a,
        )
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

// ============================================================================
// Brand palette
// ============================================================================

/// Cyan used for "Ad", strands, accents and the border.
pub const CYAN: Color = Color::rgb(0, 245, 255);

/// Blue used for "Rig" and the right helix strand.
pub const ELECTRIC_BLUE: Color = Color::rgb(0, 102, 255);

pub const WHITE: Color = Color::rgb(255, 255, 255);

/// Shield fill of the main icon.
pub const SHIELD_NAVY: Color = Color::rgb(0, 12, 40);

/// Shield fill of the adaptive foreground, a touch lighter than the main one.
pub const SHIELD_NAVY_LIGHT: Color = Color::rgb(0, 20, 60);

pub const DEEP_BLUE: Color = Color::rgb(0, 8, 32);
pub const MID_BLUE: Color = Color::rgb(0, 24, 64);
pub const EDGE_BLUE: Color = Color::rgb(15, 52, 96);
