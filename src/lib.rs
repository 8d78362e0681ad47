//! adrig-icongen: procedural AdRig brand icon renderer
//!
//! This crate draws the AdRig launcher icon from scratch: a radial gradient
//! background, a shield emblem with a DNA helix, glowing "Ad"/"Rig" text, a
//! divider and corner accents. Everything is computed from the requested
//! size, so any resolution can be rendered without source artwork.
//!
//! # Example
//!
//! ```
//! use adrig_icongen::{FontProvider, IconComposer, IconVariant};
//!
//! // The built-in face keeps the output independent of installed fonts
//! let composer = IconComposer::new(FontProvider::builtin_only());
//!
//! let icon = composer.compose(IconVariant::Foreground, 128).unwrap();
//! assert_eq!(icon.size(), 128);
//!
//! // Foreground icons keep their transparent corners
//! assert_eq!(icon.data.get_pixel(0, 0).0[3], 0);
//! ```
//!
//! # Exporting
//!
//! An [`ExportPlan`] lists the files of an icon set and writes them in one
//! go. Plans serialize to JSON:
//!
//! ```
//! use adrig_icongen::ExportPlan;
//!
//! let plan = ExportPlan::brand("assets/icon");
//! assert_eq!(plan.targets.len(), 9);
//!
//! let json = plan.to_json().unwrap();
//! assert_eq!(ExportPlan::from_json(&json).unwrap(), plan);
//! ```

mod canvas;
mod color;
mod composer;
mod error;
mod export;
mod font;
mod geometry;
mod icon;
pub mod motif;

pub use canvas::{Canvas, RowBand};
pub use color::Color;
pub use composer::{IconComposer, IconVariant};
pub use error::{Error, Result};
pub use export::{ExportPlan, ExportTarget, DEFAULT_OUT_DIR, DERIVED_SIZES};
pub use font::{builtin_text_width, FontFace, FontHandle, FontProvider};
pub use geometry::{
    build_corner_accent_positions, build_helix_strands, build_shield_outline, polygon_area,
    scale_about, Point2D,
};
pub use icon::{IconImage, IconSet};
pub use motif::{
    render_radial_gradient, CornerAccents, DividerMotif, DividerStyle, GradientStop,
    GradientText, HelixMotif, Motif, Outline, RadialGradient, RenderContext, Shadow,
    ShieldGlow, ShieldMotif, TextBlock, TextGlow,
};

/// The brand palette.
pub mod brand {
    pub use crate::color::{
        CYAN, DEEP_BLUE, EDGE_BLUE, ELECTRIC_BLUE, MID_BLUE, SHIELD_NAVY, SHIELD_NAVY_LIGHT,
        WHITE,
    };
}
