//! Font resolution and text rasterization.
//!
//! A [`FontProvider`] walks an ordered list of candidate font files and hands
//! back the first face that loads. When none do, it falls back to a small
//! built-in bitmap face, so resolving a font never fails.
//!
//! Loaded faces are rendered by generating an SVG `<text>` element and letting
//! `usvg`/`resvg` shape and rasterize it onto the canvas. The built-in face is
//! drawn cell by cell as one filled path.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use resvg::tiny_skia::{PathBuilder, Rect, Transform};
use resvg::usvg::{fontdb, Options, Tree};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::geometry::Point2D;

/// Baseline position below the top of the text box, as a fraction of the size.
const ASCENT: f32 = 0.8;

// ============================================================================
// FontFace / FontHandle
// ============================================================================

/// A resolved typeface, independent of size.
#[derive(Clone)]
pub enum FontFace {
    /// A face loaded from disk, addressed by family name inside `db`.
    Loaded {
        db: Arc<fontdb::Database>,
        family: String,
    },
    /// The built-in 5x7 bitmap face.
    Builtin,
}

impl FontFace {
    /// Pairs this face with a pixel size.
    pub fn at_size(&self, size: f32) -> FontHandle {
        FontHandle {
            face: self.clone(),
            size: size.max(1.0),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { family, .. } => f.debug_struct("Loaded").field("family", family).finish(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

/// A face at a specific pixel size.
#[derive(Debug, Clone)]
pub struct FontHandle {
    face: FontFace,
    size: f32,
}

impl FontHandle {
    /// The built-in face at `size` pixels.
    pub fn builtin(size: f32) -> Self {
        FontFace::Builtin.at_size(size)
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

// ============================================================================
// FontProvider
// ============================================================================

/// Bold sans-serif faces tried in order.
const SYSTEM_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Installed families tried, in order, when no candidate file loads.
const SYSTEM_FAMILIES: &[fontdb::Family<'static>] = &[
    fontdb::Family::Name("Helvetica"),
    fontdb::Family::Name("Arial"),
    fontdb::Family::Name("DejaVu Sans"),
    fontdb::Family::Name("Liberation Sans"),
    fontdb::Family::SansSerif,
];

/// Resolves an ordered list of candidate font files into a [`FontFace`].
#[derive(Debug, Clone)]
pub struct FontProvider {
    candidates: Vec<PathBuf>,
    system_lookup: bool,
}

impl Default for FontProvider {
    /// Common bold sans-serif locations on macOS, Linux and Windows, then any
    /// installed sans-serif family.
    fn default() -> Self {
        Self::with_candidates(SYSTEM_CANDIDATES).with_system_lookup(true)
    }
}

impl FontProvider {
    /// A provider that tries `candidates` in order and nothing else.
    pub fn with_candidates<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            system_lookup: false,
        }
    }

    /// A provider that always yields the built-in face.
    ///
    /// Output no longer depends on the fonts installed on the host.
    pub fn builtin_only() -> Self {
        Self::with_candidates(Vec::<PathBuf>::new())
    }

    /// Whether to search the installed fonts once every candidate has failed.
    pub fn with_system_lookup(mut self, enabled: bool) -> Self {
        self.system_lookup = enabled;
        self
    }

    /// Returns the candidate files in the order they are tried.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Returns the first loadable candidate, then an installed sans-serif
    /// face if enabled, or the built-in face.
    pub fn load(&self) -> FontFace {
        if self.candidates.is_empty() && !self.system_lookup {
            return FontFace::Builtin;
        }

        for path in &self.candidates {
            if let Some(face) = load_candidate(path) {
                return face;
            }
        }

        if self.system_lookup {
            if let Some(face) = load_system_sans() {
                return face;
            }
        }

        tracing::warn!(
            tried = self.candidates.len(),
            system_lookup = self.system_lookup,
            "no font could be loaded, using the built-in face"
        );
        FontFace::Builtin
    }

    /// Resolves a face and pairs it with `size`.
    pub fn resolve(&self, size: f32) -> FontHandle {
        self.load().at_size(size)
    }
}

fn load_candidate(path: &Path) -> Option<FontFace> {
    if !path.is_file() {
        return None;
    }

    let mut db = fontdb::Database::new();
    if let Err(err) = db.load_font_file(path) {
        tracing::debug!(path = %path.display(), error = %err, "font candidate failed to load");
        return None;
    }

    let family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))?;

    tracing::debug!(path = %path.display(), %family, "loaded font");
    Some(FontFace::Loaded {
        db: Arc::new(db),
        family,
    })
}

fn load_system_sans() -> Option<FontFace> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let query = fontdb::Query {
        families: SYSTEM_FAMILIES,
        weight: fontdb::Weight::BOLD,
        ..fontdb::Query::default()
    };
    let id = db.query(&query)?;
    let family = db
        .face(id)
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())?;

    tracing::debug!(%family, faces = db.len(), "using installed font");
    Some(FontFace::Loaded {
        db: Arc::new(db),
        family,
    })
}

// ============================================================================
// Rasterization
// ============================================================================

/// Draws `text` with its top edge centered on `anchor`.
///
/// Loaded faces that fail to produce any outlines degrade to the built-in face.
pub(crate) fn draw_text(
    canvas: &mut Canvas,
    text: &str,
    font: &FontHandle,
    anchor: Point2D,
    color: Color,
) {
    if let FontFace::Loaded { db, family } = &font.face {
        if draw_svg_text(canvas, text, db, family, font.size, anchor, color) {
            return;
        }
        tracing::debug!(%family, "falling back to the built-in face for {text:?}");
    }
    draw_builtin_text(canvas, text, font.size, anchor, color);
}

fn draw_svg_text(
    canvas: &mut Canvas,
    text: &str,
    db: &Arc<fontdb::Database>,
    family: &str,
    size: f32,
    anchor: Point2D,
    color: Color,
) -> bool {
    let svg = text_svg(text, family, size, anchor, color, canvas.size());

    let mut opts = Options::default();
    opts.fontdb = Arc::clone(db);
    let Ok(tree) = Tree::from_str(&svg, &opts) else {
        return false;
    };
    if tree.root().children().is_empty() {
        return false;
    }

    resvg::render(&tree, Transform::identity(), &mut canvas.pixmap_mut().as_mut());
    true
}

/// Builds a canvas-sized SVG document holding a single centered text run.
fn text_svg(
    text: &str,
    family: &str,
    size: f32,
    anchor: Point2D,
    color: Color,
    canvas_size: u32,
) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}"><text x="{x}" y="{y}" font-family="{family}" font-size="{size}" font-weight="bold" text-anchor="middle" fill="{fill}" fill-opacity="{opacity}">{text}</text></svg>"#,
        s = canvas_size,
        x = anchor.x,
        y = anchor.y + size * ASCENT,
        family = escape_xml(family),
        size = size,
        fill = color.hex(),
        opacity = color.a as f32 / 255.0,
        text = escape_xml(text),
    )
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

// ============================================================================
// Built-in face
// ============================================================================

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
/// Horizontal advance in cells, including one cell of spacing.
const ADVANCE: u32 = GLYPH_COLS + 1;
/// Cells per em: seven glyph rows plus one of leading.
const CELLS_PER_EM: f32 = 8.0;

/// Width of `text` in pixels when drawn with the built-in face.
pub fn builtin_text_width(text: &str, size: f32) -> f32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0.0;
    }
    (count * ADVANCE - 1) as f32 * size / CELLS_PER_EM
}

fn draw_builtin_text(canvas: &mut Canvas, text: &str, size: f32, anchor: Point2D, color: Color) {
    let cell = size / CELLS_PER_EM;
    let left = anchor.x - builtin_text_width(text, size) / 2.0;

    let mut pb = PathBuilder::new();
    for (i, ch) in text.chars().enumerate() {
        let origin_x = left + (i as u32 * ADVANCE) as f32 * cell;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_COLS {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let x = origin_x + col as f32 * cell;
                let y = anchor.y + row as f32 * cell;
                if let Some(rect) = Rect::from_xywh(x, y, cell, cell) {
                    pb.push_rect(rect);
                }
            }
        }
    }

    if let Some(path) = pb.finish() {
        canvas.fill_path(&path, color);
    }
}

fn glyph(ch: char) -> [u8; GLYPH_ROWS as usize] {
    GLYPHS
        .iter()
        .find(|(c, _)| *c == ch)
        .or_else(|| GLYPHS.iter().find(|(c, _)| *c == '?'))
        .map(|(_, rows)| *rows)
        .unwrap_or_default()
}

/// 5x7 glyphs, one byte per row, most significant of the low five bits leftmost.
#[rustfmt::skip]
const GLYPHS: &[(char, [u8; 7])] = &[
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('?', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04]),
    ('-', [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C]),
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('B', [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F]),
    ('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('J', [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C]),
    ('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('M', [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11]),
    ('N', [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11]),
    ('O', [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('Q', [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    ('X', [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
    ('Y', [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04]),
    ('Z', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F]),
    ('a', [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F]),
    ('b', [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E]),
    ('c', [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E]),
    ('d', [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F]),
    ('e', [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E]),
    ('f', [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08]),
    ('g', [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E]),
    ('h', [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11]),
    ('i', [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E]),
    ('j', [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C]),
    ('k', [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12]),
    ('l', [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('m', [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11]),
    ('n', [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11]),
    ('o', [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E]),
    ('p', [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10]),
    ('q', [0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01]),
    ('r', [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10]),
    ('s', [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E]),
    ('t', [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06]),
    ('u', [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D]),
    ('v', [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('w', [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A]),
    ('x', [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11]),
    ('y', [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E]),
    ('z', [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F]),
];

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CYAN: Color = Color::rgb(0, 245, 255);

    #[test]
    fn builtin_only_never_touches_disk() {
        let provider = FontProvider::builtin_only();
        assert!(provider.candidates().is_empty());
        assert!(provider.load().is_builtin());
        assert_eq!(provider.resolve(24.0).size(), 24.0);
    }

    #[test]
    fn missing_candidates_fall_back_to_builtin() {
        let provider = FontProvider::with_candidates([
            "/definitely/not/here.ttf",
            "/also/missing/font.otf",
        ]);
        let handle = provider.resolve(32.0);
        assert!(handle.face().is_builtin());
    }

    #[test]
    fn only_the_default_provider_searches_installed_fonts() {
        assert!(FontProvider::default().system_lookup);
        assert!(!FontProvider::builtin_only().system_lookup);
        assert!(!FontProvider::with_candidates(["a.ttf"]).system_lookup);
    }

    #[test]
    fn loaded_face_without_outlines_draws_builtin() {
        let missing = FontFace::Loaded {
            db: Arc::new(fontdb::Database::new()),
            family: "Missing".into(),
        };
        let anchor = Point2D::new(64.0, 40.0);

        let mut loaded = Canvas::new(128).unwrap();
        loaded.draw_text("Ad", &missing.at_size(32.0), anchor, CYAN);
        let mut builtin = Canvas::new(128).unwrap();
        builtin.draw_text("Ad", &FontHandle::builtin(32.0), anchor, CYAN);

        let expected = builtin.to_rgba_image();
        assert!(expected.pixels().any(|p| p[3] > 0));
        assert_eq!(loaded.to_rgba_image(), expected);
    }

    #[test]
    fn installed_face_draws_below_anchor() {
        let face = FontProvider::default().load();
        if face.is_builtin() {
            // no usable font on this host
            return;
        }

        let mut canvas = Canvas::new(300).unwrap();
        canvas.draw_text("Ad", &face.at_size(96.0), Point2D::new(150.0, 100.0), CYAN);

        let img = canvas.to_rgba_image();
        let inked: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(_, y)| y >= 95), "ink above the anchor");

        let min_x = inked.iter().map(|&(x, _)| x).min().unwrap_or(0) as f32;
        let max_x = inked.iter().map(|&(x, _)| x).max().unwrap_or(0) as f32;
        assert!(((min_x + max_x) / 2.0 - 150.0).abs() < 12.0);
    }

    #[test]
    fn non_font_file_falls_back_to_builtin() {
        let provider = FontProvider::with_candidates([file!()]);
        assert!(provider.load().is_builtin());
    }

    #[test]
    fn handle_size_is_at_least_one_pixel() {
        assert_eq!(FontHandle::builtin(0.0).size(), 1.0);
    }

    #[test]
    fn builtin_width_counts_advances() {
        assert_eq!(builtin_text_width("", 16.0), 0.0);
        // one glyph: five cells of two pixels
        assert_eq!(builtin_text_width("A", 16.0), 10.0);
        // "Ad": 2 * 6 - 1 cells
        assert_eq!(builtin_text_width("Ad", 16.0), 22.0);
    }

    #[test]
    fn unknown_characters_render_as_question_mark() {
        assert_eq!(glyph('~'), glyph('?'));
        assert_ne!(glyph('A'), glyph('?'));
    }

    #[test]
    fn builtin_text_is_centered_on_anchor() {
        let mut canvas = Canvas::new(64).unwrap();
        let font = FontHandle::builtin(16.0);
        canvas.draw_text("I", &font, Point2D::new(32.0, 10.0), CYAN);

        // "I" has a three-cell top bar and a one-cell stem in the middle column
        assert_eq!(canvas.pixel(32, 11), Some(CYAN));
        assert_eq!(canvas.pixel(32, 20), Some(CYAN));
        assert_eq!(canvas.pixel(28, 20), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(32, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn text_svg_escapes_markup() {
        let svg = text_svg("A&<B>", "Sans \"Bold\"", 20.0, Point2D::new(50.0, 10.0), CYAN, 100);
        assert!(svg.contains("A&amp;&lt;B&gt;"));
        assert!(svg.contains("Sans &quot;Bold&quot;"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"y="26""#));
        assert!(svg.contains("#00f5ff"));
    }
}
