//! Export plans: which variants are written where, and at which sizes.
//!
//! An [`ExportPlan`] is plain data and round-trips through JSON, so a plan can
//! be stored next to the assets it produces and replayed later.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "outDir": "assets/icon",
//!   "masterSize": 1024,
//!   "targets": [
//!     { "variant": "main", "fileName": "adrig_icon.png", "size": 1024 },
//!     { "variant": "foreground", "fileName": "adrig_icon_foreground.png", "size": 1024 }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::composer::{IconComposer, IconVariant};
use crate::error::{Error, Result};
use crate::icon::IconSet;
use crate::motif::MASTER_SIZE;

/// Launcher sizes derived from the main master.
pub const DERIVED_SIZES: [u32; 7] = [16, 32, 48, 64, 128, 256, 512];

/// Directory the default plan writes into.
pub const DEFAULT_OUT_DIR: &str = "assets/icon";

/// One file to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTarget {
    pub variant: IconVariant,
    /// File name relative to the plan's output directory.
    pub file_name: String,
    /// Edge length in pixels.
    pub size: u32,
}

impl ExportTarget {
    /// Creates a target writing `variant` at `size` pixels into `file_name`.
    pub fn new(variant: IconVariant, file_name: impl Into<String>, size: u32) -> Self {
        Self {
            variant,
            file_name: file_name.into(),
            size,
        }
    }
}

fn default_master_size() -> u32 {
    MASTER_SIZE
}

/// A list of targets written into one directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlan {
    pub out_dir: PathBuf,

    /// Size every variant is rendered at before resampling to its targets.
    #[serde(default = "default_master_size")]
    pub master_size: u32,

    #[serde(default)]
    pub targets: Vec<ExportTarget>,
}

impl Default for ExportPlan {
    fn default() -> Self {
        Self::brand(DEFAULT_OUT_DIR)
    }
}

impl ExportPlan {
    /// A plan with no targets.
    pub fn empty(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            master_size: MASTER_SIZE,
            targets: Vec::new(),
        }
    }

    /// The shield icon set: main and foreground masters plus the launcher sizes.
    pub fn brand(out_dir: impl Into<PathBuf>) -> Self {
        Self::canonical(out_dir, IconVariant::Main, IconVariant::Foreground)
    }

    /// The canonical file names filled with the simple text wordmark.
    pub fn simple_text(out_dir: impl Into<PathBuf>) -> Self {
        Self::canonical(out_dir, IconVariant::SimpleText, IconVariant::SimpleText)
    }

    fn canonical(out_dir: impl Into<PathBuf>, main: IconVariant, foreground: IconVariant) -> Self {
        let mut plan = Self::empty(out_dir)
            .with_target(ExportTarget::new(main, "adrig_icon.png", MASTER_SIZE))
            .with_target(ExportTarget::new(
                foreground,
                "adrig_icon_foreground.png",
                MASTER_SIZE,
            ));
        for size in DERIVED_SIZES {
            plan = plan.with_target(ExportTarget::new(main, format!("adrig_icon_{size}.png"), size));
        }
        plan
    }

    /// Appends a target.
    pub fn with_target(mut self, target: ExportTarget) -> Self {
        self.targets.push(target);
        self
    }

    /// Full path of `target` inside the output directory.
    pub fn path_of(&self, target: &ExportTarget) -> PathBuf {
        self.out_dir.join(&target.file_name)
    }

    /// Renders and writes every target, returning the written paths in order.
    ///
    /// Each variant is composed once at the master size and resampled into an
    /// [`IconSet`] holding every size its targets ask for. The output
    /// directory must already exist.
    pub fn export(&self, composer: &IconComposer) -> Result<Vec<PathBuf>> {
        let sets = self.render_sets(composer)?;
        let mut written = Vec::with_capacity(self.targets.len());

        for target in &self.targets {
            let image = sets
                .get(&target.variant)
                .and_then(|set| set.find_by_size(target.size))
                .ok_or_else(|| {
                    Error::invalid("targets", format!("no rendering for {}", target.file_name))
                })?;

            let path = self.path_of(target);
            image.save(&path)?;
            tracing::info!(
                path = %path.display(),
                variant = %target.variant,
                size = image.size(),
                "wrote icon"
            );
            written.push(path);
        }

        Ok(written)
    }

    /// Composes one [`IconSet`] per variant named by the targets.
    fn render_sets(&self, composer: &IconComposer) -> Result<HashMap<IconVariant, IconSet>> {
        let mut sizes: Vec<(IconVariant, Vec<u32>)> = Vec::new();
        for target in &self.targets {
            match sizes.iter_mut().find(|(variant, _)| *variant == target.variant) {
                Some((_, list)) => list.push(target.size),
                None => sizes.push((target.variant, vec![target.size])),
            }
        }

        let mut sets = HashMap::with_capacity(sizes.len());
        for (variant, list) in sizes {
            let master = composer.compose(variant, self.master_size)?;
            let set = IconSet::derive(master, &list)?;
            tracing::debug!(%variant, images = set.len(), "rendered icon set");
            sets.insert(variant, set);
        }
        Ok(sets)
    }

    /// Serializes the plan to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the plan to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a plan from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON plan from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontProvider;

    fn composer() -> IconComposer {
        IconComposer::new(FontProvider::builtin_only())
    }

    #[test]
    fn brand_plan_lists_canonical_files() {
        let plan = ExportPlan::brand("out");
        let names: Vec<_> = plan.targets.iter().map(|t| t.file_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "adrig_icon.png",
                "adrig_icon_foreground.png",
                "adrig_icon_16.png",
                "adrig_icon_32.png",
                "adrig_icon_48.png",
                "adrig_icon_64.png",
                "adrig_icon_128.png",
                "adrig_icon_256.png",
                "adrig_icon_512.png",
            ]
        );
        assert_eq!(plan.targets[1].variant, IconVariant::Foreground);
        let main_targets = plan.targets.iter().filter(|t| t.variant == IconVariant::Main);
        assert_eq!(main_targets.count(), 8);
        assert_eq!(ExportPlan::default().out_dir, PathBuf::from("assets/icon"));
    }

    #[test]
    fn simple_text_plan_reuses_file_names() {
        let brand = ExportPlan::brand("out");
        let simple = ExportPlan::simple_text("out");
        assert_eq!(brand.targets.len(), simple.targets.len());
        for (a, b) in brand.targets.iter().zip(&simple.targets) {
            assert_eq!(a.file_name, b.file_name);
            assert_eq!(a.size, b.size);
            assert_eq!(b.variant, IconVariant::SimpleText);
        }
    }

    #[test]
    fn export_writes_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let plan = ExportPlan::brand(dir.path());

        let written = plan.export(&composer()).unwrap();
        assert_eq!(written.len(), plan.targets.len());

        for target in &plan.targets {
            let img = image::open(plan.path_of(target)).unwrap();
            assert_eq!(img.width(), target.size);
            assert_eq!(img.height(), target.size);
        }

        let main = image::open(dir.path().join("adrig_icon.png")).unwrap();
        assert_eq!(main.color(), image::ColorType::Rgb8);
        let fg = image::open(dir.path().join("adrig_icon_foreground.png")).unwrap();
        assert_eq!(fg.color(), image::ColorType::Rgba8);
    }

    #[test]
    fn each_variant_is_rendered_once_per_plan() {
        let mut plan = ExportPlan::empty("unused")
            .with_target(ExportTarget::new(IconVariant::Main, "a.png", 16))
            .with_target(ExportTarget::new(IconVariant::Main, "b.png", 64))
            .with_target(ExportTarget::new(IconVariant::Foreground, "c.png", 32));
        plan.master_size = 64;

        let sets = plan.render_sets(&composer()).unwrap();
        assert_eq!(sets.len(), 2);

        let main = &sets[&IconVariant::Main];
        let sizes: Vec<_> = main.images.iter().map(|img| img.size()).collect();
        assert_eq!(sizes, [64, 16]);
        assert_eq!(sets[&IconVariant::Foreground].len(), 2);
        assert!(!sets.contains_key(&IconVariant::SimpleText));
    }

    #[test]
    fn export_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let plan = ExportPlan::empty(&missing)
            .with_target(ExportTarget::new(IconVariant::Foreground, "fg.png", 32));

        let err = plan.export(&composer()).unwrap_err();
        match err {
            Error::Write { path, .. } => assert_eq!(path, missing.join("fg.png")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!missing.exists());
    }

    #[test]
    fn plan_serialization_roundtrip() {
        let plan = ExportPlan::simple_text("icons");
        let json = plan.to_json().unwrap();
        let restored = ExportPlan::from_json(&json).unwrap();
        assert_eq!(restored, plan);
    }

    #[test]
    fn plan_json_format() {
        let plan = ExportPlan::empty("icons")
            .with_target(ExportTarget::new(IconVariant::SimpleText, "wordmark.png", 64));
        let json = plan.to_json_pretty().unwrap();

        assert!(json.contains("\"outDir\""));
        assert!(json.contains("\"masterSize\""));
        assert!(json.contains("\"fileName\""));
        assert!(json.contains("\"simple-text\""));
    }

    #[test]
    fn minimal_plan_deserializes() {
        let plan = ExportPlan::from_json(r#"{ "outDir": "x" }"#).unwrap();
        assert_eq!(plan.master_size, 1024);
        assert!(plan.targets.is_empty());

        assert!(matches!(
            ExportPlan::from_json("{ not json"),
            Err(Error::Plan(_))
        ));
    }

    #[test]
    fn plan_file_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        assert!(matches!(
            ExportPlan::from_file(&path),
            Err(Error::Read { .. })
        ));

        fs::write(&path, ExportPlan::brand("out").to_json().unwrap()).unwrap();
        assert_eq!(ExportPlan::from_file(&path).unwrap(), ExportPlan::brand("out"));
    }
}
