//! adrig-icongen - renders the AdRig icon set into PNG files
//!
//! With no arguments, writes the brand icon set into `assets/icon`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use adrig_icongen::{ExportPlan, FontProvider, IconComposer, Result};

#[derive(Parser)]
#[command(name = "adrig-icongen")]
#[command(about = "Procedural AdRig brand icon generator")]
struct Cli {
    /// Directory the icons are written into (must exist)
    #[arg(short, long, default_value = adrig_icongen::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Which design fills the canonical file names
    #[arg(short, long, value_enum, default_value_t = Mode::Brand)]
    mode: Mode,

    /// Read the export plan from a JSON file instead
    #[arg(short, long, conflicts_with_all = ["out_dir", "mode"])]
    plan: Option<PathBuf>,

    /// Print the plan as JSON and exit without rendering
    #[arg(long)]
    print_plan: bool,

    /// Skip system fonts and draw text with the built-in face
    #[arg(long)]
    builtin_font: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Shield, helix and glowing "Ad"/"Rig" text
    Brand,
    /// Gradient "Ad Rig" wordmark only
    Simple,
}

fn run(cli: Cli) -> Result<()> {
    let plan = match (&cli.plan, cli.mode) {
        (Some(path), _) => ExportPlan::from_file(path)?,
        (None, Mode::Brand) => ExportPlan::brand(&cli.out_dir),
        (None, Mode::Simple) => ExportPlan::simple_text(&cli.out_dir),
    };

    if cli.print_plan {
        println!("{}", plan.to_json_pretty()?);
        return Ok(());
    }

    let fonts = if cli.builtin_font {
        FontProvider::builtin_only()
    } else {
        FontProvider::default()
    };

    let written = plan.export(&IconComposer::new(fonts))?;
    tracing::info!(count = written.len(), out_dir = %plan.out_dir.display(), "icon set generated");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
