//! CLI configuration — thin wrapper around `vigil_config` shared types.
//!
//! Re-exports the shared types and adds resolution that layers
//! `GlobalOpts` flag overrides on top of the file and environment.

use clap::ValueEnum;

use vigil_core::{EngineConfig, RandomSeeder, SiteEngine};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Re-exports from shared crate ────────────────────────────────────

pub use vigil_config::{Config, config_path, load_config_or_default, save_config};

// ── Resolved settings ───────────────────────────────────────────────

/// Everything a command handler needs, resolved once per invocation.
pub struct Settings {
    /// Engine tuning after flag overrides.
    pub engine: EngineConfig,
    /// Fixed seed, when a reproducible fleet was requested.
    pub seed: Option<u64>,
    /// Output format for rendered results.
    pub output: OutputFormat,
    /// Whether ANSI color is enabled for this invocation.
    pub use_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Resolve settings from the config file, environment, and CLI flags.
///
/// Flags win over the file; the file wins over built-in defaults.
pub fn resolve(global: &GlobalOpts) -> Result<Settings, CliError> {
    let cfg = load_config_or_default();

    let mut engine_settings = cfg.engine;
    if let Some(fleet_size) = global.fleet_size {
        engine_settings.fleet_size = fleet_size;
    }
    if let Some(seed) = global.seed {
        engine_settings.seed = Some(seed);
    }
    let engine = engine_settings.engine_config()?;

    let (output, color) = resolve_presentation(global, &cfg.defaults);
    let use_color = output::should_color(&color);

    Ok(Settings {
        engine,
        seed: engine_settings.seed,
        output,
        use_color,
        quiet: global.quiet,
    })
}

/// Resolve output format and color mode (flag > file > default).
///
/// File values are presentation preferences only; an unknown string
/// falls back to the default rather than failing the invocation.
pub fn resolve_presentation(
    global: &GlobalOpts,
    defaults: &vigil_config::Defaults,
) -> (OutputFormat, ColorMode) {
    let output = global.output.clone().unwrap_or_else(|| {
        OutputFormat::from_str(&defaults.output, true).unwrap_or(OutputFormat::Table)
    });
    let color = global
        .color
        .clone()
        .unwrap_or_else(|| ColorMode::from_str(&defaults.color, true).unwrap_or(ColorMode::Auto));
    (output, color)
}

/// Build a fleet engine per the resolved settings.
pub fn build_engine(settings: &Settings) -> SiteEngine {
    match settings.seed {
        Some(seed) => {
            SiteEngine::with_seeder(settings.engine.clone(), &mut RandomSeeder::seeded(seed))
        }
        None => SiteEngine::new(settings.engine.clone()),
    }
}
