//! Clap derive structures for the `vigil` CLI.
//!
//! Defines the complete command tree, global flags, and shared enums.
//! This module depends only on clap + clap_complete so the build script
//! can include it for man page generation.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vigil -- operations console for monitored security sites
#[derive(Debug, Parser)]
#[command(
    name = "vigil",
    version,
    about = "Operate a fleet of monitored security sites",
    long_about = "An operations console for a fleet of monitored security sites.\n\n\
        Each invocation seeds an in-memory fleet from your configuration,\n\
        applies the requested operations, and renders the outcome. Pass\n\
        --seed for a reproducible fleet.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', env = "VIGIL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Number of sites to seed (overrides config)
    #[arg(long, env = "VIGIL_FLEET_SIZE", global = true)]
    pub fleet_size: Option<u32>,

    /// Seed for a reproducible fleet (overrides config)
    #[arg(long, env = "VIGIL_SEED", global = true)]
    pub seed: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect and control monitored sites
    #[command(alias = "s")]
    Sites(SitesArgs),

    /// View the event journal
    #[command(alias = "ev")]
    Events(EventsArgs),

    /// Fleet summary and active alerts
    #[command(alias = "st")]
    Status,

    /// Run the alarm simulator against the fleet
    #[command(alias = "sim")]
    Simulate(SimulateArgs),

    /// Stream live events and alerts until interrupted
    Watch,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites in the fleet
    #[command(alias = "ls")]
    List {
        /// Only show sites in this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one site in detail
    Get {
        /// Site id
        site: u32,
    },

    /// Apply an arbitrary status to a site
    Set {
        /// Site id
        site: u32,

        /// Target status (guarded, not_guarded, emergency, alarm, suspended)
        status: String,

        /// Record the change as client-initiated
        #[arg(long)]
        as_client: bool,
    },

    /// Arm a site (status: guarded)
    Arm {
        /// Site id
        site: u32,

        /// Record the change as client-initiated
        #[arg(long)]
        as_client: bool,
    },

    /// Disarm a site (status: not_guarded)
    Disarm {
        /// Site id
        site: u32,

        /// Record the change as client-initiated
        #[arg(long)]
        as_client: bool,
    },

    /// Suspend a site (no event is journaled)
    Suspend {
        /// Site id
        site: u32,
    },

    /// Apply one status to many sites, reporting per-site results
    Bulk {
        /// Target status
        status: String,

        /// Site ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u32>,

        /// Record the changes as client-initiated
        #[arg(long)]
        as_client: bool,
    },

    /// Update a site's battery reading
    Battery {
        /// Site id
        site: u32,

        /// Battery percentage (values over 100 are clamped)
        percent: u8,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EVENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List journal entries, newest first
    #[command(alias = "ls")]
    List {
        /// Max results
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SIMULATE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Seconds between injected alarms (defaults to the configured period)
    #[arg(long, short = 'p')]
    pub period: Option<u64>,

    /// Stop after this many events (default: run until Ctrl-C)
    #[arg(long, short = 'n')]
    pub count: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a default config file
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
