//! CLI argument parsing using clap.
//!
//! Contains the Cli struct, Commands enum, and the shared input flags.

use clap::{
    Args, Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::config::Settings;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

const AFTER_HELP: &str = "\
Quick Start:
  $ symdoc init
  $ symdoc render --module Ably --graph-dir build/graphs \\
        --secondary build/objc-symbols.json \\
        --umbrella-header Source/include/Ably/AblyInternal.h \\
        -o Docs/markdown-api-reference/api.md
  $ symdoc members ARTRealtimeChannel --module Ably --graph-dir build/graphs \\
        --secondary build/objc-symbols.json";

/// Symbol-graph API reference generator
#[derive(Parser, Debug)]
#[command(
    name = "symdoc",
    version = env!("CARGO_PKG_VERSION"),
    about = "Merge compiler symbol graphs into a Markdown API reference",
    long_about = "Merge primary and header symbol graphs, filter internal and opted-out \
                  declarations, and render a deterministic Markdown API reference.",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show detailed loading information
    #[arg(long, global = true)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up .symdoc/settings.toml in the current directory
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// Render the Markdown API reference
    Render {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output file (overrides config)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print run statistics as a JSON envelope
        #[arg(long)]
        json: bool,
    },

    /// Show the documented members of a type, including inherited ones
    Members {
        /// Type title or precise identifier
        symbol: String,

        #[command(flatten)]
        inputs: InputArgs,

        /// Print members as a JSON envelope
        #[arg(long)]
        json: bool,
    },
}

/// Input selection shared by `render` and `members`. Each flag overrides the
/// matching `[inputs]` setting.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Module being documented
    #[arg(short, long, value_name = "NAME")]
    pub module: Option<String>,

    /// Primary symbol graph (repeatable, loaded in order)
    #[arg(long = "primary", value_name = "FILE")]
    pub primary: Vec<PathBuf>,

    /// Directory holding <module>*.symbols.json files
    #[arg(long, value_name = "DIR")]
    pub graph_dir: Option<PathBuf>,

    /// Header symbol graph carrying documentation comments
    #[arg(long, value_name = "FILE")]
    pub secondary: Option<PathBuf>,

    /// Umbrella header listing internal-only headers
    #[arg(long, value_name = "FILE")]
    pub umbrella_header: Option<PathBuf>,
}

impl InputArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(module) = &self.module {
            settings.module_name = module.clone();
        }
        if !self.primary.is_empty() {
            settings.inputs.primary = self.primary.clone();
        }
        if let Some(dir) = &self.graph_dir {
            settings.inputs.graph_dir = Some(dir.clone());
            // An explicit directory wins over files listed in the config.
            if self.primary.is_empty() {
                settings.inputs.primary.clear();
            }
        }
        if let Some(path) = &self.secondary {
            settings.inputs.secondary = Some(path.clone());
        }
        if let Some(path) = &self.umbrella_header {
            settings.inputs.umbrella_header = Some(path.clone());
        }
    }
}
