//! # Card Studio CLI
//!
//! Command-line driver for `card-core`.
//!
//! ## Usage
//!
//! ```bash
//! card-studio templates
//! card-studio new --template bold --name "Ada Lovelace" --email ada@example.com
//! card-studio new --logo logo.png --no-glass
//! card-studio replay edits.json --pretty
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `load_config` - File config plus flag/env overrides
//! - `run` - Executes a command and renders its output

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::Context;
use card_core::{CardDetails, Editor, EditorConfig, ImagePayload, Operation, TemplateRegistry};
use clap::{Args, Parser, Subcommand};

/// Command-line arguments for card-studio.
#[derive(Debug, Clone, Parser)]
#[command(name = "card-studio")]
#[command(about = "Build and edit card designs from the command line")]
#[command(version)]
pub struct CliArgs {
    /// Editor config file (JSON)
    #[arg(long, global = true, env = "CARD_STUDIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum undo snapshots (0 = unbounded); overrides the config file
    #[arg(long, global = true, env = "CARD_STUDIO_HISTORY_DEPTH")]
    pub history_depth: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the built-in templates
    Templates,

    /// Instantiate a template with contact details and print the canvas
    New {
        /// Template id (defaults to the configured default template)
        #[arg(long, short)]
        template: Option<String>,

        /// Contact details
        #[command(flatten)]
        details: DetailsArgs,
    },

    /// Apply a JSON array of operations to a fresh session
    Replay {
        /// Path to the operation script
        script: PathBuf,
    },
}

/// Contact details for the business-card templates. Unset fields keep the
/// sample values.
#[derive(Debug, Clone, Default, Args)]
pub struct DetailsArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,
    /// Job title
    #[arg(long)]
    pub title: Option<String>,
    /// Company
    #[arg(long)]
    pub company: Option<String>,
    /// Email address
    #[arg(long)]
    pub email: Option<String>,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Website
    #[arg(long)]
    pub website: Option<String>,
    /// Postal address
    #[arg(long)]
    pub address: Option<String>,
    /// Logo image file (PNG, JPEG, GIF, WebP or SVG)
    #[arg(long)]
    pub logo: Option<PathBuf>,
    /// Leave out the frosted-glass overlay
    #[arg(long)]
    pub no_glass: bool,
}

impl TryFrom<DetailsArgs> for CardDetails {
    type Error = anyhow::Error;

    fn try_from(args: DetailsArgs) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let logo = match &args.logo {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read logo {}", path.display()))?;
                let payload = ImagePayload::from_bytes(&bytes)
                    .with_context(|| format!("Unsupported logo {}", path.display()))?;
                tracing::debug!(format = ?payload.format, "Loaded logo");
                Some(payload.data_uri)
            }
            None => None,
        };
        Ok(Self {
            full_name: args.name.unwrap_or(defaults.full_name),
            job_title: args.title.unwrap_or(defaults.job_title),
            company: args.company.unwrap_or(defaults.company),
            email: args.email.unwrap_or(defaults.email),
            phone: args.phone.unwrap_or(defaults.phone),
            website: args.website.unwrap_or(defaults.website),
            address: args.address.unwrap_or(defaults.address),
            logo,
            glass: !args.no_glass,
        })
    }
}

/// Build the editor config: defaults, then the config file, then flags.
///
/// # Errors
///
/// Returns an error if the config file can't be read or is invalid.
pub fn load_config(args: &CliArgs) -> anyhow::Result<EditorConfig> {
    let mut config = match &args.config {
        Some(path) => EditorConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EditorConfig::default(),
    };
    if let Some(depth) = args.history_depth {
        config.history_depth = depth;
    }
    Ok(config)
}

/// Execute the parsed command and return what should be printed.
///
/// # Errors
///
/// Returns an error if configuration, the logo file, template lookup or the
/// replay script fails.
pub fn run(args: CliArgs) -> anyhow::Result<String> {
    let config = load_config(&args)?;
    let pretty = args.pretty;

    match args.command {
        Command::Templates => Ok(list_templates(TemplateRegistry::builtin())),
        Command::New { template, details } => {
            let details = CardDetails::try_from(details)?;
            let mut config = config;
            if let Some(template) = template {
                config.default_template = template;
            }
            tracing::info!(template = %config.default_template, "Instantiating template");
            let editor = Editor::with_registry(config, TemplateRegistry::with_details(&details))?;
            let output = serde_json::json!({
                "state": editor.state(),
                "export": editor.export_request(Some(&details.full_name)),
            });
            render(&output, pretty)
        }
        Command::Replay { script } => {
            let json = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let operations = Operation::parse_script(&json)
                .with_context(|| format!("Invalid operation script {}", script.display()))?;
            let mut editor = Editor::new(config)?;
            replay(&mut editor, operations)?;
            let output = serde_json::json!({
                "state": editor.state(),
                "history": {
                    "len": editor.history().len(),
                    "index": editor.history().index(),
                },
            });
            render(&output, pretty)
        }
    }
}

/// Apply `operations` in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the failing operation's position and error.
pub fn replay(editor: &mut Editor, operations: Vec<Operation>) -> anyhow::Result<()> {
    let total = operations.len();
    for (i, op) in operations.into_iter().enumerate() {
        tracing::debug!("Replaying operation {}/{}: {:?}", i + 1, total, op);
        editor
            .apply(op)
            .with_context(|| format!("Operation {} of {} failed", i + 1, total))?;
    }
    tracing::info!("Replayed {} operations", total);
    Ok(())
}

fn list_templates(registry: &TemplateRegistry) -> String {
    registry
        .iter()
        .map(|t| {
            let category = serde_json::to_value(t.category)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            format!("{:<10} {:<10} {}", t.id, t.name, category)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(value: &serde_json::Value, pretty: bool) -> anyhow::Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}
