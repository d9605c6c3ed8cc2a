//! Command-line interface

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use jointkit_engine::{generate_by_id, Severity, TemplateId};
use jointkit_settings::{default_config_path, Config};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "jointkit",
    about = "Laser-cut box and mechanism generator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a cut drawing for a template.
    Generate(GenerateArgs),

    /// List the template library.
    Templates {
        /// Config whose policy decides maturity
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a config file with default values, or print it.
    Config {
        /// Destination (.toml or .json); stdout when omitted
        #[arg(long)]
        write: Option<PathBuf>,

        /// Print the default config location and exit
        #[arg(long)]
        path: bool,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Template id, e.g. tray_open_front
    #[arg(short, long)]
    pub template: String,

    /// Flat JSON params object
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// SVG destination
    #[arg(short, long)]
    pub out: PathBuf,

    /// Config file; the default location is used when it exists
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write findings as JSON
    #[arg(long)]
    pub findings: Option<PathBuf>,

    /// Write metadata as JSON
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Write the drawing even when blocking errors were found
    #[arg(long)]
    pub force: bool,
}

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Blocking findings were reported
    Blocked,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Blocked => ExitCode::from(2),
        }
    }
}

pub fn run(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Templates { config } => {
            let config = Config::load_or_default(config.as_deref())?;
            for id in TemplateId::ALL {
                println!(
                    "{:<16} {:<13} {}",
                    id.as_str(),
                    config.policy.maturity(id).to_string(),
                    id.description()
                );
            }
            Ok(Outcome::Success)
        }
        Commands::Config { write, path } => {
            if path {
                println!("{}", default_config_path()?.display());
                return Ok(Outcome::Success);
            }
            match write {
                Some(dest) => {
                    Config::default()
                        .save_to_file(&dest)
                        .with_context(|| format!("writing {}", dest.display()))?;
                    info!("Wrote default config to {}", dest.display());
                }
                None => print!("{}", toml::to_string_pretty(&Config::default())?),
            }
            Ok(Outcome::Success)
        }
    }
}

pub fn run_generate(args: &GenerateArgs) -> Result<Outcome> {
    let config = Config::load_or_default(args.config.as_deref())?;

    let overrides = match &args.params {
        Some(path) => Some(
            fs::read_to_string(path).with_context(|| format!("reading params {}", path.display()))?,
        ),
        None => None,
    };
    let params = config.merge_params(overrides.as_deref())?;

    let generation = generate_by_id(&args.template, &params, &config.policy)?;

    for finding in &generation.findings {
        match finding.severity {
            Severity::Error | Severity::Warn => eprintln!("{finding}"),
            Severity::Info => println!("{finding}"),
        }
    }

    if let Some(path) = &args.findings {
        write_file(path, &serde_json::to_string_pretty(&generation.findings)?)?;
    }
    if let Some(path) = &args.metadata {
        write_file(path, &generation.metadata.to_json_pretty()?)?;
    }

    let blocked = generation.has_blocking_errors();
    if blocked && !args.force {
        warn!("Blocking errors found; {} not written", args.out.display());
        return Ok(Outcome::Blocked);
    }
    write_file(&args.out, &generation.drawing)?;
    info!("Wrote {}", args.out.display());

    Ok(if blocked {
        Outcome::Blocked
    } else {
        Outcome::Success
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("empty output path");
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
