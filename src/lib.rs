pub mod config;
pub mod loader;
pub mod logging;
pub mod model;
pub mod search;
pub mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use config::{ExplorerConfig, RecordPolicy};
use loader::{DataLoader, LoadError};
use model::DocIndex;
use ui::{OutputFormat, SessionError};

/// Exit code when the documentation source cannot be used.
pub const EXIT_SOURCE_UNAVAILABLE: u8 = 2;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "docs-explorer",
    version,
    about = "Search a remote documentation index by title and print direct links"
)]
pub struct Cli {
    /// URL of the JSON index feed
    #[arg(long, global = true)]
    pub source_url: Option<String>,

    /// Prefix joined with each entry's path to build its link
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Reject the whole index if any record lacks a title or path
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Emit JSON instead of markdown links
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Debug logging and detailed error output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every entry in the index
    List,
    /// Print entries whose title contains QUERY (case-insensitive)
    Search {
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
    /// Prompt for queries and re-filter the loaded index after each one
    Interactive,
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn explorer_config(&self) -> ExplorerConfig {
        let mut cfg = ExplorerConfig::from_env();
        if let Some(url) = &self.source_url {
            cfg.source_url = url.clone();
        }
        if let Some(url) = &self.base_url {
            cfg.base_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            cfg.request_timeout = Duration::from_secs(secs);
        }
        if self.strict {
            cfg.record_policy = RecordPolicy::Strict;
        }
        cfg
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// The source could not be loaded; the user-facing message was already printed.
#[derive(thiserror::Error, Debug)]
#[error("documentation source unavailable")]
pub struct SourceUnavailable(#[source] pub LoadError);

/// Map an error returned by [`run`] to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<SourceUnavailable>().is_some() {
        EXIT_SOURCE_UNAVAILABLE
    } else {
        1
    }
}

pub async fn run() -> Result<()> {
    run_with(Cli::parse()).await
}

pub async fn run_with(cli: Cli) -> Result<()> {
    let format = cli.output_format();
    let verbose = cli.verbose;

    match cli.command {
        Commands::List => {
            let loader = DataLoader::new(cli.explorer_config())?;
            let index = load_or_report(&loader, format, verbose).await?;
            print_results(&index, "", format)
        }
        Commands::Search { ref query } => {
            let loader = DataLoader::new(cli.explorer_config())?;
            let index = load_or_report(&loader, format, verbose).await?;
            print_results(&index, query, format)
        }
        Commands::Interactive => {
            let loader = DataLoader::new(cli.explorer_config())?;
            let mut prompt = ui::interactive::stdin_prompt();
            let mut out = std::io::stdout();
            match ui::run_session(&loader, prompt.as_mut(), &mut out, format, verbose).await {
                Ok(()) => Ok(()),
                Err(SessionError::Load(err)) => Err(SourceUnavailable(err).into()),
                Err(SessionError::Io(err)) => Err(err.into()),
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "docs-explorer", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

async fn load_or_report(
    loader: &DataLoader,
    format: OutputFormat,
    verbose: bool,
) -> Result<Arc<DocIndex>> {
    match loader.load().await {
        Ok(index) => Ok(index),
        Err(err) => {
            match format {
                OutputFormat::Json => {
                    ui::write_load_error(&mut std::io::stdout(), &err, verbose, format)?
                }
                OutputFormat::Human => {
                    ui::write_load_error(&mut std::io::stderr(), &err, verbose, format)?
                }
            }
            Err(SourceUnavailable(err).into())
        }
    }
}

fn print_results(index: &DocIndex, query: &str, format: OutputFormat) -> Result<()> {
    let results = search::filter(index, query);
    let mut out = std::io::stdout().lock();
    ui::write_results(&mut out, &results, format)?;
    out.flush()?;
    Ok(())
}
