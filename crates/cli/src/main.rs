// listcheck CLI - do-not-contact screening and duplicate detection for
// company lists exported as CSV

mod dnc;
mod duplicates;
mod exit_codes;
mod files;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use listcheck_match::MatchError;
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "listcheck")]
#[command(about = "Screen company lists against a do-not-contact list and find duplicates")]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG applies otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Matching config (TOML); built-in defaults apply when omitted
    #[arg(long, global = true, env = "LISTCHECK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flag contacts whose company appears on a do-not-contact list
    #[command(after_help = "\
Examples:
  listcheck dnc
  listcheck dnc --contacts leads.csv --exclusions blocked.csv --output leads_checked.csv
  listcheck --config strict.toml dnc --json")]
    Dnc {
        /// Contacts to screen
        #[arg(long, default_value = "contacts.csv")]
        contacts: PathBuf,

        /// Companies that must not be contacted
        #[arg(long, default_value = "do_not_contact.csv")]
        exclusions: PathBuf,

        /// Where to write the annotated contacts
        #[arg(long, default_value = "contacts_checked.csv")]
        output: PathBuf,

        /// Print the run summary as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Flag likely duplicate companies in a HubSpot export
    #[command(after_help = "\
Examples:
  listcheck duplicates
  listcheck duplicates -i export.csv -o export_flagged.csv
  listcheck -v duplicates --json")]
    Duplicates {
        /// HubSpot companies export
        #[arg(long, short = 'i', default_value = "hubspot_companies.csv")]
        input: PathBuf,

        /// Where to write the annotated companies; the summary report is
        /// written next to it as <stem>_summary.txt
        #[arg(long, short = 'o', default_value = "hubspot_companies_with_duplicates.csv")]
        output: PathBuf,

        /// Print the run summary as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a matching config without running
    #[command(after_help = "\
Examples:
  listcheck validate-config listcheck.toml")]
    ValidateConfig {
        /// Path to the TOML config
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Dnc {
            contacts,
            exclusions,
            output,
            json,
        } => dnc::cmd_dnc(cli.config, contacts, exclusions, output, json),
        Commands::Duplicates {
            input,
            output,
            json,
        } => duplicates::cmd_duplicates(cli.config, input, output, json),
        Commands::ValidateConfig { file } => cmd_validate_config(file),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Log records from the engine go to stderr. `-v` flags win over RUST_LOG.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Map an engine error to its exit code.
    pub fn matching(err: MatchError) -> Self {
        match err {
            MatchError::Csv { .. } => Self::general(err.to_string()),
            MatchError::MissingColumn { .. } => Self::config(err.to_string())
                .with_hint("map your headers with a [*.columns] table in --config"),
            MatchError::ConfigParse(_) | MatchError::ConfigValidation(_) => {
                Self::config(err.to_string())
            }
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// validate-config
// ============================================================================

fn cmd_validate_config(path: PathBuf) -> Result<(), CliError> {
    let config = files::load_config(Some(&path))?;
    eprintln!(
        "{}: ok (dnc match {} / review {}, duplicate tiers {}/{}/{})",
        path.display(),
        config.dnc.match_threshold,
        config.dnc.review_threshold,
        config.duplicates.high,
        config.duplicates.medium,
        config.duplicates.low,
    );
    Ok(())
}
