// curator CLI - correspondence appraisal runs against an export directory

mod commands;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

/// A command failure carrying its shell exit code.
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Parser)]
#[command(name = "curator")]
#[command(about = "Appraise, purge, and reconcile constituent-correspondence exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify records, write the appraisal logs, and delete appraised files
    #[command(after_help = "\
Examples:
  curator appraise ./export
  curator appraise ./export --out ./reports --dry-run
  curator appraise ./export --log-date 1999-06-01 --json")]
    Appraise {
        /// Export directory (tables plus a documents/ subtree)
        export_root: PathBuf,

        /// Directory for report files (defaults to the export directory)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Date stamp for the deletion audit log (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        log_date: Option<chrono::NaiveDate>,

        /// Plan and log everything, delete nothing
        #[arg(long)]
        dry_run: bool,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Reconcile metadata-declared paths against the document tree
    #[command(after_help = "\
Examples:
  curator reconcile ./export
  curator reconcile ./export --out ./reports --json")]
    Reconcile {
        /// Export directory (tables plus a documents/ subtree)
        export_root: PathBuf,

        /// Directory for report files (defaults to the export directory)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Copy constituent-facing documents into topic-named review folders
    #[command(after_help = "\
Examples:
  curator topics ./export
  curator topics ./export --out ./review")]
    Topics {
        /// Export directory (tables plus a documents/ subtree)
        export_root: PathBuf,

        /// Directory for the topic tree and reports (defaults to the export directory)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Appraise { export_root, out, log_date, dry_run, json } => {
            commands::cmd_appraise(export_root, out, log_date, dry_run, json)
        }
        Commands::Reconcile { export_root, out, json } => {
            commands::cmd_reconcile(export_root, out, json)
        }
        Commands::Topics { export_root, out, json } => {
            commands::cmd_topics(export_root, out, json)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}
