mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use calsheet_core::config::CalsheetConfig;
use calsheet_core::remote::Remote;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calsheet")]
#[command(about = "Export course calendar events to a spreadsheet and sync edits back")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the courses the provider can manage
    Courses,
    /// Export a course's events to a CSV spreadsheet
    Export {
        /// Course id (see `calsheet courses`)
        course: String,

        /// Where to write the CSV (defaults to <export_dir>/course_<id>_events.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Email the spreadsheet to this address once it is ready
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Sync an edited spreadsheet back to the course calendar
    Import {
        /// The edited CSV file
        file: PathBuf,

        /// Who to notify when the changes are committed (defaults to `email` from config)
        #[arg(short, long)]
        email: Option<String>,

        /// Course id, when the sheet's Course ID column can't be used
        #[arg(short, long)]
        course: Option<String>,

        /// Show the changes without committing them
        #[arg(long)]
        dry_run: bool,

        /// Print the update plan as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CalsheetConfig::load()?;
    let remote = Remote::from_config(&config);

    match cli.command {
        Commands::Courses => commands::courses::run(&remote).await,
        Commands::Export {
            course,
            output,
            email,
        } => {
            let output =
                output.unwrap_or_else(|| config.export_path().join(format!("course_{course}_events.csv")));
            commands::export::run(&remote, &course, &output, email.as_deref()).await
        }
        Commands::Import {
            file,
            email,
            course,
            dry_run,
            json,
        } => {
            let email = email.or_else(|| config.email.clone());
            let options = commands::import::ImportOptions {
                course: course.as_deref(),
                email: email.as_deref(),
                dry_run,
                json,
            };
            commands::import::run(&remote, &file, options).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
