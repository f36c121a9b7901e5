//! quizscore CLI: serve the quiz API and score answer sets offline.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizscore", version, about = "Personality quiz scoring engine and API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Score an answers file offline
    Score {
        /// Course whose questions the answers belong to
        #[arg(long)]
        course: String,

        /// JSON array of answer values, one per question
        #[arg(long)]
        answers: PathBuf,

        /// Question bank JSON (defaults to the configured path)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Output format: json, table
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a question bank
    Validate {
        /// Question bank JSON (defaults to the configured path)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Register a list of emails with a running server
    UploadEmails {
        /// JSON array of emails (defaults to the configured path)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Server base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Emails per request
        #[arg(long)]
        batch_size: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show stored results
    Results {
        /// Record store JSON (defaults to the configured path)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample question bank
    Init,
}

fn env_filter() -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match "quizscore=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config, port } => commands::serve::execute(config, port).await,
        Commands::Score {
            course,
            answers,
            questions,
            format,
            config,
        } => commands::score::execute(course, answers, questions, format, config),
        Commands::Validate { questions, config } => commands::validate::execute(questions, config),
        Commands::UploadEmails {
            file,
            api_url,
            batch_size,
            config,
        } => commands::upload_emails::execute(file, api_url, batch_size, config).await,
        Commands::Results { store, config } => commands::results::execute(store, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
