//! vocabquiz CLI — spreadsheet-driven vocabulary quizzes in the terminal.

use std::process;

use clap::{Parser, Subcommand};

mod capabilities;
mod commands;
mod quiz;

use commands::FeedArgs;

#[derive(Parser)]
#[command(name = "vocabquiz", version, about = "Vocabulary quizzes from a published spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz
    Play {
        /// Number of questions (default from config: 10)
        #[arg(long)]
        count: Option<String>,

        /// Topic to draw words from, or "all"
        #[arg(long)]
        topic: Option<String>,

        /// Never run the speech program
        #[arg(long)]
        no_speech: bool,

        #[command(flatten)]
        feed: FeedArgs,
    },

    /// List topics and how many words each has
    Topics {
        #[command(flatten)]
        feed: FeedArgs,
    },

    /// Check the vocabulary feed for problems
    Validate {
        #[command(flatten)]
        feed: FeedArgs,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vocabquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            count,
            topic,
            no_speech,
            feed,
        } => commands::play::execute(feed, count, topic, no_speech).await,
        Commands::Topics { feed } => commands::topics::execute(feed).await,
        Commands::Validate { feed } => commands::validate::execute(feed).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
