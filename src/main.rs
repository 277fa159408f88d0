use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use comment_eval::commands;

// ============ CLI ============
#[derive(Parser)]
#[command(name = "comment-eval")]
#[command(version)]
#[command(about = "Evaluation tooling for code-comment generation models")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Writes a default evaluation config
    InitConfig {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value = "eval_output")]
        output_dir: String,
        #[arg(long, default_value = "16")]
        batch_size: usize,
    },

    /// Loads an evaluation set and prints decoded references
    Inspect {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        vocab: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::InitConfig {
            output,
            output_dir,
            batch_size,
        } => commands::init_config::execute(&output, &output_dir, batch_size),
        Commands::Inspect {
            data,
            vocab,
            config,
            limit,
        } => commands::inspect::execute(&data, &vocab, config.as_deref(), limit),
    };

    if let Err(err) = result {
        tracing::error!("{}", err);
        process::exit(1);
    }
}
