mod analyze;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pulso-cli")]
#[command(about = "Pulso campaign analysis from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one analysis and print the JSON response to stdout
    Analyze {
        /// Target municipality or city (defaults to PULSO_DEFAULT_LOCATION)
        #[arg(long)]
        location: Option<String>,
        /// Candidate named in the speech
        #[arg(long)]
        candidate_name: Option<String>,
        /// Restrict searches to posts mentioning this politician
        #[arg(long)]
        politician: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the PND concepts and their search keywords
    Concepts,
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            location,
            candidate_name,
            politician,
            pretty,
        } => {
            let config = pulso_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let request = pulso_report::AnalysisRequest {
                location,
                candidate_name,
                politician,
            };
            analyze::run_analyze(&config, request, pretty).await?;
        }
        Commands::Concepts => {
            init_tracing("warn")?;
            print!("{}", analyze::concept_listing());
        }
    }

    Ok(())
}
