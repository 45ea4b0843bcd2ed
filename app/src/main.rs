#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;
mod pipeline;

use clap::{Parser, Subcommand};
use command::{
    CategorizeStrategy, CheckStrategy, CommandStrategy, InfoInput, InfoStrategy, InitStrategy,
    MatchStrategy, StructureStrategy, VersionStrategy,
};
use factcheck_config::Config;
use factcheck_core::FactSet;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "factcheck")]
#[command(about = "Unsupervised relation discovery and claim verification against Wikipedia")]
#[command(long_about = None)]
struct Cli {
    /// Config file (defaults to ~/factcheck/config.json)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the corpus TSV files
    #[arg(short = 'i', long, global = true)]
    input_dir: Option<PathBuf>,

    /// Directory for cached artifacts
    #[arg(short = 'o', long, global = true)]
    output_dir: Option<PathBuf>,

    /// Corpus split: training or test
    #[arg(short = 'f', long, global = true)]
    fact_set: Option<FactSet>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show effective configuration and cached artifacts
    Info,
    /// Show version
    Version,
    /// Discover relation categories in the corpus
    Categorize,
    /// Split claims into entity, category and related entity
    Structure,
    /// Resolve claim entities to Wikipedia pages
    Match,
    /// Verify every claim and report accuracy
    Check,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(dir) = &self.input_dir {
            config.corpus.input_dir.clone_from(dir);
        }
        if let Some(dir) = &self.output_dir {
            config.corpus.output_dir.clone_from(dir);
        }
        if let Some(fact_set) = self.fact_set {
            config.corpus.fact_set = fact_set;
        }
        info!(
            "Fact set {} from {}",
            config.corpus.fact_set,
            config.corpus.input_dir.display()
        );
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Info => {
            let config = cli.load_config()?;
            InfoStrategy
                .execute(InfoInput {
                    config,
                    config_path: cli.config.clone(),
                })
                .await
        }
        Commands::Categorize => CategorizeStrategy.execute(cli.load_config()?).await,
        Commands::Structure => StructureStrategy.execute(cli.load_config()?).await,
        Commands::Match => MatchStrategy.execute(cli.load_config()?).await,
        Commands::Check => CheckStrategy.execute(cli.load_config()?).await,
    }
}
