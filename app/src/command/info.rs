use factcheck_config::Config;
use factcheck_store::ArtifactKind;
use std::path::PathBuf;

/// Input for [`InfoStrategy`]: the effective configuration and where it came from.
pub struct InfoInput {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

/// Strategy for displaying configuration information.
///
/// Outputs the effective configuration, whether the corpus file exists and
/// which pipeline artifacts are already cached.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = InfoInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let InfoInput {
            config,
            config_path,
        } = input;

        println!("=== factcheck Configuration ===\n");

        let source = match config_path {
            Some(path) => path,
            None => Config::default_path()?,
        };
        let status = if source.exists() { "" } else { " (not found, using defaults)" };
        println!("Config: {}{status}", source.display());
        println!();

        let corpus = &config.corpus;
        let corpus_file = corpus.input_dir.join(format!("{}.tsv", corpus.fact_set));
        println!("Corpus:");
        println!("  Fact Set: {}", corpus.fact_set);
        println!(
            "  File: {} ({})",
            corpus_file.display(),
            if corpus_file.is_file() { "found" } else { "missing" }
        );
        println!("  Output Dir: {}", corpus.output_dir.display());
        println!();

        println!("Extraction:");
        println!(
            "  Promotion Threshold: {}",
            config.extraction.promotion_threshold
        );
        println!(
            "  Min Pool Frequency: {}",
            config.extraction.min_pool_frequency
        );
        println!("  Stopwords: {}", config.extraction.stopwords.len());
        println!();

        println!("Gateway:");
        println!("  Base URL: {}", config.gateway.base_url);
        println!("  Timeout: {}s", config.gateway.timeout);
        println!("  Max Size: {} bytes", config.gateway.max_size);
        if config.gateway.retry_delays.is_empty() {
            println!("  Retries: none");
        } else {
            println!("  Retry Delays: {:?}s", config.gateway.retry_delays);
        }
        println!();

        println!("Verification:");
        println!("  Concurrency: {}", config.verification.concurrency);
        println!(
            "  Synonym Categories: {} ({} overridden)",
            config.synonym_table().len(),
            config.synonyms.len()
        );
        println!();

        println!("Artifacts:");
        for kind in ArtifactKind::ALL {
            let path = corpus.output_dir.join(kind.file_name(corpus.fact_set));
            let state = if path.is_file() { "cached" } else { "-" };
            println!("  {kind}: {state}");
        }

        Ok(())
    }
}
