use anyhow::Context;
use factcheck_core::{FactSet, SynonymTable, default_lexicon};
use factcheck_extraction::CategorizerConfig;
use factcheck_gateway::GatewayConfig;
use factcheck_verify::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub extraction: CategorizerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub verification: VerifierConfig,
    /// Entries replacing whole categories of the built-in synonym lexicon.
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorpusConfig {
    /// Directory holding `<fact_set>.tsv`
    #[serde(default = "CorpusConfig::default_input_dir")]
    pub input_dir: PathBuf,
    /// Directory for cached artifacts
    #[serde(default = "CorpusConfig::default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub fact_set: FactSet,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            input_dir: Self::default_input_dir(),
            output_dir: Self::default_output_dir(),
            fact_set: FactSet::default(),
        }
    }
}

impl CorpusConfig {
    fn default_input_dir() -> PathBuf {
        PathBuf::from("dataset")
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from("output")
    }
}

impl Config {
    /// Load from `path`, or from `~/factcheck/config.json` when no path is
    /// given. A missing default file falls back to built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found at: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let default_path = Self::default_path()?;
                if !default_path.exists() {
                    info!(
                        "No config file at {}, using defaults. Run 'factcheck init' to create one.",
                        default_path.display()
                    );
                    return Ok(Self::default());
                }
                default_path
            }
        };

        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Built-in lexicon with the configured overrides applied.
    #[must_use]
    pub fn synonym_table(&self) -> SynonymTable {
        default_lexicon().merged(&self.synonyms)
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("factcheck"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, Self::template())?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Point corpus.input_dir at the directory holding training.tsv / test.tsv");
        println!("   2. Run 'factcheck categorize' to inspect the discovered categories");
        println!("   3. Run 'factcheck check' to verify the claims");
        println!();
        println!("🔧 Configuration options:");
        println!("   - corpus.fact_set: training (labelled) or test");
        println!(
            "   - extraction.promotion_threshold: pooled frequency needed for two-word categories"
        );
        println!("   - gateway.retry_delays: seconds between retries of failed requests");
        println!("   - verification.concurrency: claims checked at once");
        println!("   - synonyms: per-category surface forms replacing the built-in lexicon entry");
        println!();
        Ok(())
    }

    const fn template() -> &'static str {
        r#"{
  "corpus": {
    "input_dir": "dataset",
    "output_dir": "output",
    "fact_set": "training"
  },
  "extraction": {
    "promotion_threshold": 140,
    "min_pool_frequency": 12
  },
  "gateway": {
    "base_url": "https://en.wikipedia.org",
    "timeout": 10,
    "max_size": 5000000,
    "retry_delays": [],
    "page_cache_capacity": 256
  },
  "verification": {
    "concurrency": 1
  },
  "synonyms": {}
}"#
    }
}
