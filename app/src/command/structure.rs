use factcheck_config::Config;
use factcheck_store::ArtifactKind;
use std::collections::BTreeMap;

use crate::pipeline::Pipeline;

/// Strategy for splitting the corpus into structured claims.
#[derive(Debug, Clone, Copy)]
pub struct StructureStrategy;

impl super::CommandStrategy for StructureStrategy {
    type Input = Config;

    async fn execute(&self, config: Self::Input) -> anyhow::Result<()> {
        let pipeline = Pipeline::new(config)?;
        let processed = pipeline.processed()?;

        let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
        for claim in &processed.claims {
            *per_category.entry(claim.category.as_str()).or_default() += 1;
        }

        println!(
            "{} claims written to {}",
            processed.claims.len(),
            pipeline.store().path(ArtifactKind::Processed).display()
        );
        for (category, count) in per_category {
            println!("  {category}: {count}");
        }
        Ok(())
    }
}
