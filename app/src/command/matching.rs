use factcheck_config::Config;
use factcheck_store::ArtifactKind;

use crate::pipeline::Pipeline;

/// Strategy for resolving both info slots of every claim to a page.
#[derive(Debug, Clone, Copy)]
pub struct MatchStrategy;

impl super::CommandStrategy for MatchStrategy {
    type Input = Config;

    async fn execute(&self, config: Self::Input) -> anyhow::Result<()> {
        let gateway = super::wikipedia_gateway(&config)?;
        let pipeline = Pipeline::new(config)?;
        let matched = pipeline.matched(&gateway).await?;

        let entity_hits = matched.iter().filter(|m| m.entity_page.is_matched()).count();
        let related_hits = matched
            .iter()
            .filter(|m| m.related_page.is_matched())
            .count();

        println!(
            "{} claims matched, written to {}",
            matched.len(),
            pipeline.store().path(ArtifactKind::WikiMatch).display()
        );
        println!("  Entity pages: {entity_hits}/{}", matched.len());
        println!("  Related entity pages: {related_hits}/{}", matched.len());
        Ok(())
    }
}
