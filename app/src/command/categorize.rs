use factcheck_config::Config;

use crate::pipeline::Pipeline;

/// Strategy for discovering the category vocabulary of the corpus.
///
/// Prints every category and flags those the synonym lexicon does not cover,
/// since claims of such categories can never verify.
#[derive(Debug, Clone, Copy)]
pub struct CategorizeStrategy;

impl super::CommandStrategy for CategorizeStrategy {
    type Input = Config;

    async fn execute(&self, config: Self::Input) -> anyhow::Result<()> {
        let pipeline = Pipeline::new(config)?;
        let processed = pipeline.processed()?;
        let gaps = pipeline.synonym_gaps(&processed.categories);

        println!("Categories ({}):", processed.categories.len());
        for category in &processed.categories {
            let marker = if gaps.contains(&category.as_str()) {
                "  (no synonyms)"
            } else {
                ""
            };
            println!("  {category}{marker}");
        }
        Ok(())
    }
}
