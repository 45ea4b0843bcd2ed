use factcheck_config::Config;
use factcheck_store::ArtifactKind;
use factcheck_verify::BatchReport;

use crate::pipeline::Pipeline;

/// Strategy for running the full fact-checking pipeline.
#[derive(Debug, Clone, Copy)]
pub struct CheckStrategy;

impl super::CommandStrategy for CheckStrategy {
    type Input = Config;

    async fn execute(&self, config: Self::Input) -> anyhow::Result<()> {
        let gateway = super::wikipedia_gateway(&config)?;
        let pipeline = Pipeline::new(config)?;
        let predictions = pipeline.predictions(&gateway).await?;
        let report = BatchReport::from_predictions(&predictions);

        println!(
            "{} predictions written to {}",
            report.total,
            pipeline.store().path(ArtifactKind::Predictions).display()
        );
        println!("  Predicted true: {}", report.predicted_true);
        match report.accuracy() {
            Some(accuracy) => println!(
                "  Accuracy: {}/{} ({accuracy:.4})",
                report.correct, report.labelled
            ),
            None => println!("  Accuracy: n/a (no labelled claims)"),
        }
        Ok(())
    }
}
