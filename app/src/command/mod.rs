//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use factcheck_config::Config;
use factcheck_gateway::WikipediaGateway;

mod categorize;
mod check;
mod info;
mod init;
mod matching;
mod structure;
mod version;

pub use categorize::CategorizeStrategy;
pub use check::CheckStrategy;
pub use info::{InfoInput, InfoStrategy};
pub use init::InitStrategy;
pub use matching::MatchStrategy;
pub use structure::StructureStrategy;
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
///
/// Each strategy names its own input type, so parameters are passed without
/// runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

fn wikipedia_gateway(config: &Config) -> anyhow::Result<WikipediaGateway> {
    WikipediaGateway::new(config.gateway.clone())
}
