use std::sync::Arc;

use barrage_core::TracingSink;

use crate::cli::Cli;
use crate::logging;
use crate::run_error::RunError;

pub async fn run(cli: Cli) -> Result<(), RunError> {
    let cfg = cli
        .config()
        .map_err(|err| RunError::InvalidInput(err.into()))?;

    logging::init(cfg.verbose).map_err(RunError::RuntimeError)?;

    barrage_core::run(cfg, Arc::new(TracingSink))
        .await
        .map_err(|err| {
            RunError::RuntimeError(anyhow::Error::new(err).context("load test failed"))
        })?;

    Ok(())
}
