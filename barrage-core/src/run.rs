use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::executor::HttpExecutor;
use crate::report::Report;
use crate::runner::BatchOrchestrator;
use crate::sink::LogSink;

/// Runs a full load test against the configured target and emits the report to `sink`.
pub async fn run(cfg: Config, sink: Arc<dyn LogSink>) -> Result<Report> {
    cfg.validate()?;
    let cfg = Arc::new(cfg);

    let executor = Arc::new(HttpExecutor::new(&cfg, sink.clone()));
    sink.info(&format!(
        "Starting load test against {} with {} connections for {}s",
        executor.url(),
        cfg.connections,
        cfg.duration.as_secs()
    ));

    let out = BatchOrchestrator::new(cfg.clone(), executor, sink.clone())
        .run()
        .await?;

    let report = Report::from_outcomes(&out.outcomes, out.elapsed)?;
    report.emit(sink.as_ref(), cfg.verbose);

    Ok(report)
}
