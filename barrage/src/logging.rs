use std::fmt::Write as _;
use std::io::IsTerminal as _;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};

/// `[2024-01-31 12:00:00]`
struct BracketedLocalTime(ChronoLocal);

impl FormatTime for BracketedLocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        w.write_char('[')?;
        self.0.format_time(w)?;
        w.write_char(']')
    }
}

fn filter_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,barrage={level},barrage_core={level}")
}

/// Installs the process-wide line logger on stdout.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directives(verbose)))
        .with_timer(BracketedLocalTime(ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S".to_string(),
        )))
        .with_target(false)
        .with_level(false)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(std::io::stdout)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))
}
