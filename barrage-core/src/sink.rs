use std::sync::Mutex;

use tracing::Level;

/// Line-oriented destination for everything a run prints.
pub trait LogSink: Send + Sync {
    fn info(&self, line: &str);
    fn debug(&self, line: &str);
}

/// Forwards lines to the `tracing` subscriber installed by the host process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, line: &str) {
        tracing::info!("{line}");
    }

    fn debug(&self, line: &str) {
        tracing::debug!("{line}");
    }
}

/// Keeps lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn lines_at(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line)
            .collect()
    }

    fn push(&self, level: Level, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((level, line.to_string()));
    }
}

impl LogSink for MemorySink {
    fn info(&self, line: &str) {
        self.push(Level::INFO, line);
    }

    fn debug(&self, line: &str) {
        self.push(Level::DEBUG, line);
    }
}
