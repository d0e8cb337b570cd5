mod batch;
mod gate;

pub use batch::{BatchOrchestrator, RunOutcome};
