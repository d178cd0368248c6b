//! The trigger job contract.

use async_trait::async_trait;

use crescendo_core::result::AppResult;

/// A job run to completion on every firing of its schedule.
///
/// The scheduler guarantees that two runs of the same job never overlap;
/// distinct jobs may run concurrently. Jobs isolate per-recipient failures
/// internally and report them through the outcome counters.
#[async_trait]
pub trait TriggerJob: Send + Sync {
    /// Stable job name for logs.
    fn name(&self) -> &'static str;

    /// Execute one full run.
    async fn run(&self) -> AppResult<TriggerOutcome>;
}

/// Counters describing one trigger run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOutcome {
    /// Configs that were considered and found due.
    pub processed: usize,
    /// Messages actually dispatched.
    pub sent: usize,
    /// Configs whose processing failed; their siblings were unaffected.
    pub failed: usize,
}
