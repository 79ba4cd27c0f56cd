//! Step combinators used by the teardown pipeline.
//!
//! None of these retry. A failed step is either reported, logged and
//! skipped, or swallowed, depending on which combinator runs it.

use tracing::debug;

use crate::provider::BackendError;
use crate::teardown::types::{DeletionStep, TeardownResult};

/// Run one step; on success record its label, on failure log and move on.
///
/// Returns whether the step succeeded.
pub fn run_best_effort(step: DeletionStep<'_>, result: &mut TeardownResult) -> bool {
    let label = step.label;
    let class = step.class;

    match step.run() {
        Ok(()) => {
            debug!(
                event = "core.teardown.step_deleted",
                resource = label,
                class = ?class
            );
            result.record(label);
            true
        }
        Err(e) => {
            debug!(
                event = "core.teardown.step_failed_continue",
                resource = label,
                class = ?class,
                error = %e,
                "continue despite error"
            );
            false
        }
    }
}

/// Run steps in order until one succeeds. Steps after the first success are
/// never invoked.
///
/// Returns the label of the step that succeeded, or `None` when every step
/// failed. Exhausting the chain is not an error.
pub fn run_fallback_chain(
    steps: Vec<DeletionStep<'_>>,
    result: &mut TeardownResult,
) -> Option<&'static str> {
    for step in steps {
        let label = step.label;
        if run_best_effort(step, result) {
            return Some(label);
        }
    }

    debug!(
        event = "core.teardown.fallback_chain_exhausted",
        cluster = result.cluster.name()
    );
    None
}

/// Run every step regardless of the others' outcome.
pub fn run_all_best_effort(steps: Vec<DeletionStep<'_>>, result: &mut TeardownResult) {
    for step in steps {
        run_best_effort(step, result);
    }
}

/// Run a cleanup whose outcome is never reported or recorded.
pub fn run_swallowed(label: &str, action: impl FnOnce() -> Result<(), BackendError>) {
    match action() {
        Ok(()) => {
            debug!(event = "core.teardown.side_cleanup_completed", resource = label);
        }
        Err(e) => {
            debug!(
                event = "core.teardown.side_cleanup_failed",
                resource = label,
                error = %e
            );
        }
    }
}
