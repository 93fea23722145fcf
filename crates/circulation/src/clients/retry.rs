//! Bounded retry for optimistic-lock conflicts.

use crate::error::CirculationError;
use std::future::Future;
use tracing::warn;

/// Total attempts, including the first, before a conflict is surfaced to the caller.
pub const MAX_CONFLICT_ATTEMPTS: u32 = 3;

/// Runs `attempt` until it succeeds, fails with anything but a conflict, or has
/// conflicted [`MAX_CONFLICT_ATTEMPTS`] times.
///
/// Each attempt must re-read the record it acts on, so a retry works from fresh state.
pub async fn with_conflict_retry<T, F, Fut>(
    operation: &'static str,
    mut attempt: F,
) -> Result<T, CirculationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CirculationError>>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt().await {
            Err(e) if e.is_conflict() && attempts < MAX_CONFLICT_ATTEMPTS => {
                warn!(operation, attempts, error = %e, "Conflict, retrying");
            }
            result => return result,
        }
    }
}
