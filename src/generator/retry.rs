//! Bounded retry helper for best-effort upstream lookups.
//!
//! Policy is deliberately simple: a fixed attempt count and a fixed
//! inter-attempt delay. Per-call timeouts live on the HTTP client.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Fixed retry policy: how many attempts, and how long to pause between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

/// Run `operation` until it yields a value or the attempt budget runs out.
///
/// `Ok(None)` counts as a miss and `Err(_)` is logged and swallowed; both
/// consume one attempt. Returns `None` once all attempts are spent.
pub async fn retry_until_some<T, E, F, Fut>(policy: RetryPolicy, mut operation: F) -> Option<T>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    for attempt in 1..=policy.attempts {
        match operation().await {
            Ok(Some(value)) => {
                debug!(attempt, "Lookup succeeded");
                return Some(value);
            }
            Ok(None) => {
                debug!(attempt, "Lookup returned nothing usable");
            }
            Err(e) => {
                debug!(attempt, error = %e, "Lookup failed");
            }
        }

        if attempt < policy.attempts && !policy.delay.is_zero() {
            sleep(policy.delay).await;
        }
    }

    None
}
