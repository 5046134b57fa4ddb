//! Bounded error recovery.

use std::future::Future;

/// Run `attempt`; if it fails with an error `recoverable` accepts, run
/// `recover` and retry exactly once.
///
/// Any other error, and any error from the retried attempt, propagates
/// unchanged.  The single-retry bound is structural: there is no loop to
/// mis-count.
pub(crate) async fn recover_once<T, E, F, Fut, P, R>(
    mut attempt: F,
    recoverable: P,
    recover: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    R: FnOnce(),
{
    match attempt().await {
        Ok(value) => Ok(value),
        Err(err) if recoverable(&err) => {
            recover();
            attempt().await
        }
        Err(err) => Err(err),
    }
}
