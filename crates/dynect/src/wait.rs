//! Bounded polling primitive.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};

/// Why [`poll_until`] stopped without a completed value.
pub(crate) enum PollError<T, E> {
    /// The budget elapsed.  Carries the last observed value, if any.
    Expired { last: Option<T>, elapsed: Duration },
    /// An attempt itself failed.
    Attempt(E),
}

/// Repeatedly run `attempt` until it reports completion or `budget`
/// elapses.
///
/// Each attempt yields `(value, done)`.  The budget is measured from the
/// first attempt, and `interval` separates consecutive attempts.  At least
/// one attempt is always issued.
pub(crate) async fn poll_until<T, E, F, Fut>(
    budget: Duration,
    interval: Duration,
    mut attempt: F,
) -> Result<T, PollError<T, E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(T, bool), E>>,
{
    let started = Instant::now();
    let deadline = started + budget;
    let mut last = None;

    loop {
        let (value, done) = attempt().await.map_err(PollError::Attempt)?;
        if done {
            return Ok(value);
        }
        last = Some(value);

        if Instant::now() >= deadline {
            return Err(PollError::Expired {
                last,
                elapsed: started.elapsed(),
            });
        }
        sleep(interval).await;
    }
}
