//! Job-redirect polling.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use dynect_core::{ApiResponse, Error, RequestParams, Result};

use crate::client::Client;
use crate::wait::{PollError, poll_until};

impl Client {
    /// Follow a `307` job redirect to the path in its `Location` header.
    pub(crate) async fn follow_job_redirect(
        &self,
        response: ApiResponse,
        expects: &BTreeSet<u16>,
    ) -> Result<ApiResponse> {
        let location = response
            .header("Location")
            .ok_or_else(|| Error::malformed("job redirect without Location header"))?
            .to_string();
        self.poll_job(location, response.job_id(), expects).await
    }

    /// Poll a job location until its status leaves `incomplete` or the
    /// polling budget elapses.
    ///
    /// Each poll is a full dispatch, so a token expiring mid-poll is
    /// re-minted by that poll's own recovery boundary.
    #[instrument(skip(self, job_id, expects))]
    pub(crate) async fn poll_job(
        &self,
        location: String,
        job_id: Option<String>,
        expects: &BTreeSet<u16>,
    ) -> Result<ApiResponse> {
        let budget = self.config().job_poll_timeout;
        let interval = self.config().job_poll_interval;
        debug!(?budget, ?interval, "polling job");

        let outcome = poll_until(budget, interval, || {
            let poll = RequestParams::get(&location)
                .expects(expects.iter().copied())
                .idempotent();
            let request = self.request_boxed(poll);
            async move {
                let response = request.await?;
                let done = !response.is_incomplete();
                Ok((response, done))
            }
        })
        .await;

        match outcome {
            Ok(response) => Ok(response),
            Err(PollError::Attempt(err)) => Err(err),
            Err(PollError::Expired { last, elapsed }) => {
                let still_incomplete = last.as_ref().map_or(true, |r| r.is_incomplete());
                if still_incomplete {
                    let job_id = last
                        .as_ref()
                        .and_then(|r| r.job_id())
                        .or(job_id)
                        .unwrap_or_else(|| trailing_segment(&location).to_string());
                    Err(Error::JobIncomplete { job_id })
                } else {
                    // The job went terminal in the same instant the budget
                    // ran out; report the timeout rather than guessing.
                    Err(Error::PollTimeout { elapsed })
                }
            }
        }
    }
}

/// Job id embedded in a job location path.
fn trailing_segment(location: &str) -> &str {
    location.rsplit('/').next().unwrap_or(location)
}
