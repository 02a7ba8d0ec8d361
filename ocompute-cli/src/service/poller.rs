//! Status poller
//!
//! Blocks a workflow until a remote resource reports a target status. A
//! single deadline, fixed when polling starts, bounds every refresh and
//! every pause; when it passes the wait is abandoned with
//! [`WorkflowError::Timeout`]. There is no retry and no backoff.

use ocompute_client::Refresh;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, warn};

use crate::error::WorkflowError;

/// Timing of a status poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Pause between two status checks
    pub interval: Duration,

    /// Overall time allowed for the target status to appear
    pub timeout: Duration,
}

/// Receives progress while a poll is running
pub trait PollObserver {
    /// The status differs from the one seen on the previous check
    fn status_changed(&mut self, status: &str);

    /// The status is the same non-target value as last time
    fn still_waiting(&mut self);

    /// The target status was observed
    fn reached(&mut self, status: &str);
}

/// Refresh `item` until its status equals `target`
///
/// # Errors
/// - [`WorkflowError::Timeout`] if the deadline passes first
/// - any error raised by `refresh`, unchanged
pub async fn wait_for_status<T, O>(
    item: &mut T,
    target: &str,
    settings: &PollSettings,
    observer: &mut O,
) -> Result<(), WorkflowError>
where
    T: Refresh + ?Sized,
    O: PollObserver + ?Sized,
{
    debug!(
        "Waiting up to {:?} for status '{}' (interval: {:?})",
        settings.timeout, target, settings.interval
    );

    let poll = poll_until(item, target, settings.interval, observer);
    let Some(deadline) = Instant::now().checked_add(settings.timeout) else {
        // beyond the clock's range; the wait is effectively unbounded
        return poll.await;
    };

    match time::timeout_at(deadline, poll).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                "Gave up waiting for status '{}' after {:?}",
                target, settings.timeout
            );
            Err(WorkflowError::Timeout {
                seconds: settings.timeout.as_secs(),
            })
        }
    }
}

async fn poll_until<T, O>(
    item: &mut T,
    target: &str,
    interval: Duration,
    observer: &mut O,
) -> Result<(), WorkflowError>
where
    T: Refresh + ?Sized,
    O: PollObserver + ?Sized,
{
    let mut last_status = String::new();

    loop {
        item.refresh().await?;
        let current = item.status();
        debug!("Current status: {}", current);

        if current == target {
            observer.reached(current);
            return Ok(());
        }

        if current == last_status {
            observer.still_waiting();
        } else {
            observer.status_changed(current);
            last_status = current.to_string();
        }

        time::sleep(interval).await;
    }
}
