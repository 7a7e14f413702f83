//! Polling of asynchronous money movements until they settle.

use crate::{EmbedlyClient, Error};
use async_trait::async_trait;
use chrono::Utc;
use retry_policies::{policies::ExponentialBackoff, RetryDecision, RetryPolicy};
use std::time::Duration;

/// Options to configure the behaviour of [`Pollable::poll_until`](crate::pollable::Pollable::poll_until).
///
/// The default is an exponential backoff between retries from 1 to 30 seconds for a total of 5 minutes,
/// never waiting less than one second between two polls.
#[derive(Debug)]
pub struct PollOptions<R: RetryPolicy> {
    retry_policy: R,
    min_interval: Duration,
}

impl Default for PollOptions<ExponentialBackoff> {
    fn default() -> Self {
        Self {
            retry_policy: ExponentialBackoff::builder()
                .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
                .build_with_total_retry_duration(Duration::from_secs(60 * 5)),
            min_interval: Duration::from_secs(1),
        }
    }
}

impl<R: RetryPolicy> PollOptions<R> {
    /// Sets a retry policy.
    pub fn with_retry_policy<T: RetryPolicy>(self, retry_policy: T) -> PollOptions<T> {
        PollOptions {
            retry_policy,
            min_interval: self.min_interval,
        }
    }

    /// Sets the minimum time to wait between two polls, regardless of the retry policy.
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }
}

/// Error returned from [`Pollable::poll_until`](crate::pollable::Pollable::poll_until).
#[derive(thiserror::Error, Debug)]
pub enum PollError {
    /// The retry policy gave up before the condition was met.
    #[error("Polling timeout")]
    Timeout,
    #[error(transparent)]
    Error(#[from] Error),
}

/// A transaction whose latest state can be fetched again from Embedly.
#[async_trait]
pub trait Pollable: private::Sealed {
    type Output: Send;

    /// Fetches the current state of this transaction once.
    async fn poll_once(&self, embedly: &EmbedlyClient) -> Result<Self::Output, Error>;

    /// Fetches the state of this transaction until `predicate` holds or the retry policy gives up.
    ///
    /// Errors returned while fetching stop the polling immediately.
    #[tracing::instrument(name = "Poll for updates", skip_all)]
    async fn poll_until<R, F>(
        &self,
        embedly: &EmbedlyClient,
        poll_options: PollOptions<R>,
        predicate: F,
    ) -> Result<Self::Output, PollError>
    where
        R: RetryPolicy + Send + Sync,
        F: for<'a> Fn(&'a Self::Output) -> bool + Send,
    {
        let mut attempt = 0;
        loop {
            let current = self.poll_once(embedly).await?;
            if predicate(&current) {
                return Ok(current);
            }

            let execute_after = match poll_options.retry_policy.should_retry(attempt) {
                RetryDecision::Retry { execute_after } => execute_after,
                RetryDecision::DoNotRetry => {
                    tracing::debug!(attempts = attempt + 1, "Giving up polling");
                    return Err(PollError::Timeout);
                }
            };

            let wait_time = poll_options
                .min_interval
                .max((execute_after - Utc::now()).to_std().unwrap_or_default());
            tracing::debug!(
                attempt,
                wait_secs = wait_time.as_secs_f64(),
                "Not settled yet, polling again later"
            );
            tokio::time::sleep(wait_time).await;

            attempt += 1;
        }
    }
}

/// A transaction that can reach a final state.
pub trait IsInTerminalState {
    /// Returns `true` if no further status change is expected.
    fn is_in_terminal_state(&self) -> bool;
}

/// A transaction that can be polled until it reaches a final state.
#[async_trait]
pub trait PollableUntilTerminalState: Pollable {
    async fn poll_until_terminal_state<R: RetryPolicy + Send + Sync>(
        &self,
        embedly: &EmbedlyClient,
        poll_options: PollOptions<R>,
    ) -> Result<Self::Output, PollError>;
}

#[async_trait]
impl<T> PollableUntilTerminalState for T
where
    T: Pollable + Send + Sync,
    <T as Pollable>::Output: IsInTerminalState,
{
    async fn poll_until_terminal_state<R: RetryPolicy + Send + Sync>(
        &self,
        embedly: &EmbedlyClient,
        poll_options: PollOptions<R>,
    ) -> Result<Self::Output, PollError> {
        self.poll_until(embedly, poll_options, Self::Output::is_in_terminal_state)
            .await
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for crate::apis::payouts::InterBankTransferResponse {}
    impl Sealed for crate::apis::payouts::PayoutTransaction {}
    impl Sealed for crate::apis::wallets::WalletTransferResponse {}
    impl Sealed for crate::apis::wallets::WalletTransferStatus {}

    #[cfg(test)]
    impl Sealed for super::tests::SettlingTransfer {}
}
