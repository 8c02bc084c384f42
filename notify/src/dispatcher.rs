//! Notifying about a set of URLs

use crate::{notifier::Notifier, report::DispatchReport};
use futures::stream::{self, StreamExt};
use notify_common::{
    progress::{Progress, ProgressBar},
    sender::{self, provider::TokenProvider},
};
use rand::seq::SliceRandom;

/// The order URLs are dispatched in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Order {
    /// Keep the order of the sitemap
    Stable,
    /// Shuffle the URLs for each run
    ///
    /// When the quota is too small for all URLs, repeated runs will eventually cover all of them,
    /// instead of always starving the tail of the list.
    #[default]
    Shuffled,
}

/// Options for the [`Dispatcher`]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchOptions {
    /// The maximum number of notifications in flight. Zero is treated as one.
    pub concurrency: usize,
    pub order: Order,
    /// The maximum number of URLs to dispatch, after ordering.
    pub limit: Option<usize>,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 5,
            order: Order::default(),
            limit: None,
        }
    }
}

impl DispatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: impl Into<Option<usize>>) -> Self {
        self.limit = limit.into();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to refresh credentials: {0}")]
    Credentials(#[from] sender::Error),
}

/// Runs the [`Notifier`] for every URL, with bounded concurrency.
pub struct Dispatcher<P: Progress = ()> {
    notifier: Notifier,
    options: DispatchOptions,
    progress: P,
}

impl Dispatcher<()> {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            options: Default::default(),
            progress: (),
        }
    }
}

impl<P: Progress> Dispatcher<P> {
    pub fn with_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress<P2: Progress>(self, progress: P2) -> Dispatcher<P2> {
        Dispatcher {
            notifier: self.notifier,
            options: self.options,
            progress,
        }
    }

    /// Notify about all URLs, recording exactly one outcome per dispatched URL.
    ///
    /// Failing notifications don't abort the run. The only error is failing to refresh the
    /// credential, which happens once, before the first notification.
    pub async fn dispatch(
        &self,
        mut urls: Vec<String>,
        credential: &dyn TokenProvider,
    ) -> Result<DispatchReport, DispatchError> {
        let mut report = DispatchReport::new(urls.len());

        if urls.is_empty() {
            log::info!("No URLs to notify");
            return Ok(report);
        }

        if !credential.is_valid() {
            log::info!("Refreshing credentials");
            credential.refresh().await?;
        }

        if self.options.order == Order::Shuffled {
            urls.shuffle(&mut rand::rng());
        }

        if let Some(limit) = self.options.limit {
            if urls.len() > limit {
                log::info!("Limiting to {limit} of {} URLs", urls.len());
                report.skipped = urls.len() - limit;
                urls.truncate(limit);
            }
        }

        let concurrency = self.options.concurrency.max(1);
        log::info!(
            "Notifying about {} URLs, {concurrency} at a time",
            urls.len()
        );

        let mut progress = self.progress.start(urls.len());

        let notifier = &self.notifier;
        let mut outcomes = stream::iter(urls)
            .map(move |url| async move {
                let outcome = notifier.notify(&url, credential).await;
                (url, outcome)
            })
            .buffer_unordered(concurrency);

        while let Some((url, outcome)) = outcomes.next().await {
            log::trace!("{url}: {outcome}");
            report.record(&outcome);
            progress.tick().await;
        }

        progress.finish().await;

        Ok(report)
    }
}
