//! Notifying an indexing service about the pages of a site
//!
//! ## Idea
//!
//! The [`notifier::Notifier`] performs a single notification call for a single URL, and reports
//! the result as a [`notifier::NotificationOutcome`]. Failing is a valid outcome, it is never
//! returned as an error.
//!
//! The [`dispatcher::Dispatcher`] runs the notifier for a whole set of URLs, with a bounded number
//! of concurrent calls, and aggregates the outcomes into a [`report::DispatchReport`].

#![deny(clippy::unwrap_used)]

pub mod dispatcher;
pub mod notifier;
pub mod report;

#[cfg(feature = "clap")]
mod clap;
#[cfg(feature = "clap")]
pub use self::clap::*;
