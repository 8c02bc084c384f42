#![deny(clippy::unwrap_used)]

pub mod compression;
pub mod fetcher;
pub mod progress;
pub mod sender;
pub mod utils;

#[cfg(feature = "cli")]
pub mod cli;
