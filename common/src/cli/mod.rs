//! Command line helpers
pub mod client;
pub mod log;
pub mod runner;

/// Defaults a command provides to the command line setup.
pub trait CommandDefaults {
    /// Whether to show a progress bar, unless overridden by the user.
    fn progress(&self) -> bool {
        true
    }
}
