use crate::progress::indicatif::MultiIndicatif;
use env_logger::Builder;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::LevelFilter;
use std::io::Write;

#[derive(Clone, Debug, clap::Args)]
#[command(next_help_heading = "Logging")]
pub struct Logging {
    /// Be quiet. Conflicts with 'verbose'.
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    /// Be more verbose. May be repeated multiple times to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Add timestamps to the output messages
    #[arg(long, global = true)]
    pub log_timestamps: bool,

    /// Disable the progress bar
    #[arg(long, global = true, conflicts_with = "progress")]
    pub no_progress: bool,

    /// Enable the progress bar
    #[arg(long, global = true)]
    pub progress: bool,

    /// Provide a RUST_LOG filter, conflicts with --verbose and --quiet
    #[arg(long, global = true, conflicts_with_all(["verbose", "quiet"]), env("RUST_LOG"))]
    pub log: Option<String>,
}

/// Log levels for a verbosity, as `(everything, application modules)`.
fn levels(quiet: bool, verbose: u8) -> (LevelFilter, LevelFilter) {
    if quiet {
        return (LevelFilter::Off, LevelFilter::Off);
    }

    match verbose {
        0 => (LevelFilter::Warn, LevelFilter::Warn),
        1 => (LevelFilter::Warn, LevelFilter::Info),
        2 => (LevelFilter::Warn, LevelFilter::Debug),
        3 => (LevelFilter::Info, LevelFilter::Debug),
        4 => (LevelFilter::Debug, LevelFilter::Debug),
        5 => (LevelFilter::Debug, LevelFilter::Trace),
        _ => (LevelFilter::Trace, LevelFilter::Trace),
    }
}

impl Logging {
    /// Whether to show a progress bar, the flags override the default of the command.
    fn show_progress(&self, default_progress: bool) -> bool {
        if self.quiet || self.no_progress {
            false
        } else {
            self.progress || default_progress
        }
    }

    /// Initialize logging, and the progress bar if one is requested.
    ///
    /// `app_modules` get the increased verbosity, in addition to this crate.
    pub fn init(
        self,
        app_modules: &[&'static str],
        default_progress: bool,
    ) -> Option<MultiIndicatif> {
        let show_progress = self.show_progress(default_progress);
        let mut builder = Builder::new();

        if let Some(filter) = &self.log {
            builder.parse_filters(filter);
        } else {
            if !self.log_timestamps {
                builder.format(|buf, record| writeln!(buf, "{}", record.args()));
            }

            let (level, app_level) = levels(self.quiet, self.verbose);
            builder.filter_level(level);
            if app_level != level {
                builder.filter_module("notify_common", app_level);
                for module in app_modules {
                    builder.filter_module(module, app_level);
                }
            }
        }

        if !show_progress {
            builder.init();
            return None;
        }

        let logger = builder.build();
        let max_level = logger.filter();
        let multi = MultiProgress::new();
        // NOTE: LogWrapper::try_init messes up the log levels
        let _ = log::set_boxed_logger(Box::new(LogWrapper::new(multi.clone(), logger)));
        log::set_max_level(max_level);

        Some(MultiIndicatif(multi))
    }
}
