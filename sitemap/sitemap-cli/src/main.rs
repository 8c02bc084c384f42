#![forbid(unsafe_code)]

mod cmd;

use clap::Parser;
use cmd::{discover::Discover, notify::Notify};
use notify_common::{
    cli::{CommandDefaults, log::Logging},
    progress::Progress,
    utils::measure::MeasureTime,
};
use std::{ops::Deref, process::ExitCode};

#[derive(Debug, Parser)]
#[command(version, about = "Sitemap indexing notifier", author, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    logging: Logging,
}

#[allow(clippy::large_enum_variant)]
#[derive(clap::Subcommand, Debug)]
enum Command {
    Discover(Discover),
    Notify(Notify),
}

impl Deref for Command {
    type Target = dyn CommandDefaults;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Discover(cmd) => cmd,
            Self::Notify(cmd) => cmd,
        }
    }
}

impl Command {
    pub async fn run<P: Progress>(self, progress: P) -> anyhow::Result<()> {
        match self {
            Self::Discover(cmd) => cmd.run().await,
            Self::Notify(cmd) => cmd.run(progress).await,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let progress = self.logging.init(
            &["sitemap_notify", "sitemap_walker", "indexing_notifier"],
            self.command.progress(),
        );

        // run

        log::debug!("Setup complete, start processing");

        let time = MeasureTime::new();
        self.command.run(progress).await?;
        drop(time);

        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = Cli::parse().run().await {
        log::error!("Failed to execute: {err}");
        for (n, cause) in err.chain().enumerate().skip(1) {
            log::info!("  {n}: {cause}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
