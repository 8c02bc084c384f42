use crate::cmd::DiscoverArguments;
use anyhow::Context;
use indexing_notifier::{
    CredentialArguments, DispatchArguments, NotifierArguments,
    dispatcher::{DispatchOptions, Dispatcher},
    report::DispatchReport,
};
use notify_common::{
    cli::{CommandDefaults, client::ClientArguments, runner::RunnerArguments},
    progress::Progress,
};

/// Notify the indexing service about all URLs of a sitemap.
#[derive(clap::Args, Debug)]
pub struct Notify {
    #[command(flatten)]
    pub client: ClientArguments,

    #[command(flatten)]
    pub runner: RunnerArguments,

    #[command(flatten)]
    pub discover: DiscoverArguments,

    #[command(flatten)]
    pub notifier: NotifierArguments,

    #[command(flatten)]
    pub credentials: CredentialArguments,

    #[command(flatten)]
    pub dispatch: DispatchArguments,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CommandDefaults for Notify {}

impl Notify {
    pub async fn run<P: Progress>(self, progress: P) -> anyhow::Result<()> {
        // everything which can fail must be set up before contacting the sitemap or the endpoint
        let credential = self
            .credentials
            .into_provider()
            .await
            .context("Failed to set up credentials")?;
        let notifier = self.notifier.into_notifier().await?;
        let walker = self.discover.into_walker(self.client).await?;

        let urls = match walker.walk().await {
            Ok(urls) => urls,
            Err(err) => {
                log::error!("Unable to retrieve sitemap: {err}");
                vec![]
            }
        };

        log::info!("Found {} URLs", urls.len());

        let report = match urls.is_empty() {
            true => DispatchReport::default(),
            false => {
                let options =
                    DispatchOptions::from(self.dispatch).concurrency(self.runner.workers);
                Dispatcher::new(notifier)
                    .with_options(options)
                    .with_progress(progress)
                    .dispatch(urls, credential.as_ref())
                    .await?
            }
        };

        // the progress bar is done, the report goes to stdout
        match self.json {
            true => println!("{}", serde_json::to_string_pretty(&report)?),
            false => println!("{report}"),
        }

        Ok(())
    }
}
