use crate::fetcher::FetcherOptions;

#[derive(Debug, clap::Parser)]
#[command(next_help_heading = "Client")]
pub struct ClientArguments {
    /// Timeout for retrieving the sitemap, in humantime duration format.
    #[arg(short, long, env = "SITEMAP_TIMEOUT", default_value = "15s")]
    pub timeout: humantime::Duration,

    /// Number of retries when retrieving the sitemap fails.
    #[arg(short, long, env = "SITEMAP_RETRIES", default_value = "0")]
    pub retries: usize,
}

impl From<ClientArguments> for FetcherOptions {
    fn from(value: ClientArguments) -> Self {
        FetcherOptions::new()
            .timeout(value.timeout)
            .retries(value.retries)
    }
}
