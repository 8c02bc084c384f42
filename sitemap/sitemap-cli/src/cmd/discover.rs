use crate::cmd::DiscoverArguments;
use notify_common::cli::{CommandDefaults, client::ClientArguments};

/// Discover the URLs of a sitemap, just lists them.
#[derive(clap::Args, Debug)]
pub struct Discover {
    #[command(flatten)]
    pub client: ClientArguments,

    #[command(flatten)]
    pub discover: DiscoverArguments,
}

impl CommandDefaults for Discover {
    fn progress(&self) -> bool {
        false
    }
}

impl Discover {
    pub async fn run(self) -> anyhow::Result<()> {
        let walker = self.discover.into_walker(self.client).await?;

        for url in walker.walk().await? {
            println!("{url}");
        }

        Ok(())
    }
}
