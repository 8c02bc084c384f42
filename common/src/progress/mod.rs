//! Progress reporting

use std::future::Future;

pub mod indicatif;

/// Something able to report progress on a batch of work.
pub trait Progress {
    type Instance: ProgressBar;

    fn start(&self, work: usize) -> Self::Instance;
}

pub trait ProgressBar {
    /// One unit of work is done.
    fn tick(&mut self) -> impl Future<Output = ()>;

    fn finish(self) -> impl Future<Output = ()>;
}

impl Progress for () {
    type Instance = ();

    fn start(&self, _work: usize) -> Self::Instance {}
}

impl ProgressBar for () {
    async fn tick(&mut self) {}

    async fn finish(self) {}
}

impl<P: Progress> Progress for Option<P> {
    type Instance = Option<P::Instance>;

    fn start(&self, work: usize) -> Self::Instance {
        self.as_ref().map(|progress| progress.start(work))
    }
}

impl<P: ProgressBar> ProgressBar for Option<P> {
    async fn tick(&mut self) {
        if let Some(bar) = self {
            bar.tick().await;
        }
    }

    async fn finish(self) {
        if let Some(bar) = self {
            bar.finish().await;
        }
    }
}
