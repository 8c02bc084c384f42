use super::{Progress, ProgressBar};
use indicatif::{MultiProgress, ProgressStyle};

const TEMPLATE: &str = "{wide_bar} {pos}/{len} ({eta})";

/// Progress bars, rendered in a shared [`MultiProgress`].
#[derive(Clone, Debug)]
pub struct MultiIndicatif(pub MultiProgress);

impl Progress for MultiIndicatif {
    type Instance = IndicatifProgressBar;

    fn start(&self, work: usize) -> Self::Instance {
        let bar = indicatif::ProgressBar::new(work.try_into().unwrap_or(u64::MAX));
        if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
            bar.set_style(style);
        }
        IndicatifProgressBar(self.0.add(bar))
    }
}

pub struct IndicatifProgressBar(indicatif::ProgressBar);

impl ProgressBar for IndicatifProgressBar {
    async fn tick(&mut self) {
        self.0.inc(1);
    }

    async fn finish(self) {
        self.0.finish_and_clear();
    }
}
