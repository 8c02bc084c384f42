//! Measuring the time of operations

use std::time::{Duration, Instant};

/// Logs the time elapsed since its creation, once dropped.
pub struct MeasureTime(Instant);

impl MeasureTime {
    pub fn new() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

impl Default for MeasureTime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MeasureTime {
    fn drop(&mut self) {
        // truncate to milliseconds, good enough
        let duration = Duration::from_millis(self.elapsed().as_millis() as u64);
        log::info!("Processing took {}", humantime::format_duration(duration));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn elapsed() {
        let time = MeasureTime::new();
        std::thread::sleep(Duration::from_millis(10));
        assert!(time.elapsed() >= Duration::from_millis(10));
    }
}
