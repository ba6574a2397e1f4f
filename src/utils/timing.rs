// file: src/utils/timing.rs
// description: wall-clock timing for a command run

use std::time::{Duration, Instant};
use tracing::{info, warn};

pub struct OperationTimer {
    operation: &'static str,
    start: Instant,
}

impl OperationTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    /// Logs the elapsed time, as a warning once it passes `slow_after`.
    pub fn finish(self, slow_after: Duration) -> Duration {
        let elapsed = self.start.elapsed();
        if elapsed > slow_after {
            warn!(
                "{} took {:.2}s, longer than {}s",
                self.operation,
                elapsed.as_secs_f64(),
                slow_after.as_secs()
            );
        } else {
            info!("{} finished in {:.2}s", self.operation, elapsed.as_secs_f64());
        }
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reports_elapsed() {
        let timer = OperationTimer::start("init");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.finish(Duration::from_secs(10)) >= Duration::from_millis(5));
    }
}
