use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// The short-lived "copied" indicator. Reads true until `duration` has
/// passed on the tokio clock since the last `mark`.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    duration: Duration,
    until: Option<Instant>,
}

impl CopyFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            until: None,
        }
    }

    pub fn mark(&mut self) {
        self.until = Some(Instant::now() + self.duration);
    }

    pub fn is_active(&self) -> bool {
        self.until.is_some_and(|until| Instant::now() < until)
    }

    /// Resolves once the indicator has switched back off.
    pub async fn settled(&self) {
        if let Some(until) = self.until {
            sleep_until(until).await;
        }
    }
}
