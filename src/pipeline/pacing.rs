use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Fixed-interval gate between collaborator writes. Injected so tests can
/// swap in a zero-delay counting pacer.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps a fixed interval on every pause. Not adaptive: the collaborators
/// only ask for spacing between requests, not backoff.
pub struct FixedDelay {
    interval: Duration,
}

impl FixedDelay {
    pub fn new(interval: Duration) -> Self {
        FixedDelay { interval }
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        sleep(self.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_for_the_interval() {
        let pacer = FixedDelay::new(Duration::from_secs(1));
        let before = tokio::time::Instant::now();
        pacer.pause().await;
        assert_eq!(before.elapsed(), Duration::from_secs(1));
    }
}
