//! Process-wide stop signal.
//!
//! `main` hands one clone to the OS signal task and the HTTP server waits on
//! a [`ShutdownSignal`] taken from another. Firing is sticky: a waiter created
//! after [`Shutdown::trigger`] still sees it.

use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable handle that stops the site when triggered.
#[derive(Debug, Clone)]
pub struct Shutdown {
    fired: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (fired, _) = watch::channel(false);
        Self {
            fired: Arc::new(fired),
        }
    }

    /// A future-side view of this handle, for a task that should stop with the site.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            fired: self.fired.subscribe(),
        }
    }

    /// Stop every waiter. Idempotent.
    pub fn trigger(&self) {
        self.fired.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.fired.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Waiting side of a [`Shutdown`].
#[derive(Debug)]
pub struct ShutdownSignal {
    fired: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once the handle fires or every handle is gone.
    pub async fn wait(mut self) {
        let _ = self.fired.wait_for(|fired| *fired).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_every_waiter() {
        let shutdown = Shutdown::new();
        let server = tokio::spawn(shutdown.signal().wait());
        let metrics = tokio::spawn(shutdown.clone().signal().wait());

        shutdown.clone().trigger();

        server.await.unwrap();
        metrics.await.unwrap();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_late_waiter_sees_earlier_trigger() {
        let shutdown = Shutdown::default();
        shutdown.trigger();
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), shutdown.signal().wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_waiter_released_when_handles_dropped() {
        let shutdown = Shutdown::new();
        let signal = shutdown.signal();
        drop(shutdown);

        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_untriggered_waiter_keeps_waiting() {
        let shutdown = Shutdown::new();
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown.signal().wait()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }
}
