//! Cooperative shutdown signal shared by the UI loop and its feeder tasks.

use tokio::sync::broadcast;

/// Clonable handle for signaling and observing shutdown. The first `signal`
/// wakes every subscriber; repeated signals are harmless.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(32);
        Self { tx }
    }

    pub fn signal(&self) {
        let _ = self.tx.send(());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signal_wakes_every_subscriber() {
        let handle = ShutdownHandle::new();
        let mut a = handle.subscribe();
        let mut b = handle.clone().subscribe();

        handle.signal();

        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }
}
