// ── Entity streams ──
//
// Subscription handles vended by the stores. A stream is a thin wrapper
// over a `watch::Receiver` of snapshots: `current()` peeks, `latest()`
// consumes the pending change marker, `changed()` awaits the next one.

use std::sync::Arc;

use tokio::sync::watch;

/// A live view over one store's snapshot.
///
/// Dropping the stream is free; the store keeps broadcasting regardless
/// of subscriber count.
pub struct EntityStream<T> {
    rx: watch::Receiver<Arc<Vec<Arc<T>>>>,
}

impl<T> EntityStream<T> {
    pub(crate) fn new(rx: watch::Receiver<Arc<Vec<Arc<T>>>>) -> Self {
        Self { rx }
    }

    /// The current snapshot, without consuming the change marker.
    pub fn current(&self) -> Arc<Vec<Arc<T>>> {
        self.rx.borrow().clone()
    }

    /// The current snapshot, marking it as seen so the next
    /// [`changed`](Self::changed) waits for a fresh mutation.
    pub fn latest(&mut self) -> Arc<Vec<Arc<T>>> {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the next snapshot after the last one marked seen.
    /// Returns `None` once the owning store is gone.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Arc<T>>>> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn channel() -> (watch::Sender<Arc<Vec<Arc<u32>>>>, EntityStream<u32>) {
        let (tx, rx) = watch::channel(Arc::new(Vec::new()));
        (tx, EntityStream::new(rx))
    }

    #[tokio::test]
    async fn changed_sees_each_new_snapshot() {
        let (tx, mut stream) = channel();
        assert!(stream.latest().is_empty());

        tx.send_modify(|s| *s = Arc::new(vec![Arc::new(7)]));
        let snap = stream.changed().await.unwrap();
        assert_eq!(*snap[0], 7);
    }

    #[tokio::test]
    async fn changed_returns_none_when_store_is_dropped() {
        let (tx, mut stream) = channel();
        drop(tx);
        assert!(stream.changed().await.is_none());
    }

    #[tokio::test]
    async fn current_does_not_consume_the_marker() {
        let (tx, mut stream) = channel();
        tx.send_modify(|s| *s = Arc::new(vec![Arc::new(1)]));

        assert_eq!(stream.current().len(), 1);
        // Marker still pending, changed() resolves immediately.
        assert!(stream.changed().await.is_some());
    }
}
