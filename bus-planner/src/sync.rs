//! Shared mutable state for concurrent fetches.

use std::sync::Arc;

use tokio::sync::RwLock;

/// A value shared between concurrent tasks under reader-writer discipline.
///
/// `read` snapshots the current value and may run concurrently with other
/// reads; `mutate` holds the write lock for the whole transform, so no
/// read observes a partially-applied update and no update is lost however
/// many writers race.
#[derive(Debug)]
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Shared<T> {
    /// Wrap a value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Snapshot the current value.
    pub async fn read(&self) -> T {
        self.inner.read().await.clone()
    }

    /// Replace the value with `transform` applied to it.
    pub async fn mutate<F>(&self, transform: F)
    where
        F: FnOnce(T) -> T,
    {
        let mut guard = self.inner.write().await;
        *guard = transform(guard.clone());
    }
}
