use async_trait::async_trait;
use cinesphere_model::{Movie, MovieId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("favorites store unavailable: {0}")]
    Unavailable(String),

    #[error("permission denied for user {0}")]
    PermissionDenied(UserId),

    #[error("store error: {0}")]
    Backend(String),
}

/// Called with the user's complete favorites set whenever it changes.
pub type FavoritesCallback = Box<dyn Fn(Vec<Movie>) + Send + Sync>;

/// Per-user favorites kept in a document store.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Start receiving the user's favorites. The current set is delivered
    /// right away; delivery stops once the returned handle is dropped.
    fn subscribe(
        &self,
        user: UserId,
        on_change: FavoritesCallback,
    ) -> Result<Subscription, StoreError>;

    async fn add(&self, user: UserId, movie: Movie) -> Result<(), StoreError>;

    async fn remove(
        &self,
        user: UserId,
        movie_id: MovieId,
    ) -> Result<(), StoreError>;
}

/// Live subscription handle. Unsubscribes on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle that was never attached to anything.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            log::debug!("favorites subscription cancelled");
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Subscription;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn cancel_runs_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(sub.is_active());
        sub.unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let counter = Arc::clone(&calls);
        {
            let _dropped = Subscription::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
