use std::collections::HashMap;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use cinesphere_contracts::{
    FavoritesCallback, FavoritesStore, StoreError, Subscription,
};
use cinesphere_model::{Movie, MovieId, UserId};
use parking_lot::{Mutex, ReentrantMutex};

type SharedCallback = Arc<FavoritesCallback>;

#[derive(Default)]
struct Inner {
    favorites: HashMap<UserId, Vec<Movie>>,
    subscribers: HashMap<UserId, Vec<(u64, SharedCallback)>>,
    next_subscriber: u64,
}

/// Favorites kept in process memory, with live subscriptions.
///
/// Callbacks run on the caller's thread after the state lock is released.
/// Deliveries are serialized and each one snapshots the set after taking
/// the delivery lock, so the last snapshot a subscriber sees is current.
/// A callback may call back into the store on the same thread.
#[derive(Clone, Default)]
pub struct MemoryFavorites {
    inner: Arc<Mutex<Inner>>,
    delivery: Arc<ReentrantMutex<()>>,
}

impl std::fmt::Debug for MemoryFavorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MemoryFavorites")
            .field("users", &inner.favorites.len())
            .field(
                "subscribers",
                &inner.subscribers.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, user: UserId) -> Vec<Movie> {
        self.inner
            .lock()
            .favorites
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    fn notify(&self, user: UserId) {
        let _delivery = self.delivery.lock();
        let (snapshot, callbacks) = {
            let inner = self.inner.lock();
            let snapshot =
                inner.favorites.get(&user).cloned().unwrap_or_default();
            let callbacks: Vec<SharedCallback> = inner
                .subscribers
                .get(&user)
                .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default();
            (snapshot, callbacks)
        };

        tracing::debug!(%user, count = snapshot.len(), listeners = callbacks.len(), "favorites changed");
        for callback in callbacks {
            (callback.as_ref())(snapshot.clone());
        }
    }
}

fn unsubscribe(inner: &Weak<Mutex<Inner>>, user: UserId, id: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut inner = inner.lock();
    if let Some(subs) = inner.subscribers.get_mut(&user) {
        subs.retain(|(sub_id, _)| *sub_id != id);
        if subs.is_empty() {
            inner.subscribers.remove(&user);
        }
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavorites {
    fn subscribe(
        &self,
        user: UserId,
        on_change: FavoritesCallback,
    ) -> Result<Subscription, StoreError> {
        let callback: SharedCallback = Arc::new(on_change);
        let delivery = self.delivery.lock();
        let (id, snapshot) = {
            let mut inner = self.inner.lock();
            let id = inner.next_subscriber;
            inner.next_subscriber += 1;
            inner
                .subscribers
                .entry(user)
                .or_default()
                .push((id, Arc::clone(&callback)));
            let snapshot =
                inner.favorites.get(&user).cloned().unwrap_or_default();
            (id, snapshot)
        };

        (callback.as_ref())(snapshot);
        drop(delivery);

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || unsubscribe(&weak, user, id)))
    }

    async fn add(&self, user: UserId, movie: Movie) -> Result<(), StoreError> {
        let changed = {
            let mut inner = self.inner.lock();
            let list = inner.favorites.entry(user).or_default();
            if list.iter().any(|m| m.id == movie.id) {
                false
            } else {
                list.push(movie);
                true
            }
        };
        if changed {
            self.notify(user);
        }
        Ok(())
    }

    async fn remove(
        &self,
        user: UserId,
        movie_id: MovieId,
    ) -> Result<(), StoreError> {
        let changed = {
            let mut inner = self.inner.lock();
            match inner.favorites.get_mut(&user) {
                Some(list) => {
                    let before = list.len();
                    list.retain(|m| m.id != movie_id);
                    list.len() != before
                }
                None => false,
            }
        };
        if changed {
            self.notify(user);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn movie(id: u64) -> Movie {
        Movie {
            id: MovieId(id),
            title: format!("Movie {id}"),
            poster: String::new(),
            overview: String::new(),
            rating: 7.0,
            genre_ids: Vec::new(),
        }
    }

    /// Polls a store future that never suspends.
    fn run_now<F: std::future::Future>(fut: F) -> F::Output {
        use std::task::{Context, Poll, Waker};
        let mut fut = std::pin::pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(out) => out,
            Poll::Pending => panic!("store future suspended"),
        }
    }

    fn recorder() -> (Arc<StdMutex<Vec<Vec<u64>>>>, FavoritesCallback) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: FavoritesCallback = Box::new(move |movies: Vec<Movie>| {
            sink.lock()
                .unwrap()
                .push(movies.iter().map(|m| m.id.get()).collect());
        });
        (seen, callback)
    }

    #[tokio::test]
    async fn subscriber_sees_current_set_then_changes() {
        let store = MemoryFavorites::new();
        let user = UserId::new();
        store.add(user, movie(1)).await.unwrap();

        let (seen, callback) = recorder();
        let subscription = store.subscribe(user, callback).unwrap();

        store.add(user, movie(2)).await.unwrap();
        store.add(user, movie(2)).await.unwrap();
        store.remove(user, MovieId(1)).await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![vec![1], vec![1, 2], vec![2]],
            "duplicate add must not notify"
        );

        subscription.unsubscribe();
        store.add(user, movie(3)).await.unwrap();
        assert_eq!(seen.lock().unwrap().len(), 3);
        assert_eq!(store.snapshot(user).len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_changes_end_on_current_set() {
        let store = MemoryFavorites::new();
        let user = UserId::new();

        let seen = Arc::new(StdMutex::new(Vec::<Vec<u64>>::new()));
        let sink = Arc::clone(&seen);
        let callback: FavoritesCallback = Box::new(move |movies: Vec<Movie>| {
            // Hold up the first single-item delivery so the second add races it.
            if movies.len() == 1 {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
            sink.lock()
                .unwrap()
                .push(movies.iter().map(|m| m.id.get()).collect());
        });
        let _sub = store.subscribe(user, callback).unwrap();

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.add(user, movie(1)).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        store.add(user, movie(2)).await.unwrap();
        first.await.unwrap().unwrap();

        let current: Vec<u64> =
            store.snapshot(user).iter().map(|m| m.id.get()).collect();
        assert_eq!(current, vec![1, 2]);
        assert_eq!(seen.lock().unwrap().last(), Some(&current));
    }

    #[tokio::test]
    async fn callback_may_modify_the_store() {
        let store = MemoryFavorites::new();
        let user = UserId::new();
        let inner = store.clone();
        let callback: FavoritesCallback = Box::new(move |movies: Vec<Movie>| {
            if movies.len() == 1 {
                run_now(inner.add(user, movie(9))).unwrap();
            }
        });
        let _sub = store.subscribe(user, callback).unwrap();
        store.add(user, movie(1)).await.unwrap();

        let ids: Vec<u64> =
            store.snapshot(user).iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 9]);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = MemoryFavorites::new();
        let alice = UserId::new();
        let bob = UserId::new();

        let (seen, callback) = recorder();
        let _sub = store.subscribe(bob, callback).unwrap();
        store.add(alice, movie(1)).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Vec::<u64>::new()]);
        assert!(store.snapshot(bob).is_empty());
    }
}
