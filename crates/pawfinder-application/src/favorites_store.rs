use tokio::sync::RwLock;

use pawfinder_core::{Dog, DogId, FavoriteSet};

/// In-memory favorites for the browsing session.
#[derive(Default)]
pub struct FavoritesStore {
    favorites: RwLock<FavoriteSet>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the dog was already a favorite.
    pub async fn add(&self, dog: Dog) -> bool {
        self.favorites.write().await.add(dog)
    }

    pub async fn remove(&self, id: &DogId) -> bool {
        self.favorites.write().await.remove(id)
    }

    /// Returns whether the dog is a favorite afterwards.
    pub async fn toggle(&self, dog: Dog) -> bool {
        self.favorites.write().await.toggle(dog)
    }

    pub async fn contains(&self, id: &DogId) -> bool {
        self.favorites.read().await.contains(id)
    }

    pub async fn clear(&self) {
        self.favorites.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.favorites.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.favorites.read().await.is_empty()
    }

    /// A copy of the current favorites, in the order they were added.
    pub async fn snapshot(&self) -> FavoriteSet {
        self.favorites.read().await.clone()
    }
}
