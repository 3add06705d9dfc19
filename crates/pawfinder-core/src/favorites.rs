//! The user's favorite dogs.

use serde::{Deserialize, Serialize};

use crate::dog::{Dog, DogId};

/// Favorite dogs keyed by id, kept in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSet {
    dogs: Vec<Dog>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `dog`; returns `false` if a dog with the same id is already there.
    pub fn add(&mut self, dog: Dog) -> bool {
        if self.contains(&dog.id) {
            return false;
        }
        self.dogs.push(dog);
        true
    }

    /// Removes the dog with `id`; returns `false` if it was not a favorite.
    pub fn remove(&mut self, id: &DogId) -> bool {
        let before = self.dogs.len();
        self.dogs.retain(|dog| &dog.id != id);
        self.dogs.len() != before
    }

    /// Adds or removes `dog`; returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, dog: Dog) -> bool {
        if self.remove(&dog.id) {
            false
        } else {
            self.dogs.push(dog);
            true
        }
    }

    pub fn contains(&self, id: &DogId) -> bool {
        self.dogs.iter().any(|dog| &dog.id == id)
    }

    pub fn get(&self, id: &DogId) -> Option<&Dog> {
        self.dogs.iter().find(|dog| &dog.id == id)
    }

    pub fn clear(&mut self) {
        self.dogs.clear();
    }

    pub fn ids(&self) -> Vec<DogId> {
        self.dogs.iter().map(|dog| dog.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dog> {
        self.dogs.iter()
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str) -> Dog {
        Dog {
            id: DogId::from(id),
            name: format!("dog-{id}"),
            breed: "Beagle".to_string(),
            age_years: 3,
            zip_code: "10001".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn add_ignores_duplicates() {
        let mut favorites = FavoriteSet::new();
        assert!(favorites.add(dog("a")));
        assert!(!favorites.add(dog("a")));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut favorites = FavoriteSet::new();
        favorites.add(dog("c"));
        favorites.add(dog("a"));
        favorites.add(dog("b"));
        assert_eq!(
            favorites.ids(),
            vec![DogId::from("c"), DogId::from("a"), DogId::from("b")]
        );
    }

    #[test]
    fn toggle_flips_membership() {
        let mut favorites = FavoriteSet::new();
        assert!(favorites.toggle(dog("a")));
        assert!(favorites.contains(&DogId::from("a")));
        assert!(!favorites.toggle(dog("a")));
        assert!(favorites.is_empty());
    }

    #[test]
    fn remove_reports_absence() {
        let mut favorites = FavoriteSet::new();
        favorites.add(dog("a"));
        assert!(!favorites.remove(&DogId::from("zzz")));
        assert!(favorites.remove(&DogId::from("a")));
        assert!(favorites.get(&DogId::from("a")).is_none());
    }
}
