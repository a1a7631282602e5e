//! Ordered collections whose items carry a key that must stay unique.
//!
//! Seasons inside an anime and episodes inside a season follow the same rule:
//! insertion order is preserved, lookups are linear scans by key, and no two
//! items may share a key. [`KeyedList`] implements that rule once for both.

use std::fmt::{Debug, Display};

use thiserror::Error;

/// Extracts the uniqueness key of an item stored in a [`KeyedList`].
pub trait Keyed {
    type Key: Copy + Eq + Debug + Display;

    fn key(&self) -> Self::Key;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyedListError<K: Debug + Display> {
    #[error("an item with key {0} already exists")]
    Duplicate(K),
    #[error("no item with key {0}")]
    Missing(K),
}

/// Insertion-ordered list with unique keys.
///
/// Deserialization accepts whatever the payload holds, duplicates included;
/// callers that accept external input check [`KeyedList::first_duplicate`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct KeyedList<T> {
    items: Vec<T>,
}

impl<T> Default for KeyedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> KeyedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from `items`, rejecting the first repeated key.
    pub fn from_items(
        items: Vec<T>,
    ) -> Result<Self, KeyedListError<T::Key>> {
        let list = Self { items };
        match list.first_duplicate() {
            Some(key) => Err(KeyedListError::Duplicate(key)),
            None => Ok(list),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn position(&self, key: T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    pub fn contains(&self, key: T::Key) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn get_mut(&mut self, key: T::Key) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.key() == key)
    }

    /// Append `item` unless its key is already taken.
    pub fn insert(&mut self, item: T) -> Result<&T, KeyedListError<T::Key>> {
        let key = item.key();
        if self.contains(key) {
            return Err(KeyedListError::Duplicate(key));
        }
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replace the item stored under `current` with `item`, keeping its slot.
    ///
    /// `item` may carry a new key as long as no other item already uses it.
    pub fn replace(
        &mut self,
        current: T::Key,
        item: T,
    ) -> Result<&T, KeyedListError<T::Key>> {
        let index = self
            .position(current)
            .ok_or(KeyedListError::Missing(current))?;
        let next = item.key();
        if next != current && self.contains(next) {
            return Err(KeyedListError::Duplicate(next));
        }
        self.items[index] = item;
        Ok(&self.items[index])
    }

    pub fn remove(&mut self, key: T::Key) -> Result<T, KeyedListError<T::Key>> {
        let index = self.position(key).ok_or(KeyedListError::Missing(key))?;
        Ok(self.items.remove(index))
    }

    /// First key that occurs more than once, in list order.
    pub fn first_duplicate(&self) -> Option<T::Key> {
        self.items.iter().enumerate().find_map(|(index, item)| {
            let key = item.key();
            self.items[..index]
                .iter()
                .any(|earlier| earlier.key() == key)
                .then_some(key)
        })
    }
}

impl<'a, T> IntoIterator for &'a KeyedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
