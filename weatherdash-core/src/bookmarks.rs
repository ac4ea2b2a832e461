//! Saved ("bookmarked") cities.

use crate::{
    error::StoreError,
    model::{City, CurrentWeather, SavedCity},
    storage::JsonStore,
};

/// Storage key the saved-city list lives under.
pub const SAVED_CITIES_KEY: &str = "cities";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkState {
    NotBookmarked,
    Bookmarked,
}

impl BookmarkState {
    pub fn is_bookmarked(self) -> bool {
        matches!(self, BookmarkState::Bookmarked)
    }
}

#[derive(Debug, Clone)]
pub struct Bookmarks {
    store: JsonStore,
}

impl Bookmarks {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Saved cities in insertion order; empty if nothing (valid) is stored.
    pub fn saved(&self) -> Vec<SavedCity> {
        self.store.get(SAVED_CITIES_KEY, Vec::new())
    }

    pub fn state_of(&self, key: &str) -> BookmarkState {
        if self.saved().iter().any(|c| c.key() == key) {
            BookmarkState::Bookmarked
        } else {
            BookmarkState::NotBookmarked
        }
    }

    /// Flip the bookmark for `city`. Adding snapshots `weather` alongside it.
    ///
    /// Returns the new state. If the write fails the stored list is unchanged.
    pub fn toggle(
        &self,
        city: &City,
        weather: Option<&CurrentWeather>,
    ) -> Result<BookmarkState, StoreError> {
        let saved = self.saved();
        let was_bookmarked = saved.iter().any(|c| c.key() == city.key);

        let mut next: Vec<SavedCity> = saved.into_iter().filter(|c| c.key() != city.key).collect();

        let state = if was_bookmarked {
            BookmarkState::NotBookmarked
        } else {
            next.push(SavedCity { city: city.clone(), weather: weather.cloned() });
            BookmarkState::Bookmarked
        };

        self.store.set(SAVED_CITIES_KEY, &next)?;
        tracing::info!(key = %city.key, bookmarked = state.is_bookmarked(), "toggled bookmark");

        Ok(state)
    }

    /// Drop the saved city with `key`. Returns whether anything was removed.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let saved = self.saved();
        let before = saved.len();
        let next: Vec<SavedCity> = saved.into_iter().filter(|c| c.key() != key).collect();

        if next.len() == before {
            return Ok(false);
        }

        self.store.set(SAVED_CITIES_KEY, &next)?;
        Ok(true)
    }
}
