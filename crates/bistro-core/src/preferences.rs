//! Favorites and recently-viewed lists.
//!
//! Both hold plain item ids. Neither checks that an id exists in the loaded
//! menu: a favorite survives a menu refresh that temporarily hides the item.

use crate::RECENTLY_VIEWED_LIMIT;

/// Favorite item ids, unique and in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Favorites::default()
    }

    /// Rebuilds from a persisted list, keeping the first copy of duplicates.
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut favorites = Favorites::new();
        for id in ids {
            if !favorites.contains(&id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.ids.iter().any(|id| id == item_id)
    }

    /// Adds the id when absent, removes it when present.
    ///
    /// ## Returns
    /// `true` when the item is a favorite after the call.
    ///
    /// ```rust
    /// use bistro_core::preferences::Favorites;
    ///
    /// let mut favorites = Favorites::new();
    /// assert!(favorites.toggle("1"));
    /// assert!(!favorites.toggle("1"));
    /// assert!(favorites.ids().is_empty());
    /// ```
    pub fn toggle(&mut self, item_id: &str) -> bool {
        if let Some(idx) = self.ids.iter().position(|id| id == item_id) {
            self.ids.remove(idx);
            false
        } else {
            self.ids.push(item_id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Recently viewed item ids, most recent first.
///
/// ## Invariants
/// - No duplicates
/// - At most [`RECENTLY_VIEWED_LIMIT`] entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentlyViewed {
    ids: Vec<String>,
}

impl RecentlyViewed {
    pub fn new() -> Self {
        RecentlyViewed::default()
    }

    /// Rebuilds from a persisted list, restoring both invariants.
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut recent = RecentlyViewed::new();
        for id in ids {
            if recent.ids.len() == RECENTLY_VIEWED_LIMIT {
                break;
            }
            if !recent.ids.contains(&id) {
                recent.ids.push(id);
            }
        }
        recent
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Moves `item_id` to the front, dropping the oldest entry past the cap.
    ///
    /// ```rust
    /// use bistro_core::preferences::RecentlyViewed;
    ///
    /// let mut recent = RecentlyViewed::from_ids(vec!["3".into(), "2".into(), "1".into()]);
    /// recent.push("2");
    /// assert_eq!(recent.ids(), ["2", "3", "1"]);
    /// ```
    pub fn push(&mut self, item_id: &str) {
        self.ids.retain(|id| id != item_id);
        self.ids.insert(0, item_id.to_string());
        self.ids.truncate(RECENTLY_VIEWED_LIMIT);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut favorites = Favorites::from_ids(strings(&["1", "4"]));
        let before = favorites.clone();

        assert!(favorites.toggle("2"));
        assert!(favorites.contains("2"));
        assert!(!favorites.toggle("2"));

        assert_eq!(favorites, before);
    }

    #[test]
    fn test_toggle_existing_removes() {
        let mut favorites = Favorites::from_ids(strings(&["1", "4"]));
        assert!(!favorites.toggle("1"));
        assert_eq!(favorites.ids(), ["4"]);
    }

    #[test]
    fn test_favorites_keep_insertion_order() {
        let mut favorites = Favorites::new();
        favorites.toggle("3");
        favorites.toggle("1");
        favorites.toggle("2");
        assert_eq!(favorites.ids(), ["3", "1", "2"]);
    }

    #[test]
    fn test_favorites_from_ids_dedups() {
        let favorites = Favorites::from_ids(strings(&["1", "2", "1"]));
        assert_eq!(favorites.ids(), ["1", "2"]);
    }

    #[test]
    fn test_recent_move_to_front_keeps_length() {
        let mut recent = RecentlyViewed::from_ids(strings(&["3", "2", "1"]));
        recent.push("2");
        assert_eq!(recent.ids(), ["2", "3", "1"]);
        assert_eq!(recent.len(), 3);
    }

    #[test]
    fn test_recent_caps_at_limit() {
        let mut recent = RecentlyViewed::new();
        for n in 0..25 {
            recent.push(&n.to_string());
        }
        assert_eq!(recent.len(), RECENTLY_VIEWED_LIMIT);
        assert_eq!(recent.ids()[0], "24");
        assert_eq!(recent.ids()[RECENTLY_VIEWED_LIMIT - 1], "15");
    }

    #[test]
    fn test_recent_never_duplicates() {
        let mut recent = RecentlyViewed::new();
        for id in ["1", "2", "1", "3", "2", "1"] {
            recent.push(id);
        }
        assert_eq!(recent.ids(), ["1", "2", "3"]);
    }

    #[test]
    fn test_recent_from_oversized_snapshot() {
        let stored: Vec<String> = (0..15).map(|n| n.to_string()).collect();
        let recent = RecentlyViewed::from_ids(stored);
        assert_eq!(recent.len(), RECENTLY_VIEWED_LIMIT);
        assert_eq!(recent.ids()[0], "0");
    }
}
