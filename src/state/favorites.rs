use std::collections::HashSet;

/// Photo IDs the user has marked as favorite.
///
/// Lives only as long as the process; nothing is written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: HashSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the ID if absent, remove it if present.
    /// Returns the new membership state.
    pub fn toggle(&mut self, photo_id: &str) -> bool {
        if self.ids.remove(photo_id) {
            false
        } else {
            self.ids.insert(photo_id.to_string());
            true
        }
    }

    pub fn contains(&self, photo_id: &str) -> bool {
        self.ids.contains(photo_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
