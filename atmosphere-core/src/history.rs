use std::collections::VecDeque;

/// Maximum number of cities remembered.
pub const HISTORY_CAPACITY: usize = 5;

/// Recency list of searched cities: most recent first, no duplicates, bounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: VecDeque<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `city` to the front, dropping any earlier occurrence and the oldest overflow.
    pub fn record(&mut self, city: &str) {
        self.entries.retain(|c| c != city);
        self.entries.push_front(city.to_owned());
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
