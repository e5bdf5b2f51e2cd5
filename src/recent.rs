use crate::storage::{JsonCollection, KeyValueStore};
use crate::{Result, RECENT_SEARCHES_KEY};

pub const DEFAULT_RECENT_CAPACITY: usize = 5;

/// The last few raw queries, most recent first, without repeats.
pub struct RecentSearches<S> {
    searches: JsonCollection<S, String>,
    capacity: usize,
}

impl<S: KeyValueStore> RecentSearches<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, DEFAULT_RECENT_CAPACITY)
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self {
            searches: JsonCollection::new(store, RECENT_SEARCHES_KEY),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn list(&self) -> Result<Vec<String>> {
        let mut searches = self.searches.load();
        searches.truncate(self.capacity);
        Ok(searches)
    }

    /// Move `query` to the front, dropping its older occurrence and
    /// anything past the capacity. Blank queries are ignored.
    pub fn add(&self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        let capacity = self.capacity;
        self.searches.update(|searches| {
            if searches.first().map(String::as_str) == Some(query)
                && searches.len() <= capacity
            {
                return (false, ());
            }
            searches.retain(|s| s != query);
            searches.insert(0, query.to_owned());
            searches.truncate(capacity);
            (true, ())
        })?;
        log::debug!("recent search recorded: {}", query);
        Ok(())
    }

    pub fn remove(&self, query: &str) -> Result<()> {
        let query = query.trim();
        self.searches.update(|searches| {
            let before = searches.len();
            searches.retain(|s| s != query);
            (searches.len() != before, ())
        })
    }

    pub fn clear(&self) -> Result<()> {
        self.searches.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rstest::rstest;

    #[test]
    fn repeated_queries_move_to_front_and_cap() {
        let recent = RecentSearches::new(MemoryStore::new());
        for other in ["a", "b", "c", "d", "e", "f"] {
            recent.add("octocat").unwrap();
            recent.add(other).unwrap();
        }
        recent.add("octocat").unwrap();

        let list = recent.list().unwrap();
        assert_eq!(list, vec!["octocat", "f", "e", "d", "c"]);
    }

    #[rstest]
    #[case(&["a", "b", "a"], &["a", "b"])]
    #[case(&["a", "b", "c", "d", "e", "f"], &["f", "e", "d", "c", "b"])]
    #[case(&["a", " a ", ""], &["a"])]
    fn prepend_dedupe_truncate(
        #[case] added: &[&str],
        #[case] expected: &[&str],
    ) {
        let recent = RecentSearches::new(MemoryStore::new());
        for query in added {
            recent.add(query).unwrap();
        }
        assert_eq!(recent.list().unwrap(), expected);
    }

    #[test]
    fn remove_and_clear() {
        let recent = RecentSearches::new(MemoryStore::new());
        recent.add("octocat").unwrap();
        recent.add("jane").unwrap();
        recent.remove("octocat").unwrap();
        recent.remove("nobody").unwrap();
        assert_eq!(recent.list().unwrap(), vec!["jane"]);
        recent.add("tom").unwrap();
        recent.remove("  jane ").unwrap();
        assert_eq!(recent.list().unwrap(), vec!["tom"]);
        recent.clear().unwrap();
        assert!(recent.list().unwrap().is_empty());
    }

    #[test]
    fn custom_capacity() {
        let recent = RecentSearches::with_capacity(MemoryStore::new(), 2);
        for query in ["a", "b", "c"] {
            recent.add(query).unwrap();
        }
        assert_eq!(recent.list().unwrap(), vec!["c", "b"]);
    }
}
