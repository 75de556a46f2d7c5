//! Name-keyed member tables
//!
//! A [`NameIndex`] maps member names to descriptors either exactly
//! (case-sensitive) or case-insensitively. Fuzzy keys use Unicode default
//! case folding, which depends neither on the locale nor on where a letter
//! sits in the word.

use rustc_hash::FxHashMap;

/// How member names are matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Case-sensitive; `"Name"` only resolves `"Name"`
    #[default]
    Exact,
    /// Case-insensitive; `"name"`, `"NAME"` and `"Name"` are the same member
    Fuzzy,
}

/// Member table keyed by (possibly case-folded) name
#[derive(Debug, Clone)]
pub struct NameIndex<T> {
    mode: MatchMode,
    entries: FxHashMap<String, T>,
}

impl<T> NameIndex<T> {
    /// Create an empty index
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            entries: FxHashMap::default(),
        }
    }

    /// Build an index from `(name, value)` pairs.
    ///
    /// On key collisions (only possible in fuzzy mode, e.g. `Name` and `name`)
    /// the last pair wins.
    pub fn from_entries<I>(mode: MatchMode, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let mut index = Self::new(mode);
        for (name, value) in entries {
            index.insert(name, value);
        }
        index
    }

    /// Insert, replacing any entry with the same key
    pub fn insert(&mut self, name: String, value: T) {
        let key = match self.mode {
            MatchMode::Exact => name,
            MatchMode::Fuzzy => fold_case(&name),
        };
        self.entries.insert(key, value);
    }

    /// Look up a member by name
    pub fn get(&self, name: &str) -> Option<&T> {
        match self.mode {
            MatchMode::Exact => self.entries.get(name),
            MatchMode::Fuzzy => self.entries.get(&fold_case(name)),
        }
    }

    /// Check if a member exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Match mode of this index
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stored values
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

fn fold_case(name: &str) -> String {
    caseless::default_case_fold_str(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(mode: MatchMode) -> NameIndex<usize> {
        NameIndex::from_entries(
            mode,
            vec![("Name".to_string(), 0), ("Age".to_string(), 1)],
        )
    }

    #[test]
    fn test_exact_lookup_is_case_sensitive() {
        let idx = index(MatchMode::Exact);
        assert_eq!(idx.get("Name"), Some(&0));
        assert_eq!(idx.get("name"), None);
        assert_eq!(idx.get("NAME"), None);
        assert!(idx.contains("Age"));
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn test_fuzzy_lookup_ignores_case() {
        let idx = index(MatchMode::Fuzzy);
        assert_eq!(idx.get("Name"), Some(&0));
        assert_eq!(idx.get("name"), Some(&0));
        assert_eq!(idx.get("nAmE"), Some(&0));
        assert_eq!(idx.get("AGE"), Some(&1));
        assert_eq!(idx.get("Nam"), None);
    }

    #[test]
    fn test_fuzzy_collision_last_writer_wins() {
        let idx = NameIndex::from_entries(
            MatchMode::Fuzzy,
            vec![("Name".to_string(), 0), ("name".to_string(), 7)],
        );
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get("NAME"), Some(&7));

        let exact = NameIndex::from_entries(
            MatchMode::Exact,
            vec![("Name".to_string(), 0), ("name".to_string(), 7)],
        );
        assert_eq!(exact.len(), 2);
    }

    #[test]
    fn test_fuzzy_non_ascii() {
        let idx = NameIndex::from_entries(MatchMode::Fuzzy, vec![("Größe".to_string(), 1)]);
        assert_eq!(idx.get("größe"), Some(&1));
        assert_eq!(idx.get("GRÖßE"), Some(&1));
        // Full folding: ß and SS are the same name
        assert_eq!(idx.get("GRÖSSE"), Some(&1));
        assert_eq!(idx.get("Grose"), None);
    }

    #[test]
    fn test_fuzzy_final_sigma() {
        let idx = NameIndex::from_entries(MatchMode::Fuzzy, vec![("ΣΑΣ".to_string(), 1)]);
        assert_eq!(idx.get("ΣΑΣ"), Some(&1));
        assert_eq!(idx.get("σασ"), Some(&1));
        assert_eq!(idx.get("σας"), Some(&1));
        assert_eq!(idx.get("Σας"), Some(&1));
    }

    #[test]
    fn test_empty() {
        let idx: NameIndex<usize> = NameIndex::new(MatchMode::Fuzzy);
        assert!(idx.is_empty());
        assert_eq!(idx.mode(), MatchMode::Fuzzy);
        assert_eq!(idx.values().count(), 0);
    }
}
