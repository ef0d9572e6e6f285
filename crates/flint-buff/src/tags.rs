//! Tag sets and the two matching policies used by buff queries

use std::collections::BTreeSet;

/// Classification labels on a buff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// True if at least one queried tag is present.
    ///
    /// An empty query matches nothing.
    pub fn matches_any<S: AsRef<str>>(&self, query: &[S]) -> bool {
        query.iter().any(|tag| self.contains(tag.as_ref()))
    }

    /// True if every queried tag is present.
    ///
    /// An empty query matches every set, including an empty one.
    pub fn matches_all<S: AsRef<str>>(&self, query: &[S]) -> bool {
        query.iter().all(|tag| self.contains(tag.as_ref()))
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// How a tag query is compared against a buff's tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch {
    /// Buff carries at least one of the queried tags
    Any,
    /// Buff carries all of the queried tags
    All,
}

impl TagMatch {
    pub fn matches<S: AsRef<str>>(self, tags: &TagSet, query: &[S]) -> bool {
        match self {
            TagMatch::Any => tags.matches_any(query),
            TagMatch::All => tags.matches_all(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_dot() -> TagSet {
        ["fire", "dot"].into_iter().collect()
    }

    #[test]
    fn any_match_needs_overlap() {
        let tags = fire_dot();
        assert!(tags.matches_any(&["ice", "fire"]));
        assert!(!tags.matches_any(&["ice", "poison"]));
    }

    #[test]
    fn all_match_needs_superset() {
        let tags = fire_dot();
        assert!(tags.matches_all(&["dot", "fire"]));
        assert!(!tags.matches_all(&["fire", "dot", "poison"]));
    }

    #[test]
    fn empty_query() {
        let tags = fire_dot();
        let empty: [&str; 0] = [];
        assert!(tags.matches_all(&empty));
        assert!(!tags.matches_any(&empty));
        assert!(TagSet::new().matches_all(&empty));
    }

    #[test]
    fn empty_tags_never_match_non_empty_query() {
        let tags = TagSet::new();
        assert!(!TagMatch::Any.matches(&tags, &["fire"]));
        assert!(!TagMatch::All.matches(&tags, &["fire"]));
    }

    #[test]
    fn duplicates_collapse() {
        let tags: TagSet = ["fire", "fire", "dot"].into_iter().collect();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["dot", "fire"]);
    }
}
