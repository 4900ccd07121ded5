//! Derived, filtered and ordered views of the post collection.
//!
//! Projection is a pure function of the store contents, a search query, and a
//! [`SortMode`]. It never mutates posts; callers re-project after every change
//! so the visible list cannot drift from the store.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::{Post, ZforumError};

/// Ordering applied to the projected list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Newest first, by id.
    #[default]
    Recency,
    /// Most upvoted first. Ties fall back to recency.
    Upvotes,
}

impl SortMode {
    /// Short label for the footer and list header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recency => "Newest",
            Self::Upvotes => "Top",
        }
    }

    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Recency => Self::Upvotes,
            Self::Upvotes => Self::Recency,
        }
    }

    fn compare(self, a: &Post, b: &Post) -> Ordering {
        match self {
            Self::Recency => b.id.cmp(&a.id),
            Self::Upvotes => b.upvotes.cmp(&a.upvotes).then_with(|| b.id.cmp(&a.id)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortMode {
    type Err = ZforumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" | "time" | "recency" => Ok(Self::Recency),
            "upvotes" | "top" => Ok(Self::Upvotes),
            other => Err(ZforumError::Config(format!("unknown sort mode '{other}'"))),
        }
    }
}

/// Returns `true` if the title contains `query`, ignoring case.
///
/// An empty query matches everything.
#[must_use]
pub fn matches_query(title: &str, query: &str) -> bool {
    title_contains(title, &query.to_lowercase())
}

/// `needle` must already be lowercase.
fn title_contains(title: &str, needle: &str) -> bool {
    needle.is_empty() || title.to_lowercase().contains(needle)
}

/// Builds the visible list of posts.
///
/// Keeps the posts whose title contains `query` case-insensitively and orders
/// them by `sort`. The result is a fresh vector; `posts` is not touched.
///
/// # Examples
///
/// ```
/// use zforum::domain::PostFields;
/// use zforum::store::{project, PostStore, SortMode};
///
/// let mut store = PostStore::new();
/// store.create(PostFields::new("Rust tips", "", ""))?;
/// store.create(PostFields::new("Gardening", "", ""))?;
///
/// let visible = project(store.posts(), "RUST", SortMode::Recency);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].title, "Rust tips");
/// # Ok::<(), zforum::ZforumError>(())
/// ```
#[must_use]
pub fn project(posts: &[Post], query: &str, sort: SortMode) -> Vec<Post> {
    let needle = query.to_lowercase();

    let mut visible: Vec<Post> = posts
        .iter()
        .filter(|post| title_contains(&post.title, &needle))
        .cloned()
        .collect();

    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Locates the first case-insensitive match of `query` inside `title`.
///
/// Returns a `(start, end)` range in characters, suitable for
/// highlighting. `None` when the query is empty or absent.
#[must_use]
pub fn highlight_range(title: &str, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }

    let title_chars: Vec<char> = title.chars().flat_map(char::to_lowercase).collect();
    let query_chars: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();

    // Lowercasing can change char counts; only highlight when it did not.
    if title_chars.len() != title.chars().count() || query_chars.is_empty() {
        return None;
    }

    title_chars
        .windows(query_chars.len())
        .position(|window| window == query_chars.as_slice())
        .map(|start| (start, start + query_chars.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostFields;
    use crate::store::PostStore;

    fn seeded() -> PostStore {
        let mut store = PostStore::new();
        for title in ["Alpha", "beta", "ALPHABET", "gamma"] {
            store.create(PostFields::new(title, "", "")).unwrap();
        }
        store
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn empty_query_keeps_everything_newest_first() {
        let store = seeded();
        let visible = project(store.posts(), "", SortMode::Recency);
        assert_eq!(titles(&visible), vec!["gamma", "ALPHABET", "beta", "Alpha"]);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let store = seeded();
        let visible = project(store.posts(), "alp", SortMode::Recency);
        assert_eq!(titles(&visible), vec!["ALPHABET", "Alpha"]);
    }

    #[test]
    fn no_match_yields_empty_list() {
        let store = seeded();
        assert!(project(store.posts(), "zzz", SortMode::Upvotes).is_empty());
    }

    #[test]
    fn upvote_sort_breaks_ties_by_recency() {
        let mut store = seeded();
        let ids: Vec<_> = store.posts().iter().map(|p| (p.title.clone(), p.id)).collect();
        let id_of = |name: &str| ids.iter().find(|(t, _)| t == name).map(|(_, id)| *id).unwrap();

        store.upvote(id_of("beta"));
        store.upvote(id_of("beta"));
        store.upvote(id_of("Alpha"));
        store.upvote(id_of("gamma"));

        let visible = project(store.posts(), "", SortMode::Upvotes);
        assert_eq!(titles(&visible), vec!["beta", "gamma", "Alpha", "ALPHABET"]);
    }

    #[test]
    fn sort_mode_parses_config_values() {
        assert_eq!("newest".parse::<SortMode>().unwrap(), SortMode::Recency);
        assert_eq!(" Top ".parse::<SortMode>().unwrap(), SortMode::Upvotes);
        assert!("alphabetical".parse::<SortMode>().is_err());
        assert_eq!(SortMode::Recency.toggled(), SortMode::Upvotes);
    }

    #[test]
    fn highlight_range_uses_char_positions() {
        assert_eq!(highlight_range("Hello World", "world"), Some((6, 11)));
        assert_eq!(highlight_range("héllo", "LLO"), Some((2, 5)));
        assert_eq!(highlight_range("Hello", ""), None);
        assert_eq!(highlight_range("Hello", "xyz"), None);
    }

    #[test]
    fn matches_query_agrees_with_projection() {
        assert!(matches_query("Rust Tips", "rust"));
        assert!(matches_query("anything", ""));
        assert!(!matches_query("Rust", "go"));

        let store = seeded();
        for query in ["", "ALP", "bet", "Ma", "zzz"] {
            let expected: Vec<&str> = store
                .posts()
                .iter()
                .filter(|p| matches_query(&p.title, query))
                .map(|p| p.title.as_str())
                .collect();
            let visible = project(store.posts(), query, SortMode::Recency);
            assert_eq!(titles(&visible), expected, "query {query:?}");
        }
    }
}
