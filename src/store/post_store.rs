//! In-memory post collection.
//!
//! [`PostStore`] is the single source of truth for posts. It owns them in
//! creation order (newest first), allocates ids, and applies every mutation by
//! replacing the affected post with an updated copy. Mutations aimed at an id
//! that is no longer present leave the store untouched and report `false`.

use chrono::Utc;

use crate::domain::{Post, PostFields, PostId, Result, ZforumError};

/// First id handed out by a fresh store.
pub const FIRST_POST_ID: u64 = 1001;

/// Message attached to the validation error raised for a blank title.
pub const TITLE_REQUIRED: &str = "Title is required!";

/// The collection of all posts.
///
/// # Examples
///
/// ```
/// use zforum::domain::PostFields;
/// use zforum::store::PostStore;
///
/// let mut store = PostStore::new();
/// let id = store.create(PostFields::new("Hello", "", ""))?;
/// store.upvote(id);
/// assert_eq!(store.get(id).map(|p| p.upvotes), Some(1));
/// # Ok::<(), zforum::ZforumError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostStore {
    posts: Vec<Post>,
    next_id: u64,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            posts: Vec::new(),
            next_id: FIRST_POST_ID,
        }
    }

    /// Adds a new post and returns its id.
    ///
    /// The post starts with zero upvotes and no comments and is placed first
    /// in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ZforumError::Validation`] when the title is empty after
    /// trimming. The store is unchanged in that case.
    pub fn create(&mut self, fields: PostFields) -> Result<PostId> {
        if !fields.has_title() {
            tracing::debug!("rejecting post with blank title");
            return Err(ZforumError::Validation(TITLE_REQUIRED.to_string()));
        }

        let id = PostId::new(self.next_id);
        self.next_id += 1;

        let post = Post::new(id, fields, Utc::now());
        tracing::info!(post_id = %id, title = %post.title, "post created");
        self.posts.insert(0, post);

        Ok(id)
    }

    /// Adds one upvote to the post. Returns `false` if the id is unknown.
    pub fn upvote(&mut self, id: PostId) -> bool {
        let applied = self.replace_with(id, Post::upvoted);
        tracing::debug!(post_id = %id, applied, "upvote");
        applied
    }

    /// Appends a comment to the post.
    ///
    /// Blank comments (empty after trimming) are ignored, as are unknown ids.
    /// The stored text is exactly what was given.
    pub fn add_comment(&mut self, id: PostId, text: &str) -> bool {
        if text.trim().is_empty() {
            tracing::debug!(post_id = %id, "ignoring blank comment");
            return false;
        }

        let applied = self.replace_with(id, |post| post.commented(text));
        tracing::debug!(post_id = %id, applied, "comment added");
        applied
    }

    /// Replaces the display fields of a post.
    ///
    /// No title validation happens here; an edit may blank the title.
    pub fn edit(&mut self, id: PostId, fields: PostFields) -> bool {
        let applied = self.replace_with(id, |post| post.edited(fields));
        tracing::debug!(post_id = %id, applied, "post edited");
        applied
    }

    /// Removes a post. Returns `false` if it was already gone.
    pub fn delete(&mut self, id: PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|post| post.id != id);
        let applied = self.posts.len() != before;
        tracing::info!(post_id = %id, applied, "post deleted");
        applied
    }

    /// Looks up a post by id.
    #[must_use]
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Returns `true` when a post with this id exists.
    #[must_use]
    pub fn contains(&self, id: PostId) -> bool {
        self.get(id).is_some()
    }

    /// All posts, newest first.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Number of live posts.
    ///
    /// Deleted posts are not counted, so this is not the next id minus the
    /// first one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Returns `true` when no posts exist, either because none were created
    /// or because all were deleted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Swaps the post `id` for `update(post)` in place.
    ///
    /// # Returns
    ///
    /// `false` without calling `update` when the id is unknown.
    fn replace_with<F>(&mut self, id: PostId, update: F) -> bool
    where
        F: FnOnce(Post) -> Post,
    {
        let Some(index) = self.posts.iter().position(|post| post.id == id) else {
            return false;
        };

        let slot = &mut self.posts[index];
        *slot = update(slot.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(titles: &[&str]) -> (PostStore, Vec<PostId>) {
        let mut store = PostStore::new();
        let ids = titles
            .iter()
            .map(|title| store.create(PostFields::new(*title, "", "")).unwrap())
            .collect();
        (store, ids)
    }

    #[test]
    fn ids_start_at_first_post_id_and_increase() {
        let (_, ids) = store_with(&["a", "b", "c"]);
        assert_eq!(ids[0].get(), FIRST_POST_ID);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn newest_post_comes_first() {
        let (store, ids) = store_with(&["old", "new"]);
        let order: Vec<PostId> = store.posts().iter().map(|p| p.id).collect();
        assert_eq!(order, vec![ids[1], ids[0]]);
    }

    #[test]
    fn blank_title_is_rejected_without_side_effects() {
        let mut store = PostStore::new();
        let err = store.create(PostFields::new("   ", "body", "")).unwrap_err();
        assert_eq!(err.to_string(), TITLE_REQUIRED);
        assert!(store.is_empty());

        // The rejected attempt does not consume an id.
        let id = store.create(PostFields::new("ok", "", "")).unwrap();
        assert_eq!(id.get(), FIRST_POST_ID);
    }

    #[test]
    fn upvote_and_comment_touch_only_the_target() {
        let (mut store, ids) = store_with(&["a", "b"]);
        let untouched = store.get(ids[1]).cloned();

        assert!(store.upvote(ids[0]));
        assert!(store.upvote(ids[0]));
        assert!(store.add_comment(ids[0], "first"));
        assert!(store.add_comment(ids[0], "second"));

        let post = store.get(ids[0]).unwrap();
        assert_eq!(post.upvotes, 2);
        assert_eq!(post.comments, vec!["first", "second"]);
        assert_eq!(store.get(ids[1]).cloned(), untouched);
    }

    #[test]
    fn blank_comment_is_ignored() {
        let (mut store, ids) = store_with(&["a"]);
        assert!(!store.add_comment(ids[0], "  \n"));
        assert!(store.get(ids[0]).unwrap().comments.is_empty());
    }

    #[test]
    fn edit_replaces_fields_and_preserves_the_rest() {
        let (mut store, ids) = store_with(&["a"]);
        store.upvote(ids[0]);
        let created_at = store.get(ids[0]).unwrap().created_at;

        assert!(store.edit(ids[0], PostFields::new("", "new body", "http://img")));

        let post = store.get(ids[0]).unwrap();
        assert_eq!(post.title, "");
        assert_eq!(post.content, "new body");
        assert_eq!(post.image, "http://img");
        assert_eq!(post.upvotes, 1);
        assert_eq!(post.created_at, created_at);
    }

    #[test]
    fn edit_keeps_position_in_creation_order() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        store.edit(ids[1], PostFields::new("B", "", ""));
        let order: Vec<PostId> = store.posts().iter().map(|p| p.id).collect();
        assert_eq!(order, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn upvote_and_comment_keep_position() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        store.upvote(ids[0]);
        store.add_comment(ids[2], "first");
        let order: Vec<PostId> = store.posts().iter().map(|p| p.id).collect();
        assert_eq!(order, vec![ids[2], ids[1], ids[0]]);
        assert_eq!(store.get(ids[0]).map(|p| p.upvotes), Some(1));
    }

    #[test]
    fn mutations_on_missing_ids_are_no_ops() {
        let (mut store, ids) = store_with(&["a"]);
        assert!(store.delete(ids[0]));
        let snapshot = store.posts().to_vec();

        assert!(!store.upvote(ids[0]));
        assert!(!store.add_comment(ids[0], "hi"));
        assert!(!store.edit(ids[0], PostFields::new("x", "", "")));
        assert!(!store.delete(ids[0]));
        assert_eq!(store.posts(), snapshot.as_slice());
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let (mut store, ids) = store_with(&["a"]);
        store.delete(ids[0]);
        let next = store.create(PostFields::new("b", "", "")).unwrap();
        assert!(next > ids[0]);
    }
}
