//! Post domain model.
//!
//! A [`Post`] is one forum submission. Posts are values: every change produces
//! a new `Post` carrying the same [`PostId`], which keeps before/after states
//! easy to compare in tests and in the event handler.

use chrono::{DateTime, Local, Utc};
use std::fmt;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Display format for creation timestamps.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identifier of a post.
///
/// Ids are allocated by the store in strictly increasing order and are never
/// reused, so comparing two ids compares their creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(u64);

impl PostId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-editable fields of a post.
///
/// Used as the input of both creation and editing. The store never validates
/// these on edit; the non-empty title rule only applies at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub image: String,
}

impl PostFields {
    /// Builds a field set from anything string-like.
    ///
    /// # Examples
    ///
    /// ```
    /// use zforum::domain::PostFields;
    ///
    /// let fields = PostFields::new("Hello", "", "");
    /// assert_eq!(fields.title, "Hello");
    /// ```
    pub fn new(title: impl Into<String>, content: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image: image.into(),
        }
    }

    /// Returns `true` when the title has visible characters.
    #[must_use]
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// One forum submission.
///
/// # Fields
///
/// - `id`: allocated by the store, unique for the store's lifetime
/// - `title`, `content`, `image`: display fields, replaced together by edits
/// - `created_at`: captured once at creation, only ever formatted
/// - `upvotes`: grows by one per upvote
/// - `comments`: append-only, in submission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub upvotes: u32,
    pub comments: Vec<String>,
}

impl Post {
    /// Creates a fresh post with no upvotes and no comments.
    #[must_use]
    pub fn new(id: PostId, fields: PostFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            image: fields.image,
            created_at,
            upvotes: 0,
            comments: Vec::new(),
        }
    }

    /// Returns the same post with one more upvote.
    #[must_use]
    pub fn upvoted(self) -> Self {
        Self {
            upvotes: self.upvotes.saturating_add(1),
            ..self
        }
    }

    /// Returns the same post with `comment` appended to its comments.
    #[must_use]
    pub fn commented(self, comment: impl Into<String>) -> Self {
        let mut comments = self.comments;
        comments.push(comment.into());
        Self { comments, ..self }
    }

    /// Returns the same post with its display fields replaced.
    ///
    /// `id`, `created_at`, `upvotes` and `comments` are carried over untouched.
    #[must_use]
    pub fn edited(self, fields: PostFields) -> Self {
        Self {
            title: fields.title,
            content: fields.content,
            image: fields.image,
            ..self
        }
    }

    /// Copies the display fields out of the post.
    #[must_use]
    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            content: self.content.clone(),
            image: self.image.clone(),
        }
    }

    /// Returns the image URL, or `None` when the post has no image.
    ///
    /// Whitespace-only values count as "no image" so the UI never shows an
    /// empty reference.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        let url = self.image.trim();
        if url.is_empty() {
            None
        } else {
            Some(url)
        }
    }

    /// Formats the creation time in the local timezone.
    #[must_use]
    pub fn created_label(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format(CREATED_AT_FORMAT)
            .to_string()
    }

    /// Returns a short relative age such as `"5m ago"`.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn time_ago(&self) -> String {
        self.time_ago_at(Utc::now())
    }

    /// Same as [`Post::time_ago`] but relative to an explicit `now`.
    #[must_use]
    pub fn time_ago_at(&self, now: DateTime<Utc>) -> String {
        let diff = (now - self.created_at).num_seconds().max(0);

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Post {
        Post::new(PostId::new(7), PostFields::new("Title", "Body", ""), Utc::now())
    }

    #[test]
    fn new_post_starts_without_votes_or_comments() {
        let post = sample();
        assert_eq!(post.upvotes, 0);
        assert!(post.comments.is_empty());
    }

    #[test]
    fn edited_keeps_identity_and_counters() {
        let post = sample().upvoted().commented("first");
        let before = post.clone();

        let after = post.edited(PostFields::new("New", "Other", "https://x/y.png"));

        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.upvotes, 1);
        assert_eq!(after.comments, vec!["first".to_string()]);
        assert_eq!(after.title, "New");
        assert_eq!(after.image_url(), Some("https://x/y.png"));
    }

    #[test]
    fn blank_image_is_no_image() {
        let mut post = sample();
        assert_eq!(post.image_url(), None);
        post.image = "   ".to_string();
        assert_eq!(post.image_url(), None);
    }

    #[test]
    fn time_ago_buckets() {
        let post = sample();
        let at = post.created_at;
        assert_eq!(post.time_ago_at(at + Duration::seconds(10)), "just now");
        assert_eq!(post.time_ago_at(at + Duration::minutes(5)), "5m ago");
        assert_eq!(post.time_ago_at(at + Duration::hours(3)), "3h ago");
        assert_eq!(post.time_ago_at(at + Duration::days(2)), "2d ago");
        assert_eq!(post.time_ago_at(at - Duration::minutes(1)), "just now");
    }

    #[test]
    fn has_title_ignores_whitespace() {
        assert!(PostFields::new("x", "", "").has_title());
        assert!(!PostFields::new(" \t", "", "").has_title());
    }
}
