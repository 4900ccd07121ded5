//! Domain layer for the zforum plugin.
//!
//! Core types with no dependency on Zellij or rendering:
//!
//! - [`error`]: Error types and result aliases
//! - [`post`]: The post model and its value-style updates
//!
//! # Examples
//!
//! ```
//! use zforum::domain::{Post, PostFields, PostId};
//!
//! let post = Post::new(PostId::new(1001), PostFields::new("Hello", "", ""), chrono::Utc::now());
//! let post = post.upvoted();
//! assert_eq!(post.upvotes, 1);
//! ```

pub mod error;
pub mod post;

pub use error::{Result, ZforumError};
pub use post::{Post, PostFields, PostId};
