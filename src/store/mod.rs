//! Post storage and projection.
//!
//! - [`post_store`]: The authoritative, in-memory collection of posts
//! - [`projection`]: Search filtering and sort ordering over that collection

pub mod post_store;
pub mod projection;

pub use post_store::{PostStore, FIRST_POST_ID, TITLE_REQUIRED};
pub use projection::{highlight_range, matches_query, project, SortMode};
