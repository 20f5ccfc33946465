//! Content module - posts, queries and the post store

mod post;
pub mod query;
pub mod seed;
pub mod store;

pub use post::{NewPost, Post, PostPatch, PostStatus, Seo};
pub use query::{PostFilter, StatusFilter};
pub use seed::{SeedData, SeedPost};
pub use store::{CategorySummary, InMemoryPostStore, PostRepository};
