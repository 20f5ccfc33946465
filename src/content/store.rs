//! Post storage
//!
//! [`PostRepository`] is the query and mutation surface the rest of the crate
//! programs against. [`InMemoryPostStore`] keeps posts in process memory,
//! keyed by id in insertion order, and is reset whenever the process restarts.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

use super::post::{NewPost, Post, PostPatch};
use super::query::PostFilter;
use crate::helpers::generate_slug;

/// Query and mutation operations over a post collection
///
/// Misses are reported as `None` / `false`, never as errors.
pub trait PostRepository {
    /// Posts matching `filter`, newest publish date first
    fn list(&self, filter: &PostFilter) -> Vec<Post>;

    fn get_by_id(&self, id: &str) -> Option<Post>;

    /// First post in collection order carrying `slug`
    fn get_by_slug(&self, slug: &str) -> Option<Post>;

    /// Store a new post and return it with its assigned id and timestamps
    fn create(&mut self, new_post: NewPost) -> Post;

    /// Merge `patch` into the post with `id` and return the result
    fn update(&mut self, id: &str, patch: PostPatch) -> Option<Post>;

    /// Remove the post with `id`, reporting whether it existed
    fn delete(&mut self, id: &str) -> bool;

    /// Bump the view counter, returning the new count
    fn increment_views(&mut self, id: &str) -> Option<u64>;
}

/// Per-category post count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Process-local post collection
#[derive(Debug, Clone)]
pub struct InMemoryPostStore {
    posts: IndexMap<String, Post>,
    clock: fn() -> DateTime<Utc>,
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: IndexMap::new(),
            clock: Utc::now,
        }
    }

    /// Use a custom time source for ids and timestamps
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Current time according to the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// All posts in collection order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    /// Borrowing variant of [`PostRepository::list`]
    pub fn query(&self, filter: &PostFilter) -> Vec<&Post> {
        filter.apply(self.posts.values())
    }

    /// Number of posts passing the status and category filters, ignoring pagination
    pub fn count(&self, filter: &PostFilter) -> usize {
        self.posts.values().filter(|p| filter.matches(p)).count()
    }

    /// Insert a fully-formed post, keeping its id, timestamps and counter
    ///
    /// Returns the post previously stored under the same id, which keeps its
    /// position in the collection.
    pub fn insert(&mut self, post: Post) -> Option<Post> {
        let replaced = self.posts.insert(post.id.clone(), post);
        if let Some(old) = &replaced {
            tracing::warn!("Replaced existing post with id {}", old.id);
        }
        replaced
    }

    /// An id derived from the current time in milliseconds that no stored post uses
    pub fn fresh_id(&self) -> String {
        self.id_at(self.now())
    }

    fn id_at(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        while self.posts.contains_key(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Categories with their post counts, most used first
    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for post in self.posts.values() {
            *counts.entry(post.category.as_str()).or_insert(0) += 1;
        }

        let mut summaries: Vec<CategorySummary> = counts
            .into_iter()
            .map(|(name, count)| CategorySummary {
                name: name.to_string(),
                slug: slug::slugify(name),
                count,
            })
            .collect();
        summaries.sort_by_key(|c| (Reverse(c.count), c.name.clone()));
        summaries
    }

    /// Slugs carried by more than one post, with the ids sharing each
    ///
    /// Slug uniqueness is not enforced on write; this reports collisions.
    pub fn duplicate_slugs(&self) -> Vec<(String, Vec<String>)> {
        let mut by_slug: IndexMap<&str, Vec<String>> = IndexMap::new();
        for post in self.posts.values() {
            by_slug
                .entry(post.slug.as_str())
                .or_default()
                .push(post.id.clone());
        }
        by_slug
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(slug, ids)| (slug.to_string(), ids))
            .collect()
    }
}

impl PostRepository for InMemoryPostStore {
    fn list(&self, filter: &PostFilter) -> Vec<Post> {
        self.query(filter).into_iter().cloned().collect()
    }

    fn get_by_id(&self, id: &str) -> Option<Post> {
        self.posts.get(id).cloned()
    }

    fn get_by_slug(&self, slug: &str) -> Option<Post> {
        self.posts.values().find(|p| p.slug == slug).cloned()
    }

    fn create(&mut self, new_post: NewPost) -> Post {
        let now = self.now();
        let id = self.id_at(now);
        let slug = if new_post.slug.is_empty() {
            generate_slug(&new_post.title)
        } else {
            new_post.slug
        };

        let post = Post {
            id: id.clone(),
            title: new_post.title,
            slug,
            excerpt: new_post.excerpt,
            content: new_post.content,
            category: new_post.category,
            status: new_post.status,
            publish_date: new_post.publish_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
            author: new_post.author,
            image: new_post.image,
            image_alt: new_post.image_alt,
            seo: new_post.seo,
            views: 0,
        };

        tracing::debug!("Created post {} ({})", id, post.slug);
        self.posts.insert(id, post.clone());
        post
    }

    fn update(&mut self, id: &str, patch: PostPatch) -> Option<Post> {
        let now = self.now();
        let Some(post) = self.posts.get_mut(id) else {
            tracing::debug!("Update skipped, no post with id {}", id);
            return None;
        };
        patch.apply_to(post);
        post.updated_at = now;
        tracing::debug!("Updated post {}", id);
        Some(post.clone())
    }

    fn delete(&mut self, id: &str) -> bool {
        // shift_remove keeps the remaining posts in order
        let removed = self.posts.shift_remove(id).is_some();
        if removed {
            tracing::debug!("Deleted post {}", id);
        }
        removed
    }

    fn increment_views(&mut self, id: &str) -> Option<u64> {
        let post = self.posts.get_mut(id)?;
        post.views += 1;
        Some(post.views)
    }
}
