//! Post filtering, ordering and pagination

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use super::post::{Post, PostStatus};
use crate::error::CmsError;

/// Value that disables a status or category filter
pub const ALL: &str = "all";

/// Status filter: a specific status, or every status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(PostStatus),
}

impl StatusFilter {
    fn matches(&self, status: PostStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl From<PostStatus> for StatusFilter {
    fn from(status: PostStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = CmsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

/// Options accepted by a post listing: `{status, category, limit, offset}`
///
/// Matching posts are ordered newest publish date first. Posts sharing a
/// publish date keep their collection order. `offset` is applied before
/// `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFilter {
    pub status: Option<StatusFilter>,
    /// Exact category match; `"all"` disables the filter
    pub category: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Whether a post passes the status and category filters
    pub fn matches(&self, post: &Post) -> bool {
        let status_ok = match self.status {
            None => true,
            Some(filter) => filter.matches(post.status),
        };
        let category_ok = match self.category.as_deref() {
            None | Some(ALL) => true,
            Some(category) => post.category == category,
        };
        status_ok && category_ok
    }

    /// Filter, sort and paginate `posts`
    pub fn apply<'a, I>(&self, posts: I) -> Vec<&'a Post>
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut matched: Vec<&Post> = posts.into_iter().filter(|p| self.matches(p)).collect();

        // Stable sort, so equal dates keep collection order
        matched.sort_by_key(|p| Reverse(p.publish_date));

        let page = matched.into_iter().skip(self.offset.unwrap_or(0));
        match self.limit {
            Some(limit) => page.take(limit).collect(),
            None => page.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, status: PostStatus, category: &str, day: u32) -> Post {
        let date = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        Post {
            id: id.to_string(),
            title: format!("Post {}", id),
            slug: format!("post-{}", id),
            excerpt: String::new(),
            content: String::new(),
            category: category.to_string(),
            status,
            publish_date: date,
            created_at: date,
            updated_at: date,
            author: "Admin".to_string(),
            image: None,
            image_alt: None,
            seo: None,
            views: 0,
        }
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    fn fixture() -> Vec<Post> {
        vec![
            post("a", PostStatus::Published, "news", 1),
            post("b", PostStatus::Draft, "news", 5),
            post("c", PostStatus::Published, "stories", 9),
            post("d", PostStatus::Scheduled, "stories", 3),
            post("e", PostStatus::Published, "news", 7),
        ]
    }

    #[test]
    fn test_no_filter_sorts_newest_first() {
        let posts = fixture();
        let result = PostFilter::new().apply(&posts);
        assert_eq!(ids(&result), vec!["c", "e", "b", "d", "a"]);
    }

    #[test]
    fn test_status_filter() {
        let posts = fixture();
        let result = PostFilter::new().status(PostStatus::Published).apply(&posts);
        assert_eq!(ids(&result), vec!["c", "e", "a"]);
        assert!(result.iter().all(|p| p.is_published()));
    }

    #[test]
    fn test_all_disables_filters() {
        let posts = fixture();
        let all = PostFilter::new()
            .status(StatusFilter::All)
            .category(ALL)
            .apply(&posts);
        assert_eq!(all.len(), posts.len());
    }

    #[test]
    fn test_category_and_status_combined() {
        let posts = fixture();
        let result = PostFilter::new()
            .status(PostStatus::Published)
            .category("news")
            .apply(&posts);
        assert_eq!(ids(&result), vec!["e", "a"]);

        let none = PostFilter::new().category("News").apply(&posts);
        assert!(none.is_empty());
    }

    #[test]
    fn test_offset_then_limit() {
        let posts = fixture();
        let result = PostFilter::new().offset(1).limit(2).apply(&posts);
        assert_eq!(ids(&result), vec!["e", "b"]);

        let past_end = PostFilter::new().offset(10).apply(&posts);
        assert!(past_end.is_empty());

        let zero = PostFilter::new().limit(0).apply(&posts);
        assert!(zero.is_empty());
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let posts = vec![
            post("x", PostStatus::Published, "news", 2),
            post("y", PostStatus::Published, "news", 2),
            post("z", PostStatus::Published, "news", 2),
        ];
        let result = PostFilter::new().apply(&posts);
        assert_eq!(ids(&result), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_filter_from_json() {
        let filter: PostFilter =
            serde_json::from_str(r#"{"status": "all", "category": "news", "limit": 5}"#).unwrap();
        assert_eq!(filter.status, Some(StatusFilter::All));
        assert_eq!(filter.limit, Some(5));

        let filter: PostFilter = serde_json::from_str(r#"{"status": "scheduled"}"#).unwrap();
        assert_eq!(
            filter.status,
            Some(StatusFilter::Only(PostStatus::Scheduled))
        );

        assert!(serde_json::from_str::<PostFilter>(r#"{"status": "archived"}"#).is_err());
    }
}
