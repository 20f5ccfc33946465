//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CmsError;
use crate::helpers::date::deserialize_flexible;

/// Publishing state of a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "scheduled" => Ok(PostStatus::Scheduled),
            _ => Err(CmsError::InvalidStatus(s.to_string())),
        }
    }
}

/// Search engine metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique within a store
    pub id: String,

    pub title: String,

    /// URL-friendly name. Not checked for uniqueness.
    pub slug: String,

    #[serde(default)]
    pub excerpt: String,

    /// Markdown body
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub status: PostStatus,

    #[serde(deserialize_with = "deserialize_flexible")]
    pub publish_date: DateTime<Utc>,

    #[serde(deserialize_with = "deserialize_flexible")]
    pub created_at: DateTime<Utc>,

    #[serde(deserialize_with = "deserialize_flexible")]
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,

    #[serde(default)]
    pub views: u64,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Fields supplied when creating a post
///
/// The store assigns the id, timestamps and view counter. An empty slug is
/// derived from the title; a missing publish date defaults to creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub status: PostStatus,
    pub publish_date: Option<DateTime<Utc>>,
    pub author: String,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub seo: Option<Seo>,
}

impl NewPost {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_publish_date(mut self, publish_date: DateTime<Utc>) -> Self {
        self.publish_date = Some(publish_date);
        self
    }
}

/// Partial post update. `None` leaves the field as it is.
///
/// `id`, `createdAt` and `views` are managed by the store and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: Option<PostStatus>,
    pub publish_date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    /// Replaces the whole SEO block
    pub seo: Option<Seo>,
}

impl PostPatch {
    /// Copy every supplied field onto `post`
    pub(crate) fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if let Some(publish_date) = self.publish_date {
            post.publish_date = publish_date;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if self.image.is_some() {
            post.image = self.image;
        }
        if self.image_alt.is_some() {
            post.image_alt = self.image_alt;
        }
        if self.seo.is_some() {
            post.seo = self.seo;
        }
    }
}
