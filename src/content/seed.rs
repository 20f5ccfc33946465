//! Seed data: the posts and settings a store starts with
//!
//! Seeds are read from a YAML or JSON file, or from the built-in fixture
//! below when no file is configured. Seeded posts keep their ids, view
//! counters and timestamps. Missing ids are generated, a missing publish
//! date is the store clock's current time, and missing timestamps fall back
//! to the publish date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::post::{Post, PostStatus, Seo};
use super::store::InMemoryPostStore;
use crate::error::{load_file, Result};
use crate::helpers::{generate_slug, parse_date};
use crate::settings::{Settings, SettingsStore};

/// Fixture used when no seed file is configured
const BUILTIN_SEED: &str = r#"
posts:
  - id: "1"
    title: Honoring the Names
    excerpt: Why every name on the memorial matters.
    content: |
      # Honoring the Names

      Each entry in the memorial is a person, a family, a story.
    category: stories
    status: published
    publishDate: 2024-01-15
    author: Admin
    image: /images/candles.jpg
    imageAlt: Candles lit at a vigil
    views: 120
  - id: "2"
    title: How We Verify Records
    excerpt: Our process for cross-checking data sources.
    content: |
      Records are matched against every listed data source before publication.
    category: methodology
    status: published
    publishDate: 2024-02-01
    author: Admin
    seo:
      metaTitle: Verification methodology
      keywords: [data, verification]
    views: 45
  - id: "3"
    title: Upcoming Remembrance Day
    excerpt: Details for the annual gathering.
    content: Join us for a day of remembrance.
    category: events
    status: scheduled
    publishDate: 2024-03-20
    author: Admin
  - id: "4"
    title: Volunteer Translators Needed
    content: We are looking for Arabic and English translators.
    category: news
    status: draft
    publishDate: 2024-02-10
    author: Admin
settings:
  siteName: Memorial
  siteDescription: Remembering the lives behind the numbers
  siteUrl: http://localhost:3000
  socialMedia:
    twitter: "@memorial"
  memorial:
    totalCasualties: 0
    lastUpdated: 2024-02-01
    dataSources:
      - Ministry of Health
      - UN OCHA
"#;

/// A post as written in a seed file; everything but the title is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeedPost {
    pub id: Option<String>,
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub status: PostStatus,
    pub publish_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub author: String,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub seo: Option<Seo>,
    pub views: u64,
}

/// Contents of a seed file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub posts: Vec<SeedPost>,
    pub settings: Option<Settings>,
}

impl SeedData {
    /// Load seed data from a YAML or JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let seed: SeedData = load_file(path.as_ref())?;
        tracing::info!(
            "Loaded {} seed posts from {:?}",
            seed.posts.len(),
            path.as_ref()
        );
        Ok(seed)
    }

    /// The built-in fixture
    pub fn builtin() -> Result<Self> {
        serde_yaml::from_str(BUILTIN_SEED).map_err(|source| crate::error::CmsError::Yaml {
            path: "<builtin>".into(),
            source,
        })
    }

    /// Build a post store and settings store from the seed
    ///
    /// Settings default when the seed carries none.
    pub fn into_stores(self) -> Result<(InMemoryPostStore, SettingsStore)> {
        self.into_stores_with(InMemoryPostStore::new())
    }

    /// Like [`SeedData::into_stores`], filling an existing (usually empty) post store
    pub fn into_stores_with(
        self,
        mut posts: InMemoryPostStore,
    ) -> Result<(InMemoryPostStore, SettingsStore)> {
        for seed in self.posts {
            let id = match seed.id.clone() {
                Some(id) => id,
                None => posts.fresh_id(),
            };
            let post = seed.into_post(id, posts.now())?;
            posts.insert(post);
        }

        for (slug, ids) in posts.duplicate_slugs() {
            tracing::warn!("Slug {:?} is shared by posts {}", slug, ids.join(", "));
        }

        let settings = SettingsStore::new(self.settings.unwrap_or_default());
        Ok((posts, settings))
    }
}

impl SeedPost {
    fn into_post(self, id: String, now: DateTime<Utc>) -> Result<Post> {
        let publish_date = match &self.publish_date {
            Some(raw) => parse_date(raw)?,
            None => now,
        };
        let created_at = match &self.created_at {
            Some(raw) => parse_date(raw)?,
            None => publish_date,
        };
        let updated_at = match &self.updated_at {
            Some(raw) => parse_date(raw)?,
            None => created_at,
        };
        let slug = self.slug.unwrap_or_else(|| generate_slug(&self.title));

        Ok(Post {
            id,
            title: self.title,
            slug,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            status: self.status,
            publish_date,
            created_at,
            updated_at,
            author: self.author,
            image: self.image,
            image_alt: self.image_alt,
            seo: self.seo,
            views: self.views,
        })
    }
}
