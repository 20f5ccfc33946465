//! memorial-cms: content management layer for a memorial website
//!
//! Provides blog post CRUD over an in-memory store, the site settings
//! singleton, slug generation and a text-to-speech helper. Nothing is
//! persisted: every [`Cms`] starts from its seed data.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod settings;
pub mod speech;

use std::path::{Path, PathBuf};

use content::{InMemoryPostStore, NewPost, Post, PostRepository, SeedData};
use error::Result;
use settings::SettingsStore;

pub use error::CmsError;

/// The CMS application: configuration plus the stores it owns
#[derive(Debug, Clone)]
pub struct Cms {
    /// CMS configuration
    pub config: config::CmsConfig,
    /// Base directory config and seed paths are resolved against
    pub base_dir: PathBuf,
    /// Post collection
    pub posts: InMemoryPostStore,
    /// Settings singleton
    pub settings: SettingsStore,
}

impl Cms {
    /// Create a CMS from a directory, using its config file when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = match config::CmsConfig::discover(&base_dir) {
            Some(path) => config::CmsConfig::load(path)?,
            None => config::CmsConfig::default(),
        };
        Self::with_config(config, base_dir)
    }

    /// Create a CMS from an explicit configuration, loading its seed data
    pub fn with_config<P: AsRef<Path>>(config: config::CmsConfig, base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let seed = match config.seed_path(&base_dir) {
            Some(path) => SeedData::load(path)?,
            None => SeedData::builtin()?,
        };
        let (posts, settings) = seed.into_stores()?;
        tracing::info!("CMS ready with {} posts", posts.len());

        Ok(Self {
            config,
            base_dir,
            posts,
            settings,
        })
    }

    /// Assemble a CMS from stores the caller already built
    pub fn from_parts(
        config: config::CmsConfig,
        posts: InMemoryPostStore,
        settings: SettingsStore,
    ) -> Self {
        Self {
            config,
            base_dir: PathBuf::from("."),
            posts,
            settings,
        }
    }

    /// Create a post, filling author and category from the config when left empty
    pub fn create_post(&mut self, mut new_post: NewPost) -> Post {
        if new_post.author.is_empty() {
            new_post.author = self.config.default_author.clone();
        }
        if new_post.category.is_empty() {
            new_post.category = self.config.default_category.clone();
        }
        self.posts.create(new_post)
    }

    /// Public URL of a post
    pub fn post_url(&self, post: &Post) -> String {
        helpers::post_url(self.settings.current(), &self.config.blog_path, &post.slug)
    }

    /// Speaker configured from the speech section of the config
    pub fn speaker(&self) -> speech::Speaker {
        speech::Speaker::from_config(&self.config.speech)
    }
}
