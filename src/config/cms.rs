//! CMS configuration (cms.yml / cms.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{load_file, Result};

/// Config file names probed in the base directory, in order
pub const CONFIG_FILES: &[&str] = &["cms.yml", "cms.yaml", "cms.toml"];

/// Main CMS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Seed file with posts and settings (YAML or JSON). Built-in fixtures when absent.
    pub seed_file: Option<String>,

    /// Default page size for listings
    pub per_page: usize,

    /// Author stamped on posts created without one
    pub default_author: String,

    /// Category used for posts created without one
    pub default_category: String,

    /// Path segment under the site URL where posts live
    pub blog_path: String,

    #[serde(default)]
    pub speech: SpeechConfig,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            per_page: 10,
            default_author: "Admin".to_string(),
            default_category: "news".to_string(),
            blog_path: "blog".to_string(),
            speech: SpeechConfig::default(),
        }
    }
}

impl CmsConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: CmsConfig = load_file(path.as_ref())?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Find the first known config file in `base_dir`
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.as_ref().join(name))
            .find(|path| path.exists())
    }

    /// Resolve the seed file against `base_dir` when it is relative
    pub fn seed_path<P: AsRef<Path>>(&self, base_dir: P) -> Option<PathBuf> {
        self.seed_file.as_ref().map(|seed| {
            let seed = PathBuf::from(seed);
            if seed.is_absolute() {
                seed
            } else {
                base_dir.as_ref().join(seed)
            }
        })
    }
}

/// Text-to-speech configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speech program invoked by the command backend
    pub program: String,

    /// Speaking rate, 1.0 being the platform's normal speed
    pub rate: f32,

    /// Words per minute the program speaks at rate 1.0
    pub base_words_per_minute: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
            rate: 0.9,
            base_words_per_minute: 175,
        }
    }
}

impl SpeechConfig {
    /// Speaking rate converted to words per minute
    pub fn words_per_minute(&self) -> u32 {
        words_per_minute(self.base_words_per_minute, self.rate)
    }
}

/// Scale `base` words per minute by `rate`, never going below 1
pub fn words_per_minute(base: u32, rate: f32) -> u32 {
    (base as f32 * rate).round().max(1.0) as u32
}
