//! Text-to-speech helper
//!
//! [`Speaker::speak`] is a single-shot async operation: it resolves once the
//! backend finishes speaking, or fails with [`SpeechError`]. There is no
//! queue, cancellation or retry, and overlapping calls are left to the
//! backend to interleave.

mod command;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use command::CommandBackend;

use crate::config::SpeechConfig;
use crate::error::CmsError;

/// Languages the memorial site reads aloud
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnglishUs,
    #[serde(rename = "ar-SA")]
    ArabicSa,
}

impl Language {
    /// BCP 47 tag
    pub fn code(&self) -> &'static str {
        match self {
            Language::EnglishUs => "en-US",
            Language::ArabicSa => "ar-SA",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Language::EnglishUs),
            "ar" | "ar-sa" => Ok(Language::ArabicSa),
            _ => Err(CmsError::InvalidLanguage(s.to_string())),
        }
    }
}

/// Failure of a speak operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// No speech capability is available
    #[error("Speech synthesis is not supported on this platform")]
    Unsupported,

    /// The platform reported an error while speaking
    #[error("Speech synthesis failed: {0}")]
    Platform(String),
}

/// One request to speak
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: Language,
    /// 1.0 is the platform's normal speed
    pub rate: f32,
}

/// A platform speech capability
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Speak the utterance, resolving when speech has finished
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Backend for platforms with no speech capability
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

#[async_trait]
impl SpeechBackend for UnsupportedBackend {
    async fn speak(&self, _utterance: &Utterance) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn name(&self) -> &str {
        "unsupported"
    }
}

/// Speaks text at a fixed rate through a backend
pub struct Speaker {
    backend: Box<dyn SpeechBackend>,
    rate: f32,
}

impl Speaker {
    pub fn new(backend: Box<dyn SpeechBackend>, rate: f32) -> Self {
        Self { backend, rate }
    }

    /// Speaker driving the configured speech program
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(Box::new(CommandBackend::from_config(config)), config.rate)
    }

    /// Speaker that always reports speech as unsupported
    pub fn unsupported() -> Self {
        Self::new(Box::new(UnsupportedBackend), SpeechConfig::default().rate)
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Speak `text` in `language` and wait for it to finish
    pub async fn speak(&self, text: &str, language: Language) -> Result<(), SpeechError> {
        let utterance = Utterance {
            text: text.to_string(),
            language,
            rate: self.rate,
        };
        tracing::debug!(
            "Speaking {} chars in {} via {}",
            text.chars().count(),
            language,
            self.backend.name()
        );
        self.backend.speak(&utterance).await.map_err(|e| {
            tracing::warn!("Speech via {} failed: {}", self.backend.name(), e);
            e
        })
    }
}
