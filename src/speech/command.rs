//! Speech through an external program (espeak-ng and compatibles)

use async_trait::async_trait;
use std::io::ErrorKind;
use tokio::process::Command;

use super::{Language, SpeechBackend, SpeechError, Utterance};
use crate::config::{words_per_minute, SpeechConfig};

/// Runs `<program> -v <voice> -s <words per minute> -- <text>` and waits for it to exit
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    base_words_per_minute: u32,
}

impl CommandBackend {
    pub fn new(program: impl Into<String>, base_words_per_minute: u32) -> Self {
        Self {
            program: program.into(),
            base_words_per_minute,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.program.clone(), config.base_words_per_minute)
    }

    fn voice(language: Language) -> &'static str {
        match language {
            Language::EnglishUs => "en-us",
            Language::ArabicSa => "ar",
        }
    }

    /// Arguments passed to the program for an utterance
    pub fn args(&self, utterance: &Utterance) -> Vec<String> {
        vec![
            "-v".to_string(),
            Self::voice(utterance.language).to_string(),
            "-s".to_string(),
            words_per_minute(self.base_words_per_minute, utterance.rate).to_string(),
            "--".to_string(),
            utterance.text.clone(),
        ]
    }
}

#[async_trait]
impl SpeechBackend for CommandBackend {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let output = Command::new(&self.program)
            .args(self.args(utterance))
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SpeechError::Unsupported,
                _ => SpeechError::Platform(e.to_string()),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(SpeechError::Platform(if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr
            }))
        }
    }

    fn name(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(text: &str, language: Language) -> Utterance {
        Utterance {
            text: text.to_string(),
            language,
            rate: 1.0,
        }
    }

    #[test]
    fn test_args() {
        let backend = CommandBackend::new("espeak-ng", 175);
        assert_eq!(
            backend.args(&utterance("-- remember", Language::ArabicSa)),
            vec!["-v", "ar", "-s", "175", "--", "-- remember"]
        );

        let fast = Utterance {
            rate: 2.0,
            ..utterance("hi", Language::EnglishUs)
        };
        assert_eq!(backend.args(&fast)[3], "350");
    }

    #[tokio::test]
    async fn test_missing_program_is_unsupported() {
        let backend = CommandBackend::new("definitely-not-a-speech-program", 175);
        assert_eq!(
            backend.speak(&utterance("hi", Language::EnglishUs)).await,
            Err(SpeechError::Unsupported)
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status() {
        let ok = CommandBackend::new("true", 175);
        assert_eq!(ok.speak(&utterance("hi", Language::EnglishUs)).await, Ok(()));

        let failing = CommandBackend::new("false", 175);
        assert!(matches!(
            failing.speak(&utterance("hi", Language::EnglishUs)).await,
            Err(SpeechError::Platform(_))
        ));
    }
}
