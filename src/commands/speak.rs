//! Read text aloud

use anyhow::Result;

use crate::speech::Language;
use crate::Cms;

/// Speak `text` with the configured speech program
pub async fn run(cms: &Cms, text: &str, language: Language) -> Result<()> {
    let speaker = cms.speaker();
    tracing::info!("Speaking in {} at rate {}", language, speaker.rate());
    speaker.speak(text, language).await?;
    Ok(())
}
