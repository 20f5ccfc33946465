//! Show or update site settings

use anyhow::{Context, Result};

use crate::settings::{MergeMode, Settings, SettingsPatch};
use crate::Cms;

/// Apply an optional JSON patch, then print the settings
pub fn run(cms: &mut Cms, patch: Option<&str>, mode: MergeMode, json: bool) -> Result<()> {
    let settings = match patch {
        Some(raw) => {
            let patch: SettingsPatch =
                serde_json::from_str(raw).context("Settings patch must be a JSON object")?;
            if patch.is_empty() {
                tracing::warn!("Settings patch has no recognized fields");
            }
            cms.settings.update_with(patch, mode)
        }
        None => cms.settings.get(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        print!("{}", render_settings(&settings));
    }
    Ok(())
}

pub fn render_settings(settings: &Settings) -> String {
    let mut out = format!("{}\n", settings.site_name);
    out.push_str(&format!("  description: {}\n", settings.site_description));
    out.push_str(&format!("  url:         {}\n", settings.site_url));

    if let Some(social) = &settings.social_media {
        let handles = [
            ("twitter", &social.twitter),
            ("facebook", &social.facebook),
            ("linkedin", &social.linkedin),
        ];
        for (network, handle) in handles {
            if let Some(handle) = handle {
                out.push_str(&format!("  {:<12} {}\n", format!("{}:", network), handle));
            }
        }
    }
    if let Some(id) = settings
        .analytics
        .as_ref()
        .and_then(|a| a.google_analytics_id.as_ref())
    {
        out.push_str(&format!("  analytics:   {}\n", id));
    }

    let memorial = &settings.memorial;
    out.push_str(&format!(
        "  memorial:    {} recorded, updated {}\n",
        memorial.total_casualties, memorial.last_updated
    ));
    if !memorial.data_sources.is_empty() {
        out.push_str(&format!("  sources:     {}\n", memorial.data_sources.join(", ")));
    }
    out
}
