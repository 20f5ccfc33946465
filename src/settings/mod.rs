//! Site settings singleton
//!
//! The settings record is owned by a [`SettingsStore`]. Updates are applied
//! through a [`SettingsPatch`] whose nested groups are either replaced
//! wholesale ([`MergeMode::Shallow`], the default) or merged handle by
//! handle ([`MergeMode::Deep`]). An explicit `null` for a group clears it
//! in either mode.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Site-wide configuration record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub site_name: String,
    pub site_description: String,
    pub site_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
    pub memorial: MemorialStats,
}

/// Social media handles, each optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl SocialMedia {
    /// Overlay `other` on top of `self`, keeping handles `other` leaves unset
    fn merged_with(&self, other: SocialMedia) -> SocialMedia {
        SocialMedia {
            twitter: other.twitter.or_else(|| self.twitter.clone()),
            facebook: other.facebook.or_else(|| self.facebook.clone()),
            linkedin: other.linkedin.or_else(|| self.linkedin.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Analytics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
}

impl Analytics {
    fn merged_with(&self, other: Analytics) -> Analytics {
        Analytics {
            google_analytics_id: other
                .google_analytics_id
                .or_else(|| self.google_analytics_id.clone()),
        }
    }
}

/// Memorial statistics shown on the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorialStats {
    pub total_casualties: u64,
    pub last_updated: NaiveDate,
    /// Data source names, in display order
    #[serde(default)]
    pub data_sources: Vec<String>,
}

impl Default for MemorialStats {
    fn default() -> Self {
        Self {
            total_casualties: 0,
            last_updated: NaiveDate::MIN,
            data_sources: Vec::new(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "Memorial".to_string(),
            site_description: "Remembering the lives behind the numbers".to_string(),
            site_url: "http://localhost:3000".to_string(),
            social_media: Some(SocialMedia::default()),
            analytics: None,
            memorial: MemorialStats::default(),
        }
    }
}

/// Partial settings update. Unset fields leave the current value untouched.
///
/// The optional groups are tri-state: `None` keeps the current group,
/// `Some(None)` clears it and `Some(Some(..))` replaces or merges it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub site_url: Option<String>,
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub social_media: Option<Option<SocialMedia>>,
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub analytics: Option<Option<Analytics>>,
    pub memorial: Option<MemorialStats>,
}

/// Map a present field to `Some`, so `null` becomes `Some(None)`.
/// Absent fields fall back to the struct default of `None`.
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SettingsPatch {
    /// Whether the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }
}

/// How nested groups of a [`SettingsPatch`] are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Nested groups in the patch replace the current ones entirely.
    /// A handle missing from a patched `socialMedia` is cleared.
    #[default]
    Shallow,
    /// Nested groups are merged field by field; handles missing from the
    /// patch keep their current value.
    Deep,
}

/// Owner of the settings singleton
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    current: Settings,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self { current: settings }
    }

    /// A copy of the current settings
    pub fn get(&self) -> Settings {
        self.current.clone()
    }

    /// Borrow the current settings without copying
    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Apply a shallow merge and return the new settings
    pub fn update(&mut self, patch: SettingsPatch) -> Settings {
        self.update_with(patch, MergeMode::Shallow)
    }

    /// Apply a patch with an explicit merge mode and return the new settings
    pub fn update_with(&mut self, patch: SettingsPatch, mode: MergeMode) -> Settings {
        let current = &mut self.current;

        if let Some(site_name) = patch.site_name {
            current.site_name = site_name;
        }
        if let Some(site_description) = patch.site_description {
            current.site_description = site_description;
        }
        if let Some(site_url) = patch.site_url {
            current.site_url = site_url;
        }

        match patch.social_media {
            Some(Some(social)) => {
                current.social_media = Some(match (mode, &current.social_media) {
                    (MergeMode::Deep, Some(existing)) => existing.merged_with(social),
                    _ => social,
                });
            }
            Some(None) => current.social_media = None,
            None => {}
        }
        match patch.analytics {
            Some(Some(analytics)) => {
                current.analytics = Some(match (mode, &current.analytics) {
                    (MergeMode::Deep, Some(existing)) => existing.merged_with(analytics),
                    _ => analytics,
                });
            }
            Some(None) => current.analytics = None,
            None => {}
        }
        // No optional fields inside, so both modes replace it.
        if let Some(memorial) = patch.memorial {
            current.memorial = memorial;
        }

        tracing::debug!("Settings updated ({:?} merge)", mode);
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SettingsStore {
        SettingsStore::new(Settings {
            social_media: Some(SocialMedia {
                twitter: Some("@memorial".to_string()),
                facebook: Some("memorial.page".to_string()),
                linkedin: None,
            }),
            analytics: Some(Analytics {
                google_analytics_id: Some("G-123".to_string()),
            }),
            memorial: MemorialStats {
                total_casualties: 100,
                last_updated: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                data_sources: vec!["Ministry of Health".to_string()],
            },
            ..Settings::default()
        })
    }

    #[test]
    fn test_get_returns_copy() {
        let store = seeded();
        let mut copy = store.get();
        copy.site_name = "Changed".to_string();
        assert_eq!(store.current().site_name, "Memorial");
    }

    #[test]
    fn test_top_level_update() {
        let mut store = seeded();
        let updated = store.update(SettingsPatch {
            site_name: Some("Remembrance".to_string()),
            ..Default::default()
        });
        assert_eq!(updated.site_name, "Remembrance");
        assert_eq!(updated.site_description, Settings::default().site_description);
        assert_eq!(store.get(), updated);
    }

    #[test]
    fn test_shallow_update_replaces_nested() {
        let mut store = seeded();
        let updated = store.update(SettingsPatch {
            social_media: Some(Some(SocialMedia {
                linkedin: Some("memorial-org".to_string()),
                ..Default::default()
            })),
            ..Default::default()
        });

        let social = updated.social_media.unwrap();
        assert_eq!(social.linkedin.as_deref(), Some("memorial-org"));
        assert_eq!(social.twitter, None);
        assert_eq!(social.facebook, None);
        // Untouched groups survive
        assert_eq!(
            updated.analytics.unwrap().google_analytics_id.as_deref(),
            Some("G-123")
        );
    }

    #[test]
    fn test_deep_update_merges_nested() {
        let mut store = seeded();
        let updated = store.update_with(
            SettingsPatch {
                social_media: Some(Some(SocialMedia {
                    linkedin: Some("memorial-org".to_string()),
                    ..Default::default()
                })),
                ..Default::default()
            },
            MergeMode::Deep,
        );

        let social = updated.social_media.unwrap();
        assert_eq!(social.linkedin.as_deref(), Some("memorial-org"));
        assert_eq!(social.twitter.as_deref(), Some("@memorial"));
        assert_eq!(social.facebook.as_deref(), Some("memorial.page"));
    }

    #[test]
    fn test_deep_update_without_existing_group() {
        let mut store = SettingsStore::default();
        let updated = store.update_with(
            SettingsPatch {
                analytics: Some(Some(Analytics {
                    google_analytics_id: Some("G-999".to_string()),
                })),
                ..Default::default()
            },
            MergeMode::Deep,
        );
        assert_eq!(
            updated.analytics.unwrap().google_analytics_id.as_deref(),
            Some("G-999")
        );
    }

    #[test]
    fn test_memorial_replaced_wholesale() {
        let mut store = seeded();
        let updated = store.update_with(
            SettingsPatch {
                memorial: Some(MemorialStats {
                    total_casualties: 250,
                    last_updated: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    data_sources: Vec::new(),
                }),
                ..Default::default()
            },
            MergeMode::Deep,
        );
        assert_eq!(updated.memorial.total_casualties, 250);
        assert!(updated.memorial.data_sources.is_empty());
    }

    #[test]
    fn test_patch_from_camel_case_json() {
        let json = r#"{
            "siteName": "Remembrance",
            "socialMedia": { "twitter": "@remember" },
            "memorial": {
                "totalCasualties": 42,
                "lastUpdated": "2024-03-10",
                "dataSources": ["UN OCHA", "Local registry"]
            }
        }"#;
        let patch: SettingsPatch = serde_json::from_str(json).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(patch.site_name.as_deref(), Some("Remembrance"));
        assert_eq!(
            patch.social_media,
            Some(Some(SocialMedia {
                twitter: Some("@remember".to_string()),
                ..Default::default()
            }))
        );
        assert_eq!(patch.analytics, None);
        let memorial = patch.memorial.unwrap();
        assert_eq!(memorial.total_casualties, 42);
        assert_eq!(memorial.data_sources, vec!["UN OCHA", "Local registry"]);
        assert!(SettingsPatch::default().is_empty());
    }

    #[test]
    fn test_null_clears_optional_groups() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"socialMedia": null, "analytics": null}"#).unwrap();
        assert_eq!(patch.social_media, Some(None));
        assert_eq!(patch.analytics, Some(None));
        assert!(!patch.is_empty());

        for mode in [MergeMode::Shallow, MergeMode::Deep] {
            let mut store = seeded();
            let updated = store.update_with(patch.clone(), mode);
            assert!(updated.social_media.is_none());
            assert!(updated.analytics.is_none());
            assert_eq!(updated.memorial.total_casualties, 100);
        }
    }

    #[test]
    fn test_absent_groups_are_kept() {
        let mut store = seeded();
        let patch: SettingsPatch = serde_json::from_str(r#"{"siteUrl": "https://memorial.example"}"#).unwrap();
        let updated = store.update(patch);
        assert_eq!(updated.site_url, "https://memorial.example");
        assert!(updated.social_media.is_some());
        assert!(updated.analytics.is_some());
    }
}
