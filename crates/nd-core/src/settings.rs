//! # Site settings
//!
//! A flat key-value blob. Known keys are typed; anything else a front end
//! stores is carried through untouched in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site_name: String,
    pub site_description: String,
    pub theme: String,
    pub auto_update: bool,
    /// Feed refresh period in milliseconds
    pub update_interval: u64,
    pub max_news_per_page: u32,
    pub enable_comments: bool,
    pub enable_analytics: bool,
    pub radio_enabled: bool,
    pub search_enabled: bool,
    pub categories_enabled: bool,
    pub notifications_enabled: bool,
    pub pwa_enabled: bool,
    pub radio_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "Portal de Noticias Profesional".to_string(),
            site_description: "Portal profesional de noticias en tiempo real".to_string(),
            theme: "light".to_string(),
            auto_update: true,
            update_interval: 30_000,
            max_news_per_page: 20,
            enable_comments: true,
            enable_analytics: true,
            radio_enabled: true,
            search_enabled: true,
            categories_enabled: true,
            notifications_enabled: true,
            pwa_enabled: true,
            radio_url: "https://stream-ssl.radiosenlinea.com.ar:18069/".to_string(),
            extra: Map::new(),
        }
    }
}

/// Partial settings write. Present fields replace the stored ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_news_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_comments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_analytics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pwa_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Shallow merge: every field present in `patch` wins.
    pub fn merge(&mut self, patch: SettingsPatch) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut self.site_name, patch.site_name);
        set(&mut self.site_description, patch.site_description);
        set(&mut self.theme, patch.theme);
        set(&mut self.auto_update, patch.auto_update);
        set(&mut self.update_interval, patch.update_interval);
        set(&mut self.max_news_per_page, patch.max_news_per_page);
        set(&mut self.enable_comments, patch.enable_comments);
        set(&mut self.enable_analytics, patch.enable_analytics);
        set(&mut self.radio_enabled, patch.radio_enabled);
        set(&mut self.search_enabled, patch.search_enabled);
        set(&mut self.categories_enabled, patch.categories_enabled);
        set(&mut self.notifications_enabled, patch.notifications_enabled);
        set(&mut self.pwa_enabled, patch.pwa_enabled);
        set(&mut self.radio_url, patch.radio_url);
        self.extra.extend(patch.extra);
    }
}
