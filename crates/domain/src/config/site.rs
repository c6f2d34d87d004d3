use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Site identity
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Brand name shown in page titles.
    #[serde(default = "d_name")]
    pub name: String,
    /// Public origin, used when building absolute links.
    #[serde(default = "d_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: d_name(),
            base_url: d_base_url(),
        }
    }
}

fn d_name() -> String {
    "Parkline".into()
}

fn d_base_url() -> String {
    "http://localhost:4321".into()
}
