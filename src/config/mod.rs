//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// Locale tag used for date formatting (e.g. "pt-BR", "en", "es")
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Content service
    /// Search endpoint of the content service
    pub api_url: String,
    /// Page size requested from the content service
    pub page_size: usize,

    // Directory
    pub assets_dir: String,
    pub public_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            description: String::new(),
            author: String::new(),
            language: "pt-BR".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            api_url: "https://spacetraveling.cdn.prismic.io/api/v2/documents/search".to_string(),
            page_size: 20,

            assets_dir: "assets".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
