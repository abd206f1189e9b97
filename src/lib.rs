//! spaceblog: a static blog generator backed by a headless content API
//!
//! This crate fetches blog posts from a hosted content service and renders
//! a listing page plus one detail page per post using Tera templates.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Assets directory (logo, stylesheets)
    pub assets_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new application instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let assets_dir = base_dir.join(&config.assets_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            assets_dir,
            public_dir,
        })
    }

    /// Connect to the content service configured for this site
    pub fn service(&self) -> cms::HttpDocumentService {
        cms::HttpDocumentService::new(&self.config.api_url, self.config.page_size)
    }

    /// Generate the static site
    pub fn generate(&self, service: &dyn cms::DocumentService) -> Result<()> {
        commands::generate::run(self, service)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
