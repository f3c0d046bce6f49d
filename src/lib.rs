//! mdocs: a documentation site server
//!
//! Maps request paths to Markdown documents, derives complete SEO and
//! social-sharing metadata for each page, and serves the result over HTTP or
//! exports it as a static tree.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod render;
pub mod resolver;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{FsContentStore, MarkdownRenderer};
use resolver::{ContentResolver, MetadataSynthesizer};

/// A documentation site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: Arc<config::SiteConfig>,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown sources
    pub content_dir: PathBuf,
    /// Static assets served verbatim
    pub public_dir: PathBuf,
    /// Static export target
    pub output_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::from_config(base_dir, config))
    }

    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config: Arc::new(config),
            base_dir,
            content_dir,
            public_dir,
            output_dir,
        }
    }

    /// Content store reading from `content_dir`
    pub fn store(&self) -> FsContentStore {
        let highlight = &self.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number);
        FsContentStore::new(&self.content_dir, renderer)
    }

    /// Resolver over this site's content and metadata defaults
    pub fn resolver(&self) -> ContentResolver {
        ContentResolver::new(
            Arc::new(self.store()),
            MetadataSynthesizer::new(self.config.metadata.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_site_without_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.content_dir, tmp.path().join("content"));
        assert_eq!(site.public_dir, tmp.path().join("public"));
        assert_eq!(site.output_dir, tmp.path().join("out"));
        assert_eq!(site.config.url, "https://docs.maraikka.com");
    }

    #[test]
    fn test_site_reads_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("_config.yml"),
            "content_dir: docs\nmetadata:\n  title: Other Docs\n",
        )
        .unwrap();

        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.content_dir, tmp.path().join("docs"));
        assert_eq!(site.config.metadata.title, "Other Docs");
        assert_eq!(site.resolver().synthesizer().defaults().title, "Other Docs");
    }
}
