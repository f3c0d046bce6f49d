//! Initialize a new documentation site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

const INDEX_PAGE: &str = r#"---
title: Introduction
description: Start here to learn what this documentation covers.
---

# Introduction

Welcome to the documentation. Head over to [Getting Started](/getting-started/)
to install and set up the product.
"#;

const GETTING_STARTED_PAGE: &str = r#"---
title: Getting Started
description: Installation, setup, and basic usage guide.
section: Guides
---

# Getting Started

## Installation

Download the installer for your platform and run it.

## First steps

Open the application and follow the setup wizard.
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let defaults = SiteConfig::default();

    fs::create_dir_all(target_dir.join(&defaults.content_dir))?;
    fs::create_dir_all(target_dir.join(&defaults.public_dir))?;

    let config_content = format!(
        "# mdocs site configuration\n# Every key is optional; missing keys take the values below.\n\n{}",
        serde_yaml::to_string(&defaults)?
    );

    write_new(&target_dir.join("_config.yml"), &config_content)?;
    write_new(
        &target_dir.join(&defaults.content_dir).join("index.md"),
        INDEX_PAGE,
    )?;
    write_new(
        &target_dir
            .join(&defaults.content_dir)
            .join("getting-started.md"),
        GETTING_STARTED_PAGE,
    )?;

    Ok(())
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        assert!(tmp.path().join("_config.yml").is_file());
        assert!(tmp.path().join("content/index.md").is_file());
        assert!(tmp.path().join("content/getting-started.md").is_file());
        assert!(tmp.path().join("public").is_dir());

        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.metadata.title, "Maraikka Documentation");
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("content")).unwrap();
        fs::write(tmp.path().join("content/index.md"), "# Mine\n").unwrap();

        init_site(tmp.path()).unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("content/index.md")).unwrap(),
            "# Mine\n"
        );
    }

    #[tokio::test]
    async fn test_scaffolded_pages_resolve() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let site = Site::new(tmp.path()).unwrap();
        let pages = crate::content::ContentStore::page_map(&site.store())
            .await
            .unwrap();
        let keys: Vec<&str> = pages.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["", "getting-started"]);
    }
}
