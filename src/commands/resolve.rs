//! Resolve a single path and print the outcome

use anyhow::Result;
use serde_json::{json, Value};

use crate::resolver::{Resolution, ResolutionOutcome, RoutePath};
use crate::Site;

/// JSON view of a resolution
pub fn to_json(resolution: &Resolution) -> Value {
    match &resolution.outcome {
        ResolutionOutcome::Found {
            document,
            toc,
            metadata,
        } => json!({
            "key": resolution.key,
            "outcome": "found",
            "source": document.source,
            "toc": toc,
            "metadata": metadata,
        }),
        ResolutionOutcome::NotFound { metadata } => json!({
            "key": resolution.key,
            "outcome": "not_found",
            "metadata": metadata,
        }),
    }
}

pub async fn run(site: &Site, path: &str) -> Result<()> {
    let resolution = site.resolver().resolve(&RoutePath::from_uri_path(path)).await;
    println!("{}", serde_json::to_string_pretty(&to_json(&resolution))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_site() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(
            content.join("faq.md"),
            "---\ntitle: FAQ\nopenGraph:\n  type: website\n---\n\n## Billing\n",
        )
        .unwrap();
        let site = Site::new(tmp.path()).unwrap();
        (tmp, site)
    }

    #[tokio::test]
    async fn test_found_json() {
        let (_tmp, site) = sample_site();
        let resolution = site.resolver().resolve(&RoutePath::from_uri_path("/faq/")).await;
        let value = to_json(&resolution);

        assert_eq!(value["key"], "faq");
        assert_eq!(value["outcome"], "found");
        assert_eq!(value["source"], "faq.md");
        assert_eq!(value["toc"][0]["id"], "billing");
        assert_eq!(value["metadata"]["title"], "FAQ");
        assert_eq!(value["metadata"]["openGraph"]["type"], "website");
        assert_eq!(value["metadata"]["robots"]["index"], true);
    }

    #[tokio::test]
    async fn test_not_found_json() {
        let (_tmp, site) = sample_site();
        let resolution = site
            .resolver()
            .resolve(&RoutePath::from_uri_path("/missing"))
            .await;
        let value = to_json(&resolution);

        assert_eq!(value["outcome"], "not_found");
        assert_eq!(value["metadata"]["robots"]["index"], false);
        assert!(value.get("toc").is_none());
    }
}
