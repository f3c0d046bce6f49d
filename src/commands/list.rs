//! List site pages

use anyhow::Result;

use crate::content::{ContentStore, PageMapEntry};
use crate::helpers::page_url;
use crate::Site;

/// Every routable page of the site
pub async fn pages(site: &Site) -> Result<Vec<PageMapEntry>> {
    Ok(site.store().page_map().await?)
}

/// Print every page with its URL and title
pub async fn run(site: &Site) -> Result<()> {
    let pages = pages(site).await?;

    println!("Pages ({}):", pages.len());
    for page in pages {
        println!(
            "  {} - {} [{}]",
            page_url(&site.config, &page.key),
            page.title,
            page.source
        );
    }

    Ok(())
}
