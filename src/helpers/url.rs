//! URL helper functions

use crate::config::SiteConfig;
use crate::resolver::ContentKey;

/// Whether a link points off-site
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Make a site path absolute against the configured base URL
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/images/og.png") // -> "https://docs.maraikka.com/images/og.png"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let base = config.url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Site-relative URL of a page
pub fn page_url(config: &SiteConfig, key: &ContentKey) -> String {
    key.url_path(config.trailing_slash)
}
