//! Site-wide default metadata
//!
//! Every page's head is filled from its front-matter first and from these
//! values second. The struct is loaded once with the rest of the site
//! configuration and is read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::content::ImageDescriptor;

/// Default metadata used when a page does not provide its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    pub title: String,
    /// `%s` is replaced with the page title
    pub title_template: String,
    pub description: String,
    pub site_name: String,
    pub application_name: String,
    pub locale: String,
    pub keywords: Vec<String>,
    pub author: String,
    pub publisher: String,
    pub section: String,

    // Open Graph
    pub og_type: String,
    pub og_image: ImageDescriptor,

    // Twitter
    pub twitter_card: String,
    pub twitter_images: Vec<String>,
    pub twitter_creator: String,

    // DocSearch
    pub docsearch_language: String,
    pub docsearch_version: String,

    // Not found
    pub not_found_title: String,
    pub not_found_description: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "Maraikka Documentation".to_string(),
            title_template: "%s | Maraikka".to_string(),
            description: "Documentation for Maraikka - Protect What Matters.".to_string(),
            site_name: "Maraikka Documentation".to_string(),
            application_name: "Maraikka Documentation".to_string(),
            locale: "en_US".to_string(),
            keywords: [
                "maraikka",
                "documentation",
                "security",
                "privacy",
                "protect what matters",
                "encryption",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            author: "Maraikka Labs".to_string(),
            publisher: "Puzzlers Labs".to_string(),
            section: "Documentation".to_string(),

            og_type: "article".to_string(),
            og_image: ImageDescriptor {
                url: "/images/maraikka-og-default.png".to_string(),
                width: Some(1200),
                height: Some(630),
                alt: Some("Maraikka Documentation".to_string()),
            },

            twitter_card: "summary_large_image".to_string(),
            twitter_images: vec!["/images/maraikka-twitter-default.png".to_string()],
            twitter_creator: "@MaraikkaLabs".to_string(),

            docsearch_language: "en".to_string(),
            docsearch_version: "latest".to_string(),

            not_found_title: "Page Not Found".to_string(),
            not_found_description:
                "The page you're looking for doesn't exist or has been moved.".to_string(),
        }
    }
}

impl SiteMetadata {
    /// Apply the title template to a page title
    pub fn document_title(&self, title: &str) -> String {
        if self.title_template.contains("%s") {
            self.title_template.replace("%s", title)
        } else {
            title.to_string()
        }
    }
}
