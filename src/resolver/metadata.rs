//! Metadata synthesis
//!
//! Turns optional front-matter into a fully populated metadata record. Each
//! field resolves through its own fallback chain:
//!
//! | field                | chain                                                  |
//! |----------------------|--------------------------------------------------------|
//! | `title`              | front-matter title, site title                         |
//! | `description`        | front-matter description, site description             |
//! | `openGraph.title`    | `openGraph.title`, resolved `title`                    |
//! | `openGraph.images`   | `openGraph.images`, site Open Graph image              |
//! | `twitter.title`      | `twitter.title`, resolved `title`                      |
//! | `twitter.images`     | `twitter.images`, site Twitter images                  |
//! | `robots`             | always allow, unless the page was not found            |
//!
//! The Open Graph and Twitter chains never read each other.

use serde::Serialize;
use std::sync::Arc;

use crate::config::SiteMetadata;
use crate::content::{FrontmatterMetadata, ImageDescriptor};

/// Complete page metadata, ready to be written into a page head
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub authors: Vec<Author>,
    pub canonical: Option<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub category: String,
    pub article: ArticleData,
    pub robots: Robots,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub og_type: String,
    pub site_name: String,
    pub locale: String,
    pub url: Option<String>,
    pub images: Vec<ImageDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub creator: String,
}

/// Structured article data for search engines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleData {
    pub author: String,
    pub section: String,
    pub modified_time: Option<String>,
    pub published_time: Option<String>,
    pub docsearch_language: String,
    pub docsearch_version: String,
}

/// Crawler directives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
    pub google_bot: Option<GoogleBot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleBot {
    pub index: bool,
    pub follow: bool,
    /// -1 means unrestricted
    pub max_video_preview: i32,
    pub max_image_preview: String,
    /// -1 means unrestricted
    pub max_snippet: i32,
}

impl Robots {
    /// Index and follow everything, with unrestricted previews
    pub fn allow_all() -> Self {
        Self {
            index: true,
            follow: true,
            google_bot: Some(GoogleBot {
                index: true,
                follow: true,
                max_video_preview: -1,
                max_image_preview: "large".to_string(),
                max_snippet: -1,
            }),
        }
    }

    /// Neither index nor follow
    pub fn disallow_all() -> Self {
        Self {
            index: false,
            follow: false,
            google_bot: None,
        }
    }

    /// `content` of the robots meta tag
    pub fn directives(&self) -> String {
        index_follow(self.index, self.follow)
    }
}

impl GoogleBot {
    /// `content` of the googlebot meta tag
    pub fn directives(&self) -> String {
        format!(
            "{}, max-video-preview:{}, max-image-preview:{}, max-snippet:{}",
            index_follow(self.index, self.follow),
            self.max_video_preview,
            self.max_image_preview,
            self.max_snippet
        )
    }
}

fn index_follow(index: bool, follow: bool) -> String {
    format!(
        "{}, {}",
        if index { "index" } else { "noindex" },
        if follow { "follow" } else { "nofollow" }
    )
}

/// Non-empty front-matter value
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Non-empty front-matter list
fn present_list<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    (!values.is_empty()).then(|| values.to_vec())
}

/// Builds [`ResolvedMetadata`] from front-matter and site defaults
#[derive(Debug, Clone)]
pub struct MetadataSynthesizer {
    defaults: Arc<SiteMetadata>,
}

impl MetadataSynthesizer {
    pub fn new(defaults: SiteMetadata) -> Self {
        Self {
            defaults: Arc::new(defaults),
        }
    }

    pub fn defaults(&self) -> &SiteMetadata {
        &self.defaults
    }

    /// Resolve metadata for a page; `None` means the page was not found
    pub fn synthesize(&self, raw: Option<&FrontmatterMetadata>) -> ResolvedMetadata {
        match raw {
            Some(raw) => self.found(raw),
            None => self.not_found(),
        }
    }

    fn found(&self, raw: &FrontmatterMetadata) -> ResolvedMetadata {
        let d = &*self.defaults;

        let title = present(&raw.title).unwrap_or(&d.title).to_string();
        let description = present(&raw.description)
            .unwrap_or(&d.description)
            .to_string();

        let og = raw.open_graph.clone().unwrap_or_default();
        let open_graph = OpenGraph {
            title: present(&og.title).unwrap_or(&title).to_string(),
            description: present(&og.description)
                .unwrap_or(&description)
                .to_string(),
            og_type: present(&og.og_type).unwrap_or(&d.og_type).to_string(),
            site_name: d.site_name.clone(),
            locale: d.locale.clone(),
            url: present(&raw.canonical).map(str::to_string),
            images: present_list(&og.images).unwrap_or_else(|| vec![d.og_image.clone()]),
        };

        let tw = raw.twitter.clone().unwrap_or_default();
        let twitter = TwitterCard {
            card: present(&tw.card).unwrap_or(&d.twitter_card).to_string(),
            title: present(&tw.title).unwrap_or(&title).to_string(),
            description: present(&tw.description)
                .unwrap_or(&description)
                .to_string(),
            images: present_list(&tw.images).unwrap_or_else(|| d.twitter_images.clone()),
            creator: d.twitter_creator.clone(),
        };

        let author = present(&raw.author).unwrap_or(&d.author).to_string();
        let section = present(&raw.section).unwrap_or(&d.section).to_string();
        let modified_time = present(&raw.last_modified).map(str::to_string);
        let published_time = present(&raw.published_date)
            .map(str::to_string)
            .or_else(|| modified_time.clone());

        ResolvedMetadata {
            title,
            description,
            keywords: present_list(&raw.keywords).unwrap_or_else(|| d.keywords.clone()),
            authors: vec![Author {
                name: author.clone(),
            }],
            canonical: present(&raw.canonical).map(str::to_string),
            open_graph,
            twitter,
            category: section.clone(),
            article: ArticleData {
                author,
                section,
                modified_time,
                published_time,
                docsearch_language: d.docsearch_language.clone(),
                docsearch_version: d.docsearch_version.clone(),
            },
            robots: Robots::allow_all(),
        }
    }

    /// Fixed metadata for pages that could not be resolved
    pub fn not_found(&self) -> ResolvedMetadata {
        let d = &*self.defaults;

        ResolvedMetadata {
            title: d.not_found_title.clone(),
            description: d.not_found_description.clone(),
            keywords: Vec::new(),
            authors: vec![Author {
                name: d.author.clone(),
            }],
            canonical: None,
            open_graph: OpenGraph {
                title: d.not_found_title.clone(),
                description: d.not_found_description.clone(),
                og_type: "website".to_string(),
                site_name: d.site_name.clone(),
                locale: d.locale.clone(),
                url: None,
                images: vec![d.og_image.clone()],
            },
            twitter: TwitterCard {
                card: d.twitter_card.clone(),
                title: d.not_found_title.clone(),
                description: d.not_found_description.clone(),
                images: d.twitter_images.clone(),
                creator: d.twitter_creator.clone(),
            },
            category: d.section.clone(),
            article: ArticleData {
                author: d.author.clone(),
                section: d.section.clone(),
                modified_time: None,
                published_time: None,
                docsearch_language: d.docsearch_language.clone(),
                docsearch_version: d.docsearch_version.clone(),
            },
            robots: Robots::disallow_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{OpenGraphOverrides, TwitterOverrides};

    fn synthesizer() -> MetadataSynthesizer {
        MetadataSynthesizer::new(SiteMetadata::default())
    }

    #[test]
    fn test_missing_description_uses_default_verbatim() {
        let raw = FrontmatterMetadata {
            title: Some("Getting Started".to_string()),
            ..Default::default()
        };
        let meta = synthesizer().synthesize(Some(&raw));

        assert_eq!(meta.title, "Getting Started");
        assert_eq!(
            meta.description,
            "Documentation for Maraikka - Protect What Matters."
        );
        assert!(meta.robots.index);
        assert!(meta.robots.follow);
    }

    #[test]
    fn test_empty_metadata_gets_site_defaults() {
        let meta = synthesizer().synthesize(Some(&FrontmatterMetadata::default()));
        let defaults = SiteMetadata::default();

        assert_eq!(meta.title, defaults.title);
        assert_eq!(meta.keywords, defaults.keywords);
        assert_eq!(meta.authors, vec![Author { name: "Maraikka Labs".to_string() }]);
        assert_eq!(meta.category, "Documentation");
        assert_eq!(meta.canonical, None);
        assert_eq!(meta.open_graph.og_type, "article");
        assert_eq!(meta.open_graph.images, vec![defaults.og_image.clone()]);
        assert_eq!(meta.open_graph.images[0].width, Some(1200));
        assert_eq!(meta.open_graph.images[0].height, Some(630));
        assert_eq!(meta.twitter.card, "summary_large_image");
        assert_eq!(meta.twitter.images, defaults.twitter_images);
        assert_eq!(meta.twitter.creator, "@MaraikkaLabs");
        assert_eq!(meta.robots, Robots::allow_all());
    }

    #[test]
    fn test_twitter_title_does_not_inherit_open_graph_title() {
        let raw = FrontmatterMetadata {
            title: Some("Key Rotation".to_string()),
            open_graph: Some(OpenGraphOverrides {
                title: Some("Rotate your keys".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let meta = synthesizer().synthesize(Some(&raw));

        assert_eq!(meta.open_graph.title, "Rotate your keys");
        assert_eq!(meta.twitter.title, "Key Rotation");
        assert_eq!(meta.twitter.title, meta.title);
    }

    #[test]
    fn test_twitter_images_do_not_inherit_open_graph_images() {
        let raw = FrontmatterMetadata {
            open_graph: Some(OpenGraphOverrides {
                images: vec![ImageDescriptor::from_url("/og/custom.png")],
                ..Default::default()
            }),
            ..Default::default()
        };
        let meta = synthesizer().synthesize(Some(&raw));

        assert_eq!(meta.open_graph.images[0].url, "/og/custom.png");
        assert_eq!(meta.twitter.images, SiteMetadata::default().twitter_images);
    }

    #[test]
    fn test_overrides_win() {
        let raw = FrontmatterMetadata {
            title: Some("Install".to_string()),
            description: Some("How to install".to_string()),
            author: Some("Jane Writer".to_string()),
            canonical: Some("https://docs.maraikka.com/install/".to_string()),
            section: Some("Setup".to_string()),
            keywords: vec!["install".to_string()],
            twitter: Some(TwitterOverrides {
                card: Some("summary".to_string()),
                description: Some("Install in a minute".to_string()),
                images: vec!["/tw.png".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        };
        let meta = synthesizer().synthesize(Some(&raw));

        assert_eq!(meta.description, "How to install");
        assert_eq!(meta.open_graph.description, "How to install");
        assert_eq!(meta.twitter.description, "Install in a minute");
        assert_eq!(meta.twitter.card, "summary");
        assert_eq!(meta.twitter.images, vec!["/tw.png"]);
        assert_eq!(meta.authors[0].name, "Jane Writer");
        assert_eq!(meta.article.author, "Jane Writer");
        assert_eq!(meta.category, "Setup");
        assert_eq!(meta.article.section, "Setup");
        assert_eq!(meta.keywords, vec!["install"]);
        assert_eq!(
            meta.open_graph.url.as_deref(),
            Some("https://docs.maraikka.com/install/")
        );
        assert_eq!(meta.canonical, meta.open_graph.url);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let raw = FrontmatterMetadata {
            title: Some(String::new()),
            description: Some("   ".to_string()),
            ..Default::default()
        };
        let meta = synthesizer().synthesize(Some(&raw));
        assert_eq!(meta.title, SiteMetadata::default().title);
        assert_eq!(meta.description, SiteMetadata::default().description);
    }

    #[test]
    fn test_published_time_falls_back_to_modified_time() {
        let raw = FrontmatterMetadata {
            last_modified: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        let meta = synthesizer().synthesize(Some(&raw));
        assert_eq!(meta.article.modified_time.as_deref(), Some("2024-05-01"));
        assert_eq!(meta.article.published_time.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_not_found_disallows_indexing() {
        let meta = synthesizer().synthesize(None);
        assert!(!meta.robots.index);
        assert!(!meta.robots.follow);
        assert_eq!(meta.title, "Page Not Found");
        assert_eq!(meta.robots.directives(), "noindex, nofollow");
        assert_eq!(meta, synthesizer().not_found());
    }

    #[test]
    fn test_not_found_ignores_configured_defaults_for_robots() {
        let custom = SiteMetadata {
            title: "Other Docs".to_string(),
            not_found_title: "Missing".to_string(),
            ..Default::default()
        };
        let meta = MetadataSynthesizer::new(custom).synthesize(None);
        assert_eq!(meta.title, "Missing");
        assert_eq!(meta.robots, Robots::disallow_all());
    }

    #[test]
    fn test_directives() {
        let robots = Robots::allow_all();
        assert_eq!(robots.directives(), "index, follow");
        assert_eq!(
            robots.google_bot.unwrap().directives(),
            "index, follow, max-video-preview:-1, max-image-preview:large, max-snippet:-1"
        );
    }
}
