//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::SiteMetadata;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // URL
    /// Absolute base URL, used to make canonical and image URLs absolute
    pub url: String,
    pub trailing_slash: bool,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub output_dir: String,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Defaults for page metadata
    #[serde(default)]
    pub metadata: SiteMetadata,

    // Chrome around every page
    #[serde(default)]
    pub layout: LayoutConfig,

    // /.well-known/ai.txt
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://docs.maraikka.com".to_string(),
            trailing_slash: true,

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            output_dir: "out".to_string(),

            highlight: HighlightConfig::default(),
            metadata: SiteMetadata::default(),
            layout: LayoutConfig::default(),
            policy: PolicyConfig::default(),
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

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// A plain navigation link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    pub href: String,
}

impl LinkConfig {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// A card on the not-found page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularPage {
    pub title: String,
    pub href: String,
    pub description: String,
}

/// Navbar, footer and not-found page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub logo_text: String,
    pub logo_image: Option<String>,
    pub project_link: String,
    /// Base for "Edit this page" links; empty disables them
    pub docs_repository_base: String,
    pub edit_link_text: String,
    pub toc_title: String,
    pub home_link: String,
    pub getting_started_link: String,
    #[serde(default)]
    pub footer_links: Vec<LinkConfig>,
    pub copyright_holder: LinkConfig,
    pub copyright_year: String,
    #[serde(default)]
    pub legal_links: Vec<LinkConfig>,
    #[serde(default)]
    pub popular_pages: Vec<PopularPage>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            logo_text: "Docs".to_string(),
            logo_image: Some("/logo-full.png".to_string()),
            project_link: "https://github.com/puzzlers-labs/maraikka".to_string(),
            docs_repository_base: "https://github.com/puzzlers-labs/maraikka-docs/tree/main"
                .to_string(),
            edit_link_text: "Edit this page on GitHub".to_string(),
            toc_title: "On This Page".to_string(),
            home_link: "https://maraikka.com".to_string(),
            getting_started_link: "/getting-started".to_string(),
            footer_links: vec![
                LinkConfig::new("Official Website", "https://maraikka.com"),
                LinkConfig::new("GitHub", "https://github.com/puzzlers-labs/maraikka"),
            ],
            copyright_holder: LinkConfig::new("Puzzlers Labs", "https://puzzlers-labs.com"),
            copyright_year: "2024".to_string(),
            legal_links: vec![
                LinkConfig::new("Privacy Policy", "https://maraikka.com/privacy-policy"),
                LinkConfig::new(
                    "Terms & Conditions",
                    "https://maraikka.com/terms-and-conditions",
                ),
                LinkConfig::new("Support", "https://maraikka.com/support"),
            ],
            popular_pages: vec![
                PopularPage {
                    title: "Getting Started".to_string(),
                    href: "/getting-started".to_string(),
                    description: "Installation, setup, and basic usage guide".to_string(),
                },
                PopularPage {
                    title: "User Guide".to_string(),
                    href: "/user-guide".to_string(),
                    description: "Complete usage documentation and tutorials".to_string(),
                },
                PopularPage {
                    title: "Features".to_string(),
                    href: "/features".to_string(),
                    description: "Comprehensive platform features and capabilities".to_string(),
                },
            ],
        }
    }
}

/// Crawler access rule in ai.txt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRule {
    pub user_agent: String,
    pub allow: String,
}

/// AI training policy served at /.well-known/ai.txt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub heading: String,
    #[serde(default)]
    pub agents: Vec<AgentRule>,
    pub training_data: String,
    pub commercial_use: String,
    pub attribution: String,
    pub contact: String,
    pub policy_url: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Cache-Control max-age in seconds
    pub max_age: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let agents = [
            "*",
            "OpenAI-GPT",
            "Google-Bard",
            "Claude-Bot",
            "ChatGPT-User",
            "CCBot",
            "anthropic-ai",
            "Claude-Web",
        ]
        .into_iter()
        .map(|agent| AgentRule {
            user_agent: agent.to_string(),
            allow: "/".to_string(),
        })
        .collect();

        Self {
            heading: "AI Training Policy for Maraikka Documentation".to_string(),
            agents,
            training_data: "allowed".to_string(),
            commercial_use: "allowed".to_string(),
            attribution: "preferred".to_string(),
            contact: "https://maraikka.com/contact".to_string(),
            policy_url: "https://docs.maraikka.com/.well-known/ai.txt".to_string(),
            description: "Maraikka is a secure file encryption and protection solution. This documentation covers installation, usage, security features, and best practices for protecting sensitive data.".to_string(),
            keywords: [
                "file encryption",
                "data protection",
                "security",
                "privacy",
                "file security",
                "encryption software",
                "data safety",
                "secure storage",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_age: 86400,
        }
    }
}
