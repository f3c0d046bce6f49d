//! Page head: title, SEO and social-sharing tags

use crate::config::SiteConfig;
use crate::helpers::{full_url_for, html_escape, meta_generator, meta_name, meta_property};
use crate::resolver::ResolvedMetadata;

/// Render the contents of `<head>` for a page
pub fn render_head(config: &SiteConfig, meta: &ResolvedMetadata) -> String {
    let site = &config.metadata;
    let mut tags = vec![
        r#"<meta charset="utf-8">"#.to_string(),
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#.to_string(),
        format!(
            "<title>{}</title>",
            html_escape(&site.document_title(&meta.title))
        ),
        meta_name("description", &meta.description),
        meta_name("application-name", &site.application_name),
        meta_generator(),
        meta_name("referrer", "origin-when-cross-origin"),
    ];

    if !meta.keywords.is_empty() {
        tags.push(meta_name("keywords", &meta.keywords.join(",")));
    }
    for author in &meta.authors {
        tags.push(meta_name("author", &author.name));
    }
    tags.push(meta_name("creator", &site.publisher));
    tags.push(meta_name("publisher", &site.publisher));
    tags.push(meta_name("category", &meta.category));

    if let Some(canonical) = &meta.canonical {
        tags.push(format!(
            r#"<link rel="canonical" href="{}">"#,
            html_escape(&full_url_for(config, canonical))
        ));
    }

    // Robots
    tags.push(meta_name("robots", &meta.robots.directives()));
    if let Some(google_bot) = &meta.robots.google_bot {
        tags.push(meta_name("googlebot", &google_bot.directives()));
    }

    // Open Graph
    let og = &meta.open_graph;
    tags.push(meta_property("og:title", &og.title));
    tags.push(meta_property("og:description", &og.description));
    if let Some(url) = &og.url {
        tags.push(meta_property("og:url", &full_url_for(config, url)));
    }
    tags.push(meta_property("og:site_name", &og.site_name));
    tags.push(meta_property("og:locale", &og.locale));
    for image in &og.images {
        tags.push(meta_property("og:image", &full_url_for(config, &image.url)));
        if let Some(width) = image.width {
            tags.push(meta_property("og:image:width", &width.to_string()));
        }
        if let Some(height) = image.height {
            tags.push(meta_property("og:image:height", &height.to_string()));
        }
        if let Some(alt) = &image.alt {
            tags.push(meta_property("og:image:alt", alt));
        }
    }
    tags.push(meta_property("og:type", &og.og_type));

    // Article data
    let article = &meta.article;
    tags.push(meta_name("article:author", &article.author));
    tags.push(meta_name("article:section", &article.section));
    if let Some(modified) = &article.modified_time {
        tags.push(meta_name("article:modified_time", modified));
    }
    if let Some(published) = &article.published_time {
        tags.push(meta_name("article:published_time", published));
    }
    tags.push(meta_name("docsearch:language", &article.docsearch_language));
    tags.push(meta_name("docsearch:version", &article.docsearch_version));

    // Twitter
    let twitter = &meta.twitter;
    tags.push(meta_name("twitter:card", &twitter.card));
    tags.push(meta_name("twitter:creator", &twitter.creator));
    tags.push(meta_name("twitter:title", &twitter.title));
    tags.push(meta_name("twitter:description", &twitter.description));
    for image in &twitter.images {
        tags.push(meta_name("twitter:image", &full_url_for(config, image)));
    }

    tags.join("\n")
}
