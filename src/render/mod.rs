//! HTML views
//!
//! Two views exist: a documentation page and the branded not-found page.
//! Both share the chrome in [`layout`] and the head built by [`head`].

mod head;
mod layout;

pub use head::render_head;
pub use layout::page_shell;

use crate::config::SiteConfig;
use crate::content::{Document, PageMapEntry, TocEntry};
use crate::helpers::{html_escape, link_to, page_url};
use crate::resolver::ResolvedMetadata;

/// Render a documentation page with sidebar, table of contents and edit link
pub fn render_document(
    config: &SiteConfig,
    document: &Document,
    toc: &[TocEntry],
    meta: &ResolvedMetadata,
    nav: &[PageMapEntry],
) -> String {
    let body = format!(
        r#"<div class="layout">{sidebar}<main><article>{content}</article>{edit}</main>{toc}</div>"#,
        sidebar = sidebar(config, document, nav),
        content = document.html,
        edit = edit_link(config, document),
        toc = table_of_contents(config, toc),
    );
    page_shell(config, meta, &body)
}

/// Render the not-found page
pub fn render_not_found(config: &SiteConfig, meta: &ResolvedMetadata) -> String {
    let layout = &config.layout;

    let popular: String = layout
        .popular_pages
        .iter()
        .map(|page| {
            format!(
                r#"<a href="{}"><strong>{}</strong><p>{}</p></a>"#,
                html_escape(&page.href),
                html_escape(&page.title),
                html_escape(&page.description)
            )
        })
        .collect();

    let body = format!(
        concat!(
            r#"<main class="not-found">"#,
            r#"<p class="code">404</p>"#,
            "<h1>{title}</h1>",
            "<p>{description} Let&#39;s get you back to protecting what matters.</p>",
            r#"<div class="actions">{home}{start}</div>"#,
            "<h2>Popular Pages</h2>",
            r#"<div class="popular">{popular}</div>"#,
            "<p>Can&#39;t find what you&#39;re looking for? Try using the search bar above or {back}.</p>",
            "</main>"
        ),
        title = html_escape(&meta.title),
        description = html_escape(&meta.description),
        home = link_to(&layout.home_link, "Go Home", Some("btn primary")),
        start = link_to(&layout.getting_started_link, "Getting Started", Some("btn")),
        popular = popular,
        back = link_to(&layout.home_link, "return to the homepage", None),
    );
    page_shell(config, meta, &body)
}

fn sidebar(config: &SiteConfig, document: &Document, nav: &[PageMapEntry]) -> String {
    let items: String = nav
        .iter()
        .map(|entry| {
            let class = (entry.key == document.key).then_some("active");
            format!(
                "<li>{}</li>",
                link_to(&page_url(config, &entry.key), &entry.title, class)
            )
        })
        .collect();
    format!(r#"<aside class="sidebar"><nav><ul>{}</ul></nav></aside>"#, items)
}

fn table_of_contents(config: &SiteConfig, toc: &[TocEntry]) -> String {
    if toc.is_empty() {
        return r#"<aside class="toc"></aside>"#.to_string();
    }

    let items: String = toc
        .iter()
        .map(|entry| {
            format!(
                r##"<li class="depth-{}"><a href="#{}">{}</a></li>"##,
                entry.depth,
                html_escape(&entry.id),
                html_escape(&entry.value)
            )
        })
        .collect();

    format!(
        r##"<aside class="toc"><p><strong>{}</strong></p><ul>{}</ul><a class="back-to-top" href="#">Scroll to top</a></aside>"##,
        html_escape(&config.layout.toc_title),
        items
    )
}

fn edit_link(config: &SiteConfig, document: &Document) -> String {
    let base = config.layout.docs_repository_base.trim_end_matches('/');
    if base.is_empty() {
        return String::new();
    }

    let href = format!(
        "{}/{}/{}",
        base,
        config.content_dir.trim_matches('/'),
        document.source
    );
    link_to(&href, &config.layout.edit_link_text, Some("edit-link"))
}
