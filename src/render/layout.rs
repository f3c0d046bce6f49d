//! Page chrome shared by every view: document shell, navbar and footer

use super::head::render_head;
use crate::config::SiteConfig;
use crate::helpers::{html_escape, link_to};
use crate::resolver::ResolvedMetadata;

const STYLE: &str = r#"
:root { --fg: #111827; --muted: #6b7280; --accent: #2563eb; --border: #e5e7eb; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, sans-serif; color: var(--fg); line-height: 1.6; }
a { color: var(--accent); text-decoration: none; }
a:hover { text-decoration: underline; }
.navbar { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; border-bottom: 1px solid var(--border); }
.navbar .logo { display: flex; align-items: center; gap: 0.5rem; font-weight: 700; color: var(--fg); }
.navbar .logo img { height: 28px; }
.layout { display: grid; grid-template-columns: 16rem minmax(0, 1fr) 14rem; gap: 2rem; max-width: 90rem; margin: 0 auto; padding: 2rem 1.5rem; }
.sidebar ul, .toc ul { list-style: none; margin: 0; padding: 0; }
.sidebar li { margin: 0.25rem 0; }
.sidebar a.active { font-weight: 600; }
.toc { font-size: 0.875rem; }
.toc .depth-3 { padding-left: 0.75rem; }
.toc .depth-4, .toc .depth-5, .toc .depth-6 { padding-left: 1.5rem; }
.edit-link { display: inline-block; margin-top: 2rem; font-size: 0.875rem; }
figure.highlight { margin: 1rem 0; overflow-x: auto; }
pre { padding: 1rem; border-radius: 6px; overflow-x: auto; }
.footer { display: flex; flex-wrap: wrap; justify-content: space-between; gap: 1rem; padding: 1.5rem; border-top: 1px solid var(--border); color: var(--muted); font-size: 0.875rem; }
.footer nav { display: flex; gap: 1rem; }
.not-found { max-width: 48rem; margin: 4rem auto; padding: 0 1.5rem; text-align: center; }
.not-found .code { font-size: 6rem; font-weight: 800; margin: 0; }
.not-found .actions { display: flex; justify-content: center; gap: 1rem; margin: 2rem 0; }
.btn { padding: 0.6rem 1.2rem; border-radius: 6px; border: 1px solid var(--accent); }
.btn.primary { background: var(--accent); color: #fff; }
.popular { display: grid; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); gap: 1rem; text-align: left; }
.popular a { display: block; padding: 1rem; border: 1px solid var(--border); border-radius: 6px; }
.popular p { margin: 0.25rem 0 0; color: var(--muted); }
"#;

/// Wrap a page body in the full HTML document
pub fn page_shell(config: &SiteConfig, meta: &ResolvedMetadata, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n{head}\n<style>{style}</style>\n</head>\n<body>\n{navbar}\n{body}\n{footer}\n</body>\n</html>\n",
        lang = html_escape(&lang_of(&config.metadata.locale)),
        head = render_head(config, meta),
        style = STYLE,
        navbar = navbar(config),
        body = body,
        footer = footer(config),
    )
}

/// `en_US` -> `en`
fn lang_of(locale: &str) -> String {
    locale
        .split(['_', '-'])
        .next()
        .filter(|l| !l.is_empty())
        .unwrap_or("en")
        .to_string()
}

fn navbar(config: &SiteConfig) -> String {
    let layout = &config.layout;
    let logo = match &layout.logo_image {
        Some(src) => format!(
            r#"<img src="{}" alt="{}"><span>{}</span>"#,
            html_escape(src),
            html_escape(&config.metadata.site_name),
            html_escape(&layout.logo_text)
        ),
        None => html_escape(&layout.logo_text),
    };

    format!(
        r#"<header class="navbar"><a class="logo" href="/">{}</a><nav>{}</nav></header>"#,
        logo,
        link_to(&layout.project_link, "GitHub", None)
    )
}

fn footer(config: &SiteConfig) -> String {
    let layout = &config.layout;
    let links = |links: &[crate::config::LinkConfig]| {
        links
            .iter()
            .map(|l| link_to(&l.href, &l.label, None))
            .collect::<Vec<_>>()
            .join("")
    };

    format!(
        r#"<footer class="footer"><nav>{}</nav><div>&copy; {} {}. All rights reserved.</div><nav>{}</nav></footer>"#,
        links(&layout.footer_links),
        html_escape(&layout.copyright_year),
        link_to(
            &layout.copyright_holder.href,
            &layout.copyright_holder.label,
            None
        ),
        links(&layout.legal_links)
    )
}
