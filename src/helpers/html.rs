//! HTML helper functions

use super::url::is_external;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `<meta name="..." content="...">`
pub fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        html_escape(name),
        html_escape(content)
    )
}

/// `<meta property="..." content="...">`
pub fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        html_escape(property),
        html_escape(content)
    )
}

/// Generate an anchor tag; off-site links open in a new tab
///
/// # Examples
/// ```ignore
/// link_to("/faq/", "FAQ", None) // -> <a href="/faq/">FAQ</a>
/// ```
pub fn link_to(href: &str, text: &str, class: Option<&str>) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, html_escape(c)))
        .unwrap_or_default();

    if is_external(href) {
        format!(
            r#"<a href="{}"{} target="_blank" rel="noopener">{}</a>"#,
            html_escape(href),
            class_attr,
            html_escape(text)
        )
    } else {
        format!(
            r#"<a href="{}"{}>{}</a>"#,
            html_escape(href),
            class_attr,
            html_escape(text)
        )
    }
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    meta_name("generator", &format!("mdocs {}", env!("CARGO_PKG_VERSION")))
}
