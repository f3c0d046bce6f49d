//! Markdown rendering with syntax highlighting and heading anchors

use anyhow::{anyhow, Result};
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::html_escape;

/// One heading in a page's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub depth: u8,
    pub value: String,
    pub id: String,
}

/// Output of rendering one Markdown document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarkdown {
    pub html: String,
    /// Headings of depth 2 and deeper, in document order
    pub toc: Vec<TocEntry>,
    /// Text of the first level-1 heading
    pub first_heading: Option<String>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    fn options() -> Options {
        // Front-matter is stripped by FrontmatterMetadata::parse, so no YAML blocks here
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_GFM
    }

    /// Render markdown to HTML, collecting the table of contents
    pub fn render(&self, markdown: &str) -> Result<RenderedMarkdown> {
        let parser = Parser::new_ext(markdown, Self::options());

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref())?;
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, buffer)) = code_block.as_mut() {
                        buffer.push_str(&text);
                    }
                }
                _ if code_block.is_some() => {}
                event => events.push(event),
            }
        }

        let (toc, first_heading) = anchor_headings(&mut events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(RenderedMarkdown {
            html: html_output,
            toc,
            first_heading,
        })
    }

    /// Text of the first level-1 heading, without rendering the document
    pub fn first_heading(markdown: &str) -> Option<String> {
        let mut parser = Parser::new_ext(markdown, Self::options());
        while let Some(event) = parser.next() {
            if let Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) = event
            {
                let mut text = String::new();
                for inner in parser.by_ref() {
                    match inner {
                        Event::End(TagEnd::Heading(_)) => break,
                        Event::Text(t) | Event::Code(t) => text.push_str(&t),
                        _ => {}
                    }
                }
                let text = text.trim().to_string();
                return (!text.is_empty()).then_some(text);
            }
        }
        None
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String> {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| anyhow!("No highlighting themes available"))?;

        let class = html_escape(lang);
        let html = match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.line_numbers => add_line_numbers(&highlighted, &class),
            Ok(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                class, highlighted
            ),
            Err(e) => {
                tracing::debug!("Highlighting failed for {}: {}", lang, e);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    class,
                    html_escape(code)
                )
            }
        };

        Ok(html)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap highlighted code in a gutter table; `class` must already be escaped
fn add_line_numbers(code: &str, class: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        class,
        gutter,
        lines.join("\n")
    )
}

/// Give every heading an id and collect the table of contents
///
/// Explicit ids (`# Title {#custom}`) are kept. Generated ids are slugs of
/// the heading text, suffixed `-1`, `-2`, ... until they clash with no
/// other id in the document, explicit ones included.
fn anchor_headings(events: &mut [Event<'_>]) -> (Vec<TocEntry>, Option<String>) {
    let mut toc = Vec::new();
    let mut first_heading = None;

    let explicit: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();
    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();

    let mut i = 0;
    while i < events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[i] else {
            i += 1;
            continue;
        };
        let level = *level;
        let explicit_id = id.as_ref().map(|id| id.to_string());

        let mut text = String::new();
        let mut end = i + 1;
        while end < events.len() {
            match &events[end] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            end += 1;
        }
        let text = text.trim().to_string();

        let anchor = match explicit_id {
            Some(id) => id,
            None => {
                let base = match slug::slugify(&text) {
                    s if s.is_empty() => "section".to_string(),
                    s => s,
                };
                let count = counters.entry(base.clone()).or_insert(0);
                loop {
                    let candidate = if *count == 0 {
                        base.clone()
                    } else {
                        format!("{}-{}", base, count)
                    };
                    *count += 1;
                    if !explicit.contains(&candidate) && !used.contains(&candidate) {
                        break candidate;
                    }
                }
            }
        };
        used.insert(anchor.clone());

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(anchor.clone()));
        }

        let depth = level as u8;
        if depth == 1 {
            if first_heading.is_none() && !text.is_empty() {
                first_heading = Some(text);
            }
        } else {
            toc.push(TocEntry {
                depth,
                value: text,
                id: anchor,
            });
        }

        i = end + 1;
    }

    (toc, first_heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(rendered.html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(rendered.html.contains("<p>This is a test.</p>"));
        assert_eq!(rendered.first_heading.as_deref(), Some("Hello World"));
        assert!(rendered.toc.is_empty());
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(rendered.html.contains("highlight"));
        assert!(!rendered.html.contains("```"));
    }

    #[test]
    fn test_toc_collects_subheadings() {
        let renderer = MarkdownRenderer::new();
        let markdown = "# Guide\n\n## Install `mdocs`\n\ntext\n\n### On Linux\n\n## Install `mdocs`\n";
        let rendered = renderer.render(markdown).unwrap();

        assert_eq!(
            rendered.toc,
            vec![
                TocEntry {
                    depth: 2,
                    value: "Install mdocs".to_string(),
                    id: "install-mdocs".to_string(),
                },
                TocEntry {
                    depth: 3,
                    value: "On Linux".to_string(),
                    id: "on-linux".to_string(),
                },
                TocEntry {
                    depth: 2,
                    value: "Install mdocs".to_string(),
                    id: "install-mdocs-1".to_string(),
                },
            ]
        );
        assert!(rendered.html.contains(r#"<h2 id="install-mdocs-1">"#));
    }

    #[test]
    fn test_explicit_heading_id_is_kept() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("## Keys {#key-management}\n").unwrap();
        assert_eq!(rendered.toc[0].id, "key-management");
        assert_eq!(rendered.toc[0].value, "Keys");
    }

    #[test]
    fn test_generated_ids_avoid_explicit_ones() {
        let renderer = MarkdownRenderer::new();
        let markdown = "## Setup\n\n## Other {#setup}\n\n## Setup\n\n## Setup 1\n";
        let rendered = renderer.render(markdown).unwrap();

        let ids: Vec<&str> = rendered.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["setup-1", "setup", "setup-2", "setup-1-1"]);
        assert!(rendered.html.contains(r#"<h2 id="setup">Other</h2>"#));
    }

    #[test]
    fn test_code_language_is_escaped() {
        let markdown = "```x\"><script>\nalert(1)\n```\n";
        for renderer in [
            MarkdownRenderer::new(),
            MarkdownRenderer::with_options("base16-ocean.dark", false),
        ] {
            let html = renderer.render(markdown).unwrap().html;
            assert!(!html.contains("<script>"), "{}", html);
            assert!(html.contains("x&quot;&gt;&lt;script&gt;"), "{}", html);
        }
    }

    #[test]
    fn test_first_heading_without_rendering() {
        let markdown = "Intro line\n\n# The *Title*\n\n# Second";
        assert_eq!(
            MarkdownRenderer::first_heading(markdown).as_deref(),
            Some("The Title")
        );
        assert_eq!(MarkdownRenderer::first_heading("no headings"), None);
    }
}
