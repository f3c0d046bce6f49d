//! Document models

use serde::Serialize;

use super::{FrontmatterMetadata, TocEntry};
use crate::resolver::ContentKey;

/// A rendered documentation page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Key the document was loaded for
    pub key: ContentKey,

    /// Source file path relative to the content directory
    pub source: String,

    /// Rendered HTML body
    pub html: String,
}

/// Everything the content store knows about one page
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    pub document: Document,
    pub toc: Vec<TocEntry>,
    pub metadata: FrontmatterMetadata,
}

/// An entry of the site navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMapEntry {
    pub key: ContentKey,
    pub title: String,
    pub source: String,
}

/// Title derived from the last key segment (`getting-started` -> `Getting Started`)
pub fn title_from_key(key: &ContentKey) -> String {
    let Some(last) = key.segments().last() else {
        return "Home".to_string();
    };

    last.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
