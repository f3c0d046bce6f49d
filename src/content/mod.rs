//! Content module - front-matter, Markdown rendering and the content store

mod document;
mod frontmatter;
mod markdown;
mod store;

pub use document::{title_from_key, Document, LoadedPage, PageMapEntry};
pub use frontmatter::{FrontmatterMetadata, ImageDescriptor, OpenGraphOverrides, TwitterOverrides};
pub use markdown::{MarkdownRenderer, RenderedMarkdown, TocEntry};
pub use store::{ContentStore, FsContentStore};
