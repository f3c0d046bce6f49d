//! Content store - looks up Markdown documents by content key

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::{DirEntry, WalkDir};

use super::{
    title_from_key, Document, FrontmatterMetadata, LoadedPage, MarkdownRenderer, PageMapEntry,
};
use crate::error::ContentError;
use crate::resolver::{ContentKey, RoutePath};

/// File extensions recognised as pages, in lookup order
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Source of documentation pages
///
/// Implementations must be safe to call concurrently; the resolver never
/// serialises lookups.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Load the page stored under `key`
    async fn fetch(&self, key: &ContentKey) -> Result<LoadedPage, ContentError>;

    /// Every page in the store, sorted by key
    async fn page_map(&self) -> Result<Vec<PageMapEntry>, ContentError>;
}

/// Content store backed by a directory of Markdown files
///
/// `a/b` is looked up as `a/b.md`, `a/b.mdx`, `a/b/index.md` and
/// `a/b/index.mdx`, in that order. Files and directories starting with `_`
/// or `.` are not pages, and a key ending in `index` is not a page either:
/// index files are only reachable through their directory's key.
pub struct FsContentStore {
    content_dir: PathBuf,
    renderer: Arc<MarkdownRenderer>,
}

impl FsContentStore {
    pub fn new<P: Into<PathBuf>>(content_dir: P, renderer: MarkdownRenderer) -> Self {
        Self {
            content_dir: content_dir.into(),
            renderer: Arc::new(renderer),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    fn candidates(&self, key: &ContentKey) -> Vec<PathBuf> {
        let mut dir = self.content_dir.clone();
        let mut candidates = Vec::new();

        let segments: Vec<&str> = key.segments().collect();
        if let Some((last, parents)) = segments.split_last() {
            for parent in parents {
                dir.push(parent);
            }
            for ext in EXTENSIONS {
                candidates.push(dir.join(format!("{}.{}", last, ext)));
            }
            dir.push(last);
        }

        for ext in EXTENSIONS {
            candidates.push(dir.join(format!("index.{}", ext)));
        }

        candidates
    }

    async fn locate(&self, key: &ContentKey) -> Option<PathBuf> {
        for candidate in self.candidates(key) {
            if let Ok(metadata) = tokio::fs::metadata(&candidate).await {
                if metadata.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn fetch(&self, key: &ContentKey) -> Result<LoadedPage, ContentError> {
        if !is_routable(key) {
            return Err(ContentError::NotFound(key.to_string()));
        }

        let path = self
            .locate(key)
            .await
            .ok_or_else(|| ContentError::NotFound(key.to_string()))?;

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;

        let source = relative_source(&self.content_dir, &path);
        let renderer = Arc::clone(&self.renderer);
        let key = key.clone();
        let task_path = path.clone();

        tokio::task::spawn_blocking(move || build_page(&renderer, key, source, &task_path, &raw))
            .await
            .map_err(|e| ContentError::Render {
                path,
                message: e.to_string(),
            })?
    }

    async fn page_map(&self) -> Result<Vec<PageMapEntry>, ContentError> {
        let content_dir = self.content_dir.clone();
        tokio::task::spawn_blocking(move || scan_pages(&content_dir))
            .await
            .map_err(|e| ContentError::Render {
                path: self.content_dir.clone(),
                message: e.to_string(),
            })
    }
}

/// Parse and render one page
fn build_page(
    renderer: &MarkdownRenderer,
    key: ContentKey,
    source: String,
    path: &Path,
    raw: &str,
) -> Result<LoadedPage, ContentError> {
    let (mut metadata, body) =
        FrontmatterMetadata::parse(raw).map_err(|e| ContentError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let rendered = renderer.render(body).map_err(|e| ContentError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // Pages without a front-matter title are titled by their first heading
    if metadata.title().is_none() {
        if let Some(heading) = rendered.first_heading {
            metadata.title = Some(heading);
        }
    }

    Ok(LoadedPage {
        document: Document {
            key,
            source,
            html: rendered.html,
        },
        toc: rendered.toc,
        metadata,
    })
}

/// Walk the content directory and list every page
fn scan_pages(content_dir: &Path) -> Vec<PageMapEntry> {
    if !content_dir.exists() {
        return Vec::new();
    }

    // (entry, lookup rank) so duplicates resolve the way `fetch` does
    let mut found: Vec<(PageMapEntry, u8)> = Vec::new();

    for entry in WalkDir::new(content_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_markdown_file(path) {
            continue;
        }

        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        let Some((key, rank)) = key_for_file(relative) else {
            tracing::warn!("Skipping page with unroutable path {:?}", relative);
            continue;
        };

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read page {:?}: {}", path, e);
                continue;
            }
        };

        let title = page_title(&raw).unwrap_or_else(|| title_from_key(&key));
        let source = relative_source(content_dir, path);
        found.push((PageMapEntry { key, title, source }, rank));
    }

    found.sort_by(|(a, a_rank), (b, b_rank)| a.key.cmp(&b.key).then(a_rank.cmp(b_rank)));

    let mut pages: Vec<PageMapEntry> = Vec::with_capacity(found.len());
    for (entry, _) in found {
        match pages.last() {
            Some(previous) if previous.key == entry.key => {
                tracing::warn!(
                    "{} and {} both map to {}, using the former",
                    previous.source,
                    entry.source,
                    entry.key
                );
            }
            _ => pages.push(entry),
        }
    }

    pages
}

/// Content key of a page file and its rank among files for the same key
fn key_for_file(relative: &Path) -> Option<(ContentKey, u8)> {
    let mut segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect::<Option<_>>()?;

    let file_name = segments.pop()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    let ext_rank = EXTENSIONS.iter().position(|e| *e == ext)? as u8;

    let is_index = stem == "index";
    if !is_index {
        segments.push(stem.to_string());
    }

    let route = RoutePath::new(segments);
    if !route.is_well_formed() {
        return None;
    }

    let key = route.normalize();
    if !is_routable(&key) {
        return None;
    }

    let rank = ext_rank + if is_index { 2 } else { 0 };
    Some((key, rank))
}

/// Front-matter title, else the first level-1 heading
fn page_title(raw: &str) -> Option<String> {
    let (metadata, body) = FrontmatterMetadata::parse(raw).ok()?;
    match metadata.title() {
        Some(title) => Some(title.to_string()),
        None => MarkdownRenderer::first_heading(body),
    }
}

/// Whether `key` names a page rather than a partial, hidden file or bare index
fn is_routable(key: &ContentKey) -> bool {
    !key.segments().any(is_hidden_name) && key.segments().last() != Some("index")
}

fn is_hidden_name(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().map(is_hidden_name).unwrap_or(false)
}

/// Check if a file is a page source
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

fn relative_source(content_dir: &Path, path: &Path) -> String {
    path.strip_prefix(content_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
