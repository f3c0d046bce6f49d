//! Content resolution
//!
//! A request path goes through three steps:
//!
//! 1. [`RoutePath::normalize`] turns the path segments into a [`ContentKey`].
//! 2. [`ContentResolver::load`] asks the [`ContentStore`] for the page. Any
//!    failure, whatever its cause, becomes [`LoadOutcome::NotFound`].
//! 3. [`MetadataSynthesizer::synthesize`] fills the page metadata, or
//!    produces the fixed not-found record.
//!
//! Only the store lookup suspends. A failed load is final for the request.

mod metadata;
mod path;

pub use metadata::{
    ArticleData, Author, GoogleBot, MetadataSynthesizer, OpenGraph, ResolvedMetadata, Robots,
    TwitterCard,
};
pub use path::{normalize, ContentKey, RoutePath};

use std::sync::Arc;

use crate::content::{ContentStore, Document, LoadedPage, TocEntry};

/// Result of asking the store for a page
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Found(LoadedPage),
    NotFound,
}

/// Result of resolving a request path
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Found {
        document: Document,
        toc: Vec<TocEntry>,
        metadata: ResolvedMetadata,
    },
    NotFound {
        metadata: ResolvedMetadata,
    },
}

impl ResolutionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionOutcome::Found { .. })
    }

    pub fn metadata(&self) -> &ResolvedMetadata {
        match self {
            ResolutionOutcome::Found { metadata, .. } | ResolutionOutcome::NotFound { metadata } => {
                metadata
            }
        }
    }
}

/// A resolved request
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub key: ContentKey,
    pub outcome: ResolutionOutcome,
}

/// Resolves request paths to documents with complete metadata
///
/// Holds no mutable state; clones share the store and the site defaults.
#[derive(Clone)]
pub struct ContentResolver {
    store: Arc<dyn ContentStore>,
    synthesizer: MetadataSynthesizer,
}

impl ContentResolver {
    pub fn new(store: Arc<dyn ContentStore>, synthesizer: MetadataSynthesizer) -> Self {
        Self { store, synthesizer }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    pub fn synthesizer(&self) -> &MetadataSynthesizer {
        &self.synthesizer
    }

    /// Load the page for `key`, collapsing every failure into `NotFound`
    pub async fn load(&self, key: &ContentKey) -> LoadOutcome {
        match self.store.fetch(key).await {
            Ok(page) => LoadOutcome::Found(page),
            Err(e) if e.is_not_found() => {
                tracing::debug!("No page for {}", key);
                LoadOutcome::NotFound
            }
            Err(e) => {
                tracing::warn!("Failed to load {}, serving not found: {}", key, e);
                LoadOutcome::NotFound
            }
        }
    }

    /// Resolve a request path
    pub async fn resolve(&self, route: &RoutePath) -> Resolution {
        let key = route.normalize();

        let outcome = match self.load(&key).await {
            LoadOutcome::Found(page) => ResolutionOutcome::Found {
                metadata: self.synthesizer.synthesize(Some(&page.metadata)),
                document: page.document,
                toc: page.toc,
            },
            LoadOutcome::NotFound => ResolutionOutcome::NotFound {
                metadata: self.synthesizer.synthesize(None),
            },
        };

        tracing::debug!(
            "Resolved {} ({})",
            key,
            if outcome.is_found() { "found" } else { "not found" }
        );

        Resolution { key, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteMetadata;
    use crate::content::{FrontmatterMetadata, PageMapEntry};
    use crate::error::ContentError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory store keyed by content key
    #[derive(Default)]
    struct MapStore {
        pages: HashMap<String, LoadedPage>,
        broken: Vec<String>,
        fetches: AtomicUsize,
    }

    impl MapStore {
        fn with_page(mut self, key: &str, metadata: FrontmatterMetadata) -> Self {
            let content_key = RoutePath::from_uri_path(key).normalize();
            let page = LoadedPage {
                document: Document {
                    key: content_key.clone(),
                    source: format!("{}.md", key),
                    html: format!("<p>{}</p>", key),
                },
                toc: vec![TocEntry {
                    depth: 2,
                    value: "Overview".to_string(),
                    id: "overview".to_string(),
                }],
                metadata,
            };
            self.pages.insert(content_key.as_str().to_string(), page);
            self
        }

        fn with_broken(mut self, key: &str) -> Self {
            self.broken.push(key.to_string());
            self
        }
    }

    #[async_trait]
    impl ContentStore for MapStore {
        async fn fetch(&self, key: &ContentKey) -> Result<LoadedPage, ContentError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;

            if self.broken.iter().any(|b| b == key.as_str()) {
                return Err(ContentError::FrontMatter {
                    path: PathBuf::from(format!("{}.md", key.as_str())),
                    message: "corrupt".to_string(),
                });
            }
            self.pages
                .get(key.as_str())
                .cloned()
                .ok_or_else(|| ContentError::NotFound(key.to_string()))
        }

        async fn page_map(&self) -> Result<Vec<PageMapEntry>, ContentError> {
            Ok(Vec::new())
        }
    }

    fn titled(title: &str) -> FrontmatterMetadata {
        FrontmatterMetadata {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    fn resolver(store: MapStore) -> ContentResolver {
        ContentResolver::new(
            Arc::new(store),
            MetadataSynthesizer::new(SiteMetadata::default()),
        )
    }

    #[tokio::test]
    async fn test_resolve_existing_page() {
        let resolver = resolver(
            MapStore::default().with_page("getting-started", titled("Getting Started")),
        );

        let resolution = resolver.resolve(&RoutePath::new(["getting-started"])).await;

        assert_eq!(resolution.key.as_str(), "getting-started");
        match resolution.outcome {
            ResolutionOutcome::Found {
                document,
                toc,
                metadata,
            } => {
                assert_eq!(document.html, "<p>getting-started</p>");
                assert_eq!(toc[0].id, "overview");
                assert_eq!(metadata.title, "Getting Started");
                assert_eq!(metadata.description, SiteMetadata::default().description);
                assert!(metadata.robots.index);
            }
            ResolutionOutcome::NotFound { .. } => panic!("expected a page"),
        }
    }

    #[tokio::test]
    async fn test_resolve_missing_page() {
        let resolver = resolver(MapStore::default());

        let resolution = resolver.resolve(&RoutePath::new(["does-not-exist"])).await;

        assert!(!resolution.outcome.is_found());
        let metadata = resolution.outcome.metadata();
        assert_eq!(metadata.title, "Page Not Found");
        assert!(!metadata.robots.index);
        assert!(!metadata.robots.follow);
    }

    #[tokio::test]
    async fn test_store_failure_becomes_not_found() {
        let resolver = resolver(
            MapStore::default()
                .with_page("broken", titled("Broken"))
                .with_broken("broken"),
        );

        assert_eq!(
            resolver.load(&RoutePath::new(["broken"]).normalize()).await,
            LoadOutcome::NotFound
        );
        let resolution = resolver.resolve(&RoutePath::new(["broken"])).await;
        assert_eq!(
            resolution.outcome,
            ResolutionOutcome::NotFound {
                metadata: resolver.synthesizer().not_found()
            }
        );
    }

    #[tokio::test]
    async fn test_root_resolves_like_any_key() {
        let resolver = resolver(MapStore::default().with_page("/", titled("Welcome")));

        let resolution = resolver.resolve(&RoutePath::root()).await;
        assert!(resolution.key.is_root());
        assert_eq!(resolution.outcome.metadata().title, "Welcome");

        let from_params = resolver.resolve(&RoutePath::from_params(None)).await;
        assert_eq!(from_params, resolution);
    }

    #[tokio::test]
    async fn test_malformed_path_resolves_as_root() {
        let resolver = resolver(MapStore::default().with_page("/", titled("Welcome")));
        let resolution = resolver.resolve(&RoutePath::new(["..", "etc"])).await;
        assert!(resolution.key.is_root());
        assert!(resolution.outcome.is_found());
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_idempotent() {
        let resolver = resolver(MapStore::default().with_page("guides/setup", titled("Setup")));
        let found = RoutePath::new(["guides", "setup"]).normalize();
        let missing = RoutePath::new(["guides", "nope"]).normalize();

        let (a, b) = tokio::join!(resolver.load(&found), resolver.load(&found));
        assert!(matches!(a, LoadOutcome::Found(_)));
        assert_eq!(a, b);

        let (c, d) = tokio::join!(resolver.load(&missing), resolver.load(&missing));
        assert_eq!(c, LoadOutcome::NotFound);
        assert_eq!(c, d);

        let sequential = resolver.load(&found).await;
        assert_eq!(sequential, a);
    }

    #[tokio::test]
    async fn test_concurrent_resolutions_across_tasks() {
        let resolver = resolver(MapStore::default().with_page("faq", titled("FAQ")));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = resolver.clone();
                tokio::spawn(async move { resolver.resolve(&RoutePath::new(["faq"])).await })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }
        assert!(outcomes.windows(2).all(|w| w[0] == w[1]));
        assert!(outcomes[0].outcome.is_found());
    }

    #[tokio::test]
    async fn test_no_retry_after_failed_load() {
        let store = Arc::new(MapStore::default());
        let resolver = ContentResolver::new(
            store.clone(),
            MetadataSynthesizer::new(SiteMetadata::default()),
        );

        resolver.resolve(&RoutePath::new(["missing"])).await;
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    }
}
