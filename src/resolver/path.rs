//! Route paths and content keys

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::fmt;

/// Ordered URL path segments of a request; empty means the site root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RoutePath {
    segments: Vec<String>,
}

impl RoutePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The site root
    pub fn root() -> Self {
        Self::default()
    }

    /// Route parameters as handed over by a router; missing parameters mean the root
    pub fn from_params(params: Option<Vec<String>>) -> Self {
        params.map(Self::new).unwrap_or_default()
    }

    /// Split a raw URL path into percent-decoded segments
    ///
    /// Empty segments from leading, trailing or doubled slashes are dropped.
    pub fn from_uri_path(path: &str) -> Self {
        Self::new(
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned()),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether every segment is a plain, non-empty path component
    pub fn is_well_formed(&self) -> bool {
        self.segments.iter().all(|s| is_valid_segment(s))
    }

    /// Canonical key for this path
    ///
    /// Malformed paths are treated as the root rather than rejected.
    pub fn normalize(&self) -> ContentKey {
        if !self.is_well_formed() {
            tracing::debug!("Malformed route {:?}, resolving as root", self.segments);
            return ContentKey::root();
        }
        ContentKey(self.segments.join("/"))
    }
}

/// Free-function form of [`RoutePath::normalize`]
pub fn normalize(path: &RoutePath) -> ContentKey {
    path.normalize()
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}

/// Characters escaped when a segment is written into a URL path
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Canonical identifier of a document: well-formed segments joined by `/`
///
/// The root is the empty key. Since segments never contain `/`, distinct
/// route paths never share a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Percent-encoded URL path of the page, e.g. `/guides/setup/`
    pub fn url_path(&self, trailing_slash: bool) -> String {
        if self.is_root() {
            return "/".to_string();
        }

        let encoded: Vec<String> = self
            .segments()
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect();
        if trailing_slash {
            format!("/{}/", encoded.join("/"))
        } else {
            format!("/{}", encoded.join("/"))
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_joins_segments() {
        let key = RoutePath::new(["user-guide", "setup"]).normalize();
        assert_eq!(key.as_str(), "user-guide/setup");
        assert_eq!(key.segments().collect::<Vec<_>>(), vec!["user-guide", "setup"]);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let a = RoutePath::new(vec!["getting-started".to_string()]);
        let b = RoutePath::new(["getting-started"]);
        assert_eq!(a, b);
        assert_eq!(normalize(&a), normalize(&b));
    }

    #[test]
    fn test_distinct_paths_do_not_collide() {
        let nested = RoutePath::new(["a", "b"]).normalize();
        let flat = RoutePath::new(["a-b"]).normalize();
        let reversed = RoutePath::new(["b", "a"]).normalize();
        assert_ne!(nested, flat);
        assert_ne!(nested, reversed);
    }

    #[test]
    fn test_empty_and_missing_params_are_root() {
        assert!(RoutePath::root().normalize().is_root());
        assert!(RoutePath::new(Vec::<String>::new()).normalize().is_root());
        assert!(RoutePath::from_params(None).normalize().is_root());
        assert_eq!(
            RoutePath::from_params(Some(vec!["faq".to_string()])).normalize().as_str(),
            "faq"
        );
    }

    #[test]
    fn test_malformed_paths_are_root() {
        for segments in [
            vec![""],
            vec![".."],
            vec!["docs", "."],
            vec!["a/b"],
            vec!["a\\b"],
            vec!["nul\0"],
        ] {
            let route = RoutePath::new(segments.clone());
            assert!(!route.is_well_formed(), "{:?}", segments);
            assert!(route.normalize().is_root(), "{:?}", segments);
        }
    }

    #[test]
    fn test_from_uri_path() {
        let route = RoutePath::from_uri_path("/user-guide//key%20rotation/");
        assert_eq!(route.segments(), ["user-guide", "key rotation"]);
        assert!(RoutePath::from_uri_path("/").is_root());
        assert!(RoutePath::from_uri_path("").is_root());
    }

    #[test]
    fn test_encoded_separator_is_malformed() {
        let route = RoutePath::from_uri_path("/a%2Fb");
        assert_eq!(route.segments(), ["a/b"]);
        assert!(route.normalize().is_root());
    }

    #[test]
    fn test_url_path() {
        let key = RoutePath::new(["guides", "setup"]).normalize();
        assert_eq!(key.url_path(true), "/guides/setup/");
        assert_eq!(key.url_path(false), "/guides/setup");
        assert_eq!(ContentKey::root().url_path(true), "/");
        assert_eq!(key.to_string(), "/guides/setup");
    }

    #[test]
    fn test_url_path_is_encoded() {
        let key = RoutePath::new(["faq", "what?"]).normalize();
        assert_eq!(key.url_path(true), "/faq/what%3F/");

        let spaced = RoutePath::new(["key rotation #2"]).normalize();
        assert_eq!(spaced.url_path(false), "/key%20rotation%20%232");

        let accented = RoutePath::new(["café"]).normalize();
        assert_eq!(accented.url_path(false), "/caf%C3%A9");
    }

    #[test]
    fn test_url_path_leads_back_to_key() {
        for segments in [
            vec!["faq", "what?"],
            vec!["100%", "sure"],
            vec!["a b", "c#d"],
            vec!["café"],
        ] {
            let key = RoutePath::new(segments.clone()).normalize();
            for trailing_slash in [true, false] {
                let href = key.url_path(trailing_slash);
                assert_eq!(RoutePath::from_uri_path(&href).normalize(), key, "{}", href);
            }
        }
    }
}
