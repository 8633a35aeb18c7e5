//! URL resolution
//!
//! Turns an optional [`UrlSource`] into the ordered list of absolute URLs to
//! fetch. Relative values are joined against the application's base URL.

use std::sync::LazyLock;

use regex::Regex;

use crate::remote::error::ConfigResult;
use crate::remote::source::{DEFAULT_CONFIG_URL, SourceContext, UrlSource};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "/";

static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*)://").expect("scheme pattern is valid")
});

/// Resolves configuration sources to fetchable URLs
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base_url: String,
}

impl UrlResolver {
    /// Create a resolver joining relative URLs against `base_url`
    ///
    /// The base is treated as a directory: a trailing `/` is added if missing.
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Expand the source into raw URLs, in declaration order
    ///
    /// An absent source yields [`DEFAULT_CONFIG_URL`].
    pub async fn resolve(
        &self,
        source: Option<&UrlSource>,
        ctx: &SourceContext,
    ) -> ConfigResult<Vec<String>> {
        match source {
            None => Ok(vec![DEFAULT_CONFIG_URL.to_string()]),
            Some(source) => source.urls(ctx).await,
        }
    }

    /// Expand and normalize the source
    pub async fn resolve_urls(
        &self,
        source: Option<&UrlSource>,
        ctx: &SourceContext,
    ) -> ConfigResult<Vec<String>> {
        let urls = self.resolve(source, ctx).await?;
        Ok(urls.iter().map(|url| self.normalize(url)).collect())
    }

    /// Make `url` absolute
    ///
    /// URLs with a scheme or a protocol-relative `//` prefix are returned
    /// unchanged; anything else is appended to the base URL after dropping a
    /// single leading `/`.
    pub fn normalize(&self, url: &str) -> String {
        if is_absolute(url) {
            return url.to_string();
        }

        let relative = url.strip_prefix('/').unwrap_or(url);
        format!("{}{}", self.base_url, relative)
    }

    /// URL to request for a resolved `url`
    ///
    /// Protocol-relative URLs take the scheme of the base URL. Everything
    /// else is requested as resolved.
    pub fn fetch_target(&self, url: &str) -> String {
        if url.starts_with("//")
            && let Some(scheme) = scheme_of(&self.base_url)
        {
            return format!("{scheme}:{url}");
        }
        url.to_string()
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Whether `url` already carries a scheme or is protocol-relative
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("//") || has_scheme(url)
}

/// Whether `url` starts with `scheme://`
pub fn has_scheme(url: &str) -> bool {
    SCHEME_PREFIX.is_match(url)
}

fn scheme_of(url: &str) -> Option<&str> {
    SCHEME_PREFIX
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|scheme| scheme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::remote::source::UrlProducer;
    use proptest::prelude::*;
    use serde_json::json;

    fn ctx() -> SourceContext {
        SourceContext::new(Environment::Development)
    }

    #[tokio::test]
    async fn test_absent_source_defaults_to_config_json() {
        let resolver = UrlResolver::new("https://app.example.com/");
        let urls = resolver.resolve(None, &ctx()).await.unwrap();
        assert_eq!(urls, vec![DEFAULT_CONFIG_URL]);
    }

    #[tokio::test]
    async fn test_resolve_urls_normalizes_each_entry() {
        let resolver = UrlResolver::new("https://app.example.com/web/");
        let source = UrlSource::list([
            "/config/config.common.json",
            "config/config.LOCAL.json",
            "https://cdn.example.com/shared.json",
        ]);

        let urls = resolver.resolve_urls(Some(&source), &ctx()).await.unwrap();
        assert_eq!(
            urls,
            vec![
                "https://app.example.com/web/config/config.common.json",
                "https://app.example.com/web/config/config.LOCAL.json",
                "https://cdn.example.com/shared.json",
            ]
        );
    }

    #[tokio::test]
    async fn test_unexpected_producer_value_fails_resolution() {
        let resolver = UrlResolver::default();
        let source = UrlSource::from(UrlProducer::sync(|_| Ok(json!(3.5))));
        assert!(resolver.resolve_urls(Some(&source), &ctx()).await.is_err());
    }

    #[test]
    fn test_fetch_target_borrows_base_scheme() {
        let resolver = UrlResolver::new("http://localhost:4200/");
        assert_eq!(
            resolver.fetch_target("//cdn.example.com/b.json"),
            "http://cdn.example.com/b.json"
        );
        assert_eq!(
            resolver.fetch_target("https://cdn.example.com/b.json"),
            "https://cdn.example.com/b.json"
        );
        assert_eq!(
            resolver.fetch_target("http://localhost:4200/a.json"),
            "http://localhost:4200/a.json"
        );
    }

    #[test]
    fn test_fetch_target_without_base_scheme() {
        let resolver = UrlResolver::default();
        assert_eq!(
            resolver.fetch_target("//cdn.example.com/b.json"),
            "//cdn.example.com/b.json"
        );
        assert!(!has_scheme("//cdn.example.com/b.json"));
        assert!(!has_scheme("/config.json"));
        assert!(has_scheme("git+ssh://host/repo"));
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        let resolver = UrlResolver::new("https://app.example.com/");
        assert_eq!(
            resolver.normalize("http://other.example.com/a.json"),
            "http://other.example.com/a.json"
        );
        assert_eq!(
            resolver.normalize("//cdn.example.com/a.json"),
            "//cdn.example.com/a.json"
        );
        assert_eq!(resolver.normalize("file:///etc/a.json"), "file:///etc/a.json");
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let resolver = UrlResolver::new("http://localhost:8080/app");
        assert_eq!(resolver.base_url(), "http://localhost:8080/app/");
        assert_eq!(
            resolver.normalize("/config.json"),
            "http://localhost:8080/app/config.json"
        );
    }

    #[test]
    fn test_default_base_is_root() {
        let resolver = UrlResolver::default();
        assert_eq!(resolver.normalize("config.json"), "/config.json");
        assert_eq!(resolver.normalize("/config.json"), "/config.json");
    }

    #[test]
    fn test_only_one_leading_separator_is_stripped() {
        let resolver = UrlResolver::new("http://localhost/");
        // "//x" is protocol-relative, so check a path that is not
        assert_eq!(resolver.normalize("/a//b.json"), "http://localhost/a//b.json");
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("https://a"));
        assert!(is_absolute("svn+ssh://a"));
        assert!(is_absolute("//a"));
        assert!(!is_absolute("://a"));
        assert!(!is_absolute("config.json"));
        assert!(!is_absolute("/config.json"));
        assert!(!is_absolute("1http://a"));
    }

    proptest! {
        #[test]
        fn property_relative_join_has_single_separator(
            path in "[a-z][a-z0-9._-]{0,12}(/[a-z0-9._-]{1,8}){0,3}",
            leading_slash in any::<bool>(),
            base_slash in any::<bool>(),
        ) {
            let base = if base_slash { "http://host/app/" } else { "http://host/app" };
            let resolver = UrlResolver::new(base);
            let relative = if leading_slash { format!("/{path}") } else { path.clone() };

            let joined = resolver.normalize(&relative);
            prop_assert_eq!(joined, format!("http://host/app/{path}"));
        }
    }
}
