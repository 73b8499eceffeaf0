//! Configured base URI and observed request context
//!
//! The base URI is the external root under which all resource links are
//! constructed. It is resolved once from configuration and is either
//! absolute (scheme, host, optional path prefix) or root-relative. An
//! absolute base is used verbatim regardless of what the current request
//! looks like; configuration wins over observation, which is what makes the
//! API servable behind a reverse proxy whose external host differs from the
//! one the process sees. A relative (or unset) base derives the root from
//! the observed request and appends the configured prefix.

use crate::config::RestConfig;
use crate::core::error::{ConfigError, RelError};
use url::Url;

/// Scheme, host, port and path observed on the inbound request
///
/// Only consulted when the configured base URI is relative or unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Request scheme ("http" or "https")
    pub scheme: String,

    /// Host name as observed
    pub host: String,

    /// Port, when it differs from the scheme default
    pub port: Option<u16>,

    /// Request path
    pub path: String,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: Option<u16>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
            path: path.into(),
        }
    }

    /// The observed origin, e.g. `http://localhost:8080`
    ///
    /// Default ports for the scheme are omitted.
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) if !is_default_port(&self.scheme, port) => {
                format!("{}://{}:{}", self.scheme, self.host, port)
            }
            _ => format!("{}://{}", self.scheme, self.host),
        }
    }
}

fn is_default_port(scheme: &str, port: u16) -> bool {
    matches!((scheme, port), ("http", 80) | ("https", 443))
}

#[derive(Debug, Clone)]
enum Root {
    Absolute(Url),
    Relative(String),
}

/// The configured root under which all resource links are built
#[derive(Debug, Clone)]
pub struct BaseUri {
    root: Root,
}

impl BaseUri {
    /// Base URI deriving everything from the observed request
    pub fn none() -> Self {
        Self {
            root: Root::Relative(String::new()),
        }
    }

    /// Parse a configured base URI string, absolute or root-relative
    ///
    /// Trailing slashes are trimmed so path segments can be appended
    /// uniformly.
    pub fn new(uri: &str) -> Result<Self, RelError> {
        let trimmed = uri.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Ok(Self::none());
        }

        let root = match Url::parse(trimmed) {
            Ok(url) => Root::Absolute(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Root::Relative(trimmed.trim_start_matches('/').to_string())
            }
            Err(e) => {
                return Err(ConfigError::InvalidBaseUri {
                    value: uri.to_string(),
                    message: e.to_string(),
                }
                .into());
            }
        };

        Ok(Self { root })
    }

    /// Resolve the base URI from the configuration; unset means [`none`](Self::none)
    pub fn from_config(config: &RestConfig) -> Result<Self, RelError> {
        match &config.base_uri {
            Some(uri) => Self::new(uri),
            None => Ok(Self::none()),
        }
    }

    /// Whether the configured base is absolute
    pub fn is_absolute(&self) -> bool {
        matches!(self.root, Root::Absolute(_))
    }

    /// The configured path prefix, without leading or trailing slashes
    pub fn path_prefix(&self) -> &str {
        match &self.root {
            Root::Absolute(url) => url.path().trim_matches('/'),
            Root::Relative(path) => path,
        }
    }

    /// Compute the effective root for link construction
    ///
    /// An absolute base is used verbatim; a relative base appends its prefix
    /// to the origin observed on the request.
    pub fn resolve_root(&self, request: &RequestContext) -> String {
        match &self.root {
            Root::Absolute(url) => url.as_str().trim_end_matches('/').to_string(),
            Root::Relative(path) if path.is_empty() => request.origin(),
            Root::Relative(path) => format!("{}/{}", request.origin(), path),
        }
    }

    /// Extract the lookup path within the managed URI space
    ///
    /// Strips the base prefix from an observed request path. Returns `None`
    /// when the path does not point into the managed space. For an absolute
    /// base the match runs against growing tails of the base path, so a
    /// proxy may consume any leading portion of it.
    pub fn lookup_path(&self, request_path: &str) -> Option<String> {
        // Anything from a URI template placeholder on is ignored
        let lookup = request_path
            .split('{')
            .next()
            .unwrap_or(request_path)
            .trim_end_matches('/');

        match &self.root {
            Root::Relative(path) if path.is_empty() => Some(lookup.to_string()),
            Root::Relative(path) => {
                let prefix = format!("/{}", path);
                lookup
                    .strip_prefix(&prefix)
                    .map(|stripped| stripped.to_string())
            }
            Root::Absolute(url) => {
                let segments: Vec<&str> = url
                    .path()
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .collect();

                let mut tail = String::new();
                for segment in segments.iter().rev() {
                    tail = format!("/{}{}", segment, tail);
                    if let Some(stripped) = lookup.strip_prefix(&tail) {
                        return Some(stripped.to_string());
                    }
                }
                None
            }
        }
    }
}
