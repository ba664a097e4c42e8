//! URL handling for routes: parsing, patterns and query parameters.
//!
//! Routes are addressed with anything from a bare path (`profile?name=Ada`) to
//! a full URL (`myapp://product/detail`, `https://example.com`). Parsing is
//! delegated to the `url` crate; relative references are resolved against an
//! internal base and keep their relative textual form.

mod query;

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

pub use query::{parse_query, parse_query_items, query_string, QueryParameters};

/// Base that relative references are resolved against. Never shown to callers.
const RELATIVE_BASE: &str = "route://relative/";

/// Characters escaped when a relative path is written back out; matches the
/// `url` crate's path set.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// `input` up to its query or fragment, surrounding whitespace removed.
fn before_query(input: &str) -> &str {
    let input = input.trim_matches(|c: char| c <= ' ');
    let end = input
        .find(|c: char| c == '?' || c == '#')
        .unwrap_or(input.len());
    &input[..end]
}

/// Path of `input` exactly as written: no dot-segment removal, no decoding.
fn written_path(input: &str, relative: bool) -> &str {
    let mut path = before_query(input);
    if !relative {
        if let Some((_, rest)) = path.split_once(':') {
            path = rest;
        }
    }
    if let Some(rest) = path.strip_prefix("//") {
        path = rest.find('/').map_or("", |i| &rest[i..]);
    }
    path
}

/// Text that could not be turned into a URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid URL {input:?}: {source}")]
pub struct UrlError {
    pub input: String,
    #[source]
    pub source: url::ParseError,
}

/// A parsed route URL, absolute or relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteUrl {
    url: Url,
    relative: bool,
    /// Path as the caller wrote it; `url` has dot segments resolved.
    raw_path: String,
    text: String,
}

impl RouteUrl {
    /// Parse `input`. Characters outside the URL grammar (non-ASCII hosts and
    /// paths, spaces) are percent-encoded rather than rejected.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let invalid = |source| UrlError {
            input: input.to_string(),
            source,
        };
        match Url::parse(input) {
            Ok(url) => Ok(Self {
                raw_path: written_path(input, false).to_string(),
                ..Self::from(url)
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let url = Url::parse(RELATIVE_BASE)
                    .and_then(|base| base.join(input))
                    .map_err(invalid)?;
                let raw_path = written_path(input, true).to_string();
                let mut text = utf8_percent_encode(before_query(input), PATH_SEGMENT).to_string();
                if let Some(query) = url.query() {
                    text.push('?');
                    text.push_str(query);
                }
                if let Some(fragment) = url.fragment() {
                    text.push('#');
                    text.push_str(fragment);
                }
                Ok(Self {
                    url,
                    relative: true,
                    raw_path,
                    text,
                })
            }
            Err(e) => Err(invalid(e)),
        }
    }

    /// Scheme of an absolute URL; `None` for relative references.
    pub fn scheme(&self) -> Option<&str> {
        (!self.relative).then(|| self.url.scheme())
    }

    pub fn host(&self) -> Option<&str> {
        if self.relative {
            None
        } else {
            self.url.host_str()
        }
    }

    /// Percent-decoded path as written, `.` and `..` segments included.
    /// Escapes that do not decode to UTF-8 are kept verbatim.
    pub fn path(&self) -> String {
        query::decode(&self.raw_path)
    }

    /// Raw (still percent-encoded) query, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Query parameters, last value wins for duplicate keys. Empty when the
    /// URL has no query.
    pub fn query_parameters(&self) -> QueryParameters {
        self.query().map(parse_query).unwrap_or_default()
    }

    /// Ordered query items with duplicates kept.
    pub fn query_items(&self) -> Vec<(String, String)> {
        self.query().map(parse_query_items).unwrap_or_default()
    }

    /// Serialized form; relative references stay relative.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// A new URL with `parameters` appended to any existing query.
    pub fn with_query_parameters(&self, parameters: &QueryParameters) -> Result<Self, UrlError> {
        if parameters.is_empty() {
            return Ok(self.clone());
        }
        let (base, fragment) = match self.text.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (self.text.as_str(), None),
        };
        let separator = match self.query() {
            Some(q) if !q.is_empty() => "&",
            Some(_) => "",
            None => "?",
        };
        let mut text = format!("{base}{separator}{}", query_string(parameters));
        if let Some(fragment) = fragment {
            text.push('#');
            text.push_str(fragment);
        }
        let mut url = Self::parse(&text)?;
        url.raw_path = self.raw_path.clone();
        Ok(url)
    }
}

impl From<Url> for RouteUrl {
    fn from(url: Url) -> Self {
        let text = url.as_str().to_string();
        let raw_path = url.path().to_string();
        Self {
            url,
            relative: false,
            raw_path,
            text,
        }
    }
}

impl fmt::Display for RouteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for RouteUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Anything that can be turned into a [`RouteUrl`].
pub trait UrlConvertible {
    fn route_url(&self) -> Option<RouteUrl>;

    fn url_string(&self) -> Option<String> {
        self.route_url().map(|u| u.text)
    }

    /// Query parameters; never fails, an unparsable URL has none.
    fn query_parameters(&self) -> QueryParameters {
        self.route_url()
            .map(|u| u.query_parameters())
            .unwrap_or_default()
    }

    fn query_items(&self) -> Vec<(String, String)> {
        self.route_url().map(|u| u.query_items()).unwrap_or_default()
    }
}

impl UrlConvertible for str {
    fn route_url(&self) -> Option<RouteUrl> {
        RouteUrl::parse(self).ok()
    }
}

impl UrlConvertible for String {
    fn route_url(&self) -> Option<RouteUrl> {
        self.as_str().route_url()
    }
}

impl UrlConvertible for Url {
    fn route_url(&self) -> Option<RouteUrl> {
        Some(RouteUrl::from(self.clone()))
    }
}

impl UrlConvertible for RouteUrl {
    fn route_url(&self) -> Option<RouteUrl> {
        Some(self.clone())
    }
}

impl<T: UrlConvertible + ?Sized> UrlConvertible for &T {
    fn route_url(&self) -> Option<RouteUrl> {
        (**self).route_url()
    }
}
