//! Resolver identifiers for routes.
//!
//! An identifier is `pattern#capability[@owner]`. Registration and lookup
//! derive it independently from the same inputs, so the resolver's store is
//! the only shared naming state.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::location::UrlConvertible;

/// Pattern used for every `http`/`https` URL.
pub const HTTP_PATTERN: &str = "http";

/// Role a registered route factory plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Produces a screen from `(url, parameters, context)`.
    Screen,
    /// Handles an open request from `(url, parameters)` and reports success.
    OpenHandler,
}

impl Capability {
    pub fn tag(self) -> &'static str {
        match self {
            Capability::Screen => "screen",
            Capability::OpenHandler => "open-handler",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Identity of one route registry instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

impl OwnerId {
    /// A fresh identity, distinct from every other one handed out in this process.
    pub fn next() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Routing pattern of `url`: `http` for web URLs, otherwise the decoded path
/// with leading and trailing slashes trimmed. `None` if `url` does not parse.
pub fn pattern_of(url: &(impl UrlConvertible + ?Sized)) -> Option<String> {
    let url = url.route_url()?;
    if matches!(url.scheme(), Some("http") | Some("https")) {
        return Some(HTTP_PATTERN.to_string());
    }
    Some(url.path().trim_matches('/').to_string())
}

pub fn identifier_for(pattern: &str, capability: Capability, owner: Option<OwnerId>) -> String {
    match owner {
        Some(owner) => format!("{pattern}#{}@{owner}", capability.tag()),
        None => format!("{pattern}#{}", capability.tag()),
    }
}

/// [`pattern_of`] followed by [`identifier_for`].
pub fn identifier_from_url(
    url: &(impl UrlConvertible + ?Sized),
    capability: Capability,
    owner: Option<OwnerId>,
) -> Option<String> {
    pattern_of(url).map(|pattern| identifier_for(&pattern, capability, owner))
}
