//! Errors surfaced by the resolver.

/// Failure to turn an identifier into a usable factory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    /// Nothing is registered under the identifier.
    #[error("the factory {identifier} not found")]
    NotFound { identifier: String },
    /// Something is registered, but with a different factory type than the
    /// caller asked for.
    #[error("the factory {identifier} is a {found}, not a {expected}")]
    TypeMismatch {
        identifier: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ResolverError {
    pub fn identifier(&self) -> &str {
        match self {
            ResolverError::NotFound { identifier } => identifier,
            ResolverError::TypeMismatch { identifier, .. } => identifier,
        }
    }
}
