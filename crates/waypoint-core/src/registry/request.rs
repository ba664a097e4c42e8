//! Arguments handed to route providers.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::location::{QueryParameters, RouteUrl};

/// Caller-supplied payload passed through untouched to the screen provider.
pub type NavigationContext = Arc<dyn Any + Send + Sync>;

/// Input to a screen provider.
#[derive(Clone)]
pub struct RouteRequest {
    pub url: RouteUrl,
    pub parameters: QueryParameters,
    pub context: Option<NavigationContext>,
}

impl RouteRequest {
    /// The context as `T`; `None` when absent or of another type.
    pub fn context<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.context.as_ref()?.downcast_ref::<T>()
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

impl fmt::Debug for RouteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRequest")
            .field("url", &self.url.as_str())
            .field("parameters", &self.parameters)
            .field("context", &self.context.is_some())
            .finish()
    }
}

/// Input to an open handler.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub url: RouteUrl,
    pub parameters: QueryParameters,
}

impl OpenRequest {
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}
