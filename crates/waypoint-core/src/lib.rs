//! URL-pattern navigation router for feature-modular applications.
//!
//! Features register screen providers and open handlers against URL
//! patterns in a [`registry::RouteRegistry`]; navigation by URL resolves the
//! provider through a type-keyed [`resolver::Resolver`] and performs the
//! transition on the UI thread via [`dispatch::NavigationDispatcher`].

pub mod config;
pub mod logging;

pub mod dispatch;
pub mod identifier;
pub mod location;
pub mod registry;
pub mod resolver;
pub mod screen;
pub mod store;

pub use dispatch::{NavigationDispatcher, PresentOptions, Presenter, UiThread};
pub use location::{RouteUrl, UrlConvertible};
pub use registry::{NavigationContext, Route, RouteRegistry};
pub use resolver::{Resolver, ResolverError};
pub use screen::{Screen, ScreenRef};
