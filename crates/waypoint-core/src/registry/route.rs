//! Enumerable route sets registered and navigated as a unit.

use std::sync::Arc;

use super::{NavigationContext, OpenRequest, RouteRegistry, RouteRequest};
use crate::dispatch::PresentOptions;
use crate::location::{QueryParameters, RouteUrl, UrlError};
use crate::screen::{ContainerFactory, ScreenRef};

/// A closed set of routes owned by one feature, usually an enum.
///
/// ```ignore
/// #[derive(Clone)]
/// enum ProfileRoute { Profile }
///
/// impl Route for ProfileRoute {
///     fn all() -> Vec<Self> { vec![ProfileRoute::Profile] }
///     fn pattern(&self) -> &str { "profile" }
///     fn make_screen(&self, request: RouteRequest) -> Option<ScreenRef> {
///         Some(ProfileScreen::new(request.parameter("name")?))
///     }
/// }
///
/// ProfileRoute::register_all(&registry);
/// ```
pub trait Route: Clone + Send + Sync + Sized + 'static {
    fn all() -> Vec<Self>;

    fn pattern(&self) -> &str;

    /// Screen provider for this route.
    fn make_screen(&self, request: RouteRequest) -> Option<ScreenRef>;

    /// Open handler for this route. Shows the route's screen and reports
    /// success unless overridden.
    fn handle_open(&self, registry: &RouteRegistry, request: OpenRequest) -> bool {
        registry.show(request.url, None, None);
        true
    }

    /// Register the screen provider and open handler of every route.
    fn register_all(registry: &Arc<RouteRegistry>) {
        for route in Self::all() {
            let pattern = route.pattern().to_string();
            let provider = route.clone();
            registry.register_screen(&pattern, move |request| provider.make_screen(request));
            let weak = Arc::downgrade(registry);
            registry.register_open_handler(&pattern, move |request| match weak.upgrade() {
                Some(registry) => route.handle_open(&registry, request),
                None => false,
            });
        }
    }

    /// `pattern` with `parameters` as its query.
    fn url(&self, parameters: &QueryParameters) -> Result<RouteUrl, UrlError> {
        RouteUrl::parse(self.pattern())?.with_query_parameters(parameters)
    }

    /// Resolve this route's screen through `registry`.
    fn screen(
        &self,
        registry: &RouteRegistry,
        parameters: &QueryParameters,
        context: Option<NavigationContext>,
    ) -> Option<ScreenRef> {
        let url = self.url(parameters).ok()?;
        registry.screen_for(url, context)
    }

    /// [`RouteRegistry::show`] for this route with `parameters` as its query.
    fn show(
        &self,
        registry: &RouteRegistry,
        parameters: &QueryParameters,
        context: Option<NavigationContext>,
        from: Option<ScreenRef>,
    ) {
        if let Ok(url) = self.url(parameters) {
            registry.show(url, context, from);
        }
    }

    fn push(
        &self,
        registry: &RouteRegistry,
        parameters: &QueryParameters,
        context: Option<NavigationContext>,
        stack: Option<ScreenRef>,
        animated: Option<bool>,
    ) {
        if let Ok(url) = self.url(parameters) {
            registry.push(url, context, stack, animated);
        }
    }

    fn present(
        &self,
        registry: &RouteRegistry,
        parameters: &QueryParameters,
        context: Option<NavigationContext>,
        options: PresentOptions,
    ) {
        if let Ok(url) = self.url(parameters) {
            registry.present(url, context, options);
        }
    }

    fn show_detail(
        &self,
        registry: &RouteRegistry,
        parameters: &QueryParameters,
        context: Option<NavigationContext>,
        from: Option<ScreenRef>,
        wrap_in: Option<ContainerFactory>,
    ) {
        if let Ok(url) = self.url(parameters) {
            registry.show_detail(url, context, from, wrap_in);
        }
    }
}
