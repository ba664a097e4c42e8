//! URL-pattern route registry.
//!
//! Feature modules register a screen provider and an open handler per
//! pattern. Navigation derives the same identifier from the requested URL,
//! resolves the provider through the [`Resolver`] and hands the screen to the
//! attached [`NavigationDispatcher`]. Every failure along the way (unparsable
//! URL, unregistered pattern, provider declining) ends the request silently.

mod request;
mod route;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};

use crate::config::RouterConfig;
use crate::dispatch::{NavigationDispatcher, PresentOptions};
use crate::identifier::{identifier_for, identifier_from_url, pattern_of, Capability, OwnerId};
use crate::location::{RouteUrl, UrlConvertible};
use crate::resolver::{FactoryFn, Resolver, ResolverError};
use crate::screen::{ContainerFactory, ScreenRef};

pub use request::{NavigationContext, OpenRequest, RouteRequest};
pub use route::Route;

/// Stored form of a screen provider.
pub type ScreenProvider = FactoryFn<RouteRequest, Option<ScreenRef>>;
/// Stored form of an open handler.
pub type OpenHandlerProvider = FactoryFn<OpenRequest, bool>;
/// Stored form of a component's registry lookup.
type RegistryLocator = FactoryFn<(), Arc<RouteRegistry>>;

static SHARED: OnceLock<Arc<RouteRegistry>> = OnceLock::new();

pub struct RouteRegistry {
    resolver: Arc<Resolver>,
    /// `None` only for the process-wide registry.
    owner: Option<OwnerId>,
    dispatcher: RwLock<Option<Arc<NavigationDispatcher>>>,
    log_unresolved: AtomicBool,
}

impl std::fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("owner", &self.owner)
            .field("resolver", &self.resolver)
            .field("dispatcher", &self.dispatcher().is_some())
            .finish()
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRegistry {
    /// A registry with its own resolver.
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(Resolver::new()))
    }

    /// A registry storing into `resolver`. Its identifiers are scoped to a
    /// fresh owner, so it never sees another registry's routes.
    pub fn with_resolver(resolver: Arc<Resolver>) -> Self {
        Self::build(resolver, Some(OwnerId::next()))
    }

    /// Process-wide registry over [`Resolver::shared`], with unscoped
    /// identifiers.
    pub fn shared() -> Arc<RouteRegistry> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::build(Resolver::shared(), None))))
    }

    fn build(resolver: Arc<Resolver>, owner: Option<OwnerId>) -> Self {
        Self {
            resolver,
            owner,
            dispatcher: RwLock::new(None),
            log_unresolved: AtomicBool::new(true),
        }
    }

    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    pub fn owner(&self) -> Option<OwnerId> {
        self.owner
    }

    pub fn apply_config(&self, config: &RouterConfig) {
        self.log_unresolved
            .store(config.log_unresolved, Ordering::Relaxed);
    }

    /// Identifier under which this registry stores `capability` for `url`.
    pub fn identifier(&self, url: impl UrlConvertible, capability: Capability) -> Option<String> {
        identifier_from_url(&url, capability, self.owner)
    }

    /// Install (or replace) the dispatcher navigation requests go to.
    pub fn attach_dispatcher(&self, dispatcher: Arc<NavigationDispatcher>) {
        *self
            .dispatcher
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(dispatcher);
    }

    pub fn dispatcher(&self) -> Option<Arc<NavigationDispatcher>> {
        self.dispatcher
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register the screen provider for `pattern`, replacing any earlier one.
    pub fn register_screen<F>(&self, pattern: &str, provider: F)
    where
        F: Fn(RouteRequest) -> Option<ScreenRef> + Send + Sync + 'static,
    {
        if let Some(identifier) = self.registration_id(pattern, Capability::Screen) {
            self.resolver.add(identifier, ScreenProvider::new(provider));
        }
    }

    /// Register the open handler for `pattern`, replacing any earlier one.
    pub fn register_open_handler<F>(&self, pattern: &str, handler: F)
    where
        F: Fn(OpenRequest) -> bool + Send + Sync + 'static,
    {
        if let Some(identifier) = self.registration_id(pattern, Capability::OpenHandler) {
            self.resolver.add(identifier, OpenHandlerProvider::new(handler));
        }
    }

    fn registration_id(&self, pattern: &str, capability: Capability) -> Option<String> {
        let Some(normalized) = pattern_of(pattern) else {
            tracing::warn!(pattern, %capability, "ignoring route with unparsable pattern");
            return None;
        };
        tracing::debug!(pattern = %normalized, %capability, owner = ?self.owner, "registered route");
        Some(identifier_for(&normalized, capability, self.owner))
    }

    /// Screen registered for `url`, built with its query parameters and
    /// `context`. `None` when nothing is registered or the provider declines.
    pub fn screen_for(
        &self,
        url: impl UrlConvertible,
        context: Option<NavigationContext>,
    ) -> Option<ScreenRef> {
        let (url, identifier) = self.lookup(&url, Capability::Screen)?;
        let request = RouteRequest {
            parameters: url.query_parameters(),
            url,
            context,
        };
        self.resolver
            .resolve::<ScreenProvider>(&identifier, request)
            .unwrap_or_else(|e| {
                self.unresolved(&e);
                None
            })
    }

    /// Run the open handler registered for `url`; `false` if there is none.
    pub fn open(&self, url: impl UrlConvertible) -> bool {
        let Some((url, identifier)) = self.lookup(&url, Capability::OpenHandler) else {
            return false;
        };
        let request = OpenRequest {
            parameters: url.query_parameters(),
            url,
        };
        self.resolver
            .resolve::<OpenHandlerProvider>(&identifier, request)
            .unwrap_or_else(|e| {
                self.unresolved(&e);
                false
            })
    }

    /// An open request for `url` to be run later. It holds the registry
    /// weakly; `None` if `url` does not parse.
    pub fn handler(self: &Arc<Self>, url: impl UrlConvertible) -> Option<OpenHandler> {
        Some(OpenHandler {
            registry: Arc::downgrade(self),
            url: url.route_url()?,
        })
    }

    pub fn show(
        &self,
        url: impl UrlConvertible,
        context: Option<NavigationContext>,
        from: Option<ScreenRef>,
    ) {
        self.navigate(url, context, |d, screen| d.show(screen, from));
    }

    pub fn push(
        &self,
        url: impl UrlConvertible,
        context: Option<NavigationContext>,
        stack: Option<ScreenRef>,
        animated: Option<bool>,
    ) {
        self.navigate(url, context, |d, screen| d.push(screen, stack, animated));
    }

    pub fn present(
        &self,
        url: impl UrlConvertible,
        context: Option<NavigationContext>,
        options: PresentOptions,
    ) {
        self.navigate(url, context, |d, screen| d.present(screen, options));
    }

    pub fn show_detail(
        &self,
        url: impl UrlConvertible,
        context: Option<NavigationContext>,
        from: Option<ScreenRef>,
        wrap_in: Option<ContainerFactory>,
    ) {
        self.navigate(url, context, |d, screen| d.show_detail(screen, from, wrap_in));
    }

    fn navigate<F>(&self, url: impl UrlConvertible, context: Option<NavigationContext>, go: F)
    where
        F: FnOnce(&NavigationDispatcher, ScreenRef),
    {
        let Some(screen) = self.screen_for(&url, context) else {
            return;
        };
        match self.dispatcher() {
            Some(dispatcher) => go(&dispatcher, screen),
            None => tracing::warn!(
                url = url.url_string().as_deref().unwrap_or_default(),
                "no navigation dispatcher attached, dropping request"
            ),
        }
    }

    fn lookup(
        &self,
        url: &impl UrlConvertible,
        capability: Capability,
    ) -> Option<(RouteUrl, String)> {
        let url = url.route_url()?;
        let identifier = identifier_from_url(&url, capability, self.owner)?;
        Some((url, identifier))
    }

    fn unresolved(&self, error: &ResolverError) {
        match error {
            ResolverError::NotFound { identifier } => {
                if self.log_unresolved.load(Ordering::Relaxed) {
                    tracing::debug!(identifier = %identifier, "no route registered");
                }
            }
            ResolverError::TypeMismatch { .. } => {
                tracing::warn!(error = %error, "route factory has an unexpected type");
            }
        }
    }

    /// Make `registry` the one `component` resolves through
    /// [`RouteRegistry::for_component`].
    pub fn provide_for_component(resolver: &Resolver, component: &str, registry: Arc<RouteRegistry>) {
        resolver.add(
            component_identifier(component),
            RegistryLocator::new(move |()| Arc::clone(&registry)),
        );
    }

    /// Registry provided for `component`, or the shared one.
    pub fn for_component(resolver: &Resolver, component: &str) -> Arc<RouteRegistry> {
        resolver
            .resolve::<RegistryLocator>(&component_identifier(component), ())
            .unwrap_or_else(|_| Self::shared())
    }
}

fn component_identifier(component: &str) -> String {
    format!("{component}.route_registry")
}

/// Deferred open request produced by [`RouteRegistry::handler`].
#[derive(Debug, Clone)]
pub struct OpenHandler {
    registry: Weak<RouteRegistry>,
    url: RouteUrl,
}

impl OpenHandler {
    pub fn url(&self) -> &RouteUrl {
        &self.url
    }

    /// `false` if the registry is gone or nothing handles the URL.
    pub fn open(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.open(&self.url),
            None => false,
        }
    }
}
