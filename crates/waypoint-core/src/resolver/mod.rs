//! Lightweight type-keyed service locator.
//!
//! Factories of arbitrary shape are stored type-erased under string
//! identifiers and recovered by their concrete factory type at lookup time.
//! The route registry is built on top of it, but feature components may use
//! it directly to locate shared services without depending on each other.

mod error;
mod factory;

use std::any::{type_name, Any};
use std::sync::{Arc, OnceLock};

use crate::store::ConcurrentMap;

pub use error::ResolverError;
pub use factory::{FactoryFn, ResolverFactory};

/// One stored factory together with the type name it was registered as.
#[derive(Clone)]
struct Registration {
    factory: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// Concurrent identifier -> factory store.
///
/// `add` and `resolve` may be called from any thread. The factory itself runs
/// after the store lock is released, so a factory may call back into the
/// resolver.
#[derive(Default)]
pub struct Resolver {
    factories: ConcurrentMap<String, Registration>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("factories", &self.factories.len())
            .finish()
    }
}

static SHARED: OnceLock<Arc<Resolver>> = OnceLock::new();

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide resolver, created on first access and never torn down.
    pub fn shared() -> Arc<Resolver> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Resolver::new())))
    }

    /// Register `factory` under `identifier`, replacing any earlier one.
    pub fn add<F: ResolverFactory>(&self, identifier: impl Into<String>, factory: F) {
        let identifier = identifier.into();
        let registration = Registration {
            factory: Arc::new(factory),
            type_name: type_name::<F>(),
        };
        if let Some(previous) = self.factories.insert(identifier.clone(), registration) {
            tracing::debug!(
                identifier = %identifier,
                previous = previous.type_name,
                "replaced resolver factory"
            );
        } else {
            tracing::trace!(identifier = %identifier, "registered resolver factory");
        }
    }

    /// Register a plain closure; shorthand for `add(identifier, FactoryFn::new(f))`.
    pub fn add_fn<A, S, F>(&self, identifier: impl Into<String>, closure: F)
    where
        A: 'static,
        S: 'static,
        F: Fn(A) -> S + Send + Sync + 'static,
    {
        self.add(identifier, FactoryFn::new(closure));
    }

    /// The factory registered under `identifier`, recovered as `F`.
    pub fn factory<F: ResolverFactory>(&self, identifier: &str) -> Result<Arc<F>, ResolverError> {
        let registration =
            self.factories
                .get(identifier)
                .ok_or_else(|| ResolverError::NotFound {
                    identifier: identifier.to_string(),
                })?;
        let found = registration.type_name;
        registration
            .factory
            .downcast::<F>()
            .map_err(|_| ResolverError::TypeMismatch {
                identifier: identifier.to_string(),
                expected: type_name::<F>(),
                found,
            })
    }

    /// Look up the factory registered under `identifier` and invoke it.
    pub fn resolve<F: ResolverFactory>(
        &self,
        identifier: &str,
        args: F::Args,
    ) -> Result<F::Service, ResolverError> {
        let factory = self.factory::<F>(identifier)?;
        tracing::trace!(identifier, "resolving factory");
        Ok(factory.resolve(args))
    }

    /// Resolve a factory registered through [`Resolver::add_fn`].
    pub fn resolve_fn<A, S>(&self, identifier: &str, args: A) -> Result<S, ResolverError>
    where
        A: 'static,
        S: 'static,
    {
        self.resolve::<FactoryFn<A, S>>(identifier, args)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Snapshot of every registered identifier, in no particular order.
    pub fn identifiers(&self) -> Vec<String> {
        self.factories.keys()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Drop every registration. Meant for teardown and tests.
    pub fn remove_all(&self) {
        self.factories.remove_all();
    }
}
