//! Factory abstraction stored by the resolver.

use std::fmt;
use std::sync::Arc;

/// A stored producer of `Service` values from `Args`.
///
/// The concrete implementing type is what the resolver records and later
/// recovers, so two factories with the same `Args`/`Service` but different
/// implementing types are distinct to the resolver.
pub trait ResolverFactory: Send + Sync + 'static {
    type Args;
    type Service;

    fn resolve(&self, args: Self::Args) -> Self::Service;
}

/// Closure-backed factory; the common case.
pub struct FactoryFn<A, S> {
    closure: Arc<dyn Fn(A) -> S + Send + Sync>,
}

impl<A, S> FactoryFn<A, S> {
    pub fn new<F>(closure: F) -> Self
    where
        F: Fn(A) -> S + Send + Sync + 'static,
    {
        Self {
            closure: Arc::new(closure),
        }
    }
}

impl<A, S> Clone for FactoryFn<A, S> {
    fn clone(&self) -> Self {
        Self {
            closure: Arc::clone(&self.closure),
        }
    }
}

impl<A, S> fmt::Debug for FactoryFn<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryFn")
            .field("args", &std::any::type_name::<A>())
            .field("service", &std::any::type_name::<S>())
            .finish()
    }
}

impl<A, S> ResolverFactory for FactoryFn<A, S>
where
    A: 'static,
    S: 'static,
{
    type Args = A;
    type Service = S;

    fn resolve(&self, args: A) -> S {
        (self.closure)(args)
    }
}
