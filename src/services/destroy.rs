use crate::{
    DestroyHook, DestroyResult, InjectResult, Injector, Service, ServiceFactory,
    ServiceInfo,
};
use std::marker::PhantomData;

/// A lifecycle hook for releasing resources held by a service. The injector
/// calls it exactly once, while it is being destroyed, for each instance it
/// created with a factory marked by [`IntoDestroyable::with_destroy`].
///
/// Hooks run in the order their services were constructed. A failing hook
/// does not stop the remaining ones; all failures are reported together as
/// [`InjectError::DestroyFailed`](crate::InjectError::DestroyFailed).
pub trait OnDestroy {
    /// Releases the resources held by this service.
    fn on_destroy(&self) -> DestroyResult;
}

/// A service factory whose services are torn down through [`OnDestroy`].
pub struct DestroyableServiceFactory<D, R, F>
where
    R: Service + OnDestroy,
    F: ServiceFactory<D, R>,
{
    inner: F,
    marker: PhantomData<fn(D) -> R>,
}

impl<D, R, F> ServiceFactory<D, R> for DestroyableServiceFactory<D, R, F>
where
    D: 'static,
    R: Service + OnDestroy,
    F: ServiceFactory<D, R>,
{
    fn dependencies(&self) -> Vec<ServiceInfo> {
        self.inner.dependencies()
    }

    fn invoke(&self, injector: &Injector) -> InjectResult<R> {
        self.inner.invoke(injector)
    }

    fn destroy_hook(&self) -> Option<DestroyHook<R>> {
        Some(R::on_destroy as DestroyHook<R>)
    }
}

/// Defines a conversion into a destroyable service factory. This trait is
/// automatically implemented for all service factories whose service
/// implements [`OnDestroy`].
pub trait IntoDestroyable<D, R, F>
where
    R: Service + OnDestroy,
    F: ServiceFactory<D, R>,
{
    /// Registers the service's [`OnDestroy`] hook with the injector.
    ///
    /// # Example
    ///
    /// ```
    /// use singleton_injector::{
    ///     DestroyResult, Injector, IntoDestroyable, OnDestroy, ServiceRegistry,
    /// };
    /// use std::sync::atomic::{AtomicBool, Ordering};
    ///
    /// static CLOSED: AtomicBool = AtomicBool::new(false);
    ///
    /// #[derive(Default)]
    /// struct Connection;
    ///
    /// impl OnDestroy for Connection {
    ///     fn on_destroy(&self) -> DestroyResult {
    ///         CLOSED.store(true, Ordering::SeqCst);
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let mut builder = ServiceRegistry::builder();
    /// builder.provide(Connection::default.with_destroy());
    ///
    /// let injector = Injector::new(builder.build());
    /// let _connection = injector.resolve::<Connection>().unwrap();
    /// injector.destroy().unwrap();
    ///
    /// assert!(CLOSED.load(Ordering::SeqCst));
    /// ```
    #[must_use]
    fn with_destroy(self) -> DestroyableServiceFactory<D, R, F>;
}

impl<D, R, F> IntoDestroyable<D, R, F> for F
where
    R: Service + OnDestroy,
    F: ServiceFactory<D, R>,
{
    fn with_destroy(self) -> DestroyableServiceFactory<D, R, F> {
        DestroyableServiceFactory {
            inner: self,
            marker: PhantomData,
        }
    }
}
