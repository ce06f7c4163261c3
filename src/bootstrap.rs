use crate::{InjectResult, Injector, Service, ServiceRegistry, Svc};

/// Creates a new injector, resolves the entry point service `T` through it,
/// and returns the service along with a [`Release`] handle for tearing the
/// injector down.
///
/// Every call creates its own injector, so services are never shared between
/// entry points, even when they come from the same registry. If `T` cannot be
/// resolved, the services constructed along the way are destroyed before the
/// error is returned.
///
/// ```
/// use singleton_injector::{
///     bootstrap, DestroyResult, IntoDestroyable, OnDestroy, ServiceRegistry,
///     Svc,
/// };
///
/// #[derive(Default)]
/// struct Test;
///
/// struct App {
///     test: Svc<Test>,
/// }
///
/// impl App {
///     fn new(test: Svc<Test>) -> Self {
///         App { test }
///     }
/// }
///
/// impl OnDestroy for App {
///     fn on_destroy(&self) -> DestroyResult {
///         Ok(())
///     }
/// }
///
/// let mut builder = ServiceRegistry::builder();
/// builder.provide_default::<Test>();
/// builder.provide(App::new.with_destroy());
/// let registry = builder.build();
///
/// let (app, release) = bootstrap::<App>(&registry).unwrap();
/// let (other, other_release) = bootstrap::<App>(&registry).unwrap();
/// assert!(!Svc::ptr_eq(&app.test, &other.test));
///
/// release.release().unwrap();
/// other_release.release().unwrap();
/// ```
pub fn bootstrap<T: Service>(
    registry: &ServiceRegistry,
) -> InjectResult<(Svc<T>, Release)> {
    let injector = Injector::new(registry.clone());
    match injector.resolve::<T>() {
        Ok(service) => Ok((service, Release { injector })),
        Err(error) => {
            if let Err(_destroy_error) = injector.destroy() {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    error = %_destroy_error,
                    "failed to destroy partially bootstrapped injector"
                );
            }
            Err(error)
        }
    }
}

/// Releases the injector created by [`bootstrap`].
#[must_use = "services are only destroyed when the release handle is used"]
pub struct Release {
    injector: Injector,
}

impl Release {
    /// Destroys the injector, calling the teardown hooks of its services in
    /// the order they were constructed. See [`Injector::destroy`].
    pub fn release(self) -> InjectResult<()> {
        self.injector.destroy()
    }

    /// Gets the injector behind this handle.
    #[must_use]
    pub fn injector(&self) -> &Injector {
        &self.injector
    }
}
