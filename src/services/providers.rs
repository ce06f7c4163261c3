use crate::{
    DestroyResult, DynSvc, InjectResult, Injector, Service, ServiceFactory,
    ServiceInfo, Svc,
};
use std::marker::PhantomData;

/// Weakly typed service provider. Given an injector, this will construct an
/// instance of a service. Providers are what a [`ServiceRegistry`] stores for
/// each registered type, and are usually created from a [`ServiceFactory`]
/// through [`RegistryBuilder::provide`].
///
/// [`ServiceRegistry`]: crate::ServiceRegistry
/// [`RegistryBuilder::provide`]: crate::RegistryBuilder::provide
pub trait Provider: Service {
    /// The `ServiceInfo` which describes the type returned by this provider.
    fn result(&self) -> ServiceInfo;

    /// The services requested while constructing the service, in the order
    /// they are requested.
    fn dependencies(&self) -> &[ServiceInfo];

    /// Constructs a new instance of the service. The `Injector` passed in is
    /// used to resolve any dependencies this service has.
    fn provide(&self, injector: &Injector) -> InjectResult<DynSvc>;

    /// Runs the teardown hook of an instance created by this provider.
    /// Returns `None` if the service has no hook.
    fn destroy(&self, _service: &DynSvc) -> Option<DestroyResult> {
        None
    }
}

/// A provider which constructs its service with a [`ServiceFactory`].
pub struct FactoryProvider<D, R, F>
where
    R: Service,
    F: ServiceFactory<D, R>,
{
    factory: F,
    dependencies: Vec<ServiceInfo>,
    marker: PhantomData<fn(D) -> R>,
}

impl<D, R, F> FactoryProvider<D, R, F>
where
    R: Service,
    F: ServiceFactory<D, R>,
{
    /// Creates a new [`FactoryProvider`] using a service factory.
    #[must_use]
    pub fn new(factory: F) -> Self {
        let dependencies = factory.dependencies();
        FactoryProvider {
            factory,
            dependencies,
            marker: PhantomData,
        }
    }
}

impl<D, R, F> Provider for FactoryProvider<D, R, F>
where
    D: 'static,
    R: Service,
    F: ServiceFactory<D, R>,
{
    fn result(&self) -> ServiceInfo {
        ServiceInfo::of::<R>()
    }

    fn dependencies(&self) -> &[ServiceInfo] {
        &self.dependencies
    }

    fn provide(&self, injector: &Injector) -> InjectResult<DynSvc> {
        let result = self.factory.invoke(injector)?;
        Ok(Svc::new(result) as DynSvc)
    }

    fn destroy(&self, service: &DynSvc) -> Option<DestroyResult> {
        let hook = self.factory.destroy_hook()?;
        let service = service.downcast_ref::<R>()?;
        Some(hook(service))
    }
}

impl<D, R, F> From<F> for FactoryProvider<D, R, F>
where
    R: Service,
    F: ServiceFactory<D, R>,
{
    fn from(factory: F) -> Self {
        FactoryProvider::new(factory)
    }
}
