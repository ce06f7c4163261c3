use crate::{
    FactoryProvider, Module, Provider, Service, ServiceFactory, ServiceInfo,
    Svc,
};
use std::collections::HashMap;

pub(crate) type ProviderMap = HashMap<ServiceInfo, Box<dyn Provider>>;

/// The set of services an [`Injector`](crate::Injector) knows how to
/// construct, along with the dependencies of each one. A registry is
/// immutable once built and cheap to clone, so any number of injectors can
/// share it.
#[derive(Clone)]
pub struct ServiceRegistry {
    providers: Svc<ProviderMap>,
}

impl ServiceRegistry {
    /// Creates a builder for a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Gets the provider registered for a service.
    #[must_use]
    pub fn provider(&self, service_info: ServiceInfo) -> Option<&dyn Provider> {
        self.providers
            .get(&service_info)
            .map(|provider| provider.as_ref())
    }

    /// Gets the dependencies of a service in the order its constructor takes
    /// them, or `None` if the service is not registered.
    ///
    /// ```
    /// use singleton_injector::{ServiceInfo, ServiceRegistry, Svc};
    ///
    /// #[derive(Default)]
    /// struct Test;
    /// struct App(Svc<Test>);
    ///
    /// let mut builder = ServiceRegistry::builder();
    /// builder.provide_default::<Test>();
    /// builder.provide(App);
    ///
    /// let registry = builder.build();
    /// assert_eq!(
    ///     Some(&[ServiceInfo::of::<Test>()][..]),
    ///     registry.dependencies(ServiceInfo::of::<App>())
    /// );
    /// assert_eq!(Some(&[][..]), registry.dependencies(ServiceInfo::of::<Test>()));
    /// assert_eq!(None, registry.dependencies(ServiceInfo::of::<u8>()));
    /// ```
    #[must_use]
    pub fn dependencies(
        &self,
        service_info: ServiceInfo,
    ) -> Option<&[ServiceInfo]> {
        self.provider(service_info)
            .map(|provider| provider.dependencies())
    }

    /// Checks whether a service is registered.
    #[must_use]
    pub fn contains(&self, service_info: ServiceInfo) -> bool {
        self.providers.contains_key(&service_info)
    }

    /// The number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Checks whether no services are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// A builder for a [`ServiceRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    providers: ProviderMap,
}

impl RegistryBuilder {
    /// Registers the constructor for a service. Each service has one
    /// constructor; registering another one for the same type replaces it.
    pub fn provide<D, R, F>(&mut self, factory: F)
    where
        D: 'static,
        R: Service,
        F: ServiceFactory<D, R>,
    {
        drop(self.add_provider(Box::new(FactoryProvider::new(factory))));
    }

    /// Registers a service constructed through its [`Default`] implementation.
    pub fn provide_default<T: Service + Default>(&mut self) {
        self.provide(T::default);
    }

    /// Adds a provider to the registry, returning the provider it replaced.
    pub fn add_provider(
        &mut self,
        provider: Box<dyn Provider>,
    ) -> Option<Box<dyn Provider>> {
        self.providers.insert(provider.result(), provider)
    }

    /// Removes the provider for a service type.
    pub fn remove_provider(
        &mut self,
        service_info: ServiceInfo,
    ) -> Option<Box<dyn Provider>> {
        self.providers.remove(&service_info)
    }

    /// Adds all the providers registered in a module. Providers in the module
    /// replace any already registered for the same services.
    pub fn add_module(&mut self, module: Module) {
        for (_, provider) in module.providers {
            drop(self.add_provider(provider));
        }
    }

    /// Builds the registry.
    #[must_use]
    pub fn build(self) -> ServiceRegistry {
        ServiceRegistry {
            providers: Svc::new(self.providers),
        }
    }
}
