use crate::{FactoryProvider, Provider, ProviderMap, Service, ServiceFactory};

/// A collection of providers that can be added all at once to a
/// [`RegistryBuilder`](crate::RegistryBuilder). Modules can be used to group
/// together related services and configure the registry in pieces rather than
/// all at once.
///
/// For creating a module easily via a domain specific language, see
/// [`define_module!`].
#[derive(Default)]
pub struct Module {
    pub(crate) providers: ProviderMap,
}

impl Module {
    /// Registers the constructor for a service. Registering another
    /// constructor for the same type replaces it.
    pub fn provide<D, R, F>(&mut self, factory: F)
    where
        D: 'static,
        R: Service,
        F: ServiceFactory<D, R>,
    {
        let provider = FactoryProvider::new(factory);
        self.providers.insert(provider.result(), Box::new(provider));
    }
}

/// Defines a new module using a domain specific language.
///
/// # Example
///
/// ```
/// use singleton_injector::{
///     bootstrap, define_module, IntoDestroyable, OnDestroy, DestroyResult,
///     ServiceRegistry, Svc,
/// };
///
/// #[derive(Default)]
/// struct Config;
/// struct Database(Svc<Config>);
/// struct Server(Svc<Config>, Svc<Database>);
///
/// impl OnDestroy for Database {
///     fn on_destroy(&self) -> DestroyResult {
///         Ok(())
///     }
/// }
///
/// let module = define_module! {
///     services = [
///         Config::default,
///         Database.with_destroy(),
///         Server,
///     ],
/// };
///
/// let mut builder = ServiceRegistry::builder();
/// builder.add_module(module);
///
/// let (server, release) = bootstrap::<Server>(&builder.build()).unwrap();
/// assert!(Svc::ptr_eq(&server.0, &(server.1).0));
/// release.release().unwrap();
/// ```
#[macro_export]
macro_rules! define_module {
    {
        $($key:tt = $value:tt),*
        $(,)?
    } => {
        {
            #[allow(unused_mut)]
            let mut module = <$crate::Module as ::std::default::Default>::default();
            $($crate::define_module!(@provide module, $key = $value);)*
            module
        }
    };
    (
        @provide $module:expr,
        services = [
            $($service:expr),*
            $(,)?
        ]
    ) => {
        $($module.provide($service);)*
    };
}
