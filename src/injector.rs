use crate::{
    DestroyFailure, DynSvc, InjectError, InjectResult, Request, Service,
    ServiceInfo, ServiceRegistry, Svc,
};
use indexmap::IndexMap;
use std::{
    any::Any,
    collections::HashMap,
    thread::{self, ThreadId},
};

pub(crate) trait StateCellEx<T> {
    fn new(value: T) -> Self;
    fn with_inner_mut<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R;
}

#[cfg(feature = "rc")]
mod types {
    use super::StateCellEx;
    use std::{cell::RefCell, rc::Rc};

    pub type StateCell<T> = Rc<RefCell<T>>;

    impl<T> StateCellEx<T> for StateCell<T> {
        fn new(value: T) -> Self {
            Rc::new(RefCell::new(value))
        }

        fn with_inner_mut<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
            f(&mut *self.borrow_mut())
        }
    }
}

#[cfg(feature = "arc")]
mod types {
    use super::StateCellEx;
    use std::sync::{Arc, Mutex, PoisonError};

    pub type StateCell<T> = Arc<Mutex<T>>;

    impl<T> StateCellEx<T> for StateCell<T> {
        fn new(value: T) -> Self {
            Arc::new(Mutex::new(value))
        }

        fn with_inner_mut<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
            f(&mut *self.lock().unwrap_or_else(PoisonError::into_inner))
        }
    }
}

#[allow(clippy::wildcard_imports)]
pub(crate) use types::*;

#[derive(Default)]
pub(crate) struct InjectorState {
    /// Constructed services, in construction order.
    instances: IndexMap<ServiceInfo, DynSvc>,

    /// Services currently being constructed by each thread, outermost first.
    resolving: HashMap<ThreadId, Vec<ServiceInfo>>,
}

/// Marks a service as being constructed by the current thread until dropped,
/// including when its constructor unwinds.
struct ResolvingGuard<'a> {
    state: &'a StateCell<InjectorState>,
    thread: ThreadId,
}

impl<'a> ResolvingGuard<'a> {
    fn push(
        state: &'a StateCell<InjectorState>,
        service_info: ServiceInfo,
    ) -> Self {
        let thread = thread::current().id();
        state.with_inner_mut(|state| {
            state.resolving.entry(thread).or_default().push(service_info);
        });
        ResolvingGuard { state, thread }
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        let thread = self.thread;
        self.state.with_inner_mut(|state| {
            let finished = match state.resolving.get_mut(&thread) {
                Some(stack) => {
                    stack.pop();
                    stack.is_empty()
                }
                None => false,
            };
            if finished {
                state.resolving.remove(&thread);
            }
        });
    }
}

/// A dependency injection container. Every service it constructs is a
/// singleton within the injector: the first request constructs it (after all
/// of its dependencies), and each later request returns the same instance
/// until the injector is destroyed.
///
/// Cloning the injector does not clone its services. Both injectors share the
/// same instances and the same registry.
///
/// ```
/// use singleton_injector::{Injector, ServiceRegistry, Svc};
///
/// #[derive(Default)]
/// struct Config;
/// struct Database(Svc<Config>);
/// struct Cache(Svc<Config>);
///
/// let mut builder = ServiceRegistry::builder();
/// builder.provide_default::<Config>();
/// builder.provide(Database);
/// builder.provide(Cache);
///
/// let injector = Injector::new(builder.build());
/// let database: Svc<Database> = injector.get().unwrap();
/// let cache: Svc<Cache> = injector.get().unwrap();
///
/// assert!(Svc::ptr_eq(&database.0, &cache.0));
/// assert_eq!(3, injector.len());
/// ```
#[derive(Clone)]
pub struct Injector {
    registry: ServiceRegistry,
    state: StateCell<InjectorState>,
}

impl Injector {
    /// Creates a new, empty injector which constructs services from the given
    /// registry.
    #[must_use]
    pub fn new(registry: ServiceRegistry) -> Self {
        Injector {
            registry,
            state: StateCellEx::new(InjectorState::default()),
        }
    }

    /// Gets the registry this injector constructs services from.
    #[must_use]
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Performs a request for a service. See [`Request`] for what can be
    /// requested.
    pub fn get<R: Request>(&self) -> InjectResult<R> {
        R::request(self)
    }

    /// Resolves a service, constructing it and any of its dependencies that
    /// have not been constructed yet.
    pub fn resolve<T: Service>(&self) -> InjectResult<Svc<T>> {
        let service_info = ServiceInfo::of::<T>();
        self.resolve_info(service_info)?
            .downcast::<T>()
            .map_err(|_| InjectError::InvalidProvider { service_info })
    }

    /// Resolves a service by its [`ServiceInfo`].
    ///
    /// Dependencies are resolved depth-first in the order the service's
    /// constructor takes them, so every dependency is fully constructed
    /// before its dependents. If construction fails, nothing is stored for
    /// the service; dependencies constructed before the failure are kept.
    ///
    /// Cycles are tracked per thread. If two threads construct the same
    /// service at once, the instance stored first is returned to both and
    /// the other one is dropped.
    pub fn resolve_info(
        &self,
        service_info: ServiceInfo,
    ) -> InjectResult<DynSvc> {
        #[cfg(feature = "tracing")]
        tracing::trace!(service = service_info.name(), "resolving service");

        let thread = thread::current().id();
        let cached = self.state.with_inner_mut(|state| {
            if let Some(instance) = state.instances.get(&service_info) {
                return Ok(Some(instance.clone()));
            }

            let stack = match state.resolving.get(&thread) {
                Some(stack) => stack,
                None => return Ok(None),
            };
            let start = stack
                .iter()
                .position(|resolving| *resolving == service_info);
            match start {
                Some(start) => {
                    let mut cycle = stack[start..].to_vec();
                    cycle.push(service_info);
                    Err(InjectError::CycleDetected {
                        service_info,
                        cycle,
                    })
                }
                None => Ok(None),
            }
        })?;
        if let Some(instance) = cached {
            #[cfg(feature = "tracing")]
            tracing::trace!(service = service_info.name(), "service cached");
            return Ok(instance);
        }

        let provider = self
            .registry
            .provider(service_info)
            .ok_or(InjectError::MissingProvider { service_info })?;

        // The state must not be borrowed while the constructor runs, since it
        // resolves its own dependencies through this injector.
        let guard = ResolvingGuard::push(&self.state, service_info);
        let result = provider.provide(self);
        drop(guard);
        let instance = result?;

        if (*instance).type_id() != service_info.id() {
            return Err(InjectError::InvalidProvider { service_info });
        }

        // Another thread may have stored its own instance in the meantime
        let instance = self.state.with_inner_mut(|state| {
            state
                .instances
                .entry(service_info)
                .or_insert(instance)
                .clone()
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(service = service_info.name(), "service created");

        Ok(instance)
    }

    /// Checks whether an instance of a service has been constructed.
    #[must_use]
    pub fn contains<T: Service>(&self) -> bool {
        let service_info = ServiceInfo::of::<T>();
        self.state
            .with_inner_mut(|state| state.instances.contains_key(&service_info))
    }

    /// The number of services constructed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.with_inner_mut(|state| state.instances.len())
    }

    /// Checks whether no services have been constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destroys every service held by the injector. The injector is emptied,
    /// then each service's [`OnDestroy`](crate::OnDestroy) hook (if it has
    /// one) is called once, in the order the services were constructed.
    ///
    /// Every hook is called even if an earlier one fails. Failures are
    /// collected into [`InjectError::DestroyFailed`]. Destroying an empty
    /// injector does nothing.
    ///
    /// Requests made after destruction construct new instances.
    pub fn destroy(&self) -> InjectResult<()> {
        let instances = self
            .state
            .with_inner_mut(|state| std::mem::take(&mut state.instances));

        #[cfg(feature = "tracing")]
        tracing::debug!(services = instances.len(), "destroying injector");

        let mut failures = Vec::new();
        for (service_info, instance) in instances {
            let result = self
                .registry
                .provider(service_info)
                .and_then(|provider| provider.destroy(&instance));
            if let Some(Err(inner)) = result {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    service = service_info.name(),
                    error = %inner,
                    "teardown hook failed"
                );
                failures.push(DestroyFailure {
                    service_info,
                    inner,
                });
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(failures = failures.len(), "injector destroyed");

        if failures.is_empty() {
            Ok(())
        } else {
            Err(InjectError::DestroyFailed { failures })
        }
    }
}
