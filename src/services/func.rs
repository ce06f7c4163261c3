use crate::{InjectResult, Injector, Request, Service, ServiceInfo};

/// A constructor for a service. All functions of arity 12 or less are
/// automatically service factories if each argument is a valid request and the
/// return value is a valid service type. The argument types double as the
/// service's dependency list, so registering a constructor is all that is
/// needed to describe a service's place in the dependency graph.
///
/// ```
/// use singleton_injector::{ServiceFactory, ServiceInfo, Svc};
///
/// struct Foo;
/// struct Bar(Svc<Foo>);
///
/// fn make_bar(foo: Svc<Foo>) -> Bar {
///     Bar(foo)
/// }
///
/// let dependencies = ServiceFactory::dependencies(&make_bar);
/// assert_eq!(vec![ServiceInfo::of::<Foo>()], dependencies);
/// ```
///
/// # Type parameters
/// * `D` - Dependencies of this service as a tuple.
/// * `R` - Resulting service from invoking this service factory.
pub trait ServiceFactory<D, R>: Service
where
    R: Service,
{
    /// The services this factory requests, in parameter order.
    fn dependencies(&self) -> Vec<ServiceInfo>;

    /// Invokes this service factory, creating an instance of the service.
    fn invoke(&self, injector: &Injector) -> InjectResult<R>;

    /// The teardown hook for services created by this factory, if there is
    /// one. See [`IntoDestroyable`](crate::IntoDestroyable).
    fn destroy_hook(&self) -> Option<DestroyHook<R>> {
        None
    }
}

/// A teardown hook for a service of type `R`.
pub type DestroyHook<R> = fn(&R) -> crate::DestroyResult;

macro_rules! impl_provider_function {
    () => {
        impl_provider_function!(@impl ());
    };
    ($first:ident $(, $rest:ident)*) => {
        impl_provider_function!(@impl ($first $(, $rest)*));
        impl_provider_function!($($rest),*);
    };
    (@impl ($($type_name:ident),*)) => {
        impl<F, R $(, $type_name)*> ServiceFactory<($($type_name,)*), R> for F
        where
            F: Service + Fn($($type_name),*) -> R,
            R: Service,
            $($type_name: Request,)*
        {
            fn dependencies(&self) -> Vec<ServiceInfo> {
                vec![$(<$type_name as Request>::dependency_info()),*]
            }

            #[allow(unused_variables)]
            fn invoke(&self, injector: &Injector) -> InjectResult<R> {
                let result = self($(
                    match <$type_name as Request>::request(injector) {
                        Ok(dependency) => dependency,
                        Err($crate::InjectError::MissingProvider { service_info }) => {
                            return Err($crate::InjectError::MissingDependency {
                                dependency_info: service_info,
                                service_info: ServiceInfo::of::<R>(),
                            })
                        },
                        Err(error) => return Err(error),
                    }
                ),*);
                Ok(result)
            }
        }
    };
}

impl_provider_function!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
