use crate::{
    InjectError, InjectResult, Injector, Service, ServiceFactory, ServiceInfo,
};
use std::{error::Error, marker::PhantomData};

/// A service factory that may fail during service creation with a custom error
/// type. During activation failure, an instance of
/// [`InjectError::ActivationFailed`] is returned as an error.
pub struct FallibleServiceFactory<D, R, E, F>
where
    R: Service,
    E: Service + Error,
    F: ServiceFactory<D, Result<R, E>>,
{
    inner: F,
    marker: PhantomData<fn(D) -> Result<R, E>>,
}

impl<D, R, E, F> ServiceFactory<D, R> for FallibleServiceFactory<D, R, E, F>
where
    D: 'static,
    R: Service,
    E: Service + Error,
    F: ServiceFactory<D, Result<R, E>>,
{
    fn dependencies(&self) -> Vec<ServiceInfo> {
        self.inner.dependencies()
    }

    fn invoke(&self, injector: &Injector) -> InjectResult<R> {
        match self.inner.invoke(injector) {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(error)) => Err(InjectError::ActivationFailed {
                service_info: ServiceInfo::of::<R>(),
                inner: Box::new(error),
            }),
            // The inner factory reports itself as `Result<R, E>`
            Err(InjectError::MissingDependency {
                service_info,
                dependency_info,
            }) if service_info == ServiceInfo::of::<Result<R, E>>() => {
                Err(InjectError::MissingDependency {
                    service_info: ServiceInfo::of::<R>(),
                    dependency_info,
                })
            }
            Err(error) => Err(error),
        }
    }
}

/// Defines a conversion into a fallible service factory. This trait is
/// automatically implemented for all service factories that return a
/// [`Result<T, E>`] with a type that implements [`Error`] + [`Service`].
pub trait IntoFallible<D, R, E, F>
where
    R: Service,
    E: Service + Error,
    F: ServiceFactory<D, Result<R, E>>,
{
    /// Marks a service factory as fallible. A failed construction leaves no
    /// instance behind, so a later request tries again from scratch.
    ///
    /// # Example
    ///
    /// ```
    /// use singleton_injector::{
    ///     InjectError, InjectResult, Injector, IntoFallible, ServiceRegistry,
    ///     Svc,
    /// };
    /// use std::{
    ///     error::Error,
    ///     fmt::{Display, Formatter},
    /// };
    ///
    /// #[derive(Debug)]
    /// struct FooError;
    ///
    /// impl Error for FooError {}
    /// impl Display for FooError {
    ///     fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    ///         write!(f, "An error occurred while creating a Foo")
    ///     }
    /// }
    ///
    /// struct Foo(Svc<i32>);
    /// fn make_foo(_a: Svc<i32>) -> Result<Foo, FooError> {
    ///     Err(FooError)
    /// }
    ///
    /// let mut builder = ServiceRegistry::builder();
    /// builder.provide(make_foo.fallible());
    /// builder.provide(|| 0);
    ///
    /// let injector = Injector::new(builder.build());
    /// let foo_result: InjectResult<Svc<Foo>> = injector.get();
    /// match foo_result {
    ///     Err(InjectError::ActivationFailed { .. }) => {}
    ///     Err(error) => Err(error).unwrap(),
    ///     _ => unreachable!("activation should have failed"),
    /// }
    /// ```
    #[must_use]
    fn fallible(self) -> FallibleServiceFactory<D, R, E, F>;
}

impl<D, R, E, F> IntoFallible<D, R, E, F> for F
where
    R: Service,
    E: Service + Error,
    F: ServiceFactory<D, Result<R, E>>,
{
    fn fallible(self) -> FallibleServiceFactory<D, R, E, F> {
        FallibleServiceFactory {
            inner: self,
            marker: PhantomData,
        }
    }
}
