use crate::{InjectError, InjectResult, Injector, Service, ServiceInfo, Svc};

/// A request to an injector. Every parameter of a
/// [`ServiceFactory`](crate::ServiceFactory) is a request, and requests can
/// also be made directly through [`Injector::get`].
///
/// - [`Svc<T>`]: a required dependency on `T`.
/// - `Option<Svc<T>>`: an optional dependency on `T`. Resolves to `None` if
///   `T` has no provider, rather than returning an error.
pub trait Request: Sized {
    /// The service this request depends on.
    fn dependency_info() -> ServiceInfo;

    /// Performs the request to the injector.
    fn request(injector: &Injector) -> InjectResult<Self>;
}

impl<T: Service> Request for Svc<T> {
    fn dependency_info() -> ServiceInfo {
        ServiceInfo::of::<T>()
    }

    fn request(injector: &Injector) -> InjectResult<Self> {
        injector.resolve()
    }
}

impl<T: Service> Request for Option<Svc<T>> {
    fn dependency_info() -> ServiceInfo {
        ServiceInfo::of::<T>()
    }

    fn request(injector: &Injector) -> InjectResult<Self> {
        match injector.resolve() {
            Ok(response) => Ok(Some(response)),
            Err(InjectError::MissingProvider { service_info })
                if service_info == ServiceInfo::of::<T>() =>
            {
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}
