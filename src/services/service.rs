#![allow(clippy::used_underscore_binding)]

use derive_more::Display;
use std::{
    any::{Any, TypeId},
    error::Error,
};

#[cfg(feature = "arc")]
mod types {
    use std::{any::Any, sync::Arc};

    /// A reference-counted pointer holding a service. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Arc<T>;

    /// A reference-counted service pointer holding an instance of `dyn Any`.
    pub type DynSvc = Arc<dyn Any + Send + Sync>;

    /// Implemented automatically on types that are capable of being a service.
    pub trait Service: Any + Send + Sync {}
    impl<T: ?Sized + Any + Send + Sync> Service for T {}
}

#[cfg(feature = "rc")]
mod types {
    use std::{any::Any, rc::Rc};

    /// A reference-counted pointer holding a service. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Rc<T>;

    /// A reference-counted service pointer holding an instance of `dyn Any`.
    pub type DynSvc = Rc<dyn Any>;

    /// Implemented automatically on types that are capable of being a service.
    pub trait Service: Any {}
    impl<T: ?Sized + Any> Service for T {}
}

pub use types::*;

/// A result from attempting to inject dependencies into a service and
/// construct an instance of it.
pub type InjectResult<T> = Result<T, InjectError>;

/// The outcome of a single teardown hook.
pub type DestroyResult = Result<(), Box<dyn Error>>;

/// Identifies a service type. Two descriptors are equal exactly when they
/// describe the same type; the name is only carried for messages.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ServiceInfo {
    id: TypeId,
    name: &'static str,
}

impl ServiceInfo {
    /// Creates a [`ServiceInfo`] for the given type.
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized + Any>() -> Self {
        ServiceInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Gets the [`TypeId`] for this service.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the type name of this service.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A teardown hook that failed while an injector was being destroyed.
#[derive(Debug, Display)]
#[display(fmt = "{}: {}", "service_info.name()", inner)]
pub struct DestroyFailure {
    /// The service whose hook failed.
    pub service_info: ServiceInfo,

    /// The error returned by the hook.
    pub inner: Box<dyn Error>,
}

/// An error that has occurred while resolving or tearing down services.
#[derive(Debug, Display)]
#[display(fmt = "an error occurred during injection: {}")]
#[non_exhaustive]
pub enum InjectError {
    /// Failed to find a provider for the requested type.
    #[display(fmt = "{} has no provider", "service_info.name()")]
    MissingProvider { service_info: ServiceInfo },

    /// A provider for a dependency of the requested service is missing.
    #[display(
        fmt = "{} has no provider (required by {})",
        "dependency_info.name()",
        "service_info.name()"
    )]
    MissingDependency {
        service_info: ServiceInfo,
        dependency_info: ServiceInfo,
    },

    /// A cycle was detected during activation of a service.
    #[display(
        fmt = "a cycle was detected during activation of {} [{}]",
        "service_info.name()",
        "fmt_cycle(cycle)"
    )]
    CycleDetected {
        service_info: ServiceInfo,

        /// The chain of requests, starting and ending with the repeated
        /// service.
        cycle: Vec<ServiceInfo>,
    },

    /// The registered provider returned the wrong service type.
    #[display(
        fmt = "the registered provider for {} returned the wrong type",
        "service_info.name()"
    )]
    InvalidProvider { service_info: ServiceInfo },

    /// The constructor of a service returned an error.
    #[display(
        fmt = "an error occurred during activation of {}",
        "service_info.name()"
    )]
    ActivationFailed {
        service_info: ServiceInfo,
        inner: Box<dyn Error>,
    },

    /// One or more teardown hooks failed. Every hook was still attempted.
    #[display(
        fmt = "{} teardown hook(s) failed [{}]",
        "failures.len()",
        "fmt_failures(failures)"
    )]
    DestroyFailed { failures: Vec<DestroyFailure> },

    /// An unexpected error has occurred. This is usually caused by a bug in
    /// the library itself.
    #[display(fmt = "an unexpected error occurred (please report this): {}", _0)]
    InternalError(String),
}

impl Error for InjectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InjectError::ActivationFailed { inner, .. } => Some(inner.as_ref()),
            InjectError::DestroyFailed { failures } => failures
                .first()
                .map(|failure| failure.inner.as_ref() as &(dyn Error + 'static)),
            _ => None,
        }
    }
}

fn fmt_cycle(cycle: &[ServiceInfo]) -> String {
    let mut joined = String::new();
    for item in cycle {
        if !joined.is_empty() {
            joined.push_str(" -> ");
        }
        joined.push_str(item.name());
    }
    joined
}

fn fmt_failures(failures: &[DestroyFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{fmt_cycle, InjectError, ServiceInfo};

    struct Foo;
    struct Bar;

    #[test]
    fn service_info_compares_by_type() {
        assert_eq!(ServiceInfo::of::<Foo>(), ServiceInfo::of::<Foo>());
        assert_ne!(ServiceInfo::of::<Foo>(), ServiceInfo::of::<Bar>());
        assert!(ServiceInfo::of::<Foo>().name().ends_with("Foo"));
    }

    #[test]
    fn cycle_is_printed_in_request_order() {
        let cycle = [
            ServiceInfo::of::<Foo>(),
            ServiceInfo::of::<Bar>(),
            ServiceInfo::of::<Foo>(),
        ];
        let printed = fmt_cycle(&cycle);
        let names: Vec<_> = printed.split(" -> ").collect();

        assert_eq!(3, names.len());
        assert!(names[0].ends_with("Foo"));
        assert!(names[1].ends_with("Bar"));
        assert!(names[2].ends_with("Foo"));
    }

    #[test]
    fn missing_dependency_names_both_services() {
        let error = InjectError::MissingDependency {
            service_info: ServiceInfo::of::<Foo>(),
            dependency_info: ServiceInfo::of::<Bar>(),
        };
        let message = error.to_string();

        assert!(message.starts_with("an error occurred during injection: "));
        assert!(message.contains("Bar has no provider (required by"));
    }
}
