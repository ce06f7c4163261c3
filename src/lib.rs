//! Constructor-based dependency injection with per-container singletons.
//!
//! Services are registered in a [`ServiceRegistry`] by their constructors.
//! The parameters of a constructor are its dependencies: registering
//! `App::new` where `fn new(test: Svc<Test>) -> App` tells the registry that
//! an `App` needs a `Test`. An [`Injector`] then resolves services from the
//! registry on demand, constructing each dependency before its dependents and
//! keeping exactly one instance of every service until it is destroyed.
//!
//! By default, services provided by the `Injector` are not thread-safe. This
//! is because `Rc<T>` is used to hold instances of the services, which is not
//! a thread-safe pointer type. This can be changed by disabling default
//! features and enabling the "arc" feature:
//!
//! ```text
//! singleton_injector = {
//!     version = "*",
//!     default_features = false,
//!     features = ["arc", "tracing"]
//! }
//! ```
//!
//! # Lifecycle
//!
//! Services are created only when first requested, and the same instance is
//! returned for every later request to the same injector. Destroying the
//! injector calls the [`OnDestroy`] hook of each service that registered one,
//! in the order the services were constructed, and empties the injector.
//!
//! [`bootstrap`] ties an injector to a single entry point service: it creates
//! a fresh injector, resolves the entry point, and hands back a [`Release`]
//! handle for tearing everything down again.
//!
//! # Cycles
//!
//! Dependency graphs must be acyclic. Requesting a service which depends on
//! itself, directly or through other services, fails with
//! [`InjectError::CycleDetected`]. In-progress requests are tracked per
//! thread, so with the "arc" feature two threads requesting the same service
//! at once are not mistaken for a cycle.
//!
//! # Logging
//!
//! With the "tracing" feature (enabled by default), resolution and teardown
//! emit [`tracing`](https://docs.rs/tracing) events. No subscriber is
//! installed by this crate.
//!
//! # Example
//!
//! ```
//! use singleton_injector::{
//!     bootstrap, DestroyResult, IntoDestroyable, OnDestroy, ServiceRegistry,
//!     Svc,
//! };
//! use std::error::Error;
//!
//! // A service with no dependencies
//! #[derive(Default)]
//! struct Test;
//!
//! impl Test {
//!     pub fn do_something(&self) -> &'static str {
//!         "Test did something"
//!     }
//! }
//!
//! // The entry point. Its constructor's parameters are its dependencies.
//! struct App {
//!     test: Svc<Test>,
//! }
//!
//! impl App {
//!     pub fn new(test: Svc<Test>) -> Self {
//!         App { test }
//!     }
//! }
//!
//! impl OnDestroy for App {
//!     fn on_destroy(&self) -> DestroyResult {
//!         // Release any resources held by the app here
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let mut builder = ServiceRegistry::builder();
//!     builder.provide_default::<Test>();
//!     builder.provide(App::new.with_destroy());
//!     let registry = builder.build();
//!
//!     // Constructs a Test, then an App
//!     let (app, release) = bootstrap::<App>(&registry)?;
//!     assert_eq!("Test did something", app.test.do_something());
//!
//!     // Calls App's teardown hook and empties the injector
//!     release.release()?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value
)]

#[cfg(not(any(feature = "arc", feature = "rc")))]
compile_error!(
    "Either the 'arc' or 'rc' feature must be enabled (but not both)."
);

#[cfg(all(feature = "arc", feature = "rc"))]
compile_error!(
    "The 'arc' and 'rc' features are mutually exclusive and cannot be enabled together."
);

mod bootstrap;
mod copy_vec;
mod injector;
mod module;
mod registry;
mod request;
mod services;

pub use bootstrap::*;
pub use copy_vec::*;
pub use injector::*;
pub use module::*;
pub use registry::*;
pub use request::*;
pub use services::*;
