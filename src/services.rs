mod destroy;
mod fallible;
mod func;
mod providers;
mod service;

pub use destroy::*;
pub use fallible::*;
pub use func::*;
pub use providers::*;
pub use service::*;
