//! Page-stack navigation with lifecycle notifications.
//!
//! - `view`: views, type descriptors and the optional `NavigationAware` hooks
//! - `parameters`: the `ParameterBag` carried through every navigation call
//! - `host`: the host framework's stack primitives (`NavigationHost`) and an in-memory host
//! - `services`: optional object resolution used before direct construction
//! - `registry`: string keys to constructible pages
//! - `controller`: the navigation operations

pub mod controller;
pub mod error;
pub mod host;
pub mod parameters;
pub mod registry;
pub mod services;
pub mod view;

pub use controller::{NavigationController, NavigationOptions, Navigator};
pub use error::{NavigationError, Result};
pub use host::{HostCall, MemoryHost, NavigationHost};
pub use parameters::{ParameterBag, ParameterValue};
pub use registry::{PageDescriptor, PageRegistry};
pub use services::{ServiceCollection, ServiceProvider};
pub use view::{
    BindingContext, NavigationAware, TypeDescriptor, View, ViewIdentity, ViewRef, appearing,
    disappearing,
};
