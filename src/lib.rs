//! Navigation lifecycle notifications for page-stack UIs.
//!
//! A [`NavigationController`] drives a host's navigation stack and tells the
//! outgoing and incoming pages when they lose or gain the top position. Pages
//! are created by string key from a [`PageRegistry`], and a
//! [`ViewModelResolver`] attaches view models to them by registration or by
//! naming convention.

pub mod app;
pub mod config;
pub mod navigation;
pub mod script;
pub mod viewmodel;

pub use app::{NavigationApp, NavigationAppBuilder};
pub use config::NavigationConfig;
pub use navigation::{
    MemoryHost, NavigationAware, NavigationController, NavigationError, NavigationHost,
    NavigationOptions, Navigator, PageRegistry, ParameterBag, View, ViewRef,
};
pub use viewmodel::{AutoWireViewModel, ViewModelResolver, ViewModelType};
