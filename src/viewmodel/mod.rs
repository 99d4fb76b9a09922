//! View-model location and binding.

pub mod convention;
pub mod locator;
pub mod resolver;

pub use convention::{ConventionConfig, NamingConvention};
pub use locator::{AutoWireViewModel, ViewModelTypeProperty};
pub use resolver::{
    ConventionFn, Resolution, ViewModelCatalog, ViewModelFactory, ViewModelResolver, ViewModelType,
};
