//! Optional object-resolution capability (a dependency injection container).

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use super::view::{BindingContext, TypeDescriptor, View, ViewRef};

/// Resolves views and view models by type.
///
/// Both methods default to "not available" so a container can provide only
/// the kinds of objects it knows about. Returning `None` makes callers fall
/// back to direct construction.
pub trait ServiceProvider: Send + Sync {
    fn resolve_view(&self, _view_type: &TypeDescriptor) -> Option<ViewRef> {
        None
    }

    fn resolve_view_model(&self, _view_model_type: &TypeDescriptor) -> Option<BindingContext> {
        None
    }
}

type ViewFactory = Arc<dyn Fn() -> ViewRef + Send + Sync>;
type ObjectFactory = Arc<dyn Fn() -> BindingContext + Send + Sync>;

/// A minimal container of transient and singleton registrations keyed by type
#[derive(Default, Clone)]
pub struct ServiceCollection {
    views: HashMap<TypeId, ViewFactory>,
    objects: HashMap<TypeId, ObjectFactory>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh view from `factory` on every resolution
    pub fn add_transient_view<V, F>(&mut self, factory: F) -> &mut Self
    where
        V: View,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.views
            .insert(TypeId::of::<V>(), Arc::new(move || Arc::new(factory()) as ViewRef));
        self
    }

    /// A fresh object from `factory` on every resolution
    pub fn add_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.objects.insert(
            TypeId::of::<T>(),
            Arc::new(move || Arc::new(factory()) as BindingContext),
        );
        self
    }

    /// The same shared instance on every resolution
    pub fn add_singleton<T>(&mut self, instance: T) -> &mut Self
    where
        T: Any + Send + Sync,
    {
        let shared: BindingContext = Arc::new(instance);
        self.objects
            .insert(TypeId::of::<T>(), Arc::new(move || Arc::clone(&shared)));
        self
    }

    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.views.contains_key(&descriptor.id()) || self.objects.contains_key(&descriptor.id())
    }
}

impl ServiceProvider for ServiceCollection {
    fn resolve_view(&self, view_type: &TypeDescriptor) -> Option<ViewRef> {
        self.views.get(&view_type.id()).map(|factory| factory())
    }

    fn resolve_view_model(&self, view_model_type: &TypeDescriptor) -> Option<BindingContext> {
        self.objects.get(&view_model_type.id()).map(|factory| factory())
    }
}
