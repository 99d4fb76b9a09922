//! View-model location: explicit factories, explicit type registrations and
//! naming-convention inference, in that order.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;

use super::convention::{ConventionConfig, NamingConvention};
use crate::navigation::error::{NavigationError, Result};
use crate::navigation::services::ServiceProvider;
use crate::navigation::view::{BindingContext, TypeDescriptor, View};

type ViewModelConstructor = Arc<dyn Fn() -> anyhow::Result<BindingContext> + Send + Sync>;

/// Zero-argument factory producing a view-model instance
pub type ViewModelFactory = Arc<dyn Fn() -> BindingContext + Send + Sync>;

/// Maps a view type to a view-model type using the types known to a catalog
pub type ConventionFn =
    Arc<dyn Fn(&TypeDescriptor, &ViewModelCatalog) -> Option<ViewModelType> + Send + Sync>;

/// A view-model type and, when available, how to construct it directly
#[derive(Clone)]
pub struct ViewModelType {
    descriptor: TypeDescriptor,
    constructor: Option<ViewModelConstructor>,
}

impl ViewModelType {
    /// A view model built with `VM::default()`
    pub fn of<VM>() -> Self
    where
        VM: Any + Send + Sync + Default,
    {
        Self::with_constructor::<VM, _>(|| Ok(VM::default()))
    }

    /// A view model built by `constructor`
    pub fn with_constructor<VM, F>(constructor: F) -> Self
    where
        VM: Any + Send + Sync,
        F: Fn() -> anyhow::Result<VM> + Send + Sync + 'static,
    {
        Self {
            descriptor: TypeDescriptor::of::<VM>(),
            constructor: Some(Arc::new(move || {
                constructor().map(|vm| Arc::new(vm) as BindingContext)
            })),
        }
    }

    /// A view model only a service provider can create
    pub fn service_only<VM: Any + Send + Sync>() -> Self {
        Self {
            descriptor: TypeDescriptor::of::<VM>(),
            constructor: None,
        }
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    /// Service provider first, then direct construction
    fn instantiate(&self, services: Option<&dyn ServiceProvider>) -> Result<BindingContext> {
        if let Some(instance) = services.and_then(|s| s.resolve_view_model(&self.descriptor)) {
            return Ok(instance);
        }

        let failed = |source| NavigationError::ViewModelInstantiationFailed {
            type_name: self.descriptor.name().to_string(),
            source,
        };

        match &self.constructor {
            Some(constructor) => constructor().map_err(failed),
            None => Err(failed(anyhow!(
                "no constructor registered and the service provider cannot create it"
            ))),
        }
    }
}

impl fmt::Debug for ViewModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModelType")
            .field("descriptor", &self.descriptor)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}

/// The view-model types known to the application, by full type name.
///
/// Convention inference only finds types that were added here at setup.
#[derive(Default, Clone, Debug)]
pub struct ViewModelCatalog {
    types: HashMap<String, ViewModelType>,
}

impl ViewModelCatalog {
    pub fn insert(&mut self, view_model_type: ViewModelType) {
        self.types
            .insert(view_model_type.descriptor.full_name(), view_model_type);
    }

    pub fn get(&self, full_name: &str) -> Option<&ViewModelType> {
        self.types.get(full_name)
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.types.contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// How a view model was found for a view
#[derive(Clone)]
pub enum Resolution {
    Factory(ViewModelFactory),
    Explicit(ViewModelType),
    Registered(ViewModelType),
    Convention(ViewModelType),
}

impl Resolution {
    pub fn source(&self) -> &'static str {
        match self {
            Resolution::Factory(_) => "factory",
            Resolution::Explicit(_) => "explicit",
            Resolution::Registered(_) => "registered",
            Resolution::Convention(_) => "convention",
        }
    }

    /// The resolved type, `None` for factories
    pub fn view_model_type(&self) -> Option<&ViewModelType> {
        match self {
            Resolution::Factory(_) => None,
            Resolution::Explicit(t) | Resolution::Registered(t) | Resolution::Convention(t) => Some(t),
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.view_model_type() {
            Some(t) => write!(f, "{}({:?})", self.source(), t.descriptor),
            None => f.write_str(self.source()),
        }
    }
}

/// Attaches view models to views.
///
/// Factories and explicit type registrations are cached per view type.
/// Convention inference is evaluated on every call and its result is not
/// cached; use [`ViewModelResolver::apply_conventions`] to resolve known views
/// once at setup instead.
pub struct ViewModelResolver {
    type_cache: HashMap<TypeId, ViewModelType>,
    factory_cache: HashMap<TypeId, ViewModelFactory>,
    catalog: ViewModelCatalog,
    convention: ConventionFn,
    services: Option<Arc<dyn ServiceProvider>>,
}

impl Default for ViewModelResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModelResolver {
    pub fn new() -> Self {
        Self {
            type_cache: HashMap::new(),
            factory_cache: HashMap::new(),
            catalog: ViewModelCatalog::default(),
            convention: NamingConvention::default().into_fn(),
            services: None,
        }
    }

    /// A resolver whose default convention uses `conventions`
    pub fn with_conventions(conventions: ConventionConfig) -> Self {
        Self {
            convention: NamingConvention::new(conventions).into_fn(),
            ..Self::new()
        }
    }

    pub fn set_service_provider(&mut self, services: Arc<dyn ServiceProvider>) {
        self.services = Some(services);
    }

    /// Replace the convention function
    pub fn set_convention(&mut self, convention: ConventionFn) {
        self.convention = convention;
    }

    /// Make `VM` discoverable by convention
    pub fn add_known<VM>(&mut self)
    where
        VM: Any + Send + Sync + Default,
    {
        self.catalog.insert(ViewModelType::of::<VM>());
    }

    pub fn add_known_type(&mut self, view_model_type: ViewModelType) {
        self.catalog.insert(view_model_type);
    }

    pub fn catalog(&self) -> &ViewModelCatalog {
        &self.catalog
    }

    /// Use `VM` for views of type `V`
    pub fn register<V, VM>(&mut self)
    where
        V: View,
        VM: Any + Send + Sync + Default,
    {
        self.register_type::<V>(ViewModelType::of::<VM>());
    }

    pub fn register_type<V: View>(&mut self, view_model_type: ViewModelType) {
        log::debug!(
            "Registering view model {:?} for {}",
            view_model_type.descriptor,
            TypeDescriptor::of::<V>()
        );
        self.type_cache.insert(TypeId::of::<V>(), view_model_type);
    }

    /// Build view models for views of type `V` with `factory`
    pub fn register_factory<V, F>(&mut self, factory: F)
    where
        V: View,
        F: Fn() -> BindingContext + Send + Sync + 'static,
    {
        log::debug!("Registering view model factory for {}", TypeDescriptor::of::<V>());
        self.factory_cache.insert(TypeId::of::<V>(), Arc::new(factory));
    }

    /// Find the view model for `view_type` without creating it
    pub fn resolve(&self, view_type: &TypeDescriptor, explicit: Option<&ViewModelType>) -> Option<Resolution> {
        if let Some(factory) = self.factory_cache.get(&view_type.id()) {
            return Some(Resolution::Factory(Arc::clone(factory)));
        }
        if let Some(explicit) = explicit {
            return Some(Resolution::Explicit(explicit.clone()));
        }
        if let Some(registered) = self.type_cache.get(&view_type.id()) {
            return Some(Resolution::Registered(registered.clone()));
        }
        (self.convention)(view_type, &self.catalog).map(Resolution::Convention)
    }

    /// Create the view model for `view` and attach it as its binding context.
    ///
    /// Returns `Ok(None)` when no view model can be resolved; views without a
    /// view model are valid.
    pub fn auto_wire(&self, view: &dyn View, explicit: Option<&ViewModelType>) -> Result<Option<BindingContext>> {
        let view_type = view.view_type();

        let Some(resolution) = self.resolve(&view_type, explicit) else {
            log::debug!(
                "Could not resolve a view model for {:?}; follow the naming convention (e.g. {}ViewModel) or register one explicitly",
                view_type,
                view_type.name()
            );
            return Ok(None);
        };

        let view_model = match &resolution {
            Resolution::Factory(factory) => factory(),
            Resolution::Explicit(t) | Resolution::Registered(t) | Resolution::Convention(t) => {
                t.instantiate(self.services.as_deref())?
            }
        };

        if view.set_binding_context(Arc::clone(&view_model)) {
            log::debug!("Bound {} to view model via {:?}", view_type, resolution);
        } else {
            log::warn!("{} cannot hold a binding context; view model not attached", view_type);
        }
        Ok(Some(view_model))
    }

    /// Evaluate the convention once for each of `views` and store the hits as
    /// explicit registrations. Returns the number of views resolved.
    pub fn apply_conventions<'a, I>(&mut self, views: I) -> usize
    where
        I: IntoIterator<Item = &'a TypeDescriptor>,
    {
        let mut resolved = 0;
        for view_type in views {
            if self.type_cache.contains_key(&view_type.id()) {
                continue;
            }
            if let Some(view_model_type) = (self.convention)(view_type, &self.catalog) {
                self.type_cache.insert(view_type.id(), view_model_type);
                resolved += 1;
            }
        }
        resolved
    }

    pub fn is_registered(&self, view_type: &TypeDescriptor) -> bool {
        self.type_cache.contains_key(&view_type.id()) || self.factory_cache.contains_key(&view_type.id())
    }

    /// Drop explicit registrations and factories. The catalog and convention are kept.
    pub fn clear(&mut self) {
        self.type_cache.clear();
        self.factory_cache.clear();
    }
}
