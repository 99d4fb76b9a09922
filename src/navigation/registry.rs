//! String-keyed page registry for key and path based navigation.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;

use super::error::{NavigationError, Result};
use super::services::ServiceProvider;
use super::view::{TypeDescriptor, View, ViewRef};

type PageConstructor = Arc<dyn Fn() -> anyhow::Result<ViewRef> + Send + Sync>;

/// A registered page: its key, view type and how to build it directly
#[derive(Clone)]
pub struct PageDescriptor {
    key: String,
    view_type: TypeDescriptor,
    constructor: Option<PageConstructor>,
}

impl PageDescriptor {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn view_type(&self) -> TypeDescriptor {
        self.view_type
    }

    /// Whether the page can be built without a service provider
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }
}

/// Maps page keys to view types and creates page instances on demand.
///
/// Registering a page under a custom key also registers it under its bare
/// type name, so both strings resolve to the same page.
#[derive(Default)]
pub struct PageRegistry {
    pages: HashMap<String, PageDescriptor>,
    services: Option<Arc<dyn ServiceProvider>>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service provider consulted before direct construction
    pub fn set_service_provider(&mut self, services: Arc<dyn ServiceProvider>) {
        self.services = Some(services);
    }

    /// Register a page built with `V::default()`
    pub fn register<V>(&mut self, key: Option<&str>)
    where
        V: View + Default,
    {
        self.register_with::<V, _>(key, || Ok(V::default()));
    }

    /// Register a page built by `constructor`
    pub fn register_with<V, F>(&mut self, key: Option<&str>, constructor: F)
    where
        V: View,
        F: Fn() -> anyhow::Result<V> + Send + Sync + 'static,
    {
        let constructor: PageConstructor =
            Arc::new(move || constructor().map(|view| Arc::new(view) as ViewRef));
        self.insert(TypeDescriptor::of::<V>(), key, Some(constructor));
    }

    /// Register a page that only the service provider can create
    pub fn register_type<V: View>(&mut self, key: Option<&str>) {
        self.insert(TypeDescriptor::of::<V>(), key, None);
    }

    fn insert(
        &mut self,
        view_type: TypeDescriptor,
        key: Option<&str>,
        constructor: Option<PageConstructor>,
    ) {
        let key = match key {
            Some(key) if key.trim().is_empty() => {
                log::warn!(
                    "Blank page key for '{}', registering under its type name",
                    view_type.name()
                );
                None
            }
            other => other,
        };
        let type_name = view_type.name();
        let registration_key = key.unwrap_or(type_name);

        log::debug!("Registering page '{}' as {}", registration_key, view_type.full_name());
        self.pages.insert(
            registration_key.to_string(),
            PageDescriptor {
                key: registration_key.to_string(),
                view_type,
                constructor: constructor.clone(),
            },
        );

        if registration_key != type_name {
            self.pages.insert(
                type_name.to_string(),
                PageDescriptor {
                    key: type_name.to_string(),
                    view_type,
                    constructor,
                },
            );
        }
    }

    /// Create a new instance of the page registered under `key`
    pub fn resolve(&self, key: &str) -> Result<ViewRef> {
        let descriptor = self
            .pages
            .get(key)
            .ok_or_else(|| NavigationError::UnregisteredKey(key.to_string()))?;

        if let Some(services) = &self.services {
            if let Some(view) = services.resolve_view(&descriptor.view_type) {
                log::debug!("Resolved page '{}' from service provider", key);
                return Ok(view);
            }
        }

        let instantiation_failed = |source| NavigationError::InstantiationFailed {
            type_name: descriptor.view_type.name().to_string(),
            source,
        };

        match &descriptor.constructor {
            Some(constructor) => constructor().map_err(instantiation_failed),
            None => Err(instantiation_failed(anyhow!(
                "no constructor registered and the service provider cannot create it"
            ))),
        }
    }

    /// View type registered under `key`
    pub fn page_type(&self, key: &str) -> Option<TypeDescriptor> {
        self.pages.get(key).map(|descriptor| descriptor.view_type)
    }

    pub fn descriptor(&self, key: &str) -> Option<&PageDescriptor> {
        self.pages.get(key)
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.pages.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Drop every registration. The service provider is kept.
    pub fn clear(&mut self) {
        self.pages.clear();
    }
}
