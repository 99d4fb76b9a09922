//! Application-level wiring: page and view-model registrations plus the main
//! navigation host, assembled once at startup.

use std::sync::Arc;

use crate::config::NavigationConfig;
use crate::navigation::{
    NavigationController, NavigationError, NavigationHost, NavigationOptions, PageRegistry,
    Result, ServiceProvider, View, ViewRef,
};
use crate::viewmodel::ViewModelResolver;

/// Registrations shared by every navigation controller of an application
pub struct NavigationApp {
    pages: Arc<PageRegistry>,
    view_models: Arc<ViewModelResolver>,
    main_host: Option<Arc<dyn NavigationHost>>,
    options: NavigationOptions,
}

impl NavigationApp {
    pub fn builder() -> NavigationAppBuilder {
        NavigationAppBuilder::default()
    }

    /// Controller bound to the main host
    pub fn navigation(&self) -> Result<NavigationController> {
        let pages = Arc::clone(&self.pages);
        NavigationController::from_host(self.main_host.clone(), pages)
            .map(|controller| controller.with_options(self.options.clone()))
    }

    /// Controller bound to an arbitrary host stack
    pub fn navigation_for(&self, host: Arc<dyn NavigationHost>) -> NavigationController {
        NavigationController::new(host, Arc::clone(&self.pages)).with_options(self.options.clone())
    }

    /// Controller bound to the stack `view` lives in
    pub fn navigation_for_view(&self, view: &dyn View) -> Result<NavigationController> {
        let host = view.navigation_host().ok_or_else(|| {
            NavigationError::NavigationUnavailable(format!(
                "{} is not hosted in a navigation stack",
                view.view_type()
            ))
        })?;
        Ok(self.navigation_for(host))
    }

    /// Create the page registered under `key` without navigating to it
    pub fn create_page(&self, key: &str) -> Result<ViewRef> {
        self.pages.resolve(key)
    }

    pub fn pages(&self) -> &Arc<PageRegistry> {
        &self.pages
    }

    pub fn view_models(&self) -> &Arc<ViewModelResolver> {
        &self.view_models
    }

    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }
}

#[derive(Default)]
pub struct NavigationAppBuilder {
    pages: PageRegistry,
    view_models: Option<Arc<ViewModelResolver>>,
    main_host: Option<Arc<dyn NavigationHost>>,
    options: NavigationOptions,
}

impl NavigationAppBuilder {
    /// Register `V` under `key` (or its type name), built with `V::default()`
    pub fn register_page<V>(mut self, key: Option<&str>) -> Self
    where
        V: View + Default,
    {
        self.pages.register::<V>(key);
        self
    }

    pub fn register_page_with<V, F>(mut self, key: Option<&str>, constructor: F) -> Self
    where
        V: View,
        F: Fn() -> anyhow::Result<V> + Send + Sync + 'static,
    {
        self.pages.register_with::<V, F>(key, constructor);
        self
    }

    /// Register `V` for creation through the service provider only
    pub fn register_page_type<V: View>(mut self, key: Option<&str>) -> Self {
        self.pages.register_type::<V>(key);
        self
    }

    /// Service provider consulted before direct page construction
    pub fn with_services(mut self, services: Arc<dyn ServiceProvider>) -> Self {
        self.pages.set_service_provider(services);
        self
    }

    pub fn with_main_host(mut self, host: Arc<dyn NavigationHost>) -> Self {
        self.main_host = Some(host);
        self
    }

    pub fn with_options(mut self, options: NavigationOptions) -> Self {
        self.options = options;
        self
    }

    /// Take navigation options from a loaded configuration
    pub fn with_config(self, config: &NavigationConfig) -> Self {
        self.with_options(config.navigation.clone())
    }

    /// Resolver shared with the pages; pages built by this app can capture the
    /// same `Arc` to auto-wire themselves
    pub fn view_models(mut self, resolver: Arc<ViewModelResolver>) -> Self {
        self.view_models = Some(resolver);
        self
    }

    pub fn build(self) -> NavigationApp {
        log::debug!("Built navigation app with {} page keys", self.pages.len());
        NavigationApp {
            pages: Arc::new(self.pages),
            view_models: self.view_models.unwrap_or_default(),
            main_host: self.main_host,
            options: self.options,
        }
    }
}
