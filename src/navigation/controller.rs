//! Sequences host stack mutations with the navigation lifecycle hooks.
//!
//! Every operation follows the same protocol: notify the outgoing top view,
//! mutate the host stack, notify the incoming top view. Views are notified
//! only if they are [`NavigationAware`](super::NavigationAware), and each
//! operation notifies at most one outgoing and one incoming view.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::{NavigationError, Result, require_non_blank};
use super::host::NavigationHost;
use super::parameters::ParameterBag;
use super::registry::PageRegistry;
use super::view::ViewRef;

/// Behaviour switches for a [`NavigationController`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationOptions {
    /// `animated` flag passed to the host when going back one page
    #[serde(default = "default_animate_back")]
    pub animate_back: bool,
}

fn default_animate_back() -> bool {
    true
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            animate_back: default_animate_back(),
        }
    }
}

/// Minimal navigation contract for code that only pushes and pops
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate_to_view(&self, view: ViewRef, parameters: Option<&ParameterBag>) -> Result<()>;

    async fn navigate_to(&self, key: &str, parameters: Option<&ParameterBag>) -> Result<()>;

    async fn go_back(&self, parameters: Option<&ParameterBag>) -> Result<()>;
}

/// Navigation over one host stack
#[derive(Clone)]
pub struct NavigationController {
    host: Arc<dyn NavigationHost>,
    pages: Arc<PageRegistry>,
    options: NavigationOptions,
}

fn notify_from(view: &ViewRef, parameters: &ParameterBag) {
    if let Some(aware) = view.navigation_aware() {
        log::debug!("Notifying {} of navigation away", view.view_type());
        aware.on_navigated_from(parameters);
    }
}

fn notify_to(view: &ViewRef, parameters: &ParameterBag) {
    if let Some(aware) = view.navigation_aware() {
        log::debug!("Notifying {} of navigation to", view.view_type());
        aware.on_navigated_to(parameters);
    }
}

impl NavigationController {
    pub fn new(host: Arc<dyn NavigationHost>, pages: Arc<PageRegistry>) -> Self {
        Self {
            host,
            pages,
            options: NavigationOptions::default(),
        }
    }

    /// Bind to `host`, failing with `NavigationUnavailable` when there is none
    pub fn from_host(host: Option<Arc<dyn NavigationHost>>, pages: Arc<PageRegistry>) -> Result<Self> {
        let host = host.ok_or_else(|| {
            NavigationError::NavigationUnavailable("no host navigation stack supplied".to_string())
        })?;
        Ok(Self::new(host, pages))
    }

    pub fn with_options(mut self, options: NavigationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn host(&self) -> &Arc<dyn NavigationHost> {
        &self.host
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    /// Fresh snapshot of the host stack, root first
    pub fn stack(&self) -> Vec<ViewRef> {
        self.host.navigation_stack()
    }

    /// The visible view
    pub fn current(&self) -> Option<ViewRef> {
        self.host.navigation_stack().pop()
    }

    pub fn depth(&self) -> usize {
        self.host.navigation_stack().len()
    }

    /// Push `view` and make it the visible page
    pub async fn navigate_to_view(&self, view: ViewRef, parameters: Option<&ParameterBag>) -> Result<()> {
        let empty = ParameterBag::new();
        let parameters = parameters.unwrap_or(&empty);

        if let Some(current) = self.current() {
            notify_from(&current, parameters);
        }

        let target = view.view_type();
        self.host
            .push(Arc::clone(&view))
            .await
            .map_err(NavigationError::Host)?;

        notify_to(&view, parameters);
        log::info!("Navigated to {}", target);
        Ok(())
    }

    /// Create the page registered under `key` and push it
    pub async fn navigate_to(&self, key: &str, parameters: Option<&ParameterBag>) -> Result<()> {
        require_non_blank("key", key)?;
        let view = self.pages.resolve(key)?;
        self.navigate_to_view(view, parameters).await
    }

    /// Pop the visible page
    pub async fn go_back(&self, parameters: Option<&ParameterBag>) -> Result<()> {
        let empty = ParameterBag::new();
        let parameters = parameters.unwrap_or(&empty);

        if let Some(current) = self.current() {
            notify_from(&current, parameters);
        }

        self.host
            .pop(self.options.animate_back)
            .await
            .map_err(NavigationError::Host)?;

        if let Some(previous) = self.current() {
            notify_to(&previous, parameters);
            log::info!("Navigated back to {}", previous.view_type());
        }
        Ok(())
    }

    /// Push one page per `/`-separated segment of `path`, left to right.
    ///
    /// Each segment is a full navigation of its own with the same parameters.
    /// A failing segment leaves the pages pushed before it in place.
    pub async fn navigate(&self, path: &str, parameters: Option<&ParameterBag>) -> Result<()> {
        require_non_blank("path", path)?;

        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
        if segments.is_empty() {
            return Err(NavigationError::EmptyPath(path.to_string()));
        }

        log::debug!("Navigating path '{}' ({} segments)", path, segments.len());
        for segment in segments {
            let view = self.pages.resolve(segment)?;
            self.navigate_to_view(view, parameters).await?;
        }
        Ok(())
    }

    /// Pop until the nearest page matching `key` is visible.
    ///
    /// A page matches if its bare type name equals `key` or its type is the
    /// one registered under `key`.
    pub async fn go_back_to(&self, key: &str, parameters: Option<&ParameterBag>) -> Result<()> {
        require_non_blank("key", key)?;

        let stack = self.host.navigation_stack();
        let registered = self.pages.page_type(key);
        let target_index = stack
            .iter()
            .rposition(|view| {
                let view_type = view.view_type();
                view_type.name() == key || registered.is_some_and(|page_type| page_type == view_type)
            })
            .ok_or_else(|| NavigationError::TargetNotFound(key.to_string()))?;

        let pages_to_pop = stack.len() - target_index - 1;
        if pages_to_pop == 0 {
            log::debug!("'{}' is already the visible page", key);
            return Ok(());
        }

        let empty = ParameterBag::new();
        let parameters = parameters.unwrap_or(&empty);

        if let Some(current) = stack.last() {
            notify_from(current, parameters);
        }

        for _ in 0..pages_to_pop {
            self.host.pop(false).await.map_err(NavigationError::Host)?;
        }

        if let Some(target) = self.current() {
            notify_to(&target, parameters);
            log::info!("Navigated back to {} ({} pages popped)", target.view_type(), pages_to_pop);
        }
        Ok(())
    }

    /// Pop everything above the root page
    pub async fn go_back_to_root(&self, parameters: Option<&ParameterBag>) -> Result<()> {
        let stack = self.host.navigation_stack();
        if stack.len() <= 1 {
            return Ok(());
        }

        let empty = ParameterBag::new();
        let parameters = parameters.unwrap_or(&empty);

        if let Some(current) = stack.last() {
            notify_from(current, parameters);
        }

        self.host.pop_to_root().await.map_err(NavigationError::Host)?;

        if let Some(root) = self.host.navigation_stack().first() {
            notify_to(root, parameters);
            log::info!("Navigated back to root {}", root.view_type());
        }
        Ok(())
    }
}

#[async_trait]
impl Navigator for NavigationController {
    async fn navigate_to_view(&self, view: ViewRef, parameters: Option<&ParameterBag>) -> Result<()> {
        NavigationController::navigate_to_view(self, view, parameters).await
    }

    async fn navigate_to(&self, key: &str, parameters: Option<&ParameterBag>) -> Result<()> {
        NavigationController::navigate_to(self, key, parameters).await
    }

    async fn go_back(&self, parameters: Option<&ParameterBag>) -> Result<()> {
        NavigationController::go_back(self, parameters).await
    }
}
