//! Sample pages used by the `demo` and `run` commands.

use std::any::Any;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::*;

use navaware::navigation::{BindingContext, MemoryHost, NavigationAware, ParameterBag, View};
use navaware::{AutoWireViewModel, NavigationApp, NavigationConfig, ViewModelResolver};

fn locked<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `message` and `timestamp` as sent between the sample pages
fn describe_parameters(parameters: &ParameterBag) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(message) = parameters.get::<String>("message") {
        lines.push(format!("Received: {}", message));
    }
    if let Some(timestamp) = parameters.get::<DateTime<Local>>("timestamp") {
        lines.push(format!("Timestamp: {}", timestamp.format("%H:%M:%S")));
    } else if let Some(timestamp) = parameters.get::<String>("timestamp") {
        lines.push(format!("Timestamp: {}", timestamp));
    }
    lines
}

fn announce(page: &str, event: &str, parameters: &ParameterBag) {
    println!("    {} {} {}", "↳".bright_blue(), page.bright_white().bold(), event.dimmed());
    for line in describe_parameters(parameters) {
        println!("      {}", line.cyan());
    }
}

/// Binding context slot and auto-wire flag shared by the sample pages
#[derive(Default)]
struct PageState {
    binding_context: Mutex<Option<BindingContext>>,
    auto_wire: AutoWireViewModel,
}

impl PageState {
    fn bind(&self, context: BindingContext) -> bool {
        *locked(&self.binding_context) = Some(context);
        true
    }

    fn view_model<VM: Any + Send + Sync>(&self) -> Option<Arc<VM>> {
        let context = locked(&self.binding_context).clone()?;
        context.downcast::<VM>().ok()
    }
}

#[derive(Debug)]
pub struct MainPageViewModel {
    pub status_message: Mutex<String>,
}

impl Default for MainPageViewModel {
    fn default() -> Self {
        Self {
            status_message: Mutex::new("MainPage ViewModel Loaded".to_string()),
        }
    }
}

#[derive(Debug)]
pub struct SecondPageViewModel {
    pub status_message: Mutex<String>,
}

impl Default for SecondPageViewModel {
    fn default() -> Self {
        Self {
            status_message: Mutex::new("SecondPage ViewModel Loaded".to_string()),
        }
    }
}

#[derive(Debug)]
pub struct ThirdPageViewModel {
    pub status_message: Mutex<String>,
}

impl Default for ThirdPageViewModel {
    fn default() -> Self {
        Self {
            status_message: Mutex::new("ThirdPage ViewModel Auto-Wired!".to_string()),
        }
    }
}

impl ThirdPageViewModel {
    fn receive(&self, parameters: &ParameterBag) {
        let mut message = "ThirdPage ViewModel Auto-Wired!".to_string();
        for line in describe_parameters(parameters) {
            message.push('\n');
            message.push_str(&line);
        }
        *locked(&self.status_message) = message;
    }
}

/// Root page; not navigation aware
#[derive(Default)]
pub struct MainPage {
    state: PageState,
}

impl MainPage {
    pub fn new(resolver: &ViewModelResolver) -> Result<Self> {
        let page = Self::default();
        page.state.auto_wire.set(&page, resolver, true)?;
        Ok(page)
    }
}

impl View for MainPage {
    fn set_binding_context(&self, context: BindingContext) -> bool {
        self.state.bind(context)
    }
}

#[derive(Default)]
pub struct SecondPage {
    state: PageState,
    status_label: Mutex<String>,
}

impl SecondPage {
    pub fn new(resolver: &ViewModelResolver) -> Result<Self> {
        let page = Self::default();
        page.state.auto_wire.set(&page, resolver, true)?;
        Ok(page)
    }

    pub fn status_label(&self) -> String {
        locked(&self.status_label).clone()
    }
}

impl NavigationAware for SecondPage {
    fn on_navigated_to(&self, parameters: &ParameterBag) {
        let mut label = "SecondPage: Navigated To".to_string();
        for line in describe_parameters(parameters) {
            label.push('\n');
            label.push_str(&line);
        }
        *locked(&self.status_label) = label;
        announce("SecondPage", "navigated to", parameters);
    }

    fn on_navigated_from(&self, parameters: &ParameterBag) {
        *locked(&self.status_label) = "SecondPage: Navigated From".to_string();
        announce("SecondPage", "navigated from", parameters);
    }
}

impl View for SecondPage {
    fn navigation_aware(&self) -> Option<&dyn NavigationAware> {
        Some(self)
    }

    fn set_binding_context(&self, context: BindingContext) -> bool {
        self.state.bind(context)
    }
}

#[derive(Default)]
pub struct ThirdPage {
    state: PageState,
}

impl ThirdPage {
    pub fn new(resolver: &ViewModelResolver) -> Result<Self> {
        let page = Self::default();
        page.state.auto_wire.set(&page, resolver, true)?;
        Ok(page)
    }
}

impl NavigationAware for ThirdPage {
    fn on_navigated_to(&self, parameters: &ParameterBag) {
        if let Some(view_model) = self.state.view_model::<ThirdPageViewModel>() {
            view_model.receive(parameters);
        }
        announce("ThirdPage", "navigated to", parameters);
    }

    fn on_navigated_from(&self, parameters: &ParameterBag) {
        announce("ThirdPage", "navigated from", parameters);
    }
}

impl View for ThirdPage {
    fn navigation_aware(&self) -> Option<&dyn NavigationAware> {
        Some(self)
    }

    fn set_binding_context(&self, context: BindingContext) -> bool {
        self.state.bind(context)
    }
}

/// One-line status of a sample page's view model
pub fn view_model_status(view: &dyn View) -> Option<String> {
    let any = view.as_any();
    let state = if let Some(page) = any.downcast_ref::<MainPage>() {
        &page.state
    } else if let Some(page) = any.downcast_ref::<SecondPage>() {
        &page.state
    } else {
        &any.downcast_ref::<ThirdPage>()?.state
    };

    let status = if let Some(vm) = state.view_model::<MainPageViewModel>() {
        locked(&vm.status_message).clone()
    } else if let Some(vm) = state.view_model::<SecondPageViewModel>() {
        locked(&vm.status_message).clone()
    } else {
        let vm = state.view_model::<ThirdPageViewModel>()?;
        locked(&vm.status_message).clone()
    };
    Some(status.replace('\n', " | "))
}

/// The label `SecondPage` updates from its navigation hooks
pub fn page_label(view: &dyn View) -> Option<String> {
    let page = view.as_any().downcast_ref::<SecondPage>()?;
    Some(page.status_label().replace('\n', " | "))
}

/// The sample application on an in-memory host.
///
/// `MainPage` and `ThirdPage` find their view models by naming convention;
/// `SecondPage` has an explicit registration.
pub fn build_app(config: &NavigationConfig) -> (NavigationApp, Arc<MemoryHost>) {
    let mut resolver = ViewModelResolver::with_conventions(config.conventions.clone());
    resolver.add_known::<MainPageViewModel>();
    resolver.add_known::<ThirdPageViewModel>();
    resolver.register::<SecondPage, SecondPageViewModel>();
    let resolver = Arc::new(resolver);

    let host = Arc::new(MemoryHost::new());

    let main_resolver = Arc::clone(&resolver);
    let second_resolver = Arc::clone(&resolver);
    let third_resolver = Arc::clone(&resolver);

    let app = NavigationApp::builder()
        .with_config(config)
        .view_models(resolver)
        .with_main_host(host.clone())
        .register_page_with::<MainPage, _>(None, move || MainPage::new(&main_resolver))
        .register_page_with::<SecondPage, _>(None, move || SecondPage::new(&second_resolver))
        .register_page_with::<ThirdPage, _>(Some("details"), move || ThirdPage::new(&third_resolver))
        .build();

    (app, host)
}
