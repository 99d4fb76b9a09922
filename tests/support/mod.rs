//! Shared test pages that record their navigation hooks into a journal.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use navaware::navigation::{NavigationAware, NavigationController, PageRegistry, ParameterBag, View};
use navaware::{MemoryHost, NavigationOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    To,
    From,
}

#[derive(Clone)]
pub struct Event {
    pub page: &'static str,
    pub hook: Hook,
    pub parameters: ParameterBag,
}

/// Ordered record of every hook invocation across pages
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn record(&self, page: &'static str, hook: Hook, parameters: &ParameterBag) {
        self.0.lock().unwrap().push(Event {
            page,
            hook,
            parameters: parameters.clone(),
        });
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    /// `"PageA:to"`, `"PageB:from"`, ...
    pub fn summary(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|event| {
                let hook = match event.hook {
                    Hook::To => "to",
                    Hook::From => "from",
                };
                format!("{}:{}", event.page, hook)
            })
            .collect()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// A navigation-aware page named `$name` that writes to a [`Journal`]
macro_rules! tracked_page {
    ($name:ident) => {
        pub struct $name {
            journal: Journal,
        }

        impl $name {
            pub fn new(journal: &Journal) -> Self {
                Self {
                    journal: journal.clone(),
                }
            }
        }

        impl NavigationAware for $name {
            fn on_navigated_to(&self, parameters: &ParameterBag) {
                self.journal.record(stringify!($name), Hook::To, parameters);
            }

            fn on_navigated_from(&self, parameters: &ParameterBag) {
                self.journal.record(stringify!($name), Hook::From, parameters);
            }
        }

        impl View for $name {
            fn navigation_aware(&self) -> Option<&dyn NavigationAware> {
                Some(self)
            }
        }
    };
}

tracked_page!(PageA);
tracked_page!(PageB);
tracked_page!(PageC);
tracked_page!(PageD);

/// A page without navigation hooks
#[derive(Default)]
pub struct PlainPage;

impl View for PlainPage {}

/// `PageA`..`PageD` under the keys `A`..`D` (and their type names), plus `PlainPage`
pub fn tracked_registry(journal: &Journal) -> PageRegistry {
    let mut pages = PageRegistry::new();
    let j = journal.clone();
    pages.register_with::<PageA, _>(Some("A"), move || Ok(PageA::new(&j)));
    let j = journal.clone();
    pages.register_with::<PageB, _>(Some("B"), move || Ok(PageB::new(&j)));
    let j = journal.clone();
    pages.register_with::<PageC, _>(Some("C"), move || Ok(PageC::new(&j)));
    let j = journal.clone();
    pages.register_with::<PageD, _>(Some("D"), move || Ok(PageD::new(&j)));
    pages.register::<PlainPage>(None);
    pages
}

pub struct Fixture {
    pub journal: Journal,
    pub host: Arc<MemoryHost>,
    pub navigation: NavigationController,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_options(NavigationOptions::default())
    }

    pub fn with_options(options: NavigationOptions) -> Self {
        let journal = Journal::default();
        let host = Arc::new(MemoryHost::new());
        let navigation =
            NavigationController::new(host.clone(), Arc::new(tracked_registry(&journal)))
                .with_options(options);
        Self {
            journal,
            host,
            navigation,
        }
    }

    /// Push `keys` in order, then forget the hooks and host calls that produced them
    pub async fn seed(&self, keys: &[&str]) {
        for key in keys {
            self.navigation.navigate_to(key, None).await.unwrap();
        }
        self.journal.clear();
        self.host.clear_calls();
    }
}

pub fn message(parameters: &ParameterBag) -> Option<&str> {
    parameters.get::<String>("message").map(String::as_str)
}
