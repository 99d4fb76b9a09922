//! Naming-convention inference of view-model types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::resolver::{ConventionFn, ViewModelCatalog, ViewModelType};
use crate::navigation::view::{TypeDescriptor, qualify};

/// Suffix rules used to derive view-model names from view names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionConfig {
    #[serde(default = "default_view_model_suffix")]
    pub view_model_suffix: String,
    #[serde(default = "default_view_suffixes")]
    pub view_suffixes: Vec<String>,
}

fn default_view_model_suffix() -> String {
    "ViewModel".to_string()
}

fn default_view_suffixes() -> Vec<String> {
    vec!["Page".to_string(), "View".to_string()]
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            view_model_suffix: default_view_model_suffix(),
            view_suffixes: default_view_suffixes(),
        }
    }
}

/// `MainPage` → `MainPageViewModel`, then `MainViewModel`; `CartView` →
/// `CartViewViewModel`, then `CartViewModel`. Candidates live in the view's
/// own namespace.
#[derive(Debug, Clone, Default)]
pub struct NamingConvention {
    config: ConventionConfig,
}

impl NamingConvention {
    pub fn new(config: ConventionConfig) -> Self {
        Self { config }
    }

    /// Candidate full names in the order they are tried
    pub fn candidates(&self, view_type: &TypeDescriptor) -> Vec<String> {
        let name = view_type.name();
        let namespace = view_type.namespace();
        let suffix = &self.config.view_model_suffix;

        let mut candidates = vec![qualify(namespace, &format!("{}{}", name, suffix))];
        for view_suffix in &self.config.view_suffixes {
            if let Some(base) = name.strip_suffix(view_suffix.as_str()) {
                let candidate = qualify(namespace, &format!("{}{}", base, suffix));
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }
        candidates
    }

    /// First candidate present in `catalog`
    pub fn resolve(&self, view_type: &TypeDescriptor, catalog: &ViewModelCatalog) -> Option<ViewModelType> {
        self.candidates(view_type)
            .iter()
            .find_map(|candidate| catalog.get(candidate).cloned())
    }

    pub fn into_fn(self) -> ConventionFn {
        Arc::new(move |view_type: &TypeDescriptor, catalog: &ViewModelCatalog| {
            self.resolve(view_type, catalog)
        })
    }
}
