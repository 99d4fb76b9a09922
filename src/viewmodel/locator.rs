//! Declarative properties a view holds to request view-model wiring.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::resolver::{ViewModelResolver, ViewModelType};
use crate::navigation::error::Result;
use crate::navigation::view::View;

/// Flag that wires the view model when it changes to `true`
#[derive(Debug, Default)]
pub struct AutoWireViewModel {
    enabled: AtomicBool,
}

impl AutoWireViewModel {
    pub fn get(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Set the flag on `view`. Only a change from `false` to `true` wires.
    pub fn set(&self, view: &dyn View, resolver: &ViewModelResolver, value: bool) -> Result<()> {
        let previous = self.enabled.swap(value, Ordering::AcqRel);
        if value && !previous {
            resolver.auto_wire(view, None)?;
        }
        Ok(())
    }
}

/// Explicit view-model type for a view; wires when a different type is set
#[derive(Debug, Default)]
pub struct ViewModelTypeProperty {
    value: Mutex<Option<ViewModelType>>,
}

impl ViewModelTypeProperty {
    pub fn get(&self) -> Option<ViewModelType> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(
        &self,
        view: &dyn View,
        resolver: &ViewModelResolver,
        value: Option<ViewModelType>,
    ) -> Result<()> {
        let previous = std::mem::replace(
            &mut *self.value.lock().unwrap_or_else(PoisonError::into_inner),
            value.clone(),
        );
        let changed = previous.map(|t| t.descriptor()) != value.as_ref().map(|t| t.descriptor());
        if let Some(view_model_type) = value.filter(|_| changed) {
            resolver.auto_wire(view, Some(&view_model_type))?;
        }
        Ok(())
    }
}
