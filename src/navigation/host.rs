//! The host UI framework's page stack, seen through the primitives navigation needs.

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;

use super::view::ViewRef;

/// Page stack owned by the surrounding UI framework.
///
/// Index 0 of [`NavigationHost::navigation_stack`] is the root, the last entry
/// is the visible page. The mutation primitives complete once the stack has
/// been updated.
#[async_trait]
pub trait NavigationHost: Send + Sync {
    /// Snapshot of the live views, root first
    fn navigation_stack(&self) -> Vec<ViewRef>;

    /// Insert `view` on top of the stack
    async fn push(&self, view: ViewRef) -> Result<()>;

    /// Remove the top view. Popping an empty stack is a no-op returning `None`.
    async fn pop(&self, animated: bool) -> Result<Option<ViewRef>>;

    /// Remove every view except the root
    async fn pop_to_root(&self) -> Result<()>;
}

/// A primitive invoked on a [`MemoryHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Push(String),
    Pop { animated: bool },
    PopToRoot,
}

/// In-process navigation stack that records every primitive call.
#[derive(Default)]
pub struct MemoryHost {
    stack: Mutex<Vec<ViewRef>>,
    calls: Mutex<Vec<HostCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose stack starts with `root`. The seeding is not recorded as a call.
    pub fn with_root(root: ViewRef) -> Self {
        let host = Self::new();
        lock(&host.stack).push(root);
        host
    }

    pub fn depth(&self) -> usize {
        lock(&self.stack).len()
    }

    /// Bare type names of the stack, root first
    pub fn page_names(&self) -> Vec<&'static str> {
        lock(&self.stack)
            .iter()
            .map(|view| view.view_type().name())
            .collect()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        lock(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn record(&self, call: HostCall) {
        log::debug!("Host call: {:?}", call);
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl NavigationHost for MemoryHost {
    fn navigation_stack(&self) -> Vec<ViewRef> {
        lock(&self.stack).clone()
    }

    async fn push(&self, view: ViewRef) -> Result<()> {
        self.record(HostCall::Push(view.view_type().name().to_string()));
        tokio::task::yield_now().await;
        lock(&self.stack).push(view);
        Ok(())
    }

    async fn pop(&self, animated: bool) -> Result<Option<ViewRef>> {
        self.record(HostCall::Pop { animated });
        tokio::task::yield_now().await;
        Ok(lock(&self.stack).pop())
    }

    async fn pop_to_root(&self) -> Result<()> {
        self.record(HostCall::PopToRoot);
        tokio::task::yield_now().await;
        lock(&self.stack).truncate(1);
        Ok(())
    }
}
