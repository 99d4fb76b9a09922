//! Views, their type descriptors and the optional navigation lifecycle hooks.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::host::NavigationHost;
use super::parameters::ParameterBag;

/// Shared handle to a live view, as stored in the host navigation stack
pub type ViewRef = Arc<dyn View>;

/// Object attached to a view as its binding context (usually a view model)
pub type BindingContext = Arc<dyn Any + Send + Sync>;

/// Runtime descriptor of a Rust type: its `TypeId`, bare name and module path.
///
/// `TypeDescriptor::of::<app::pages::MainPage>()` has name `MainPage` and
/// namespace `app::pages`. Equality and hashing only consider the `TypeId`.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    namespace: &'static str,
}

impl TypeDescriptor {
    pub fn of<T: Any + ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        // Generic arguments are not part of the bare name
        let base = full.split('<').next().unwrap_or(full);
        let (namespace, name) = match base.rsplit_once("::") {
            Some((namespace, name)) => (namespace, name),
            None => ("", base),
        };

        Self {
            id: TypeId::of::<T>(),
            name,
            namespace,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Bare type name, e.g. `MainPage`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Module path, e.g. `app::pages`
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// `namespace::name`, or just the name for types at the crate root
    pub fn full_name(&self) -> String {
        qualify(self.namespace, self.name)
    }
}

pub(crate) fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", namespace, name)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Lifecycle hooks for views that want to know when they become visible or hidden
pub trait NavigationAware {
    /// Called after the view became the top of the stack
    fn on_navigated_to(&self, parameters: &ParameterBag);

    /// Called before the view stops being the top of the stack
    fn on_navigated_from(&self, parameters: &ParameterBag);
}

/// Identity of a concrete view type. Implemented for every `View`.
pub trait ViewIdentity {
    fn view_type(&self) -> TypeDescriptor;
    fn as_any(&self) -> &dyn Any;
}

impl<T: View> ViewIdentity for T {
    fn view_type(&self) -> TypeDescriptor {
        TypeDescriptor::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A unit of UI content that can occupy a position in a navigation stack.
///
/// Every capability is optional: the defaults describe a view that is not
/// navigation aware, cannot hold a binding context and owns no local stack.
pub trait View: ViewIdentity + Send + Sync + 'static {
    /// The navigation hooks of this view, if it implements them
    fn navigation_aware(&self) -> Option<&dyn NavigationAware> {
        None
    }

    /// Attach a binding context. Returns false if the view cannot hold one.
    fn set_binding_context(&self, _context: BindingContext) -> bool {
        false
    }

    /// The view's own navigation stack, if it is hosted in one
    fn navigation_host(&self) -> Option<Arc<dyn NavigationHost>> {
        None
    }
}

impl fmt::Debug for dyn View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "View({})", self.view_type().full_name())
    }
}

/// Forward a host "appearing" event as `on_navigated_to` with empty parameters
pub fn appearing(view: &dyn View) {
    if let Some(aware) = view.navigation_aware() {
        log::debug!("{} appearing", view.view_type());
        aware.on_navigated_to(&ParameterBag::new());
    }
}

/// Forward a host "disappearing" event as `on_navigated_from` with empty parameters
pub fn disappearing(view: &dyn View) {
    if let Some(aware) = view.navigation_aware() {
        log::debug!("{} disappearing", view.view_type());
        aware.on_navigated_from(&ParameterBag::new());
    }
}
