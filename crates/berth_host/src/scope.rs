//! Host scopes and the typed decoration space.
//!
//! A `Host` value is a cheap clone of a scope handle. All scopes created from
//! one root share the boot queue and the close-hook list; each scope owns its
//! decoration map. Lookups walk from the scope to the root, so a child sees
//! its ancestors' decorations while siblings stay isolated from each other.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

use crate::boot::BootStep;
use crate::error::HostError;
use crate::lifecycle::CloseHook;

/// The plugin host instance.
///
/// Cloning a `Host` yields another handle to the same scope.
#[derive(Clone)]
pub struct Host {
    pub(crate) scope: Arc<Scope>,
}

pub(crate) struct Scope {
    pub(crate) parent: Option<Arc<Scope>>,
    pub(crate) decorations: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    pub(crate) shared: Arc<Shared>,
}

/// State shared by every scope of one host tree.
pub(crate) struct Shared {
    pub(crate) boot_queue: Mutex<Vec<BootStep>>,
    pub(crate) close_hooks: Mutex<Vec<CloseHook>>,
    pub(crate) closed: AtomicBool,
}

impl Host {
    /// Create a new root host.
    pub fn new() -> Self {
        Host {
            scope: Arc::new(Scope {
                parent: None,
                decorations: RwLock::new(HashMap::new()),
                shared: Arc::new(Shared {
                    boot_queue: Mutex::new(Vec::new()),
                    close_hooks: Mutex::new(Vec::new()),
                    closed: AtomicBool::new(false),
                }),
            }),
        }
    }

    /// Create an encapsulated child scope.
    ///
    /// The child sees this scope's decorations; decorations added to the
    /// child stay invisible to this scope and to the child's siblings.
    pub fn scope(&self) -> Host {
        Host {
            scope: Arc::new(Scope {
                parent: Some(self.scope.clone()),
                decorations: RwLock::new(HashMap::new()),
                shared: self.scope.shared.clone(),
            }),
        }
    }

    /// Attach a typed decoration to this scope.
    ///
    /// # Errors
    ///
    /// Fails with [`HostError::DecorationExists`] if a decoration of the same
    /// type is already visible anywhere in this scope's inheritance chain.
    pub fn decorate<T: Send + Sync + 'static>(&self, value: T) -> Result<(), HostError> {
        if self.decoration::<T>().is_some() {
            return Err(HostError::DecorationExists(type_name::<T>()));
        }
        self.scope
            .decorations
            .write()
            .expect("decoration lock poisoned")
            .insert(TypeId::of::<T>(), Arc::new(value));
        Ok(())
    }

    /// Look up a typed decoration, walking from this scope to the root.
    pub fn decoration<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let mut current = Some(&self.scope);
        while let Some(scope) = current {
            let found = scope
                .decorations
                .read()
                .expect("decoration lock poisoned")
                .get(&TypeId::of::<T>())
                .cloned();
            if let Some(value) = found {
                // The map only ever holds values inserted under their own TypeId.
                return value.downcast::<T>().ok();
            }
            current = scope.parent.as_ref();
        }
        None
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("root", &self.scope.parent.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    #[test]
    fn decoration_round_trips() {
        let host = Host::new();
        host.decorate(Marker(7)).unwrap();
        assert_eq!(host.decoration::<Marker>().unwrap().0, 7);
    }

    #[test]
    fn duplicate_decoration_is_rejected() {
        let host = Host::new();
        host.decorate(Marker(1)).unwrap();
        let err = host.decorate(Marker(2)).unwrap_err();
        assert!(matches!(err, HostError::DecorationExists(_)));
        // The original value survives.
        assert_eq!(host.decoration::<Marker>().unwrap().0, 1);
    }

    #[test]
    fn children_inherit_and_siblings_do_not() {
        let host = Host::new();
        host.decorate(Marker(1)).unwrap();

        let child = host.scope();
        assert_eq!(child.decoration::<Marker>().unwrap().0, 1);

        #[derive(Debug)]
        struct Own(&'static str);
        let a = host.scope();
        let b = host.scope();
        a.decorate(Own("a")).unwrap();
        assert!(b.decoration::<Own>().is_none());
        assert!(host.decoration::<Own>().is_none());
        assert_eq!(a.decoration::<Own>().unwrap().0, "a");
    }

    #[test]
    fn child_cannot_shadow_an_inherited_decoration() {
        let host = Host::new();
        host.decorate(Marker(1)).unwrap();
        let child = host.scope();
        assert!(child.decorate(Marker(2)).is_err());
    }
}
