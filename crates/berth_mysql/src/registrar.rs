//! Namespace attachment with collision detection.
//!
//! One [`MySqlNamespace`] decoration per host scope chain holds either the
//! default slot (the client itself) or a map of named clients; the two shapes
//! are never mixed. Collision checks walk the host's scope inheritance chain,
//! so sibling scopes register independently while a child collides with its
//! ancestors' attachment. A named registration that finds an inherited map
//! inserts into that shared map, as the namespace lives as long as the host.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use berth_host::Host;
use tracing::debug;

use crate::client::MySqlClient;
use crate::error::RegistrationError;

/// The decoration holding this plugin's clients on a host scope.
pub struct MySqlNamespace {
    slot: RwLock<NamespaceSlot>,
}

enum NamespaceSlot {
    /// The default slot: holds the client itself, not a mapping
    Default(Arc<MySqlClient>),
    /// Named registrations: a map from instance name to client
    Named(HashMap<String, Arc<MySqlClient>>),
}

pub(crate) fn attach(
    host: &Host,
    client: Arc<MySqlClient>,
    name: Option<&str>,
) -> Result<(), RegistrationError> {
    match name {
        None => {
            if host.decoration::<MySqlNamespace>().is_some() {
                return Err(RegistrationError::AlreadyRegistered);
            }
            host.decorate(MySqlNamespace {
                slot: RwLock::new(NamespaceSlot::Default(client)),
            })
            .map_err(|_| RegistrationError::AlreadyRegistered)?;
            debug!("attached to the default namespace slot");
            Ok(())
        }
        Some(name) => match host.decoration::<MySqlNamespace>() {
            None => {
                let mut named = HashMap::new();
                named.insert(name.to_string(), client);
                host.decorate(MySqlNamespace {
                    slot: RwLock::new(NamespaceSlot::Named(named)),
                })
                .map_err(|_| RegistrationError::NameAlreadyRegistered(name.to_string()))?;
                debug!(name, "attached to a fresh named namespace slot");
                Ok(())
            }
            Some(namespace) => {
                let mut slot = namespace.slot.write().expect("namespace lock poisoned");
                match &mut *slot {
                    NamespaceSlot::Default(_) => Err(RegistrationError::AlreadyRegistered),
                    NamespaceSlot::Named(named) => {
                        if named.contains_key(name) {
                            return Err(RegistrationError::NameAlreadyRegistered(
                                name.to_string(),
                            ));
                        }
                        named.insert(name.to_string(), client);
                        debug!(name, "attached to the named namespace slot");
                        Ok(())
                    }
                }
            }
        },
    }
}

/// Resolve the default-slot client visible from this scope.
pub fn mysql(host: &Host) -> Option<Arc<MySqlClient>> {
    let namespace = host.decoration::<MySqlNamespace>()?;
    let slot = namespace.slot.read().expect("namespace lock poisoned");
    match &*slot {
        NamespaceSlot::Default(client) => Some(client.clone()),
        NamespaceSlot::Named(_) => None,
    }
}

/// Resolve a named client visible from this scope.
pub fn mysql_named(host: &Host, name: &str) -> Option<Arc<MySqlClient>> {
    let namespace = host.decoration::<MySqlNamespace>()?;
    let slot = namespace.slot.read().expect("namespace lock poisoned");
    match &*slot {
        NamespaceSlot::Default(_) => None,
        NamespaceSlot::Named(named) => named.get(name).cloned(),
    }
}
