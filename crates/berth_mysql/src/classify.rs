//! Capability classification.
//!
//! Four pure predicates distinguish the four client shapes. They read the
//! kind and flavor tags recorded at construction time; no structural probing
//! of driver internals is involved.

use crate::client::MySqlClient;
use crate::options::{ClientKind, Flavor};

/// A pool client with the completion-callback presentation.
pub fn is_callback_pool(client: &MySqlClient) -> bool {
    client.kind() == ClientKind::Pool && client.flavor() == Flavor::Callback
}

/// A pool client with the deferred-result presentation.
pub fn is_deferred_pool(client: &MySqlClient) -> bool {
    client.kind() == ClientKind::Pool && client.flavor() == Flavor::Deferred
}

/// A single-connection client with the completion-callback presentation.
pub fn is_callback_connection(client: &MySqlClient) -> bool {
    client.kind() == ClientKind::Connection && client.flavor() == Flavor::Callback
}

/// A single-connection client with the deferred-result presentation.
pub fn is_deferred_connection(client: &MySqlClient) -> bool {
    client.kind() == ClientKind::Connection && client.flavor() == Flavor::Deferred
}
