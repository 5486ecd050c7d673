//! Plugin host for the Berth workspace.
//!
//! A [`Host`] is the instance plugins attach to. It provides:
//!
//! - hierarchical, encapsulated scopes: decoration lookups walk from a scope
//!   up to the root, writes land in the owning scope only, so sibling scopes
//!   never see each other's attachments
//! - a typed shared attribute space (decorations) keyed by type
//! - a queued plugin boot sequence: [`Host::register`] enqueues a boot step,
//!   [`Host::ready`] drains the queue in registration order and fails fast
//! - close hooks drained in reverse registration order at [`Host::close`],
//!   with hook failures collected instead of aborting the drain
//!
//! # Example
//!
//! ```rust,no_run
//! use berth_host::Host;
//!
//! async fn boot() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = Host::new();
//!     host.register("noop", |_host| async { Ok::<(), std::io::Error>(()) });
//!     host.ready().await?;
//!     host.close().await;
//!     Ok(())
//! }
//! ```

pub mod boot;
pub mod error;
pub mod lifecycle;
pub mod scope;

pub use error::{BootError, HostError, TeardownError};
pub use scope::Host;
