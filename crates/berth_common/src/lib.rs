// --- File: crates/berth_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error handling
pub mod features; // Feature flag handling
pub mod logging;  // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error,
    conflict,
    database_error,
    internal_error,
    not_found,
    BerthError,
    HttpStatusCode,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};

// Re-export the service abstraction primitives for easier access
pub use services::{BoxFuture, BoxedError};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

// This crate provides common functionality that can be used across the workspace.
// It includes shared error handling, logging, feature flags, and the service
// abstraction primitives used at dependency-injection seams.
