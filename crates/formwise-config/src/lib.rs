// crates/formwise-config/src/lib.rs
// ============================================================================
// Module: Formwise Config Library
// Description: Client configuration model, loading guards, and validation.
// Purpose: Provide fail-closed configuration for the form wizard client.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration for the Formwise client: the form server endpoint, request
//! timeouts, and upload bounds. Loading is fail-closed: a missing file yields
//! built-in defaults, but an unreadable, oversized, or invalid file is an
//! error, never a silent fallback.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::FORMWISE_CONFIG_ENV;
pub use config::FormwiseConfig;
pub use config::ServerConfig;
pub use config::UploadConfig;
