//! HIE registry - Health Information Exchange client and practitioner
//! license evaluation for hospital information systems.
//!
//! # Features
//!
//! - `client` - Async HIE API client (reqwest). Enabled by default.
//! - `cli` - The `hie_client` command-line tool. Enabled by default.
//!
//! Without `client`, the crate is a pure library: license evaluation, tag
//! classification, banner models and request building.
//!
//! # Example
//!
//! ```toml
//! # Everything
//! hie-registry = { git = "https://github.com/AMPATH/hie-registry" }
//!
//! # Evaluation and models only (no HTTP stack)
//! hie-registry = { git = "https://github.com/AMPATH/hie-registry", default-features = false }
//! ```

// Core modules (always available)
pub mod banner;
pub mod config;
pub mod dates;
pub mod errors;
pub mod license;
pub mod logging;
pub mod registry;
pub mod session;
pub mod tags;
pub mod validation;

pub mod types {
    pub mod eligibility;
    pub mod facility;
    pub mod otp;
    pub mod practitioner;
}

// HTTP client (requires "client" feature)
#[cfg(feature = "client")]
pub mod client;
