//! HIE API client.
//!
//! - `hie`    → [`HieClient`], one method per HIE endpoint
//! - `errors` → error-body parsing for non-success responses

pub mod errors;
pub mod hie;

pub use hie::HieClient;
