//! Translation gateway: a small HTTP service that translates text to French
//! through an ordered chain of translation providers, falling back to the
//! original text when none of them succeeds.

pub mod config;
pub mod email;
pub mod fallback;
pub mod metrics;
pub mod providers;
pub mod server;
