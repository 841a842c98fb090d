//! solace-core
//!
//! Pure domain types, user identity, and document key conventions.
//! No storage or HTTP dependency; everything else in Solace builds on these.

pub mod error;
pub mod keys;
pub mod models;
pub mod user;
