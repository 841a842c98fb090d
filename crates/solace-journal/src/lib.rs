//! solace-journal
//!
//! Mood journal entries and the dashboard built from them.

pub mod dashboard;
pub mod error;
pub mod mood;
pub mod service;

pub use error::JournalError;
pub use service::{JournalFilter, JournalService};
