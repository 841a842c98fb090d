//! solace-sessions
//!
//! The session lifecycle: question store, state machine, and the controller
//! that ties score updates, manual end, and resume to persisted session
//! documents. Also stores the chat messages exchanged within a session.

pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod messages;
pub mod naming;
pub mod questions;

pub use controller::SessionService;
pub use error::SessionError;
