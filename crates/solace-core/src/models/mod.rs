pub mod journal;
pub mod message;
pub mod question;
pub mod session;
pub mod summary;
