pub mod dashboard;
pub mod health;
pub mod instruments;
pub mod journal;
pub mod messages;
pub mod sessions;
