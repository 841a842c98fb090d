//! solace-storage
//!
//! Document storage. A small [`store::DocumentStore`] trait with an S3
//! backend for deployments and an in-memory backend for tests and local
//! runs, plus JSON helpers with ETag optimistic locking.

pub mod error;
pub mod memory;
pub mod s3;
pub mod state;
pub mod store;

pub use memory::MemoryStore;
pub use s3::S3Store;
pub use store::{DocumentStore, StoredObject};
