use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use solace_storage::{DocumentStore, MemoryStore, S3Store};

const DEFAULT_BUCKET: &str = "solace";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Where session and journal documents live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    S3,
    /// In-process only; everything is lost on restart.
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::S3 => f.write_str("s3"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(StoreBackend::S3),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(eyre::eyre!("unknown store backend {other:?}, expected s3 or memory")),
        }
    }
}

/// Service settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub store: StoreBackend,
    pub bucket: String,
    pub listen_addr: SocketAddr,
    /// Set when running inside the Lambda runtime.
    pub lambda_runtime: bool,
}

impl ServiceConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unset and empty variables take their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let store = match var("SOLACE_STORE") {
            Some(raw) => raw.parse()?,
            None => StoreBackend::S3,
        };
        let bucket = var("SOLACE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string());
        let listen_addr = var("SOLACE_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse()
            .map_err(|e| eyre::eyre!("invalid SOLACE_LISTEN_ADDR {listen_addr:?}: {e}"))?;

        Ok(Self {
            store,
            bucket,
            listen_addr,
            lambda_runtime: var("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }

    pub async fn build_store(&self) -> Arc<dyn DocumentStore> {
        match self.store {
            StoreBackend::S3 => Arc::new(S3Store::connect(self.bucket.clone()).await),
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store, data will not persist");
                Arc::new(MemoryStore::new())
            }
        }
    }
}
