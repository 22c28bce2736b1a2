//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use library_backend::domain::SpamGuardPolicy;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_dir: PathBuf,
    pub(crate) delete_policy: SpamGuardPolicy,
}

impl ServerConfig {
    /// Construct a server configuration with the default delete policy.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            data_dir: data_dir.into(),
            delete_policy: SpamGuardPolicy::default(),
        }
    }

    /// Replace the delete spam guard policy.
    #[must_use]
    pub fn with_delete_policy(mut self, policy: SpamGuardPolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the directory holding the JSON stores.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
