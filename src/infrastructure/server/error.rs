use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Parse a configured `host:port` listen address.
pub fn parse_addr(addr: &str) -> Result<SocketAddr, ServerError> {
    addr.parse().map_err(|source| ServerError::InvalidAddress {
        addr: addr.to_string(),
        source,
    })
}
