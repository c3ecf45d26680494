use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Failures of the REST listener itself; request-level errors are `ApiError`s.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot bind REST listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("REST server stopped: {0}")]
    Serve(#[source] io::Error),
}
