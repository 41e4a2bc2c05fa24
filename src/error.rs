//! Errors surfaced by the clustering client.
//!
//! Failures come in two flavours. [`ClientError`] covers everything that ends
//! the session: the connection could not be made, the stream broke, or the
//! server answered with something outside the protocol. [`ServerError`] is the
//! server politely refusing a well-formed request; the connection stays usable
//! and the caller may try again.
//!
//! Client operations return `Result<Reply<T>, ClientError>`, so `?` only
//! propagates the fatal kind and a refusal is an ordinary `Err` branch of the
//! inner [`Reply`].
use thiserror::Error;

use crate::protocol::{ConnectionError, TransportError};

/// Result for operations that may fail fatally.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Outcome of a request the server received and answered.
pub type Reply<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("protocol violation, unknown status token '{0}'")]
    Framing(String),

    #[error("session is closed")]
    Closed,
}

/// The server declined the request. Carries the server's own message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServerError {
    pub message: String,
}

impl ServerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
