use std::io::{Read, Write};

use log::{debug, warn};

use crate::error::{ClientError, Reply, Result, ServerError};

use super::{ProtocolTransport, TransportError};

pub const STATUS_OK: &str = "OK";
pub const STATUS_KO: &str = "KO";

/// Token opening every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Ko,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => STATUS_OK,
            Status::Ko => STATUS_KO,
        }
    }
}

impl TryFrom<&str> for Status {
    type Error = ClientError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            STATUS_OK => Ok(Status::Ok),
            STATUS_KO => Ok(Status::Ko),
            other => Err(ClientError::Framing(other.to_string())),
        }
    }
}

/// Result of clustering the table previously loaded from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbClustering {
    pub count: i32,
    pub clusters: String,
}

/// Values following an `OK` status, read in their fixed order.
pub trait ReplyPayload: Sized {
    fn read_from<T: Read + Write>(
        transport: &mut ProtocolTransport<T>,
    ) -> std::result::Result<Self, TransportError>;
}

impl ReplyPayload for () {
    fn read_from<T: Read + Write>(
        _: &mut ProtocolTransport<T>,
    ) -> std::result::Result<Self, TransportError> {
        Ok(())
    }
}

/// A bare cluster set description.
impl ReplyPayload for String {
    fn read_from<T: Read + Write>(
        transport: &mut ProtocolTransport<T>,
    ) -> std::result::Result<Self, TransportError> {
        transport.read_text()
    }
}

impl ReplyPayload for DbClustering {
    fn read_from<T: Read + Write>(
        transport: &mut ProtocolTransport<T>,
    ) -> std::result::Result<Self, TransportError> {
        let count = transport.read_int()?;
        let clusters = transport.read_text()?;
        Ok(Self { count, clusters })
    }
}

/// Read one full response: the status token, then either the payload or the
/// refusal message. Nothing past the response is consumed.
pub fn read_reply<P, T>(transport: &mut ProtocolTransport<T>) -> Result<Reply<P>>
where
    P: ReplyPayload,
    T: Read + Write,
{
    let token = transport.read_text()?;
    let status = Status::try_from(token.as_str())?;
    debug!("received status {}", status.as_str());

    match status {
        Status::Ok => Ok(Ok(P::read_from(transport)?)),
        Status::Ko => {
            let message = transport.read_text()?;
            warn!("server refused request: {message}");
            Ok(Err(ServerError { message }))
        }
    }
}
