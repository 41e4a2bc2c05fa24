use std::{
    io::{self, Read, Write},
    net::{Shutdown, TcpStream, ToSocketAddrs},
};

use bincode::{
    config::{BigEndian, Configuration, Fixint, Limit},
    decode_from_std_read, encode_into_std_write,
};
use log::{info, trace};
use thiserror::Error;

use super::value::{Value, ValueKind};

/// Upper bound on the encoded size of a single value (16 MiB).
const MAX_VALUE_SIZE: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode value: {0}")]
    Serialize(#[from] bincode::error::EncodeError),
    #[error("failed to decode value: {0}")]
    Deserialize(#[from] bincode::error::DecodeError),
    #[error("Transport IO Error: {0}")]
    Io(#[from] io::Error),
    #[error("expected {expected} value, received {found}")]
    UnexpectedValue { expected: ValueKind, found: ValueKind },
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("cannot resolve '{address}': {source}")]
    Resolve { address: String, source: io::Error },
    #[error("'{address}' did not resolve to any socket address")]
    Unresolved { address: String },
    #[error("cannot connect to '{address}': {source}")]
    Connect { address: String, source: io::Error },
}

/// Ordered channel of [`Value`]s over a duplex byte stream.
///
/// Values are written and read one at a time in the order given; nothing is
/// queued beyond what the stream itself buffers.
pub struct ProtocolTransport<T: Read + Write> {
    stream: T,
    config: Configuration<BigEndian, Fixint, Limit<MAX_VALUE_SIZE>>,
}

impl ProtocolTransport<TcpStream> {
    /// Resolve `address` and connect to the first socket address it yields.
    pub fn open(address: &str, port: u16) -> Result<Self, ConnectionError> {
        let target = format!("{address}:{port}");
        let addr = (address, port)
            .to_socket_addrs()
            .map_err(|source| ConnectionError::Resolve {
                address: target.clone(),
                source,
            })?
            .next()
            .ok_or_else(|| ConnectionError::Unresolved {
                address: target.clone(),
            })?;
        info!("addr = {addr}");

        let stream = TcpStream::connect(addr).map_err(|source| ConnectionError::Connect {
            address: target,
            source,
        })?;
        info!("connected to {addr}");

        Ok(Self::new(stream))
    }

    pub fn shutdown(&self) -> Result<(), TransportError> {
        self.stream.shutdown(Shutdown::Both)?;
        Ok(())
    }
}

impl<T: Read + Write> ProtocolTransport<T> {
    pub fn new(stream: T) -> Self {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_fixed_int_encoding()
            .with_limit::<MAX_VALUE_SIZE>();
        Self { stream, config }
    }

    pub fn write_value(&mut self, value: &Value) -> Result<(), TransportError> {
        trace!("write {value:?}");
        encode_into_std_write(value, &mut self.stream, self.config)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), TransportError> {
        self.stream.flush()?;
        Ok(())
    }

    /// Block until one complete value has been read.
    pub fn read_value(&mut self) -> Result<Value, TransportError> {
        let value: Value = decode_from_std_read(&mut self.stream, self.config)?;
        trace!("read {value:?}");
        Ok(value)
    }

    pub fn read_int(&mut self) -> Result<i32, TransportError> {
        match self.read_value()? {
            Value::Int(i) => Ok(i),
            other => Err(unexpected(ValueKind::Int, &other)),
        }
    }

    pub fn read_text(&mut self) -> Result<String, TransportError> {
        match self.read_value()? {
            Value::Text(s) => Ok(s),
            other => Err(unexpected(ValueKind::Text, &other)),
        }
    }

    pub fn get_ref(&self) -> &T {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.stream
    }

    pub fn into_inner(self) -> T {
        self.stream
    }
}

fn unexpected(expected: ValueKind, found: &Value) -> TransportError {
    TransportError::UnexpectedValue {
        expected,
        found: found.kind(),
    }
}
