use std::{
    io::{Read, Write},
    net::TcpStream,
};

use log::{debug, info, warn};

use crate::error::{ClientError, Reply, Result};

use super::{
    ProtocolTransport, Request,
    response::{DbClustering, ReplyPayload, read_reply},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    /// Terminal. Entered on a fatal error or an explicit shutdown.
    Closed,
}

/// Client side of one session with the clustering server.
///
/// Each operation writes its whole request and then blocks until the whole
/// response is decoded; `&mut self` keeps a second request from starting in
/// between. The server keeps the loaded table and the last cluster set
/// between calls, and the order in which operations make sense is its
/// business: calling [`ClusterClient::store_cluster_to_file`] before any
/// clustering simply comes back as a refusal.
pub struct ClusterClient<T: Read + Write> {
    transport: ProtocolTransport<T>,
    state: SessionState,
}

impl ClusterClient<TcpStream> {
    pub fn connect(address: &str, port: u16) -> Result<Self> {
        let transport = ProtocolTransport::open(address, port)?;
        Ok(Self::new(transport))
    }

    /// Close the socket and the session. Later operations fail with
    /// [`ClientError::Closed`].
    pub fn shutdown(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.state = SessionState::Closed;
        info!("closing session");
        self.transport.shutdown()?;
        Ok(())
    }
}

impl<T: Read + Write> ClusterClient<T> {
    pub fn new(transport: ProtocolTransport<T>) -> Self {
        Self {
            transport,
            state: SessionState::Connected,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ask the server to load `table` from its database.
    pub fn load_table_from_db(&mut self, table: &str) -> Result<Reply<()>> {
        self.call(Request::LoadTableFromDb {
            table: table.to_string(),
        })
    }

    /// Cluster the loaded table with the given radius. The radius must
    /// already be known to be positive.
    pub fn cluster_from_db_table(&mut self, radius: f64) -> Result<Reply<DbClustering>> {
        self.call(Request::ClusterFromDbTable { radius })
    }

    /// Save the last computed cluster set server-side under `file`.
    pub fn store_cluster_to_file(&mut self, file: &str) -> Result<Reply<()>> {
        self.call(Request::StoreClusterToFile {
            file: file.to_string(),
        })
    }

    /// Load a previously stored cluster set. Unlike the database path the
    /// server sends no cluster count here.
    pub fn cluster_from_file(&mut self, file: &str) -> Result<Reply<String>> {
        self.call(Request::ClusterFromFile {
            file: file.to_string(),
        })
    }

    /// One request/response round trip.
    pub fn call<P: ReplyPayload>(&mut self, request: Request) -> Result<Reply<P>> {
        if self.state == SessionState::Closed {
            return Err(ClientError::Closed);
        }

        let res = self.exchange(&request);
        if let Err(e) = &res {
            warn!("session closed after {:?} failed: {e}", request.operation());
            self.state = SessionState::Closed;
        }
        res
    }

    fn exchange<P: ReplyPayload>(&mut self, request: &Request) -> Result<Reply<P>> {
        debug!("sending {request:?}");
        for value in request.values() {
            self.transport.write_value(&value)?;
        }
        self.transport.flush()?;

        read_reply(&mut self.transport)
    }

    pub fn into_transport(self) -> ProtocolTransport<T> {
        self.transport
    }
}
