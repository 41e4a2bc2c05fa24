//! Client side of the clustering server protocol.
//!
//! One TCP connection carries one session. The client writes a request, then
//! blocks until the matching response has been read in full; requests are
//! never pipelined, and nothing on the stream marks where a message starts,
//! so both ends have to agree on every value in order.
//!
//! # Key Components
//!
//! - [`Value`]: a single typed unit on the wire.
//! - [`ProtocolTransport`]: ordered value channel over any `Read + Write` stream.
//! - [`Request`] / [`Operation`]: what the client can ask for.
//! - [`read_reply`]: status token handling and payload decoding.
//! - [`ClusterClient`]: one method per server operation.
//!
//! # Binary Format
//!
//! Values are encoded with `bincode`, big-endian with fixed-width integers:
//!
//! - a `u32` tag: `0` integer, `1` floating point, `2` text;
//! - integer body: `i32`, floating point body: `f64`;
//! - text body: `u64` byte length followed by UTF-8 bytes.
//!
//! A request is the operation code as an integer followed by its single
//! argument:
//!
//! | code | operation | argument | payload after `OK` |
//! |---|---|---|---|
//! | 0 | load table from db | table name | none |
//! | 1 | cluster db table | radius | cluster count, cluster set |
//! | 2 | store cluster to file | file name | none |
//! | 3 | cluster from file | file name | cluster set |
//!
//! Every response opens with the text `OK` or `KO`. `KO` is followed by one
//! text value, the server's message, and nothing else.
mod client;
mod request;
mod response;
mod transport;
mod value;

pub use client::{ClusterClient, SessionState};
pub use request::{Operation, Request};
pub use response::{DbClustering, ReplyPayload, STATUS_KO, STATUS_OK, Status, read_reply};
pub use transport::{ConnectionError, ProtocolTransport, TransportError};
pub use value::{Value, ValueKind};

#[cfg(test)]
pub(crate) use client::tests::ScriptedStream;
