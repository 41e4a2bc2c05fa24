pub mod cli;
pub mod error;
pub mod protocol;
pub mod session;

pub use cli::{MenuChoice, Prompt};
pub use error::{ClientError, Reply, Result, ServerError};
pub use protocol::{ClusterClient, DbClustering};
pub use session::{Session, SessionError};
