use super::value::Value;

/// Operation codes understood by the clustering server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadTableFromDb = 0,
    ClusterFromDbTable = 1,
    StoreClusterToFile = 2,
    ClusterFromFile = 3,
}

impl Operation {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// A request together with its operation-specific arguments.
///
/// Arguments are passed through as given; checks such as a positive radius
/// belong to whoever builds the request.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadTableFromDb { table: String },
    ClusterFromDbTable { radius: f64 },
    StoreClusterToFile { file: String },
    ClusterFromFile { file: String },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::LoadTableFromDb { .. } => Operation::LoadTableFromDb,
            Request::ClusterFromDbTable { .. } => Operation::ClusterFromDbTable,
            Request::StoreClusterToFile { .. } => Operation::StoreClusterToFile,
            Request::ClusterFromFile { .. } => Operation::ClusterFromFile,
        }
    }

    /// Values to send, in wire order: the operation code first.
    pub fn values(&self) -> Vec<Value> {
        let argument = match self {
            Request::LoadTableFromDb { table } => Value::from(table.as_str()),
            Request::ClusterFromDbTable { radius } => Value::Float(*radius),
            Request::StoreClusterToFile { file } | Request::ClusterFromFile { file } => {
                Value::from(file.as_str())
            }
        };
        vec![Value::Int(self.operation().code()), argument]
    }
}
