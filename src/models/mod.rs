//! Domain models shared by the stream core and its consumers.

mod message;
mod request;

pub use message::*;
pub use request::{ColumnSchema, DatasetInfo, DatasetsResponse, SessionId, StreamRequest};
