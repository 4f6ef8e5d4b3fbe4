pub mod error;
pub mod rpc;

pub use error::{BoxError, ClientError};
pub use rpc::{
    ClientConfig, HttpResponse, HttpTransport, RpcClient, Transport, TransportConfig, DEFAULT_URL,
};
