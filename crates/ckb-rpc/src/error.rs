use serde_json::Value;

/// Error currency of [`crate::rpc::Transport`] implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Malformed endpoint or transport settings at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No usable response was obtained from the node.
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// A response arrived but is not a JSON-RPC envelope.
    #[error("malformed response: {0}")]
    Protocol(String),

    /// The node answered with a non-null `error` member, kept verbatim.
    #[error("jsonrpc error: {0}")]
    Rpc(Value),
}

impl ClientError {
    /// Raw `error` payload returned by the node, if this is an RPC failure.
    pub fn rpc_payload(&self) -> Option<&Value> {
        match self {
            Self::Rpc(payload) => Some(payload),
            _ => None,
        }
    }

    /// Numeric `code` member of the RPC error payload, when the node sent one.
    pub fn rpc_code(&self) -> Option<i64> {
        self.rpc_payload()?.get("code")?.as_i64()
    }
}
