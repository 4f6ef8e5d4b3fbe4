use std::fmt;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Url;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, trace};

use crate::error::ClientError;

use super::connection::{parse_endpoint, DEFAULT_URL};
use super::protocol::{decode_response, JsonRpcRequest};
use super::{ClientConfig, HttpTransport, Transport};

/// JSON-RPC client for a CKB full node.
///
/// Every typed method is a pass-through over [`RpcClient::call`]: a fixed
/// method name, positional params, and the node's `result` returned as an
/// untyped [`Value`]. Payload shapes (blocks, transactions, cells) are
/// left to the caller.
///
/// The genesis block and its hash are fetched at most once per client.
/// Genesis is immutable, so the cached values are never invalidated.
///
/// `Debug`/`Display` show the endpoint exactly as given, while [`RpcClient::uri`]
/// returns the parsed, normalised form (`http://localhost:8114/`).
pub struct RpcClient<T = HttpTransport> {
    endpoint: String,
    url: Url,
    transport: T,
    genesis_block: OnceCell<Value>,
    genesis_block_hash: OnceCell<Value>,
}

impl RpcClient<HttpTransport> {
    /// Create a client for `url`, or for [`DEFAULT_URL`] when `None`.
    pub fn new(url: Option<&str>) -> Result<Self, ClientError> {
        Self::with_transport(url, HttpTransport::new()?)
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::from_config(&config.transport)?;
        Self::with_transport(config.url.as_deref(), transport)
    }
}

impl<T: Transport> RpcClient<T> {
    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(url: Option<&str>, transport: T) -> Result<Self, ClientError> {
        let endpoint = url.unwrap_or(DEFAULT_URL);
        let url = parse_endpoint(endpoint)?;
        Ok(Self {
            endpoint: endpoint.to_owned(),
            url,
            transport,
            genesis_block: OnceCell::new(),
            genesis_block_hash: OnceCell::new(),
        })
    }

    pub fn uri(&self) -> &Url {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one JSON-RPC round trip and return the `result` member.
    ///
    /// `params: None` is sent as `"params": null`. Nothing is retried.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Vec<Value>>,
    ) -> Result<Value, ClientError> {
        debug!(
            rpc.method = method,
            rpc.params = params.as_ref().map_or(0, Vec::len),
            "rpc call"
        );
        let req = JsonRpcRequest::new(method, params);
        let body = serde_json::to_vec(&req)
            .map_err(|e| ClientError::Protocol(format!("encode JSON-RPC request: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let response = self
            .transport
            .post(&self.url, headers, body)
            .await
            .map_err(ClientError::Transport)?;
        debug!(
            rpc.method = method,
            status = %response.status,
            body_len = response.body.len(),
            "rpc response"
        );
        trace!(
            rpc.method = method,
            body = %String::from_utf8_lossy(&response.body),
            "rpc response body"
        );

        decode_response(response.status, &response.body)
    }

    // ==========================================================================
    // Chain
    // ==========================================================================

    pub async fn get_block_hash(
        &self,
        block_number: impl Into<Value>,
    ) -> Result<Value, ClientError> {
        self.call("get_block_hash", Some(vec![block_number.into()])).await
    }

    pub async fn get_block(&self, block_hash: impl Into<Value>) -> Result<Value, ClientError> {
        self.call("get_block", Some(vec![block_hash.into()])).await
    }

    /// The number is sent in its string form (`5` becomes `"5"`).
    pub async fn get_block_by_number(
        &self,
        block_number: impl fmt::Display,
    ) -> Result<Value, ClientError> {
        self.call(
            "get_block_by_number",
            Some(vec![Value::String(block_number.to_string())]),
        )
        .await
    }

    pub async fn get_tip_header(&self) -> Result<Value, ClientError> {
        self.call("get_tip_header", None).await
    }

    pub async fn get_tip_block_number(&self) -> Result<Value, ClientError> {
        self.call("get_tip_block_number", None).await
    }

    pub async fn get_cells_by_lock_hash(
        &self,
        hash: impl Into<Value>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Result<Value, ClientError> {
        self.call(
            "get_cells_by_lock_hash",
            Some(vec![hash.into(), from.into(), to.into()]),
        )
        .await
    }

    pub async fn get_current_epoch(&self) -> Result<Value, ClientError> {
        self.call("get_current_epoch", None).await
    }

    /// The number is sent in its string form, like [`Self::get_block_by_number`].
    pub async fn get_epoch_by_number(
        &self,
        number: impl fmt::Display,
    ) -> Result<Value, ClientError> {
        self.call(
            "get_epoch_by_number",
            Some(vec![Value::String(number.to_string())]),
        )
        .await
    }

    // ==========================================================================
    // Transactions and cells
    // ==========================================================================

    pub async fn get_transaction(&self, tx_hash: impl Into<Value>) -> Result<Value, ClientError> {
        self.call("get_transaction", Some(vec![tx_hash.into()])).await
    }

    pub async fn get_live_cell(&self, out_point: impl Into<Value>) -> Result<Value, ClientError> {
        self.call("get_live_cell", Some(vec![out_point.into()])).await
    }

    pub async fn send_transaction(
        &self,
        transaction: impl Into<Value>,
    ) -> Result<Value, ClientError> {
        self.call("send_transaction", Some(vec![transaction.into()])).await
    }

    pub async fn trace_transaction(
        &self,
        transaction: impl Into<Value>,
    ) -> Result<Value, ClientError> {
        self.call("trace_transaction", Some(vec![transaction.into()])).await
    }

    pub async fn get_transaction_trace(
        &self,
        hash: impl Into<Value>,
    ) -> Result<Value, ClientError> {
        self.call("get_transaction_trace", Some(vec![hash.into()])).await
    }

    // ==========================================================================
    // Node and pool
    // ==========================================================================

    pub async fn local_node_info(&self) -> Result<Value, ClientError> {
        self.call("local_node_info", None).await
    }

    /// Array of peer records.
    pub async fn get_peers(&self) -> Result<Value, ClientError> {
        self.call("get_peers", None).await
    }

    /// Mempool summary record.
    pub async fn tx_pool_info(&self) -> Result<Value, ClientError> {
        self.call("tx_pool_info", None).await
    }

    // ==========================================================================
    // Genesis
    // ==========================================================================

    /// Block 0, fetched on first use and cached for the client's lifetime.
    ///
    /// A failed fetch is not cached; the next call goes to the node again.
    pub async fn genesis_block(&self) -> Result<&Value, ClientError> {
        self.genesis_block
            .get_or_try_init(|| async {
                let block = self.get_block_by_number(0).await?;
                debug!("cached genesis block");
                Ok::<_, ClientError>(block)
            })
            .await
    }

    /// Hash of block 0, fetched on first use and cached like [`Self::genesis_block`].
    pub async fn genesis_block_hash(&self) -> Result<&Value, ClientError> {
        self.genesis_block_hash
            .get_or_try_init(|| async {
                let hash = self.get_block_hash("0").await?;
                debug!(hash = %hash, "cached genesis block hash");
                Ok::<_, ClientError>(hash)
            })
            .await
    }
}

impl<T> fmt::Debug for RpcClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RpcClient@{}", self.endpoint)
    }
}

impl<T> fmt::Display for RpcClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RpcClient@{}", self.endpoint)
    }
}
