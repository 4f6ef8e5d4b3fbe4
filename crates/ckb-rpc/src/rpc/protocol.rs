use reqwest::StatusCode;
use serde_json::Value;

use crate::error::ClientError;

/// Requests are never correlated by id: one request, one response.
pub(super) const REQUEST_ID: u64 = 1;

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) id: u64,
    pub(super) jsonrpc: &'static str,
    pub(super) method: &'a str,
    pub(super) params: Option<Vec<Value>>,
}

impl<'a> JsonRpcRequest<'a> {
    pub(super) fn new(method: &'a str, params: Option<Vec<Value>>) -> Self {
        Self {
            id: REQUEST_ID,
            jsonrpc: "2.0",
            method,
            params,
        }
    }
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub(super) result: Option<Value>,
    #[serde(default)]
    pub(super) error: Option<Value>,
}

/// Classify a raw HTTP reply into the `result` payload or a [`ClientError`].
///
/// A body that is not a JSON object is a protocol error on 2xx and a
/// transport error otherwise. Any non-null `error` member wins over
/// `result`, and is returned exactly as the node sent it. A non-2xx reply
/// without such a member is a transport error, whatever else it carries.
pub(super) fn decode_response(status: StatusCode, body: &[u8]) -> Result<Value, ClientError> {
    let parsed = serde_json::from_slice::<Value>(body)
        .map_err(|e| e.to_string())
        .and_then(|value| match value {
            Value::Object(_) => Ok(value),
            other => Err(format!("expected a JSON object, got {other}")),
        });
    let envelope = match parsed {
        Ok(envelope) => envelope,
        Err(reason) if !status.is_success() => {
            return Err(ClientError::Transport(
                format!("HTTP status {status} without a JSON-RPC body: {reason}").into(),
            ));
        }
        Err(reason) => {
            return Err(ClientError::Protocol(format!(
                "decode JSON-RPC response: {reason}; body={}",
                String::from_utf8_lossy(body)
            )));
        }
    };

    let decoded: JsonRpcResponse = serde_json::from_value(envelope)
        .map_err(|e| ClientError::Protocol(format!("decode JSON-RPC envelope: {e}")))?;

    if let Some(err) = decoded.error {
        return Err(ClientError::Rpc(err));
    }
    if !status.is_success() {
        return Err(ClientError::Transport(
            format!("HTTP status {status} without a JSON-RPC error").into(),
        ));
    }

    Ok(decoded.result.unwrap_or(Value::Null))
}
