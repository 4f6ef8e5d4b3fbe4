//! CKB node JSON-RPC layer.
//!
//! [`RpcClient`] exposes one method per node operation and funnels all of
//! them through a single request/response primitive. The HTTP leg sits
//! behind the [`Transport`] trait so that the production [`HttpTransport`]
//! (reqwest) can be swapped for a test double (`mock::MockTransport`).

mod client;
mod connection;
mod http_transport;
#[cfg(test)]
pub mod mock;
mod protocol;

pub use client::RpcClient;
pub use connection::DEFAULT_URL;
pub use http_transport::HttpTransport;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};

use crate::error::BoxError;

/// Raw HTTP reply handed back by a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// "Send bytes, get bytes": one HTTP POST per invocation.
///
/// Implementations own connection handling, TLS and timeouts. An `Err`
/// means no response was obtained at all; any reply, whatever its status,
/// is returned as `Ok` and classified by the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        url: &Url,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<HttpResponse, BoxError>;
}

// ==============================================================================
// Configuration
// ==============================================================================

/// Settings for [`HttpTransport`]. Unset fields fall back to reqwest defaults.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub user: Option<String>,
    pub pass: Option<String>,
}

/// Everything needed to build an [`RpcClient`] over HTTP.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Node endpoint; [`DEFAULT_URL`] when `None`.
    pub url: Option<String>,
    pub transport: TransportConfig,
}
