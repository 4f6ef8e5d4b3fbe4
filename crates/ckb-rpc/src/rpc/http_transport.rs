use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Url;
use tracing::trace;

use crate::error::{BoxError, ClientError};

use super::connection::resolve_auth;
use super::{HttpResponse, Transport, TransportConfig};

/// [`Transport`] over a `reqwest` HTTP(S) client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    auth: Option<(String, String)>,
}

impl HttpTransport {
    /// Transport with reqwest's defaults: no client-side timeout, no auth.
    pub fn new() -> Result<Self, ClientError> {
        Self::from_config(&TransportConfig::default())
    }

    pub fn from_config(config: &TransportConfig) -> Result<Self, ClientError> {
        let auth = resolve_auth(config.user.as_deref(), config.pass.as_deref())?;

        let mut builder = reqwest::Client::builder();
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Configuration(format!("build HTTP client: {e}")))?;

        Ok(Self { client, auth })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<HttpResponse, BoxError> {
        let mut builder = self.client.post(url.clone()).headers(headers).body(body);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        trace!(%status, body_len = body.len(), "http response received");

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
