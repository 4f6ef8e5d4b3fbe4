use reqwest::Url;

use crate::error::ClientError;

/// Endpoint used when the caller does not name one: a local node's RPC port.
pub const DEFAULT_URL: &str = "http://localhost:8114";

pub(super) fn parse_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    let parsed = Url::parse(endpoint).map_err(|e| {
        ClientError::Configuration(format!(
            "invalid endpoint `{endpoint}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::Configuration(format!(
                "unsupported endpoint scheme `{other}`; expected http or https"
            )));
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ClientError::Configuration(format!(
            "endpoint `{endpoint}` has no host"
        )));
    }
    Ok(parsed)
}

pub(super) fn resolve_auth(
    user: Option<&str>,
    pass: Option<&str>,
) -> Result<Option<(String, String)>, ClientError> {
    match (user, pass) {
        (Some(u), Some(p)) => Ok(Some((u.to_owned(), p.to_owned()))),
        (Some(_), None) | (None, Some(_)) => Err(ClientError::Configuration(
            "both rpc user and rpc pass must be set together".to_owned(),
        )),
        (None, None) => Ok(None),
    }
}
