use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap};
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::error::BoxError;

use super::{HttpResponse, Transport};

#[derive(Debug, Clone)]
enum MockReply {
    Http(HttpResponse),
    Refuse,
}

/// A request as the mock saw it on the wire.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: Url,
    pub content_type: Option<String>,
    pub raw_body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.raw_body).expect("client always sends JSON")
    }
}

/// A scripted [`Transport`] for testing. Replies are served in order and the
/// last one is repeated once the script runs out; every request is recorded.
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            replies: VecDeque::new(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("mock lock poisoned").len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .last()
            .cloned()
            .expect("at least one request was sent")
    }
}

pub struct MockTransportBuilder {
    replies: VecDeque<MockReply>,
}

impl MockTransportBuilder {
    /// Reply 200 with `body` serialized as JSON.
    pub fn reply_json(self, body: Value) -> Self {
        let bytes = serde_json::to_vec(&body).expect("static JSON must encode");
        self.reply_raw(StatusCode::OK, bytes)
    }

    pub fn reply_raw(mut self, status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        self.replies.push_back(MockReply::Http(HttpResponse {
            status,
            body: body.into(),
        }));
        self
    }

    /// Fail the request as if the connection had been refused.
    pub fn refuse(mut self) -> Self {
        self.replies.push_back(MockReply::Refuse);
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            replies: Mutex::new(self.replies),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(
        &self,
        url: &Url,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<HttpResponse, BoxError> {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(RecordedRequest {
                url: url.clone(),
                content_type: headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned),
                raw_body: body,
            });

        let reply = {
            let mut replies = self.replies.lock().expect("mock lock poisoned");
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };

        match reply {
            Some(MockReply::Http(response)) => Ok(response),
            Some(MockReply::Refuse) => Err("connection refused".into()),
            None => Err("mock transport has no scripted reply".into()),
        }
    }
}
