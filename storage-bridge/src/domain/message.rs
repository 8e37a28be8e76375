//! Messages exchanged between the host and the storage bridge.
//!
//! Wire shapes follow the host's port conventions: a set request is a
//! `[key, value]` pair, get/remove requests are a bare key, and a get
//! response is the stored string or `null`.

use host_ports::{InboundPort, OutboundPort, Port};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct SetRequest {
    pub key: String,
    pub value: String,
}

impl SetRequest {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<(String, String)> for SetRequest {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<SetRequest> for (String, String) {
    fn from(request: SetRequest) -> Self {
        (request.key, request.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GetRequest {
    pub key: String,
}

impl GetRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoveRequest {
    pub key: String,
}

impl RemoveRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Reply to a [`GetRequest`]. Carries no request identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GetResponse {
    pub value: Option<String>,
}

impl GetResponse {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeRequest {
    Set(SetRequest),
    Get(GetRequest),
    Remove(RemoveRequest),
}

impl BridgeRequest {
    pub fn key(&self) -> &str {
        match self {
            BridgeRequest::Set(request) => &request.key,
            BridgeRequest::Get(request) => &request.key,
            BridgeRequest::Remove(request) => &request.key,
        }
    }
}

/// host → bridge: overwrite an entry.
pub struct RequestSet;

impl Port for RequestSet {
    type Message = SetRequest;
    const NAME: &'static str = "request-set";
}

impl OutboundPort for RequestSet {}

/// host → bridge: read an entry; answered on [`ResponseGet`].
pub struct RequestGet;

impl Port for RequestGet {
    type Message = GetRequest;
    const NAME: &'static str = "request-get";
}

impl OutboundPort for RequestGet {}

/// host → bridge: delete an entry.
pub struct RequestRemove;

impl Port for RequestRemove {
    type Message = RemoveRequest;
    const NAME: &'static str = "request-remove";
}

impl OutboundPort for RequestRemove {}

/// bridge → host: the value found by the most recent get request.
pub struct ResponseGet;

impl Port for ResponseGet {
    type Message = GetResponse;
    const NAME: &'static str = "response-get";
}

impl InboundPort for ResponseGet {}
