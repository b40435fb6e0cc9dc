// Shared test helpers; each test file uses a subset.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bdp::{
    BdpClient, BdpError, Method, Transport, TransportRequest, TransportResponse,
};

pub const BASE_URL: &str = "http://writer.test/json";
pub const PRN: &str = "dc-test";
pub const PRV: &str = "0.1.0";
pub const ORIGIN: &str = "test-origin";
pub const PROVENANCE_ID: &str = "prov-1";

type Responder = dyn Fn(&TransportRequest) -> Result<TransportResponse, BdpError> + Send + Sync;

/// In-process transport that records every request and answers from a closure.
pub struct ScriptedTransport {
    requests: Mutex<Vec<TransportRequest>>,
    responder: Box<Responder>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&TransportRequest) -> Result<TransportResponse, BdpError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// A writer that accepts everything: provenance returns `PROVENANCE_ID`,
    /// station queries return `[]`, writes return `201`.
    pub fn accepting() -> Arc<Self> {
        Self::new(|req| Ok(default_answer(req)))
    }

    /// Like `accepting`, but the first `n` provenance registrations fail.
    pub fn failing_registrations(n: usize) -> Arc<Self> {
        let seen = AtomicUsize::new(0);
        Self::new(move |req| {
            if path(req) == "/json/provenance" && seen.fetch_add(1, Ordering::SeqCst) < n {
                return Err(BdpError::Transport("connection refused".into()));
            }
            Ok(default_answer(req))
        })
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests whose path equals `p`.
    pub fn requests_to(&self, p: &str) -> Vec<TransportRequest> {
        self.requests()
            .into_iter()
            .filter(|r| path(r) == p)
            .collect()
    }

    pub fn registrations(&self) -> usize {
        self.requests_to("/json/provenance").len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BdpError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}

pub fn default_answer(req: &TransportRequest) -> TransportResponse {
    match (req.method, path(req).as_str()) {
        (Method::Post, "/json/provenance") => TransportResponse::new(200, PROVENANCE_ID),
        (Method::Get, _) => TransportResponse::new(200, "[]"),
        _ => TransportResponse::new(201, ""),
    }
}

pub fn path(req: &TransportRequest) -> String {
    url::Url::parse(&req.url).unwrap().path().to_string()
}

pub fn query(req: &TransportRequest, key: &str) -> Option<String> {
    url::Url::parse(&req.url)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub fn body_json(req: &TransportRequest) -> serde_json::Value {
    serde_json::from_slice(req.body.as_deref().expect("request has a body")).unwrap()
}

pub fn client(transport: Arc<ScriptedTransport>) -> BdpClient {
    BdpClient::builder()
        .base_url(BASE_URL)
        .provenance(PRN, PRV)
        .origin(ORIGIN)
        .bearer_token("secret")
        .transport(transport)
        .build()
        .expect("valid test client")
}
