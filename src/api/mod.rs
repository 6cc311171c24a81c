//! Backend transport
//!
//! [`RequestService`] runs each HTTP call in a spawned task under a
//! cancellation token and reports the outcome over an unbounded channel,
//! tagged with the request id that issued it. The event loop drains the
//! channel and drops events whose id is no longer current, so a superseded
//! request can never overwrite state from a newer one.

pub mod models;

pub use models::{
    GrammarField, GrammarIssue, GrammarReport, ProcessRequest, ProcessResponse, RefineRequest,
    RefineResponse, SaveRequest, SaveResponse,
};

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::utils::url::construct_api_url;

/// Failure taxonomy for a backend call. `Http` carries the raw response
/// body verbatim so the user sees exactly what the backend said.
#[derive(Debug, Clone)]
pub enum ApiError {
    Http { status: u16, body: String },
    Transport(String),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, body } => write!(f, "API error {status}: {body}"),
            ApiError::Transport(message) => write!(f, "Request failed: {message}"),
            ApiError::Decode(message) => write!(f, "Unexpected response from backend: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Outcome of one backend call, matched to the operation that issued it.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    Process(Result<ProcessResponse, ApiError>),
    Refine(Result<RefineResponse, ApiError>),
    Save(Result<SaveResponse, ApiError>),
}

/// Which endpoint to call, with its request body.
#[derive(Clone)]
pub enum RequestKind {
    Process(ProcessRequest),
    Refine(RefineRequest),
    Save(SaveRequest),
}

pub struct RequestParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub kind: RequestKind,
    pub cancel_token: CancellationToken,
    pub request_id: u64,
}

#[derive(Clone)]
pub struct RequestService {
    tx: mpsc::UnboundedSender<(ApiEvent, u64)>,
}

impl RequestService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(ApiEvent, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Run the request in a spawned task. Cancellation drops the task
    /// without sending anything; the staleness guard in the event loop
    /// covers the window where a response was already in the channel.
    pub fn spawn_request(&self, params: RequestParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let RequestParams {
                client,
                base_url,
                kind,
                cancel_token,
                request_id,
            } = params;

            tokio::select! {
                event = execute_request(client, base_url, kind) => {
                    let _ = tx.send((event, request_id));
                }
                _ = cancel_token.cancelled() => {}
            }
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, event: ApiEvent, request_id: u64) {
        let _ = self.tx.send((event, request_id));
    }
}

async fn execute_request(client: reqwest::Client, base_url: String, kind: RequestKind) -> ApiEvent {
    match kind {
        RequestKind::Process(body) => {
            let url = construct_api_url(&base_url, "api/process");
            ApiEvent::Process(post_json(&client, &url, &body).await)
        }
        RequestKind::Refine(body) => {
            let url = construct_api_url(&base_url, "api/refine");
            ApiEvent::Refine(post_json(&client, &url, &body).await)
        }
        RequestKind::Save(body) => {
            let url = construct_api_url(&base_url, "api/save");
            ApiEvent::Save(post_json(&client, &url, &body).await)
        }
    }
}

async fn post_json<Req, Resp>(client: &reqwest::Client, url: &str, body: &Req) -> Result<Resp, ApiError>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}
