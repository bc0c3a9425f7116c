use std::fmt;

use anyhow::Context;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{Activity, ActivityId, ActivityInput};

pub type ClientResult<T> = Result<T, ClientError>;

/// The four calls the console makes against the activity store.
///
/// Every call is one attempt: no retry, no timeout. Failures come back as a
/// [`ClientError`] whose `Display` is the message shown to the user.
#[allow(async_fn_in_trait)]
pub trait ActivityGateway {
    async fn list(&self) -> ClientResult<Vec<Activity>>;

    async fn create(&self, draft: &ActivityInput) -> ClientResult<Activity>;

    /// Full replacement. A missing record yields [`ClientError::NotFound`].
    async fn update(&self, id: &ActivityId, draft: &ActivityInput) -> ClientResult<Activity>;

    async fn delete(&self, id: &ActivityId) -> ClientResult<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatewayOp {
    List,
    Create,
    Update,
    Delete,
}

impl GatewayOp {
    fn progressive(self) -> &'static str {
        match self {
            Self::List => "fetching activities",
            Self::Create => "creating activity",
            Self::Update => "updating activity",
            Self::Delete => "deleting activity",
        }
    }

    fn failure_label(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch activities",
            Self::Create => "Failed to create activity",
            Self::Update => "Failed to update activity",
            Self::Delete => "Failed to delete activity",
        }
    }
}

impl fmt::Display for GatewayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.progressive())
    }
}

#[derive(Clone)]
pub struct ActivityClient {
    inner: reqwest::Client,
    endpoint: String,
}

impl ActivityClient {
    pub fn new(config: &AppConfig) -> ClientResult<Self> {
        let endpoint = config.activities_endpoint();

        let client = reqwest::Client::builder()
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            inner: client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn item_url(&self, id: &ActivityId) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.inner
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    /// Sends the request and returns the body of a 2xx response. Anything else
    /// goes through [`failure`].
    async fn send(
        &self,
        op: GatewayOp,
        id: Option<&ActivityId>,
        builder: reqwest::RequestBuilder,
    ) -> ClientResult<Vec<u8>> {
        let response = builder
            .send()
            .await
            .map_err(|source| ClientError::Transport { op, source })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport { op, source })?;

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(failure(op, id, status, &bytes))
        }
    }
}

/// Maps a non-2xx response to its error. A 404 on update names the missing
/// record; every other status keeps the trimmed body text, if any.
fn failure(
    op: GatewayOp,
    id: Option<&ActivityId>,
    status: StatusCode,
    bytes: &[u8],
) -> ClientError {
    if let (GatewayOp::Update, Some(id)) = (op, id) {
        if status == StatusCode::NOT_FOUND {
            return ClientError::NotFound { op, id: id.clone() };
        }
    }

    let body = String::from_utf8_lossy(bytes).trim().to_string();
    ClientError::Http {
        op,
        status,
        body: (!body.is_empty()).then_some(body),
    }
}

fn decode<T>(op: GatewayOp, bytes: &[u8]) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(bytes).map_err(|source| ClientError::Decode { op, source })
}

impl ActivityGateway for ActivityClient {
    async fn list(&self) -> ClientResult<Vec<Activity>> {
        let op = GatewayOp::List;
        let bytes = self
            .send(op, None, self.request(Method::GET, &self.endpoint))
            .await?;
        decode(op, &bytes)
    }

    async fn create(&self, draft: &ActivityInput) -> ClientResult<Activity> {
        let op = GatewayOp::Create;
        let builder = self.request(Method::POST, &self.endpoint).json(draft);
        let bytes = self.send(op, None, builder).await?;
        decode(op, &bytes)
    }

    async fn update(&self, id: &ActivityId, draft: &ActivityInput) -> ClientResult<Activity> {
        let op = GatewayOp::Update;
        let builder = self.request(Method::PUT, &self.item_url(id)).json(draft);
        let bytes = self.send(op, Some(id), builder).await?;
        decode(op, &bytes)
    }

    async fn delete(&self, id: &ActivityId) -> ClientResult<()> {
        let op = GatewayOp::Delete;
        self.send(op, Some(id), self.request(Method::DELETE, &self.item_url(id)))
            .await
            .map(|_| ())
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("client setup failed: {0:#}")]
    Setup(#[from] anyhow::Error),
    #[error("Error {op}: {source}")]
    Transport {
        op: GatewayOp,
        #[source]
        source: reqwest::Error,
    },
    #[error("Error {op}: {}", describe_status(.op, .status, .body))]
    Http {
        op: GatewayOp,
        status: StatusCode,
        body: Option<String>,
    },
    #[error("Error {op}: Activity not found")]
    NotFound { op: GatewayOp, id: ActivityId },
    #[error("Error {op}: invalid response body: {source}")]
    Decode {
        op: GatewayOp,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }

    pub fn op(&self) -> Option<GatewayOp> {
        match self {
            Self::Setup(_) => None,
            Self::Transport { op, .. }
            | Self::Http { op, .. }
            | Self::NotFound { op, .. }
            | Self::Decode { op, .. } => Some(*op),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Create and update surface the server's own explanation; list and delete
/// only ever name the status.
fn describe_status(op: &GatewayOp, status: &StatusCode, body: &Option<String>) -> String {
    match (op, body) {
        (GatewayOp::Create | GatewayOp::Update, Some(text)) => text.clone(),
        _ => format!("{}: {}", op.failure_label(), status),
    }
}
