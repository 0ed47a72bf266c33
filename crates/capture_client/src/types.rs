use serde::{Deserialize, Serialize};

/// Server-side job status as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStatus {
    Pending,
    #[serde(alias = "in_progress")]
    Running,
    Completed,
    Error,
    /// Unknown or expired job id.
    NotFound,
}

impl RemoteStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RemoteStatus::Completed | RemoteStatus::Error | RemoteStatus::NotFound
        )
    }
}

/// Body of `GET /api/progress/{thread_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusSnapshot {
    pub status: RemoteStatus,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AssetTotals {
    pub css: u32,
    pub js: u32,
    pub images: u32,
}

/// One element of `GET /api/captures`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptureEntry {
    pub folder_name: String,
    pub original_url: String,
    #[serde(default)]
    pub final_url: Option<String>,
    #[serde(default)]
    pub capture_time: String,
    #[serde(default)]
    pub assets: AssetTotals,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub(crate) url: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SubmitResponse {
    pub(crate) thread_id: Option<String>,
    pub(crate) error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DeleteResponse {
    pub(crate) error: Option<String>,
}

/// Everything the client runtime reports back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Submitted {
        ticket: u64,
        result: Result<String, ClientError>,
    },
    Status {
        job_id: String,
        result: Result<StatusSnapshot, ClientError>,
    },
    CapturesListed(Result<Vec<CaptureEntry>, ClientError>),
    ComparisonListed {
        folder: String,
        result: Result<Vec<CaptureEntry>, ClientError>,
        captured_url: String,
    },
    Deleted {
        folder: String,
        result: Result<(), ClientError>,
    },
    TimerElapsed {
        timer_id: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an explicit `{error}` payload.
    #[error("{0}")]
    Remote(String),
    #[error("server responded with HTTP {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid server url: {0}")]
    InvalidServerUrl(String),
    #[error("client runtime unavailable: {0}")]
    Runtime(String),
}

impl ClientError {
    /// Transport-level failure: the request did not produce a usable answer.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::HttpStatus(_)
                | ClientError::Timeout
                | ClientError::Network(_)
                | ClientError::Decode(_)
        )
    }

    /// The server understood the request and refused it.
    pub fn is_remote(&self) -> bool {
        matches!(self, ClientError::Remote(_))
    }
}
