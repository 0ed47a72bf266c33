use std::time::Duration;

use client_logging::{client_debug, client_warn};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::types::{DeleteResponse, SubmitRequest, SubmitResponse};
use crate::{CaptureEntry, ClientError, StatusSnapshot};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub server_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5001".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// The capture server's HTTP contract.
#[async_trait::async_trait]
pub trait JobClient: Send + Sync {
    /// Starts a capture job and returns its opaque id.
    async fn submit(&self, url: &str) -> Result<String, ClientError>;

    async fn poll(&self, job_id: &str) -> Result<StatusSnapshot, ClientError>;

    async fn try_list(&self) -> Result<Vec<CaptureEntry>, ClientError>;

    /// Best-effort listing: failures are logged and yield an empty list.
    async fn list(&self) -> Vec<CaptureEntry> {
        match self.try_list().await {
            Ok(captures) => captures,
            Err(err) => {
                client_warn!("Listing captures failed: {}", err);
                Vec::new()
            }
        }
    }

    async fn remove(&self, folder_name: &str) -> Result<(), ClientError>;

    /// Archive download address; opened by navigation, never fetched here.
    fn download_url(&self, folder_name: &str) -> String;

    /// Full-screen view of a capture.
    fn view_url(&self, folder_name: &str) -> String;

    /// Captured page content, loaded in an isolated viewer.
    fn captured_url(&self, folder_name: &str) -> String;

    fn screenshot_url(&self, folder_name: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobClient {
    base: Url,
    http: reqwest::Client,
}

impl ReqwestJobClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let base = Url::parse(settings.server_url.trim())
            .map_err(|err| ClientError::InvalidServerUrl(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ClientError::InvalidServerUrl(format!(
                "{} is not an http(s) address",
                settings.server_url
            )));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;

        Ok(Self { base, http })
    }

    /// Appends percent-encoded path segments to the server address.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
impl JobClient for ReqwestJobClient {
    async fn submit(&self, url: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.endpoint(&["api", "capture"]))
            .json(&SubmitRequest { url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Rejections arrive as `{error}`, possibly with a 4xx status.
        let (status, body): (_, SubmitResponse) = read_payload(response).await?;
        if let Some(error) = body.error {
            return Err(ClientError::Remote(error));
        }
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }
        let thread_id = body
            .thread_id
            .ok_or_else(|| ClientError::Decode("response carried no thread_id".to_string()))?;
        client_debug!("Submitted {} as job {}", url, thread_id);
        Ok(thread_id)
    }

    async fn poll(&self, job_id: &str) -> Result<StatusSnapshot, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&["api", "progress", job_id]))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn try_list(&self) -> Result<Vec<CaptureEntry>, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&["api", "captures"]))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn remove(&self, folder_name: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.endpoint(&["api", "delete", folder_name]))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let (status, body): (_, DeleteResponse) = read_payload(response).await?;
        match body.error {
            Some(error) => Err(ClientError::Remote(error)),
            None if !status.is_success() => Err(ClientError::HttpStatus(status.as_u16())),
            None => Ok(()),
        }
    }

    fn download_url(&self, folder_name: &str) -> String {
        self.endpoint(&["download", folder_name]).into()
    }

    fn view_url(&self, folder_name: &str) -> String {
        self.endpoint(&["view", folder_name]).into()
    }

    fn captured_url(&self, folder_name: &str) -> String {
        self.endpoint(&["captured", folder_name, "index.html"]).into()
    }

    fn screenshot_url(&self, folder_name: &str) -> String {
        self.endpoint(&["screenshot", folder_name]).into()
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::HttpStatus(status.as_u16()));
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode(err.to_string()))
}

/// Decodes the body whatever the status, so an explicit `{error}` payload can
/// be reported verbatim. Undecodable non-2xx bodies become `HttpStatus`.
async fn read_payload<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<(StatusCode, T), ClientError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    match serde_json::from_slice(&bytes) {
        Ok(body) => Ok((status, body)),
        Err(_) if !status.is_success() => Err(ClientError::HttpStatus(status.as_u16())),
        Err(err) => Err(ClientError::Decode(err.to_string())),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout;
    }
    if err.is_decode() {
        return ClientError::Decode(err.to_string());
    }
    ClientError::Network(err.to_string())
}
