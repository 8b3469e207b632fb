//! HTTP client for the analysis backend.

use reqwest::multipart;
use thiserror::Error;

use super::schema::{AnalysisReport, CancelResponse, StartResponse};
use crate::analysis::request::{AnalysisPayload, AnalysisRequest};

/// The backend is a fixed localhost deployment; no runtime configuration.
pub const API_BASE: &str = "http://127.0.0.1:8000";

/// Generic fallback when the backend fails without a message body.
pub const SUBMIT_FAILURE_FALLBACK: &str = "Upload or API call failed";

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed backend response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl ApiError {
    /// The line shown in the upload view when a submission fails: the
    /// backend's own words where it sent any, the generic fallback
    /// otherwise.
    pub fn submit_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            _ => SUBMIT_FAILURE_FALLBACK.to_string(),
        }
    }
}

/// Starts a backend analysis task from a validated request.
pub async fn start_analysis(request: AnalysisRequest) -> Result<StartResponse> {
    let mut form = multipart::Form::new();
    form = match request.payload {
        AnalysisPayload::File(file) => form.part(
            "file",
            multipart::Part::bytes(file.bytes).file_name(file.name),
        ),
        AnalysisPayload::RssUrl(url) => form.text("rss_url", url),
    };
    form = form
        .text("api_key_openai", request.api_key_openai)
        .text("api_key_perplexity", request.api_key_perplexity);

    let response = reqwest::Client::new()
        .post(format!("{API_BASE}/analyze"))
        .multipart(form)
        .send()
        .await?;
    decode(check_status(response).await?).await
}

/// One poll of `GET /result/{task_id}`.
pub async fn fetch_report(task_id: &str) -> Result<AnalysisReport> {
    let response = reqwest::Client::new()
        .get(format!("{API_BASE}/result/{task_id}"))
        .send()
        .await?;
    decode(check_status(response).await?).await
}

/// Asks the backend to cancel a task. The task may already be past the
/// point of no return server-side; callers treat this as best-effort.
pub async fn request_cancel(task_id: &str) -> Result<CancelResponse> {
    let response = reqwest::Client::new()
        .post(format!("{API_BASE}/cancel/{task_id}"))
        .send()
        .await?;
    decode(check_status(response).await?).await
}

/// Fetches a pre-baked sample document served next to the app itself.
pub async fn fetch_sample_report(sample_id: &str) -> Result<AnalysisReport> {
    let url = absolute_url(&sample_report_url(sample_id));
    let response = reqwest::Client::new().get(url).send().await?;
    decode(check_status(response).await?).await
}

/// Path of the static sample document for a sample id.
pub fn sample_report_url(sample_id: &str) -> String {
    format!("/sample_report_{sample_id}.json")
}

/// Endpoint serving the downloadable report for a finished task.
pub fn download_url(task_id: &str) -> String {
    format!("{API_BASE}/download/{task_id}")
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut message = response.text().await.unwrap_or_default();
    if message.is_empty() {
        message = SUBMIT_FAILURE_FALLBACK.to_string();
    }
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Sample documents are fetched relative to the page origin; reqwest wants
/// absolute URLs, so join against the window location on the web target.
fn absolute_url(path: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window().and_then(|window| window.location().origin().ok()) {
            return format!("{origin}{path}");
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_builders_match_the_backend_contract() {
        assert_eq!(sample_report_url("3"), "/sample_report_3.json");
        assert_eq!(download_url("xyz"), "http://127.0.0.1:8000/download/xyz");
    }

    #[test]
    fn submit_message_prefers_backend_words() {
        let api = ApiError::Api {
            status: 422,
            message: "rss feed has no audio enclosure".into(),
        };
        assert_eq!(api.submit_message(), "rss feed has no audio enclosure");

        let network = ApiError::Network("connection refused".into());
        assert_eq!(network.submit_message(), SUBMIT_FAILURE_FALLBACK);
    }
}
