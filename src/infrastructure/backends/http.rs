#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::ChatAnswer;
use crate::domain::models::ChatRequest;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadReceipt;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionResponse {
    session_id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    detail: Option<serde_json::Value>,
}

/// Prefers the backend's `detail` field, which FastAPI style services fill
/// with either a string or a validation error object.
async fn error_detail(res: reqwest::Response) -> String {
    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();

    if let Ok(err_res) = serde_json::from_str::<ErrorResponse>(&body) {
        match err_res.detail {
            Some(serde_json::Value::String(detail)) => return detail,
            Some(serde_json::Value::Null) | None => {}
            Some(detail) => return detail.to_string(),
        }
    }

    return format!("Request failed with status {status}");
}

/// REST client for the document question answering service.
pub struct HttpBackend {
    url: String,
    timeout: String,
}

impl Default for HttpBackend {
    fn default() -> HttpBackend {
        return HttpBackend {
            url: Config::get(ConfigKey::ApiURL),
            timeout: Config::get(ConfigKey::RequestTimeout),
        };
    }
}

impl HttpBackend {
    fn request(&self, method: reqwest::Method, url_path: &str) -> Result<reqwest::RequestBuilder> {
        let url = format!("{url}{url_path}", url = self.url.trim_end_matches('/'));
        let mut req = reqwest::Client::new().request(method, url);

        let timeout = self.timeout.parse::<u64>()?;
        if timeout > 0 {
            req = req.timeout(Duration::from_secs(timeout));
        }

        return Ok(req);
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let res = req
            .send()
            .await
            .map_err(|err| return anyhow!(err.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let detail = error_detail(res).await;
            tracing::error!(status, detail = %detail, "Backend request failed");
            bail!(detail);
        }

        return Ok(res);
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = self.request(reqwest::Method::GET, "/health")?.send().await;

        match res {
            Err(err) => {
                tracing::error!(error = ?err, "Backend is not reachable");
                bail!("Backend is not reachable");
            }
            Ok(res) if !res.status().is_success() => {
                tracing::error!(status = res.status().as_u16(), "Backend health check failed");
                bail!("Backend health check failed");
            }
            Ok(_) => {}
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn create_session(&self) -> Result<String> {
        let req = self.request(reqwest::Method::POST, "/api/session/create")?;
        let res = self
            .send(req)
            .await?
            .json::<SessionResponse>()
            .await?;

        tracing::debug!(session_id = %res.session_id, "Session created");

        return Ok(res.session_id);
    }

    #[allow(clippy::implicit_return)]
    async fn upload_document(&self, session_id: &str, file: UploadFile) -> Result<UploadReceipt> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        let req = self
            .request(
                reqwest::Method::POST,
                &format!("/api/upload/{session_id}"),
            )?
            .multipart(form);

        let res = self.send(req).await?.json::<UploadReceipt>().await?;

        return Ok(res);
    }

    #[allow(clippy::implicit_return)]
    async fn chat(&self, session_id: &str, request: ChatRequest) -> Result<ChatAnswer> {
        let req = self
            .request(reqwest::Method::POST, &format!("/api/chat/{session_id}"))?
            .json(&request);

        let res = self.send(req).await?.json::<ChatAnswer>().await?;

        return Ok(res);
    }
}
