use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::MediaConfig;
use crate::domain::models::media::{MediaError, UploadedImage};
use crate::domain::services::media::MediaService;

#[derive(Deserialize)]
struct UploadResponse {
    public_id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct CloudinaryMediaService {
    client: Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryMediaService {
    pub fn new(config: &MediaConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()?;

        Ok(Self {
            client,
            upload_url: format!(
                "{}/{}/image/upload",
                config.endpoint.trim_end_matches('/'),
                config.cloud_name
            ),
            api_key: config.api_key.to_owned(),
            api_secret: config.api_secret.to_owned(),
        })
    }
}

#[async_trait]
impl MediaService for CloudinaryMediaService {
    #[tracing::instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
    async fn upload(&self, image: UploadedImage) -> Result<String, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();

        let mut file = Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type {
            file = file
                .mime_str(&content_type)
                .map_err(|err| MediaError::Transport(err.to_string()))?;
        }

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.to_owned())
            .text("signature", sign(&timestamp, &self.api_secret))
            .text("timestamp", timestamp);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| MediaError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| MediaError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(rejection(status.as_u16(), &body));
        }

        let uploaded: UploadResponse =
            serde_json::from_slice(&body).map_err(|err| MediaError::Decode(err.to_string()))?;

        tracing::info!(public_id = %uploaded.public_id, "image uploaded");

        Ok(uploaded.public_id)
    }
}

/// Upload parameters are signed as `key=value` pairs sorted by key, with the
/// API secret appended.
fn sign(timestamp: &str, api_secret: &str) -> String {
    sha1_smol::Sha1::from(format!("timestamp={timestamp}{api_secret}"))
        .digest()
        .to_string()
}

fn rejection(status: u16, body: &[u8]) -> MediaError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .map(|err| err.error.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());

    MediaError::Rejected { status, message }
}

#[cfg(test)]
pub mod mock {
    use tokio::sync::Mutex;

    use super::*;

    /// Records uploads and hands out sequential ids, or fails every call.
    pub struct MediaServiceImpl {
        pub uploads: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl MediaServiceImpl {
        pub fn working() -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl MediaService for MediaServiceImpl {
        async fn upload(&self, image: UploadedImage) -> Result<String, MediaError> {
            if self.fail {
                return Err(MediaError::Transport("connection refused".into()));
            }

            let mut uploads = self.uploads.lock().await;
            uploads.push(image.file_name);

            Ok(format!("hotels/image{}", uploads.len()))
        }
    }
}
