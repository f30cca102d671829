// Posts API HTTP client.
// Handles request execution and response status checking against the REST backend.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Serialize;

use crate::error::{PostdeckError, Result};

/// Base URL of the local posts backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3004";

/// HTTP client for the posts REST API.
///
/// Each call performs exactly one network round trip; there are no retries
/// and no timeout policy beyond what the transport enforces.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("postdeck-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PostdeckError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client was constructed with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request against the backend.
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(PostdeckError::Network)?;
        check_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(PostdeckError::Network)?;
        check_response(response).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(PostdeckError::Network)?;
        check_response(response).await
    }

    /// Make a DELETE request against the backend.
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(PostdeckError::Network)?;
        check_response(response).await
    }
}

/// Check response status and convert non-2xx responses into errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => {
            Ok(response)
        }
        StatusCode::NOT_FOUND => {
            let url = response.url().to_string();
            Err(PostdeckError::NotFound(url))
        }
        status => Err(PostdeckError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}
