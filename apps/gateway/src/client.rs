use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use reqwest::Method;
use std::time::Duration;
use uuid::Uuid;

use axum_helpers::SHARER_USER_ID_HEADER;

use crate::error::{GatewayError, GatewayResult};

/// HTTP client forwarding validated requests to the core API.
///
/// The upstream's status code and body are relayed verbatim; only
/// transport failures are translated (to 502).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Forward a request to `{base_url}{path}` and relay the response.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        user_id: Option<Uuid>,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> GatewayResult<Response> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method, &url);

        if let Some(user_id) = user_id {
            request = request.header(SHARER_USER_ID_HEADER, user_id.to_string());
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let upstream = request
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;

        let status = upstream.status();
        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let bytes = upstream
            .bytes()
            .await
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;

        tracing::debug!(%url, status = %status, "Relayed upstream response");

        let mut response = Response::builder()
            .status(StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY));
        if !bytes.is_empty() {
            response = response.header(header::CONTENT_TYPE, content_type);
        }

        response
            .body(Body::from(bytes))
            .map_err(|e| GatewayError::Upstream(e.to_string()))
    }
}
