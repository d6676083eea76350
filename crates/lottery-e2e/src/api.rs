//! Thin client for the lottery application's HTTP API.
//!
//! Every endpoint answers with the same envelope, `{code, msg, data}`,
//! where `code` is a business status (200 on success) independent of the
//! HTTP status. Authentication is a `user_token` header. Requests and
//! responses are logged for the smoke scenarios.

use crate::result::{SuiteError, SuiteResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

/// Business envelope returned by every endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    /// Business status code (200 = success, 401 = unauthorized, ...)
    pub code: i64,
    /// Human-readable message
    pub msg: String,
    /// Payload, shape depends on the endpoint
    #[serde(default)]
    pub data: Value,
}

impl ApiEnvelope {
    /// Whether the business code signals success
    pub const fn is_ok(&self) -> bool {
        self.code == 200
    }
}

/// An HTTP reply: transport status plus the parsed envelope
#[derive(Debug, Clone)]
pub struct ApiReply {
    /// HTTP status code
    pub status: u16,
    /// Parsed business envelope
    pub body: ApiEnvelope,
}

impl ApiReply {
    /// Unauthorized either at the HTTP layer or the business layer; the
    /// backend uses both conventions.
    pub const fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.body.code == 401
    }
}

/// Client for the application API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the deployment at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> SuiteResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SuiteError::Api {
                message: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Attach a `user_token` to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GET an endpoint with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable envelope.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> SuiteResult<ApiReply> {
        let url = self.url(path);
        info!(%url, ?query, "GET");
        let mut request = self.http.get(&url).query(query);
        if let Some(ref token) = self.token {
            request = request.header("user_token", token);
        }
        Self::finish(url, request).await
    }

    /// POST a JSON body to an endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable envelope.
    pub async fn post(&self, path: &str, body: &Value) -> SuiteResult<ApiReply> {
        let url = self.url(path);
        info!(%url, %body, "POST");
        let mut request = self.http.post(&url).json(body);
        if let Some(ref token) = self.token {
            request = request.header("user_token", token);
        }
        Self::finish(url, request).await
    }

    async fn finish(url: String, request: reqwest::RequestBuilder) -> SuiteResult<ApiReply> {
        let response = request.send().await.map_err(|e| SuiteError::Api {
            message: format!("{url}: {e}"),
        })?;
        let status = response.status().as_u16();
        let body: ApiEnvelope = response.json().await.map_err(|e| SuiteError::Api {
            message: format!("{url}: invalid envelope: {e}"),
        })?;
        info!(%url, status, code = body.code, msg = %body.msg, "reply");
        Ok(ApiReply { status, body })
    }

    /// `GET auth/verify`: validate the attached token
    pub async fn verify_token(&self) -> SuiteResult<ApiReply> {
        self.get("auth/verify", &[]).await
    }

    /// `GET auth/current-user`: the logged-in user profile
    pub async fn current_user(&self) -> SuiteResult<ApiReply> {
        self.get("auth/current-user", &[]).await
    }

    /// `GET api/lottery/activities`: open draw activities
    pub async fn lottery_activities(&self) -> SuiteResult<ApiReply> {
        self.get("api/lottery/activities", &[]).await
    }

    /// `POST api/lottery/grid`: grid layout and draw session for an activity
    pub async fn lottery_grid(&self, activity_id: i64, user_id: i64) -> SuiteResult<ApiReply> {
        self.post(
            "api/lottery/grid",
            &json!({ "activityId": activity_id, "userId": user_id }),
        )
        .await
    }

    /// `GET api/lottery/chances`: remaining draw chances
    pub async fn remaining_chances(&self, user_id: i64, activity_id: i64) -> SuiteResult<ApiReply> {
        self.get(
            "api/lottery/chances",
            &[
                ("userId", user_id.to_string()),
                ("activityId", activity_id.to_string()),
            ],
        )
        .await
    }

    /// `POST api/lottery/draw`: perform a draw inside a grid session
    pub async fn draw(
        &self,
        user_id: i64,
        activity_id: i64,
        session_id: &str,
    ) -> SuiteResult<ApiReply> {
        self.post(
            "api/lottery/draw",
            &json!({ "userId": user_id, "activityId": activity_id, "sessionId": session_id }),
        )
        .await
    }
}
