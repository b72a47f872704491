//! Terraform Cloud API client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::client::middleware::AuthMiddleware;
use crate::client::workspace::{Method, WorkspaceOperation, WorkspaceParams};
use crate::config::ApiConfig;
use crate::error::{Result, TecliError};

/// JSON:API media type required by Terraform Cloud.
const JSON_API: &str = "application/vnd.api+json";

/// The remote capability the `workspace` command needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// Forwards `operation` with `params`.
    ///
    /// Returns the entity the server sent back, or `None` for operations that
    /// answer with an empty body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is missing a required flag, cannot be
    /// sent, or the server rejects it.
    async fn invoke(
        &self,
        operation: WorkspaceOperation,
        params: &WorkspaceParams,
    ) -> Result<Option<Value>>;
}

/// HTTP client for the Terraform Cloud API.
pub struct TfeClient {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl TfeClient {
    /// Create a new API client authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, token: &str) -> Result<Self> {
        let inner_client = Client::builder()
            .user_agent(format!("tecli/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let client = ClientBuilder::new(inner_client)
            .with(AuthMiddleware::new(token))
            .build();

        Ok(Self {
            client,
            base_url: with_trailing_slash(config.base_url.clone()),
        })
    }

    /// Get the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn builder(&self, method: Method, url: Url) -> RequestBuilder {
        match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        }
    }
}

#[async_trait]
impl WorkspaceApi for TfeClient {
    async fn invoke(
        &self,
        operation: WorkspaceOperation,
        params: &WorkspaceParams,
    ) -> Result<Option<Value>> {
        let request = operation.request(params)?;
        let url = self.base_url.join(&request.path)?;

        tracing::debug!(%operation, method = ?request.method, %url, "sending workspace request");

        let mut builder = self
            .builder(request.method, url)
            .header(http::header::ACCEPT, JSON_API);
        if let Some(body) = &request.body {
            builder = builder
                .header(http::header::CONTENT_TYPE, JSON_API)
                .body(serde_json::to_string(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(TecliError::Unauthorized);
        }
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(TecliError::ApiUnavailable);
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TecliError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        if operation.returns_nothing() || text.trim().is_empty() {
            return Ok(None);
        }

        let value: Value =
            serde_json::from_str(&text).map_err(|e| TecliError::Serialization(e.to_string()))?;
        Ok(Some(value))
    }
}

/// `Url::join` drops the last segment unless the base ends with `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ApiConfig {
        ApiConfig {
            base_url: Url::parse(&format!("{}/api/v2", server.uri())).unwrap(),
            timeout_secs: 5,
        }
    }

    fn read_by_id() -> WorkspaceParams {
        WorkspaceParams {
            id: Some("ws-123".to_string()),
            ..WorkspaceParams::default()
        }
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = with_trailing_slash(Url::parse("https://tfe.example.com/api/v2").unwrap());
        assert_eq!(url.as_str(), "https://tfe.example.com/api/v2/");
        assert_eq!(
            url.join("workspaces/ws-1").unwrap().as_str(),
            "https://tfe.example.com/api/v2/workspaces/ws-1"
        );
    }

    #[tokio::test]
    async fn read_by_id_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/workspaces/ws-123"))
            .and(header("authorization", "Bearer team-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "data": { "id": "ws-123" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TfeClient::new(&config_for(&server), "team-token").unwrap();
        let result = client
            .invoke(WorkspaceOperation::ReadById, &read_by_id())
            .await
            .unwrap();

        assert_eq!(result.unwrap()["data"]["id"], "ws-123");
    }

    #[tokio::test]
    async fn create_posts_json_api_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/organizations/acme/workspaces"))
            .and(header("content-type", JSON_API))
            .and(body_json(serde_json::json!({
                "data": { "type": "workspaces", "attributes": { "name": "network" } }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "data": { "id": "ws-new" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TfeClient::new(&config_for(&server), "t").unwrap();
        let params = WorkspaceParams {
            organization: Some("acme".to_string()),
            name: Some("network".to_string()),
            ..WorkspaceParams::default()
        };
        let result = client
            .invoke(WorkspaceOperation::Create, &params)
            .await
            .unwrap();

        assert_eq!(result.unwrap()["data"]["id"], "ws-new");
    }

    #[tokio::test]
    async fn delete_returns_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v2/workspaces/ws-123"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = TfeClient::new(&config_for(&server), "t").unwrap();
        let result = client
            .invoke(WorkspaceOperation::DeleteById, &read_by_id())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn unauthorized_is_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = TfeClient::new(&config_for(&server), "bad").unwrap();
        let err = client
            .invoke(WorkspaceOperation::ReadById, &read_by_id())
            .await
            .unwrap_err();

        assert!(matches!(err, TecliError::Unauthorized));
    }

    #[tokio::test]
    async fn not_found_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("workspace not found"))
            .mount(&server)
            .await;

        let client = TfeClient::new(&config_for(&server), "t").unwrap();
        let err = client
            .invoke(WorkspaceOperation::ReadById, &read_by_id())
            .await
            .unwrap_err();

        match err {
            TecliError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "workspace not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_flag_fails_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = TfeClient::new(&config_for(&server), "t").unwrap();
        let err = client
            .invoke(WorkspaceOperation::ReadById, &WorkspaceParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TecliError::MissingArgument { flag: "id", .. }));
    }
}
