// ABOUTME: Reqwest-based fleet API client.
// ABOUTME: Bearer-token auth; JSON in, JSON out; no retries, failures surface verbatim.

use super::error::FleetError;
use super::models::{Fleet, LegacyDeployRequest, Release, ReleaseId, ReleaseRequest, User};
use super::ReleaseApi;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("stevedore/", env!("CARGO_PKG_VERSION"));

/// Client for the fleet-management service. Holds the base URL and token;
/// every call is a single request/response, never retried.
pub struct FleetClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl FleetClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self, FleetError> {
        if api_url.is_empty() || !api_url.starts_with("http") {
            return Err(FleetError::BadUrl {
                url: api_url.to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FleetError::Request { source })?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FleetError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| FleetError::Request { source })?;

        decode_response(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FleetError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|source| FleetError::Request { source })?;

        decode_response(response).await
    }

    /// Fetch a fleet's metadata and capability flags by slug.
    pub async fn get_fleet(&self, slug: &str) -> Result<Fleet, FleetError> {
        let path = format!("v1/fleets/{}", urlencoding::encode(slug));
        match self.get_json(&path).await {
            // A 404 here almost always means a typo'd slug; say so instead of
            // echoing the raw status line.
            Err(FleetError::Api { status: 404, .. }) => Err(FleetError::FleetNotFound {
                slug: slug.to_string(),
            }),
            other => other,
        }
    }

    /// Identify the authenticated user.
    pub async fn whoami(&self) -> Result<User, FleetError> {
        self.get_json("v1/whoami").await
    }
}

#[async_trait]
impl ReleaseApi for FleetClient {
    async fn deploy_legacy(&self, request: &LegacyDeployRequest) -> Result<ReleaseId, FleetError> {
        #[derive(serde::Deserialize)]
        struct DeployResponse {
            id: ReleaseId,
        }

        let response: DeployResponse = self.post_json("v1/deploys", request).await?;
        Ok(response.id)
    }

    async fn get_release(&self, id: ReleaseId) -> Result<Release, FleetError> {
        self.get_json(&format!("v1/releases/{id}")).await
    }

    async fn create_release(&self, request: &ReleaseRequest) -> Result<Release, FleetError> {
        self.post_json("v1/releases", request).await
    }
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FleetError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(FleetError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|source| FleetError::Decode { source })
}
