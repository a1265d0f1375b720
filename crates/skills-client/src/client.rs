//! Typed client for the skills service REST API.
//!
//! Every operation follows the same shape: build the URL, attach the bearer
//! token and API key, send through the configured [`Transport`], check the
//! status where the endpoint defines one, and decode the JSON body.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::SkillsClientConfig;
use crate::error::{Result, SkillsClientError};
use crate::transport::{
    DEFAULT_TIMEOUT_SECS, ReqwestTransport, Transport, TransportRequest, TransportResponse,
};
use crate::types::{Skill, SkillProject};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Client for the skills service.
///
/// Cheap to clone; clones share the transport.  Holds no per-call state, so
/// one instance can serve any number of concurrent tasks.
#[derive(Clone)]
pub struct SkillsClient {
    /// Service root without a trailing slash.
    base_url: String,
    /// `Authorization` and `x-api-key`, attached to every request.
    auth_headers: HeaderMap,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for SkillsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SkillsClient {
    /// Create a client using the default reqwest transport with a 10-second
    /// timeout.
    pub fn new(base_url: &str, token: &str, api_key: &str) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
        Self::with_transport(base_url, token, api_key, Arc::new(transport))
    }

    /// Create a client that sends through a caller-supplied transport.
    pub fn with_transport(
        base_url: &str,
        token: &str,
        api_key: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_headers: auth_headers(token, api_key)?,
            transport,
        })
    }

    /// Create a client from a validated configuration.
    pub fn from_config(config: &SkillsClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Self::with_transport(
            &config.base_url,
            &config.token,
            &config.api_key,
            Arc::new(transport),
        )
    }

    /// The service root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Skills
    // -----------------------------------------------------------------------

    /// `POST /skills`, expecting `201 Created`.
    pub async fn create_skill(&self, skill: &Skill) -> Result<Skill> {
        const OP: &str = "create_skill";
        let url = self.url(OP, "/skills")?;
        let body = encode(OP, skill)?;
        let response = self.send(self.request(OP, Method::POST, url, Some(body))).await?;
        expect_status(OP, &response, StatusCode::CREATED)?;
        decode(OP, &response)
    }

    /// `GET /skills/{id}`, expecting `200 OK`.
    pub async fn get_skill_by_id(&self, id: Uuid) -> Result<Skill> {
        const OP: &str = "get_skill_by_id";
        let url = self.url(OP, &format!("/skills/{id}"))?;
        let response = self.send(self.request(OP, Method::GET, url, None)).await?;
        expect_status(OP, &response, StatusCode::OK)?;
        decode(OP, &response)
    }

    /// `GET /skills`.
    ///
    /// The status code is not checked: whatever the server answers is
    /// decoded as a list of skills.
    pub async fn get_all_skills(&self) -> Result<Vec<Skill>> {
        const OP: &str = "get_all_skills";
        let url = self.url(OP, "/skills")?;
        let response = self.send(self.request(OP, Method::GET, url, None)).await?;
        decode_list(OP, &response)
    }

    /// `PATCH /skills/{id}`.
    ///
    /// The payload's `id` is overwritten with `id` before sending.  Like
    /// [`get_all_skills`](Self::get_all_skills), the status code is not
    /// checked before decoding.
    pub async fn update_skill(&self, id: Uuid, mut skill: Skill) -> Result<Skill> {
        const OP: &str = "update_skill";
        skill.id = id;
        let url = self.url(OP, &format!("/skills/{id}"))?;
        let body = encode(OP, &skill)?;
        let response = self.send(self.request(OP, Method::PATCH, url, Some(body))).await?;
        decode(OP, &response)
    }

    /// `DELETE /skills/{id}`, expecting `200 OK`.
    pub async fn delete_skill(&self, id: Uuid) -> Result<()> {
        const OP: &str = "delete_skill";
        let url = self.url(OP, &format!("/skills/{id}"))?;
        let response = self.send(self.request(OP, Method::DELETE, url, None)).await?;
        expect_status(OP, &response, StatusCode::OK)
    }

    /// `GET /skills/search/{query}`, expecting `200 OK`.
    ///
    /// `query` is inserted into the path as is, without percent-encoding.
    /// A `/` in the query therefore adds path segments.
    pub async fn search_skills(&self, query: &str) -> Result<Vec<Skill>> {
        const OP: &str = "search_skills";
        let url = self.url(OP, &format!("/skills/search/{query}"))?;
        let response = self.send(self.request(OP, Method::GET, url, None)).await?;
        expect_status(OP, &response, StatusCode::OK)?;
        decode_list(OP, &response)
    }

    /// `GET /skills/category/{category_id}`, expecting `200 OK`.
    pub async fn get_skills_by_category(&self, category_id: Uuid) -> Result<Vec<Skill>> {
        const OP: &str = "get_skills_by_category";
        let url = self.url(OP, &format!("/skills/category/{category_id}"))?;
        let response = self.send(self.request(OP, Method::GET, url, None)).await?;
        expect_status(OP, &response, StatusCode::OK)?;
        decode_list(OP, &response)
    }

    /// `GET /skills/user/{user_id}`, expecting `200 OK`.
    pub async fn get_skills_by_user_id(&self, user_id: &str) -> Result<Vec<Skill>> {
        const OP: &str = "get_skills_by_user_id";
        let url = self.url(OP, &format!("/skills/user/{user_id}"))?;
        let response = self.send(self.request(OP, Method::GET, url, None)).await?;
        expect_status(OP, &response, StatusCode::OK)?;
        decode_list(OP, &response)
    }

    /// `GET /skills/popular?limit={limit}`, expecting `200 OK`.
    pub async fn get_popular_skills(&self, limit: u32) -> Result<Vec<Skill>> {
        const OP: &str = "get_popular_skills";
        let mut url = self.url(OP, "/skills/popular")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let response = self.send(self.request(OP, Method::GET, url, None)).await?;
        expect_status(OP, &response, StatusCode::OK)?;
        decode_list(OP, &response)
    }

    // -----------------------------------------------------------------------
    // Skill <-> project associations
    // -----------------------------------------------------------------------

    /// `POST /associate_skill`, expecting `200 OK`.
    pub async fn associate_skill_with_project(&self, association: SkillProject) -> Result<()> {
        const OP: &str = "associate_skill_with_project";
        let url = self.url(OP, "/associate_skill")?;
        let body = encode(OP, &association)?;
        let response = self.send(self.request(OP, Method::POST, url, Some(body))).await?;
        expect_status(OP, &response, StatusCode::OK)
    }

    /// `POST /disassociate_skill`, expecting `200 OK`.
    pub async fn disassociate_skill_from_project(&self, association: SkillProject) -> Result<()> {
        const OP: &str = "disassociate_skill_from_project";
        let url = self.url(OP, "/disassociate_skill")?;
        let body = encode(OP, &association)?;
        let response = self.send(self.request(OP, Method::POST, url, Some(body))).await?;
        expect_status(OP, &response, StatusCode::OK)
    }

    /// `GET /get_projects?skill_id={skill_id}`, expecting `200 OK`.
    pub async fn get_project_ids_for_skill(&self, skill_id: Uuid) -> Result<Vec<Uuid>> {
        const OP: &str = "get_project_ids_for_skill";
        let mut url = self.url(OP, "/get_projects")?;
        url.query_pairs_mut()
            .append_pair("skill_id", &skill_id.to_string());
        let response = self.send(self.request(OP, Method::GET, url, None)).await?;
        expect_status(OP, &response, StatusCode::OK)?;
        decode_list(OP, &response)
    }

    /// `GET /get_skills_for_project?project_id={project_id}`, expecting
    /// `200 OK`.
    pub async fn get_skills_for_project(&self, project_id: Uuid) -> Result<Vec<Skill>> {
        const OP: &str = "get_skills_for_project";
        let mut url = self.url(OP, "/get_skills_for_project")?;
        url.query_pairs_mut()
            .append_pair("project_id", &project_id.to_string());
        let response = self.send(self.request(OP, Method::GET, url, None)).await?;
        expect_status(OP, &response, StatusCode::OK)?;
        decode_list(OP, &response)
    }

    // -----------------------------------------------------------------------
    // Request helpers
    // -----------------------------------------------------------------------

    /// Join `path` onto the base URL.
    fn url(&self, operation: &'static str, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| SkillsClientError::Transport {
            operation,
            reason: format!("invalid URL `{raw}`: {e}"),
        })
    }

    /// Build a request carrying the auth headers.  `Content-Type` is only
    /// set when there is a body.
    fn request(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> TransportRequest {
        let mut headers = self.auth_headers.clone();
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        TransportRequest {
            operation,
            method,
            url,
            headers,
            body,
        }
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        debug!(
            operation = request.operation,
            method = %request.method,
            url = %request.url,
            "sending skills request"
        );
        self.transport.send(request).await
    }
}

// ---------------------------------------------------------------------------
// Free helpers
// ---------------------------------------------------------------------------

fn auth_headers(token: &str, api_key: &str) -> Result<HeaderMap> {
    let mut authorization =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| SkillsClientError::Config {
            reason: format!("token is not a valid header value: {e}"),
        })?;
    authorization.set_sensitive(true);

    let mut key = HeaderValue::from_str(api_key).map_err(|e| SkillsClientError::Config {
        reason: format!("api key is not a valid header value: {e}"),
    })?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
    Ok(headers)
}

fn encode<T: Serialize>(operation: &'static str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SkillsClientError::Encode {
        operation,
        reason: e.to_string(),
    })
}

fn expect_status(
    operation: &'static str,
    response: &TransportResponse,
    expected: StatusCode,
) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    warn!(
        operation,
        status = response.status.as_u16(),
        expected = expected.as_u16(),
        "unexpected status from skills service"
    );
    Err(SkillsClientError::Status {
        operation,
        status: response.status.as_u16(),
        body: response.text(),
    })
}

fn decode<T: DeserializeOwned>(operation: &'static str, response: &TransportResponse) -> Result<T> {
    serde_json::from_slice(&response.body).map_err(|e| SkillsClientError::Decode {
        operation,
        reason: e.to_string(),
    })
}

/// Decode a JSON array; `null` yields an empty list.
fn decode_list<T: DeserializeOwned>(
    operation: &'static str,
    response: &TransportResponse,
) -> Result<Vec<T>> {
    decode::<Option<Vec<T>>>(operation, response).map(Option::unwrap_or_default)
}
