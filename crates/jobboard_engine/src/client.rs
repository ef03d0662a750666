use std::collections::BTreeMap;
use std::time::Duration;

use futures_util::StreamExt;
use jobboard_core::{Criteria, Field, FieldValue, Job, JobId, QueryParams};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ApiError, FailureKind};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Root of the jobs service, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Sent as `location` when the criteria leave location unset.
    pub default_region: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            default_region: None,
        }
    }
}

/// The remote collaborator that owns job data and saved preferences.
#[async_trait::async_trait]
pub trait JobsApi: Send + Sync {
    /// `GET /jobs` with every addressable key as a query parameter.
    async fn fetch_jobs(&self, query: &QueryParams) -> Result<Vec<Job>, ApiError>;

    /// `POST /jobs/{id}/dismiss`.
    async fn dismiss_job(&self, job_id: JobId) -> Result<(), ApiError>;

    /// `GET /user/filter-preferences`, returned as a patch over current criteria.
    async fn load_preferences(&self) -> Result<QueryParams, ApiError>;

    /// `POST /user/filter-preferences` with every field spelled out.
    async fn save_preferences(&self, criteria: &Criteria) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct JobsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    jobs: Vec<Job>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PreferencesResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    filters: serde_json::Map<String, Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Acknowledgment body; an empty or non-JSON body counts as success.
#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default = "acknowledged")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn acknowledged() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct PreferencesBody<'a> {
    filters: BTreeMap<&'static str, FieldValue<'a>>,
}

#[derive(Debug, Clone)]
pub struct ReqwestJobsApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestJobsApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ApiError::new(FailureKind::InvalidUrl, "base url cannot carry a path")
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn jobs_url(&self, query: &QueryParams) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["jobs"])?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter() {
                pairs.append_pair(key, value);
            }
            if let Some(region) = &self.settings.default_region {
                if !query.contains_key(Field::Location.key()) {
                    pairs.append_pair(Field::Location.key(), region);
                }
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    /// Checks the status and reads the body, capped at `max_bytes`.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_body(response).await
    }

    async fn post(&self, url: Url, body: Option<Vec<u8>>) -> Result<(), ApiError> {
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        let bytes = self.read_body(response).await?;
        match serde_json::from_slice::<Ack>(&bytes) {
            Ok(Ack { success: false, message }) => Err(rejected(message)),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl JobsApi for ReqwestJobsApi {
    async fn fetch_jobs(&self, query: &QueryParams) -> Result<Vec<Job>, ApiError> {
        let bytes = self.get(self.jobs_url(query)?).await?;
        let body: JobsResponse = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        if !body.success {
            return Err(rejected(body.message));
        }
        Ok(body.jobs)
    }

    async fn dismiss_job(&self, job_id: JobId) -> Result<(), ApiError> {
        let id = job_id.to_string();
        self.post(self.endpoint(&["jobs", id.as_str(), "dismiss"])?, None)
            .await
    }

    async fn load_preferences(&self) -> Result<QueryParams, ApiError> {
        let bytes = self
            .get(self.endpoint(&["user", "filter-preferences"])?)
            .await?;
        let body: PreferencesResponse = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        if !body.success {
            return Err(rejected(body.message));
        }
        Ok(filters_to_patch(body.filters))
    }

    async fn save_preferences(&self, criteria: &Criteria) -> Result<(), ApiError> {
        let body = PreferencesBody {
            filters: Field::ALL
                .into_iter()
                .filter(|field| *field != Field::Search)
                .map(|field| (field.key(), criteria.value(field)))
                .collect(),
        };
        let bytes = serde_json::to_vec(&body)
            .map_err(|err| ApiError::new(FailureKind::Encode, err.to_string()))?;
        self.post(self.endpoint(&["user", "filter-preferences"])?, Some(bytes))
            .await
    }
}

/// Scalar values become patch entries; a list (multi-select company) keeps its
/// first string. Anything else is skipped.
pub(crate) fn filters_to_patch(filters: serde_json::Map<String, Value>) -> QueryParams {
    filters
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(text) => text,
                Value::Bool(flag) => flag.to_string(),
                Value::Array(items) => items
                    .into_iter()
                    .find_map(|item| item.as_str().map(str::to_string))?,
                Value::Null | Value::Number(_) | Value::Object(_) => return None,
            };
            Some((key, text))
        })
        .collect()
}

fn rejected(message: Option<String>) -> ApiError {
    ApiError::new(
        FailureKind::Rejected,
        message.unwrap_or_else(|| "request was not successful".to_string()),
    )
}

fn too_large(max_bytes: u64, actual: u64) -> ApiError {
    ApiError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
