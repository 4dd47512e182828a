// src/api/client.rs
// reqwest-backed Productive gateway

use super::ProductiveGateway;
use super::filters::{
    DealFilter, ListFilter, ProjectFilter, ServiceFilter, TaskFilter, TimeEntryFilter,
};
use super::types::{
    Deal, ListDocument, NewTimeEntry, Page, Person, Project, Service, SingleDocument, Task,
    TimeEntry,
};
use crate::config::ApiConfig;
use crate::error::{ProductiveError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

const JSON_API: &str = "application/vnd.api+json";

/// The part of a create response we rely on
#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

/// Productive REST client
pub struct ProductiveClient {
    http: Client,
    base_url: Url,
    token: String,
    org_id: String,
}

impl ProductiveClient {
    pub fn new(config: &ApiConfig, http: Client) -> Result<Self> {
        let (token, org_id) = config.credentials()?;

        // Url::join replaces the last segment unless the base ends in '/'
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base).map_err(|e| {
            ProductiveError::Config(format!("invalid PRODUCTIVE_API_BASE_URL '{}': {}", base, e))
        })?;

        Ok(Self {
            http,
            base_url,
            token: token.to_string(),
            org_id: org_id.to_string(),
        })
    }

    /// Absolute URL for `path` with query parameters appended
    pub fn endpoint(&self, path: &str, query: &[(&'static str, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                ProductiveError::Config(format!("bad endpoint '{}': {}", path, e))
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("X-Auth-Token", &self.token)
            .header("X-Organization-Id", &self.org_id)
            .header("Accept", JSON_API)
            .header("Content-Type", JSON_API)
    }

    /// Send and return the body, mapping non-2xx responses to UpstreamRejected
    async fn send(&self, method: Method, url: Url, body: Option<String>) -> Result<String> {
        let start = Instant::now();
        let path = url.path().to_string();
        let mut builder = self.request(method.clone(), url);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Productive request"
        );

        if !status.is_success() {
            let detail = extract_error_detail(&text);
            warn!(
                status = status.as_u16(),
                path = %path,
                detail = %detail,
                "Productive API rejected request"
            );
            return Err(ProductiveError::UpstreamRejected {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(text)
    }

    async fn list<T, F>(&self, path: &str, filter: &F) -> Result<Page<T>>
    where
        T: DeserializeOwned,
        F: ListFilter + Sync,
    {
        let url = self.endpoint(path, &filter.query())?;
        let body = self.send(Method::GET, url, None).await?;
        let doc: ListDocument<T> = serde_json::from_str(&body)?;
        Ok(doc.into())
    }
}

/// Pull a readable message out of a JSON:API error body.
///
/// Joins `errors[].detail` (falling back to `title`); returns the raw body
/// when it is not a JSON:API error document.
pub fn extract_error_detail(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let messages: Vec<String> = parsed
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| {
                    e.get("detail")
                        .or_else(|| e.get("title"))
                        .and_then(Value::as_str)
                        .map(String::from)
                })
                .collect()
        })
        .unwrap_or_default();

    if !messages.is_empty() {
        return messages.join("; ");
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl ProductiveGateway for ProductiveClient {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Page<Project>> {
        self.list("projects", filter).await
    }

    async fn list_deals(&self, filter: &DealFilter) -> Result<Page<Deal>> {
        self.list("deals", filter).await
    }

    async fn list_services(&self, filter: &ServiceFilter) -> Result<Page<Service>> {
        self.list("services", filter).await
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Page<Task>> {
        self.list("tasks", filter).await
    }

    async fn list_time_entries(&self, filter: &TimeEntryFilter) -> Result<Page<TimeEntry>> {
        self.list("time_entries", filter).await
    }

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<TimeEntry> {
        let url = self.endpoint("time_entries", &[])?;
        let payload = serde_json::to_string(&entry.to_document())?;
        let body = self.send(Method::POST, url, Some(payload)).await?;
        // Only the id is read back; the rest of the record is what was sent
        let doc: SingleDocument<Created> = serde_json::from_str(&body)?;
        Ok(entry.clone().into_record(doc.data.id))
    }

    async fn get_person(&self, id: &str) -> Result<Person> {
        let url = self.endpoint(&format!("people/{}", id), &[])?;
        let body = self.send(Method::GET, url, None).await?;
        let doc: SingleDocument<Person> = serde_json::from_str(&body)?;
        Ok(doc.data)
    }
}
