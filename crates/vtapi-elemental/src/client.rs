//! Elemental Conductor HTTP client.

use std::borrow::Cow;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;
use vtapi_provider::metrics::record_backend_request;
use vtapi_provider::ElementalConductorConfig;

use crate::auth::{auth_key, HEADER_EXPIRES, HEADER_KEY, HEADER_USER};
use crate::error::{ElementalError, ElementalResult};
use crate::types::{Cancel, ElementalPreset, Job, JobRef, JobReport, Node, NodeList};
use crate::NAME;

const XML: &str = "application/xml";

/// Percent-encode a job or preset id as exactly one path segment.
fn segment(id: &str) -> ElementalResult<Cow<'_, str>> {
    match id {
        "" | "." | ".." => Err(ElementalError::InvalidId(id.to_string())),
        _ => Ok(urlencoding::encode(id)),
    }
}

/// Operations the provider needs from the Conductor API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ElementalApi: Send + Sync {
    async fn post_job(&self, job: &Job) -> ElementalResult<JobRef>;

    async fn get_job(&self, job_id: &str) -> ElementalResult<JobReport>;

    async fn cancel_job(&self, job_id: &str) -> ElementalResult<()>;

    async fn post_preset(&self, preset: &ElementalPreset) -> ElementalResult<ElementalPreset>;

    async fn get_preset(&self, preset_id: &str) -> ElementalResult<ElementalPreset>;

    async fn delete_preset(&self, preset_id: &str) -> ElementalResult<()>;

    async fn get_nodes(&self) -> ElementalResult<Vec<Node>>;
}

/// Signed XML client for the Conductor REST API.
#[derive(Clone)]
pub struct ElementalClient {
    http: Client,
    api_url: String,
    user_login: String,
    api_key: String,
    auth_expires: i64,
}

impl ElementalClient {
    /// Create a client. The configuration must already be validated.
    pub fn new(config: &ElementalConductorConfig) -> ElementalResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("vtapi-elemental/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ElementalError::Network)?;

        Ok(Self {
            http,
            api_url: format!("{}/api", config.host.trim().trim_end_matches('/')),
            user_login: config.user_login.clone(),
            api_key: config.api_key.clone(),
            auth_expires: i64::try_from(config.auth_expires).unwrap_or(i64::MAX / 2),
        })
    }

    /// Send a signed request and return the response body.
    ///
    /// `path` is relative to `/api`, already percent-encoded, and is the value
    /// signed in the auth key.
    async fn send(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ElementalResult<String> {
        let url = format!("{}{}", self.api_url, path);
        let expires = Utc::now().timestamp().saturating_add(self.auth_expires);

        debug!(provider = NAME, %method, %url, "Sending Elemental request");

        let mut request = self
            .http
            .request(method, &url)
            .header(HEADER_USER, &self.user_login)
            .header(HEADER_EXPIRES, expires.to_string())
            .header(HEADER_KEY, auth_key(path, &self.user_login, &self.api_key, expires))
            .header(ACCEPT, XML);

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, XML).body(body);
        }

        let started = Instant::now();
        let result: ElementalResult<String> = async {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            if !status.is_success() {
                return Err(ElementalError::from_response(status.as_u16(), &text));
            }
            Ok(text)
        }
        .await;

        record_backend_request(NAME, operation, result.is_ok(), started);
        result
    }

    async fn send_xml<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ElementalResult<T> {
        let text = self.send(operation, method, path, body).await?;
        Ok(quick_xml::de::from_str(&text)?)
    }
}

#[async_trait]
impl ElementalApi for ElementalClient {
    async fn post_job(&self, job: &Job) -> ElementalResult<JobRef> {
        let body = quick_xml::se::to_string(job)?;
        let job_ref: JobRef = self.send_xml("post_job", Method::POST, "/jobs", Some(body)).await?;
        if job_ref.id().is_empty() {
            return Err(ElementalError::InvalidResponse(format!(
                "job created without an id (href {:?})",
                job_ref.href
            )));
        }
        Ok(job_ref)
    }

    async fn get_job(&self, job_id: &str) -> ElementalResult<JobReport> {
        self.send_xml("get_job", Method::GET, &format!("/jobs/{}", segment(job_id)?), None)
            .await
    }

    async fn cancel_job(&self, job_id: &str) -> ElementalResult<()> {
        let body = quick_xml::se::to_string(&Cancel::default())?;
        self.send("cancel_job", Method::POST, &format!("/jobs/{}/cancel", segment(job_id)?), Some(body))
            .await?;
        Ok(())
    }

    async fn post_preset(&self, preset: &ElementalPreset) -> ElementalResult<ElementalPreset> {
        let body = quick_xml::se::to_string(preset)?;
        self.send_xml("post_preset", Method::POST, "/presets", Some(body))
            .await
    }

    async fn get_preset(&self, preset_id: &str) -> ElementalResult<ElementalPreset> {
        self.send_xml("get_preset", Method::GET, &format!("/presets/{}", segment(preset_id)?), None)
            .await
    }

    async fn delete_preset(&self, preset_id: &str) -> ElementalResult<()> {
        self.send("delete_preset", Method::DELETE, &format!("/presets/{}", segment(preset_id)?), None)
            .await?;
        Ok(())
    }

    async fn get_nodes(&self) -> ElementalResult<Vec<Node>> {
        let list: NodeList = self.send_xml("get_nodes", Method::GET, "/nodes", None).await?;
        Ok(list.nodes)
    }
}
