//! Autodesk Platform Services API client.
//!
//! Covers the data management endpoints for hubs and projects and the
//! element group endpoints used to walk a project's design hierarchy.

use crate::configuration::Configuration;
use crate::http_utils::{HttpClient, HttpRequestConfig};
use crate::model::{ResourceItem, ResourceList};
use tracing::{debug, trace};

/// Error emitted by the APS API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("unexpected response status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub struct ApsApiClient {
    http_client: HttpClient,
    access_token: Option<String>,
}

impl ApsApiClient {
    pub fn new(http_config: HttpRequestConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: HttpClient::new(http_config)?,
            access_token: None,
        })
    }

    pub fn from_configuration(configuration: &Configuration) -> Result<Self, ApiError> {
        Self::new(HttpRequestConfig::from_configuration(configuration))
    }

    pub fn with_access_token(mut self, token: String) -> Self {
        self.access_token = Some(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.http_client.config().base_url
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.http_client.get(path, self.access_token.as_deref()).await
    }

    /// List the hubs visible to the authenticated application
    pub async fn get_hubs(&self) -> Result<ResourceList, ApiError> {
        debug!("Retrieving hubs...");
        let hubs: ResourceList = self.get("/project/v1/hubs").await?;
        trace!("Retrieved {} hub(s)", hubs.len());
        Ok(hubs)
    }

    /// List the projects of one hub
    pub async fn get_projects(&self, hub_id: &str) -> Result<ResourceList, ApiError> {
        debug!("Retrieving projects for hub {}...", hub_id);
        let projects: ResourceList = self
            .get(&format!("/project/v1/hubs/{}/projects", hub_id))
            .await?;
        trace!("Retrieved {} project(s) for hub {}", projects.len(), hub_id);
        Ok(projects)
    }

    /// Get the root element group of a project
    pub async fn get_root_element_group(&self, project_id: &str) -> Result<ResourceItem, ApiError> {
        debug!("Retrieving the root element group of project {}...", project_id);
        self.get(&format!(
            "/element/v1/projects/{}/elementGroups/root",
            project_id
        ))
        .await
    }

    /// List the direct children of an element group
    pub async fn get_element_group_children(
        &self,
        project_id: &str,
        group_id: &str,
    ) -> Result<ResourceList, ApiError> {
        trace!("Retrieving children of element group {}...", group_id);
        self.get(&format!(
            "/element/v1/projects/{}/elementGroups/{}/children",
            project_id, group_id
        ))
        .await
    }
}
