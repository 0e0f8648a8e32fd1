//! GraphQL client for the projects API.
//!
//! Two operations exist: the `GetProjects` list query and the
//! `CreateProject` mutation. Both are posted as JSON to one endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{NewProject, Project};

pub const GET_PROJECTS: &str = r#"query GetProjects {
  projects {
    id
    name
    description
    startDate
    endDate
  }
}"#;

pub const CREATE_PROJECT: &str = r#"mutation CreateProject($name: String!, $description: String!, $startDate: String!, $endDate: String!) {
  createProject(name: $name, description: $description, startDate: $startDate, endDate: $endDate) {
    id
    name
    description
    startDate
    endDate
  }
}"#;

/// Failure of a GraphQL operation. The `Display` text is what the user sees
/// after `Error: `.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Response not successful: Received status code {status}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    GraphQl(String),

    #[error("Response contained no data")]
    MissingData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    operation_name: &'a str,
    variables: V,
}

#[derive(Debug, Serialize)]
struct NoVariables {}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProjectsData {
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectData {
    create_project: Project,
}

/// HTTP client bound to one GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.graphql_endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `GetProjects` and return the projects in server order.
    pub async fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        let data: ProjectsData = self
            .execute("GetProjects", GET_PROJECTS, NoVariables {})
            .await?;
        info!(count = data.projects.len(), "fetched projects");
        Ok(data.projects)
    }

    /// Run `CreateProject` and return the created record.
    pub async fn create_project(&self, input: &NewProject) -> Result<Project, ApiError> {
        let data: CreateProjectData = self.execute("CreateProject", CREATE_PROJECT, input).await?;
        info!(id = %data.create_project.id, "created project");
        Ok(data.create_project)
    }

    async fn execute<V, T>(&self, operation_name: &str, query: &str, variables: V) -> Result<T, ApiError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        debug!(operation = operation_name, endpoint = %self.endpoint, "sending GraphQL request");

        let request = GraphqlRequest {
            query,
            operation_name,
            variables,
        };

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(error = %err, status = status.as_u16(), "failed to read error response body");
                    String::new()
                }
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GraphqlResponse<T> = response.json().await?;
        into_data(body)
    }
}

fn into_data<T>(response: GraphqlResponse<T>) -> Result<T, ApiError> {
    if !response.errors.is_empty() {
        let message = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::GraphQl(message));
    }

    response.data.ok_or(ApiError::MissingData)
}
