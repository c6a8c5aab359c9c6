//! HTTP client for the Jira v2 REST API.

use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use t2j_core::{IssueKey, Worklog, WorklogRemote};

use crate::config::JiraConfig;
use crate::error::{JiraError, Result};
use crate::models::{WorklogBody, WorklogPage};

/// Client for a single Jira instance, authenticating every request with the
/// configured basic-auth credentials.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: HttpClient,
    config: JiraConfig,
}

impl JiraClient {
    /// Builds a client from connection settings.
    pub fn new(config: JiraConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(JiraError::ClientBuild)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    /// Retrieves the worklogs recorded against an issue.
    pub async fn get_worklogs(&self, issue_key: &IssueKey) -> Result<Vec<Worklog>> {
        let path = format!("issue/{issue_key}/worklog");
        let response = self.request(Method::GET, &path).send().await?;
        let page: WorklogPage = Self::decode_json(response).await?;
        Ok(page.into_worklogs(issue_key))
    }

    /// Posts a new worklog against its issue.
    pub async fn add_worklog(&self, worklog: &Worklog) -> Result<()> {
        let path = format!("issue/{}/worklog", worklog.issue_key());
        let response = self
            .request(Method::POST, &path)
            .json(&WorklogBody::from_worklog(worklog))
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    /// Replaces an existing remote worklog's comment, start, and duration.
    pub async fn update_worklog(
        &self,
        issue_key: &IssueKey,
        worklog_id: &str,
        worklog: &Worklog,
    ) -> Result<()> {
        let path = format!("issue/{issue_key}/worklog/{worklog_id}");
        let response = self
            .request(Method::PUT, &path)
            .json(&WorklogBody::from_worklog(worklog))
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    /// Deletes a remote worklog.
    pub async fn delete_worklog(&self, issue_key: &IssueKey, worklog_id: &str) -> Result<()> {
        let path = format!("issue/{issue_key}/worklog/{worklog_id}");
        let response = self.request(Method::DELETE, &path).send().await?;
        Self::ensure_success(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_root(), path);
        self.http
            .request(method, url)
            .basic_auth(&self.config.username, Some(&self.config.password))
    }

    async fn decode_json<T>(response: Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        if status.is_success() {
            response.json::<T>().await.map_err(JiraError::from)
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    async fn ensure_success(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    async fn status_error(status: StatusCode, response: Response) -> JiraError {
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_messages(&body).unwrap_or(body);
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            JiraError::Authentication(format!("access denied ({status}): {message}"))
        } else {
            JiraError::Http { status, message }
        }
    }
}

/// Pulls the human-readable messages out of a Jira error body, when the body
/// is the usual `{"errorMessages": [...]}` shape.
fn extract_error_messages(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default, rename = "errorMessages")]
        error_messages: Vec<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .filter(|parsed| !parsed.error_messages.is_empty())
        .map(|parsed| parsed.error_messages.join("; "))
}

impl WorklogRemote for JiraClient {
    type Error = JiraError;

    /// Fails open: any retrieval error degrades to "no existing worklogs",
    /// trading a possible duplicate upload for an uninterrupted run.
    async fn fetch_existing(&self, issue_key: &IssueKey) -> Vec<Worklog> {
        match self.get_worklogs(issue_key).await {
            Ok(worklogs) => worklogs,
            Err(err) => {
                tracing::warn!(
                    issue = %issue_key,
                    error = %err,
                    "failed to retrieve existing worklogs; assuming none"
                );
                Vec::new()
            }
        }
    }

    async fn upload(&self, worklog: &Worklog) -> Result<()> {
        self.add_worklog(worklog).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use t2j_core::parse_timestamp;

    fn client_for(server: &mockito::ServerGuard) -> JiraClient {
        JiraClient::new(JiraConfig::new(server.url(), "user", "pass")).unwrap()
    }

    fn sample_worklog() -> Worklog {
        Worklog::new(
            IssueKey::new("PROJ-123").unwrap(),
            parse_timestamp("2024-03-01T09:00:00Z").unwrap(),
            3600,
        )
        .with_description("Fix login bug")
    }

    #[tokio::test]
    async fn get_worklogs_decodes_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/2/issue/PROJ-123/worklog")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"worklogs": [
                    {"comment": "earlier work", "started": "2024-03-01T08:00:00.000+0000", "timeSpentSeconds": 1800}
                ]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let key = IssueKey::new("PROJ-123").unwrap();
        let worklogs = client.get_worklogs(&key).await.unwrap();

        mock.assert_async().await;
        assert_eq!(worklogs.len(), 1);
        assert_eq!(worklogs[0].description(), "earlier work");
        assert_eq!(worklogs[0].duration_secs(), 1800);
    }

    #[tokio::test]
    async fn get_worklogs_maps_auth_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/issue/PROJ-123/worklog")
            .with_status(401)
            .with_body(r#"{"errorMessages": ["Login required"]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let key = IssueKey::new("PROJ-123").unwrap();
        let err = client.get_worklogs(&key).await.unwrap_err();

        match err {
            JiraError::Authentication(message) => assert!(message.contains("Login required")),
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_existing_fails_open() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/issue/PROJ-123/worklog")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client_for(&server);
        let key = IssueKey::new("PROJ-123").unwrap();
        assert!(client.fetch_existing(&key).await.is_empty());
    }

    #[tokio::test]
    async fn add_worklog_posts_jira_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/2/issue/PROJ-123/worklog")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "comment": "Fix login bug",
                "started": "2024-03-01T09:00:00.000+0000",
                "timeSpentSeconds": 3600
            })))
            .with_status(201)
            .with_body(r#"{"id": "10001"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client.add_worklog(&sample_worklog()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn add_worklog_surfaces_http_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest/api/2/issue/PROJ-123/worklog")
            .with_status(400)
            .with_body(r#"{"errorMessages": ["Worklog must not be null"]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.add_worklog(&sample_worklog()).await.unwrap_err();

        match err {
            JiraError::Http { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Worklog must not be null");
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_worklog_puts_to_the_row_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/rest/api/2/issue/PROJ-123/worklog/10001")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "comment": "Fix login bug",
                "started": "2024-03-01T09:00:00.000+0000",
                "timeSpentSeconds": 3600
            })))
            .with_status(200)
            .with_body(r#"{"id": "10001"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let key = IssueKey::new("PROJ-123").unwrap();
        client
            .update_worklog(&key, "10001", &sample_worklog())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_worklog_hits_the_row_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/rest/api/2/issue/PROJ-123/worklog/10001")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server);
        let key = IssueKey::new("PROJ-123").unwrap();
        client.delete_worklog(&key, "10001").await.unwrap();
        mock.assert_async().await;
    }
}
