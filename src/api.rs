//! HTTP gateway to the university-management backend
//!
//! Translates the four CRUD intents into plain HTTP calls. The backend keeps
//! a legacy path and field vocabulary for universities (`/add-user`,
//! `userId`); this module owns that mapping so the rest of the crate can
//! speak in universities and courses only.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::models::{Course, NewCourse, NewUniversity, University};

// Backend paths. Universities are listed under their canonical name but
// created through the backend's legacy user endpoint.
const UNIVERSITIES_PATH: &str = "universities";
const ADD_UNIVERSITY_PATH: &str = "add-user";
const COURSES_PATH: &str = "courses";

/// Gateway failure, kept precise for logs even though the UI collapses
/// every variant into one generic message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(StatusCode),
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// University intents of the gateway.
#[async_trait]
pub trait UniversityApi {
    async fn list_universities(&self) -> ApiResult<Vec<University>>;
    async fn create_university(&self, draft: &NewUniversity) -> ApiResult<()>;
}

/// Course intents of the gateway.
#[async_trait]
pub trait CourseApi {
    async fn list_courses(&self) -> ApiResult<Vec<Course>>;
    async fn create_course(&self, draft: &NewCourse) -> ApiResult<()>;
}

/// Concrete gateway over one shared reqwest client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(config.http_timeout())
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET a collection. The backend's order is preserved as-is.
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let url = self.url(path);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        resp.json().await.map_err(ApiError::Decode)
    }

    /// POST a create request. The backend may answer with the created record
    /// or a bare status; the body is ignored either way since callers refetch.
    async fn post_create<B: Serialize + Sync>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path);
        debug!("POST {}", url);

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl UniversityApi for ApiClient {
    async fn list_universities(&self) -> ApiResult<Vec<University>> {
        self.fetch_list(UNIVERSITIES_PATH).await
    }

    async fn create_university(&self, draft: &NewUniversity) -> ApiResult<()> {
        self.post_create(ADD_UNIVERSITY_PATH, draft).await
    }
}

#[async_trait]
impl CourseApi for ApiClient {
    async fn list_courses(&self) -> ApiResult<Vec<Course>> {
        self.fetch_list(COURSES_PATH).await
    }

    async fn create_course(&self, draft: &NewCourse) -> ApiResult<()> {
        self.post_create(COURSES_PATH, draft).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&Config::default()).unwrap()
    }

    #[test]
    fn urls_join_base_and_path() {
        let api = client();
        assert_eq!(
            api.url(UNIVERSITIES_PATH),
            "http://localhost:5000/api/universities"
        );
        assert_eq!(api.url(ADD_UNIVERSITY_PATH), "http://localhost:5000/api/add-user");
        assert_eq!(api.url(COURSES_PATH), "http://localhost:5000/api/courses");
    }

    #[test]
    fn trailing_slash_in_config_is_stripped() {
        let config = Config {
            api_url: "http://localhost:5000/api/".to_string(),
            ..Config::default()
        };
        let api = ApiClient::new(&config).unwrap();
        assert_eq!(api.url(COURSES_PATH), "http://localhost:5000/api/courses");
    }

    #[test]
    fn status_error_keeps_the_code() {
        let err = ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("500"));
    }
}
