//! Classroom API client implementation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::AuthorizedClient;
use crate::client::middleware::AuthMiddleware;
use crate::client::models::{Course, CourseWork, ListCourseWorkResponse, ListCoursesResponse};
use crate::config::ApiConfig;
use crate::error::{QuickstartError, Result};

/// Read-only Classroom operations used by the course report (enables mocking).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassroomApi: Send + Sync {
    /// Lists the first page of courses, at most `page_size` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    async fn list_courses(&self, page_size: u32) -> Result<Vec<Course>>;

    /// Lists every coursework item of a course, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails or the API rejects it.
    async fn list_course_work(&self, course_id: &str) -> Result<Vec<CourseWork>>;
}

/// Classroom REST client authorized with a single token.
pub struct ClassroomClient {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl ClassroomClient {
    /// Create a new API client from an authorized handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, authorized: &AuthorizedClient) -> Result<Self> {
        let inner_client = Client::builder()
            .user_agent(format!("classroom-quickstart/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let client = ClientBuilder::new(inner_client)
            .with(AuthMiddleware::new(Arc::new(authorized.token.clone())))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| QuickstartError::Config(format!("Invalid URL: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| QuickstartError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ClassroomApi for ClassroomClient {
    async fn list_courses(&self, page_size: u32) -> Result<Vec<Course>> {
        let mut url = self.endpoint("/v1/courses")?;
        url.query_pairs_mut()
            .append_pair("pageSize", &page_size.to_string());

        let page: ListCoursesResponse = self.get_json(url).await?;
        if page.next_page_token.is_some() {
            tracing::debug!("More than {page_size} courses available, listing the first page");
        }

        Ok(page.courses)
    }

    async fn list_course_work(&self, course_id: &str) -> Result<Vec<CourseWork>> {
        let base = self.endpoint(&format!("/v1/courses/{course_id}/courseWork"))?;
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = base.clone();
            if let Some(token) = &page_token {
                url.query_pairs_mut().append_pair("pageToken", token);
            }

            let page: ListCourseWorkResponse = self.get_json(url).await?;
            items.extend(page.course_work);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }
}

/// Map non-success responses to errors, unwrapping Google's error envelope.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(QuickstartError::Unauthorized);
    }
    if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
        return Err(QuickstartError::ApiUnavailable);
    }

    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    Err(QuickstartError::ApiError {
        status: status.as_u16(),
        message,
    })
}
