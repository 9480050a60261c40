//! GitLab REST v4 client
//!
//! Covers exactly the five calls the audit needs: group lookup plus the
//! four paginated listings. Pagination position is read from the `x-page`
//! and `x-total-pages` response headers. The `/members` endpoints are the
//! *direct* member endpoints (not `/members/all`), which is what makes the
//! report a direct-grant report.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::{MembershipApi, Page};
use crate::error::{ApiError, ApiResult};
use crate::gitlab::types::{Group, Member, Project};

/// Default GitLab API base URL
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";

/// GitLab REST API client
pub struct GitlabClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitlabClient {
    /// Create a client against `base_url`, authenticating with `token`
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path);
        let response = self.send(&url, self.http.get(&url)).await?;

        response
            .json()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Page<T>> {
        let url = self.endpoint(path);
        let request = self
            .http
            .get(&url)
            .query(&[("page", page), ("per_page", per_page)]);
        let response = self.send(&url, request).await?;

        let current_page = page_header(&url, response.headers(), "x-page")?.unwrap_or(page);
        let total_pages =
            page_header(&url, response.headers(), "x-total-pages")?.unwrap_or(current_page);

        let items = response
            .json()
            .await
            .map_err(|source| ApiError::Decode { url, source })?;

        Ok(Page {
            items,
            current_page,
            total_pages,
        })
    }
}

/// Parse a numeric pagination header, `None` when absent.
///
/// GitLab leaves the header empty when the total is not known; that is
/// treated the same as absent.
fn page_header(url: &str, headers: &HeaderMap, name: &'static str) -> ApiResult<Option<u32>> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    let text = value.to_str().map_err(|_| ApiError::PageHeader {
        url: url.to_string(),
        header: name,
        value: format!("{value:?}"),
    })?;

    if text.is_empty() {
        return Ok(None);
    }

    text.parse::<u32>()
        .map(Some)
        .map_err(|_| ApiError::PageHeader {
            url: url.to_string(),
            header: name,
            value: text.to_string(),
        })
}

/// Encode a group id that may be a full path ("my-org/platform")
fn encode_id(id: &str) -> String {
    id.replace('/', "%2F")
}

#[async_trait]
impl MembershipApi for GitlabClient {
    async fn get_group(&self, id: &str) -> ApiResult<Group> {
        self.get_one(&format!("groups/{}", encode_id(id))).await
    }

    async fn list_subgroups(
        &self,
        group_id: u64,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Page<Group>> {
        self.get_page(&format!("groups/{group_id}/subgroups"), page, per_page)
            .await
    }

    async fn list_group_projects(
        &self,
        group_id: u64,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Page<Project>> {
        self.get_page(&format!("groups/{group_id}/projects"), page, per_page)
            .await
    }

    async fn list_group_members(
        &self,
        group_id: u64,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Page<Member>> {
        self.get_page(&format!("groups/{group_id}/members"), page, per_page)
            .await
    }

    async fn list_project_members(
        &self,
        project_id: u64,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Page<Member>> {
        self.get_page(&format!("projects/{project_id}/members"), page, per_page)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn parses_pagination_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-page", HeaderValue::from_static("2"));
        headers.insert("x-total-pages", HeaderValue::from_static("7"));

        assert_eq!(page_header("u", &headers, "x-page").unwrap(), Some(2));
        assert_eq!(page_header("u", &headers, "x-total-pages").unwrap(), Some(7));
        assert_eq!(page_header("u", &headers, "x-next-page").unwrap(), None);
    }

    #[test]
    fn empty_pagination_header_treated_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-total-pages", HeaderValue::from_static(""));

        assert_eq!(page_header("u", &headers, "x-total-pages").unwrap(), None);
    }

    #[test]
    fn rejects_garbage_pagination_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-page", HeaderValue::from_static("soon"));

        let err = page_header("u", &headers, "x-page").unwrap_err();
        assert!(matches!(err, ApiError::PageHeader { header: "x-page", .. }));
    }

    #[test]
    fn encodes_path_ids() {
        assert_eq!(encode_id("1234"), "1234");
        assert_eq!(encode_id("my-org/platform"), "my-org%2Fplatform");
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let client = GitlabClient::new(
            "https://gitlab.example.com/api/v4/",
            "token",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.endpoint("groups/1/members"),
            "https://gitlab.example.com/api/v4/groups/1/members"
        );
    }
}
