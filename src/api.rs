//! Remote membership API boundary
//!
//! The walker consumes the remote side exclusively through the
//! [`MembershipApi`] trait, so the traversal can be exercised against
//! synthetic trees in tests. The production implementation is
//! [`GitlabClient`](crate::gitlab::GitlabClient).

use crate::error::ApiResult;
use crate::gitlab::types::{Group, Member, Project};

/// One page of a paginated list response
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Page number the server actually returned
    pub current_page: u32,

    /// Total number of pages for the listing
    pub total_pages: u32,
}

/// The paginated list operations and the single-item group lookup the
/// audit consumes.
///
/// All list operations take an explicit page number and page size; the
/// pagination cursor in [`crate::pagination`] drives them to completion.
#[async_trait::async_trait]
pub trait MembershipApi: Send + Sync {
    /// Resolve a group by numeric id or full path
    async fn get_group(&self, id: &str) -> ApiResult<Group>;

    /// List direct subgroups of a group
    async fn list_subgroups(&self, group_id: u64, page: u32, per_page: u32)
        -> ApiResult<Page<Group>>;

    /// List direct projects of a group
    async fn list_group_projects(
        &self,
        group_id: u64,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Page<Project>>;

    /// List direct members of a group
    async fn list_group_members(
        &self,
        group_id: u64,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Page<Member>>;

    /// List direct members of a project
    async fn list_project_members(
        &self,
        project_id: u64,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Page<Member>>;
}
