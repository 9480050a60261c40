//! Canonical grant records
//!
//! Group members and project members arrive with container-specific shapes;
//! normalization folds both into one reportable record. The container kind
//! is decided once, where the member is fetched, and carried explicitly on
//! the record from then on.

use chrono::NaiveDate;
use std::fmt;

use crate::gitlab::types::{AccessLevel, Group, Member, Project};

/// The kind of container a grant was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Group,
    Project,
}

impl ContainerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Group => "group",
            ContainerKind::Project => "project",
        }
    }

    /// Path segment of the members settings page for this kind
    fn members_segment(&self) -> &'static str {
        match self {
            ContainerKind::Group => "group_members",
            ContainerKind::Project => "project_members",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed reference to either container shape
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    Group(&'a Group),
    Project(&'a Project),
}

impl Container<'_> {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Container::Group(_) => ContainerKind::Group,
            Container::Project(_) => ContainerKind::Project,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Container::Group(group) => group.id,
            Container::Project(project) => project.id,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Container::Group(group) => &group.full_path,
            Container::Project(project) => &project.path_with_namespace,
        }
    }

    pub fn web_url(&self) -> &str {
        match self {
            Container::Group(group) => &group.web_url,
            Container::Project(project) => &project.web_url,
        }
    }
}

/// One normalized, reportable membership grant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRecord {
    pub kind: ContainerKind,
    pub container_id: u64,
    pub path: String,
    pub username: String,
    pub user_id: u64,
    pub access_level: AccessLevel,
    pub expires_at: Option<NaiveDate>,
    /// Link to the container's member settings page, pre-filtered to the user
    pub members_url: String,
}

/// Normalize one (container, member) pair into a [`GrantRecord`].
///
/// Pure: the same inputs always produce the same record.
pub fn normalize(container: Container<'_>, member: &Member) -> GrantRecord {
    let members_url = format!(
        "{}/-/{}?search={}",
        container.web_url(),
        container.kind().members_segment(),
        member.username
    );

    GrantRecord {
        kind: container.kind(),
        container_id: container.id(),
        path: container.path().to_string(),
        username: member.username.clone(),
        user_id: member.id,
        access_level: member.access_level,
        expires_at: member.expires_at,
        members_url,
    }
}
