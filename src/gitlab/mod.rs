//! GitLab REST API client
//!
//! A thin typed client over the handful of v4 endpoints the audit
//! consumes. The client implements [`MembershipApi`](crate::api::MembershipApi);
//! the walker never talks to it directly.

pub mod client;
pub mod types;

pub use client::{GitlabClient, DEFAULT_BASE_URL};
pub use types::{AccessLevel, Group, Member, Project};
