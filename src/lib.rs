//! gitlab-audit - Direct membership audit for GitLab group trees
//!
//! Walks a GitLab group and every subgroup and project beneath it,
//! reporting each member whose permission is granted directly on the
//! container instead of inherited from a parent group. Useful for spotting
//! unexpected or redundant grants across a large organization.
//!
//! # Features
//!
//! - **Concurrent traversal**: Every discovered subgroup is walked as its
//!   own task, capped by a fixed concurrency budget so the API is never
//!   hit by more than N simultaneous walks.
//!
//! - **Exhaustive pagination**: Subgroup, project, and member listings are
//!   drained page by page; the run either sees everything or fails.
//!
//! - **Fail-fast**: The first fetch error aborts the whole run. A partial
//!   report would silently hide grants, so there is no partial mode.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       GitLab REST v4 API                        │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │ paginated listings
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      AuditCoordinator                           │
//! │   work queue ──► semaphore (N slots) ──► group tasks            │
//! │                                                                 │
//! │   per group: members ─► normalize ─► filters ─► report sink     │
//! │              projects ─► members ─► (same pipeline)             │
//! │              subgroups ─► back into the work queue              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//!                    ┌──────────────────┐
//!                    │  stdout report   │
//!                    └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Audit a group by id
//! gitlab-audit 1234 -t $GITLAB_TOKEN
//!
//! # Audit by path, ignoring a bot's owner grants, with more parallelism
//! gitlab-audit my-org/platform -t $GITLAB_TOKEN --exclude-user buildbot -c 10
//! ```

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod gitlab;
pub mod pagination;
pub mod progress;
pub mod report;

pub use audit::{AuditCoordinator, AuditResult, AuditStats, FilterChain, GrantRecord};
pub use config::{AuditConfig, CliArgs};
pub use error::{ApiError, AuditError, ConfigError, Result};
pub use gitlab::GitlabClient;
