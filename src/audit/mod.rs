//! Direct-membership audit engine
//!
//! Walks a group tree concurrently, normalizes every direct member grant it
//! finds into a [`GrantRecord`], filters it, and hands the survivors to the
//! report sink.
//!
//! ```text
//!                  ┌──────────────────────────┐
//!                  │     AuditCoordinator     │
//!                  │  - dispatch loop         │
//!                  │  - semaphore admission   │
//!                  │  - in-flight tracking    │
//!                  └───────────┬──────────────┘
//!                              │ one task per group
//!        ┌─────────────────────┼─────────────────────┐
//!        ▼                     ▼                     ▼
//!  ┌───────────┐         ┌───────────┐         ┌───────────┐
//!  │  group A  │         │  group B  │   ...   │  group N  │
//!  │  members  │         │  members  │         │  members  │
//!  │  projects │         │  projects │         │  projects │
//!  │  subgroups│──┐      │  subgroups│──┐      │  subgroups│──┐
//!  └───────────┘  │      └───────────┘  │      └───────────┘  │
//!                 └──────────► back into the work queue ◄─────┘
//! ```

pub mod coordinator;
pub mod filter;
pub mod record;

pub use coordinator::{AuditCoordinator, AuditResult, AuditStats};
pub use filter::{FilterChain, MemberFilter};
pub use record::{normalize, Container, ContainerKind, GrantRecord};
