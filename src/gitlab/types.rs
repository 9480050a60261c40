//! GitLab API resource types
//!
//! Only the fields the audit consumes are modeled; everything else in the
//! API payloads is ignored during deserialization.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

/// A GitLab group or subgroup
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub id: u64,
    pub full_path: String,
    pub web_url: String,
}

/// A GitLab project
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub path_with_namespace: String,
    pub web_url: String,
}

/// A membership grant on a group or project
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: u64,
    pub username: String,
    pub access_level: AccessLevel,
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
}

/// Ordered GitLab access levels
///
/// Wire values are 0/10/20/30/40/50. Intermediate values the API may hand
/// back (minimal access, planner) fold down to the next lower named level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(from = "u64")]
pub enum AccessLevel {
    None,
    Guest,
    Reporter,
    Developer,
    Maintainer,
    Owner,
}

impl From<u64> for AccessLevel {
    fn from(value: u64) -> Self {
        match value {
            0..=9 => AccessLevel::None,
            10..=19 => AccessLevel::Guest,
            20..=29 => AccessLevel::Reporter,
            30..=39 => AccessLevel::Developer,
            40..=49 => AccessLevel::Maintainer,
            _ => AccessLevel::Owner,
        }
    }
}

impl AccessLevel {
    /// Display string used in the report output
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::None => "none",
            AccessLevel::Guest => "guest",
            AccessLevel::Reporter => "reporter",
            AccessLevel::Developer => "developer",
            AccessLevel::Maintainer => "maintainer",
            AccessLevel::Owner => "owner",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
