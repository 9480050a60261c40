//! Configuration for gitlab-audit
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use clap::Parser;
use std::time::Duration;

use crate::error::ConfigError;
use crate::gitlab::client::DEFAULT_BASE_URL;

/// Maximum reasonable concurrency budget
const MAX_CONCURRENCY: usize = 64;

/// Maximum page size the API accepts
const MAX_PAGE_SIZE: u32 = 100;

/// Minimum task queue size
const MIN_QUEUE_SIZE: usize = 16;

/// Report members with permissions granted directly on a group or project
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gitlab-audit",
    version,
    about = "Report members whose permissions are set directly on a group or project",
    long_about = "Walks a GitLab group and all of its subgroups and projects, reporting every \
                  member whose permission was granted on the container itself instead of being \
                  inherited from a parent group.",
    after_help = "EXAMPLES:\n    \
        gitlab-audit 1234 -t $GITLAB_TOKEN\n    \
        gitlab-audit my-org/platform -t $GITLAB_TOKEN --exclude-user buildbot\n    \
        gitlab-audit 1234 -t $GITLAB_TOKEN --base-url https://gitlab.example.com/api/v4 -c 10"
)]
pub struct CliArgs {
    /// Root group to audit (numeric id or full path)
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// GitLab API access token
    #[arg(short = 't', long, value_name = "TOKEN")]
    pub token: String,

    /// GitLab API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    pub base_url: String,

    /// Exclude a user's owner-level grants from the report (can be repeated)
    #[arg(long = "exclude-user", value_name = "USERNAME", action = clap::ArgAction::Append)]
    pub excluded_users: Vec<String>,

    /// Maximum number of groups walked concurrently
    #[arg(short = 'c', long, default_value = "5", value_name = "NUM")]
    pub concurrency: usize,

    /// Page size for list requests
    #[arg(long, default_value = "10", value_name = "NUM")]
    pub page_size: u32,

    /// Work queue capacity
    #[arg(long, default_value = "1000", value_name = "NUM")]
    pub queue_size: usize,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    pub timeout: u64,

    /// Quiet mode - suppress the progress display
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (show per-group progress)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Root group id or full path
    pub group: String,

    /// API access token
    pub token: String,

    /// API base URL
    pub base_url: String,

    /// Usernames whose owner-level grants are excluded from the report
    pub excluded_users: Vec<String>,

    /// Maximum simultaneously walked groups
    pub concurrency: usize,

    /// Page size for list requests
    pub page_size: u32,

    /// Work queue capacity
    pub queue_size: usize,

    /// HTTP request timeout
    pub timeout: Duration,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl AuditConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        if args.group.trim().is_empty() {
            return Err(ConfigError::EmptyGroup);
        }

        if args.concurrency == 0 || args.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::InvalidConcurrency {
                count: args.concurrency,
                max: MAX_CONCURRENCY,
            });
        }

        if args.page_size == 0 || args.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize {
                size: args.page_size,
                max: MAX_PAGE_SIZE,
            });
        }

        if args.queue_size < MIN_QUEUE_SIZE {
            return Err(ConfigError::InvalidQueueSize {
                size: args.queue_size,
                min: MIN_QUEUE_SIZE,
            });
        }

        if let Err(e) = reqwest::Url::parse(&args.base_url) {
            return Err(ConfigError::InvalidBaseUrl {
                url: args.base_url,
                reason: e.to_string(),
            });
        }

        Ok(Self {
            group: args.group,
            token: args.token,
            base_url: args.base_url,
            excluded_users: args.excluded_users,
            concurrency: args.concurrency,
            page_size: args.page_size,
            queue_size: args.queue_size,
            timeout: Duration::from_secs(args.timeout),
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            group: "my-org".into(),
            token: "glpat-test".into(),
            base_url: DEFAULT_BASE_URL.into(),
            excluded_users: vec![],
            concurrency: 5,
            page_size: 10,
            queue_size: 1000,
            timeout: 30,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = AuditConfig::from_args(args()).unwrap();
        assert_eq!(config.group, "my-org");
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.show_progress);
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut invalid = args();
        invalid.token = "   ".into();
        assert!(matches!(
            AuditConfig::from_args(invalid),
            Err(ConfigError::EmptyToken)
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut invalid = args();
        invalid.concurrency = 0;
        assert!(matches!(
            AuditConfig::from_args(invalid),
            Err(ConfigError::InvalidConcurrency { .. })
        ));
    }

    #[test]
    fn test_oversized_page_rejected() {
        let mut invalid = args();
        invalid.page_size = 500;
        assert!(matches!(
            AuditConfig::from_args(invalid),
            Err(ConfigError::InvalidPageSize { size: 500, .. })
        ));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut invalid = args();
        invalid.base_url = "not a url".into();
        assert!(matches!(
            AuditConfig::from_args(invalid),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_quiet_disables_progress() {
        let mut quiet = args();
        quiet.quiet = true;
        let config = AuditConfig::from_args(quiet).unwrap();
        assert!(!config.show_progress);
    }
}
