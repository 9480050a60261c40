//! Report filtering
//!
//! Predicates are assembled once at startup and never change during the
//! walk. A record is reportable only when every predicate accepts it, so
//! the chain is a plain short-circuiting conjunction.

use crate::audit::record::GrantRecord;
use crate::gitlab::types::AccessLevel;

/// A single report predicate
pub type MemberFilter = Box<dyn Fn(&GrantRecord) -> bool + Send + Sync>;

/// Ordered conjunction of report predicates
pub struct FilterChain {
    filters: Vec<MemberFilter>,
}

impl FilterChain {
    /// Create a chain that accepts everything.
    ///
    /// The accept-all base predicate keeps "no configuration" meaning
    /// "reject nothing".
    pub fn new() -> Self {
        Self {
            filters: vec![Box::new(|_| true)],
        }
    }

    /// Build a chain from the excluded-users list.
    ///
    /// Each excluded username is dropped from the report only for its
    /// owner-level grants; grants at any other level are still reported.
    pub fn with_excluded_users(usernames: &[String]) -> Self {
        let mut chain = Self::new();
        for username in usernames {
            let username = username.clone();
            chain.push(move |record| {
                !(record.username == username && record.access_level == AccessLevel::Owner)
            });
        }
        chain
    }

    /// Append a predicate to the chain
    pub fn push<F>(&mut self, filter: F)
    where
        F: Fn(&GrantRecord) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    /// True when every predicate accepts the record
    pub fn accepts(&self, record: &GrantRecord) -> bool {
        self.filters.iter().all(|filter| filter(record))
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}
