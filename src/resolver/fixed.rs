//! SRV resolver backed by a fixed, in-memory set of records.
//!
//! Useful for static fallback configuration and for exercising code built on
//! [`SrvResolver`] without a DNS server.

use super::SrvResolver;
use crate::SrvRecord;
use async_trait::async_trait;
use std::collections::HashMap;

/// Errors encountered by [`FixedResolver`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FixedResolverError {
    /// No records are registered under the requested name.
    #[error("no SRV records registered for {0}")]
    NotFound(String),
}

/// Owned SRV record, as served by [`FixedResolver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedSrvRecord {
    /// Records's target.
    pub target: String,
    /// Record's port.
    pub port: u16,
    /// Record's priority.
    pub priority: u16,
    /// Record's weight.
    pub weight: u16,
}

impl FixedSrvRecord {
    /// Creates a record from its priority, weight, port and target, in the
    /// order they appear in zone files.
    pub fn new(priority: u16, weight: u16, port: u16, target: impl ToString) -> Self {
        Self {
            target: target.to_string(),
            port,
            priority,
            weight,
        }
    }
}

impl SrvRecord for FixedSrvRecord {
    type Target = str;

    fn target(&self) -> &Self::Target {
        &self.target
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn priority(&self) -> u16 {
        self.priority
    }

    fn weight(&self) -> u16 {
        self.weight
    }
}

/// SRV resolver answering from records registered ahead of time.
///
/// Names are matched ignoring a trailing dot, so `_couchbase._tcp.local.` and
/// `_couchbase._tcp.local` refer to the same entry. Records are returned in
/// the order they were registered.
#[derive(Clone, Debug, Default)]
pub struct FixedResolver {
    records: HashMap<String, Vec<FixedSrvRecord>>,
}

impl FixedResolver {
    /// Creates a resolver without any records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `records` under `srv`, appending to any records already
    /// registered under that name.
    pub fn with_records(
        mut self,
        srv: &str,
        records: impl IntoIterator<Item = FixedSrvRecord>,
    ) -> Self {
        self.records
            .entry(normalize(srv).to_owned())
            .or_default()
            .extend(records);
        self
    }
}

fn normalize(srv: &str) -> &str {
    srv.strip_suffix('.').unwrap_or(srv)
}

#[async_trait]
impl SrvResolver for FixedResolver {
    type Record = FixedSrvRecord;
    type Error = FixedResolverError;

    async fn get_srv_records_unordered(
        &self,
        srv: &str,
    ) -> Result<Vec<Self::Record>, Self::Error> {
        self.records
            .get(normalize(srv))
            .cloned()
            .ok_or_else(|| FixedResolverError::NotFound(srv.to_owned()))
    }
}
