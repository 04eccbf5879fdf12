// This module contains the parsing of results files.
mod parse;

// This module contains the writing of results files.
mod write;

// Re-exports.
pub use parse::parse_line;
pub use write::format_line;

use crate::id::ServerId;
use indexmap::IndexMap;
use std::fmt;

/// Metrics collected for a single server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerMetricRecord {
    pub server_id: ServerId,
    /// average time (in seconds) from task generation to task completion
    pub avg_delay: f64,
    /// average time (in seconds) a task waits in the server queue
    pub avg_waiting: f64,
    pub avg_queue_length: u64,
}

impl ServerMetricRecord {
    pub fn new(
        server_id: ServerId,
        avg_delay: f64,
        avg_waiting: f64,
        avg_queue_length: u64,
    ) -> Self {
        Self {
            server_id,
            avg_delay,
            avg_waiting,
            avg_queue_length,
        }
    }
}

impl fmt::Display for ServerMetricRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_line(self))
    }
}

/// Mapping from server identifier to its metrics.
///
/// Iteration follows insertion order. Inserting a record for a server that is
/// already present overwrites its metrics but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    records: IndexMap<ServerId, ServerMetricRecord>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new record, returning the record it replaced (if any).
    pub fn insert(
        &mut self,
        record: ServerMetricRecord,
    ) -> Option<ServerMetricRecord> {
        self.records.insert(record.server_id, record)
    }

    pub fn get(&self, server_id: ServerId) -> Option<&ServerMetricRecord> {
        self.records.get(&server_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over all records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ServerMetricRecord> + '_ {
        self.records.values()
    }

    pub fn server_ids(&self) -> Vec<ServerId> {
        self.records.keys().copied().collect()
    }

    pub fn avg_delays(&self) -> Vec<f64> {
        self.iter().map(|record| record.avg_delay).collect()
    }

    pub fn avg_waitings(&self) -> Vec<f64> {
        self.iter().map(|record| record.avg_waiting).collect()
    }

    pub fn avg_queue_lengths(&self) -> Vec<u64> {
        self.iter().map(|record| record.avg_queue_length).collect()
    }
}

impl FromIterator<ServerMetricRecord> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ServerMetricRecord>>(iter: T) -> Self {
        let mut results = Self::new();
        iter.into_iter().for_each(|record| {
            results.insert(record);
        });
        results
    }
}
