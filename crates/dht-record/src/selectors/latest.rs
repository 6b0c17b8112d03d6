//! Recency-based selection for namespaces whose records supersede each other.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dht_record_core::Record;

use crate::selector::Selector;

/// Picks the candidate with the latest `timeReceived`.
///
/// Candidates that fail to decode or carry no timestamp rank below every
/// dated one. Ties keep the earliest index. Not registered by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestReceivedSelector;

impl LatestReceivedSelector {
    fn received_at(raw: &[u8]) -> Option<DateTime<Utc>> {
        Record::decode(raw).ok()?.time_received().copied()
    }
}

impl Selector for LatestReceivedSelector {
    fn select(&self, _key: &[u8], records: &[Bytes]) -> usize {
        let mut best = 0;
        let mut best_time = None;

        for (i, raw) in records.iter().enumerate() {
            let time = Self::received_at(raw);
            if time > best_time {
                best = i;
                best_time = time;
            }
        }

        best
    }
}
