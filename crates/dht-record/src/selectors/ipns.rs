//! Selector for `/ipns/` records.

use bytes::Bytes;

use crate::selector::Selector;

/// Picks the first candidate.
///
/// Ordering between name records (sequence numbers, validity windows) is
/// decided by the naming layer before records reach this point.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpnsSelector;

impl IpnsSelector {
    pub const NAMESPACE: &'static str = "ipns";
}

impl Selector for IpnsSelector {
    fn select(&self, _key: &[u8], _records: &[Bytes]) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_first() {
        let records = vec![Bytes::from_static(b"z"), Bytes::from_static(b"a")];
        assert_eq!(IpnsSelector.select(b"/ipns/x", &records), 0);
    }
}
