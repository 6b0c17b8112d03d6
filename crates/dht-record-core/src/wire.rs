//! Binary record schema.
//!
//! The field numbers are shared with every other DHT implementation that
//! exchanges these records and must never change:
//!
//! ```text
//! message Record {
//!     optional bytes  key          = 1;
//!     optional bytes  value        = 2;
//!     optional bytes  author       = 3;
//!     optional bytes  signature    = 4;
//!     optional string timeReceived = 5;
//! }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use prost::Message;

use crate::error::{RecordError, Result};

/// Protobuf form of a record.
#[derive(Clone, PartialEq, Message)]
pub struct RecordProto {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub key: Option<Vec<u8>>,

    #[prost(bytes = "vec", optional, tag = "2")]
    pub value: Option<Vec<u8>>,

    #[prost(bytes = "vec", optional, tag = "3")]
    pub author: Option<Vec<u8>>,

    #[prost(bytes = "vec", optional, tag = "4")]
    pub signature: Option<Vec<u8>>,

    #[prost(string, optional, tag = "5")]
    pub time_received: Option<String>,
}

impl RecordProto {
    /// Encode to protobuf bytes.
    pub fn encode_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode from protobuf bytes.
    pub fn decode_from_slice(data: &[u8]) -> Result<Self> {
        Ok(Self::decode(data)?)
    }
}

/// Format a timestamp as RFC3339 in UTC with a nanosecond fraction.
///
/// `2012-02-25T10:10:10.010000000Z`
pub fn format_rfc3339(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse any RFC3339 timestamp, normalizing to UTC.
pub fn parse_rfc3339(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RecordError::InvalidTimestamp {
            value: text.to_string(),
            reason: e.to_string(),
        })
}
