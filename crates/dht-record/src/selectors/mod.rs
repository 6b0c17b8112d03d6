//! Built-in namespace selectors.

mod ipns;
mod latest;
mod public_key;

pub use ipns::IpnsSelector;
pub use latest::LatestReceivedSelector;
pub use public_key::PublicKeySelector;
