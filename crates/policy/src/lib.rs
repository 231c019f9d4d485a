//! `vaultacl-policy`: access-policy entries and their raw/typed codec.
//!
//! Raw entries are the flat records a configuration front end produces;
//! typed entries are what a resource client sends to the remote service.
//! [`decode`] and [`encode`] convert between the two without failing:
//! malformed identifiers degrade to the nil UUID and permission tokens are
//! carried verbatim. Token validation is a separate step
//! (see [`schema`] and `vaultacl_permissions`).

pub mod codec;
pub mod config;
pub mod entry;
pub mod raw;
pub mod schema;

pub use codec::{AccessPolicyCodec, decode, encode};
pub use config::{AbsentApplicationId, CodecConfig, ConfigError, UuidParsing};
pub use entry::{AccessPolicyEntry, AccessPolicyList, Identity};
pub use raw::RawAccessPolicy;
