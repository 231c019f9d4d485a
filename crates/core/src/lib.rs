//! `vaultacl-core`: shared building blocks for the access-policy crates.
//!
//! This crate contains **pure** primitives (no I/O, no global state).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{AclError, AclResult};
pub use id::{ApplicationId, ObjectId, TenantId};
pub use value_object::ValueObject;
