//! `vaultacl-permissions`: the closed permission vocabularies of an access policy.
//!
//! Four categories (certificate, key, secret, storage), each a fixed set of
//! operation tokens matched case-insensitively. Validation lives here and
//! only here; the policy codec carries tokens through unchecked.

pub mod catalog;
pub mod category;
pub mod set;
pub mod token;

pub use catalog::{
    CertificatePermission, KeyPermission, SecretPermission, StoragePermission, Vocabulary,
    canonicalize, parse_token, validate,
};
pub use category::PermissionCategory;
pub use set::PermissionSet;
pub use token::PermissionToken;
