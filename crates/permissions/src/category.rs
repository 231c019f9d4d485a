use serde::{Deserialize, Serialize};

use crate::catalog::{
    CertificatePermission, KeyPermission, SecretPermission, StoragePermission,
};

/// The four permission categories of an access-policy entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionCategory {
    Certificate,
    Key,
    Secret,
    Storage,
}

impl PermissionCategory {
    /// Categories in raw field order.
    pub const ALL: [PermissionCategory; 4] = [
        PermissionCategory::Certificate,
        PermissionCategory::Key,
        PermissionCategory::Secret,
        PermissionCategory::Storage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionCategory::Certificate => "certificate",
            PermissionCategory::Key => "key",
            PermissionCategory::Secret => "secret",
            PermissionCategory::Storage => "storage",
        }
    }

    /// Name of the raw list field holding this category's tokens.
    pub fn field_name(self) -> &'static str {
        match self {
            PermissionCategory::Certificate => "certificate_permissions",
            PermissionCategory::Key => "key_permissions",
            PermissionCategory::Secret => "secret_permissions",
            PermissionCategory::Storage => "storage_permissions",
        }
    }

    /// Canonical tokens of the category, in catalog order.
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            PermissionCategory::Certificate => CertificatePermission::TOKENS,
            PermissionCategory::Key => KeyPermission::TOKENS,
            PermissionCategory::Secret => SecretPermission::TOKENS,
            PermissionCategory::Storage => StoragePermission::TOKENS,
        }
    }
}

impl core::fmt::Display for PermissionCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
