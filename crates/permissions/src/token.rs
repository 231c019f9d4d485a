use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Vocabulary};
use crate::category::PermissionCategory;

/// A permission token as authored.
///
/// Tokens are opaque strings at this layer and keep the author's casing;
/// membership in a vocabulary is checked by the catalog, not on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionToken(Cow<'static, str>);

impl PermissionToken {
    pub fn new(token: impl Into<Cow<'static, str>>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token equality as the remote service sees it (ASCII case ignored).
    pub fn eq_ignore_case(&self, other: &PermissionToken) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    pub fn is_valid_for(&self, category: PermissionCategory) -> bool {
        catalog::validate(category, self.as_str())
    }

    /// Catalog-cased form of this token, if it belongs to `category`.
    pub fn canonical_for(&self, category: PermissionCategory) -> Option<PermissionToken> {
        catalog::canonicalize(category, self.as_str()).map(PermissionToken::from)
    }
}

impl core::fmt::Display for PermissionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PermissionToken {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<&'static str> for PermissionToken {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<PermissionToken> for String {
    fn from(value: PermissionToken) -> Self {
        value.0.into_owned()
    }
}

impl From<crate::KeyPermission> for PermissionToken {
    fn from(value: crate::KeyPermission) -> Self {
        Self::from(Vocabulary::as_str(value))
    }
}

impl From<crate::CertificatePermission> for PermissionToken {
    fn from(value: crate::CertificatePermission) -> Self {
        Self::from(Vocabulary::as_str(value))
    }
}

impl From<crate::SecretPermission> for PermissionToken {
    fn from(value: crate::SecretPermission) -> Self {
        Self::from(Vocabulary::as_str(value))
    }
}

impl From<crate::StoragePermission> for PermissionToken {
    fn from(value: crate::StoragePermission) -> Self {
        Self::from(Vocabulary::as_str(value))
    }
}
