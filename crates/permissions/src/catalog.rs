//! Permission vocabularies and the validation primitive.
//!
//! Each vocabulary is closed: adding an operation means adding a variant here.
//! Canonical casing is the one the remote service uses on the wire (mostly
//! lowercase, with `unwrapKey` / `wrapKey` as the exceptions).

use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use vaultacl_core::{AclError, AclResult};

use crate::category::PermissionCategory;

/// A closed, case-insensitive vocabulary of permission operations.
pub trait Vocabulary: Copy + Eq + core::hash::Hash + core::fmt::Debug + 'static {
    const CATEGORY: PermissionCategory;

    /// Every operation, in catalog order.
    const ALL: &'static [Self];

    /// Canonical token of the operation.
    fn as_str(self) -> &'static str;

    /// First operation whose token equals `token` ignoring ASCII case.
    fn matching(token: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(token))
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $category:expr, { $($variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const TOKENS: &'static [&'static str] = &[$($token),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl Vocabulary for $name {
            const CATEGORY: PermissionCategory = $category;
            const ALL: &'static [Self] = $name::ALL;

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AclError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as Vocabulary>::matching(s)
                    .ok_or_else(|| AclError::invalid_permission($category.as_str(), s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

vocabulary! {
    /// Operations on certificates.
    CertificatePermission, PermissionCategory::Certificate, {
        Backup => "backup",
        Create => "create",
        Delete => "delete",
        DeleteIssuers => "deleteissuers",
        Get => "get",
        GetIssuers => "getissuers",
        Import => "import",
        List => "list",
        ListIssuers => "listissuers",
        ManageContacts => "managecontacts",
        ManageIssuers => "manageissuers",
        Purge => "purge",
        Recover => "recover",
        Restore => "restore",
        SetIssuers => "setissuers",
        Update => "update",
    }
}

vocabulary! {
    /// Operations on keys.
    KeyPermission, PermissionCategory::Key, {
        Backup => "backup",
        Create => "create",
        Decrypt => "decrypt",
        Delete => "delete",
        Encrypt => "encrypt",
        Get => "get",
        Import => "import",
        List => "list",
        Purge => "purge",
        Recover => "recover",
        Restore => "restore",
        Sign => "sign",
        UnwrapKey => "unwrapKey",
        Update => "update",
        Verify => "verify",
        WrapKey => "wrapKey",
    }
}

vocabulary! {
    /// Operations on secrets.
    SecretPermission, PermissionCategory::Secret, {
        Backup => "backup",
        Delete => "delete",
        Get => "get",
        List => "list",
        Purge => "purge",
        Recover => "recover",
        Restore => "restore",
        Set => "set",
    }
}

vocabulary! {
    /// Operations on managed storage accounts and their SAS definitions.
    StoragePermission, PermissionCategory::Storage, {
        Backup => "backup",
        Delete => "delete",
        DeleteSas => "deletesas",
        Get => "get",
        GetSas => "getsas",
        List => "list",
        ListSas => "listsas",
        Purge => "purge",
        Recover => "recover",
        RegenerateKey => "regeneratekey",
        Restore => "restore",
        Set => "set",
        SetSas => "setsas",
        Update => "update",
    }
}

/// Vocabulary's own-cased form of the first case-insensitive match.
pub fn canonicalize(category: PermissionCategory, token: &str) -> Option<&'static str> {
    category
        .vocabulary()
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(token))
}

/// True iff `token` is a member of `category`, ignoring ASCII case.
pub fn validate(category: PermissionCategory, token: &str) -> bool {
    canonicalize(category, token).is_some()
}

/// Validating lookup for front ends: the canonical token, or `InvalidPermissionToken`.
pub fn parse_token(category: PermissionCategory, token: &str) -> AclResult<&'static str> {
    canonicalize(category, token).ok_or_else(|| AclError::invalid_permission(category.as_str(), token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn validate_ignores_case() {
        assert!(validate(PermissionCategory::Key, "Get"));
        assert!(validate(PermissionCategory::Key, "get"));
        assert!(validate(PermissionCategory::Key, "GET"));
        assert!(!validate(PermissionCategory::Key, "frobnicate"));
        assert!(!validate(PermissionCategory::Key, ""));
        assert!(!validate(PermissionCategory::Key, " get"));
    }

    #[test]
    fn validate_is_per_category() {
        assert!(validate(PermissionCategory::Key, "sign"));
        assert!(!validate(PermissionCategory::Secret, "sign"));
        assert!(validate(PermissionCategory::Secret, "Set"));
        assert!(!validate(PermissionCategory::Certificate, "set"));
        assert!(validate(PermissionCategory::Storage, "RegenerateKey"));
        assert!(!validate(PermissionCategory::Key, "regeneratekey"));
    }

    #[test]
    fn canonicalize_returns_catalog_casing() {
        assert_eq!(canonicalize(PermissionCategory::Key, "UNWRAPKEY"), Some("unwrapKey"));
        assert_eq!(canonicalize(PermissionCategory::Key, "wrapkey"), Some("wrapKey"));
        assert_eq!(
            canonicalize(PermissionCategory::Certificate, "ManageContacts"),
            Some("managecontacts")
        );
        assert_eq!(canonicalize(PermissionCategory::Secret, "encrypt"), None);
    }

    #[test]
    fn parse_token_reports_category_and_token() {
        assert_eq!(parse_token(PermissionCategory::Storage, "GetSAS"), Ok("getsas"));

        let err = parse_token(PermissionCategory::Storage, "frobnicate").unwrap_err();
        assert_eq!(err, AclError::invalid_permission("storage", "frobnicate"));
    }

    #[test]
    fn enum_from_str_and_display() {
        let op: KeyPermission = "WrapKey".parse().unwrap();
        assert_eq!(op, KeyPermission::WrapKey);
        assert_eq!(op.to_string(), "wrapKey");

        let err = "bogus".parse::<CertificatePermission>().unwrap_err();
        assert_eq!(err, AclError::invalid_permission("certificate", "bogus"));
    }

    #[test]
    fn enum_serde_uses_canonical_token() {
        let json = serde_json::to_string(&StoragePermission::SetSas).unwrap();
        assert_eq!(json, "\"setsas\"");

        let op: SecretPermission = serde_json::from_str("\"PURGE\"").unwrap();
        assert_eq!(op, SecretPermission::Purge);

        assert!(serde_json::from_str::<SecretPermission>("\"sign\"").is_err());
    }

    #[test]
    fn enum_tables_agree_with_category_vocabulary() {
        fn check<V: Vocabulary>() {
            let tokens: Vec<_> = V::ALL.iter().map(|op| op.as_str()).collect();
            assert_eq!(tokens, V::CATEGORY.vocabulary());
        }
        check::<CertificatePermission>();
        check::<KeyPermission>();
        check::<SecretPermission>();
        check::<StoragePermission>();
    }

    fn any_category() -> impl Strategy<Value = PermissionCategory> {
        prop::sample::select(PermissionCategory::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any casing of a vocabulary token validates and canonicalizes back.
        #[test]
        fn any_casing_of_a_known_token_matches(
            category in any_category(),
            index in any::<prop::sample::Index>(),
            mask in prop::collection::vec(any::<bool>(), 16)
        ) {
            let canonical = *index.get(category.vocabulary());
            let mixed: String = canonical
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect();

            prop_assert!(validate(category, &mixed));
            prop_assert_eq!(canonicalize(category, &mixed), Some(canonical));
        }

        /// Property: validate agrees with a plain lowercase lookup.
        #[test]
        fn validate_matches_lowercase_membership(
            category in any_category(),
            token in "[a-zA-Z]{0,16}"
        ) {
            let lowered = token.to_ascii_lowercase();
            let member = category
                .vocabulary()
                .iter()
                .any(|known| known.to_ascii_lowercase() == lowered);
            prop_assert_eq!(validate(category, &token), member);
        }
    }
}
