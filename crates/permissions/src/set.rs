//! Ordered permission lists, one per category.

use core::marker::PhantomData;

use serde::{Deserialize, Serialize};
use vaultacl_core::{AclError, AclResult, ValueObject};

use crate::catalog::Vocabulary;
use crate::category::PermissionCategory;
use crate::token::PermissionToken;

/// Ordered tokens of one permission category.
///
/// Order is kept as authored and duplicates are not removed, so a decoded set
/// re-encodes to the same list. Tokens are not validated on construction; use
/// [`PermissionSet::validate`] where rejection is wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct PermissionSet<V: Vocabulary> {
    tokens: Vec<PermissionToken>,
    #[serde(skip)]
    _vocabulary: PhantomData<V>,
}

impl<V: Vocabulary> ValueObject for PermissionSet<V> {}

impl<V: Vocabulary> Default for PermissionSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vocabulary> PermissionSet<V> {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            _vocabulary: PhantomData,
        }
    }

    /// Build a set from tokens, verbatim and in order.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PermissionToken>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            _vocabulary: PhantomData,
        }
    }

    /// Build a set of catalog operations (always valid, canonically cased).
    pub fn from_operations<I>(operations: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self::from_tokens(operations.into_iter().map(|op| PermissionToken::from(op.as_str())))
    }

    pub fn category(&self) -> PermissionCategory {
        V::CATEGORY
    }

    pub fn push(&mut self, token: impl Into<PermissionToken>) {
        self.tokens.push(token.into());
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, PermissionToken> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[PermissionToken] {
        &self.tokens
    }

    /// Tokens as plain strings, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.as_str().to_string()).collect()
    }

    /// Reject the first token that is not in the category's vocabulary.
    pub fn validate(&self) -> AclResult<()> {
        match self.tokens.iter().find(|t| V::matching(t.as_str()).is_none()) {
            Some(bad) => Err(AclError::invalid_permission(
                V::CATEGORY.as_str(),
                bad.as_str(),
            )),
            None => Ok(()),
        }
    }

    /// Resolve every token to its catalog operation.
    pub fn operations(&self) -> AclResult<Vec<V>> {
        self.tokens
            .iter()
            .map(|t| {
                V::matching(t.as_str())
                    .ok_or_else(|| AclError::invalid_permission(V::CATEGORY.as_str(), t.as_str()))
            })
            .collect()
    }

    /// Same tokens in catalog casing; order and duplicates are kept.
    pub fn canonicalized(&self) -> AclResult<Self> {
        Ok(Self::from_operations(self.operations()?))
    }

    /// Element-wise equality ignoring ASCII case (the diff/plan comparison).
    pub fn equivalent(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(other.tokens.iter())
                .all(|(a, b)| a.eq_ignore_case(b))
    }
}

impl<V: Vocabulary, T: Into<PermissionToken>> FromIterator<T> for PermissionSet<V> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}

impl<'a, V: Vocabulary> IntoIterator for &'a PermissionSet<V> {
    type Item = &'a PermissionToken;
    type IntoIter = core::slice::Iter<'a, PermissionToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CertificatePermission, KeyPermission, SecretPermission, StoragePermission};

    fn strings(set: &PermissionSet<impl Vocabulary>) -> Vec<String> {
        set.to_strings()
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let set: PermissionSet<SecretPermission> =
            PermissionSet::from_tokens(["get".to_string(), "get".to_string(), "list".to_string()]);
        assert_eq!(strings(&set), ["get", "get", "list"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.category(), PermissionCategory::Secret);
    }

    #[test]
    fn unknown_tokens_are_carried_until_validated() {
        let set: PermissionSet<KeyPermission> = ["Get", "frobnicate"].into_iter().collect();
        assert_eq!(strings(&set), ["Get", "frobnicate"]);
        assert_eq!(
            set.validate(),
            Err(AclError::invalid_permission("key", "frobnicate"))
        );
        assert!(set.operations().is_err());
    }

    #[test]
    fn canonicalized_keeps_order_and_fixes_case() {
        let set: PermissionSet<KeyPermission> =
            ["WRAPKEY", "Get", "get"].into_iter().collect();
        let canonical = set.canonicalized().unwrap();
        assert_eq!(strings(&canonical), ["wrapKey", "get", "get"]);
        assert_eq!(
            set.operations().unwrap(),
            [KeyPermission::WrapKey, KeyPermission::Get, KeyPermission::Get]
        );
    }

    #[test]
    fn equivalence_ignores_case_but_not_order() {
        let a: PermissionSet<CertificatePermission> = ["Get", "List"].into_iter().collect();
        let b: PermissionSet<CertificatePermission> = ["get", "LIST"].into_iter().collect();
        let c: PermissionSet<CertificatePermission> = ["list", "get"].into_iter().collect();
        assert!(a.equivalent(&b));
        assert!(!a.equivalent(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn empty_set_is_valid() {
        let set = PermissionSet::<StoragePermission>::default();
        assert!(set.is_empty());
        assert_eq!(set.validate(), Ok(()));
        assert_eq!(set.operations().unwrap(), Vec::<StoragePermission>::new());
    }

    #[test]
    fn serializes_as_plain_list() {
        let set = PermissionSet::from_operations([StoragePermission::GetSas, StoragePermission::List]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["getsas","list"]"#);

        let back: PermissionSet<StoragePermission> = serde_json::from_str(r#"["GetSAS","list"]"#).unwrap();
        assert_eq!(strings(&back), ["GetSAS", "list"]);
    }
}
