//! Typed access-policy model.

use serde::{Deserialize, Serialize};
use vaultacl_core::{AclResult, ApplicationId, ObjectId, TenantId, ValueObject};
use vaultacl_permissions::{
    CertificatePermission, KeyPermission, PermissionSet, SecretPermission, StoragePermission,
};

/// Who an access-policy entry grants permissions to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub tenant_id: TenantId,
    pub object_id: ObjectId,
    /// Set only for compound identities (a principal acting through an application).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
}

impl ValueObject for Identity {}

impl Identity {
    pub fn new(tenant_id: TenantId, object_id: impl Into<ObjectId>) -> Self {
        Self {
            tenant_id,
            object_id: object_id.into(),
            application_id: None,
        }
    }

    pub fn with_application_id(mut self, application_id: ApplicationId) -> Self {
        self.application_id = Some(application_id);
        self
    }
}

/// One access-policy entry: an identity and its four permission sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicyEntry {
    pub identity: Identity,
    #[serde(default)]
    pub certificate_permissions: PermissionSet<CertificatePermission>,
    #[serde(default)]
    pub key_permissions: PermissionSet<KeyPermission>,
    #[serde(default)]
    pub secret_permissions: PermissionSet<SecretPermission>,
    #[serde(default)]
    pub storage_permissions: PermissionSet<StoragePermission>,
}

impl ValueObject for AccessPolicyEntry {}

impl AccessPolicyEntry {
    /// Entry with no permissions granted.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            certificate_permissions: PermissionSet::new(),
            key_permissions: PermissionSet::new(),
            secret_permissions: PermissionSet::new(),
            storage_permissions: PermissionSet::new(),
        }
    }

    pub fn with_certificate_permissions(mut self, set: PermissionSet<CertificatePermission>) -> Self {
        self.certificate_permissions = set;
        self
    }

    pub fn with_key_permissions(mut self, set: PermissionSet<KeyPermission>) -> Self {
        self.key_permissions = set;
        self
    }

    pub fn with_secret_permissions(mut self, set: PermissionSet<SecretPermission>) -> Self {
        self.secret_permissions = set;
        self
    }

    pub fn with_storage_permissions(mut self, set: PermissionSet<StoragePermission>) -> Self {
        self.storage_permissions = set;
        self
    }

    /// True when no set grants anything.
    pub fn grants_nothing(&self) -> bool {
        self.certificate_permissions.is_empty()
            && self.key_permissions.is_empty()
            && self.secret_permissions.is_empty()
            && self.storage_permissions.is_empty()
    }

    /// Check every token against its vocabulary, certificate set first.
    pub fn validate_permissions(&self) -> AclResult<()> {
        self.certificate_permissions.validate()?;
        self.key_permissions.validate()?;
        self.secret_permissions.validate()?;
        self.storage_permissions.validate()
    }
}

/// Ordered access-policy entries.
///
/// Order is significant: the consumer applies policies in list order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessPolicyList(Vec<AccessPolicyEntry>);

impl ValueObject for AccessPolicyList {}

impl AccessPolicyList {
    pub fn new(entries: Vec<AccessPolicyEntry>) -> Self {
        Self(entries)
    }

    pub fn push(&mut self, entry: AccessPolicyEntry) {
        self.0.push(entry);
    }

    pub fn into_vec(self) -> Vec<AccessPolicyEntry> {
        self.0
    }

    /// Entries granted to `identity`, in list order.
    pub fn entries_for<'a>(
        &'a self,
        identity: &'a Identity,
    ) -> impl Iterator<Item = &'a AccessPolicyEntry> + 'a {
        self.0.iter().filter(move |entry| &entry.identity == identity)
    }
}

impl core::ops::Deref for AccessPolicyList {
    type Target = [AccessPolicyEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<AccessPolicyEntry>> for AccessPolicyList {
    fn from(value: Vec<AccessPolicyEntry>) -> Self {
        Self(value)
    }
}

impl FromIterator<AccessPolicyEntry> for AccessPolicyList {
    fn from_iter<I: IntoIterator<Item = AccessPolicyEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AccessPolicyList {
    type Item = AccessPolicyEntry;
    type IntoIter = std::vec::IntoIter<AccessPolicyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AccessPolicyList {
    type Item = &'a AccessPolicyEntry;
    type IntoIter = core::slice::Iter<'a, AccessPolicyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
