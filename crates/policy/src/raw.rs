use serde::{Deserialize, Serialize};
use vaultacl_permissions::PermissionCategory;

/// Flat, user-authored access-policy record.
///
/// The field set is fixed. Presence of `tenant_id` / `object_id` is the front
/// end's concern; absent strings read as `""` and absent lists as empty.
/// `application_id` is the only field whose absence survives encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAccessPolicy {
    #[serde(default)]
    pub tenant_id: String,

    #[serde(default)]
    pub object_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    #[serde(default)]
    pub certificate_permissions: Vec<String>,

    #[serde(default)]
    pub key_permissions: Vec<String>,

    #[serde(default)]
    pub secret_permissions: Vec<String>,

    #[serde(default)]
    pub storage_permissions: Vec<String>,
}

impl RawAccessPolicy {
    pub fn new(tenant_id: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            object_id: object_id.into(),
            ..Self::default()
        }
    }

    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    pub fn with_permissions<I, S>(mut self, category: PermissionCategory, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.permissions_mut(category) = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// The list field holding `category`'s tokens.
    pub fn permissions(&self, category: PermissionCategory) -> &[String] {
        match category {
            PermissionCategory::Certificate => &self.certificate_permissions,
            PermissionCategory::Key => &self.key_permissions,
            PermissionCategory::Secret => &self.secret_permissions,
            PermissionCategory::Storage => &self.storage_permissions,
        }
    }

    pub fn permissions_mut(&mut self, category: PermissionCategory) -> &mut Vec<String> {
        match category {
            PermissionCategory::Certificate => &mut self.certificate_permissions,
            PermissionCategory::Key => &mut self.key_permissions,
            PermissionCategory::Secret => &mut self.secret_permissions,
            PermissionCategory::Storage => &mut self.storage_permissions,
        }
    }

    /// `application_id` if present and non-empty.
    pub fn supplied_application_id(&self) -> Option<&str> {
        self.application_id.as_deref().filter(|id| !id.is_empty())
    }
}
