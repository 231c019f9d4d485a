//! Field declarations and validation for the layer that surfaces raw entries
//! to an end user.
//!
//! The codec never calls into this module. A front end validates raw entries
//! here before decoding, and uses the case-insensitive comparisons when
//! diffing a configured entry against the one read back from the service.

use vaultacl_core::{AclError, ApplicationId, TenantId};
use vaultacl_permissions::{PermissionCategory, catalog};

use crate::raw::RawAccessPolicy;

/// Shape of a raw field's value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldShape {
    /// A single string.
    String,
    /// A list of tokens from one permission vocabulary.
    List(PermissionCategory),
}

/// Declaration of one raw field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub shape: FieldShape,
    pub required: bool,
    /// List elements compare ignoring ASCII case when diffing.
    pub case_insensitive: bool,
}

impl FieldSchema {
    const fn string(name: &'static str, required: bool) -> Self {
        Self {
            name,
            shape: FieldShape::String,
            required,
            case_insensitive: false,
        }
    }

    const fn permissions(category: PermissionCategory, name: &'static str) -> Self {
        Self {
            name,
            shape: FieldShape::List(category),
            required: false,
            case_insensitive: true,
        }
    }

    /// Whether `token` is an acceptable element of this field.
    pub fn accepts(&self, token: &str) -> bool {
        match self.shape {
            FieldShape::String => true,
            FieldShape::List(category) => catalog::validate(category, token),
        }
    }
}

/// The fields of a raw access-policy entry, in declaration order.
pub static ACCESS_POLICY_FIELDS: [FieldSchema; 7] = [
    FieldSchema::string("tenant_id", true),
    FieldSchema::string("object_id", true),
    FieldSchema::string("application_id", false),
    FieldSchema::permissions(PermissionCategory::Certificate, "certificate_permissions"),
    FieldSchema::permissions(PermissionCategory::Key, "key_permissions"),
    FieldSchema::permissions(PermissionCategory::Secret, "secret_permissions"),
    FieldSchema::permissions(PermissionCategory::Storage, "storage_permissions"),
];

/// Declaration of the field called `name`.
pub fn field(name: &str) -> Option<&'static FieldSchema> {
    ACCESS_POLICY_FIELDS.iter().find(|f| f.name == name)
}

/// Validate one raw entry, collecting every problem.
///
/// Checks required fields, the UUID form of `tenant_id` and of a non-empty
/// `application_id`, and every permission token against its vocabulary.
pub fn validate_raw(raw: &RawAccessPolicy) -> Result<(), Vec<AclError>> {
    let mut errors = Vec::new();

    if raw.tenant_id.is_empty() {
        errors.push(AclError::missing_field("tenant_id"));
    } else if let Err(err) = raw.tenant_id.parse::<TenantId>() {
        errors.push(err);
    }

    if raw.object_id.is_empty() {
        errors.push(AclError::missing_field("object_id"));
    }

    if let Some(id) = raw.supplied_application_id() {
        if let Err(err) = id.parse::<ApplicationId>() {
            errors.push(err);
        }
    }

    for category in PermissionCategory::ALL {
        for token in raw.permissions(category) {
            if let Err(err) = catalog::parse_token(category, token) {
                errors.push(err);
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a list of raw entries; errors carry the entry index.
pub fn validate_all(raw: &[RawAccessPolicy]) -> Result<(), Vec<(usize, AclError)>> {
    let errors: Vec<(usize, AclError)> = raw
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| validate_raw(entry).err().map(|errs| (index, errs)))
        .flat_map(|(index, errs)| errs.into_iter().map(move |err| (index, err)))
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// True when two token values differ only by ASCII case.
pub fn suppress_case_difference(old: &str, new: &str) -> bool {
    old.eq_ignore_ascii_case(new)
}

/// Element-wise [`suppress_case_difference`] over two token lists.
pub fn permissions_equivalent(old: &[String], new: &[String]) -> bool {
    old.len() == new.len()
        && old
            .iter()
            .zip(new.iter())
            .all(|(a, b)| suppress_case_difference(a, b))
}

/// Names of the fields that differ between `old` and `new`, in declaration order.
///
/// Permission lists differing only by case are not reported, and an empty
/// `application_id` is treated as absent.
pub fn changed_fields(old: &RawAccessPolicy, new: &RawAccessPolicy) -> Vec<&'static str> {
    let mut changed = Vec::new();

    for schema in &ACCESS_POLICY_FIELDS {
        let differs = match (schema.name, schema.shape) {
            ("tenant_id", _) => old.tenant_id != new.tenant_id,
            ("object_id", _) => old.object_id != new.object_id,
            ("application_id", _) => {
                old.supplied_application_id() != new.supplied_application_id()
            }
            (_, FieldShape::List(category)) => {
                let (a, b) = (old.permissions(category), new.permissions(category));
                if schema.case_insensitive {
                    !permissions_equivalent(a, b)
                } else {
                    a != b
                }
            }
            (_, FieldShape::String) => false,
        };

        if differs {
            changed.push(schema.name);
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    const TENANT: &str = "11111111-1111-1111-1111-111111111111";

    #[test]
    fn declarations_cover_every_raw_field() {
        let names: Vec<_> = ACCESS_POLICY_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "tenant_id",
                "object_id",
                "application_id",
                "certificate_permissions",
                "key_permissions",
                "secret_permissions",
                "storage_permissions"
            ]
        );

        for category in PermissionCategory::ALL {
            let schema = field(category.field_name()).unwrap();
            assert_eq!(schema.shape, FieldShape::List(category));
            assert!(!schema.required);
            assert!(schema.case_insensitive);
        }

        assert!(field("tenant_id").unwrap().required);
        assert!(!field("application_id").unwrap().required);
        assert!(field("permissions").is_none());
    }

    #[test]
    fn list_fields_accept_vocabulary_in_any_case() {
        let keys = field("key_permissions").unwrap();
        assert!(keys.accepts("UnwrapKey"));
        assert!(!keys.accepts("set"));
        assert!(field("object_id").unwrap().accepts("anything"));
    }

    #[test]
    fn valid_entry_passes() {
        let raw = RawAccessPolicy::new(TENANT, "obj-1")
            .with_application_id("")
            .with_permissions(PermissionCategory::Certificate, ["Get", "ManageContacts"])
            .with_permissions(PermissionCategory::Storage, ["GETSAS"]);
        assert_eq!(validate_raw(&raw), Ok(()));
    }

    #[test]
    fn every_problem_is_collected() {
        let raw = RawAccessPolicy::new("not-a-uuid", "")
            .with_application_id("also-not")
            .with_permissions(PermissionCategory::Key, ["get", "frobnicate"])
            .with_permissions(PermissionCategory::Secret, ["sign"]);

        let errors = validate_raw(&raw).unwrap_err();
        assert_eq!(
            errors,
            vec![
                AclError::invalid_uuid("tenant_id", "not-a-uuid"),
                AclError::missing_field("object_id"),
                AclError::invalid_uuid("application_id", "also-not"),
                AclError::invalid_permission("key", "frobnicate"),
                AclError::invalid_permission("secret", "sign"),
            ]
        );
    }

    #[test]
    fn missing_tenant_is_reported_once() {
        let errors = validate_raw(&RawAccessPolicy::new("", "obj-1")).unwrap_err();
        assert_eq!(errors, vec![AclError::missing_field("tenant_id")]);
    }

    #[test]
    fn validate_all_tags_entry_index() {
        let raw = vec![
            RawAccessPolicy::new(TENANT, "ok"),
            RawAccessPolicy::new(TENANT, "bad")
                .with_permissions(PermissionCategory::Secret, ["nope"]),
        ];
        assert_eq!(
            validate_all(&raw),
            Err(vec![(1, AclError::invalid_permission("secret", "nope"))])
        );
        assert_eq!(validate_all(&raw[..1]), Ok(()));
        assert_eq!(validate_all(&[]), Ok(()));
    }

    #[test]
    fn case_differences_are_suppressed() {
        assert!(suppress_case_difference("Get", "get"));
        assert!(!suppress_case_difference("get", "list"));

        let a = vec!["Get".to_string(), "List".to_string()];
        let b = vec!["get".to_string(), "list".to_string()];
        let c = vec!["list".to_string(), "get".to_string()];
        assert!(permissions_equivalent(&a, &b));
        assert!(!permissions_equivalent(&a, &c));
        assert!(!permissions_equivalent(&a, &a[..1]));
    }

    #[test]
    fn changed_fields_ignores_case_and_empty_application_id() {
        let old = RawAccessPolicy::new(TENANT, "obj-1")
            .with_permissions(PermissionCategory::Key, ["Get", "List"]);
        let same = old
            .clone()
            .with_application_id("")
            .with_permissions(PermissionCategory::Key, ["get", "list"]);
        assert!(changed_fields(&old, &same).is_empty());

        let new = old
            .clone()
            .with_permissions(PermissionCategory::Key, ["get"])
            .with_permissions(PermissionCategory::Secret, ["get"]);
        assert_eq!(
            changed_fields(&old, &new),
            ["key_permissions", "secret_permissions"]
        );

        let moved = RawAccessPolicy::new(TENANT, "obj-2")
            .with_application_id("22222222-2222-2222-2222-222222222222");
        assert_eq!(
            changed_fields(&RawAccessPolicy::new(TENANT, "obj-1"), &moved),
            ["object_id", "application_id"]
        );
    }
}
