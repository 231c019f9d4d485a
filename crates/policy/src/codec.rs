//! Conversion between raw and typed access-policy lists.
//!
//! Decoding never fails on structurally valid input: a malformed `tenant_id`
//! or `application_id` becomes the nil UUID, and permission tokens pass
//! through without validation or case changes. Encoding is the inverse, with
//! two deliberate losses: a degraded UUID comes back as the nil UUID string,
//! and `application_id: ""` comes back as an absent field (unless
//! [`AbsentApplicationId::EmitEmpty`] is configured).

use core::str::FromStr;

use tracing::{debug, warn};
use uuid::Uuid;
use vaultacl_core::{AclError, AclResult, ApplicationId, ObjectId, TenantId};
use vaultacl_permissions::{PermissionSet, Vocabulary};

use crate::config::{AbsentApplicationId, CodecConfig, UuidParsing};
use crate::entry::{AccessPolicyEntry, AccessPolicyList, Identity};
use crate::raw::RawAccessPolicy;

/// Decode with the default configuration.
pub fn decode(raw: &[RawAccessPolicy]) -> AccessPolicyList {
    AccessPolicyCodec::default().decode(raw)
}

/// Encode with the default configuration.
pub fn encode(entries: &[AccessPolicyEntry]) -> Vec<RawAccessPolicy> {
    AccessPolicyCodec::default().encode(entries)
}

/// Access-policy codec bound to a [`CodecConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicyCodec {
    config: CodecConfig,
}

impl AccessPolicyCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Raw entries to typed entries, in input order. Never fails.
    ///
    /// Always lenient, whatever [`UuidParsing`] is configured; use
    /// [`AccessPolicyCodec::try_decode`] to have malformed ids reported.
    pub fn decode(&self, raw: &[RawAccessPolicy]) -> AccessPolicyList {
        let list: AccessPolicyList = raw
            .iter()
            .enumerate()
            .map(|(index, entry)| decode_entry(index, entry))
            .collect();

        debug!(entries = list.len(), "decoded access policies");
        list
    }

    /// Like [`AccessPolicyCodec::decode`], but under [`UuidParsing::Strict`]
    /// the first malformed identifier is returned as `InvalidUuid`.
    pub fn try_decode(&self, raw: &[RawAccessPolicy]) -> AclResult<AccessPolicyList> {
        if self.config.uuid_parsing == UuidParsing::Strict {
            for entry in raw {
                check_identity(entry)?;
            }
        }
        Ok(self.decode(raw))
    }

    /// Typed entries back to raw entries, in input order.
    pub fn encode(&self, entries: &[AccessPolicyEntry]) -> Vec<RawAccessPolicy> {
        let raw: Vec<RawAccessPolicy> = entries
            .iter()
            .map(|entry| self.encode_entry(entry))
            .collect();

        debug!(entries = raw.len(), "encoded access policies");
        raw
    }

    fn encode_entry(&self, entry: &AccessPolicyEntry) -> RawAccessPolicy {
        let identity = &entry.identity;

        let application_id = match (identity.application_id, self.config.absent_application_id) {
            (Some(id), _) => Some(id.to_string()),
            (None, AbsentApplicationId::Omit) => None,
            (None, AbsentApplicationId::EmitEmpty) => Some(String::new()),
        };

        RawAccessPolicy {
            tenant_id: identity.tenant_id.to_string(),
            object_id: identity.object_id.as_str().to_string(),
            application_id,
            certificate_permissions: entry.certificate_permissions.to_strings(),
            key_permissions: entry.key_permissions.to_strings(),
            secret_permissions: entry.secret_permissions.to_strings(),
            storage_permissions: entry.storage_permissions.to_strings(),
        }
    }
}

fn decode_entry(index: usize, raw: &RawAccessPolicy) -> AccessPolicyEntry {
    let identity = Identity {
        tenant_id: uuid_or_nil::<TenantId>(index, "tenant_id", &raw.tenant_id),
        object_id: ObjectId::new(raw.object_id.as_str()),
        application_id: raw
            .supplied_application_id()
            .map(|id| uuid_or_nil::<ApplicationId>(index, "application_id", id)),
    };

    AccessPolicyEntry {
        identity,
        certificate_permissions: verbatim(raw),
        key_permissions: verbatim(raw),
        secret_permissions: verbatim(raw),
        storage_permissions: verbatim(raw),
    }
}

/// The codec's only lenient coercion: a malformed id becomes the nil UUID.
fn uuid_or_nil<T>(index: usize, field: &'static str, value: &str) -> T
where
    T: FromStr<Err = AclError> + From<Uuid>,
{
    value.parse().unwrap_or_else(|err: AclError| {
        warn!(index, field, value, error = %err, "malformed uuid replaced with nil");
        T::from(Uuid::nil())
    })
}

fn check_identity(raw: &RawAccessPolicy) -> AclResult<()> {
    raw.tenant_id.parse::<TenantId>()?;
    if let Some(id) = raw.supplied_application_id() {
        id.parse::<ApplicationId>()?;
    }
    Ok(())
}

/// Tokens of `V`'s category, as authored.
fn verbatim<V: Vocabulary>(raw: &RawAccessPolicy) -> PermissionSet<V> {
    PermissionSet::from_tokens(raw.permissions(V::CATEGORY).iter().cloned())
}
