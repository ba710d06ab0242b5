//! Writable-field differ and PATCH builder.
//!
//! Responsibilities:
//! - Compare a resource's current writable properties with the document it was decoded from.
//! - PATCH only the properties that changed, with the resource's conditional headers.
//!
//! Does NOT handle:
//! - Nested diffs. A changed object or array property is sent whole.
//! - Reverting local changes when the PATCH fails.
//!
//! Invariants:
//! - Both sides of the comparison go through the same typed serializer, so
//!   numeric formatting differences in the source document never count as changes.
//! - A property absent from the document compares equal to `null`.
//! - No changes means no network call.

use serde_json::{Map, Value};
use tracing::debug;

use crate::codec::Resource;
use crate::error::{ClientError, Result};
use crate::serde_helpers::with_loose;

/// Result of a successful `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing changed; no request was sent.
    Unchanged,
    /// A PATCH carrying these properties was accepted.
    Applied { fields: Vec<String> },
}

fn to_object<T: serde::Serialize>(value: &T) -> serde_json::Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn decode_error<R: Resource>(source: serde_json::Error) -> ClientError {
    ClientError::Decode {
        type_name: R::TYPE_NAME,
        source,
    }
}

/// The writable properties whose serialized value differs from the last
/// decoded document, keyed by property name.
pub fn changed_fields<R: Resource>(resource: &R) -> Result<Map<String, Value>> {
    let current = to_object(resource).map_err(decode_error::<R>)?;

    let raw = resource.entity().raw_data();
    let original = if raw.is_empty() {
        Map::new()
    } else {
        let typed: R = with_loose(true, || serde_json::from_slice(raw)).map_err(decode_error::<R>)?;
        to_object(&typed).map_err(decode_error::<R>)?
    };

    let mut changed = Map::new();
    for &name in R::WRITABLE {
        let now = current.get(name).unwrap_or(&Value::Null);
        let before = original.get(name).unwrap_or(&Value::Null);
        if now != before {
            changed.insert(name.to_string(), now.clone());
        }
    }
    Ok(changed)
}

/// Merge the applied properties into the stored raw document so the next
/// diff starts from what the service accepted.
fn merged_raw(raw: &[u8], changed: &Map<String, Value>) -> serde_json::Result<Vec<u8>> {
    let mut doc = if raw.is_empty() {
        Map::new()
    } else {
        match serde_json::from_slice::<Value>(raw)? {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    };
    for (key, value) in changed {
        doc.insert(key.clone(), value.clone());
    }
    serde_json::to_vec(&Value::Object(doc))
}

pub(crate) async fn apply_update<R: Resource>(resource: &mut R) -> Result<UpdateOutcome> {
    let changed = changed_fields(resource)?;
    let uri = resource.entity().odata_id.clone();

    if changed.is_empty() {
        let options = resource
            .entity()
            .client_opt()
            .map(|c| c.options())
            .unwrap_or_default();
        debug!(uri = %uri, resource = R::TYPE_NAME, "No writable changes, skipping PATCH");
        return if options.noop_update_returns_success {
            Ok(UpdateOutcome::Unchanged)
        } else {
            Err(ClientError::NoOpUpdate)
        };
    }

    let client = resource.entity().client()?.clone();
    let headers = resource.entity().headers();
    let fields: Vec<String> = changed.keys().cloned().collect();
    debug!(uri = %uri, resource = R::TYPE_NAME, fields = ?fields, "Patching Redfish resource");

    let body = Value::Object(changed.clone());
    let response = client.patch(&uri, &body, &headers).await?.error_for_status(&uri)?;

    let raw = merged_raw(resource.entity().raw_data(), &changed).map_err(decode_error::<R>)?;
    let entity = resource.entity_mut();
    entity.set_raw_data(raw);
    if let Some(etag) = response.header("ETag") {
        entity.replace_etag(etag.to_string());
    }

    Ok(UpdateOutcome::Applied { fields })
}
