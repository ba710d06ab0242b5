//! Resource codec: typed decode, envelope capture and transport binding.
//!
//! Responsibilities:
//! - Define the `Resource` trait implemented by every resource type.
//! - Decode a document twice from the same bytes: once into the public value,
//!   once into the resource's private `Actions`/`Links` capture.
//! - Fetch single resources and bind them to the transport that produced them.
//!
//! Does NOT handle:
//! - Diffing and PATCH construction (see `update`).
//! - Collection traversal (see `collection`).
//!
//! Invariants:
//! - After a successful decode the resource's raw data equals the input bytes.
//! - Decoding builds a new value; a failed decode or reload never modifies an
//!   existing resource.
//! - Captured URIs are refreshed on every decode.

use async_trait::async_trait;
use redfish_config::ClientOptions;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::collection::{PartialCollection, get_collection_objects};
use crate::entity::Entity;
use crate::error::{ClientError, Result};
use crate::serde_helpers::with_loose;
use crate::transport::SharedTransport;
use crate::update::{UpdateOutcome, apply_update};

/// A Redfish resource type.
///
/// Most implementations come from `impl_resource!`; resource types that carry
/// embedded updatable sub-resources override `capture_refs` and `bind`.
#[async_trait]
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + Sized + 'static {
    /// Schema name used in logs and decode errors.
    const TYPE_NAME: &'static str;

    /// Top-level properties the service accepts in a PATCH.
    const WRITABLE: &'static [&'static str] = &[];

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    /// Decode the envelope properties (actions, links) from the same bytes
    /// the public value was decoded from.
    fn capture_refs(&mut self, _raw: &[u8]) -> serde_json::Result<()> {
        Ok(())
    }

    /// Bind this resource (and any embedded resources) to a transport.
    fn bind(&mut self, client: SharedTransport) {
        self.entity_mut().set_client(client);
    }

    /// Fetch and decode the resource at `uri`.
    async fn get(client: &SharedTransport, uri: &str) -> Result<Self> {
        get_object(client, uri).await
    }

    /// Fetch every member of the collection at `uri`.
    async fn list(
        client: &SharedTransport,
        uri: &str,
    ) -> std::result::Result<Vec<Self>, PartialCollection<Self>> {
        get_collection_objects(client, uri).await
    }

    /// PATCH the writable properties that changed since the last decode.
    async fn update(&mut self) -> Result<UpdateOutcome> {
        apply_update(self).await
    }

    /// Re-fetch this resource from its `@odata.id`. On failure the current
    /// value is left as it was.
    async fn refresh(&mut self) -> Result<()> {
        let client = self.entity().client()?.clone();
        let uri = self.entity().odata_id.clone();
        let fresh = get_object::<Self>(&client, &uri).await?;
        *self = fresh;
        Ok(())
    }

    /// Replace this value with one decoded from `raw`, keeping the transport
    /// binding.
    fn update_from_raw_data(&mut self, raw: &[u8]) -> Result<()> {
        let client = self.entity().client_opt().cloned();
        let options = client.as_ref().map(|c| c.options()).unwrap_or_default();
        let mut fresh = decode_with::<Self>(raw, &options)?;
        if let Some(client) = client {
            fresh.bind(client);
        }
        *self = fresh;
        Ok(())
    }
}

fn decode_error<R: Resource>(source: serde_json::Error) -> ClientError {
    ClientError::Decode {
        type_name: R::TYPE_NAME,
        source,
    }
}

/// Decode a document with default (vendor tolerant) options.
pub fn decode<R: Resource>(raw: &[u8]) -> Result<R> {
    decode_with(raw, &ClientOptions::default())
}

/// Decode a document, applying `options.loose` to the tolerant fields.
pub fn decode_with<R: Resource>(raw: &[u8], options: &ClientOptions) -> Result<R> {
    with_loose(options.loose, || {
        let mut value: R = serde_json::from_slice(raw).map_err(decode_error::<R>)?;
        value.capture_refs(raw).map_err(decode_error::<R>)?;
        value.entity_mut().set_raw_data(raw.to_vec());
        Ok(value)
    })
}

/// Give each embedded resource its own raw data and captured envelope.
///
/// `docs` are the sub-documents the items were decoded from, in the same order.
pub(crate) fn attach_embedded<R: Resource>(items: &mut [R], docs: &[Value]) -> serde_json::Result<()> {
    for (item, doc) in items.iter_mut().zip(docs) {
        let raw = serde_json::to_vec(doc)?;
        item.capture_refs(&raw)?;
        item.entity_mut().set_raw_data(raw);
    }
    Ok(())
}

/// Bind each embedded resource to `client`.
pub(crate) fn bind_embedded<R: Resource>(items: &mut [R], client: &SharedTransport) {
    for item in items {
        item.bind(client.clone());
    }
}

/// GET `uri` and decode it as `R`, bound to `client`.
pub async fn get_object<R: Resource>(client: &SharedTransport, uri: &str) -> Result<R> {
    debug!(uri = %uri, resource = R::TYPE_NAME, "Fetching Redfish resource");

    let response = client.get(uri).await?.error_for_status(uri)?;
    let mut value: R = match decode_with(&response.body, &client.options()) {
        Ok(value) => value,
        Err(err) => {
            client.record_decode_failure(uri, R::TYPE_NAME);
            return Err(err);
        }
    };
    let etag = response.header("ETag").map(str::to_string);
    value.entity_mut().set_response_etag(etag);
    value.bind(client.clone());
    Ok(value)
}

/// GET a linked resource; an empty link yields `None` without a request.
pub async fn get_optional<R: Resource>(client: Option<&SharedTransport>, uri: &str) -> Result<Option<R>> {
    if uri.is_empty() {
        return Ok(None);
    }
    let client = client.ok_or_else(|| ClientError::Unbound(uri.to_string()))?;
    get_object(client, uri).await.map(Some)
}

/// Implement `Resource` for a struct with a flattened `entity` field.
///
/// ```ignore
/// impl_resource!(Zone, "Zone");
/// impl_resource!(Circuit, "Circuit", writable: CIRCUIT_WRITABLE, refs: refs);
/// ```
macro_rules! impl_resource {
    (@entity) => {
        fn entity(&self) -> &$crate::entity::Entity {
            &self.entity
        }

        fn entity_mut(&mut self) -> &mut $crate::entity::Entity {
            &mut self.entity
        }
    };
    ($ty:ty, $name:literal) => {
        impl $crate::codec::Resource for $ty {
            const TYPE_NAME: &'static str = $name;
            impl_resource!(@entity);
        }
    };
    ($ty:ty, $name:literal, writable: $writable:expr) => {
        impl $crate::codec::Resource for $ty {
            const TYPE_NAME: &'static str = $name;
            const WRITABLE: &'static [&'static str] = $writable;
            impl_resource!(@entity);
        }
    };
    ($ty:ty, $name:literal, refs: $refs:ident) => {
        impl $crate::codec::Resource for $ty {
            const TYPE_NAME: &'static str = $name;
            impl_resource!(@entity);

            fn capture_refs(&mut self, raw: &[u8]) -> serde_json::Result<()> {
                self.$refs = serde_json::from_slice(raw)?;
                Ok(())
            }
        }
    };
    ($ty:ty, $name:literal, writable: $writable:expr, refs: $refs:ident) => {
        impl $crate::codec::Resource for $ty {
            const TYPE_NAME: &'static str = $name;
            const WRITABLE: &'static [&'static str] = $writable;
            impl_resource!(@entity);

            fn capture_refs(&mut self, raw: &[u8]) -> serde_json::Result<()> {
                self.$refs = serde_json::from_slice(raw)?;
                Ok(())
            }
        }
    };
}

pub(crate) use impl_resource;
