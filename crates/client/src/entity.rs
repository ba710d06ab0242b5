//! Identity and binding state shared by every resource.
//!
//! Responsibilities:
//! - Decode the common identity properties (`@odata.id`, `@odata.type`,
//!   `@odata.etag`, `Id`, `Name`).
//! - Hold the bound transport and the raw document bytes used for diffing.
//! - Produce conditional-request headers (`If-Match`).
//!
//! Invariants:
//! - The transport handle, raw bytes and response ETag never serialize.
//! - Equality compares identity properties only.

use reqwest::header::{HeaderMap, HeaderValue, IF_MATCH};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClientError, Result};
use crate::transport::SharedTransport;

/// Common identity of a Redfish resource, flattened into each resource type.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
    #[serde(rename = "@odata.type", default, skip_serializing_if = "String::is_empty")]
    pub odata_type: String,
    #[serde(rename = "@odata.etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(skip)]
    client: Option<SharedTransport>,
    #[serde(skip)]
    raw_data: Vec<u8>,
    #[serde(skip)]
    response_etag: Option<String>,
    #[serde(skip)]
    strip_etag_quotes: bool,
    #[serde(skip)]
    disable_etag_match: bool,
}

impl Entity {
    /// Bind the transport used for links, actions and updates.
    pub fn set_client(&mut self, client: SharedTransport) {
        self.client = Some(client);
    }

    /// The bound transport.
    pub fn client(&self) -> Result<&SharedTransport> {
        self.client
            .as_ref()
            .ok_or_else(|| ClientError::Unbound(self.odata_id.clone()))
    }

    pub(crate) fn client_opt(&self) -> Option<&SharedTransport> {
        self.client.as_ref()
    }

    /// The exact bytes this resource was last decoded from.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    pub(crate) fn set_raw_data(&mut self, raw: Vec<u8>) {
        self.raw_data = raw;
    }

    /// Record the `ETag` response header of the request that produced this resource.
    pub fn set_response_etag(&mut self, etag: Option<String>) {
        self.response_etag = etag;
    }

    /// The ETag used for conditional requests: the document's `@odata.etag`,
    /// falling back to the `ETag` response header.
    pub fn current_etag(&self) -> Option<&str> {
        self.etag
            .as_deref()
            .filter(|tag| !tag.is_empty())
            .or_else(|| self.response_etag.as_deref().filter(|tag| !tag.is_empty()))
    }

    /// Adopt the `ETag` returned by a successful write. It supersedes both the
    /// document tag and any earlier response header.
    pub(crate) fn replace_etag(&mut self, etag: String) {
        self.etag = Some(etag.clone());
        self.response_etag = Some(etag);
    }

    /// Send the ETag without surrounding quotes.
    pub fn strip_etag_quotes(&mut self, strip: bool) {
        self.strip_etag_quotes = strip;
    }

    /// Never send `If-Match`.
    pub fn disable_etag_match(&mut self, disable: bool) {
        self.disable_etag_match = disable;
    }

    /// Headers for PATCH and POST requests against this resource.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if self.disable_etag_match {
            return headers;
        }
        if let Some(tag) = self.current_etag() {
            let tag = if self.strip_etag_quotes {
                tag.trim_matches('"')
            } else {
                tag
            };
            match HeaderValue::from_str(tag) {
                Ok(value) => {
                    headers.insert(IF_MATCH, value);
                }
                Err(_) => {
                    tracing::warn!(uri = %self.odata_id, "Ignoring ETag that is not a valid header value");
                }
            }
        }
        headers
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("odata_id", &self.odata_id)
            .field("odata_type", &self.odata_type)
            .field("etag", &self.etag)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("bound", &self.client.is_some())
            .field("raw_len", &self.raw_data.len())
            .finish()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.odata_id == other.odata_id
            && self.odata_type == other.odata_type
            && self.etag == other.etag
            && self.id == other.id
            && self.name == other.name
    }
}
