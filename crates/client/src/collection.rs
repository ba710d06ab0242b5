//! Collection traversal.
//!
//! Responsibilities:
//! - Read `Members` (or `Links.Members`) from a collection document.
//! - Fetch and decode each member in document order, following
//!   `Members@odata.nextLink` when enabled.
//! - Return the decoded prefix together with the error when a fetch fails.
//!
//! Invariants:
//! - Members that are already expanded in the collection document are decoded
//!   in place, without a request.
//! - A page URI is fetched at most once per traversal.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

use crate::codec::{Resource, decode_with, get_object};
use crate::error::{ClientError, Result};
use crate::odata::Link;
use crate::transport::SharedTransport;
use redfish_config::ClientOptions;

/// Members decoded before a traversal failed, plus the failure.
pub struct PartialCollection<R> {
    pub items: Vec<R>,
    pub error: ClientError,
}

impl<R> fmt::Debug for PartialCollection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialCollection")
            .field("fetched", &self.items.len())
            .field("error", &self.error)
            .finish()
    }
}

impl<R> fmt::Display for PartialCollection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collection fetch failed after {} members: {}",
            self.items.len(),
            self.error
        )
    }
}

impl<R> std::error::Error for PartialCollection<R> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<R> From<PartialCollection<R>> for ClientError {
    fn from(partial: PartialCollection<R>) -> Self {
        ClientError::Collection {
            fetched: partial.items.len(),
            source: Box::new(partial.error),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct MembersEnvelope {
    #[serde(rename = "Members", default)]
    members: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct CollectionPage {
    #[serde(rename = "Members", default)]
    members: Option<Vec<Value>>,
    #[serde(rename = "Members@odata.count", default)]
    count: Option<u64>,
    #[serde(rename = "Members@odata.nextLink", default)]
    next_link: Option<String>,
    #[serde(rename = "Links", default)]
    links: Option<MembersEnvelope>,
}

impl CollectionPage {
    fn into_members(self) -> (Vec<Value>, Option<String>) {
        let members = match (self.members, self.links) {
            (Some(members), _) => members,
            (None, Some(links)) => links.members,
            (None, None) => Vec::new(),
        };
        (members, self.next_link.filter(|link| !link.is_empty()))
    }
}

/// True when the member object carries properties beyond its link.
fn is_expanded(member: &Value) -> bool {
    member.as_object().is_some_and(|obj| {
        obj.keys().any(|k| k != "href" && !k.contains('@'))
    })
}

async fn load_member<R: Resource>(
    client: &SharedTransport,
    member: &Value,
    options: &ClientOptions,
) -> Result<R> {
    if is_expanded(member) {
        let raw = serde_json::to_vec(member).map_err(|source| ClientError::Decode {
            type_name: R::TYPE_NAME,
            source,
        })?;
        let mut item: R = decode_with(&raw, options)?;
        item.bind(client.clone());
        return Ok(item);
    }

    let link: Link = serde_json::from_value(member.clone()).map_err(|source| {
        ClientError::Decode {
            type_name: R::TYPE_NAME,
            source,
        }
    })?;
    if link.is_empty() {
        return Err(ClientError::InvalidResponse(
            "collection member without @odata.id".to_string(),
        ));
    }
    get_object(client, link.as_str()).await
}

async fn fetch_page(client: &SharedTransport, uri: &str) -> Result<CollectionPage> {
    let response = client.get(uri).await?.error_for_status(uri)?;
    serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
        type_name: "ResourceCollection",
        source,
    })
}

/// Fetch every member of the collection at `uri`.
pub async fn get_collection_objects<R: Resource>(
    client: &SharedTransport,
    uri: &str,
) -> std::result::Result<Vec<R>, PartialCollection<R>> {
    let options = client.options();
    let mut items: Vec<R> = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(uri.to_string());

    while let Some(page_uri) = next.take() {
        if !visited.insert(page_uri.clone()) {
            warn!(uri = %page_uri, "Collection nextLink loops back, stopping");
            break;
        }

        let page = match fetch_page(client, &page_uri).await {
            Ok(page) => page,
            Err(error) => {
                warn!(uri = %page_uri, fetched = items.len(), error = %error, "Collection page fetch failed");
                return Err(PartialCollection { items, error });
            }
        };
        debug!(
            uri = %page_uri,
            resource = R::TYPE_NAME,
            count = ?page.count,
            "Fetched collection page"
        );

        let (members, next_link) = page.into_members();
        for member in &members {
            match load_member::<R>(client, member, &options).await {
                Ok(item) => items.push(item),
                Err(error) => {
                    warn!(uri = %page_uri, fetched = items.len(), error = %error, "Collection member fetch failed");
                    return Err(PartialCollection { items, error });
                }
            }
        }

        if options.follow_next_links {
            next = next_link;
        }
    }

    Ok(items)
}

/// Fetch each linked resource in order.
pub async fn get_objects<R: Resource>(
    client: &SharedTransport,
    uris: &[String],
) -> std::result::Result<Vec<R>, PartialCollection<R>> {
    let mut items = Vec::with_capacity(uris.len());
    for uri in uris {
        match get_object::<R>(client, uri).await {
            Ok(item) => items.push(item),
            Err(error) => {
                warn!(uri = %uri, fetched = items.len(), error = %error, "Linked resource fetch failed");
                return Err(PartialCollection { items, error });
            }
        }
    }
    Ok(items)
}

/// Fetch a linked collection; an empty link yields an empty list.
pub(crate) async fn get_linked_collection<R: Resource>(
    client: Option<&SharedTransport>,
    uri: &str,
) -> Result<Vec<R>> {
    if uri.is_empty() {
        return Ok(Vec::new());
    }
    let client = client.ok_or_else(|| ClientError::Unbound(uri.to_string()))?;
    Ok(get_collection_objects(client, uri).await?)
}

/// Fetch an array of links; an empty array yields an empty list.
pub(crate) async fn get_linked_objects<R: Resource>(
    client: Option<&SharedTransport>,
    uris: &[String],
) -> Result<Vec<R>> {
    if uris.is_empty() {
        return Ok(Vec::new());
    }
    let client = client.ok_or_else(|| {
        ClientError::Unbound(uris.first().cloned().unwrap_or_default())
    })?;
    Ok(get_objects(client, uris).await?)
}
