//! OData envelope primitives shared by every resource.
//!
//! Responsibilities:
//! - Decode navigation links (`{"@odata.id": ...}` or legacy `{"href": ...}`) into URI strings.
//! - Decode link arrays, bare or wrapped in a `{"Members": [...]}` envelope.
//! - Decode action descriptors from the `Actions` envelope.
//!
//! Invariants:
//! - Absent or `null` links decode to an empty URI / empty list, never an error.
//! - A link is a JSON object; strings, numbers and arrays are decode errors.
//! - Link arrays preserve document order and duplicates of every entry that
//!   carries a URI. Entries without one (`null`, `{}`) are dropped, so a
//!   traversal never requests an empty path.

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single navigation link, decoded to its URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link(pub String);

impl Link {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Link {
    fn from(uri: &str) -> Self {
        Link(uri.to_string())
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LinkVisitor)
    }
}

struct LinkVisitor;

impl<'de> Visitor<'de> for LinkVisitor {
    type Value = Link;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a navigation link object or null")
    }

    fn visit_unit<E>(self) -> Result<Link, E>
    where
        E: de::Error,
    {
        Ok(Link::default())
    }

    fn visit_none<E>(self) -> Result<Link, E>
    where
        E: de::Error,
    {
        Ok(Link::default())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Link, D::Error>
    where
        D: Deserializer<'de>,
    {
        Link::deserialize(deserializer)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Link, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut odata_id: Option<String> = None;
        let mut href: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "@odata.id" => odata_id = map.next_value()?,
                "href" => href = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(Link(odata_id.or(href).unwrap_or_default()))
    }
}

impl Serialize for Link {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("@odata.id", &self.0)?;
        map.end()
    }
}

/// An ordered list of navigation links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(pub Vec<String>);

impl Links {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LinksVisitor)
    }
}

struct LinksVisitor;

impl LinksVisitor {
    fn keep(links: impl IntoIterator<Item = Link>) -> Links {
        Links(
            links
                .into_iter()
                .map(|l| l.0)
                .filter(|uri| !uri.is_empty())
                .collect(),
        )
    }
}

impl<'de> Visitor<'de> for LinksVisitor {
    type Value = Links;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of navigation links, a Members envelope, or null")
    }

    fn visit_unit<E>(self) -> Result<Links, E>
    where
        E: de::Error,
    {
        Ok(Links::default())
    }

    fn visit_none<E>(self) -> Result<Links, E>
    where
        E: de::Error,
    {
        Ok(Links::default())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Links, D::Error>
    where
        D: Deserializer<'de>,
    {
        Links::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Links, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(link) = seq.next_element::<Link>()? {
            items.push(link);
        }
        Ok(Self::keep(items))
    }

    /// Either a `{"Members": [...]}` envelope or a single link object.
    fn visit_map<A>(self, mut map: A) -> Result<Links, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut members: Option<Vec<Link>> = None;
        let mut single: Option<String> = None;
        let mut href: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "Members" => members = Some(map.next_value::<Option<Vec<Link>>>()?.unwrap_or_default()),
                "@odata.id" => single = map.next_value()?,
                "href" => href = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(match members {
            Some(items) => Self::keep(items),
            None => Self::keep(single.or(href).map(Link)),
        })
    }
}

impl Serialize for Links {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter().map(|uri| Link(uri.clone())))
    }
}

/// One entry of an `Actions` envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTarget {
    #[serde(default)]
    pub target: String,
    #[serde(
        rename = "@Redfish.ActionInfo",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub action_info: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Holder {
        #[serde(rename = "Chassis")]
        chassis: Link,
        #[serde(rename = "Outlets")]
        outlets: Links,
    }

    #[test]
    fn test_link_accepts_odata_id_and_href() {
        let h: Holder =
            serde_json::from_str(r#"{"Chassis": {"@odata.id": "/redfish/v1/Chassis/1"}}"#).unwrap();
        assert_eq!(h.chassis.as_str(), "/redfish/v1/Chassis/1");

        let h: Holder = serde_json::from_str(r#"{"Chassis": {"href": "/redfish/v1/Chassis/2"}}"#)
            .unwrap();
        assert_eq!(h.chassis.as_str(), "/redfish/v1/Chassis/2");
    }

    #[test]
    fn test_absent_and_null_links_are_empty() {
        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(h.chassis.is_empty());
        assert!(h.outlets.is_empty());

        let h: Holder = serde_json::from_str(r#"{"Chassis": null, "Outlets": null}"#).unwrap();
        assert!(h.chassis.is_empty());
        assert!(h.outlets.is_empty());
    }

    #[test]
    fn test_links_bare_array_and_envelope_are_equivalent() {
        let bare: Holder = serde_json::from_str(
            r#"{"Outlets": [{"@odata.id": "/o/1"}, {"@odata.id": "/o/2"}, {"@odata.id": "/o/1"}]}"#,
        )
        .unwrap();
        let wrapped: Holder = serde_json::from_str(
            r#"{"Outlets": {"Members": [{"@odata.id": "/o/1"}, {"@odata.id": "/o/2"}, {"@odata.id": "/o/1"}]}}"#,
        )
        .unwrap();

        assert_eq!(bare.outlets, wrapped.outlets);
        assert_eq!(bare.outlets.as_slice(), ["/o/1", "/o/2", "/o/1"]);
    }

    #[test]
    fn test_malformed_link_is_decode_error() {
        assert!(serde_json::from_str::<Holder>(r#"{"Chassis": 5}"#).is_err());
    }

    #[test]
    fn test_string_arrays_are_not_links() {
        assert!(serde_json::from_str::<Holder>(r#"{"Outlets": ["/o/1", "/o/2"]}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"Chassis": ["/c/1"]}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"Chassis": "/c/1"}"#).is_err());
        assert!(
            serde_json::from_str::<Holder>(r#"{"Outlets": {"Members": ["/o/1"]}}"#).is_err()
        );
    }

    #[test]
    fn test_link_ignores_annotations() {
        let h: Holder = serde_json::from_str(
            r#"{"Chassis": {"@odata.id": "/c/1", "@odata.etag": "W/\"1\""},
                "Outlets": {"Members@odata.count": 1, "Members": [{"@odata.id": "/o/1"}]}}"#,
        )
        .unwrap();
        assert_eq!(h.chassis.as_str(), "/c/1");
        assert_eq!(h.outlets.as_slice(), ["/o/1"]);
    }

    #[test]
    fn test_entries_without_uri_are_dropped_in_order() {
        let h: Holder = serde_json::from_str(
            r#"{"Outlets": [{"@odata.id": "/o/2"}, null, {}, {"@odata.id": "/o/1"}, {"@odata.id": "/o/2"}]}"#,
        )
        .unwrap();
        assert_eq!(h.outlets.as_slice(), ["/o/2", "/o/1", "/o/2"]);
    }

    #[test]
    fn test_link_serializes_as_odata_object() {
        let value = serde_json::to_value(Link::from("/redfish/v1/Systems/1")).unwrap();
        assert_eq!(value, serde_json::json!({"@odata.id": "/redfish/v1/Systems/1"}));
    }
}
