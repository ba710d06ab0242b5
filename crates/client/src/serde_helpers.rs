//! Serde helpers for vendor type drift in Redfish documents.
//!
//! Responsibilities:
//! - Accept a numeric `MemberId` and render it as a decimal string.
//! - Accept float readings that arrive as JSON strings.
//! - Accept a single object where an array is expected.
//! - Keep the tolerance switchable at runtime so strict decoding reuses the same models.
//!
//! Explicitly does NOT handle:
//! - Any field that is not annotated with one of these helpers. Every other
//!   type mismatch is a hard decode error.
//!
//! Invariants / assumptions:
//! - Tolerance is read from a thread-local flag that `with_loose` sets for the
//!   duration of a synchronous decode. Decoding never suspends, so the flag
//!   cannot leak across tasks.
//! - Errors never echo the offending value beyond its JSON type.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::cell::Cell;

thread_local! {
    static LOOSE: Cell<bool> = const { Cell::new(true) };
}

/// Run `f` with vendor tolerance set to `loose`, restoring the previous
/// setting afterwards (including on unwind).
pub(crate) fn with_loose<T>(loose: bool, f: impl FnOnce() -> T) -> T {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            LOOSE.with(|flag| flag.set(self.0));
        }
    }

    let previous = LOOSE.with(|flag| flag.replace(loose));
    let _restore = Restore(previous);
    f()
}

pub(crate) fn is_loose() -> bool {
    LOOSE.with(Cell::get)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FloatOrString {
    Float(f64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// `MemberId`: string, or a number rendered as its decimal string.
pub fn member_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(StringOrNumber::String(s)) => Ok(s),
        Some(StringOrNumber::Number(n)) if is_loose() => Ok(n.to_string()),
        Some(StringOrNumber::Number(_)) => Err(D::Error::custom(
            "invalid type: number, expected a string member id",
        )),
    }
}

/// Optional float that may arrive as a JSON string.
///
/// An unparseable string decodes as `None` in loose mode.
pub fn opt_f64_loose<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FloatOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FloatOrString::Float(v)) => Ok(Some(v)),
        Some(FloatOrString::String(s)) if is_loose() => Ok(s.trim().parse::<f64>().ok()),
        Some(FloatOrString::String(_)) => Err(D::Error::custom(
            "invalid type: string, expected a number",
        )),
    }
}

/// Array that some services send as a bare object.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(OneOrMany::Many(items)) => Ok(items),
        Some(OneOrMany::One(item)) if is_loose() => Ok(vec![item]),
        Some(OneOrMany::One(_)) => Err(D::Error::custom(
            "invalid type: object, expected an array",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Deserialize)]
    struct MemberIdHolder {
        #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
        member_id: String,
    }

    #[derive(Debug, Deserialize)]
    struct ReadingHolder {
        #[serde(rename = "Reading", default, deserialize_with = "opt_f64_loose")]
        reading: Option<f64>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        #[serde(rename = "Name")]
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct ItemsHolder {
        #[serde(rename = "Items", default, deserialize_with = "one_or_many")]
        items: Vec<Item>,
    }

    #[test]
    fn test_member_id_accepts_string_and_number() {
        let h: MemberIdHolder = serde_json::from_str(r#"{"MemberId": "0"}"#).unwrap();
        assert_eq!(h.member_id, "0");

        let h: MemberIdHolder = serde_json::from_str(r#"{"MemberId": 12}"#).unwrap();
        assert_eq!(h.member_id, "12");

        let h: MemberIdHolder = serde_json::from_str(r#"{"MemberId": null}"#).unwrap();
        assert_eq!(h.member_id, "");
    }

    #[test]
    fn test_member_id_number_rejected_when_strict() {
        let result =
            with_loose(false, || serde_json::from_str::<MemberIdHolder>(r#"{"MemberId": 12}"#));
        assert!(result.is_err());
        assert!(is_loose(), "flag must be restored after the scope");
    }

    #[test]
    fn test_reading_string_parsed_or_dropped() {
        let h: ReadingHolder = serde_json::from_str(r#"{"Reading": "120.5"}"#).unwrap();
        assert_eq!(h.reading, Some(120.5));

        let h: ReadingHolder = serde_json::from_str(r#"{"Reading": "N/A"}"#).unwrap();
        assert_eq!(h.reading, None);

        let h: ReadingHolder = serde_json::from_str(r#"{"Reading": 42}"#).unwrap();
        assert_eq!(h.reading, Some(42.0));
    }

    #[test]
    fn test_reading_string_rejected_when_strict() {
        let result =
            with_loose(false, || serde_json::from_str::<ReadingHolder>(r#"{"Reading": "1.0"}"#));
        assert!(result.is_err());
    }

    #[test]
    fn test_one_or_many_wraps_single_object() {
        let h: ItemsHolder = serde_json::from_str(r#"{"Items": {"Name": "a"}}"#).unwrap();
        assert_eq!(h.items, vec![Item { name: "a".into() }]);

        let h: ItemsHolder =
            serde_json::from_str(r#"{"Items": [{"Name": "a"}, {"Name": "b"}]}"#).unwrap();
        assert_eq!(h.items.len(), 2);

        let h: ItemsHolder = serde_json::from_str(r#"{"Items": null}"#).unwrap();
        assert!(h.items.is_empty());
    }

    #[test]
    fn test_one_or_many_single_rejected_when_strict() {
        let result = with_loose(false, || {
            serde_json::from_str::<ItemsHolder>(r#"{"Items": {"Name": "a"}}"#)
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_flag_restored_after_panic() {
        let outcome = std::panic::catch_unwind(|| {
            with_loose(false, || panic!("decode blew up"));
        });
        assert!(outcome.is_err());
        assert!(is_loose());
    }

    proptest! {
        #[test]
        fn prop_numeric_member_id_renders_decimal(n in any::<u32>()) {
            let doc = format!(r#"{{"MemberId": {n}}}"#);
            let h: MemberIdHolder = serde_json::from_str(&doc).unwrap();
            prop_assert_eq!(h.member_id, n.to_string());
        }

        #[test]
        fn prop_string_reading_matches_number(v in -1.0e6f64..1.0e6f64) {
            let as_string = format!(r#"{{"Reading": "{v}"}}"#);
            let as_number = format!(r#"{{"Reading": {v}}}"#);
            let a: ReadingHolder = serde_json::from_str(&as_string).unwrap();
            let b: ReadingHolder = serde_json::from_str(&as_number).unwrap();
            let (a, b) = (a.reading.unwrap(), b.reading.unwrap());
            prop_assert!((a - b).abs() <= 1e-9 * v.abs().max(1.0));
        }
    }
}
