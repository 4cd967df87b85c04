//! Pure transformations over `serde_json::Value` trees applied around the wire.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Copy of `value` with every null member and null array element removed
///
/// Idempotent: pruning an already pruned tree gives the same tree.
pub fn remove_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), remove_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|v| !v.is_null())
                .map(remove_nulls)
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Scrub every string leaf (and object key) of byte-order marks and NULs
pub fn normalize_text(value: &mut Value) {
    match value {
        Value::String(s) => {
            if s.contains(|c| c == BYTE_ORDER_MARK || c == '\0') {
                *s = clean(s);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_text),
        Value::Object(map) => {
            let entries = std::mem::take(map);
            *map = entries
                .into_iter()
                .map(|(k, mut v)| {
                    normalize_text(&mut v);
                    (clean(&k), v)
                })
                .collect::<Map<String, Value>>();
        }
        _ => {}
    }
}

fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| *c != BYTE_ORDER_MARK && *c != '\0')
        .collect()
}

/// Rewrite date-shaped members to `YYYY-MM-DDTHH:MM:SS.mmmZ`
///
/// A member is date-shaped when its key contains `date` (any case) and its
/// value is an epoch-millis integer or a parseable date-time string. Anything
/// else is left untouched.
pub fn format_dates(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, member) in map.iter_mut() {
                if key.to_ascii_lowercase().contains("date") {
                    if let Some(canonical) = canonical_date(member) {
                        *member = Value::String(canonical);
                        continue;
                    }
                }
                format_dates(member);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(format_dates),
        _ => {}
    }
}

fn canonical_date(value: &Value) -> Option<String> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Value::String(s) => parse_date_text(s.trim()),
        _ => None,
    }?;
    Some(parsed.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Mutable handle on `transaction.order` if the tree has one
pub fn transaction_order_mut(value: &mut Value) -> Option<&mut Map<String, Value>> {
    value
        .get_mut("transaction")?
        .get_mut("order")?
        .as_object_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remove_nulls_recurses_and_leaves_original() {
        let original = json!({
            "id": "1",
            "plan": null,
            "customer": {"email": null, "creditCards": [null, {"token": "t", "name": null}]},
        });
        let pruned = remove_nulls(&original);
        assert_eq!(
            pruned,
            json!({"id": "1", "customer": {"creditCards": [{"token": "t"}]}})
        );
        assert!(original["plan"].is_null());
    }

    #[test]
    fn test_remove_nulls_is_idempotent() {
        let tree = json!({"a": [1, null, {"b": null, "c": [null]}], "d": null});
        let once = remove_nulls(&tree);
        assert_eq!(remove_nulls(&once), once);
    }

    #[test]
    fn test_normalize_text_strips_bom_and_nul() {
        let mut tree = json!({"\u{feff}name": "\u{feff}Jos\u{e9}\0", "list": ["ok"]});
        normalize_text(&mut tree);
        assert_eq!(tree, json!({"name": "Jos\u{e9}", "list": ["ok"]}));
    }

    #[test]
    fn test_format_dates() {
        let mut tree = json!({
            "creationDate": 1_411_603_200_000_i64,
            "recurringBills": [{"dateCharge": "2014-09-25 00:00:00"}],
            "updateDate": "not a date",
            "amount": 1_411_603_200_000_i64,
        });
        format_dates(&mut tree);
        assert_eq!(tree["creationDate"], json!("2014-09-25T00:00:00.000Z"));
        assert_eq!(
            tree["recurringBills"][0]["dateCharge"],
            json!("2014-09-25T00:00:00.000Z")
        );
        assert_eq!(tree["updateDate"], json!("not a date"));
        assert_eq!(tree["amount"], json!(1_411_603_200_000_i64));
    }

    #[test]
    fn test_transaction_order_lookup() {
        let mut tree = json!({"transaction": {"order": {"referenceCode": "r1"}}});
        assert!(transaction_order_mut(&mut tree).is_some());
        let mut other = json!({"transaction": {"type": "AUTHORIZATION"}});
        assert!(transaction_order_mut(&mut other).is_none());
    }
}
