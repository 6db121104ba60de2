// src/ingest/resolve.rs
//! Ordered fallback lookups over untyped JSON.
//!
//! Upstream payloads are undocumented and drift, so nothing here fails: a
//! missing key, an out-of-range index or a value of the wrong shape all
//! resolve to `None`. JSON `null` counts as absent.

use serde_json::Value;

/// One step into a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

pub use Step::{Index, Key};

/// Follow `path` from `root`. Returns `None` when any step is missing or
/// the final value is `null`.
pub fn at<'v>(root: &'v Value, path: &[Step<'_>]) -> Option<&'v Value> {
    let mut cur = root;
    for step in path {
        cur = match step {
            Step::Key(k) => cur.get(*k)?,
            Step::Index(i) => cur.get(*i)?,
        };
    }
    (!cur.is_null()).then_some(cur)
}

/// Try each path in priority order and return the first defined value.
/// Later paths are not looked at once one resolves.
pub fn first_defined<'v>(root: &'v Value, paths: &[&[Step<'_>]]) -> Option<&'v Value> {
    paths.iter().find_map(|p| at(root, p))
}

/// Render a scalar as text. Strings pass through, numbers and booleans are
/// formatted; objects and arrays degrade to `None`.
pub fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First defined value along `paths`, rendered as text.
///
/// A value that resolves but cannot be rendered still wins the chain and
/// yields `None`, so a later fallback never overrides a present field.
pub fn text(root: &Value, paths: &[&[Step<'_>]]) -> Option<String> {
    first_defined(root, paths).and_then(as_text)
}

/// Owned copy of the value at `path`, whatever its shape.
pub fn value(root: &Value, path: &[Step<'_>]) -> Option<Value> {
    at(root, path).cloned()
}

/// Array at `path`, or an empty slice when absent or not an array.
pub fn items<'v>(root: &'v Value, path: &[Step<'_>]) -> &'v [Value] {
    at(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn at_walks_keys_and_indices() {
        let v = json!({"a": {"b": [10, {"c": "x"}]}});
        assert_eq!(at(&v, &[Key("a"), Key("b"), Index(0)]), Some(&json!(10)));
        assert_eq!(
            at(&v, &[Key("a"), Key("b"), Index(1), Key("c")]),
            Some(&json!("x"))
        );
        assert_eq!(at(&v, &[Key("a"), Key("b"), Index(5)]), None);
        assert_eq!(at(&v, &[Key("a"), Key("zzz")]), None);
        // key lookup on an array / index lookup on an object
        assert_eq!(at(&v, &[Key("a"), Key("b"), Key("c")]), None);
        assert_eq!(at(&v, &[Key("a"), Index(0)]), None);
    }

    #[test]
    fn null_counts_as_absent() {
        let v = json!({"primary": null, "secondary": "s"});
        assert_eq!(
            text(&v, &[&[Key("primary")], &[Key("secondary")]]),
            Some("s".to_string())
        );
    }

    #[test]
    fn first_match_wins_in_order() {
        let v = json!({"a": "first", "b": "second"});
        assert_eq!(text(&v, &[&[Key("a")], &[Key("b")]]).as_deref(), Some("first"));
        assert_eq!(text(&v, &[&[Key("b")], &[Key("a")]]).as_deref(), Some("second"));
        assert_eq!(text(&v, &[&[Key("x")], &[Key("y")]]), None);
    }

    #[test]
    fn present_but_unrenderable_does_not_fall_through() {
        let v = json!({"a": {"nested": true}, "b": "fallback"});
        assert_eq!(text(&v, &[&[Key("a")], &[Key("b")]]), None);
    }

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(as_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(as_text(&json!(false)).as_deref(), Some("false"));
        assert_eq!(as_text(&json!([1])), None);
    }

    #[test]
    fn value_passes_through_unchanged() {
        let v = json!({"n": 1.5, "s": "high", "z": null});
        assert_eq!(value(&v, &[Key("n")]), Some(json!(1.5)));
        assert_eq!(value(&v, &[Key("s")]), Some(json!("high")));
        assert_eq!(value(&v, &[Key("z")]), None);
    }

    #[test]
    fn items_is_empty_for_non_arrays() {
        let v = json!({"list": [1, 2], "obj": {}});
        assert_eq!(items(&v, &[Key("list")]).len(), 2);
        assert!(items(&v, &[Key("obj")]).is_empty());
        assert!(items(&v, &[Key("missing")]).is_empty());
        assert!(items(&json!("scalar"), &[Key("list")]).is_empty());
    }
}
