//! Flat key/value lists and the attribute maps built from them.

use crate::value::Value;
use std::collections::BTreeMap;

/// String-keyed attribute map. Keys iterate in sorted order.
pub type Attrs = BTreeMap<String, Value>;

/// Build a flat key/value list, converting every item into a [`Value`].
///
/// ```
/// use logerr_kverrors::{Value, kvs};
///
/// let list = kvs!["city", "Athens", "population", 664_046];
/// assert_eq!(list.len(), 4);
/// assert_eq!(list[0], Value::from("city"));
/// ```
#[macro_export]
macro_rules! kvs {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($item)),+]
    };
}

/// Parse a flat `key, value, key, value, ...` list into an attribute map.
///
/// - A trailing key without a value is dropped.
/// - Keys that are not strings are converted to their text form.
/// - Later pairs win when keys repeat.
pub fn to_map(keys_and_values: impl IntoIterator<Item = Value>) -> Attrs {
    let mut attrs = Attrs::new();
    let mut items = keys_and_values.into_iter();

    while let Some(key) = items.next() {
        let Some(value) = items.next() else {
            break;
        };
        attrs.insert(key_text(key), value);
    }

    attrs
}

/// Flatten an attribute map back into a key/value list (key order).
pub fn from_map(attrs: &Attrs) -> Vec<Value> {
    let mut list = Vec::with_capacity(attrs.len() * 2);
    for (key, value) in attrs {
        list.push(Value::String(key.clone()));
        list.push(value.clone());
    }
    list
}

/// Merge `keys_and_values` over a copy of `context`; new keys win.
pub fn combine(context: &Attrs, keys_and_values: impl IntoIterator<Item = Value>) -> Attrs {
    let mut merged = context.clone();
    merged.extend(to_map(keys_and_values));
    merged
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(key) => key,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn to_map_pairs_keys_and_values() {
        let attrs = to_map(kvs!["hello", "world", "answer", 42]);

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("hello"), Some(&Value::from("world")));
        assert_eq!(attrs.get("answer"), Some(&Value::from(42)));
    }

    #[test]
    fn to_map_drops_dangling_key() {
        let attrs = to_map(kvs!["hello", "world", "missing"]);

        assert_eq!(attrs.len(), 1);
        assert!(!attrs.contains_key("missing"));
    }

    #[test]
    fn to_map_stringifies_non_string_keys() {
        let attrs = to_map(kvs![7, "seven", true, "yes"]);

        assert_eq!(attrs.get("7"), Some(&Value::from("seven")));
        assert_eq!(attrs.get("true"), Some(&Value::from("yes")));
    }

    #[test]
    fn combine_prefers_new_values() {
        let context = to_map(kvs!["a", 1, "b", 2]);
        let merged = combine(&context, kvs!["b", 3, "c", 4]);

        assert_eq!(merged.get("a"), Some(&Value::from(1)));
        assert_eq!(merged.get("b"), Some(&Value::from(3)));
        assert_eq!(merged.get("c"), Some(&Value::from(4)));
        assert_eq!(context.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn from_map_flattens_in_key_order() {
        let attrs = to_map(kvs!["b", 2, "a", 1]);
        assert_eq!(from_map(&attrs), kvs!["a", 1, "b", 2]);
    }

    proptest! {
        #[test]
        fn parsing_law_holds(pairs in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..16), dangling in proptest::option::of("[A-Z]{1,4}")) {
            let mut list = Vec::new();
            for (key, value) in &pairs {
                list.push(Value::from(key.as_str()));
                list.push(Value::from(*value));
            }
            if let Some(key) = &dangling {
                list.push(Value::from(key.as_str()));
            }

            let attrs = to_map(list);
            prop_assert_eq!(attrs.len(), pairs.len());
            for (key, value) in &pairs {
                prop_assert_eq!(attrs.get(key), Some(&Value::from(*value)));
            }
            if let Some(key) = &dangling {
                prop_assert!(!attrs.contains_key(key));
            }
        }
    }
}
