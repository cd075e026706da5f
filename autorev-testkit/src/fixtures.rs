//! Autorevision `VCS_*` mappings as the tool writes them.

use serde_json::{json, Map, Value};

/// Keys every backend writes.
pub const REQUIRED_KEYS: [&str; 5] = [
    "VCS_BASENAME",
    "VCS_NUM",
    "VCS_BRANCH",
    "VCS_FULL_HASH",
    "VCS_WC_MODIFIED",
];

/// Keys that vary by backend or feature use.
pub const OPTIONAL_KEYS: [&str; 6] = [
    "VCS_TYPE",
    "VCS_UUID",
    "VCS_DATE",
    "VCS_TAG",
    "VCS_TICK",
    "VCS_EXTRA",
];

/// Only the required keys.
pub fn minimal() -> Value {
    json!({
        "VCS_BASENAME": "repo",
        "VCS_NUM": 4,
        "VCS_BRANCH": "main",
        "VCS_FULL_HASH": "abc123",
        "VCS_WC_MODIFIED": false,
    })
}

/// A git checkout a few commits past a tag, including keys the decoder
/// does not read.
pub fn git() -> Value {
    json!({
        "VCS_TYPE": "git",
        "VCS_BASENAME": "autorev",
        "VCS_UUID": "a4c3e2f1b0d9c8e7f6a5b4c3d2e1f0a9b8c7d6e5",
        "VCS_NUM": 412,
        "VCS_DATE": "2016-05-13T11:14:55-0700",
        "VCS_BRANCH": "main",
        "VCS_TAG": "v1.4.0",
        "VCS_TICK": 3,
        "VCS_EXTRA": "",
        "VCS_ACTION_STAMP": "2016-05-13T18:14:55Z!dev@example.com",
        "VCS_FULL_HASH": "5114f85a2e9b3c1d7f6e8a0b4c2d9e1f3a5b7c9d",
        "VCS_SHORT_HASH": "5114f85",
        "VCS_WC_MODIFIED": false,
    })
}

/// A Mercurial checkout with local modifications.
pub fn hg() -> Value {
    json!({
        "VCS_TYPE": "hg",
        "VCS_BASENAME": "autorev",
        "VCS_UUID": "0e4b2a91c7d3",
        "VCS_NUM": 87,
        "VCS_DATE": "2021-11-02T09:00:00+01:00",
        "VCS_BRANCH": "default",
        "VCS_TAG": "tip",
        "VCS_TICK": 0,
        "VCS_FULL_HASH": "9f1e3c5a7b2d4f6e8a0c1b3d5f7e9a2c4b6d8f0e",
        "VCS_SHORT_HASH": "9f1e3c5a7b2d",
        "VCS_WC_MODIFIED": true,
    })
}

/// A Subversion checkout: the repository uuid is hyphenated and there is no
/// meaningful tag.
pub fn svn() -> Value {
    json!({
        "VCS_TYPE": "svn",
        "VCS_BASENAME": "trunk",
        "VCS_UUID": "13f79535-47bb-0310-9956-ffa450edef68",
        "VCS_NUM": 1532,
        "VCS_DATE": "2014-02-20T16:45:01Z",
        "VCS_BRANCH": "trunk",
        "VCS_FULL_HASH": "1532",
        "VCS_SHORT_HASH": "1532",
        "VCS_WC_MODIFIED": false,
    })
}

/// `base` with `key` removed.
pub fn without(base: &Value, key: &str) -> Value {
    let mut map = as_map(base);
    map.remove(key);
    Value::Object(map)
}

/// `base` with `key` set to `value`.
pub fn with(base: &Value, key: &str, value: Value) -> Value {
    let mut map = as_map(base);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Environment-style pairs for `base`: every value rendered as a string.
pub fn as_env_vars(base: &Value) -> Vec<(String, String)> {
    as_map(base)
        .into_iter()
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s,
                Value::Bool(b) => (if b { "1" } else { "0" }).to_string(),
                other => other.to_string(),
            };
            (k, rendered)
        })
        .collect()
}

fn as_map(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_carry_every_required_key() {
        for fixture in [minimal(), git(), hg(), svn()] {
            for key in REQUIRED_KEYS {
                assert!(fixture.get(key).is_some(), "{} missing", key);
            }
        }
    }

    #[test]
    fn minimal_has_no_optional_keys() {
        for key in OPTIONAL_KEYS {
            assert!(minimal().get(key).is_none());
        }
    }

    #[test]
    fn with_and_without() {
        let base = minimal();
        assert!(without(&base, "VCS_NUM").get("VCS_NUM").is_none());
        assert_eq!(with(&base, "VCS_TAG", json!("v1"))["VCS_TAG"], "v1");
        // The input is left untouched.
        assert_eq!(base["VCS_NUM"], 4);
    }

    #[test]
    fn env_vars_render_strings() {
        let vars = as_env_vars(&minimal());
        assert!(vars.contains(&("VCS_NUM".to_string(), "4".to_string())));
        assert!(vars.contains(&("VCS_WC_MODIFIED".to_string(), "0".to_string())));
        assert!(vars.contains(&("VCS_BRANCH".to_string(), "main".to_string())));
    }
}
