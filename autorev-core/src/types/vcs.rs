//! Version control information decoded from autorevision metadata.
//!
//! The metadata is a flat JSON object keyed by `VCS_*` names:
//!
//! ```json
//! {
//!   "VCS_TYPE": "git",
//!   "VCS_BASENAME": "autorev",
//!   "VCS_UUID": "0a2c9d1e...",
//!   "VCS_NUM": 412,
//!   "VCS_DATE": "2016-05-13T11:14:55-0700",
//!   "VCS_BRANCH": "main",
//!   "VCS_TAG": "v1.4.0",
//!   "VCS_TICK": 3,
//!   "VCS_EXTRA": "",
//!   "VCS_FULL_HASH": "5114f85...",
//!   "VCS_WC_MODIFIED": false
//! }
//! ```
//!
//! Keys every backend writes are required; the rest are optional and are
//! dropped (never an error) when absent or malformed.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::helpers::date::parse_rfc3339;
use crate::helpers::source::{JsonFile, MetadataSource};
use crate::types::error::{AutorevError, DecodeError};
use crate::types::hash::Hash;

/// Metadata key names written by autorevision.
pub mod keys {
    pub const TYPE: &str = "VCS_TYPE";
    pub const BASENAME: &str = "VCS_BASENAME";
    pub const UUID: &str = "VCS_UUID";
    pub const NUM: &str = "VCS_NUM";
    pub const DATE: &str = "VCS_DATE";
    pub const BRANCH: &str = "VCS_BRANCH";
    pub const TAG: &str = "VCS_TAG";
    pub const TICK: &str = "VCS_TICK";
    pub const EXTRA: &str = "VCS_EXTRA";
    pub const FULL_HASH: &str = "VCS_FULL_HASH";
    pub const WC_MODIFIED: &str = "VCS_WC_MODIFIED";

    /// Keys that must be present for a decode to succeed, in check order.
    pub const REQUIRED: [&str; 5] = [BASENAME, NUM, BRANCH, FULL_HASH, WC_MODIFIED];
}

/// Version control system that produced the metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VcsType {
    #[serde(rename = "git")]
    Git,
    #[serde(rename = "hg")]
    Mercurial,
    #[serde(rename = "bzr")]
    Bazaar,
    #[serde(rename = "svn")]
    Subversion,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl VcsType {
    /// Short name as written by autorevision.
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsType::Git => "git",
            VcsType::Mercurial => "hg",
            VcsType::Bazaar => "bzr",
            VcsType::Subversion => "svn",
            VcsType::Unknown => "unknown",
        }
    }

    /// Parse a VCS name, case-insensitively. Unrecognized names map to
    /// [`VcsType::Unknown`].
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "git" => VcsType::Git,
            "hg" | "mercurial" => VcsType::Mercurial,
            "bzr" | "bazaar" => VcsType::Bazaar,
            "svn" | "subversion" => VcsType::Subversion,
            _ => VcsType::Unknown,
        }
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the source repository at build time.
///
/// Serializes back to the `VCS_*` mapping it was decoded from, omitting
/// absent optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionControlInfo {
    #[serde(rename = "VCS_TYPE")]
    pub vcs_type: VcsType,
    #[serde(rename = "VCS_BASENAME")]
    pub base_name: String,
    #[serde(rename = "VCS_UUID", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Hash>,
    /// Revision count on the current branch.
    #[serde(rename = "VCS_NUM")]
    pub number: u64,
    #[serde(rename = "VCS_DATE", skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(rename = "VCS_BRANCH")]
    pub branch: String,
    /// Most recent ancestral tag.
    #[serde(rename = "VCS_TAG", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Commits since `tag`.
    #[serde(rename = "VCS_TICK", skip_serializing_if = "Option::is_none")]
    pub tick: Option<u64>,
    #[serde(rename = "VCS_EXTRA", skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    /// Full revision id.
    #[serde(rename = "VCS_FULL_HASH")]
    pub hash: Hash,
    #[serde(rename = "VCS_WC_MODIFIED")]
    pub is_working_copy_modified: bool,
}

impl VersionControlInfo {
    /// Decode a `VCS_*` mapping.
    ///
    /// Fails with the first required key (in [`keys::REQUIRED`] order) that
    /// is missing, has the wrong JSON type, or does not hold a valid value.
    /// Optional keys never fail the decode.
    pub fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError> {
        let base_name = required_str(map, keys::BASENAME)?;
        let number = required_u64(map, keys::NUM)?;
        let branch = required_str(map, keys::BRANCH)?;
        let full_hash = required_str(map, keys::FULL_HASH)?;
        let hash = Hash::parse(&full_hash).map_err(|e| DecodeError::InvalidValue {
            key: keys::FULL_HASH,
            reason: e.to_string(),
        })?;
        let is_working_copy_modified = required_bool(map, keys::WC_MODIFIED)?;

        let vcs_type = optional_str(map, keys::TYPE)
            .map(|s| VcsType::from_name(&s))
            .unwrap_or_default();
        let uuid = optional_str(map, keys::UUID).and_then(|s| match Hash::parse(&s) {
            Ok(uuid) => Some(uuid),
            Err(e) => {
                log::debug!("Dropping {}: {}", keys::UUID, e);
                None
            }
        });
        let date = optional_str(map, keys::DATE).and_then(|s| {
            let date = parse_rfc3339(&s);
            if date.is_none() {
                log::debug!("Dropping {}: unparseable timestamp {:?}", keys::DATE, s);
            }
            date
        });

        Ok(Self {
            vcs_type,
            base_name,
            uuid,
            number,
            date,
            branch,
            tag: optional_str(map, keys::TAG),
            tick: optional_u64(map, keys::TICK),
            extra: optional_str(map, keys::EXTRA),
            hash,
            is_working_copy_modified,
        })
    }

    /// Decode from an already parsed JSON value, which must be an object.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(map) => Self::decode(map),
            _ => Err(DecodeError::NotAnObject),
        }
    }

    /// Decode from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, AutorevError> {
        let value: Value = serde_json::from_str(s)?;
        Ok(Self::from_value(&value)?)
    }

    /// Decode from raw JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, AutorevError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(&value)?)
    }

    /// Decode from a reader yielding a JSON document.
    pub fn from_reader(reader: impl Read) -> Result<Self, AutorevError> {
        let value: Value = serde_json::from_reader(reader)?;
        Ok(Self::from_value(&value)?)
    }

    /// Decode from a JSON file at an arbitrary path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AutorevError> {
        Self::from_source(&JsonFile::new(path.as_ref()))
    }

    /// Decode the mapping provided by any [`MetadataSource`].
    pub fn from_source(source: &dyn MetadataSource) -> Result<Self, AutorevError> {
        let map = source.read_mapping()?;
        let info = Self::decode(&map)?;
        log::debug!(
            "Decoded {} revision {} from {}",
            info.vcs_type,
            info.hash.short(12),
            source.describe()
        );
        Ok(info)
    }

    /// Derive revision info from `parent` with a new `tick` and `extra`.
    ///
    /// Type, base name, number, branch, hash and working-copy state are
    /// copied. `uuid`, `date` and `tag` are not carried over and are always
    /// `None` in the result.
    pub fn based_on(parent: &VersionControlInfo, tick: Option<u64>, extra: Option<String>) -> Self {
        Self {
            vcs_type: parent.vcs_type,
            base_name: parent.base_name.clone(),
            uuid: None,
            number: parent.number,
            date: None,
            branch: parent.branch.clone(),
            tag: None,
            tick,
            extra,
            hash: parent.hash.clone(),
            is_working_copy_modified: parent.is_working_copy_modified,
        }
    }
}

fn required<'a>(map: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, DecodeError> {
    map.get(key).ok_or(DecodeError::MissingKey { key })
}

fn required_str(map: &Map<String, Value>, key: &'static str) -> Result<String, DecodeError> {
    required(map, key)?
        .as_str()
        .map(str::to_string)
        .ok_or(DecodeError::WrongType {
            key,
            expected: "string",
        })
}

fn required_u64(map: &Map<String, Value>, key: &'static str) -> Result<u64, DecodeError> {
    required(map, key)?.as_u64().ok_or(DecodeError::WrongType {
        key,
        expected: "non-negative integer",
    })
}

fn required_bool(map: &Map<String, Value>, key: &'static str) -> Result<bool, DecodeError> {
    required(map, key)?.as_bool().ok_or(DecodeError::WrongType {
        key,
        expected: "boolean",
    })
}

fn optional_str(map: &Map<String, Value>, key: &'static str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => {
            log::debug!("Dropping {}: expected a string, found {}", key, other);
            None
        }
    }
}

fn optional_u64(map: &Map<String, Value>, key: &'static str) -> Option<u64> {
    let value = map.get(key)?;
    let n = value.as_u64();
    if n.is_none() {
        log::debug!("Dropping {}: expected a non-negative integer, found {}", key, value);
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Map<String, Value> {
        match json!({
            "VCS_BASENAME": "repo",
            "VCS_NUM": 4,
            "VCS_BRANCH": "main",
            "VCS_FULL_HASH": "abc123",
            "VCS_WC_MODIFIED": false,
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn full() -> Map<String, Value> {
        let mut map = minimal();
        map.insert(keys::TYPE.into(), json!("git"));
        map.insert(keys::UUID.into(), json!("0a2c9d1e"));
        map.insert(keys::DATE.into(), json!("2016-05-13T11:14:55-0700"));
        map.insert(keys::TAG.into(), json!("v1.4.0"));
        map.insert(keys::TICK.into(), json!(3));
        map.insert(keys::EXTRA.into(), json!("nightly"));
        map
    }

    #[test]
    fn minimal_mapping_decodes_with_defaults() {
        let info = VersionControlInfo::decode(&minimal()).unwrap();
        assert_eq!(info.vcs_type, VcsType::Unknown);
        assert_eq!(info.base_name, "repo");
        assert_eq!(info.number, 4);
        assert_eq!(info.branch, "main");
        assert_eq!(info.hash.as_str(), "abc123");
        assert!(!info.is_working_copy_modified);
        assert_eq!(info.tag, None);
        assert_eq!(info.tick, None);
        assert_eq!(info.uuid, None);
        assert_eq!(info.date, None);
        assert_eq!(info.extra, None);
    }

    #[test]
    fn full_mapping_decodes_every_field() {
        let info = VersionControlInfo::decode(&full()).unwrap();
        assert_eq!(info.vcs_type, VcsType::Git);
        assert_eq!(info.uuid, Some(Hash::parse("0a2c9d1e").unwrap()));
        assert_eq!(info.date, parse_rfc3339("2016-05-13T11:14:55-07:00"));
        assert_eq!(info.tag.as_deref(), Some("v1.4.0"));
        assert_eq!(info.tick, Some(3));
        assert_eq!(info.extra.as_deref(), Some("nightly"));
    }

    #[test]
    fn each_missing_required_key_fails() {
        for key in keys::REQUIRED {
            let mut map = full();
            map.remove(key);
            assert_eq!(
                VersionControlInfo::decode(&map),
                Err(DecodeError::MissingKey { key }),
                "removing {}",
                key
            );
        }
    }

    #[test]
    fn wrong_required_types_fail() {
        let cases = [
            (keys::BASENAME, json!(12), "string"),
            (keys::NUM, json!("4"), "non-negative integer"),
            (keys::NUM, json!(-1), "non-negative integer"),
            (keys::NUM, json!(4.5), "non-negative integer"),
            (keys::BRANCH, json!(null), "string"),
            (keys::FULL_HASH, json!(["abc"]), "string"),
            (keys::WC_MODIFIED, json!(0), "boolean"),
        ];
        for (key, value, expected) in cases {
            let mut map = minimal();
            map.insert(key.to_string(), value);
            assert_eq!(
                VersionControlInfo::decode(&map),
                Err(DecodeError::WrongType { key, expected })
            );
        }
    }

    #[test]
    fn unparseable_full_hash_fails() {
        for bad in ["", "not-a-hash"] {
            let mut map = minimal();
            map.insert(keys::FULL_HASH.into(), json!(bad));
            let err = VersionControlInfo::decode(&map).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::InvalidValue {
                    key: "VCS_FULL_HASH",
                    ..
                }
            ));
        }
    }

    #[test]
    fn malformed_optionals_are_dropped() {
        let mut map = minimal();
        map.insert(keys::TYPE.into(), json!(7));
        map.insert(keys::UUID.into(), json!("a1b2c3d4-e5f6"));
        map.insert(keys::DATE.into(), json!("last tuesday"));
        map.insert(keys::TAG.into(), json!(false));
        map.insert(keys::TICK.into(), json!("3"));
        map.insert(keys::EXTRA.into(), json!({ "k": "v" }));

        let info = VersionControlInfo::decode(&map).unwrap();
        assert_eq!(info.vcs_type, VcsType::Unknown);
        assert_eq!(info.uuid, None);
        assert_eq!(info.date, None);
        assert_eq!(info.tag, None);
        assert_eq!(info.tick, None);
        assert_eq!(info.extra, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut map = minimal();
        map.insert("VCS_SHORT_HASH".into(), json!("abc"));
        map.insert("VCS_ACTION_STAMP".into(), json!("x"));
        assert!(VersionControlInfo::decode(&map).is_ok());
    }

    #[test]
    fn vcs_type_names() {
        assert_eq!(VcsType::from_name("git"), VcsType::Git);
        assert_eq!(VcsType::from_name("HG"), VcsType::Mercurial);
        assert_eq!(VcsType::from_name("mercurial"), VcsType::Mercurial);
        assert_eq!(VcsType::from_name("bzr"), VcsType::Bazaar);
        assert_eq!(VcsType::from_name("svn"), VcsType::Subversion);
        assert_eq!(VcsType::from_name("cvs"), VcsType::Unknown);
        assert_eq!(VcsType::from_name(""), VcsType::Unknown);
        assert_eq!(VcsType::Mercurial.to_string(), "hg");
    }

    #[test]
    fn non_object_documents_fail() {
        assert_eq!(
            VersionControlInfo::from_value(&json!([1, 2, 3])),
            Err(DecodeError::NotAnObject)
        );
        let err = VersionControlInfo::from_json_str("\"VCS_NUM\"").unwrap_err();
        assert_eq!(err.error_type(), "decode_error");
        let err = VersionControlInfo::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.error_type(), "json_error");
    }

    #[test]
    fn every_input_path_decodes_identically() {
        let text = Value::Object(full()).to_string();
        let from_str = VersionControlInfo::from_json_str(&text).unwrap();
        let from_slice = VersionControlInfo::from_json_slice(text.as_bytes()).unwrap();
        let from_reader = VersionControlInfo::from_reader(text.as_bytes()).unwrap();
        let decoded = VersionControlInfo::decode(&full()).unwrap();
        assert_eq!(from_str, decoded);
        assert_eq!(from_slice, decoded);
        assert_eq!(from_reader, decoded);
    }

    #[test]
    fn based_on_keeps_identity_and_drops_uuid_date_tag() {
        let parent = VersionControlInfo::decode(&full()).unwrap();
        let derived =
            VersionControlInfo::based_on(&parent, Some(7), Some("ci-42".to_string()));

        assert_eq!(derived.vcs_type, parent.vcs_type);
        assert_eq!(derived.base_name, parent.base_name);
        assert_eq!(derived.number, parent.number);
        assert_eq!(derived.branch, parent.branch);
        assert_eq!(derived.hash, parent.hash);
        assert_eq!(
            derived.is_working_copy_modified,
            parent.is_working_copy_modified
        );
        assert_eq!(derived.tick, Some(7));
        assert_eq!(derived.extra.as_deref(), Some("ci-42"));

        // The parent had all three; the derived form deliberately has none.
        assert!(parent.uuid.is_some() && parent.date.is_some() && parent.tag.is_some());
        assert_eq!(derived.uuid, None);
        assert_eq!(derived.date, None);
        assert_eq!(derived.tag, None);
    }

    #[test]
    fn serializes_back_to_the_vcs_mapping() {
        let info = VersionControlInfo::decode(&full()).unwrap();
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["VCS_TYPE"], "git");
        assert_eq!(value["VCS_NUM"], 4);
        assert_eq!(VersionControlInfo::from_value(&value).unwrap(), info);

        let minimal = VersionControlInfo::decode(&minimal()).unwrap();
        let value = serde_json::to_value(&minimal).unwrap();
        assert!(value.get("VCS_TAG").is_none());
        assert!(value.get("VCS_DATE").is_none());
    }
}
