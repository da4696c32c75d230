//! Input fingerprinting — identifies runs fed with identical raw payloads.
//!
//! Each source array is serialized with serde_json (its `Map` is a `BTreeMap`,
//! so object keys come out sorted) and hashed with blake3, then the three
//! per-source hashes are hashed together in source order. Key order inside raw
//! items does not change the fingerprint.

use crate::domain::SourceId;
use crate::source::RawPayloads;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFingerprint {
    /// Combined hash, hex encoded.
    pub combined: String,
    /// Per-source hashes (A, B, C), hex encoded.
    pub per_source: [String; 3],
}

impl InputFingerprint {
    pub fn of(payloads: &RawPayloads) -> Self {
        let per_source = SourceId::ALL.map(|source| {
            let json = serde_json::to_string(payloads.get(source))
                .expect("raw JSON values must serialize");
            blake3::hash(json.as_bytes())
        });

        let mut hasher = blake3::Hasher::new();
        for hash in &per_source {
            hasher.update(hash.as_bytes());
        }

        Self {
            combined: hasher.finalize().to_hex().to_string(),
            per_source: per_source.map(|h| h.to_hex().to_string()),
        }
    }

    /// First 12 hex chars, for log lines and summaries.
    pub fn short(&self) -> &str {
        self.combined.get(..12).unwrap_or(&self.combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payloads() -> RawPayloads {
        RawPayloads {
            a: vec![json!({"d": 0, "cat": "cat 1", "value": 1.0})],
            b: vec![json!({"myDate": "1970-01-01", "categ": "CAT 1", "val": 2.0})],
            c: vec![],
        }
    }

    #[test]
    fn identical_input_same_fingerprint() {
        assert_eq!(
            InputFingerprint::of(&payloads()),
            InputFingerprint::of(&payloads())
        );
    }

    #[test]
    fn key_order_does_not_matter() {
        let mut reordered = payloads();
        reordered.a = vec![json!({"value": 1.0, "d": 0, "cat": "cat 1"})];
        assert_eq!(
            InputFingerprint::of(&payloads()),
            InputFingerprint::of(&reordered)
        );
    }

    #[test]
    fn moving_items_between_sources_changes_fingerprint() {
        let original = payloads();
        let swapped = RawPayloads {
            a: original.b.clone(),
            b: original.a.clone(),
            c: vec![],
        };
        let fp1 = InputFingerprint::of(&original);
        let fp2 = InputFingerprint::of(&swapped);
        assert_ne!(fp1.combined, fp2.combined);
        assert_eq!(fp1.per_source[2], fp2.per_source[2]);
    }

    #[test]
    fn nested_key_order_does_not_matter() {
        let mut first = payloads();
        first.c = vec![json!({"b": [1, {"z": 1, "y": "s"}], "a": null})];
        let mut second = payloads();
        second.c = vec![json!({"a": null, "b": [1, {"y": "s", "z": 1}]})];
        assert_eq!(InputFingerprint::of(&first), InputFingerprint::of(&second));
    }

    #[test]
    fn short_form_is_a_prefix() {
        let fp = InputFingerprint::of(&payloads());
        assert_eq!(fp.short().len(), 12);
        assert!(fp.combined.starts_with(fp.short()));
        assert_eq!(fp.combined.len(), 64);
    }

    #[test]
    fn short_form_of_truncated_hash_is_whole_hash() {
        let json = r#"{"combined": "abc", "per_source": ["", "", ""]}"#;
        let fp: InputFingerprint = serde_json::from_str(json).unwrap();
        assert_eq!(fp.short(), "abc");
    }
}
