//! Deterministic cache key generation.
//!
//! Only the request fields that change the LLM output participate in the
//! key. They are flattened into a sorted map, null values are dropped, and
//! the compact JSON encoding is hashed with SHA-256.
//!
//! Format: `{namespace}:{version}:{sha256_hex}`

use std::collections::BTreeMap;

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Provider name used in the key when the request names none.
pub const CANONICAL_PROVIDER: &str = "openai";

/// Fields under `prompt` that affect the completion.
const PROMPT_FIELDS: &[&str] = &[
    "text",
    "image_url",
    "image_base64",
    "video_url",
    "video_base64",
];

/// Builds cache keys for raw request payloads.
#[derive(Debug, Clone)]
pub struct CacheKeyGenerator {
    namespace: String,
    version: String,
    default_provider: String,
}

impl Default for CacheKeyGenerator {
    fn default() -> Self {
        Self::new("prompt_parse", "v1", CANONICAL_PROVIDER)
    }
}

impl CacheKeyGenerator {
    pub fn new(
        namespace: impl Into<String>,
        version: impl Into<String>,
        default_provider: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            version: version.into(),
            default_provider: default_provider.into(),
        }
    }

    /// Key prefix, usable as an administrative clear pattern.
    pub fn prefix(&self) -> String {
        format!("{}:{}:", self.namespace, self.version)
    }

    /// Collect the output-relevant fields of a request payload.
    pub fn relevant_fields(&self, request: &Value) -> BTreeMap<&'static str, Value> {
        let mut fields = BTreeMap::new();

        if let Some(prompt) = request.get("prompt") {
            for &name in PROMPT_FIELDS {
                if let Some(value) = prompt.get(name).filter(|v| !v.is_null()) {
                    fields.insert(name, value.clone());
                }
            }
        }

        if let Some(category) = request.get("target_category").filter(|v| !v.is_null()) {
            fields.insert("target_category", category.clone());
        }

        let provider = request
            .get("options")
            .and_then(|o| o.get("llm_provider"))
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| Value::String(self.default_provider.clone()));
        fields.insert("llm_provider", provider);

        fields
    }

    /// Generate the cache key for a request payload.
    pub fn generate(&self, request: &Value) -> String {
        let fields = self.relevant_fields(request);
        // BTreeMap keys serialize sorted and serde_json emits no whitespace.
        let canonical = serde_json::to_string(&fields).unwrap_or_default();
        let digest = Sha256::digest(canonical.as_bytes());
        format!("{}{:x}", self.prefix(), digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generator() -> CacheKeyGenerator {
        CacheKeyGenerator::default()
    }

    #[test]
    fn test_key_format() {
        let key = generator().generate(&json!({"prompt": {"text": "ad"}}));
        let parts: Vec<&str> = key.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "prompt_parse");
        assert_eq!(parts[1], "v1");
        assert_eq!(parts[2].len(), 64);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_ignores_irrelevant_fields_and_nulls() {
        let a = json!({
            "prompt": {"text": "30 second instagram ad", "image_url": null},
            "options": {"include_cost_estimate": true},
            "request_id": "abc"
        });
        let b = json!({
            "options": {"cost_fallback_enabled": false},
            "prompt": {"text": "30 second instagram ad"}
        });
        assert_eq!(generator().generate(&a), generator().generate(&b));
    }

    #[test]
    fn test_key_ignores_insertion_order() {
        let a: Value = serde_json::from_str(
            r#"{"prompt": {"text": "ad", "video_url": "https://x/v.mp4"}, "target_category": "tech"}"#,
        )
        .unwrap();
        let b: Value = serde_json::from_str(
            r#"{"target_category": "tech", "prompt": {"video_url": "https://x/v.mp4", "text": "ad"}}"#,
        )
        .unwrap();
        assert_eq!(generator().generate(&a), generator().generate(&b));
    }

    #[test]
    fn test_default_provider_matches_explicit_canonical() {
        let implicit = json!({"prompt": {"text": "ad"}});
        let explicit = json!({"prompt": {"text": "ad"}, "options": {"llm_provider": CANONICAL_PROVIDER}});
        assert_eq!(generator().generate(&implicit), generator().generate(&explicit));
    }

    #[test]
    fn test_relevant_field_changes_change_key() {
        let base = json!({"prompt": {"text": "ad"}});
        let base_key = generator().generate(&base);

        let variants = [
            json!({"prompt": {"text": "ad!"}}),
            json!({"prompt": {"text": "ad", "image_url": "https://x/i.png"}}),
            json!({"prompt": {"text": "ad", "image_base64": "aGVsbG8="}}),
            json!({"prompt": {"text": "ad", "video_url": "https://x/v.mp4"}}),
            json!({"prompt": {"text": "ad", "video_base64": "aGVsbG8="}}),
            json!({"prompt": {"text": "ad"}, "target_category": "luxury"}),
            json!({"prompt": {"text": "ad"}, "options": {"llm_provider": "anthropic"}}),
        ];

        for variant in &variants {
            assert_ne!(generator().generate(variant), base_key, "variant {variant}");
        }
    }

    #[test]
    fn test_namespace_and_version_partition_keys() {
        let request = json!({"prompt": {"text": "ad"}});
        let v2 = CacheKeyGenerator::new("prompt_parse", "v2", CANONICAL_PROVIDER);
        assert_ne!(generator().generate(&request), v2.generate(&request));
        assert!(v2.generate(&request).starts_with(&v2.prefix()));
    }
}
