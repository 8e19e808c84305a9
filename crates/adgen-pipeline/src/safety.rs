//! Pre-flight content safety gate.

use regex::Regex;

/// Default blocked terms, matched case-insensitively as whole words.
pub const DEFAULT_BLOCKED_TERMS: &[&str] = &[
    "child abuse",
    "child porn",
    "terrorist propaganda",
    "bomb making",
    "how to make a bomb",
    "buy cocaine",
    "buy heroin",
    "hate speech",
    "white supremacy",
    "racial slur",
    "self-harm",
    "suicide instructions",
    "counterfeit",
    "fake id",
];

/// A prompt refused by the safety gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyViolation {
    pub reason: String,
}

/// Decides whether a prompt may be processed at all.
pub trait ContentSafetyGate: Send + Sync {
    fn check(&self, text: &str) -> Result<(), SafetyViolation>;
}

/// Blocklist gate with word-boundary matching.
#[derive(Debug, Clone)]
pub struct KeywordSafetyGate {
    pattern: Option<Regex>,
}

impl Default for KeywordSafetyGate {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_TERMS.iter().copied())
    }
}

impl KeywordSafetyGate {
    pub fn new<'a>(terms: impl IntoIterator<Item = &'a str>) -> Self {
        let alternation = terms
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                // Internal whitespace matches any whitespace run.
                t.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");

        // Escaped literals always form a valid pattern.
        let pattern = if alternation.is_empty() {
            None
        } else {
            Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).ok()
        };

        Self { pattern }
    }
}

impl ContentSafetyGate for KeywordSafetyGate {
    fn check(&self, text: &str) -> Result<(), SafetyViolation> {
        let Some(pattern) = &self.pattern else {
            return Ok(());
        };
        match pattern.find(text) {
            Some(m) => Err(SafetyViolation {
                reason: format!(
                    "prompt contains disallowed content: \"{}\"",
                    m.as_str().to_lowercase()
                ),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_listed_terms() {
        let gate = KeywordSafetyGate::default();
        let err = gate.check("A 30s ad selling a FAKE   ID kit").unwrap_err();
        assert!(err.reason.contains("fake id"));
    }

    #[test]
    fn test_allows_clean_prompt() {
        let gate = KeywordSafetyGate::default();
        assert!(gate.check("30 second instagram ad for sneakers").is_ok());
    }

    #[test]
    fn test_word_boundaries() {
        let gate = KeywordSafetyGate::new(["gun"]);
        assert!(gate.check("a burgundy jacket").is_ok());
        assert!(gate.check("a gun on the table").is_err());
    }

    #[test]
    fn test_empty_blocklist_allows_everything() {
        let gate = KeywordSafetyGate::new(std::iter::empty());
        assert!(gate.check("anything at all").is_ok());
    }
}
