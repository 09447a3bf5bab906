// Paper records and corpus normalization.
//
// These are the input types that flow through the engine. They're kept
// separate from the analysis machinery so callers can construct and
// serialize papers without depending on any numeric code.
//
// The engine never mutates a Paper. The paper's position in the input
// slice is the canonical correlation key used across all engine
// outputs, since ids may be absent or non-unique.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Substituted for a missing or empty abstract so downstream
/// vectorizers never operate on a zero-length document.
pub const NO_ABSTRACT_PLACEHOLDER: &str = "No abstract available";

/// A single research-paper record, as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    /// Opaque caller-assigned identifier. May be absent or non-unique;
    /// the engine correlates results by paper index instead.
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    /// Author names in citation order.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Publication date; year granularity is what matters for trends.
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    /// Where the record came from (e.g. "arxiv", "manual").
    #[serde(default)]
    pub source: String,
    /// Open string-keyed map for anything else the caller knows.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Turn raw papers into clean text units, index-aligned with the input.
///
/// Each entry is the title concatenated with the abstract; an empty or
/// whitespace-only abstract degrades to [`NO_ABSTRACT_PLACEHOLDER`]
/// rather than producing a zero-length document. Never fails.
pub fn normalize(papers: &[Paper]) -> Vec<String> {
    papers
        .iter()
        .map(|p| {
            let title = p.title.trim();
            let abstract_text = p.abstract_text.trim();
            let abstract_text = if abstract_text.is_empty() {
                NO_ABSTRACT_PLACEHOLDER
            } else {
                abstract_text
            };
            if title.is_empty() {
                abstract_text.to_string()
            } else {
                format!("{title} {abstract_text}")
            }
        })
        .collect()
}

/// Stable fingerprint of a normalized corpus plus the vocabulary cap.
///
/// Used as the key for the vector-space memo cache. Document texts are
/// length-prefixed before hashing so concatenation boundaries can't
/// collide.
pub fn fingerprint(docs: &[String], vocab_cap: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(vocab_cap.to_le_bytes());
    for doc in docs {
        hasher.update(doc.len().to_le_bytes());
        hasher.update(doc.as_bytes());
    }
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, abstract_text: &str) -> Paper {
        Paper {
            id: None,
            title: title.to_string(),
            abstract_text: abstract_text.to_string(),
            authors: vec![],
            published_date: None,
            source: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn test_normalize_concatenates_title_and_abstract() {
        let docs = normalize(&[paper("Attention Is All You Need", "We propose the Transformer.")]);
        assert_eq!(docs[0], "Attention Is All You Need We propose the Transformer.");
    }

    #[test]
    fn test_normalize_substitutes_placeholder_for_empty_abstract() {
        let docs = normalize(&[paper("Some Title", "   ")]);
        assert_eq!(docs[0], format!("Some Title {NO_ABSTRACT_PLACEHOLDER}"));
    }

    #[test]
    fn test_normalize_never_produces_empty_docs() {
        let docs = normalize(&[paper("", "")]);
        assert_eq!(docs[0], NO_ABSTRACT_PLACEHOLDER);
    }

    #[test]
    fn test_fingerprint_depends_on_content_and_cap() {
        let a = vec!["one".to_string(), "two".to_string()];
        let b = vec!["one".to_string(), "three".to_string()];
        assert_ne!(fingerprint(&a, 100), fingerprint(&b, 100));
        assert_ne!(fingerprint(&a, 100), fingerprint(&a, 50));
        assert_eq!(fingerprint(&a, 100), fingerprint(&a, 100));
    }

    #[test]
    fn test_fingerprint_boundaries_do_not_collide() {
        let a = vec!["ab".to_string(), "c".to_string()];
        let b = vec!["a".to_string(), "bc".to_string()];
        assert_ne!(fingerprint(&a, 100), fingerprint(&b, 100));
    }
}
