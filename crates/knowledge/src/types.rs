//! FAQ knowledge type definitions.

use serde::{Deserialize, Serialize};

/// A single FAQ entry loaded from the corpus document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Unique identifier within the corpus
    pub id: String,

    /// The canonical question
    pub question: String,

    /// The curated answer
    pub answer: String,

    /// Short keywords, in corpus order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Free-form grouping label
    #[serde(default)]
    pub category: String,
}

/// On-disk corpus document: `{ "faqs": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqDocument {
    pub faqs: Vec<FaqEntry>,
}

/// An FAQ entry with the relevance score it earned for one question.
///
/// Serialized flat: the entry's fields followed by `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFaq {
    #[serde(flatten)]
    pub entry: FaqEntry,

    pub score: f64,
}

impl ScoredFaq {
    pub fn new(entry: FaqEntry, score: f64) -> Self {
        Self { entry, score }
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }
}

/// One answered question, as appended to the interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// ISO-8601 UTC instant, millisecond precision
    pub timestamp: String,

    /// The trimmed question
    pub question: String,

    /// Ids of the FAQ entries used as grounding, in rank order
    pub retrieved_faq_ids: Vec<String>,

    /// The generated answer
    pub answer: String,
}

/// Successful result of the ask pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub answer: String,
    pub retrieved_faqs: Vec<ScoredFaq>,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_defaults_optional_fields() {
        let entry: FaqEntry =
            serde_json::from_str(r#"{"id": "a1", "question": "Q?", "answer": "A."}"#).unwrap();
        assert!(entry.tags.is_empty());
        assert_eq!(entry.category, "");
    }

    #[test]
    fn test_scored_faq_serializes_flat() {
        let scored = ScoredFaq::new(
            FaqEntry {
                id: "h1".to_string(),
                question: "What are your business hours?".to_string(),
                answer: "9 to 5.".to_string(),
                tags: vec!["hours".to_string()],
                category: "general".to_string(),
            },
            4.5,
        );

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["id"], "h1");
        assert_eq!(json["tags"][0], "hours");
        assert_eq!(json["score"], 4.5);
        assert!(json.get("entry").is_none());
    }

    #[test]
    fn test_interaction_uses_camel_case() {
        let interaction = Interaction {
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            question: "hi".to_string(),
            retrieved_faq_ids: vec!["h1".to_string()],
            answer: "hello".to_string(),
        };

        let line = serde_json::to_string(&interaction).unwrap();
        assert!(line.contains("\"retrievedFaqIds\":[\"h1\"]"));
        assert!(!line.contains('\n'));
    }
}
