//! Keyword-based content moderation.
//!
//! A deliberately simple blocklist predicate, applied to questions before
//! the answerer runs. Uploaded content and search queries are not moderated.

/// The fixed answer returned for a blocked question.
pub const MODERATION_REFUSAL: &str = "I cannot answer this kind of question.";

/// Keywords that block a question.
const BLOCKED_KEYWORDS: [&str; 8] =
    ["idiot", "stupid", "moron", "hate", "kill", "violence", "racist", "sexist"];

/// A pure string-matching moderation predicate.
#[derive(Debug, Clone)]
pub struct KeywordModeration {
    keywords: Vec<String>,
}

impl Default for KeywordModeration {
    fn default() -> Self {
        Self { keywords: BLOCKED_KEYWORDS.iter().map(|k| k.to_string()).collect() }
    }
}

impl KeywordModeration {
    /// Create a moderation filter with the default keyword list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a moderation filter with a custom keyword list.
    pub fn with_keywords(keywords: Vec<String>) -> Self {
        Self { keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect() }
    }

    /// Whether the text contains any blocked keyword (case-insensitive).
    pub fn is_inappropriate(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        assert!(!KeywordModeration::new().is_inappropriate("What is the capital of France?"));
    }

    #[test]
    fn blocked_keyword_is_detected() {
        assert!(KeywordModeration::new().is_inappropriate("Why are you such an idiot?"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(KeywordModeration::new().is_inappropriate("I HATE everything"));
    }

    #[test]
    fn custom_keywords_are_honored() {
        let moderation = KeywordModeration::with_keywords(vec!["Forbidden".to_string()]);
        assert!(moderation.is_inappropriate("this is forbidden knowledge"));
        assert!(!moderation.is_inappropriate("this is fine"));
    }
}
