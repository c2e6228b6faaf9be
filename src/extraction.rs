//! Semantic tag extraction
//!
//! Asks the language model for 2-5 semantic tags, related thought ids and a
//! one-line summary of a captured thought. The model's output is untrusted:
//! non-JSON output falls back to a local keyword extractor, and the parsed
//! payload is validated at the boundary before candidates reach the
//! resolution algorithm.

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::anthropic::AnthropicClient;
use crate::errors::Result;
use crate::types::ExtractionPayload;

const EXTRACTION_MAX_TOKENS: u32 = 300;
const EXTRACTION_TEMPERATURE: f32 = 0.3;

/// How many keywords the local fallback extractor keeps.
const FALLBACK_TAG_COUNT: usize = 3;

/// Minimum word length for the fallback extractor.
const FALLBACK_MIN_WORD_LEN: usize = 4;

/// Common words the fallback extractor never treats as concepts.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "is", "was", "are",
    "were", "been", "be", "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "must", "can", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "what", "which", "who", "where", "when", "why", "how", "with",
    "from", "about", "into", "over", "just", "some", "more", "very", "their", "there",
];

/// Context line describing an existing thought, sent with every extraction
/// so the model can point out connections.
#[derive(Debug, Clone)]
pub struct ThoughtContext {
    pub id: Uuid,
    pub text: String,
    pub tags: Vec<String>,
}

/// Tag extraction client.
#[derive(Debug, Clone)]
pub struct TagExtractor {
    client: AnthropicClient,
    model: String,
}

impl TagExtractor {
    pub fn new(client: AnthropicClient, model: String) -> Self {
        Self { client, model }
    }

    /// Extract semantic tags for a new thought.
    ///
    /// Returns `Err` only for transport/configuration failures; a
    /// malformed model response is handled here with the local keyword
    /// fallback and still produces a payload.
    pub async fn extract(&self, text: &str, context: &[ThoughtContext]) -> Result<ExtractionPayload> {
        let prompt = build_extraction_prompt(text, context);
        let raw = self
            .client
            .complete(&self.model, prompt, EXTRACTION_MAX_TOKENS, EXTRACTION_TEMPERATURE)
            .await?;

        match parse_payload(&raw) {
            Some(payload) => Ok(payload),
            None => {
                warn!(response = %raw.chars().take(120).collect::<String>(),
                      "unparseable extraction response, using keyword fallback");
                Ok(fallback_payload(text))
            }
        }
    }
}

/// Build the extraction prompt, including numbered context lines for every
/// existing thought so the model can reference their ids.
fn build_extraction_prompt(text: &str, context: &[ThoughtContext]) -> String {
    let thought_context = if context.is_empty() {
        String::new()
    } else {
        let lines: Vec<String> = context
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let tags = if t.tags.is_empty() {
                    "none".to_string()
                } else {
                    t.tags.join(", ")
                };
                format!("{}. [ID: {}] \"{}\" (tags: {})", i + 1, t.id, t.text, tags)
            })
            .collect();
        format!("\n\nExisting thoughts in the system:\n{}", lines.join("\n"))
    };

    format!(
        "Analyze this thought and extract semantic meaning.\n\n\
         New thought: \"{text}\"{thought_context}\n\n\
         Please respond with a JSON object containing:\n\
         1. \"tags\": An array of 2-5 semantic tags/concepts (single words or short phrases)\n\
         2. \"connections\": An array of IDs of existing thoughts that are semantically related \
         to this new thought\n\
         3. \"summary\": A one-sentence summary of the core idea\n\n\
         Focus on extracting meaningful concepts, not just keywords. For connections, only \
         include IDs where there's a strong semantic relationship.\n\n\
         Respond ONLY with valid JSON, no additional text."
    )
}

/// Parse the model output into a payload, tolerating surrounding prose.
///
/// Tries the whole string first, then the substring between the outermost
/// braces. Returns `None` when neither parses as a JSON object.
fn parse_payload(raw: &str) -> Option<ExtractionPayload> {
    if let Ok(payload) = serde_json::from_str::<ExtractionPayload>(raw) {
        return Some(payload);
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    let candidate = &raw[start..=end];
    // Reject things like bare arrays that happen to deserialize via defaults.
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_object)?;
    serde_json::from_str(candidate).ok()
}

/// Local keyword extraction, used when the model output cannot be parsed.
///
/// Lowercase tokens longer than 3 characters, stopword-filtered, first 3,
/// capitalized. Connections stay empty; the summary is a text prefix.
pub fn fallback_payload(text: &str) -> ExtractionPayload {
    ExtractionPayload {
        tags: basic_keyword_tags(text),
        connections: Vec::new(),
        related_tags: Vec::new(),
        summary: text.chars().take(100).collect(),
    }
}

fn basic_keyword_tags(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.len() >= FALLBACK_MIN_WORD_LEN && !STOPWORDS.contains(w))
        .take(FALLBACK_TAG_COUNT)
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
