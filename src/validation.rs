//! Input validation at the HTTP boundary
//!
//! Core logic assumes text already passed these checks; nothing below this
//! layer re-validates.

use anyhow::{anyhow, Result};

/// Maximum lengths for sanity and storage protection
pub const MAX_THOUGHT_LENGTH: usize = 10_000;
pub const MAX_PROMPT_LENGTH: usize = 20_000;
pub const MAX_TAG_NAME_LENGTH: usize = 64;
pub const MAX_TAGS_PER_THOUGHT: usize = 10;

/// Validate captured thought text
pub fn validate_thought_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(anyhow!("thought text cannot be empty"));
    }

    if text.len() > MAX_THOUGHT_LENGTH {
        return Err(anyhow!(
            "thought text too long: {} chars (max: {})",
            text.len(),
            MAX_THOUGHT_LENGTH
        ));
    }

    Ok(())
}

/// Validate a prompt submitted for enhancement
pub fn validate_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(anyhow!("prompt cannot be empty"));
    }

    if prompt.len() > MAX_PROMPT_LENGTH {
        return Err(anyhow!(
            "prompt too long: {} chars (max: {})",
            prompt.len(),
            MAX_PROMPT_LENGTH
        ));
    }

    Ok(())
}

/// Sanitize tag names coming back from the extraction provider.
///
/// The provider is untrusted input like any other: empty names, overlong
/// names and oversized tag lists are dropped here before the candidates
/// reach the resolution algorithm.
pub fn sanitize_tag_names(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && name.len() <= MAX_TAG_NAME_LENGTH)
        .take(MAX_TAGS_PER_THOUGHT)
        .collect()
}
