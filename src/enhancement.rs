//! Prompt enhancement
//!
//! Rewrites a user prompt by weaving in the most relevant non-fossil
//! thoughts from the graph. The caller selects and filters candidates (see
//! `GraphStore::enhancement_candidates`); this module builds the prompt and
//! handles provider failure with a naive concatenation fallback.

use tracing::warn;

use crate::anthropic::AnthropicClient;
use crate::constants::ENHANCE_FALLBACK_CAP;
use crate::errors::{AppError, Result};
use crate::types::{EnhancedPrompt, Thought};

const ENHANCEMENT_MAX_TOKENS: u32 = 1000;
const ENHANCEMENT_TEMPERATURE: f32 = 0.7;

/// Prompt enhancement client.
#[derive(Debug, Clone)]
pub struct PromptEnhancer {
    client: AnthropicClient,
    model: String,
}

impl PromptEnhancer {
    pub fn new(client: AnthropicClient, model: String) -> Self {
        Self { client, model }
    }

    /// Enhance a prompt with context thoughts.
    ///
    /// A missing API key is the one failure that surfaces to the caller
    /// (distinct configuration error). Any other provider failure degrades
    /// to the concatenation fallback so the endpoint always produces a
    /// usable prompt.
    pub async fn enhance(&self, original: &str, context: &[Thought]) -> Result<EnhancedPrompt> {
        if !self.client.is_configured() {
            return Err(AppError::ProviderNotConfigured);
        }

        let prompt = build_enhancement_prompt(original, context);
        match self
            .client
            .complete(&self.model, prompt, ENHANCEMENT_MAX_TOKENS, ENHANCEMENT_TEMPERATURE)
            .await
        {
            Ok(text) => Ok(EnhancedPrompt {
                enhanced_prompt: text.trim().to_string(),
                context_used: context.len(),
            }),
            Err(e) => {
                warn!(error = %e, "enhancement call failed, using concatenation fallback");
                Ok(fallback_enhancement(original, context))
            }
        }
    }
}

fn build_enhancement_prompt(original: &str, context: &[Thought]) -> String {
    let insights: Vec<String> = context
        .iter()
        .map(|t| format!("• {} (Strength: {})", t.text, t.atp.round() as i64))
        .collect();

    format!(
        "You are an expert prompt engineer. Your task is to enhance a user's simple prompt by \
         intelligently weaving in relevant context from their personal knowledge base to create \
         a more sophisticated, nuanced, and effective prompt.\n\n\
         ORIGINAL PROMPT:\n\"{original}\"\n\n\
         RELEVANT CONTEXT FROM USER'S KNOWLEDGE:\n{}\n\n\
         ENHANCEMENT INSTRUCTIONS:\n\
         1. Analyze the original prompt's intent and desired outcome\n\
         2. Identify which pieces of context are most relevant and valuable\n\
         3. Seamlessly integrate the relevant insights into an enhanced version\n\
         4. Make the prompt more specific, detailed, and actionable\n\
         5. Maintain the user's original voice and intent\n\n\
         IMPORTANT:\n\
         - Don't mention \"based on your previous thoughts\" or reference the context explicitly\n\
         - Keep the enhanced prompt concise but powerful\n\
         - Maintain the original prompt's core objective\n\n\
         Return ONLY the enhanced prompt, no explanation or meta-commentary.",
        insights.join("\n")
    )
}

/// Naive fallback: the original prompt plus up to 3 raw thought texts.
fn fallback_enhancement(original: &str, context: &[Thought]) -> EnhancedPrompt {
    let used: Vec<&Thought> = context.iter().take(ENHANCE_FALLBACK_CAP).collect();

    if used.is_empty() {
        return EnhancedPrompt {
            enhanced_prompt: original.to_string(),
            context_used: 0,
        };
    }

    let lines: Vec<String> = used.iter().map(|t| format!("- {}", t.text)).collect();
    EnhancedPrompt {
        enhanced_prompt: format!("{original}\n\nRelevant context:\n{}", lines.join("\n")),
        context_used: used.len(),
    }
}
