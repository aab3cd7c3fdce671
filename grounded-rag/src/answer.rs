//! Grounded question answering.
//!
//! [`GroundedAnswerer`] runs the terminal state machine over one question:
//! retrieve the single best chunk, gate on its similarity score, compose a
//! grounding prompt, generate at low temperature, and validate the output.
//! Low similarity and empty generation are defined outcomes with
//! `grounded: false`, never errors.

use std::sync::Arc;

use grounded_core::{GenerationModel, GenerationRequest};
use tracing::info;

use crate::config::RagConfig;
use crate::document::GroundedAnswer;
use crate::error::{RagError, Result};
use crate::retriever::Retriever;

/// The fixed refusal string.
///
/// Shared between the prompt instructions and the gate fallback, so a model
/// that declines per its instructions and the gate that never calls the model
/// produce byte-identical answers.
pub const REFUSAL: &str = "I do not have enough information to answer this question.";

/// Sampling temperature for answer generation. Low, to favor precision over
/// creativity.
const GENERATION_TEMPERATURE: f32 = 0.2;

/// Answers questions strictly from retrieved context.
pub struct GroundedAnswerer {
    retriever: Arc<Retriever>,
    model: Arc<dyn GenerationModel>,
    config: RagConfig,
}

impl GroundedAnswerer {
    /// Create a new answerer from its collaborators and configuration.
    pub fn new(retriever: Arc<Retriever>, model: Arc<dyn GenerationModel>, config: RagConfig) -> Self {
        Self { retriever, model, config }
    }

    /// Answer a question, or refuse when retrieval confidence is too low.
    ///
    /// # Errors
    ///
    /// Propagates embedding and index failures from retrieval; generation
    /// failures surface as [`RagError::Generation`]. No step is retried.
    pub async fn answer(&self, question: &str) -> Result<GroundedAnswer> {
        let results = self.retriever.search(question, 1).await?;

        let top = match results.into_iter().next() {
            Some(top) if top.similarity_score >= self.config.similarity_threshold => top,
            _ => {
                info!("no context cleared the similarity gate");
                return Ok(GroundedAnswer {
                    answer: REFUSAL.to_string(),
                    grounded: false,
                    context_used: None,
                    similarity_score: None,
                });
            }
        };

        let prompt = build_prompt(&top.content_snippet, question);
        let request = GenerationRequest::new(prompt, GENERATION_TEMPERATURE);
        let response = self.model.generate(request).await.map_err(|e| RagError::Generation {
            model: self.model.name().to_string(),
            message: e.to_string(),
        })?;

        let answer = response.text.trim().to_string();
        if answer.is_empty() {
            info!(similarity = top.similarity_score, "model declined to answer from context");
            return Ok(GroundedAnswer {
                answer: REFUSAL.to_string(),
                grounded: false,
                context_used: Some(top.content_snippet),
                similarity_score: Some(top.similarity_score),
            });
        }

        info!(similarity = top.similarity_score, "answered from retrieved context");
        Ok(GroundedAnswer {
            answer,
            grounded: true,
            context_used: Some(top.content_snippet),
            similarity_score: Some(top.similarity_score),
        })
    }
}

/// Build the grounding prompt around the retrieved context fragment.
///
/// The context is the only permitted knowledge source; the instructions bind
/// the model to it and name the exact refusal string for the insufficient
/// case.
fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "\
ROLE:
You are a language assistant designed to answer questions precisely and responsibly.

IDENTITY:
You answer using only the information present in the provided context.
You do not use prior knowledge and you do not speculate.

GROUNDING RULES:
1. Use EXCLUSIVELY the content inside the CONTEXT section.
2. Do NOT invent information.
3. Do NOT combine information from different documents.
4. If the context does not contain the answer, reply EXACTLY:
\"{REFUSAL}\"

SAFETY AND ETHICS:
1. Do not include opinions, subjective judgments, stereotypes, or offensive language.
2. Do not include sensitive information that is not explicitly present in the context.
3. Answer neutrally and objectively.

ANSWER FORMAT:
- At most 3 sentences.
- Clear and concise.

CONTEXT:
{context}

QUESTION:
{question}

ANSWER:
"
    )
}
