//! Context assembly from ranked rules

use tracing::debug;

use crate::cli::output::truncate_str;
use crate::config::ContextConfig;
use crate::models::PricingTable;
use crate::rag::FaqMatch;
use crate::rag::SearchResult;

/// First line of every assembled context
pub const CONTEXT_HEADER: &str = "Reference information from the contract rules:";

/// Last line of every assembled context
pub const CLOSING_INSTRUCTION: &str =
    "Base your answer on the contract rules above and cite the chapters you rely on.";

/// Cap on the one-line pricing summary, in characters
pub const PRICING_LINE_CHARS: usize = 300;

/// Inputs for one assembly call
#[derive(Debug, Clone, Copy)]
pub struct ContextRequest<'a> {
    pub question: &'a str,
    pub chapters: &'a [SearchResult<'a>],
    pub faq: &'a [FaqMatch<'a>],
    pub pricing_intent: bool,
    pub pricing: Option<&'a PricingTable>,
}

/// Assembled context plus what made it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    pub text: String,
    /// Ids of the chapters rendered, in output order
    pub chapter_ids: Vec<String>,
    pub faq_used: usize,
    pub pricing_included: bool,
}

/// Assembler for creating bounded context from ranked rules
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    max_context_length: usize,
    top_chapters: usize,
    excerpt_chars: usize,
    faq_limit: usize,
}

impl ContextAssembler {
    #[must_use]
    pub const fn from_config(config: &ContextConfig) -> Self {
        Self {
            max_context_length: config.max_context_length,
            top_chapters: config.top_chapters,
            excerpt_chars: config.excerpt_chars,
            faq_limit: config.faq_limit,
        }
    }

    #[must_use]
    pub const fn max_context_length(&self) -> usize {
        self.max_context_length
    }

    /// Assemble context within `budget` characters.
    ///
    /// Sections are admitted whole, in fixed order, while they fit; a section
    /// that would overflow is skipped. Header and closing instruction are
    /// always reserved.
    #[must_use]
    pub fn assemble_with_budget(
        &self,
        request: &ContextRequest<'_>,
        budget: usize,
    ) -> AssembledContext {
        debug!(
            question = request.question,
            pricing_intent = request.pricing_intent,
            chapters = request.chapters.len(),
            faq = request.faq.len(),
            budget,
            "Assembling context"
        );

        let header = format!("{CONTEXT_HEADER}\n\n");
        let reserved = char_len(&header) + char_len(CLOSING_INSTRUCTION);

        if reserved > budget {
            debug!("Budget {} too small for header and closing", budget);
            return AssembledContext {
                text: CLOSING_INSTRUCTION.chars().take(budget).collect(),
                chapter_ids: Vec::new(),
                faq_used: 0,
                pricing_included: false,
            };
        }

        let mut body = String::new();
        let mut remaining = budget - reserved;
        let mut admit = |entry: &str| {
            let len = char_len(entry);
            if len <= remaining {
                body.push_str(entry);
                remaining -= len;
                true
            } else {
                false
            }
        };

        let mut pricing_included = false;
        if request.pricing_intent {
            if let Some(table) = request.pricing {
                if let Some(line) = self.format_pricing(table) {
                    pricing_included = admit(&format!("{line}\n\n"));
                }
            }
        }

        let mut chapter_ids = Vec::new();
        // Numbering follows the rendered sections, so skipped chapters leave no gap
        for result in request.chapters.iter().take(self.top_chapters) {
            let entry = self.format_chapter(chapter_ids.len() + 1, result);
            if admit(&entry) {
                chapter_ids.push(result.chapter.id.clone());
            }
        }

        let mut faq_used = 0;
        for faq in request.faq.iter().take(self.faq_limit) {
            if admit(&self.format_faq(faq)) {
                faq_used += 1;
            }
        }

        let text = format!("{header}{body}{CLOSING_INSTRUCTION}");
        debug!(
            "Context assembled: {} chars, {} chapters, {} faq, pricing: {}",
            char_len(&text),
            chapter_ids.len(),
            faq_used,
            pricing_included
        );

        AssembledContext {
            text,
            chapter_ids,
            faq_used,
            pricing_included,
        }
    }

    /// One-line pricing summary, `None` for a table with no categories
    #[must_use]
    pub fn format_pricing(&self, table: &PricingTable) -> Option<String> {
        let parts: Vec<String> = table
            .categories()
            .map(|(name, rate)| {
                if rate.is_empty() {
                    name.to_string()
                } else {
                    format!("{name} ({})", rate.render())
                }
            })
            .collect();

        if parts.is_empty() {
            return None;
        }

        let line = format!("Pricing summary: {}", parts.join("; "));
        Some(truncate_str(&line.replace('\n', " "), PRICING_LINE_CHARS))
    }

    /// Format a single ranked chapter
    fn format_chapter(&self, index: usize, result: &SearchResult<'_>) -> String {
        let chapter = result.chapter;
        format!(
            "{}. {}: {}\n   Risk level: {}\n\n",
            index,
            chapter.title,
            truncate_str(&chapter.content, self.excerpt_chars),
            chapter.risk_level
        )
    }

    fn format_faq(&self, faq: &FaqMatch<'_>) -> String {
        format!(
            "Q: {}\nA: {}\n\n",
            truncate_str(&faq.entry.question, self.excerpt_chars),
            truncate_str(&faq.entry.answer, self.excerpt_chars)
        )
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::from_config(&ContextConfig::default())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
