//! Retrieval and context assembly over the contract-rules corpus
//!
//! This module turns a free-text question into prompt-ready context:
//! - Keyword scoring of every chapter (title, content, tags, pricing intent)
//! - Stable ranking of the positive-score chapters
//! - FAQ matching with the same signals
//! - Budgeted context assembly and prompt building
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rulerag::config::AppConfig;
//! use rulerag::rag::RuleRagService;
//! use rulerag::RuleCorpus;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let corpus = Arc::new(RuleCorpus::from_file(config.corpus_path())?);
//!     let service = RuleRagService::new(corpus, &config);
//!
//!     for result in service.search("What is the compensation fee?") {
//!         println!("{} ({})", result.chapter.title, result.score);
//!     }
//!     println!("{}", service.format_context("What is the compensation fee?", 2500));
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod prompts;
pub mod retriever;

pub use context::AssembledContext;
pub use context::ContextAssembler;
pub use context::ContextRequest;
pub use pipeline::ContextResponse;
pub use pipeline::RagQuery;
pub use pipeline::RuleRagService;
pub use retriever::QueryAnalysis;
pub use retriever::Retriever;
pub use retriever::ScoringWeights;

use crate::models::FaqEntry;
use crate::models::RuleChapter;

/// Chapter row with its relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<'a> {
    pub chapter: &'a RuleChapter,
    pub score: u32,
    pub match_type: MatchType,
}

/// How a result row was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Ranked keyword search; score is always positive
    Keyword,
    /// Filter accessor (risk level, id list); score is always zero
    Filter,
}

/// FAQ entry with its relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqMatch<'a> {
    pub entry: &'a FaqEntry,
    pub score: u32,
}
