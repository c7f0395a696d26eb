//! Keyword retrieval with weighted multi-signal scoring

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::corpus::RuleCorpus;
use crate::models::FaqEntry;
use crate::models::RuleChapter;
use crate::rag::FaqMatch;
use crate::rag::MatchType;
use crate::rag::SearchResult;

/// Query terms that mark a question as being about cost or payment
pub const PRICING_INTENT_TERMS: &[&str] = &[
    "price",
    "pricing",
    "fee",
    "compensation",
    "unit cost",
    "cost",
    "expense",
    "payment",
    "amount",
    "料金",
    "報酬",
    "単価",
    "費用",
    "支払",
    "金額",
];

/// Chapter vocabulary that earns the pricing boost
pub const PRICING_CHAPTER_KEYWORDS: &[&str] = &[
    "compensation",
    "fee",
    "payment",
    "price",
    "yen",
    "dollar",
    "円",
    "報酬",
    "料金",
    "支払",
];

/// Tokens shorter than this (in characters) carry no signal
pub const MIN_TOKEN_CHARS: usize = 2;

/// Score weights for each matching signal.
///
/// These are hand-tuned; they are configuration, not derived constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Whole normalized query found in the title
    pub title_phrase: u32,
    /// Token found in the title
    pub title_token: u32,
    /// Token found in the content
    pub content_token: u32,
    /// Token found in any tag
    pub tag_token: u32,
    /// Pricing question meets a chapter that talks about money
    pub pricing_boost: u32,
}

impl ScoringWeights {
    /// Largest accepted weight; keeps realistic sums far from `u32::MAX`
    pub const MAX_WEIGHT: u32 = 10_000;

    /// Weights by config key, in declaration order
    #[must_use]
    pub const fn named(&self) -> [(&'static str, u32); 5] {
        [
            ("title_phrase", self.title_phrase),
            ("title_token", self.title_token),
            ("content_token", self.content_token),
            ("tag_token", self.tag_token),
            ("pricing_boost", self.pricing_boost),
        ]
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title_phrase: 10,
            title_token: 5,
            content_token: 3,
            tag_token: 4,
            pricing_boost: 8,
        }
    }
}

/// A query after normalization, tokenization and intent detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnalysis {
    pub normalized: String,
    pub tokens: Vec<String>,
    pub pricing_intent: bool,
}

impl QueryAnalysis {
    #[must_use]
    pub fn new(query: &str) -> Self {
        let normalized = query.trim().to_lowercase();
        let tokens = tokenize(&normalized);
        let pricing_intent = detect_pricing_intent(&normalized);

        Self {
            normalized,
            tokens,
            pricing_intent,
        }
    }

    /// True when the query carries no usable signal at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Split a normalized query into scoring tokens
#[must_use]
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Whether the normalized query mentions cost or payment
#[must_use]
pub fn detect_pricing_intent(normalized: &str) -> bool {
    PRICING_INTENT_TERMS
        .iter()
        .any(|term| normalized.contains(term))
}

fn mentions_pricing(text: &str) -> bool {
    PRICING_CHAPTER_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword))
}

/// Keyword retriever over a shared rule corpus
#[derive(Debug, Clone)]
pub struct Retriever {
    corpus: Arc<RuleCorpus>,
    weights: ScoringWeights,
}

impl Retriever {
    /// Create a new retriever
    #[must_use]
    pub fn new(corpus: Arc<RuleCorpus>, weights: ScoringWeights) -> Self {
        Self { corpus, weights }
    }

    #[must_use]
    pub fn corpus(&self) -> &Arc<RuleCorpus> {
        &self.corpus
    }

    /// Score a single chapter against an analyzed query
    #[must_use]
    pub fn score_chapter(&self, chapter: &RuleChapter, query: &QueryAnalysis) -> u32 {
        let weights = &self.weights;
        let title = chapter.title.to_lowercase();
        let content = chapter.content.to_lowercase();
        let tags: Vec<String> = chapter.tags.iter().map(|t| t.to_lowercase()).collect();

        let mut score: u32 = 0;

        if !query.is_empty() && title.contains(&query.normalized) {
            score = score.saturating_add(weights.title_phrase);
        }

        for token in &query.tokens {
            if title.contains(token.as_str()) {
                score = score.saturating_add(weights.title_token);
            }
            if content.contains(token.as_str()) {
                score = score.saturating_add(weights.content_token);
            }
            if tags.iter().any(|tag| tag.contains(token.as_str())) {
                score = score.saturating_add(weights.tag_token);
            }
        }

        if query.pricing_intent && (mentions_pricing(&title) || mentions_pricing(&content)) {
            score = score.saturating_add(weights.pricing_boost);
        }

        score
    }

    /// Rank every chapter with a positive score against the query
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchResult<'_>> {
        self.search_analyzed(&QueryAnalysis::new(query))
    }

    /// Rank chapters for an already analyzed query
    #[must_use]
    pub fn search_analyzed(&self, query: &QueryAnalysis) -> Vec<SearchResult<'_>> {
        debug!(
            "Performing keyword search: {} ({} tokens, pricing intent: {})",
            query.normalized,
            query.tokens.len(),
            query.pricing_intent
        );

        let results = self
            .corpus
            .chapters()
            .iter()
            .filter_map(|chapter| {
                let score = self.score_chapter(chapter, query);
                (score > 0).then_some(SearchResult {
                    chapter,
                    score,
                    match_type: MatchType::Keyword,
                })
            })
            .collect();

        let ranked = Reranker::rerank_by_score(results);
        debug!("Keyword search matched {} chapters", ranked.len());
        ranked
    }

    /// Score a FAQ entry with the chapter signals (question as title, answer as content)
    #[must_use]
    pub fn score_faq(&self, entry: &FaqEntry, query: &QueryAnalysis) -> u32 {
        let weights = &self.weights;
        let question = entry.question.to_lowercase();
        let answer = entry.answer.to_lowercase();

        let mut score: u32 = 0;
        if !query.is_empty() && question.contains(&query.normalized) {
            score = score.saturating_add(weights.title_phrase);
        }
        for token in &query.tokens {
            if question.contains(token.as_str()) {
                score = score.saturating_add(weights.title_token);
            }
            if answer.contains(token.as_str()) {
                score = score.saturating_add(weights.content_token);
            }
        }
        score
    }

    /// Rank FAQ entries with a positive score against the query
    #[must_use]
    pub fn search_faq(&self, query: &str) -> Vec<FaqMatch<'_>> {
        self.search_faq_analyzed(&QueryAnalysis::new(query))
    }

    #[must_use]
    pub fn search_faq_analyzed(&self, query: &QueryAnalysis) -> Vec<FaqMatch<'_>> {
        let mut matches: Vec<FaqMatch<'_>> = self
            .corpus
            .faq()
            .iter()
            .filter_map(|entry| {
                let score = self.score_faq(entry, query);
                (score > 0).then_some(FaqMatch { entry, score })
            })
            .collect();

        // sort_by is stable: equal scores keep corpus order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }
}

/// Rerank search results
pub struct Reranker;

impl Reranker {
    /// Score-descending order; equal scores keep their incoming order
    #[must_use]
    pub fn rerank_by_score(mut results: Vec<SearchResult<'_>>) -> Vec<SearchResult<'_>> {
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }
}
