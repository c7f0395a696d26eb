//! Complete retrieval pipeline: Analyze -> Rank -> Assemble

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::corpus::RuleCorpus;
use crate::errors::Result;
use crate::models::CorpusSummary;
use crate::models::RiskLevel;
use crate::models::RuleChapter;
use crate::rag::prompts::build_contract_prompt;
use crate::rag::AssembledContext;
use crate::rag::ContextAssembler;
use crate::rag::ContextRequest;
use crate::rag::FaqMatch;
use crate::rag::QueryAnalysis;
use crate::rag::Retriever;
use crate::rag::SearchResult;

/// Rule retrieval service over one immutable corpus.
///
/// Construct it explicitly and share it (e.g. in an `Arc`); all methods take
/// `&self` and touch no mutable state.
#[derive(Debug, Clone)]
pub struct RuleRagService {
    retriever: Retriever,
    context_assembler: ContextAssembler,
}

impl RuleRagService {
    /// Create a new service over an already loaded corpus
    #[must_use]
    pub fn new(corpus: Arc<RuleCorpus>, config: &AppConfig) -> Self {
        let retriever = Retriever::new(corpus, config.scoring_weights());
        let context_assembler = ContextAssembler::from_config(&config.context);

        Self {
            retriever,
            context_assembler,
        }
    }

    /// Load the configured corpus file and build the service
    ///
    /// # Errors
    /// - IO errors reading the corpus file
    /// - Corpus validation errors (missing fields, duplicate ids)
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let corpus = Arc::new(RuleCorpus::from_file(config.corpus_path())?);
        Ok(Self::new(corpus, config))
    }

    #[must_use]
    pub fn corpus(&self) -> &RuleCorpus {
        self.retriever.corpus()
    }

    /// Ranked chapters for the query; zero-score chapters are excluded
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchResult<'_>> {
        self.retriever.search(query)
    }

    /// Ranked FAQ entries for the query
    #[must_use]
    pub fn search_faq(&self, query: &str) -> Vec<FaqMatch<'_>> {
        self.retriever.search_faq(query)
    }

    #[must_use]
    pub fn get_chapter(&self, id: &str) -> Option<&RuleChapter> {
        self.corpus().get_by_id(id)
    }

    /// Unranked chapters with the given risk level
    #[must_use]
    pub fn by_risk_level(&self, level: RiskLevel) -> Vec<SearchResult<'_>> {
        self.corpus().by_risk_level(level)
    }

    /// Unranked chapters for the given ids, in input order
    #[must_use]
    pub fn by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<SearchResult<'_>> {
        self.corpus().by_ids(ids)
    }

    #[must_use]
    pub fn summary(&self) -> CorpusSummary {
        self.corpus().summary()
    }

    /// Prompt-ready context for the question, at most `budget` characters
    #[must_use]
    pub fn format_context(&self, question: &str, budget: usize) -> String {
        self.assemble(question, budget).text
    }

    /// Perform retrieval and assembly, keeping the sources used
    #[must_use]
    pub fn retrieve(&self, query: &RagQuery) -> ContextResponse {
        let budget = query
            .max_context_length
            .unwrap_or_else(|| self.context_assembler.max_context_length());
        let analysis = QueryAnalysis::new(&query.question);
        let results = self.retriever.search_analyzed(&analysis);
        let assembled = self.assemble_analyzed(&query.question, &analysis, &results, budget);

        let sources = results
            .iter()
            .filter(|r| assembled.chapter_ids.contains(&r.chapter.id))
            .map(|r| SourceRef {
                id: r.chapter.id.clone(),
                title: r.chapter.title.clone(),
                score: r.score,
            })
            .collect();

        ContextResponse {
            query: query.question.clone(),
            context: assembled.text,
            sources,
            total_matches: results.len(),
            faq_used: assembled.faq_used,
            pricing_intent: analysis.pricing_intent,
            pricing_included: assembled.pricing_included,
        }
    }

    /// Build the full prompt for a model, with the default context budget
    #[must_use]
    pub fn build_prompt(&self, question: &str, extra_context: Option<&str>) -> String {
        let context =
            self.format_context(question, self.context_assembler.max_context_length());
        build_contract_prompt(question, &context, extra_context)
    }

    fn assemble(&self, question: &str, budget: usize) -> AssembledContext {
        let analysis = QueryAnalysis::new(question);
        let results = self.retriever.search_analyzed(&analysis);
        self.assemble_analyzed(question, &analysis, &results, budget)
    }

    fn assemble_analyzed(
        &self,
        question: &str,
        analysis: &QueryAnalysis,
        results: &[SearchResult<'_>],
        budget: usize,
    ) -> AssembledContext {
        info!(
            pricing_intent = analysis.pricing_intent,
            "Generating context for question: {}", question
        );

        let faq = self.retriever.search_faq_analyzed(analysis);
        debug!(
            "Matched {} chapters and {} FAQ entries",
            results.len(),
            faq.len()
        );

        self.context_assembler.assemble_with_budget(
            &ContextRequest {
                question,
                chapters: results,
                faq: &faq,
                pricing_intent: analysis.pricing_intent,
                pricing: self.corpus().pricing(),
            },
            budget,
        )
    }
}

/// Context query options
#[derive(Debug, Clone)]
pub struct RagQuery {
    pub question: String,
    /// Overrides the configured budget when set
    pub max_context_length: Option<usize>,
}

impl RagQuery {
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            max_context_length: None,
        }
    }

    #[must_use]
    pub const fn with_budget(mut self, max_context_length: usize) -> Self {
        self.max_context_length = Some(max_context_length);
        self
    }
}

/// Chapter cited in an assembled context
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SourceRef {
    pub id: String,
    pub title: String,
    pub score: u32,
}

/// Assembled context with the sources that made it in
#[derive(Debug, Clone, serde::Serialize)]
pub struct ContextResponse {
    pub query: String,
    pub context: String,
    pub sources: Vec<SourceRef>,
    /// Chapters with a positive score, before the top-K cut
    pub total_matches: usize,
    pub faq_used: usize,
    pub pricing_intent: bool,
    pub pricing_included: bool,
}

impl ContextResponse {
    /// Get a formatted string representation
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Query: {}\n\n", self.query));
        output.push_str(&format!("Context:\n{}\n\n", self.context));
        output.push_str(&format!(
            "Sources ({} of {} matching chapters):\n",
            self.sources.len(),
            self.total_matches
        ));

        for (idx, source) in self.sources.iter().enumerate() {
            output.push_str(&format!(
                "  {}. [{}] {} (Score: {})\n",
                idx + 1,
                source.id,
                source.title,
                source.score
            ));
        }

        output
    }
}
