//! Immutable, validated rule corpus and its accessors

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;
use tracing::info;

use crate::errors::Result;
use crate::errors::RuleRagError;
use crate::models::CorpusDocument;
use crate::models::CorpusSummary;
use crate::models::FaqEntry;
use crate::models::PricingTable;
use crate::models::RiskLevel;
use crate::models::RiskLevelCounts;
use crate::models::RuleChapter;
use crate::rag::MatchType;
use crate::rag::SearchResult;

/// Rule corpus loaded once and never mutated afterwards.
///
/// Share it across threads behind an `Arc`; every accessor takes `&self`.
#[derive(Debug, Clone)]
pub struct RuleCorpus {
    title: String,
    version: String,
    chapters: Vec<RuleChapter>,
    faq: Vec<FaqEntry>,
    pricing: Option<PricingTable>,
    index: HashMap<String, usize>,
}

impl RuleCorpus {
    /// Build a corpus from an already parsed document, validating it
    pub fn new(document: CorpusDocument) -> Result<Self> {
        let CorpusDocument {
            title,
            version,
            chapters,
            faq,
            pricing,
        } = document;

        let mut index = HashMap::with_capacity(chapters.len());
        for (position, chapter) in chapters.iter().enumerate() {
            validate_chapter(position, chapter)?;
            if index.insert(chapter.id.clone(), position).is_some() {
                return Err(RuleRagError::DuplicateChapterId(chapter.id.clone()));
            }
        }

        for (position, entry) in faq.iter().enumerate() {
            if entry.question.trim().is_empty() {
                return Err(RuleRagError::InvalidCorpus(format!(
                    "faq entry #{} has an empty question",
                    position + 1
                )));
            }
        }

        Ok(Self {
            title,
            version,
            chapters,
            faq,
            pricing: pricing.filter(|table| !table.is_empty()),
            index,
        })
    }

    /// Parse and validate a corpus from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CorpusDocument = serde_json::from_str(json)
            .map_err(|e| RuleRagError::InvalidCorpus(e.to_string()))?;
        Self::new(document)
    }

    /// Load a corpus from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading rule corpus from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let corpus = Self::from_json_str(&content)?;
        info!(
            "Loaded rule corpus '{}' v{}: {} chapters, {} FAQ entries, pricing: {}",
            corpus.title(),
            corpus.version(),
            corpus.chapters().len(),
            corpus.faq().len(),
            corpus.pricing().is_some()
        );
        Ok(corpus)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Exact-key chapter lookup
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&RuleChapter> {
        self.index.get(id).map(|&position| &self.chapters[position])
    }

    /// All chapters in declaration order
    #[must_use]
    pub fn chapters(&self) -> &[RuleChapter] {
        &self.chapters
    }

    /// All FAQ entries in declaration order
    #[must_use]
    pub fn faq(&self) -> &[FaqEntry] {
        &self.faq
    }

    #[must_use]
    pub fn pricing(&self) -> Option<&PricingTable> {
        self.pricing.as_ref()
    }

    #[must_use]
    pub fn summary(&self) -> CorpusSummary {
        let mut risk_levels = RiskLevelCounts::default();
        for chapter in &self.chapters {
            match chapter.risk_level {
                RiskLevel::Low => risk_levels.low += 1,
                RiskLevel::Medium => risk_levels.medium += 1,
                RiskLevel::High => risk_levels.high += 1,
            }
        }

        CorpusSummary {
            title: self.title.clone(),
            version: self.version.clone(),
            total_chapters: self.chapters.len(),
            total_faq: self.faq.len(),
            risk_levels,
        }
    }

    /// Chapters with the given risk level, in corpus order, unscored
    #[must_use]
    pub fn by_risk_level(&self, level: RiskLevel) -> Vec<SearchResult<'_>> {
        self.chapters
            .iter()
            .filter(|chapter| chapter.risk_level == level)
            .map(unscored)
            .collect()
    }

    /// Chapters for the given ids, in input order, unscored.
    ///
    /// Unknown ids are skipped; repeated ids yield repeated rows.
    #[must_use]
    pub fn by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<SearchResult<'_>> {
        ids.iter()
            .filter_map(|id| self.get_by_id(id.as_ref()))
            .map(unscored)
            .collect()
    }
}

fn unscored(chapter: &RuleChapter) -> SearchResult<'_> {
    SearchResult {
        chapter,
        score: 0,
        match_type: MatchType::Filter,
    }
}

fn validate_chapter(position: usize, chapter: &RuleChapter) -> Result<()> {
    if chapter.id.trim().is_empty() {
        return Err(RuleRagError::InvalidCorpus(format!(
            "chapter #{} has an empty id",
            position + 1
        )));
    }
    if chapter.title.trim().is_empty() {
        return Err(RuleRagError::InvalidCorpus(format!(
            "chapter '{}' has an empty title",
            chapter.id
        )));
    }
    if chapter.content.trim().is_empty() {
        return Err(RuleRagError::InvalidCorpus(format!(
            "chapter '{}' has empty content",
            chapter.id
        )));
    }
    Ok(())
}
