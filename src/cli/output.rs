//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `rulerag` CLI

use crate::models::CorpusSummary;
use crate::models::RiskLevel;
use crate::models::RuleChapter;
use crate::rag::FaqMatch;
use crate::rag::SearchResult;
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// This prevents panics when truncating strings with multi-byte UTF-8 characters
/// (Japanese rule text, emojis, etc.)
///
/// # Arguments
/// * `s` - The string to truncate
/// * `max_chars` - Maximum number of characters (not bytes)
///
/// # Returns
/// Truncated string with "..." suffix if truncated, otherwise the original string
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print a search header
pub fn print_search_header(query: &str) {
    println!("🔍 Searching rules for: \"{query}\"");
}

/// Print ranked or filtered chapter rows
pub fn print_search_results(results: &[SearchResult<'_>], limit: usize) {
    if results.is_empty() {
        println!("No matching rules found.");
        return;
    }

    println!("Found {} rules:", results.len());
    for (idx, result) in results.iter().take(limit).enumerate() {
        println!(
            "  {}. [{}] {} | Score: {} | Risk: {}",
            idx + 1,
            result.chapter.id,
            result.chapter.title,
            result.score,
            result.chapter.risk_level
        );
        println!("     {}", truncate_str(&result.chapter.content, 100));
    }

    if results.len() > limit {
        println!("  ... and {} more", results.len() - limit);
    }
}

/// Print FAQ matches
pub fn print_faq_results(matches: &[FaqMatch<'_>], limit: usize) {
    if matches.is_empty() {
        println!("No matching FAQ entries found.");
        return;
    }

    println!("Found {} FAQ entries:", matches.len());
    for (idx, faq) in matches.iter().take(limit).enumerate() {
        println!("  {}. Q: {} (Score: {})", idx + 1, faq.entry.question, faq.score);
        println!("     A: {}", truncate_str(&faq.entry.answer, 100));
    }
}

/// Print one chapter in full
pub fn print_chapter(chapter: &RuleChapter) {
    println!("📖 [{}] {}", chapter.id, chapter.title);
    println!("  Risk level: {}", chapter.risk_level);
    if !chapter.tags.is_empty() {
        println!("  Tags: {}", chapter.tags.join(", "));
    }
    println!();
    println!("{}", chapter.content);
}

/// Print corpus statistics
pub fn print_summary(summary: &CorpusSummary) {
    println!("📊 {} (v{})", summary.title, summary.version);
    println!("  Chapters: {}", summary.total_chapters);
    println!("  FAQ entries: {}", summary.total_faq);
    println!("  Risk levels:");
    for level in RiskLevel::ALL {
        println!("    {level}: {}", summary.risk_levels.get(level));
    }
}

/// Print the configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 RuleRAG Configuration:");
    println!();

    println!("📚 Corpus:");
    println!("  Path: {}", config.corpus_path().display());
    println!();

    println!("⚖️  Scoring:");
    println!("  Title phrase: {}", config.scoring.title_phrase);
    println!("  Title token: {}", config.scoring.title_token);
    println!("  Content token: {}", config.scoring.content_token);
    println!("  Tag token: {}", config.scoring.tag_token);
    println!("  Pricing boost: {}", config.scoring.pricing_boost);
    println!();

    println!("🧩 Context:");
    println!("  Max length: {} chars", config.max_context_length());
    println!("  Top chapters: {}", config.top_chapters());
    println!("  Excerpt: {} chars", config.excerpt_chars());
    println!("  FAQ entries: {}", config.faq_limit());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    println!("❌ {msg}");
}
