//! CLI command handlers

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::json;
use tracing::debug;
use tracing::info;

use crate::cli::output::*;
use crate::models::RiskLevel;
use crate::rag::prompts::build_chapter_summary_prompt;
use crate::rag::RagQuery;
use crate::rag::RuleRagService;
use crate::AppConfig;
use crate::Result;
use crate::RuleRagError;

pub fn handle_search_command(
    service: &RuleRagService,
    query: &str,
    limit: usize,
    json: bool,
) -> Result<()> {
    let results = service.search(query);

    if json {
        let rows: Vec<_> = results
            .iter()
            .take(limit)
            .map(|r| {
                json!({
                    "id": r.chapter.id,
                    "title": r.chapter.title,
                    "riskLevel": r.chapter.risk_level,
                    "matchScore": r.score,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print_search_header(query);
    print_search_results(&results, limit);
    Ok(())
}

pub fn handle_faq_command(service: &RuleRagService, query: &str, limit: usize) -> Result<()> {
    print_search_header(query);
    print_faq_results(&service.search_faq(query), limit);
    Ok(())
}

pub fn handle_context_command(
    service: &RuleRagService,
    question: &str,
    budget: Option<usize>,
    sources: bool,
) -> Result<()> {
    let mut query = RagQuery::new(question);
    if let Some(budget) = budget {
        query = query.with_budget(budget);
    }

    let response = service.retrieve(&query);
    if sources {
        println!("{}", response.format());
    } else {
        println!("{}", response.context);
    }
    Ok(())
}

pub fn handle_prompt_command(
    service: &RuleRagService,
    question: &str,
    extra: Option<&str>,
) -> Result<()> {
    println!("{}", service.build_prompt(question, extra));
    Ok(())
}

pub fn handle_chapter_command(
    service: &RuleRagService,
    id: &str,
    summary_prompt: bool,
    max_words: usize,
) -> Result<()> {
    let Some(chapter) = service.get_chapter(id) else {
        print_warning(&format!("No chapter with id '{id}'"));
        return Ok(());
    };

    if summary_prompt {
        println!(
            "{}",
            build_chapter_summary_prompt(&chapter.title, &chapter.content, max_words)
        );
    } else {
        print_chapter(chapter);
    }
    Ok(())
}

pub fn handle_risk_command(service: &RuleRagService, level: RiskLevel) -> Result<()> {
    print_info(&format!("Chapters with {level} risk"));
    let results = service.by_risk_level(level);
    print_search_results(&results, results.len());
    Ok(())
}

pub fn handle_related_command(service: &RuleRagService, ids: &[String]) -> Result<()> {
    let results = service.by_ids(ids);
    if results.len() < ids.len() {
        print_warning(&format!(
            "{} of {} ids not found",
            ids.len() - results.len(),
            ids.len()
        ));
    }
    print_search_results(&results, results.len());
    Ok(())
}

pub fn handle_summary_command(service: &RuleRagService, json: bool) -> Result<()> {
    let summary = service.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Assemble one context per question; questions run on blocking tasks concurrently
pub async fn handle_batch_command(
    service: Arc<RuleRagService>,
    file: &Path,
    budget: Option<usize>,
) -> Result<()> {
    let content = tokio::fs::read_to_string(file).await?;
    let questions: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    info!("Assembling contexts for {} questions", questions.len());

    let tasks = questions.into_iter().map(|question| {
        let service = Arc::clone(&service);
        tokio::task::spawn_blocking(move || {
            let mut query = RagQuery::new(question);
            if let Some(budget) = budget {
                query = query.with_budget(budget);
            }
            service.retrieve(&query)
        })
    });

    let responses = join_all(tasks).await;
    let total = responses.len();
    for (idx, response) in responses.into_iter().enumerate() {
        let response = response
            .map_err(|e| RuleRagError::Custom(format!("Context task failed: {e}")))?;
        debug!("Question {} matched {} chapters", idx + 1, response.total_matches);
        println!("=== [{}/{}] {} ===", idx + 1, total, response.query);
        println!("{}", response.context);
        println!();
    }

    print_success(&format!("Assembled {total} contexts"));
    Ok(())
}

pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_config(config);
    Ok(())
}

/// Smoke check: summary plus two sample searches, as JSON
pub fn handle_selftest_command(service: &RuleRagService) -> Result<()> {
    let summary = service.summary();
    let training = service.search("training");
    let pricing = service.search("fee");

    let report = json!({
        "success": true,
        "summary": summary,
        "trainingMatches": training.len(),
        "sampleRule": training.first().map(|r| r.chapter),
        "searchTest": {
            "query": "fee",
            "results": pricing
                .iter()
                .take(2)
                .map(|r| json!({ "id": r.chapter.id, "matchScore": r.score }))
                .collect::<Vec<_>>(),
        },
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
