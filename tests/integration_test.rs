use std::io::Write;
use std::sync::Arc;

use rulerag::config::AppConfig;
use rulerag::models::RiskLevel;
use rulerag::rag::RagQuery;
use rulerag::Result;
use rulerag::RuleCorpus;
use rulerag::RuleRagError;
use rulerag::RuleRagService;

const CORPUS_JSON: &str = include_str!("../data/contract-rules.json");

fn write_corpus(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn setup_service() -> Result<(RuleRagService, tempfile::NamedTempFile)> {
    let file = write_corpus(CORPUS_JSON);
    let config = AppConfig::from_toml_str(&format!(
        "[corpus]\npath = {:?}\n",
        file.path().display().to_string()
    ))?;
    let service = RuleRagService::from_config(&config)?;
    Ok((service, file))
}

#[test]
fn test_load_corpus_from_file() -> Result<()> {
    let file = write_corpus(CORPUS_JSON);
    let corpus = RuleCorpus::from_file(file.path())?;

    assert_eq!(corpus.title(), "Training Outsourcing Contract Rules");
    assert_eq!(corpus.chapters().len(), 5);
    assert!(corpus.pricing().is_some());
    Ok(())
}

#[test]
fn test_missing_corpus_file_is_io_error() {
    let result = RuleCorpus::from_file("does/not/exist.json");
    assert!(matches!(result, Err(RuleRagError::Io(_))));
}

#[test]
fn test_malformed_corpus_file_rejected() {
    let file = write_corpus("{ \"title\": \"Rules\", \"chapters\": [");
    assert!(matches!(
        RuleCorpus::from_file(file.path()),
        Err(RuleRagError::InvalidCorpus(_))
    ));
}

#[test]
fn test_search_and_context_end_to_end() -> Result<()> {
    let (service, _file) = setup_service()?;

    let results = service.search("What is the compensation fee?");
    assert_eq!(results[0].chapter.id, "ch3");

    let context = service.format_context("What is the compensation fee?", 2500);
    assert!(context.contains("Pricing summary: "));
    assert!(context.contains("Chapter 3 Scope and Compensation"));
    assert!(context.contains("Q: When is the fee paid?"));
    assert!(context.chars().count() <= 2500);
    Ok(())
}

#[test]
fn test_configured_budget_applies() -> Result<()> {
    let file = write_corpus(CORPUS_JSON);
    let config = AppConfig::from_toml_str(&format!(
        "[corpus]\npath = {:?}\n\n[context]\nmax_context_length = 400\ntop_chapters = 1\n",
        file.path().display().to_string()
    ))?;
    let service = RuleRagService::from_config(&config)?;

    let response = service.retrieve(&RagQuery::new("session"));
    assert!(response.context.chars().count() <= 400);
    assert_eq!(response.total_matches, 3);
    assert_eq!(response.sources.len(), 1);
    assert_eq!(response.sources[0].id, "ch3");
    Ok(())
}

#[test]
fn test_filters_and_summary() -> Result<()> {
    let (service, _file) = setup_service()?;

    let high = service.by_risk_level(RiskLevel::High);
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].chapter.id, "ch2");

    let related = service.by_ids(&["ch4", "nope", "ch2"]);
    let ids: Vec<&str> = related.iter().map(|r| r.chapter.id.as_str()).collect();
    assert_eq!(ids, vec!["ch4", "ch2"]);

    let summary = serde_json::to_value(service.summary())?;
    assert_eq!(summary["totalChapters"], 5);
    assert_eq!(summary["totalFAQ"], 3);
    assert_eq!(summary["riskLevels"]["medium"], 2);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_retrieval_is_consistent() -> Result<()> {
    let (service, _file) = setup_service()?;
    let service = Arc::new(service);
    let expected = service.format_context("What is the price for materials?", 2500);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::task::spawn_blocking(move || {
                service.format_context("What is the price for materials?", 2500)
            })
        })
        .collect();

    for handle in futures::future::join_all(handles).await {
        let context = handle.map_err(|e| RuleRagError::Custom(e.to_string()))?;
        assert_eq!(context, expected);
    }
    Ok(())
}
