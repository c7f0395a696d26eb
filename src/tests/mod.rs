pub mod context_budget_test;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::corpus::RuleCorpus;
use crate::rag::RuleRagService;

/// Sample corpus shipped with the repository, used as the shared fixture
pub fn sample_corpus_json() -> String {
    include_str!("../../data/contract-rules.json").to_string()
}

/// Test helper to load the sample corpus
pub fn sample_corpus() -> RuleCorpus {
    RuleCorpus::from_json_str(&sample_corpus_json()).expect("sample corpus is valid")
}

/// Test helper to create a service over the sample corpus with default settings
pub fn sample_service() -> RuleRagService {
    RuleRagService::new(Arc::new(sample_corpus()), &AppConfig::default())
}
