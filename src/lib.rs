//! Keyword-ranked retrieval and bounded context assembly over a
//! contract-rules corpus.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod logging;
pub mod models;
pub mod rag;

#[cfg(test)]
mod models_tests;
#[cfg(test)]
pub mod tests;

pub use config::AppConfig;
pub use corpus::RuleCorpus;
pub use errors::*;
pub use rag::RuleRagService;
