use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::rag::ScoringWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("data/contract-rules.json")
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Character budget for the whole assembled context
    #[serde(default = "default_max_context_length")]
    pub max_context_length: usize,
    /// How many ranked chapters are rendered
    #[serde(default = "default_top_chapters")]
    pub top_chapters: usize,
    /// Per-item excerpt cap, independent of the global budget
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
    /// FAQ entries rendered after the chapters; 0 or 1
    #[serde(default = "default_faq_limit")]
    pub faq_limit: usize,
}

impl ContextConfig {
    pub const DEFAULT_MAX_CONTEXT_LENGTH: usize = 2500;
    pub const DEFAULT_TOP_CHAPTERS: usize = 3;
    pub const DEFAULT_EXCERPT_CHARS: usize = 200;
    pub const DEFAULT_FAQ_LIMIT: usize = 1;
    /// The context never carries more than one FAQ entry
    pub const MAX_FAQ_LIMIT: usize = 1;
    /// Smallest budget that still leaves room for the header and closing line
    pub const MIN_CONTEXT_LENGTH: usize = 200;
}

const fn default_max_context_length() -> usize {
    ContextConfig::DEFAULT_MAX_CONTEXT_LENGTH
}

const fn default_top_chapters() -> usize {
    ContextConfig::DEFAULT_TOP_CHAPTERS
}

const fn default_excerpt_chars() -> usize {
    ContextConfig::DEFAULT_EXCERPT_CHARS
}

const fn default_faq_limit() -> usize {
    ContextConfig::DEFAULT_FAQ_LIMIT
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_context_length: default_max_context_length(),
            top_chapters: default_top_chapters(),
            excerpt_chars: default_excerpt_chars(),
            faq_limit: default_faq_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub backtrace: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub scoring: ScoringWeights,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::RuleRagError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Reject values the assembler cannot honor
    pub fn validate(&self) -> crate::Result<()> {
        if self.context.max_context_length < ContextConfig::MIN_CONTEXT_LENGTH {
            return Err(crate::RuleRagError::ConfigError(format!(
                "context.max_context_length must be at least {}, got {}",
                ContextConfig::MIN_CONTEXT_LENGTH,
                self.context.max_context_length
            )));
        }
        if self.context.top_chapters == 0 {
            return Err(crate::RuleRagError::ConfigError(
                "context.top_chapters must be at least 1".to_string(),
            ));
        }
        if self.context.excerpt_chars == 0 {
            return Err(crate::RuleRagError::ConfigError(
                "context.excerpt_chars must be at least 1".to_string(),
            ));
        }
        if self.context.faq_limit > ContextConfig::MAX_FAQ_LIMIT {
            return Err(crate::RuleRagError::ConfigError(format!(
                "context.faq_limit must be at most {}, got {}",
                ContextConfig::MAX_FAQ_LIMIT,
                self.context.faq_limit
            )));
        }
        for (name, weight) in self.scoring.named() {
            if weight > ScoringWeights::MAX_WEIGHT {
                return Err(crate::RuleRagError::ConfigError(format!(
                    "scoring.{name} must be at most {}, got {weight}",
                    ScoringWeights::MAX_WEIGHT
                )));
            }
        }
        Ok(())
    }

    /// Get corpus file path
    pub fn corpus_path(&self) -> &Path {
        &self.corpus.path
    }

    /// Get scoring weights
    pub fn scoring_weights(&self) -> ScoringWeights {
        self.scoring
    }

    /// Get context budget in characters
    pub fn max_context_length(&self) -> usize {
        self.context.max_context_length
    }

    /// Get number of chapters rendered into the context
    pub fn top_chapters(&self) -> usize {
        self.context.top_chapters
    }

    /// Get per-item excerpt cap
    pub fn excerpt_chars(&self) -> usize {
        self.context.excerpt_chars
    }

    /// Get number of FAQ entries rendered into the context
    pub fn faq_limit(&self) -> usize {
        self.context.faq_limit
    }

    /// Get log level
    pub fn log_level(&self) -> &str {
        &self.logging.level
    }
}
