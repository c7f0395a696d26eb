use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rulerag::cli::*;
use rulerag::config::AppConfig;
use rulerag::rag::RuleRagService;
use rulerag::RuleCorpus;
use rulerag::RuleRagError;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(&format!("{e:#}"));
            return Err(e);
        }
    };
    if let Some(corpus) = &cli.corpus {
        config.corpus.path.clone_from(corpus);
    }

    // Initialize logging
    if cli.verbose {
        rulerag::logging::apply_backtrace(&config);
        rulerag::logging::init_logging_with_level("debug")?;
    } else {
        rulerag::logging::init_logging_with_config(&config)?;
    }
    info!("Configuration loaded successfully");

    if let Err(e) = run(cli, config).await {
        print_error(&format!("{e:#}"));
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    if matches!(cli.command, Commands::Config) {
        handle_config_command(&config)?;
        return Ok(());
    }

    let corpus = RuleCorpus::from_file(config.corpus_path()).with_context(|| {
        format!(
            "Failed to load rule corpus from {}",
            config.corpus_path().display()
        )
    })?;
    let service = Arc::new(RuleRagService::new(Arc::new(corpus), &config));

    // Execute the requested command
    match cli.command {
        Commands::Search { query, limit, json } => {
            handle_search_command(&service, &query, limit, json)?;
        }
        Commands::Faq { query, limit } => handle_faq_command(&service, &query, limit)?,
        Commands::Context {
            question,
            budget,
            sources,
        } => handle_context_command(&service, &question, budget, sources)?,
        Commands::Prompt { question, extra } => {
            handle_prompt_command(&service, &question, extra.as_deref())?;
        }
        Commands::Chapter {
            id,
            summary_prompt,
            max_words,
        } => handle_chapter_command(&service, &id, summary_prompt, max_words)?,
        Commands::Risk { level } => handle_risk_command(&service, level.into())?,
        Commands::Related { ids } => handle_related_command(&service, &ids)?,
        Commands::Summary { json } => handle_summary_command(&service, json)?,
        Commands::Batch { file, budget } => {
            handle_batch_command(Arc::clone(&service), &file, budget).await?;
        }
        Commands::Selftest => handle_selftest_command(&service)?,
        // Printed above, before the corpus is loaded
        Commands::Config => {}
    }

    Ok(())
}

/// Explicit --config must exist; otherwise fall back to defaults when no file is found
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    if let Some(path) = &cli.config {
        return AppConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    match AppConfig::load() {
        Ok(config) => Ok(config),
        Err(RuleRagError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            print_warning("No config file found, using built-in defaults");
            Ok(AppConfig::default())
        }
        Err(e) => Err(e).context("Failed to load configuration"),
    }
}
