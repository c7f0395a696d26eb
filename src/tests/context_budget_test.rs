//! Context assembly against the sample corpus

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::corpus::RuleCorpus;
    use crate::models::CorpusDocument;
    use crate::models::RiskLevel;
    use crate::models::RuleChapter;
    use crate::rag::context::CLOSING_INSTRUCTION;
    use crate::rag::context::CONTEXT_HEADER;
    use crate::rag::RagQuery;
    use crate::rag::RuleRagService;
    use crate::tests::sample_service;

    #[test]
    fn test_context_never_exceeds_budget() {
        let service = sample_service();
        for budget in [0, 10, 100, 140, 200, 400, 800, 2500] {
            let text = service.format_context("What is the price for materials?", budget);
            assert!(
                text.chars().count() <= budget,
                "budget {budget} exceeded: {}",
                text.chars().count()
            );
        }
    }

    #[test]
    fn test_unmatched_query_still_frames_context() {
        let text = sample_service().format_context("completely unmatched query", 2500);
        assert!(!text.is_empty());
        assert!(text.starts_with(CONTEXT_HEADER));
        assert!(text.ends_with(CLOSING_INSTRUCTION));
        assert!(!text.contains("Risk level:"));
    }

    #[test]
    fn test_pricing_line_precedes_chapters() {
        let text = sample_service().format_context("What is the price for materials?", 2500);
        let body = text
            .strip_prefix(&format!("{CONTEXT_HEADER}\n\n"))
            .expect("header first");
        assert!(body.starts_with("Pricing summary: training ("));
        assert!(body.contains("materials (amount: 1500, currency: JPY, note: printed copies, unit: set)"));
        assert!(body.find("Pricing summary").unwrap() < body.find("1. ").unwrap());
    }

    #[test]
    fn test_no_pricing_line_without_intent() {
        let text = sample_service().format_context("confidentiality", 2500);
        assert!(!text.contains("Pricing summary"));
        assert!(text.contains("1. Chapter 2 Confidentiality: "));
        assert!(text.contains("   Risk level: high"));
    }

    #[test]
    fn test_long_chapter_is_excerpted() {
        let document = CorpusDocument {
            title: "Rules".to_string(),
            version: "1".to_string(),
            chapters: vec![RuleChapter {
                id: "long".to_string(),
                title: "Exhaustive Obligations".to_string(),
                content: "obligation ".repeat(1_000),
                tags: vec![],
                risk_level: RiskLevel::Medium,
            }],
            faq: vec![],
            pricing: None,
        };
        let corpus = Arc::new(RuleCorpus::new(document).unwrap());
        let service = RuleRagService::new(corpus, &AppConfig::default());

        let response = service.retrieve(&RagQuery::new("obligations"));
        assert_eq!(response.sources.len(), 1);
        assert!(response.context.chars().count() <= 2500);
        assert!(response.context.contains("...\n   Risk level: medium"));
    }

    #[test]
    fn test_faq_section_follows_chapters() {
        let text = sample_service().format_context("How do I cancel a session?", 2500);
        let chapter_pos = text.find("1. Chapter 5 Cancellation").unwrap();
        let faq_pos = text.find("Q: How do I cancel a session?").unwrap();
        assert!(chapter_pos < faq_pos);
        assert!(faq_pos < text.find(CLOSING_INSTRUCTION).unwrap());
    }
}
