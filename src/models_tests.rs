//! Unit tests for data models
//!
//! Tests parsing, serialization, and model behavior.

#[cfg(test)]
mod tests {
    use crate::models::*;

    // ====== Risk Level Tests ======

    #[test]
    fn test_risk_level_parse() {
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!(" Medium ".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("critical".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_risk_level_display() {
        for level in RiskLevel::ALL {
            assert_eq!(level.to_string(), level.as_str());
        }
        assert_eq!(RiskLevel::Medium.to_string(), "medium");
    }

    #[test]
    fn test_risk_level_serde() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        let level: RiskLevel = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(level, RiskLevel::Low);
        assert!(serde_json::from_str::<RiskLevel>("\"Low\"").is_err());
    }

    // ====== Chapter Tests ======

    #[test]
    fn test_chapter_uses_camel_case_keys() {
        let json = r#"{
            "id": "ch7", "title": "Chapter 7 Termination", "content": "Either party may terminate.",
            "tags": ["termination"], "riskLevel": "high"
        }"#;
        let chapter: RuleChapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.risk_level, RiskLevel::High);

        let value = serde_json::to_value(&chapter).unwrap();
        assert_eq!(value["riskLevel"], "high");
        assert!(value.get("risk_level").is_none());
    }

    // ====== Pricing Tests ======

    #[test]
    fn test_pricing_rate_render_sorted() {
        let rate: PricingRate =
            serde_json::from_str(r#"{"unit": "hour", "amount": 8000, "taxIncluded": false}"#)
                .unwrap();
        assert_eq!(rate.render(), "amount: 8000, taxIncluded: false, unit: hour");
        assert!(!rate.is_empty());
        assert!(PricingRate::default().is_empty());
    }

    #[test]
    fn test_pricing_table_categories_in_fixed_order() {
        let table: PricingTable = serde_json::from_str(
            r#"{
                "others": {"note": "travel at cost"},
                "reporting": {"amount": 2000},
                "training": {"amount": 5000}
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = table.categories().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["training", "reporting", "others"]);
        assert!(!table.is_empty());
        assert!(PricingTable::default().is_empty());
    }

    #[test]
    fn test_pricing_table_skips_absent_categories_when_serialized() {
        let table = PricingTable {
            meetings: Some(PricingRate::default()),
            ..PricingTable::default()
        };
        let value = serde_json::to_value(&table).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("meetings"));
    }

    // ====== Document and Summary Tests ======

    #[test]
    fn test_document_pricing_optional() {
        let json = r#"{ "title": "Rules", "version": "2", "chapters": [], "faq": [] }"#;
        let document: CorpusDocument = serde_json::from_str(json).unwrap();
        assert!(document.pricing.is_none());
    }

    #[test]
    fn test_summary_json_keys() {
        let summary = CorpusSummary {
            title: "Rules".to_string(),
            version: "1.0".to_string(),
            total_chapters: 3,
            total_faq: 2,
            risk_levels: RiskLevelCounts {
                low: 1,
                medium: 1,
                high: 1,
            },
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["totalChapters"], 3);
        assert_eq!(value["totalFAQ"], 2);
        assert_eq!(value["riskLevels"]["high"], 1);
        assert_eq!(summary.risk_levels.get(RiskLevel::Low), 1);
    }
}
