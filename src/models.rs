use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Risk classification attached to every chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{other}' (expected low, medium or high)")),
        }
    }
}

/// A titled unit of the contract-rules corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleChapter {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub risk_level: RiskLevel,
}

/// Frequently asked question, independent of chapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Structured rate description for one pricing category.
///
/// Field order is sorted so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingRate(pub BTreeMap<String, serde_json::Value>);

impl PricingRate {
    /// Render as `key: value` pairs on one line
    #[must_use]
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(s) => format!("{key}: {s}"),
                other => format!("{key}: {other}"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fixed-category pricing table; every category is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<PricingRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meetings: Option<PricingRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<PricingRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting: Option<PricingRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others: Option<PricingRate>,
}

impl PricingTable {
    /// Present categories in their fixed order
    pub fn categories(&self) -> impl Iterator<Item = (&'static str, &PricingRate)> {
        [
            ("training", self.training.as_ref()),
            ("meetings", self.meetings.as_ref()),
            ("materials", self.materials.as_ref()),
            ("reporting", self.reporting.as_ref()),
            ("others", self.others.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, rate)| rate.map(|r| (name, r)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories().next().is_none()
    }
}

/// On-disk corpus document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub title: String,
    pub version: String,
    pub chapters: Vec<RuleChapter>,
    pub faq: Vec<FaqEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingTable>,
}

/// Chapter counts per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskLevelCounts {
    #[must_use]
    pub const fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}

/// Aggregate statistics over the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSummary {
    pub title: String,
    pub version: String,
    pub total_chapters: usize,
    #[serde(rename = "totalFAQ")]
    pub total_faq: usize,
    pub risk_levels: RiskLevelCounts,
}
