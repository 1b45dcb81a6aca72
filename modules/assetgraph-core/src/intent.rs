use assetgraph_common::{Intent, QueryCategory};

/// Keywords that signal a semantic (meaning-based) search.
pub const SEMANTIC_KEYWORDS: &[&str] = &[
    "sustainable",
    "esg",
    "renewable",
    "green",
    "luxury",
    "premium",
    "high-end",
    "upscale",
    "environmental",
    "carbon",
    "solar",
    "energy",
    "eco-friendly",
    "similar to",
    "comparable",
];

/// Keywords that signal a geographic constraint. Location names plus
/// the phrasings that introduce one.
pub const GEOGRAPHIC_KEYWORDS: &[&str] = &[
    "california",
    "texas",
    "illinois",
    "missouri",
    "wisconsin",
    "los angeles",
    "houston",
    "austin",
    "chicago",
    "milwaukee",
    "properties in",
    "assets in",
    "located in",
];

pub const ECONOMIC_KEYWORDS: &[&str] = &[
    "unemployment",
    "interest rate",
    "mortgage",
    "federal funds",
    "fed funds",
    "economic",
    "rate",
];

pub const PORTFOLIO_KEYWORDS: &[&str] = &[
    "portfolio",
    "distribution",
    "how many",
    "count",
    "platform",
    "breakdown",
];

pub const TREND_KEYWORDS: &[&str] = &["trend", "change", "over time", "historical", "compare"];

pub fn contains_any(question_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| question_lower.contains(k))
}

/// One classification rule. Rules are evaluated in order and the
/// first match wins; ordering is part of the contract.
struct IntentRule {
    category: QueryCategory,
    confidence: f64,
    reasoning: &'static str,
    matches: fn(&str) -> bool,
}

/// Ordered rule list. Combined detection must precede either single
/// intent, and economic/portfolio checks precede plain geographic so
/// that "unemployment in California" is not read as purely geographic.
const RULES: &[IntentRule] = &[
    IntentRule {
        category: QueryCategory::GeographicSemanticCombined,
        confidence: 0.98,
        reasoning: "Question combines geographic filtering with semantic search criteria",
        matches: |q| contains_any(q, SEMANTIC_KEYWORDS) && contains_any(q, GEOGRAPHIC_KEYWORDS),
    },
    IntentRule {
        category: QueryCategory::SemanticSearch,
        confidence: 0.95,
        reasoning: "Contains semantic keywords requiring vector search",
        matches: |q| contains_any(q, SEMANTIC_KEYWORDS),
    },
    IntentRule {
        category: QueryCategory::EconomicData,
        confidence: 0.90,
        reasoning: "Question asks about economic indicators",
        matches: |q| contains_any(q, ECONOMIC_KEYWORDS),
    },
    IntentRule {
        category: QueryCategory::PortfolioAnalysis,
        confidence: 0.95,
        reasoning: "Question asks about portfolio composition or asset counts",
        matches: |q| contains_any(q, PORTFOLIO_KEYWORDS),
    },
    IntentRule {
        category: QueryCategory::GeographicAssets,
        confidence: 0.90,
        reasoning: "Question refers to specific geographic locations",
        matches: |q| contains_any(q, GEOGRAPHIC_KEYWORDS),
    },
    IntentRule {
        category: QueryCategory::TrendAnalysis,
        confidence: 0.85,
        reasoning: "Question asks about trends or changes over time",
        matches: |q| contains_any(q, TREND_KEYWORDS),
    },
];

/// Classify a question into a query category. Pure, total, and
/// deterministic: the same input always yields the same Intent.
pub fn classify(question: &str) -> Intent {
    let lower = question.to_lowercase();

    for rule in RULES {
        if (rule.matches)(&lower) {
            return Intent {
                category: rule.category,
                confidence: rule.confidence,
                reasoning: rule.reasoning.to_string(),
            };
        }
    }

    Intent {
        category: QueryCategory::Unknown,
        confidence: 0.5,
        reasoning: "Could not classify query into known categories".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_deterministic() {
        let a = classify("assets in Texas");
        let b = classify("assets in Texas");
        assert_eq!(a, b);
    }

    #[test]
    fn combined_beats_semantic_and_geographic() {
        let intent = classify("sustainable properties in Texas");
        assert_eq!(intent.category, QueryCategory::GeographicSemanticCombined);
        assert_eq!(intent.confidence, 0.98);
    }

    #[test]
    fn semantic_alone() {
        let intent = classify("show me luxury developments");
        assert_eq!(intent.category, QueryCategory::SemanticSearch);
    }

    #[test]
    fn economic_beats_geographic() {
        let intent = classify("unemployment rate in California");
        assert_eq!(intent.category, QueryCategory::EconomicData);
    }

    #[test]
    fn portfolio_counts() {
        let intent = classify("how many assets do we have by building type?");
        assert_eq!(intent.category, QueryCategory::PortfolioAnalysis);
    }

    #[test]
    fn geographic_alone() {
        let intent = classify("assets in Texas");
        assert_eq!(intent.category, QueryCategory::GeographicAssets);
        assert_eq!(intent.confidence, 0.90);
    }

    #[test]
    fn trend_when_nothing_else_fires() {
        let intent = classify("what shifted over time in our holdings?");
        assert_eq!(intent.category, QueryCategory::TrendAnalysis);
    }

    #[test]
    fn unknown_fallthrough() {
        let intent = classify("completely unknown query about zebras");
        assert_eq!(intent.category, QueryCategory::Unknown);
        assert_eq!(intent.confidence, 0.5);
    }

    #[test]
    fn empty_question_is_unknown() {
        let intent = classify("");
        assert_eq!(intent.category, QueryCategory::Unknown);
        assert!(!intent.reasoning.is_empty());
    }

    #[test]
    fn case_insensitive_matching() {
        assert_eq!(
            classify("ESG friendly PROPERTIES IN TEXAS").category,
            QueryCategory::GeographicSemanticCombined
        );
    }
}
