use regex::Regex;

use assetgraph_common::{LocationFilter, ParamValue, PlanStrategy, QueryPlan, ResultKind};

use crate::intent::{
    contains_any, ECONOMIC_KEYWORDS, GEOGRAPHIC_KEYWORDS, PORTFOLIO_KEYWORDS, SEMANTIC_KEYWORDS,
    TREND_KEYWORDS,
};
use crate::normalize::{normalize_state, title_case};

/// Default candidate count for the vector and hybrid paths.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

// --- Cypher templates ---
//
// Every template aliases its projection columns so rows come back with
// clean keys instead of `a.name`-style property paths.

const PORTFOLIO_PLATFORM: &str = "MATCH (a:Asset) \
     RETURN a.platform AS category, count(a) AS count \
     ORDER BY count DESC";

const PORTFOLIO_REGION: &str =
    "MATCH (a:Asset)-[:LOCATED_IN]->(:City)-[:PART_OF]->(:State)-[:PART_OF]->(r:Region) \
     RETURN r.name AS category, count(a) AS count \
     ORDER BY count DESC";

const PORTFOLIO_INVESTMENT_TYPE: &str = "MATCH (a:Asset) \
     RETURN a.investment_type AS category, count(a) AS count \
     ORDER BY count DESC";

const PORTFOLIO_BUILDING_TYPE: &str = "MATCH (a:Asset) \
     RETURN a.building_type AS category, count(a) AS count \
     ORDER BY count DESC";

const PORTFOLIO_STATE: &str = "MATCH (a:Asset)-[:LOCATED_IN]->(:City)-[:PART_OF]->(s:State) \
     RETURN s.name AS category, count(a) AS count \
     ORDER BY count DESC";

const PORTFOLIO_COLUMNS: &[&str] = &["category", "count"];

const ASSET_COLUMNS: &[&str] = &["name", "city", "state", "building_type", "platform"];

const GEO_STATE: &str = "MATCH (a:Asset) \
     WHERE a.state = $state_name \
     RETURN a.name AS name, a.city AS city, a.state AS state, \
            a.building_type AS building_type, a.platform AS platform \
     ORDER BY a.name";

const GEO_STATE_TYPE: &str = "MATCH (a:Asset) \
     WHERE a.state = $state_name AND a.building_type = $building_type \
     RETURN a.name AS name, a.city AS city, a.state AS state, \
            a.building_type AS building_type, a.platform AS platform \
     ORDER BY a.name";

const GEO_CITY: &str = "MATCH (a:Asset) \
     WHERE a.city = $city_name \
     RETURN a.name AS name, a.city AS city, a.state AS state, \
            a.building_type AS building_type, a.platform AS platform \
     ORDER BY a.name";

const GEO_CITY_TYPE: &str = "MATCH (a:Asset) \
     WHERE a.city = $city_name AND a.building_type = $building_type \
     RETURN a.name AS name, a.city AS city, a.state AS state, \
            a.building_type AS building_type, a.platform AS platform \
     ORDER BY a.name";

const GEO_REGION: &str =
    "MATCH (a:Asset)-[:LOCATED_IN]->(:City)-[:PART_OF]->(:State)-[:PART_OF]->(r:Region {name: $region_name}) \
     RETURN a.name AS name, a.city AS city, a.state AS state, \
            a.building_type AS building_type, a.platform AS platform \
     ORDER BY a.name";

const GEO_REGION_TYPE: &str =
    "MATCH (a:Asset)-[:LOCATED_IN]->(:City)-[:PART_OF]->(:State)-[:PART_OF]->(r:Region {name: $region_name}) \
     WHERE a.building_type = $building_type \
     RETURN a.name AS name, a.city AS city, a.state AS state, \
            a.building_type AS building_type, a.platform AS platform \
     ORDER BY a.name";

const ALL_ASSETS: &str = "MATCH (a:Asset) \
     RETURN a.name AS name, a.city AS city, a.state AS state, \
            a.building_type AS building_type, a.platform AS platform \
     ORDER BY a.state, a.city, a.name";

/// Geospatial query: the reference may be an asset or a city; whichever
/// resolves provides the point. Distance unit conversion happens in the
/// WHERE clause (1609.34 m per mile).
const GEO_DISTANCE: &str = "OPTIONAL MATCH (refAsset:Asset) \
     WHERE toLower(refAsset.name) CONTAINS toLower($reference) \
     OPTIONAL MATCH (refCity:City) \
     WHERE toLower(refCity.name) CONTAINS toLower($reference) \
     WITH coalesce(refAsset.location, refCity.location) AS ref_point \
     WHERE ref_point IS NOT NULL \
     MATCH (a:Asset) \
     WHERE a.location IS NOT NULL \
     WITH a, point.distance(a.location, ref_point) AS distance_meters, \
          toInteger($distance) AS distance, $unit AS unit \
     WHERE (unit IN ['km', 'kilometer'] AND distance_meters <= distance * 1000) OR \
           (unit IN ['mile', 'miles'] AND distance_meters <= distance * 1609.34) \
     RETURN a.name AS name, a.city AS city, a.state AS state, \
            a.building_type AS building_type, a.platform AS platform, \
            round(distance_meters / 1000, 1) AS distance_km \
     ORDER BY distance_meters";

const GEO_DISTANCE_COLUMNS: &[&str] = &[
    "name",
    "city",
    "state",
    "building_type",
    "platform",
    "distance_km",
];

const ECONOMIC_LATEST: &str = "MATCH (mt:MetricType {name: $metric_name})-[:TAIL]->(mv:MetricValue) \
     RETURN mt.name AS metric, mv.value AS current_value, mv.date AS current_date";

/// Latest observation for every metric in a category, e.g. all
/// interest rates at once.
const ECONOMIC_CATEGORY_LATEST: &str =
    "MATCH (mt:MetricType {category: $category})-[:TAIL]->(mv:MetricValue) \
     RETURN mt.name AS metric, mv.value AS current_value, mv.date AS current_date \
     ORDER BY mt.name";

const ECONOMIC_LATEST_COLUMNS: &[&str] = &["metric", "current_value", "current_date"];

/// HEAD/TAIL give O(1) access to the earliest and latest observations.
const ECONOMIC_TREND: &str = "MATCH (mt:MetricType {name: $metric_name})-[:HEAD]->(first:MetricValue) \
     MATCH (mt)-[:TAIL]->(last:MetricValue) \
     RETURN mt.name AS metric, \
            first.value AS start_value, first.date AS start_date, \
            last.value AS end_value, last.date AS end_date, \
            last.value - first.value AS change";

const ECONOMIC_TREND_COLUMNS: &[&str] = &[
    "metric",
    "start_value",
    "start_date",
    "end_value",
    "end_date",
    "change",
];

// --- Location vocabularies ---

/// Full state names known to appear in the graph.
const KNOWN_STATES: &[&str] = &["california", "texas", "illinois", "missouri", "wisconsin"];

/// Two-letter abbreviations resolved only as standalone tokens, so
/// "located" never reads as "ca".
const STATE_ABBREVS: &[&str] = &["ca", "tx", "il", "mo", "wi"];

const KNOWN_CITIES: &[&str] = &[
    "los angeles",
    "west hollywood",
    "houston",
    "austin",
    "chicago",
    "milwaukee",
    "appleton",
];

/// Longer region names first: "west" is a substring of "southwest".
const KNOWN_REGIONS: &[&str] = &["southwest", "midwest", "northeast", "southeast", "west"];

/// City -> state, for hybrid filters that name only a city.
const CITY_STATES: &[(&str, &str)] = &[
    ("Los Angeles", "California"),
    ("West Hollywood", "California"),
    ("Houston", "Texas"),
    ("Austin", "Texas"),
    ("Chicago", "Illinois"),
    ("Milwaukee", "Wisconsin"),
    ("Appleton", "Wisconsin"),
];

/// A parsed "within D km|miles of X" clause.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceClause {
    pub distance: i64,
    pub unit: String,
    pub reference: String,
}

/// Parse a distance clause out of a question, if present. Shared by
/// the rule table and the geographic answer formatter.
pub fn parse_distance_clause(question_lower: &str) -> Option<DistanceClause> {
    let re = Regex::new(r"within\s+(\d+)\s*(km|kilometers?|miles?)\s+of\s+([^.?!]+)")
        .expect("valid regex");
    let caps = re.captures(question_lower)?;
    Some(DistanceClause {
        distance: caps[1].parse().ok()?,
        unit: caps[2].to_string(),
        reference: caps[3].trim().to_string(),
    })
}

/// Find a state mentioned in the question: full names by containment,
/// abbreviations by standalone token. Canonicalized via the normalizer.
pub fn find_state(question_lower: &str) -> Option<String> {
    for state in KNOWN_STATES {
        if question_lower.contains(state) {
            return Some(normalize_state(state));
        }
    }
    for token in question_lower.split(|c: char| !c.is_alphanumeric()) {
        if STATE_ABBREVS.contains(&token) {
            return Some(normalize_state(token));
        }
    }
    None
}

pub fn find_city(question_lower: &str) -> Option<String> {
    KNOWN_CITIES
        .iter()
        .find(|city| question_lower.contains(*city))
        .map(|city| title_case(city))
}

pub fn find_region(question_lower: &str) -> Option<String> {
    KNOWN_REGIONS
        .iter()
        .find(|region| question_lower.contains(*region))
        .map(|region| title_case(region))
}

fn state_for_city(city: &str) -> Option<String> {
    CITY_STATES
        .iter()
        .find(|(c, _)| *c == city)
        .map(|(_, s)| (*s).to_string())
}

fn find_building_type(question_lower: &str) -> Option<&'static str> {
    if question_lower.contains("mixed use") || question_lower.contains("mixed-use") {
        Some("Mixed Use")
    } else if question_lower.contains("commercial") {
        Some("Commercial")
    } else if question_lower.contains("residential") {
        Some("Residential")
    } else if question_lower.contains("infrastructure") {
        Some("Infrastructure")
    } else {
        None
    }
}

/// The semantic sub-phrase to embed for hybrid ranking: the matched
/// semantic keywords in question order, or the whole question when
/// none isolate cleanly.
pub fn semantic_phrase(question_lower: &str) -> String {
    let mut matched: Vec<(usize, &str)> = SEMANTIC_KEYWORDS
        .iter()
        .filter_map(|k| question_lower.find(k).map(|pos| (pos, *k)))
        .collect();
    matched.sort_by_key(|(pos, _)| *pos);

    if matched.is_empty() {
        question_lower.to_string()
    } else {
        matched
            .into_iter()
            .map(|(_, k)| k)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Resolve the economic metric a question refers to. State-qualified
/// unemployment binds the state-specific series.
fn resolve_metric(question_lower: &str) -> String {
    if question_lower.contains("unemployment") {
        return match find_state(question_lower) {
            Some(state) => format!("{state} Unemployment Rate"),
            None => "Unemployment Rate".to_string(),
        };
    }
    if question_lower.contains("mortgage") || question_lower.contains("30 year")
        || question_lower.contains("30-year")
    {
        return "30-Year Mortgage Rate".to_string();
    }
    if question_lower.contains("federal funds") || question_lower.contains("fed funds") {
        return "Federal Funds Rate".to_string();
    }
    // Default series when the question names no specific metric.
    "California Unemployment Rate".to_string()
}

fn cypher_plan(
    kind: ResultKind,
    template: &'static str,
    columns: &'static [&'static str],
    params: Vec<(&'static str, ParamValue)>,
) -> QueryPlan {
    QueryPlan {
        kind,
        strategy: PlanStrategy::Cypher {
            template,
            columns,
            params,
        },
    }
}

// --- Rule table ---
//
// Ordered (matcher, plan) entries; evaluation stops at the first rule
// that produces a plan. Ordering is part of the contract: distance
// clauses before plain locations, combined semantic+geographic before
// either alone, economic before geographic (so "unemployment in
// California" stays economic), cities before regions (so "West
// Hollywood" never reads as the West region), and regions before the
// generic asset listing.

type RuleFn = fn(&str) -> Option<QueryPlan>;

struct PatternRule {
    name: &'static str,
    build: RuleFn,
}

const RULES: &[PatternRule] = &[
    PatternRule {
        name: "geo_distance",
        build: rule_distance,
    },
    PatternRule {
        name: "hybrid_geo_semantic",
        build: rule_hybrid,
    },
    PatternRule {
        name: "semantic_vector",
        build: rule_semantic,
    },
    PatternRule {
        name: "economic_trend",
        build: rule_economic_trend,
    },
    PatternRule {
        name: "economic_category",
        build: rule_economic_category,
    },
    PatternRule {
        name: "economic_latest",
        build: rule_economic_latest,
    },
    PatternRule {
        name: "portfolio",
        build: rule_portfolio,
    },
    PatternRule {
        name: "geo_city",
        build: rule_city,
    },
    PatternRule {
        name: "geo_region",
        build: rule_region,
    },
    PatternRule {
        name: "geo_state",
        build: rule_state,
    },
    PatternRule {
        name: "all_assets",
        build: rule_all_assets,
    },
];

/// Match a question against the rule table. First match wins; `None`
/// sends the caller to the fallback escalator.
pub fn match_question(question: &str) -> Option<QueryPlan> {
    let lower = question.to_lowercase();
    for rule in RULES {
        if let Some(plan) = (rule.build)(&lower) {
            tracing::debug!(rule = rule.name, "Pattern rule matched");
            return Some(plan);
        }
    }
    None
}

fn rule_distance(q: &str) -> Option<QueryPlan> {
    let clause = parse_distance_clause(q)?;
    Some(cypher_plan(
        ResultKind::Geographic,
        GEO_DISTANCE,
        GEO_DISTANCE_COLUMNS,
        vec![
            ("reference", ParamValue::Str(clause.reference)),
            ("distance", ParamValue::Int(clause.distance)),
            ("unit", ParamValue::Str(clause.unit)),
        ],
    ))
}

fn rule_hybrid(q: &str) -> Option<QueryPlan> {
    if !(contains_any(q, SEMANTIC_KEYWORDS) && contains_any(q, GEOGRAPHIC_KEYWORDS)) {
        return None;
    }

    let city = find_city(q);
    let state = find_state(q).or_else(|| city.as_deref().and_then(state_for_city));
    let region = find_region(q);
    let location = LocationFilter {
        state,
        city,
        region,
    };

    // A geographic phrasing with no resolvable place degrades to a
    // plain semantic search.
    if location.is_empty() {
        return rule_semantic(q);
    }

    Some(QueryPlan {
        kind: ResultKind::GeographicSemantic,
        strategy: PlanStrategy::Hybrid {
            location,
            phrase: semantic_phrase(q),
            limit: DEFAULT_SEARCH_LIMIT,
        },
    })
}

fn rule_semantic(q: &str) -> Option<QueryPlan> {
    if !contains_any(q, SEMANTIC_KEYWORDS) {
        return None;
    }
    Some(QueryPlan {
        kind: ResultKind::Semantic,
        strategy: PlanStrategy::VectorSearch {
            phrase: q.to_string(),
            limit: DEFAULT_SEARCH_LIMIT,
        },
    })
}

// The rule triggers share the classifier's vocabularies so the two
// stages cannot drift apart: a question classified economic or
// portfolio always reaches the matching rule.
fn is_economic(q: &str) -> bool {
    contains_any(q, ECONOMIC_KEYWORDS)
}

fn rule_economic_trend(q: &str) -> Option<QueryPlan> {
    if !is_economic(q) || !contains_any(q, TREND_KEYWORDS) {
        return None;
    }
    Some(cypher_plan(
        ResultKind::EconomicTrend,
        ECONOMIC_TREND,
        ECONOMIC_TREND_COLUMNS,
        vec![("metric_name", ParamValue::Str(resolve_metric(q)))],
    ))
}

fn rule_economic_category(q: &str) -> Option<QueryPlan> {
    // "current interest rates" and similar: every series in the
    // category, not one named metric.
    if !q.contains("interest rate") {
        return None;
    }
    Some(cypher_plan(
        ResultKind::EconomicLatest,
        ECONOMIC_CATEGORY_LATEST,
        ECONOMIC_LATEST_COLUMNS,
        vec![("category", ParamValue::Str("Interest Rate".to_string()))],
    ))
}

fn rule_economic_latest(q: &str) -> Option<QueryPlan> {
    if !is_economic(q) {
        return None;
    }
    Some(cypher_plan(
        ResultKind::EconomicLatest,
        ECONOMIC_LATEST,
        ECONOMIC_LATEST_COLUMNS,
        vec![("metric_name", ParamValue::Str(resolve_metric(q)))],
    ))
}

fn rule_portfolio(q: &str) -> Option<QueryPlan> {
    if !contains_any(q, PORTFOLIO_KEYWORDS) {
        return None;
    }

    let template = if q.contains("platform") {
        PORTFOLIO_PLATFORM
    } else if q.contains("region") {
        PORTFOLIO_REGION
    } else if q.contains("investment") && q.contains("type") {
        PORTFOLIO_INVESTMENT_TYPE
    } else if q.contains("building") && q.contains("type") {
        PORTFOLIO_BUILDING_TYPE
    } else if q.contains("state") {
        PORTFOLIO_STATE
    } else {
        PORTFOLIO_PLATFORM
    };

    Some(cypher_plan(
        ResultKind::Portfolio,
        template,
        PORTFOLIO_COLUMNS,
        vec![],
    ))
}

fn rule_city(q: &str) -> Option<QueryPlan> {
    let city = find_city(q)?;
    match find_building_type(q) {
        Some(bt) => Some(cypher_plan(
            ResultKind::Geographic,
            GEO_CITY_TYPE,
            ASSET_COLUMNS,
            vec![
                ("city_name", ParamValue::Str(city)),
                ("building_type", ParamValue::Str(bt.to_string())),
            ],
        )),
        None => Some(cypher_plan(
            ResultKind::Geographic,
            GEO_CITY,
            ASSET_COLUMNS,
            vec![("city_name", ParamValue::Str(city))],
        )),
    }
}

fn rule_region(q: &str) -> Option<QueryPlan> {
    let region = find_region(q)?;
    match find_building_type(q) {
        Some(bt) => Some(cypher_plan(
            ResultKind::Geographic,
            GEO_REGION_TYPE,
            ASSET_COLUMNS,
            vec![
                ("region_name", ParamValue::Str(region)),
                ("building_type", ParamValue::Str(bt.to_string())),
            ],
        )),
        None => Some(cypher_plan(
            ResultKind::Geographic,
            GEO_REGION,
            ASSET_COLUMNS,
            vec![("region_name", ParamValue::Str(region))],
        )),
    }
}

fn rule_state(q: &str) -> Option<QueryPlan> {
    let state = find_state(q)?;
    match find_building_type(q) {
        Some(bt) => Some(cypher_plan(
            ResultKind::Geographic,
            GEO_STATE_TYPE,
            ASSET_COLUMNS,
            vec![
                ("state_name", ParamValue::Str(state)),
                ("building_type", ParamValue::Str(bt.to_string())),
            ],
        )),
        None => Some(cypher_plan(
            ResultKind::Geographic,
            GEO_STATE,
            ASSET_COLUMNS,
            vec![("state_name", ParamValue::Str(state))],
        )),
    }
}

fn rule_all_assets(q: &str) -> Option<QueryPlan> {
    if !(q.contains("assets") || q.contains("properties") || q.contains("holdings")) {
        return None;
    }
    Some(cypher_plan(
        ResultKind::AssetList,
        ALL_ASSETS,
        ASSET_COLUMNS,
        vec![],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cypher_params(plan: &QueryPlan) -> &[(&'static str, ParamValue)] {
        match &plan.strategy {
            PlanStrategy::Cypher { params, .. } => params,
            other => panic!("expected cypher strategy, got {other:?}"),
        }
    }

    #[test]
    fn matching_is_deterministic() {
        let a = match_question("assets in Texas");
        let b = match_question("assets in Texas");
        assert_eq!(a, b);
    }

    #[test]
    fn state_filter_binds_canonical_state() {
        let plan = match_question("assets in Texas").expect("plan");
        assert_eq!(plan.kind, ResultKind::Geographic);
        assert_eq!(
            cypher_params(&plan),
            &[("state_name", ParamValue::Str("Texas".to_string()))]
        );
    }

    #[test]
    fn state_abbreviation_is_normalized_before_binding() {
        let plan = match_question("properties in TX").expect("plan");
        assert_eq!(
            cypher_params(&plan),
            &[("state_name", ParamValue::Str("Texas".to_string()))]
        );
    }

    #[test]
    fn unemployment_with_state_binds_state_series() {
        let plan = match_question("unemployment rate in California").expect("plan");
        assert_eq!(plan.kind, ResultKind::EconomicLatest);
        assert_eq!(
            cypher_params(&plan),
            &[(
                "metric_name",
                ParamValue::Str("California Unemployment Rate".to_string())
            )]
        );
    }

    #[test]
    fn interest_rates_use_category_lookup() {
        let plan = match_question("current interest rates").expect("plan");
        assert_eq!(plan.kind, ResultKind::EconomicLatest);
        assert_eq!(
            cypher_params(&plan),
            &[("category", ParamValue::Str("Interest Rate".to_string()))]
        );
    }

    #[test]
    fn economic_trend_beats_latest() {
        let plan = match_question("mortgage rate trend").expect("plan");
        assert_eq!(plan.kind, ResultKind::EconomicTrend);
        assert_eq!(
            cypher_params(&plan),
            &[(
                "metric_name",
                ParamValue::Str("30-Year Mortgage Rate".to_string())
            )]
        );
    }

    #[test]
    fn distance_clause_beats_plain_location() {
        let plan = match_question("assets within 50 km of Los Angeles").expect("plan");
        assert_eq!(plan.kind, ResultKind::Geographic);
        let params = cypher_params(&plan);
        assert!(params.contains(&("distance", ParamValue::Int(50))));
        assert!(params.contains(&("unit", ParamValue::Str("km".to_string()))));
        assert!(params.contains(&("reference", ParamValue::Str("los angeles".to_string()))));
    }

    #[test]
    fn hybrid_rule_combines_location_and_phrase() {
        let plan = match_question("Properties in Texas that are ESG friendly").expect("plan");
        assert_eq!(plan.kind, ResultKind::GeographicSemantic);
        match plan.strategy {
            PlanStrategy::Hybrid {
                location, phrase, ..
            } => {
                assert_eq!(location.state.as_deref(), Some("Texas"));
                assert_eq!(phrase, "esg");
            }
            other => panic!("expected hybrid strategy, got {other:?}"),
        }
    }

    #[test]
    fn city_only_hybrid_infers_state() {
        let plan = match_question("sustainable assets in Los Angeles").expect("plan");
        match plan.strategy {
            PlanStrategy::Hybrid { location, .. } => {
                assert_eq!(location.city.as_deref(), Some("Los Angeles"));
                assert_eq!(location.state.as_deref(), Some("California"));
            }
            other => panic!("expected hybrid strategy, got {other:?}"),
        }
    }

    #[test]
    fn semantic_without_location_uses_vector_search() {
        let plan = match_question("luxury premium developments").expect("plan");
        assert_eq!(plan.kind, ResultKind::Semantic);
        assert!(matches!(plan.strategy, PlanStrategy::VectorSearch { .. }));
    }

    #[test]
    fn west_hollywood_is_a_city_not_the_west_region() {
        let plan = match_question("assets in West Hollywood").expect("plan");
        assert_eq!(
            cypher_params(&plan),
            &[("city_name", ParamValue::Str("West Hollywood".to_string()))]
        );
    }

    #[test]
    fn the_west_region_matches_before_generic_listing() {
        let plan = match_question("assets in the west").expect("plan");
        assert_eq!(
            cypher_params(&plan),
            &[("region_name", ParamValue::Str("West".to_string()))]
        );
    }

    #[test]
    fn building_type_refines_state_filter() {
        let plan = match_question("commercial assets in California").expect("plan");
        assert_eq!(
            cypher_params(&plan),
            &[
                ("state_name", ParamValue::Str("California".to_string())),
                ("building_type", ParamValue::Str("Commercial".to_string())),
            ]
        );
    }

    #[test]
    fn portfolio_distribution_by_building_type() {
        let plan = match_question("portfolio breakdown by building type").expect("plan");
        assert_eq!(plan.kind, ResultKind::Portfolio);
        assert!(cypher_params(&plan).is_empty());
    }

    #[test]
    fn platform_keyword_triggers_portfolio_not_asset_listing() {
        let plan = match_question("assets by platform").expect("plan");
        assert_eq!(plan.kind, ResultKind::Portfolio);
        assert!(cypher_params(&plan).is_empty());
    }

    #[test]
    fn bare_asset_listing_is_the_last_resort_rule() {
        let plan = match_question("show me all assets").expect("plan");
        assert_eq!(plan.kind, ResultKind::AssetList);
    }

    #[test]
    fn no_rule_matches_unknown_question() {
        assert_eq!(match_question("completely unknown query about zebras"), None);
        assert_eq!(match_question(""), None);
    }

    #[test]
    fn distance_clause_parser_accepts_miles() {
        let clause = parse_distance_clause("anything within 10 miles of downtown chicago").unwrap();
        assert_eq!(clause.distance, 10);
        assert_eq!(clause.unit, "miles");
        assert_eq!(clause.reference, "downtown chicago");
    }

    #[test]
    fn semantic_phrase_extracts_matched_keywords_in_order() {
        assert_eq!(
            semantic_phrase("green and sustainable properties in texas"),
            "green sustainable"
        );
        assert_eq!(semantic_phrase("nothing matches here at all"), "nothing matches here at all");
    }
}
