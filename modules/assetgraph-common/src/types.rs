use serde::Serialize;
use serde_json::Value;

/// One row returned by a graph query: column name -> JSON-safe scalar.
/// Rows are heterogeneous; their shape depends on the template that
/// produced them and they carry no identity beyond position.
pub type ResultRow = serde_json::Map<String, Value>;

/// Question categories produced by the intent classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    EconomicData,
    GeographicAssets,
    GeographicSemanticCombined,
    PortfolioAnalysis,
    SemanticSearch,
    TrendAnalysis,
    Unknown,
}

/// Result of intent classification. Produced exactly once per
/// question, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intent {
    pub category: QueryCategory,
    pub confidence: f64,
    pub reasoning: String,
}

/// Shape tag carried from plan selection into answer formatting.
/// The formatter dispatches on this instead of sniffing row keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Portfolio,
    Geographic,
    AssetList,
    EconomicLatest,
    EconomicTrend,
    Semantic,
    GeographicSemantic,
}

impl ResultKind {
    /// Wire tag reported as `query_type` in the response.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Portfolio => "portfolio_template_generated",
            ResultKind::Geographic => "geographic_template_generated",
            ResultKind::AssetList => "asset_listing",
            ResultKind::EconomicLatest => "economic_latest",
            ResultKind::EconomicTrend => "economic_trend",
            ResultKind::Semantic => "semantic_vector_search",
            ResultKind::GeographicSemantic => "geographic_semantic_combined_vector",
        }
    }
}

/// A value bound into a Cypher template parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    FloatList(Vec<f64>),
}

impl ParamValue {
    pub fn as_json(&self) -> Value {
        match self {
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::Int(i) => Value::from(*i),
            ParamValue::Float(f) => Value::from(*f),
            ParamValue::FloatList(v) => Value::from(v.clone()),
        }
    }
}

/// Location predicate for the hybrid filter phase. Values are already
/// canonicalized (graph labels, not raw question text).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationFilter {
    pub state: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

impl LocationFilter {
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.city.is_none() && self.region.is_none()
    }

    /// Human-readable name for answer phrasing, most specific first.
    pub fn display_name(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.state.as_deref())
            .or(self.region.as_deref())
    }
}

/// How the plan's rows are obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStrategy {
    /// A literal parameterized Cypher template with its projection
    /// column names.
    Cypher {
        template: &'static str,
        columns: &'static [&'static str],
        params: Vec<(&'static str, ParamValue)>,
    },
    /// Marker: resolve via the vector search executor.
    VectorSearch { phrase: String, limit: usize },
    /// Marker: resolve via the hybrid filter-then-rank path.
    Hybrid {
        location: LocationFilter,
        phrase: String,
        limit: usize,
    },
}

/// An executable query plan. Built by exactly one rule-table entry,
/// immutable once built, consumed once by the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub kind: ResultKind,
    pub strategy: PlanStrategy,
}

impl QueryPlan {
    /// String shown in the response `cypher` field.
    pub fn describe(&self) -> String {
        match &self.strategy {
            PlanStrategy::Cypher { template, .. } => template.to_string(),
            PlanStrategy::VectorSearch { .. } => "Vector similarity search".to_string(),
            PlanStrategy::Hybrid { .. } => {
                "Vector similarity search with geographic filtering".to_string()
            }
        }
    }
}

/// The externally observable artifact: one per request.
///
/// Invariant: `pattern_matched == true` implies a non-null `cypher`
/// describing the executed plan; `pattern_matched == false` implies a
/// fallback answer with empty `data`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub cypher: Option<String>,
    pub data: Vec<ResultRow>,
    pub question: String,
    pub pattern_matched: bool,
    pub query_type: String,
    pub intent_classification: Intent,
}
