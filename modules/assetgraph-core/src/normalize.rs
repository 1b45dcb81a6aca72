use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value;

use assetgraph_common::ResultRow;

/// Alias table mapping lowercase state spellings (full names,
/// abbreviations, known typos) to the canonical labels in the graph.
const STATE_ALIASES: &[(&str, &str)] = &[
    ("california", "California"),
    ("ca", "California"),
    ("cali", "California"),
    ("califonia", "California"),
    ("texas", "Texas"),
    ("tx", "Texas"),
    ("texs", "Texas"),
    ("illinois", "Illinois"),
    ("il", "Illinois"),
    ("illinios", "Illinois"),
    ("missouri", "Missouri"),
    ("mo", "Missouri"),
    ("wisconsin", "Wisconsin"),
    ("wi", "Wisconsin"),
    ("wisconson", "Wisconsin"),
];

/// Canonicalize a free-text state token to the label used in the graph.
///
/// Lookup order: exact case-insensitive alias match, then a cheap edit
/// heuristic against the alias table, then title-cased passthrough.
/// Total: never fails, but passthrough carries no guarantee the state
/// exists in the graph.
pub fn normalize_state(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() {
        return String::new();
    }

    for (alias, canonical) in STATE_ALIASES {
        if *alias == lower {
            return (*canonical).to_string();
        }
    }

    for (alias, canonical) in STATE_ALIASES {
        if close_match(&lower, alias) {
            return (*canonical).to_string();
        }
    }

    title_case(&lower)
}

/// Edit heuristic: accept when the lengths differ by at most 2 and the
/// total of positional character mismatches plus the length difference
/// is at most 2. Tighter than bounding mismatches and length
/// difference independently: a candidate cannot spend the full budget
/// on both. Cheap stand-in for edit distance; good enough for dropped
/// or doubled letters in state names.
fn close_match(input: &str, candidate: &str) -> bool {
    let a: Vec<char> = input.chars().collect();
    let b: Vec<char> = candidate.chars().collect();
    let len_diff = a.len().abs_diff(b.len());
    if len_diff > 2 {
        return false;
    }
    let mismatches: usize = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count();
    mismatches + len_diff <= 2
}

/// Title-case each whitespace-separated word: "los angeles" -> "Los Angeles".
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert one projected row into JSON-safe scalars.
///
/// Bolt temporal values come back as chrono types and are rewritten as
/// ISO-8601 strings; anything that fails every typed read becomes null
/// rather than an error.
pub fn row_to_json(row: &neo4rs::Row, columns: &[&str]) -> ResultRow {
    let mut out = ResultRow::new();
    for &col in columns {
        out.insert(col.to_string(), cell_to_json(row, col));
    }
    out
}

fn cell_to_json(row: &neo4rs::Row, column: &str) -> Value {
    // Integers before floats so whole numbers stay integral.
    if let Ok(v) = row.get::<String>(column) {
        return Value::String(v);
    }
    if let Ok(v) = row.get::<i64>(column) {
        return Value::from(v);
    }
    if let Ok(v) = row.get::<f64>(column) {
        return Value::from(v);
    }
    if let Ok(v) = row.get::<bool>(column) {
        return Value::Bool(v);
    }
    if let Ok(v) = row.get::<NaiveDate>(column) {
        return Value::String(v.format("%Y-%m-%d").to_string());
    }
    if let Ok(v) = row.get::<DateTime<FixedOffset>>(column) {
        return Value::String(v.to_rfc3339());
    }
    if let Ok(v) = row.get::<NaiveDateTime>(column) {
        return Value::String(v.format("%Y-%m-%dT%H:%M:%S").to_string());
    }
    if let Ok(v) = row.get::<Vec<f64>>(column) {
        return Value::from(v);
    }
    Value::Null
}

/// Recursively normalize an already-decoded value tree. Maps and
/// sequences recurse; scalars pass through. Idempotent:
/// normalize(normalize(x)) == normalize(x).
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_value(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        other => other,
    }
}

/// Normalize every row in a result set.
pub fn normalize_rows(rows: Vec<ResultRow>) -> Vec<ResultRow> {
    rows.into_iter()
        .map(|row| match normalize_value(Value::Object(row)) {
            Value::Object(map) => map,
            _ => unreachable!("normalize_value preserves object shape"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exact_alias_lookup_is_case_insensitive() {
        assert_eq!(normalize_state("ca"), "California");
        assert_eq!(normalize_state("CA"), "California");
        assert_eq!(normalize_state("california"), "California");
        assert_eq!(normalize_state("California"), "California");
        assert_eq!(normalize_state("TX"), "Texas");
    }

    #[test]
    fn known_typos_resolve() {
        assert_eq!(normalize_state("califonia"), "California");
        assert_eq!(normalize_state("wisconson"), "Wisconsin");
    }

    #[test]
    fn fuzzy_match_catches_small_edits() {
        // One trailing char dropped from "california"
        assert_eq!(normalize_state("californi"), "California");
        // One char wrong in "texas"
        assert_eq!(normalize_state("texes"), "Texas");
    }

    #[test]
    fn unknown_state_passes_through_title_cased() {
        assert_eq!(normalize_state("Oregon"), "Oregon");
        assert_eq!(normalize_state("oregon"), "Oregon");
        assert_eq!(normalize_state("new york"), "New York");
    }

    #[test]
    fn empty_input_yields_empty() {
        assert_eq!(normalize_state(""), "");
        assert_eq!(normalize_state("   "), "");
    }

    #[test]
    fn title_case_handles_multiword() {
        assert_eq!(title_case("los angeles"), "Los Angeles");
        assert_eq!(title_case("WEST HOLLYWOOD"), "West Hollywood");
    }

    #[test]
    fn normalize_value_is_idempotent() {
        let v = json!({
            "name": "Penn Station",
            "count": 3,
            "nested": {"date": "2024-01-31", "scores": [0.1, 0.2]},
        });
        let once = normalize_value(v.clone());
        let twice = normalize_value(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_rows_preserves_shape_and_order() {
        let mut row = ResultRow::new();
        row.insert("a".to_string(), json!(1));
        row.insert("b".to_string(), json!([{"c": 2}]));
        let rows = normalize_rows(vec![row.clone()]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], row);
    }
}
