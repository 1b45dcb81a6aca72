use serde_json::Value;

use assetgraph_common::{LocationFilter, ResultKind, ResultRow};

use crate::patterns::{find_city, find_region, find_state, parse_distance_clause};

/// Render normalized rows into a natural-language answer. Dispatch is
/// on the `ResultKind` tag the plan carried, never on row shape.
/// Empty rows always yield a kind-appropriate "not found" message.
pub fn format_answer(kind: ResultKind, rows: &[ResultRow], question: &str) -> String {
    match kind {
        ResultKind::Portfolio => portfolio_table(rows),
        ResultKind::Geographic => geographic_answer(rows, question),
        ResultKind::AssetList => asset_table(rows),
        ResultKind::EconomicLatest | ResultKind::EconomicTrend => economic_table(rows),
        ResultKind::Semantic => similarity_list(rows, "semantically similar assets"),
        ResultKind::GeographicSemantic => similarity_list(rows, "assets matching your criteria"),
    }
}

/// Phrasing for the hybrid empty cases: the filter finding nothing is
/// a different answer than the rank phase finding nothing.
pub fn hybrid_no_location_answer(location: &LocationFilter) -> String {
    match location.display_name() {
        Some(name) => format!("No assets in {name} matched the location filter."),
        None => "No assets matched the location filter.".to_string(),
    }
}

pub fn hybrid_no_semantic_answer(location: &LocationFilter, phrase: &str) -> String {
    match location.display_name() {
        Some(name) => format!("No assets in {name} match the semantic criteria '{phrase}'."),
        None => format!("No assets match the semantic criteria '{phrase}'."),
    }
}

pub fn vector_unavailable_answer() -> String {
    "Vector search is unavailable: no embedding provider is configured.".to_string()
}

// --- Portfolio ---

fn portfolio_table(rows: &[ResultRow]) -> String {
    let pairs: Vec<(String, String)> = rows
        .iter()
        .filter_map(|row| {
            if let (Some(category), Some(count)) = (row.get("category"), row.get("count")) {
                Some((cell_text(category), cell_text(count)))
            } else {
                // Generic two-column shape: first two values.
                let mut values = row.values();
                let first = values.next()?;
                let second = values.next()?;
                Some((cell_text(first), cell_text(second)))
            }
        })
        .collect();

    if pairs.is_empty() {
        return "No portfolio data found.".to_string();
    }

    let mut lines = vec![
        "Portfolio Distribution:".to_string(),
        "=".repeat(40),
        format!("{:<20} {:<10}", "Category", "Count"),
        "-".repeat(40),
    ];
    for (category, count) in pairs {
        lines.push(format!("{:<20} {:<10}", truncate(&category, 20), count));
    }
    lines.join("\n")
}

// --- Asset listing ---

fn asset_table(rows: &[ResultRow]) -> String {
    if rows.is_empty() {
        return "No assets found.".to_string();
    }

    let has_distance = rows
        .iter()
        .any(|row| matches!(row.get("distance_km"), Some(v) if !v.is_null()));

    let mut lines = vec!["Asset Details:".to_string(), "=".repeat(120)];
    if has_distance {
        lines.push(format!(
            "{:<30} {:<25} {:<20} {:<15} {:<10}",
            "Asset Name", "Location", "Type", "Platform", "Distance"
        ));
    } else {
        lines.push(format!(
            "{:<30} {:<25} {:<20} {:<15}",
            "Asset Name", "Location", "Type", "Platform"
        ));
    }
    lines.push("-".repeat(120));

    for row in rows {
        let name = string_cell(row, "name").unwrap_or_else(|| "Unknown Asset".to_string());
        let location = location_text(row);
        let building_type = string_cell(row, "building_type")
            .or_else(|| string_cell(row, "type"))
            .unwrap_or_else(|| "Unknown".to_string());
        let platform = string_cell(row, "platform").unwrap_or_else(|| "Unknown".to_string());

        if has_distance {
            let distance = match row.get("distance_km") {
                Some(v) if !v.is_null() => format!("{} km", cell_text(v)),
                _ => "N/A".to_string(),
            };
            lines.push(format!(
                "{:<30} {:<25} {:<20} {:<15} {:<10}",
                truncate(&name, 30),
                truncate(&location, 25),
                truncate(&building_type, 20),
                truncate(&platform, 15),
                distance
            ));
        } else {
            lines.push(format!(
                "{:<30} {:<25} {:<20} {:<15}",
                truncate(&name, 30),
                truncate(&location, 25),
                truncate(&building_type, 20),
                truncate(&platform, 15)
            ));
        }
    }
    lines.join("\n")
}

/// "City, State" from whichever location columns the row carries.
fn location_text(row: &ResultRow) -> String {
    if let Some(location) = string_cell(row, "location") {
        return location;
    }
    let city = string_cell(row, "city").unwrap_or_default();
    let state = string_cell(row, "state").unwrap_or_default();
    match (city.is_empty(), state.is_empty()) {
        (false, false) => format!("{city}, {state}"),
        (false, true) => city,
        (true, false) => state,
        (true, true) => "Unknown".to_string(),
    }
}

// --- Geographic ---

fn geographic_answer(rows: &[ResultRow], question: &str) -> String {
    if rows.is_empty() {
        return "No matching assets found for this geographic query.".to_string();
    }

    let lower = question.to_lowercase();
    let count = rows.len();
    let plural = if count == 1 { "asset" } else { "assets" };

    if let Some(clause) = parse_distance_clause(&lower) {
        return format!(
            "Found {count} {plural} within {} {} of {}.",
            clause.distance, clause.unit, clause.reference
        );
    }

    let location = find_city(&lower)
        .or_else(|| find_state(&lower))
        .or_else(|| find_region(&lower))
        .unwrap_or_else(|| "the specified location".to_string());

    format!("Found {count} {plural} in {location}.")
}

// --- Economic ---

fn economic_table(rows: &[ResultRow]) -> String {
    let mut table_rows: Vec<(String, String, String)> = Vec::new();

    for row in rows {
        let Some(metric) = string_cell(row, "metric") else {
            continue;
        };
        if row.contains_key("current_value") {
            table_rows.push((
                metric,
                cell_text(row.get("current_value").unwrap_or(&Value::Null)),
                cell_text(row.get("current_date").unwrap_or(&Value::Null)),
            ));
        } else if row.contains_key("change") {
            table_rows.push((
                metric,
                trend_text(row),
                format!(
                    "{} to {}",
                    cell_text(row.get("start_date").unwrap_or(&Value::Null)),
                    cell_text(row.get("end_date").unwrap_or(&Value::Null))
                ),
            ));
        }
    }

    if table_rows.is_empty() {
        return "No economic data found.".to_string();
    }

    let mut lines = vec![
        "Economic Data:".to_string(),
        "=".repeat(80),
        format!("{:<25} {:<35} {:<25}", "Metric", "Value", "Date"),
        "-".repeat(80),
    ];
    for (metric, value, date) in table_rows {
        lines.push(format!(
            "{:<25} {:<35} {:<25}",
            truncate(&metric, 24),
            truncate(&value, 34),
            truncate(&date, 24)
        ));
    }
    lines.join("\n")
}

/// "start -> end" with direction, absolute and percentage change.
fn trend_text(row: &ResultRow) -> String {
    let start = float_cell(row, "start_value");
    let end = float_cell(row, "end_value");
    let change = float_cell(row, "change").or_else(|| match (start, end) {
        (Some(s), Some(e)) => Some(e - s),
        _ => None,
    });

    match (start, end, change) {
        (Some(start), Some(end), Some(change)) => {
            let direction = if change >= 0.0 { "increase" } else { "decrease" };
            let pct = if start != 0.0 {
                format!(", {:.1}%", (change / start).abs() * 100.0)
            } else {
                String::new()
            };
            format!(
                "{start} -> {end} ({direction} of {:.2}{pct})",
                change.abs()
            )
        }
        _ => format!(
            "{} -> {}",
            cell_text(row.get("start_value").unwrap_or(&Value::Null)),
            cell_text(row.get("end_value").unwrap_or(&Value::Null))
        ),
    }
}

// --- Vector / semantic ---

fn similarity_list(rows: &[ResultRow], noun: &str) -> String {
    if rows.is_empty() {
        return if noun.starts_with("semantically") {
            "No semantically similar assets found.".to_string()
        } else {
            "No assets found matching the combined geographic and semantic criteria.".to_string()
        };
    }

    let mut lines = vec![format!("Found {} {noun}:", rows.len())];
    for row in rows {
        let name = string_cell(row, "name").unwrap_or_else(|| "Unknown".to_string());
        let location = string_cell(row, "location").unwrap_or_else(|| "Unknown".to_string());
        let building_type = string_cell(row, "type").unwrap_or_else(|| "Unknown".to_string());
        let score = float_cell(row, "similarity_score").unwrap_or(0.0);
        lines.push(format!(
            "\u{2022} {name} ({location}) - {building_type} (similarity: {score:.3})"
        ));
    }
    lines.join("\n")
}

// --- Cell helpers ---

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

fn string_cell(row: &ResultRow, key: &str) -> Option<String> {
    match row.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn float_cell(row: &ResultRow, key: &str) -> Option<f64> {
    row.get(key).and_then(Value::as_f64)
}

/// Truncate to a display width, marking the cut with "...".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
