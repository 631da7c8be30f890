//! Rendering a [`finplan_core::model::SimulationResult`] to the terminal:
//! a summary table, a flat CSV dump, or raw JSON for piping into another
//! tool.

use finplan_core::model::SimulationResult;

use crate::util::format::format_currency;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Print `result` in `format`. Table output truncates `parts` per row to
/// the largest few envelopes by absolute value, since a plan with dozens
/// of envelopes would otherwise wrap terminals unreadably; CSV and JSON
/// carry every part.
pub fn render(result: &SimulationResult, format: OutputFormat) {
    match format {
        OutputFormat::Table => render_table(result),
        OutputFormat::Csv => render_csv(result),
        OutputFormat::Json => render_json(result),
    }
}

fn render_table(result: &SimulationResult) {
    const TOP_N: usize = 4;
    println!("{:>10}  {:>16}  {}", "day", "total", "top envelopes");
    for point in &result.points {
        let mut parts = point.parts.clone();
        parts.sort_by(|a, b| b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(std::cmp::Ordering::Equal));
        let top: Vec<String> = parts
            .iter()
            .take(TOP_N)
            .map(|(name, value)| format!("{name}={}", format_currency(*value)))
            .collect();
        println!("{:>10.0}  {:>16}  {}", point.date, format_currency(point.value), top.join(", "));
    }
}

fn render_csv(result: &SimulationResult) {
    println!("day,envelope,value");
    for point in &result.points {
        println!("{},total,{}", point.date, point.value);
        for (name, value) in &point.parts {
            println!("{},{name},{value}", point.date);
        }
    }
}

fn render_json(result: &SimulationResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize result: {e}"),
    }
}
