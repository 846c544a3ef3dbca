//! Params command implementation
//!
//! Lists every slider with its default and inclusive bounds.

use anyhow::Result;
use colored::Colorize;
use rigsmith_spec::PARAMETER_RANGES;
use std::process::ExitCode;

use super::json_output::ParamRow;
use super::to_json_string;

/// Run the params command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let rows = param_rows();
    if json_output {
        println!("{}", to_json_string(&rows)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Sliders:".cyan().bold());
    for row in &rows {
        let max = row
            .max
            .map(|m| format!("{:.4}", m))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<20} default {:<8.4} min {:<8.4} max {:<8} {}",
            row.name.bold(),
            row.default,
            row.min,
            max,
            row.description.dimmed()
        );
    }
    println!(
        "  {:<20} default {:<8} {}",
        "nail_bone".bold(),
        "false",
        "add a nail bone past each distal finger segment".dimmed()
    );
    Ok(ExitCode::SUCCESS)
}

/// One row per scalar slider, in declaration order.
pub fn param_rows() -> Vec<ParamRow> {
    PARAMETER_RANGES
        .iter()
        .map(|range| ParamRow {
            name: range.name.to_string(),
            default: range.default,
            min: range.min,
            max: range.max,
            description: range.description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_rows_match_range_table() {
        let rows = param_rows();
        assert_eq!(rows.len(), 14);
        assert_eq!(rows[0].name, "height");
        assert_eq!(rows[0].default, 1.70);
        let leg = rows.iter().find(|r| r.name == "leg_length_ratio").unwrap();
        assert_eq!(leg.max, Some(0.6));
    }
}
