//! Tabular export of a summary
//!
//! One header line, then one row per actor in snapshot order. Percentages
//! are printed with exactly two decimals.

use crate::engine::Summary;
use rust_decimal::{Decimal, RoundingStrategy};

const HEADERS: [&str; 4] = ["steamid", "total_deposited", "percentage", "sats_reward"];

/// CSV format exporter: comma separated, header first
#[derive(Debug, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, summary: &Summary) -> String {
        let mut output = HEADERS.join(",");
        output.push('\n');

        for (actor, row) in summary.snapshot.iter() {
            let fields = [
                escape_field(actor.as_str()),
                row.total_deposited.to_string(),
                format_percentage(row.percentage),
                row.sats_reward.to_string(),
            ];
            output.push_str(&fields.join(","));
            output.push('\n');
        }

        output
    }
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Two fixed decimals, midpoint rounded away from zero
pub fn format_percentage(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
