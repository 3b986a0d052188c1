// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use pa_engine::{DisposeSummary, MaintenanceSummary, MarkSummary};
use serde_json::{json, Value};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn mark_json(summary: &MarkSummary) -> Value {
    json!({
        "scanned": summary.scanned,
        "marked": summary.marked,
        "failed": summary.failed,
    })
}

pub fn dispose_json(summary: &DisposeSummary) -> Value {
    json!({
        "disposed": summary.disposed,
        "failed": summary.failed,
        "cancelled": summary.cancelled,
    })
}

pub fn maintenance_json(summary: &MaintenanceSummary) -> Value {
    json!({
        "mark": mark_json(&summary.mark),
        "dispose": dispose_json(&summary.dispose),
        "maintained": summary.maintained,
        "failed": summary.failed,
    })
}

pub fn mark_text(summary: &MarkSummary) -> String {
    format!(
        "Marked {} of {} tracking file(s) for deletion ({} failed)",
        summary.marked, summary.scanned, summary.failed
    )
}

pub fn dispose_text(summary: &DisposeSummary) -> String {
    let mut text = format!(
        "Deleted {} build director{} ({} failed)",
        summary.disposed,
        if summary.disposed == 1 { "y" } else { "ies" },
        summary.failed
    );
    if summary.cancelled {
        text.push_str(", cancelled");
    }
    text
}

pub fn maintenance_text(summary: &MaintenanceSummary) -> String {
    format!(
        "{}\n{}\nMaintained {} definition(s) ({} failed)",
        mark_text(&summary.mark),
        dispose_text(&summary.dispose),
        summary.maintained,
        summary.failed
    )
}

/// Print `text` or `json` depending on the output format.
pub fn print(format: OutputFormat, text: String, json: Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json)?),
    }
    Ok(())
}
