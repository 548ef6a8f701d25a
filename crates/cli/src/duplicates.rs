//! `listcheck duplicates`: flag likely duplicate companies in one export.

use std::path::PathBuf;

use listcheck_match::detect_duplicates;
use listcheck_match::model::{DuplicateRow, DuplicateSummary};
use serde::Serialize;

use crate::files::{load_config, print_json, read_input, write_csv};
use crate::report::{render_summary, summary_path};
use crate::CliError;

const RESULT_COLUMNS: [&str; 6] = [
    "duplicate_flag",
    "confidence_score",
    "cluster_id",
    "potential_matches",
    "match_reason",
    "review_priority",
];

#[derive(Serialize)]
struct DuplicatesJson<'a> {
    output: String,
    summary_report: String,
    summary: &'a DuplicateSummary,
}

pub fn cmd_duplicates(
    config_path: Option<PathBuf>,
    input_path: PathBuf,
    output_path: PathBuf,
    json_output: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let columns = &config.duplicates.columns;

    let table = read_input(&input_path, &[columns.company.as_str(), columns.domain.as_str()])?;
    let records = table.records(columns).map_err(CliError::matching)?;

    let report = detect_duplicates(&records, &config);
    for row in &report.skipped {
        eprintln!(
            "warning: {} line {}: {}, not written",
            table.file,
            table.line_of(row.index),
            row.reason
        );
    }

    let mut headers = table.headers.clone();
    headers.extend(RESULT_COLUMNS.iter().map(|c| c.to_string()));
    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|r| {
            let mut row = table.rows[r.index].clone();
            row.extend(result_cells(r));
            row
        })
        .collect();
    write_csv(&output_path, &headers, &rows)?;
    eprintln!("wrote {}", output_path.display());

    let report_path = summary_path(&output_path);
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let text = render_summary(&report, &records, &generated)
        .map_err(|e| CliError::general(format!("cannot render summary report: {e}")))?;
    std::fs::write(&report_path, text)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", report_path.display())))?;
    eprintln!("wrote {}", report_path.display());

    if json_output {
        print_json(&DuplicatesJson {
            output: output_path.display().to_string(),
            summary_report: report_path.display().to_string(),
            summary: &report.summary,
        })?;
    }

    let s = &report.summary;
    eprintln!(
        "duplicates: {} companies analyzed: {} flagged ({} high, {} medium, {} low) in {} clusters, {} skipped",
        s.evaluated, s.flagged, s.high, s.medium, s.low, s.clusters, s.skipped,
    );

    Ok(())
}

fn result_cells(row: &DuplicateRow) -> [String; 6] {
    [
        if row.duplicate_flag { "Yes" } else { "No" }.to_string(),
        row.confidence_score.to_string(),
        row.cluster_id.clone().unwrap_or_default(),
        row.potential_matches.clone(),
        row.match_reason.clone(),
        row.review_priority.to_string(),
    ]
}
