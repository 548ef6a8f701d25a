//! `listcheck dnc`: annotate contacts with do-not-contact decisions.

use std::path::PathBuf;

use listcheck_match::model::{DncOutcome, DncSummary, MatchResult};
use listcheck_match::{run_dnc, Record, Table};
use serde::Serialize;

use crate::files::{load_config, print_json, read_input, write_csv};
use crate::CliError;

const RESULT_COLUMNS: [&str; 6] = [
    "do_not_contact",
    "match_type",
    "fuzzy_score",
    "needs_review",
    "matched_company",
    "matched_domain",
];

#[derive(Serialize)]
struct DncJson<'a> {
    output: String,
    summary: &'a DncSummary,
}

pub fn cmd_dnc(
    config_path: Option<PathBuf>,
    contacts_path: PathBuf,
    exclusions_path: PathBuf,
    output_path: PathBuf,
    json_output: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;

    let mut contact_columns = vec![config.dnc.columns.company.as_str(), config.dnc.columns.domain.as_str()];
    if let Some(ref email) = config.dnc.columns.email {
        contact_columns.push(email);
    }
    let contacts = read_input(&contacts_path, &contact_columns)?;
    let exclusions = read_input(
        &exclusions_path,
        &[
            config.dnc.exclusion_columns.company.as_str(),
            config.dnc.exclusion_columns.domain.as_str(),
        ],
    )?;

    let candidates = contacts.records(&config.dnc.columns).map_err(CliError::matching)?;
    let excluded = exclusions
        .records(&config.dnc.exclusion_columns)
        .map_err(CliError::matching)?;

    let outcome = run_dnc(&candidates, &excluded, &config);
    report_skipped(&contacts, &exclusions, &outcome);

    let mut headers = contacts.headers.clone();
    headers.extend(RESULT_COLUMNS.iter().map(|c| c.to_string()));
    let rows: Vec<Vec<String>> = outcome
        .results
        .iter()
        .map(|(index, result)| {
            let mut row = contacts.rows[*index].clone();
            row.extend(result_cells(result, &excluded));
            row
        })
        .collect();
    write_csv(&output_path, &headers, &rows)?;
    eprintln!("wrote {}", output_path.display());

    if json_output {
        print_json(&DncJson {
            output: output_path.display().to_string(),
            summary: &outcome.summary,
        })?;
    }

    let s = &outcome.summary;
    eprintln!(
        "dnc: {} contacts checked against {} exclusions: {} do not contact, {} need review, {} skipped",
        s.evaluated, s.exclusions - s.skipped_exclusions, s.do_not_contact, s.needs_review, s.skipped_candidates,
    );
    if !s.match_type_counts.is_empty() {
        let counts: Vec<String> = s
            .match_type_counts
            .iter()
            .map(|(kind, n)| format!("{kind} {n}"))
            .collect();
        eprintln!("match types: {}", counts.join(", "));
    }

    Ok(())
}

fn result_cells(result: &MatchResult, exclusions: &[Record]) -> [String; 6] {
    let matched = result.matched_exclusion.and_then(|i| exclusions.get(i));
    [
        result.do_not_contact.to_string(),
        result.match_type.to_string(),
        result.fuzzy_score.map(|s| s.to_string()).unwrap_or_default(),
        result.needs_review.to_string(),
        matched.map(|r| r.company.clone()).unwrap_or_default(),
        matched.map(|r| r.domain.clone()).unwrap_or_default(),
    ]
}

fn report_skipped(contacts: &Table, exclusions: &Table, outcome: &DncOutcome) {
    for row in &outcome.skipped_candidates {
        eprintln!(
            "warning: {} line {}: {}, not written",
            contacts.file,
            contacts.line_of(row.index),
            row.reason
        );
    }
    for row in &outcome.skipped_exclusions {
        eprintln!(
            "warning: {} line {}: {}, ignored",
            exclusions.file,
            exclusions.line_of(row.index),
            row.reason
        );
    }
}
