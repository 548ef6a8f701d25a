//! Plain-text summary written next to the duplicate-detection output.

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use listcheck_match::model::{DuplicateReport, DuplicateRow};
use listcheck_match::Record;

const TOP_CLUSTERS: usize = 10;

const RECOMMENDATIONS: [&str; 5] = [
    "Start with HIGH priority matches - these are most likely true duplicates",
    "Review MEDIUM priority matches carefully - may need manual verification",
    "LOW priority matches should be spot-checked for false positives",
    "Use the cluster_id to group related duplicates for efficient merging",
    "Always verify before merging - check contact data, deal history, etc.",
];

/// `out/companies.csv` -> `out/companies_summary.txt`
pub fn summary_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "duplicates".to_string());
    output.with_file_name(format!("{stem}_summary.txt"))
}

pub fn render_summary(
    report: &DuplicateReport,
    records: &[Record],
    generated: &str,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_summary(&mut out, report, records, generated)?;
    Ok(out)
}

fn write_summary(
    out: &mut String,
    report: &DuplicateReport,
    records: &[Record],
    generated: &str,
) -> fmt::Result {
    let s = &report.summary;

    writeln!(out, "HUBSPOT DUPLICATE DETECTION SUMMARY REPORT")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "Generated: {generated}")?;
    writeln!(out)?;

    let percentage = if s.evaluated == 0 {
        0.0
    } else {
        s.flagged as f64 / s.evaluated as f64 * 100.0
    };
    writeln!(out, "OVERALL STATISTICS:")?;
    writeln!(out, "  Total companies analyzed: {}", s.evaluated)?;
    writeln!(out, "  Companies flagged as duplicates: {}", s.flagged)?;
    writeln!(out, "  Percentage of duplicates: {percentage:.1}%")?;
    writeln!(out, "  Number of duplicate clusters: {}", s.clusters)?;
    if s.skipped > 0 {
        writeln!(out, "  Rows skipped (missing company or domain): {}", s.skipped)?;
    }
    writeln!(out)?;

    writeln!(out, "PRIORITY BREAKDOWN:")?;
    for (label, count) in [("High", s.high), ("Medium", s.medium), ("Low", s.low)] {
        if count > 0 {
            writeln!(out, "  {label} priority: {count} companies")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "CONFIDENCE SCORE DISTRIBUTION:")?;
    let flagged: Vec<u8> = report
        .rows
        .iter()
        .filter(|r| r.duplicate_flag)
        .map(|r| r.confidence_score)
        .collect();
    if let (Some(max), Some(min)) = (flagged.iter().max(), flagged.iter().min()) {
        let avg = flagged.iter().map(|&v| f64::from(v)).sum::<f64>() / flagged.len() as f64;
        writeln!(out, "  Average confidence score: {avg:.1}%")?;
        writeln!(out, "  Highest confidence score: {max}%")?;
        writeln!(out, "  Lowest confidence score: {min}%")?;
    }
    writeln!(out)?;

    writeln!(out, "LARGEST DUPLICATE CLUSTERS:")?;
    let rows: HashMap<usize, &DuplicateRow> = report.rows.iter().map(|r| (r.index, r)).collect();
    let mut largest: Vec<_> = report.clusters.iter().collect();
    // stable: equal sizes keep cluster order
    largest.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
    for cluster in largest.into_iter().take(TOP_CLUSTERS) {
        writeln!(out, "  {}: {} companies", cluster.label(), cluster.members.len())?;
        for &m in &cluster.members {
            let score = rows.get(&m).map_or(0, |r| r.confidence_score);
            let record = &records[m];
            writeln!(out, "    - {} ({}) [{score}%]", record.company, record.domain)?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "RECOMMENDATIONS:")?;
    for (i, text) in RECOMMENDATIONS.iter().enumerate() {
        writeln!(out, "{}. {text}", i + 1)?;
    }

    Ok(())
}
