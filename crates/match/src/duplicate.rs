use log::{debug, info, warn};

use crate::cluster::build_clusters;
use crate::config::{DuplicateConfig, MatchConfig};
use crate::domain::base_identifier;
use crate::fuzzy::token_sort_score;
use crate::model::{
    cluster_label, ConfidenceTier, DuplicateCandidate, DuplicateReport, DuplicateRow,
    DuplicateSummary, NormalizedRecord, Record, SkippedRow,
};
use crate::normalize::normalize_record;

/// Domain scores at or above this are reported as similar domains.
const SIMILAR_DOMAIN: u8 = 85;

/// A record with its cleaned fields and base identifier computed once.
struct Prepared {
    clean: NormalizedRecord,
    base: String,
}

fn prepare(record: &Record, config: &MatchConfig) -> Prepared {
    let clean = normalize_record(record, &config.normalize);
    let base = base_identifier(&clean.clean_domain, &config.domain);
    Prepared { clean, base }
}

/// Score one unordered pair. The returned candidate uses `a = 0, b = 1`.
pub fn score_pair(a: &Record, b: &Record, config: &MatchConfig) -> DuplicateCandidate {
    score_prepared(0, 1, &prepare(a, config), &prepare(b, config), &config.duplicates)
}

fn score_prepared(
    i: usize,
    j: usize,
    a: &Prepared,
    b: &Prepared,
    config: &DuplicateConfig,
) -> DuplicateCandidate {
    let same_base = !a.base.is_empty() && a.base == b.base;
    let mut reasons = Vec::with_capacity(3);

    let domain_score = if same_base {
        if a.clean.clean_domain == b.clean.clean_domain {
            reasons.push("Exact domain match".to_string());
        } else {
            reasons.push(format!("Same base domain: {}", a.base));
        }
        100
    } else {
        let score = token_sort_score(&a.clean.clean_domain, &b.clean.clean_domain);
        if score >= SIMILAR_DOMAIN {
            reasons.push(format!("Similar domains ({score}%)"));
        } else {
            reasons.push(format!("Low domain similarity ({score}%)"));
        }
        score
    };

    let name_score = if a.clean.clean_company == b.clean.clean_company {
        reasons.push("Exact name match".to_string());
        100
    } else {
        let score = token_sort_score(&a.clean.clean_company, &b.clean.clean_company);
        reasons.push(name_reason(score));
        score
    };

    let weighted =
        config.domain_weight * f64::from(domain_score) + config.name_weight * f64::from(name_score);
    let mut combined = weighted.round().clamp(0.0, 100.0) as u8;
    if same_base && name_score >= config.bonus_name_floor {
        combined = combined.saturating_add(config.bonus).min(100);
        reasons.push(format!("Same base domain with similar name (+{})", config.bonus));
    }

    DuplicateCandidate {
        a: i,
        b: j,
        domain_score,
        name_score,
        combined_score: combined,
        tier: tier_for(combined, config),
        reasons,
    }
}

fn name_reason(score: u8) -> String {
    if score >= 95 {
        format!("Very similar names ({score}%)")
    } else if score >= 85 {
        format!("Similar names ({score}%)")
    } else if score >= 70 {
        format!("Moderately similar names ({score}%)")
    } else {
        format!("Low name similarity ({score}%)")
    }
}

pub fn tier_for(score: u8, config: &DuplicateConfig) -> ConfidenceTier {
    if score >= config.high {
        ConfidenceTier::High
    } else if score >= config.medium {
        ConfidenceTier::Medium
    } else if score >= config.low {
        ConfidenceTier::Low
    } else {
        ConfidenceTier::None
    }
}

/// Find duplicate candidates among `records`, cluster them and build one
/// output row per evaluated record.
///
/// Records lacking a clean company or clean domain are skipped. Pairs are
/// enumerated `i < j` in input order, so candidate order, best-match ties and
/// cluster numbering are reproducible for a fixed input.
pub fn detect_duplicates(records: &[Record], config: &MatchConfig) -> DuplicateReport {
    let mut prepared: Vec<(usize, Prepared)> = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let p = prepare(record, config);
        if p.clean.clean_company.is_empty() || p.clean.clean_domain.is_empty() {
            let reason = match (p.clean.clean_company.is_empty(), p.clean.clean_domain.is_empty()) {
                (true, true) => "empty company and domain",
                (true, false) => "empty company",
                _ => "empty domain",
            };
            warn!("record {index}: {reason}, skipped");
            skipped.push(SkippedRow {
                index,
                reason: reason.into(),
            });
            continue;
        }
        prepared.push((index, p));
    }

    info!("analyzing {} companies for duplicates", prepared.len());

    let mut candidates = Vec::new();
    for (x, (i, a)) in prepared.iter().enumerate() {
        for (j, b) in &prepared[x + 1..] {
            let candidate = score_prepared(*i, *j, a, b, &config.duplicates);
            if candidate.tier == ConfidenceTier::None {
                continue;
            }
            debug!(
                "pair ({i}, {j}): {} {} [{}]",
                candidate.combined_score,
                candidate.tier,
                candidate.reason_text()
            );
            candidates.push(candidate);
        }
    }

    let clusters = build_clusters(records.len(), &candidates);
    info!(
        "found {} candidate pairs in {} clusters",
        candidates.len(),
        clusters.len()
    );

    let mut cluster_of: Vec<Option<usize>> = vec![None; records.len()];
    for cluster in &clusters {
        for &m in &cluster.members {
            cluster_of[m] = Some(cluster.id);
        }
    }

    let rows: Vec<DuplicateRow> = prepared
        .iter()
        .map(|(index, _)| build_row(*index, records, &candidates, cluster_of[*index]))
        .collect();

    let summary = summarize(records.len(), &rows, &candidates, &clusters, skipped.len());

    DuplicateReport {
        rows,
        candidates,
        clusters,
        skipped,
        summary,
    }
}

fn build_row(
    index: usize,
    records: &[Record],
    candidates: &[DuplicateCandidate],
    cluster: Option<usize>,
) -> DuplicateRow {
    let mut best: Option<&DuplicateCandidate> = None;
    let mut matches = Vec::new();

    for c in candidates.iter().filter(|c| c.a == index || c.b == index) {
        if best.map_or(true, |b| c.combined_score > b.combined_score) {
            best = Some(c);
        }
        let other = &records[c.other(index)];
        matches.push(format!(
            "{} ({}) [{}%]",
            other.company, other.domain, c.combined_score
        ));
    }

    match best {
        Some(b) => DuplicateRow {
            index,
            duplicate_flag: true,
            confidence_score: b.combined_score,
            cluster_id: cluster.map(cluster_label),
            potential_matches: matches.join("; "),
            match_reason: b.reason_text(),
            review_priority: b.tier,
        },
        None => DuplicateRow {
            index,
            duplicate_flag: false,
            confidence_score: 0,
            cluster_id: None,
            potential_matches: String::new(),
            match_reason: String::new(),
            review_priority: ConfidenceTier::None,
        },
    }
}

fn summarize(
    records: usize,
    rows: &[DuplicateRow],
    candidates: &[DuplicateCandidate],
    clusters: &[crate::model::Cluster],
    skipped: usize,
) -> DuplicateSummary {
    let mut summary = DuplicateSummary {
        records,
        evaluated: rows.len(),
        skipped,
        candidate_pairs: candidates.len(),
        clusters: clusters.len(),
        cluster_sizes: clusters.iter().map(|c| c.members.len()).collect(),
        ..DuplicateSummary::default()
    };
    for row in rows {
        if row.duplicate_flag {
            summary.flagged += 1;
        }
        match row.review_priority {
            ConfidenceTier::High => summary.high += 1,
            ConfidenceTier::Medium => summary.medium += 1,
            ConfidenceTier::Low => summary.low += 1,
            ConfidenceTier::None => {}
        }
    }
    summary
}
