use std::collections::HashMap;

use log::{debug, info, warn};

use crate::config::MatchConfig;
use crate::fuzzy::token_sort_score;
use crate::model::{
    DncOutcome, DncSummary, MatchResult, MatchType, NormalizedRecord, Record, SkippedRow,
};
use crate::normalize::normalize_record;

/// Evaluates candidates against a fixed exclusion list.
///
/// Exclusions are normalized once at construction; exact lookups keep the
/// first exclusion (input order) for each clean value.
pub struct DncEvaluator<'a> {
    config: &'a MatchConfig,
    exclusions: Vec<(usize, NormalizedRecord)>,
    by_domain: HashMap<String, usize>,
    by_company: HashMap<String, usize>,
    skipped: Vec<SkippedRow>,
}

impl<'a> DncEvaluator<'a> {
    pub fn new(exclusions: &[Record], config: &'a MatchConfig) -> Self {
        let mut kept = Vec::with_capacity(exclusions.len());
        let mut by_domain = HashMap::new();
        let mut by_company = HashMap::new();
        let mut skipped = Vec::new();

        for (index, record) in exclusions.iter().enumerate() {
            let clean = normalize_record(record, &config.normalize);
            if clean.clean_company.is_empty() && clean.clean_domain.is_empty() {
                warn!("exclusion {index}: empty company and domain, skipped");
                skipped.push(SkippedRow {
                    index,
                    reason: "empty company and domain".into(),
                });
                continue;
            }
            if !clean.clean_domain.is_empty() {
                by_domain.entry(clean.clean_domain.clone()).or_insert(index);
            }
            if !clean.clean_company.is_empty() {
                by_company.entry(clean.clean_company.clone()).or_insert(index);
            }
            kept.push((index, clean));
        }

        info!(
            "prepared {} exclusions ({} unique domains, {} unique companies)",
            kept.len(),
            by_domain.len(),
            by_company.len()
        );

        Self {
            config,
            exclusions: kept,
            by_domain,
            by_company,
            skipped,
        }
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Decide do-not-contact for one candidate.
    ///
    /// Exact rules are checked in priority order domain, company, email
    /// domain; the first that fires names the match type. The best fuzzy
    /// score is always computed and reported.
    pub fn evaluate(&self, candidate: &Record) -> MatchResult {
        self.evaluate_normalized(&normalize_record(candidate, &self.config.normalize))
    }

    pub fn evaluate_normalized(&self, clean: &NormalizedRecord) -> MatchResult {
        let exact = self
            .exact_hit(&self.by_domain, &clean.clean_domain)
            .map(|i| (MatchType::DomainExact, i))
            .or_else(|| {
                self.exact_hit(&self.by_company, &clean.clean_company)
                    .map(|i| (MatchType::CompanyExact, i))
            })
            .or_else(|| {
                self.exact_hit(&self.by_domain, &clean.clean_email_domain)
                    .map(|i| (MatchType::EmailDomainExact, i))
            });

        let best = self.best_fuzzy(&clean.clean_company);
        let fuzzy_score = best.map(|(score, _)| score);
        let thresholds = &self.config.dnc;

        if let Some((match_type, index)) = exact {
            return MatchResult {
                do_not_contact: true,
                match_type,
                fuzzy_score,
                needs_review: false,
                matched_exclusion: Some(index),
            };
        }

        match best {
            Some((score, index)) if score >= thresholds.match_threshold => MatchResult {
                do_not_contact: true,
                match_type: MatchType::Fuzzy,
                fuzzy_score,
                needs_review: false,
                matched_exclusion: Some(index),
            },
            Some((score, index)) if score >= thresholds.review_threshold => MatchResult {
                do_not_contact: false,
                match_type: MatchType::None,
                fuzzy_score,
                needs_review: true,
                matched_exclusion: Some(index),
            },
            _ => MatchResult {
                do_not_contact: false,
                match_type: MatchType::None,
                fuzzy_score,
                needs_review: false,
                matched_exclusion: None,
            },
        }
    }

    fn exact_hit(&self, index: &HashMap<String, usize>, key: &str) -> Option<usize> {
        if key.is_empty() {
            return None;
        }
        index.get(key).copied()
    }

    /// Highest token-sort score over exclusions with a company name; the
    /// first maximum in input order wins.
    fn best_fuzzy(&self, clean_company: &str) -> Option<(u8, usize)> {
        if clean_company.is_empty() {
            return None;
        }
        let mut best: Option<(u8, usize)> = None;
        for (index, exclusion) in &self.exclusions {
            if exclusion.clean_company.is_empty() {
                continue;
            }
            let score = token_sort_score(clean_company, &exclusion.clean_company);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, *index));
                if score == 100 {
                    break;
                }
            }
        }
        best
    }
}

/// Evaluate every candidate against the exclusion list.
pub fn run_dnc(candidates: &[Record], exclusions: &[Record], config: &MatchConfig) -> DncOutcome {
    let evaluator = DncEvaluator::new(exclusions, config);

    let mut results = Vec::with_capacity(candidates.len());
    let mut skipped_candidates = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        let clean = normalize_record(candidate, &config.normalize);
        if clean.clean_company.is_empty()
            && clean.clean_domain.is_empty()
            && clean.clean_email_domain.is_empty()
        {
            warn!("candidate {index}: no company, domain or email domain, skipped");
            skipped_candidates.push(SkippedRow {
                index,
                reason: "no company, domain or email domain".into(),
            });
            continue;
        }
        let result = evaluator.evaluate_normalized(&clean);
        debug!(
            "candidate {index} '{}': {} (fuzzy {:?})",
            clean.clean_company, result.match_type, result.fuzzy_score
        );
        results.push((index, result));
    }

    let mut summary = DncSummary {
        candidates: candidates.len(),
        evaluated: results.len(),
        skipped_candidates: skipped_candidates.len(),
        exclusions: exclusions.len(),
        skipped_exclusions: evaluator.skipped().len(),
        ..DncSummary::default()
    };
    for (_, result) in &results {
        if result.do_not_contact {
            summary.do_not_contact += 1;
        }
        if result.needs_review {
            summary.needs_review += 1;
        }
        *summary
            .match_type_counts
            .entry(result.match_type.to_string())
            .or_insert(0) += 1;
    }

    info!(
        "dnc: {} candidates, {} do-not-contact, {} need review, {} skipped",
        summary.candidates, summary.do_not_contact, summary.needs_review, summary.skipped_candidates
    );

    DncOutcome {
        results,
        skipped_candidates,
        skipped_exclusions: evaluator.skipped().to_vec(),
        summary,
    }
}
