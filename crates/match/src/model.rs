use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One row from either input list. Empty strings stand for missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub company: String,
    pub domain: String,
    /// Contact email, DNC candidates only.
    pub email: Option<String>,
}

impl Record {
    pub fn new(company: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            domain: domain.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Cleaned view of a [`Record`], computed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub clean_company: String,
    pub clean_domain: String,
    pub clean_email_domain: String,
}

/// A row left out of matching because it has no usable key fields.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    /// Index into the input sequence.
    pub index: usize,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// DNC mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    DomainExact,
    CompanyExact,
    EmailDomainExact,
    Fuzzy,
    None,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainExact => write!(f, "domain_exact"),
            Self::CompanyExact => write!(f, "company_exact"),
            Self::EmailDomainExact => write!(f, "email_domain_exact"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Per-candidate DNC outcome.
///
/// `needs_review` is only set when no exact rule fired and the best fuzzy
/// score sits in the review band; `do_not_contact` is set when any exact rule
/// fired or the best fuzzy score reached the match threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub do_not_contact: bool,
    pub match_type: MatchType,
    /// Best token-sort score against any exclusion; `None` when no fuzzy
    /// comparison was possible.
    pub fuzzy_score: Option<u8>,
    pub needs_review: bool,
    /// Exclusion responsible for `match_type`, or the best fuzzy candidate
    /// when it reached the review band.
    pub matched_exclusion: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DncSummary {
    pub candidates: usize,
    pub evaluated: usize,
    pub skipped_candidates: usize,
    pub exclusions: usize,
    pub skipped_exclusions: usize,
    pub do_not_contact: usize,
    pub needs_review: usize,
    pub match_type_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DncOutcome {
    /// `(candidate index, result)` in input order, skipped rows excluded.
    pub results: Vec<(usize, MatchResult)>,
    pub skipped_candidates: Vec<SkippedRow>,
    pub skipped_exclusions: Vec<SkippedRow>,
    pub summary: DncSummary,
}

// ---------------------------------------------------------------------------
// Duplicate mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConfidenceTier {
    None,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Scored unordered pair, `a < b` in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCandidate {
    pub a: usize,
    pub b: usize,
    pub domain_score: u8,
    pub name_score: u8,
    pub combined_score: u8,
    pub tier: ConfidenceTier,
    pub reasons: Vec<String>,
}

impl DuplicateCandidate {
    pub fn other(&self, index: usize) -> usize {
        if self.a == index {
            self.b
        } else {
            self.a
        }
    }

    pub fn reason_text(&self) -> String {
        self.reasons.join(" + ")
    }
}

/// Records transitively linked by qualifying candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// Sequential within one run, starting at 0.
    pub id: usize,
    /// Input indices, ascending.
    pub members: Vec<usize>,
}

impl Cluster {
    pub fn label(&self) -> String {
        cluster_label(self.id)
    }
}

pub fn cluster_label(id: usize) -> String {
    format!("CLUSTER_{id:03}")
}

/// Per-record duplicate-mode output.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateRow {
    pub index: usize,
    pub duplicate_flag: bool,
    /// Best edge score, 0 without edges.
    pub confidence_score: u8,
    pub cluster_id: Option<String>,
    pub potential_matches: String,
    pub match_reason: String,
    pub review_priority: ConfidenceTier,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DuplicateSummary {
    pub records: usize,
    pub evaluated: usize,
    pub skipped: usize,
    pub flagged: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub candidate_pairs: usize,
    pub clusters: usize,
    pub cluster_sizes: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    /// One row per evaluated record, input order.
    pub rows: Vec<DuplicateRow>,
    pub candidates: Vec<DuplicateCandidate>,
    pub clusters: Vec<Cluster>,
    pub skipped: Vec<SkippedRow>,
    pub summary: DuplicateSummary,
}
