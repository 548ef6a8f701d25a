//! Canonical forms for company names and domains.
//!
//! All functions here are total: any input, including empty, numeric-only
//! and non-ASCII text, yields a string.

use crate::config::NormalizeConfig;
use crate::model::{NormalizedRecord, Record};

/// Lowercase, drop punctuation, remove suffix words, collapse whitespace.
///
/// Suffix words are removed only as whole tokens, so `"Coats & Co"` becomes
/// `"coats"` rather than losing the `co` inside `coats`.
pub fn normalize_company(raw: &str, config: &NormalizeConfig) -> String {
    let stripped: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| !config.suffix_words.iter().any(|w| w == token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduce a domain or URL to a bare lowercase host name.
///
/// Strips the scheme, any path/query/port, characters other than
/// alphanumerics, `.` and `-`, and leading `www.` labels.
pub fn normalize_domain(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let mut host = match lowered.find("://") {
        Some(pos) => &lowered[pos + 3..],
        None => lowered.as_str(),
    };
    if let Some(end) = host.find(|c| matches!(c, '/' | '?' | '#')) {
        host = &host[..end];
    }
    if let Some(end) = host.find(':') {
        host = &host[..end];
    }

    let filtered: String = host
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '.' || *c == '-')
        .collect();

    let mut cleaned = filtered.trim_start_matches('.');
    while let Some(rest) = cleaned.strip_prefix("www.") {
        cleaned = rest.trim_start_matches('.');
    }
    cleaned.trim_end_matches('.').to_string()
}

/// Normalized domain part of an email address; empty when there is no `@`.
pub fn email_domain(raw: &str) -> String {
    match raw.trim().rsplit_once('@') {
        Some((_, domain)) => normalize_domain(domain),
        None => String::new(),
    }
}

pub fn normalize_record(record: &Record, config: &NormalizeConfig) -> NormalizedRecord {
    NormalizedRecord {
        clean_company: normalize_company(&record.company, config),
        clean_domain: normalize_domain(&record.domain),
        clean_email_domain: record.email.as_deref().map(email_domain).unwrap_or_default(),
    }
}
