use serde::Deserialize;

use crate::error::MatchError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Immutable matching configuration. Every section is optional in TOML;
/// omitted sections and fields take the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    pub normalize: NormalizeConfig,
    pub domain: DomainConfig,
    pub dnc: DncConfig,
    pub duplicates: DuplicateConfig,
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Standalone tokens removed from company names (whole words only).
    pub suffix_words: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            suffix_words: strings(&["inc", "ltd", "llc", "corp", "pty", "company", "co", "the"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain analyzer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainConfig {
    /// Single TLD labels stripped from the right.
    pub tld_labels: Vec<String>,
    /// Two-label suffixes stripped as one unit, e.g. `co.uk`.
    pub compound_suffixes: Vec<String>,
    /// Subdomain labels stripped from the left.
    pub subdomains: Vec<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            tld_labels: strings(&[
                "com", "co", "org", "net", "io", "ai", "biz", "info", "edu", "gov", "uk", "us",
                "ca", "au", "nz", "za", "in", "jp", "kr", "sg", "br", "mx", "de", "fr", "ie",
            ]),
            compound_suffixes: strings(&[
                "co.uk", "co.za", "com.au", "co.in", "co.jp", "com.br", "com.mx", "co.kr",
                "com.sg", "co.nz",
            ]),
            subdomains: strings(&[
                "www", "shop", "mail", "app", "blog", "m", "en", "store", "support", "news",
            ]),
        }
    }
}

// ---------------------------------------------------------------------------
// DNC mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DncConfig {
    /// Fuzzy score at or above which a candidate is do-not-contact.
    pub match_threshold: u8,
    /// Fuzzy score at or above which (and below `match_threshold`) a
    /// candidate needs manual review.
    pub review_threshold: u8,
    /// Column mapping for the candidate (contacts) file.
    pub columns: ColumnMapping,
    /// Column mapping for the exclusions file. `email` is ignored.
    pub exclusion_columns: ColumnMapping,
}

impl Default for DncConfig {
    fn default() -> Self {
        Self {
            match_threshold: 90,
            review_threshold: 80,
            columns: ColumnMapping {
                company: "company".into(),
                domain: "domain".into(),
                email: Some("email".into()),
            },
            exclusion_columns: ColumnMapping {
                company: "company".into(),
                domain: "domain".into(),
                email: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Duplicate mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuplicateConfig {
    pub domain_weight: f64,
    pub name_weight: f64,
    /// Tier floors on the combined score.
    pub high: u8,
    pub medium: u8,
    pub low: u8,
    /// Added (capped at 100) when base identifiers match exactly and the
    /// name score reaches `bonus_name_floor`.
    pub bonus: u8,
    pub bonus_name_floor: u8,
    pub columns: ColumnMapping,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            domain_weight: 0.6,
            name_weight: 0.4,
            high: 90,
            medium: 70,
            low: 50,
            bonus: 5,
            bonus_name_floor: 70,
            columns: ColumnMapping {
                company: "Company name".into(),
                domain: "Company Domain Name".into(),
                email: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names (exact, case-sensitive) of the key columns.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnMapping {
    pub company: String,
    pub domain: String,
    #[serde(default)]
    pub email: Option<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, MatchError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| MatchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let dnc = &self.dnc;
        if dnc.match_threshold > 100 {
            return Err(MatchError::ConfigValidation(format!(
                "dnc.match_threshold must be at most 100, got {}",
                dnc.match_threshold
            )));
        }
        if dnc.review_threshold > dnc.match_threshold {
            return Err(MatchError::ConfigValidation(format!(
                "dnc.review_threshold ({}) must not exceed dnc.match_threshold ({})",
                dnc.review_threshold, dnc.match_threshold
            )));
        }

        let dup = &self.duplicates;
        if !(dup.low <= dup.medium && dup.medium <= dup.high && dup.high <= 100) {
            return Err(MatchError::ConfigValidation(format!(
                "duplicate tiers must satisfy low <= medium <= high <= 100, got {}/{}/{}",
                dup.low, dup.medium, dup.high
            )));
        }
        if !dup.domain_weight.is_finite() || !dup.name_weight.is_finite() {
            return Err(MatchError::ConfigValidation(format!(
                "duplicate weights must be finite numbers, got {} + {}",
                dup.domain_weight, dup.name_weight
            )));
        }
        if dup.domain_weight < 0.0 || dup.name_weight < 0.0 {
            return Err(MatchError::ConfigValidation(
                "duplicate weights must not be negative".into(),
            ));
        }
        if (dup.domain_weight + dup.name_weight - 1.0).abs() > 1e-6 {
            return Err(MatchError::ConfigValidation(format!(
                "duplicate weights must sum to 1.0, got {} + {}",
                dup.domain_weight, dup.name_weight
            )));
        }
        if dup.bonus_name_floor > 100 {
            return Err(MatchError::ConfigValidation(format!(
                "duplicates.bonus_name_floor must be at most 100, got {}",
                dup.bonus_name_floor
            )));
        }

        for (section, mapping) in [
            ("dnc.columns", &dnc.columns),
            ("dnc.exclusion_columns", &dnc.exclusion_columns),
            ("duplicates.columns", &dup.columns),
        ] {
            if mapping.company.trim().is_empty() || mapping.domain.trim().is_empty() {
                return Err(MatchError::ConfigValidation(format!(
                    "{section}: column names must not be empty"
                )));
            }
            if matches!(mapping.email.as_deref(), Some(e) if e.trim().is_empty()) {
                return Err(MatchError::ConfigValidation(format!(
                    "{section}: email column name must not be empty"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = MatchConfig::from_toml("").unwrap();
        assert_eq!(config.dnc.match_threshold, 90);
        assert_eq!(config.dnc.review_threshold, 80);
        assert_eq!(config.duplicates.high, 90);
        assert_eq!(config.duplicates.medium, 70);
        assert_eq!(config.duplicates.low, 50);
        assert_eq!(config.duplicates.columns.company, "Company name");
        assert_eq!(config.dnc.columns.email.as_deref(), Some("email"));
        assert!(config.dnc.exclusion_columns.email.is_none());
        assert!(config.normalize.suffix_words.iter().any(|w| w == "co"));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let input = r#"
[dnc]
review_threshold = 85

[duplicates.columns]
company = "Name"
domain = "Website"
"#;
        let config = MatchConfig::from_toml(input).unwrap();
        assert_eq!(config.dnc.review_threshold, 85);
        assert_eq!(config.dnc.match_threshold, 90);
        assert_eq!(config.dnc.columns.company, "company");
        assert_eq!(config.duplicates.columns.domain, "Website");
        assert!((config.duplicates.domain_weight - 0.6).abs() < 1e-9);
    }

    #[test]
    fn rejects_unknown_field() {
        let input = r#"
[dnc]
match_treshold = 95
"#;
        let err = MatchConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, MatchError::ConfigParse(_)));
    }

    #[test]
    fn rejects_review_above_match() {
        let input = r#"
[dnc]
match_threshold = 85
review_threshold = 88
"#;
        let err = MatchConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("review_threshold"));
    }

    #[test]
    fn rejects_unordered_tiers() {
        let input = r#"
[duplicates]
medium = 95
"#;
        let err = MatchConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("low <= medium <= high"));
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let input = r#"
[duplicates]
domain_weight = 0.7
"#;
        let err = MatchConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn rejects_non_finite_weights() {
        for input in [
            "[duplicates]\ndomain_weight = nan\n",
            "[duplicates]\nname_weight = inf\n",
            "[duplicates]\ndomain_weight = -inf\nname_weight = inf\n",
        ] {
            let err = MatchConfig::from_toml(input).unwrap_err();
            assert!(matches!(err, MatchError::ConfigValidation(_)), "{input}");
            assert!(err.to_string().contains("finite"), "{input}");
        }
    }

    #[test]
    fn rejects_empty_column_name() {
        let input = r#"
[dnc.columns]
company = ""
domain = "domain"
"#;
        let err = MatchConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("dnc.columns"));
    }
}
