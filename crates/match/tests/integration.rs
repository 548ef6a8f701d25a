use std::path::PathBuf;

use listcheck_match::model::{ConfidenceTier, DuplicateReport, MatchType};
use listcheck_match::{detect_duplicates, read_table, run_dnc, MatchConfig, Table};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_table(name: &str) -> Table {
    let path = fixtures_dir().join(name);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    read_table(name, &data).unwrap()
}

fn strict_config() -> MatchConfig {
    let toml = std::fs::read_to_string(fixtures_dir().join("strict.toml")).unwrap();
    MatchConfig::from_toml(&toml).unwrap()
}

fn run_duplicates(config: &MatchConfig) -> (Table, DuplicateReport) {
    let table = load_table("hubspot_companies.csv");
    let records = table.records(&config.duplicates.columns).unwrap();
    let report = detect_duplicates(&records, config);
    (table, report)
}

// -------------------------------------------------------------------------
// DNC
// -------------------------------------------------------------------------

#[test]
fn dnc_fixture_decisions() {
    let config = MatchConfig::default();
    let contacts = load_table("contacts.csv");
    let exclusions = load_table("do_not_contact.csv");

    let candidates = contacts.records(&config.dnc.columns).unwrap();
    let excluded = exclusions.records(&config.dnc.exclusion_columns).unwrap();
    let outcome = run_dnc(&candidates, &excluded, &config);

    let by_index = |i: usize| {
        outcome
            .results
            .iter()
            .find(|(index, _)| *index == i)
            .map(|(_, r)| r)
            .unwrap_or_else(|| panic!("no result for row {i}"))
    };

    assert_eq!(by_index(0).match_type, MatchType::DomainExact);
    assert_eq!(by_index(0).matched_exclusion, Some(0));

    assert_eq!(by_index(1).match_type, MatchType::CompanyExact);
    assert_eq!(by_index(1).matched_exclusion, Some(1));

    assert_eq!(by_index(2).match_type, MatchType::EmailDomainExact);
    assert_eq!(by_index(2).matched_exclusion, Some(2));

    let widget = by_index(3);
    assert_eq!(widget.match_type, MatchType::Fuzzy);
    assert_eq!(widget.fuzzy_score, Some(96));
    assert_eq!(widget.matched_exclusion, Some(3));

    let globax = by_index(4);
    assert!(!globax.do_not_contact);
    assert!(globax.needs_review);
    assert_eq!(globax.fuzzy_score, Some(83));
    assert_eq!(globax.matched_exclusion, Some(4));

    let stark = by_index(5);
    assert!(!stark.do_not_contact);
    assert!(!stark.needs_review);
    assert_eq!(stark.matched_exclusion, None);

    // email only
    let heidi = by_index(7);
    assert_eq!(heidi.match_type, MatchType::EmailDomainExact);
    assert_eq!(heidi.fuzzy_score, None);
    assert_eq!(heidi.matched_exclusion, Some(4));

    assert_eq!(outcome.skipped_candidates.len(), 1);
    assert_eq!(outcome.skipped_candidates[0].index, 6);
    assert_eq!(contacts.line_of(outcome.skipped_candidates[0].index), 8);
    assert_eq!(outcome.skipped_exclusions.len(), 1);
    assert_eq!(outcome.skipped_exclusions[0].index, 5);
}

#[test]
fn dnc_fixture_summary() {
    let config = MatchConfig::default();
    let candidates = load_table("contacts.csv").records(&config.dnc.columns).unwrap();
    let excluded = load_table("do_not_contact.csv")
        .records(&config.dnc.exclusion_columns)
        .unwrap();
    let s = run_dnc(&candidates, &excluded, &config).summary;

    assert_eq!(s.candidates, 8);
    assert_eq!(s.evaluated, 7);
    assert_eq!(s.skipped_candidates, 1);
    assert_eq!(s.exclusions, 6);
    assert_eq!(s.skipped_exclusions, 1);
    assert_eq!(s.do_not_contact, 5);
    assert_eq!(s.needs_review, 1);
    assert_eq!(s.match_type_counts.get("domain_exact"), Some(&1));
    assert_eq!(s.match_type_counts.get("company_exact"), Some(&1));
    assert_eq!(s.match_type_counts.get("email_domain_exact"), Some(&2));
    assert_eq!(s.match_type_counts.get("fuzzy"), Some(&1));
    assert_eq!(s.match_type_counts.get("none"), Some(&2));
}

#[test]
fn dnc_summary_json_shape() {
    let config = MatchConfig::default();
    let candidates = load_table("contacts.csv").records(&config.dnc.columns).unwrap();
    let excluded = load_table("do_not_contact.csv")
        .records(&config.dnc.exclusion_columns)
        .unwrap();
    let outcome = run_dnc(&candidates, &excluded, &config);

    let json = serde_json::to_value(&outcome.summary).unwrap();
    assert_eq!(json["do_not_contact"], 5);
    assert_eq!(json["match_type_counts"]["fuzzy"], 1);

    let first = serde_json::to_value(&outcome.results[0].1).unwrap();
    assert_eq!(first["match_type"], "domain_exact");
}

#[test]
fn dnc_stricter_threshold_from_toml() {
    let config = strict_config();
    let candidates = load_table("contacts.csv").records(&config.dnc.columns).unwrap();
    let excluded = load_table("do_not_contact.csv")
        .records(&config.dnc.exclusion_columns)
        .unwrap();
    let outcome = run_dnc(&candidates, &excluded, &config);

    // 96 still clears 95
    assert_eq!(outcome.results[3].1.match_type, MatchType::Fuzzy);
    assert!(outcome.results[4].1.needs_review);
}

#[test]
fn dnc_without_exclusions_flags_nothing() {
    let config = MatchConfig::default();
    let candidates = load_table("contacts.csv").records(&config.dnc.columns).unwrap();
    let outcome = run_dnc(&candidates, &[], &config);

    assert_eq!(outcome.summary.do_not_contact, 0);
    assert_eq!(outcome.summary.needs_review, 0);
    assert!(outcome.results.iter().all(|(_, r)| r.match_type == MatchType::None));
}

// -------------------------------------------------------------------------
// Duplicates
// -------------------------------------------------------------------------

#[test]
fn duplicates_fixture_clusters() {
    let (table, report) = run_duplicates(&MatchConfig::default());

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 6);
    assert_eq!(report.skipped[0].reason, "empty domain");
    assert_eq!(table.line_of(6), 8);

    let pairs: Vec<(usize, usize, u8)> = report
        .candidates
        .iter()
        .map(|c| (c.a, c.b, c.combined_score))
        .collect();
    assert_eq!(pairs, vec![(0, 2, 100), (3, 4, 70), (4, 5, 55)]);

    assert_eq!(report.clusters.len(), 2);
    assert_eq!(report.clusters[0].members, vec![0, 2]);
    assert_eq!(report.clusters[1].members, vec![3, 4, 5]);
    assert_eq!(report.clusters[1].label(), "CLUSTER_001");
}

#[test]
fn duplicates_fixture_rows() {
    let (_, report) = run_duplicates(&MatchConfig::default());
    let row = |i: usize| report.rows.iter().find(|r| r.index == i).unwrap();

    assert_eq!(row(0).review_priority, ConfidenceTier::High);
    assert_eq!(row(0).cluster_id.as_deref(), Some("CLUSTER_000"));

    assert!(!row(1).duplicate_flag);
    assert_eq!(row(1).potential_matches, "");

    let sunrise = row(4);
    assert_eq!(sunrise.confidence_score, 70);
    assert_eq!(sunrise.review_priority, ConfidenceTier::Medium);
    assert_eq!(sunrise.cluster_id.as_deref(), Some("CLUSTER_001"));
    assert_eq!(
        sunrise.potential_matches,
        "Northwind Holdings (northwind.com) [70%]; Sunrise Supply (sunrisesupply.net) [55%]"
    );
    assert_eq!(
        sunrise.match_reason,
        "Same base domain: northwind + Low name similarity (25%)"
    );

    let last = row(5);
    assert_eq!(last.review_priority, ConfidenceTier::Low);
    assert_eq!(
        last.match_reason,
        "Low domain similarity (25%) + Exact name match"
    );

    let s = &report.summary;
    assert_eq!(s.records, 7);
    assert_eq!(s.evaluated, 6);
    assert_eq!(s.flagged, 5);
    assert_eq!((s.high, s.medium, s.low), (2, 2, 1));
    assert_eq!(s.candidate_pairs, 3);
    assert_eq!(s.cluster_sizes, vec![2, 3]);
}

#[test]
fn duplicates_stricter_tiers_split_cluster() {
    let (_, report) = run_duplicates(&strict_config());

    assert_eq!(report.candidates.len(), 2);
    assert_eq!(report.clusters.len(), 2);
    assert_eq!(report.clusters[1].members, vec![3, 4]);

    let row5 = report.rows.iter().find(|r| r.index == 5).unwrap();
    assert!(!row5.duplicate_flag);
    assert_eq!(row5.cluster_id, None);
    assert_eq!(report.summary.low, 2);
}

#[test]
fn duplicates_respect_column_mapping() {
    let toml = r#"
[duplicates.columns]
company = "company"
domain = "website"
"#;
    let config = MatchConfig::from_toml(toml).unwrap();
    let table = read_table(
        "renamed.csv",
        "company,website\nAcme Widgets,acme.com\nAcme Widget,www.acme.com\n",
    )
    .unwrap();
    let records = table.records(&config.duplicates.columns).unwrap();
    let report = detect_duplicates(&records, &config);
    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].reasons[0], "Exact domain match");

    // default mapping expects HubSpot headers
    let err = table
        .records(&MatchConfig::default().duplicates.columns)
        .unwrap_err();
    assert!(err.to_string().contains("Company name"));
}
