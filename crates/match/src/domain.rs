use crate::config::DomainConfig;
use crate::normalize::normalize_domain;

/// Core company label of a domain: `shop.acme.co.uk` and `www.acme.com`
/// both yield `acme`.
///
/// Suffixes are stripped from the right (compound forms such as `co.uk`
/// first), then known subdomain labels from the left, never removing the
/// last remaining label. A domain whose TLD is not in the known set still
/// loses its final label. Whatever is left, the rightmost label is the core.
/// A single-label input is returned unchanged; empty input gives empty.
pub fn base_identifier(domain: &str, config: &DomainConfig) -> String {
    let cleaned = normalize_domain(domain);
    let mut labels: Vec<&str> = cleaned.split('.').filter(|l| !l.is_empty()).collect();

    let mut stripped = false;
    loop {
        let n = labels.len();
        if n > 2 {
            let tail = format!("{}.{}", labels[n - 2], labels[n - 1]);
            if config.compound_suffixes.iter().any(|s| *s == tail) {
                labels.truncate(n - 2);
                stripped = true;
                continue;
            }
        }
        if n > 1 && config.tld_labels.iter().any(|t| t == labels[n - 1]) {
            labels.pop();
            stripped = true;
            continue;
        }
        break;
    }
    if !stripped && labels.len() > 1 {
        labels.pop();
    }

    let mut start = 0;
    while labels.len() - start > 1 && config.subdomains.iter().any(|s| s == labels[start]) {
        start += 1;
    }

    labels[start..].last().map(|l| l.to_string()).unwrap_or_default()
}
