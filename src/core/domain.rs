use crate::error::{Result, WhoisError};

/// Trim surrounding whitespace and trailing dots.
///
/// Trailing whitespace and dots are stripped together so that `"x. ."`
/// normalizes to `"x"` in one pass and the result is a fixed point.
pub fn normalize_domain(domain: &str) -> String {
    domain
        .trim_start()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Derive `<tld>.<directory_host>` from the last label of `domain`.
pub fn default_server(domain: &str, directory_host: &str) -> Result<String> {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(WhoisError::InvalidDomain(domain.to_string()));
    }
    let tld = labels[labels.len() - 1];
    Ok(format!("{}.{}", tld, directory_host))
}
