//! Templates compiled into the binary.

/// `(name, source)` pairs for every built-in template.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("get_balances", include_str!("../templates/get_balances.j2")),
    ("get_fees", include_str!("../templates/get_fees.j2")),
    ("get_network_status", include_str!("../templates/get_network_status.j2")),
    ("list_chains", include_str!("../templates/list_chains.j2")),
    ("list_tokens", include_str!("../templates/list_tokens.j2")),
    ("request_faucet", include_str!("../templates/request_faucet.j2")),
];

/// Looks up a built-in template source by file name (`<name>.j2`).
pub fn source(file_name: &str) -> Option<&'static str> {
    let name = file_name.strip_suffix(".j2")?;
    TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, source)| *source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_requires_extension() {
        assert!(source("get_balances.j2").is_some());
        assert!(source("get_balances").is_none());
        assert!(source("nonexistent.j2").is_none());
    }
}
