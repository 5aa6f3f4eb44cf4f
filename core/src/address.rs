//! Resolution of caller endpoints against the configured base address.

/// Resolve `endpoint` against `base_address`.
///
/// Absolute endpoints (`<scheme>://...`) are returned unchanged, as are all
/// endpoints when the base is empty. Otherwise the two are joined with a
/// single `/` unless the endpoint already starts with one. No other slash
/// normalization happens.
pub fn build_address(endpoint: &str, base_address: &str) -> String {
    if is_absolute(endpoint) || base_address.is_empty() {
        return endpoint.to_string();
    }
    if endpoint.starts_with('/') {
        format!("{base_address}{endpoint}")
    } else {
        format!("{base_address}/{endpoint}")
    }
}

/// True when `endpoint` starts with a URI scheme followed by `://`.
pub fn is_absolute(endpoint: &str) -> bool {
    let Some((scheme, _)) = endpoint.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
