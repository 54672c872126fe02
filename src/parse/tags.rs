/// Split whitespace-separated tokens into canonical `#tag` form.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(canonical_tag)
        .filter(|t| t.len() > 1)
        .collect()
}

/// Prefix a token with `#` unless it already has one
pub fn canonical_tag(token: &str) -> String {
    let token = token.trim();
    if token.starts_with('#') {
        token.to_string()
    } else {
        format!("#{}", token)
    }
}
