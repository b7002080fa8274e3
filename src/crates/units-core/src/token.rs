/// Characters reserved by the unit grammar for operators and numbers
///
/// A unit token containing none of these cannot be decomposed further.
pub const RESERVED_CHARS: &str = "0123456789.*/^()";

/// Check whether a string is a fully-simplified unit token
pub fn is_simple_token(token: &str) -> bool {
    !token.chars().any(|c| RESERVED_CHARS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        assert!(is_simple_token("kg"));
        assert!(is_simple_token("degC_diff"));
        assert!(is_simple_token("μm"));
        assert!(is_simple_token(""));
    }

    #[test]
    fn test_compound_tokens() {
        assert!(!is_simple_token("m/s"));
        assert!(!is_simple_token("(m)"));
        assert!(!is_simple_token("m2"));
        assert!(!is_simple_token("kg.m"));
    }
}
