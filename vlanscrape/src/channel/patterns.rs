//! Prompt pattern helpers.

use regex::bytes::Regex;

/// Combine several prompt regexes into one alternation that matches any of them.
///
/// Each pattern is wrapped in a non-capturing group so inline flags such as
/// `(?m)` stay scoped to their own alternative.
pub fn combine_prompt_patterns<'a>(
    patterns: impl IntoIterator<Item = &'a Regex>,
) -> Result<Regex, regex::Error> {
    let combined: Vec<String> = patterns
        .into_iter()
        .map(|p| format!("(?:{})", p.as_str()))
        .collect();

    Regex::new(&combined.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_matches_either_prompt() {
        let exec = Regex::new(r"(?m)^[\w.\-]{1,63}>\s?$").unwrap();
        let privileged = Regex::new(r"(?m)^[\w.\-]{1,63}#\s?$").unwrap();
        let combined = combine_prompt_patterns([&exec, &privileged]).unwrap();

        assert!(combined.is_match(b"access-sw2>"));
        assert!(combined.is_match(b"output line\r\naccess-sw2#"));
        assert!(!combined.is_match(b"access-sw2$"));
    }
}
