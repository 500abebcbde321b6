//! Log sanitization helpers
//!
//! Keeps large API response bodies (full zone listings can be tens of
//! kilobytes) from flooding debug logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for safe logging.
///
/// Strings within the limit pass through unchanged; longer ones are cut
/// at the last character boundary at or below `TRUNCATE_LIMIT`, with a
/// suffix noting the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let mut cut = 0;
    for (idx, _) in s.char_indices() {
        if idx > TRUNCATE_LIMIT {
            break;
        }
        cut = idx;
    }
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_for_log("hello"), "hello");
    }

    #[test]
    fn long_strings_are_truncated() {
        let long = "x".repeat(1000);
        let out = truncate_for_log(&long);
        assert!(out.starts_with(&"x".repeat(256)));
        assert!(out.ends_with("[truncated, total 1000 bytes]"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "ä".repeat(300);
        let out = truncate_for_log(&long);
        assert!(out.contains("[truncated"));
    }
}
