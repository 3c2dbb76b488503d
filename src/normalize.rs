//! Whitespace normalization for raw remarks.

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// Returns a new string; the input is left untouched.
pub fn normalize_remark(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_tabs_and_spaces() {
        assert_eq!(normalize_remark("  UPI/12\t\t34 /  John   Doe \n"), "UPI/12 34 / John Doe");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_remark(""), "");
        assert_eq!(normalize_remark(" \t\r\n "), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = ["NEFT-HDFC123456789012-RAVI  SHAH", "\tCLG/ A /B", "plain", ""];
        for input in inputs {
            let once = normalize_remark(input);
            assert_eq!(normalize_remark(&once), once);
        }
    }
}
