//! Currency string normalization.

/// Strips currency symbols and grouping separators, keeping digits and
/// decimal points in order: `$3,453.23` becomes `3453.23`.
///
/// No numeric validation happens here.  Empty input stays empty, and input
/// with no digits at all collapses to the empty string; whatever survives is
/// written to the output verbatim.
pub fn normalize_currency(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

#[cfg(test)]
mod test {
    use super::normalize_currency;
    use rstest::rstest;

    #[rstest]
    #[case("$3,453.23", "3453.23")]
    #[case("$1,000,000.00", "1000000.00")]
    #[case("$0.01", "0.01")]
    #[case("$5", "5")]
    #[case::no_symbol("255.00", "255.00")]
    #[case::stray_text("USD 12.50", "12.50")]
    #[case::empty("", "")]
    #[case::no_digits("free", "")]
    fn strips_to_bare_numerals(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_currency(input), expected);
    }

    #[test]
    fn stripping_is_idempotent() {
        for input in ["$3,453.23", "", "free", "1.2.3", "$", "12,34"] {
            let once = normalize_currency(input);
            assert_eq!(normalize_currency(&once), once);
        }
    }
}
