//! Input normalization applied before scoring.

/// Trim surrounding whitespace and lower-case.
pub fn default_process(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Wrap `scorer` so both inputs pass through `processor` first.
pub fn processed<F, P>(scorer: F, processor: P) -> impl Fn(&str, &str) -> f64
where
    F: Fn(&str, &str) -> f64,
    P: Fn(&str) -> String,
{
    move |a: &str, b: &str| scorer(&processor(a), &processor(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzrank_core::ratio;

    #[test]
    fn test_default_process() {
        assert_eq!(default_process("  Hello World\n"), "hello world");
        assert_eq!(default_process(""), "");
    }

    #[test]
    fn test_processed_scorer() {
        assert!(ratio("  APPLE", "apple") < 100.0);

        let scorer = processed(ratio, default_process);
        assert_eq!(scorer("  APPLE", "apple"), 100.0);
    }

    #[test]
    fn test_custom_processor() {
        let digits_only = |s: &str| s.chars().filter(char::is_ascii_digit).collect::<String>();
        let scorer = processed(ratio, digits_only);
        assert_eq!(scorer("tel: 555-0100", "(555) 0100"), 100.0);
    }
}
