//! Formatted output helpers for CLI commands.

/// Formats an optional length in millimetres with two decimals, or `-`.
#[must_use]
pub fn format_mm(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mm_rounds_to_two_decimals() {
        assert_eq!(format_mm(Some(14.3781)), "14.38");
        assert_eq!(format_mm(Some(9.0)), "9.00");
    }

    #[test]
    fn format_mm_marks_missing_values() {
        assert_eq!(format_mm(None), "-");
    }
}
