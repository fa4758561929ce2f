//! Confidence score normalization.
//!
//! Backend scores arrive as loosely typed JSON: usually a number, sometimes a
//! numeric string, occasionally garbage. Everything that reaches a bar or a
//! chart goes through [`normalize_score`] first, which always yields a value
//! in `[0, 1]`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Longest leading float literal, the way a lenient float parser reads it.
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

/// Parse the numeric prefix of a string. `"0.75abc"` reads as `0.75`,
/// `"abc"` reads as `None`.
pub fn parse_lenient(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let literal = FLOAT_PREFIX.find(trimmed)?.as_str();

    match literal {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}

/// Clamp a float into `[0, 1]`. NaN becomes 0.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// Normalize an arbitrary JSON value into a score in `[0, 1]`.
///
/// Numbers are clamped, strings are parsed leniently then clamped, anything
/// else is 0.
pub fn normalize_score(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_lenient(s),
        _ => None,
    };
    raw.map(clamp_unit).unwrap_or(0.0)
}

/// Normalized score scaled to a percentage in `[0, 100]`.
pub fn to_percent(value: &Value) -> f64 {
    normalize_score(value) * 100.0
}

/// Two-decimal percentage text, e.g. `"92.00%"`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_are_clamped() {
        assert_eq!(normalize_score(&json!(0.42)), 0.42);
        assert_eq!(normalize_score(&json!(1.5)), 1.0);
        assert_eq!(normalize_score(&json!(-3)), 0.0);
        assert_eq!(normalize_score(&json!(0)), 0.0);
        assert_eq!(normalize_score(&json!(1)), 1.0);
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        assert_eq!(normalize_score(&json!("0.25")), 0.25);
        assert_eq!(normalize_score(&json!("  0.5")), 0.5);
        assert_eq!(normalize_score(&json!("0.75abc")), 0.75);
        assert_eq!(normalize_score(&json!("7")), 1.0);
        assert_eq!(normalize_score(&json!("-0.2")), 0.0);
        assert_eq!(normalize_score(&json!(".5")), 0.5);
        assert_eq!(normalize_score(&json!("2e-1")), 0.2);
    }

    #[test]
    fn test_non_numeric_is_zero() {
        assert_eq!(normalize_score(&json!("bad")), 0.0);
        assert_eq!(normalize_score(&json!("")), 0.0);
        assert_eq!(normalize_score(&json!(null)), 0.0);
        assert_eq!(normalize_score(&json!(true)), 0.0);
        assert_eq!(normalize_score(&json!({"score": 0.5})), 0.0);
        assert_eq!(normalize_score(&json!([0.5])), 0.0);
    }

    #[test]
    fn test_infinity_strings() {
        assert_eq!(normalize_score(&json!("Infinity")), 1.0);
        assert_eq!(normalize_score(&json!("-Infinity")), 0.0);
        assert_eq!(parse_lenient("NaN"), None);
    }

    #[test]
    fn test_always_in_unit_range() {
        let samples = [
            json!(-1e308),
            json!(1e308),
            json!(0.999_999),
            json!("1e400"),
            json!("-1e400"),
            json!("12.5%"),
            json!("0x10"),
        ];
        for sample in samples {
            let s = normalize_score(&sample);
            assert!((0.0..=1.0).contains(&s), "{} -> {}", sample, s);
        }
    }

    #[test]
    fn test_clamp_unit_nan() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(format_percent(to_percent(&json!(0.92))), "92.00%");
        assert_eq!(format_percent(to_percent(&json!(1.5))), "100.00%");
        assert_eq!(format_percent(to_percent(&json!("junk"))), "0.00%");
    }
}
