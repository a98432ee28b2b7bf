//! Numeric coercion for loosely-typed pricing data.
//!
//! Agreement records and catalog rate fields arrive as JSON numbers or as
//! localized strings ("$ 1.234,56", "1,234.56", "1500"). Every parse in this
//! module is total: bad input coerces to `None`, never to NaN or a panic,
//! because partially configured pricing data is a normal operating condition.

use serde_json::Value;

/// Parse a money-like string tolerant of currency symbols and of either `,`
/// or `.` acting as the decimal separator.
///
/// Separator rules:
/// - both `.` and `,` present: the one occurring last is the decimal
///   separator, the other is a thousands separator and is dropped;
/// - one separator kind appearing more than once: thousands separator;
/// - a single occurrence followed by exactly three digits is read as a
///   thousands separator ("1.500" -> 1500), anything else as the decimal
///   separator ("2,5" -> 2.5).
pub fn parse_flexible(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let negative = trimmed.starts_with('-');

    let kept: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
        .collect();
    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let dots = kept.matches('.').count();
    let commas = kept.matches(',').count();

    let normalized = if dots > 0 && commas > 0 {
        let last_dot = kept.rfind('.').unwrap();
        let last_comma = kept.rfind(',').unwrap();
        let (decimal, thousands) = if last_dot > last_comma {
            ('.', ',')
        } else {
            (',', '.')
        };
        kept.replace(thousands, "").replace(decimal, ".")
    } else if dots + commas == 0 {
        kept
    } else {
        let separator = if dots > 0 { '.' } else { ',' };
        if dots + commas > 1 {
            kept.replace(separator, "")
        } else {
            let position = kept.rfind(separator).unwrap();
            let trailing_digits = kept.len() - position - 1;
            if trailing_digits == 3 {
                kept.replace(separator, "")
            } else {
                kept.replace(separator, ".")
            }
        }
    };

    let value: f64 = normalized.parse().ok()?;
    let value = if negative { -value } else { value };
    value.is_finite().then_some(value)
}

/// Coerce a loosely-typed JSON value into a finite number.
pub fn coerce_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_flexible(s),
        _ => None,
    }
}

/// Format an amount for display in the local convention: thousands `.`,
/// decimal `,`, two decimals. Applied only at the display boundary; all
/// intermediate arithmetic keeps full f64 precision.
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, c) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}$ {},{:02}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_flexible("1500"), Some(1500.0));
        assert_eq!(parse_flexible("  42  "), Some(42.0));
        assert_eq!(parse_flexible("-250"), Some(-250.0));
    }

    #[test]
    fn test_parse_both_separators_either_order() {
        // Same magnitude written both ways must agree.
        assert_eq!(parse_flexible("1.234,56"), Some(1234.56));
        assert_eq!(parse_flexible("1,234.56"), Some(1234.56));
        assert_eq!(parse_flexible("12.345.678,9"), Some(12345678.9));
        assert_eq!(parse_flexible("12,345,678.9"), Some(12345678.9));
    }

    #[test]
    fn test_parse_single_separator() {
        // Exactly three trailing digits reads as a thousands separator.
        assert_eq!(parse_flexible("1.500"), Some(1500.0));
        assert_eq!(parse_flexible("1,500"), Some(1500.0));
        // Anything else reads as the decimal separator.
        assert_eq!(parse_flexible("2,5"), Some(2.5));
        assert_eq!(parse_flexible("2.75"), Some(2.75));
        // Repeated separators are always thousands groups.
        assert_eq!(parse_flexible("1.234.567"), Some(1234567.0));
    }

    #[test]
    fn test_parse_currency_noise() {
        assert_eq!(parse_flexible("$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_flexible("ARS 1500"), Some(1500.0));
        assert_eq!(parse_flexible("$-120,50"), Some(120.50));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(parse_flexible(""), None);
        assert_eq!(parse_flexible("   "), None);
        assert_eq!(parse_flexible("sin valor"), None);
        assert_eq!(parse_flexible("$"), None);
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value(&json!(1224.11)), Some(1224.11));
        assert_eq!(coerce_value(&json!("1.224,11")), Some(1224.11));
        assert_eq!(coerce_value(&json!(null)), None);
        assert_eq!(coerce_value(&json!(true)), None);
        assert_eq!(coerce_value(&json!({"valor": 1})), None);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "$ 1.234,56");
        assert_eq!(format_money(0.0), "$ 0,00");
        assert_eq!(format_money(1500.0), "$ 1.500,00");
        assert_eq!(format_money(-42.5), "-$ 42,50");
        assert_eq!(format_money(1234567.891), "$ 1.234.567,89");
    }
}
