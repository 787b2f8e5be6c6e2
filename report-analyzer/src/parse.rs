//! Total conversion from submitted measurement shapes to numbers.

use report_core::RawValue;

/// Resolves a raw measurement to a finite number, or `None` when it carries none.
///
/// Never fails: missing, empty and unreadable values are all simply absent.
pub fn parse_value(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Missing => None,
        RawValue::Quantity { value, .. } => parse_scalar(value),
        other => parse_scalar(other),
    }
}

fn parse_scalar(raw: &RawValue) -> Option<f64> {
    let number = match raw {
        RawValue::Number(value) => *value,
        RawValue::Text(text) => parse_leading_float(text)?,
        RawValue::Quantity { .. } | RawValue::Missing => return None,
    };
    number.is_finite().then_some(number)
}

/// Reads the longest numeric prefix of `text`, so `"95 mg/dL"` yields 95.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(parse_value(&RawValue::Number(14.2)), Some(14.2));
        assert_eq!(parse_value(&RawValue::Number(-3.0)), Some(-3.0));
    }

    #[test]
    fn text_uses_numeric_prefix() {
        assert_eq!(parse_value(&RawValue::from("95")), Some(95.0));
        assert_eq!(parse_value(&RawValue::from("  95 mg/dL")), Some(95.0));
        assert_eq!(parse_value(&RawValue::from("1.5e2")), Some(150.0));
        assert_eq!(parse_value(&RawValue::from("12e")), Some(12.0));
        assert_eq!(parse_value(&RawValue::from(".5")), Some(0.5));
        assert_eq!(parse_value(&RawValue::from("7.")), Some(7.0));
    }

    #[test]
    fn unreadable_text_is_absent() {
        assert_eq!(parse_value(&RawValue::from("")), None);
        assert_eq!(parse_value(&RawValue::from("   ")), None);
        assert_eq!(parse_value(&RawValue::from("high")), None);
        assert_eq!(parse_value(&RawValue::from("-")), None);
        assert_eq!(parse_value(&RawValue::from(".")), None);
    }

    #[test]
    fn quantity_unwraps_one_level() {
        assert_eq!(parse_value(&RawValue::quantity(14.2, "g/dL")), Some(14.2));

        let text_inside = RawValue::Quantity {
            value: Box::new(RawValue::from("180")),
            unit: None,
        };
        assert_eq!(parse_value(&text_inside), Some(180.0));

        let nested = RawValue::Quantity {
            value: Box::new(RawValue::quantity(1.0, "x")),
            unit: None,
        };
        assert_eq!(parse_value(&nested), None);

        let empty = RawValue::Quantity {
            value: Box::new(RawValue::Missing),
            unit: Some("mg/dL".to_string()),
        };
        assert_eq!(parse_value(&empty), None);
    }

    #[test]
    fn non_finite_is_absent() {
        assert_eq!(parse_value(&RawValue::Number(f64::NAN)), None);
        assert_eq!(parse_value(&RawValue::Number(f64::INFINITY)), None);
        assert_eq!(parse_value(&RawValue::from("1e400")), None);
        assert_eq!(parse_value(&RawValue::Missing), None);
    }
}
