//! Currency text formatting.

use super::error::{HouseError, HouseResult};

/// Format `value` with comma thousands separators and two decimals, e.g. `1,234.50`.
///
/// Negative values keep the sign in front of the digits (`-1,234.50`). Non-finite
/// values have no sensible currency rendering and are rejected.
pub fn group_thousands(value: f64) -> HouseResult<String> {
    if !value.is_finite() {
        return Err(HouseError::inference(format!(
            "model produced a non-finite value ({value})"
        )));
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    // Sign follows the value, not the rounded digits: -0.001 renders as -0.00.
    if value.is_sign_negative() {
        out.push('-');
    }
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('.');
    out.push_str(frac_part);
    Ok(out)
}

/// Render the text shown in the output region for a predicted price.
pub fn prediction_text(price: f64) -> HouseResult<String> {
    Ok(format!("Prediction: ${}", group_thousands(price)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_three() {
        assert_eq!(group_thousands(0.0).unwrap(), "0.00");
        assert_eq!(group_thousands(999.999).unwrap(), "1,000.00");
        assert_eq!(group_thousands(1234.5).unwrap(), "1,234.50");
        assert_eq!(group_thousands(540_088.14).unwrap(), "540,088.14");
        assert_eq!(group_thousands(7_700_000.0).unwrap(), "7,700,000.00");
        assert_eq!(group_thousands(123_456_789.01).unwrap(), "123,456,789.01");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(group_thousands(-1234.5).unwrap(), "-1,234.50");
        assert_eq!(group_thousands(-0.001).unwrap(), "-0.00");
        assert_eq!(prediction_text(-0.001).unwrap(), "Prediction: $-0.00");
    }

    #[test]
    fn prediction_text_prefix() {
        assert_eq!(prediction_text(450_000.0).unwrap(), "Prediction: $450,000.00");
    }

    #[test]
    fn non_finite_is_an_inference_error() {
        assert!(matches!(group_thousands(f64::NAN), Err(HouseError::Inference(_))));
        assert!(matches!(group_thousands(f64::INFINITY), Err(HouseError::Inference(_))));
    }
}
