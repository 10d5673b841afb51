//! Number and amount formatting shared by the report cards and charts.

/// Render `value` rounded to `decimals` places, with `,` between every group
/// of three integer digits.
///
/// ```
/// use funding_core::formatting::format_number;
///
/// assert_eq!(format_number(5495.2, 0), "5,495");
/// assert_eq!(format_number(184.0, 1), "184.0");
/// assert_eq!(format_number(-12500.25, 2), "-12,500.25");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let factor = 10_f64.powi(decimals as i32);
    let scaled = value.abs() * factor;
    // Relative nudge so exact binary midpoints round up.
    let magnitude = (scaled + f64::EPSILON * scaled).round() / factor;

    let fixed = format!("{:.*}", decimals as usize, magnitude);
    let (digits, fraction) = match fixed.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if value < 0.0 && magnitude != 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(digits));
    if let Some(frac) = fraction {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an amount in crore, rounded to `decimals`, e.g. `"1,234 Cr"`.
///
/// # Examples
///
/// ```
/// use funding_core::formatting::format_crore;
///
/// assert_eq!(format_crore(1234.4, 0), "1,234 Cr");
/// assert_eq!(format_crore(20.5, 1), "20.5 Cr");
/// ```
pub fn format_crore(amount: f64, decimals: u32) -> String {
    format!("{} Cr", format_number(amount, decimals))
}

/// Format an amount in crore keeping its significant decimals (at most two),
/// the way a raw value is shown: `300.0` → `"300 Cr"`, `20.25` → `"20.25 Cr"`.
pub fn format_crore_exact(amount: f64) -> String {
    let hundredths = (amount * 100.0).round();
    let decimals = if hundredths % 100.0 == 0.0 {
        0
    } else if hundredths % 10.0 == 0.0 {
        1
    } else {
        2
    };
    format_crore(amount, decimals)
}

/// Share of `part` in `whole` as a percentage, rounded to `decimal_places`.
/// A zero `whole` gives `0.0`.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let factor = 10_f64.powi(decimal_places as i32);
    (part / whole * 100.0 * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// `"1234567"` → `"1,234,567"`.
fn group_thousands(digits: &str) -> String {
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_000.0, 0), "1,000");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_number(-0.2, 0), "0");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
        assert_eq!(format_number(2.5, 0), "3");
    }

    // ── format_crore ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_crore_rounded() {
        assert_eq!(format_crore(45_123.6, 0), "45,124 Cr");
    }

    #[test]
    fn test_format_crore_exact_drops_trailing_zeros() {
        assert_eq!(format_crore_exact(300.0), "300 Cr");
        assert_eq!(format_crore_exact(20.5), "20.5 Cr");
        assert_eq!(format_crore_exact(20.25), "20.25 Cr");
        assert_eq!(format_crore_exact(3_900.0), "3,900 Cr");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        let p = percentage(50.0, 200.0, 1);
        assert!((p - 25.0).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0, 2), 0.0);
    }

    #[test]
    fn test_percentage_rounding() {
        let p = percentage(1.0, 3.0, 1);
        assert!((p - 33.3).abs() < 1e-9, "percentage = {p}");
    }
}
