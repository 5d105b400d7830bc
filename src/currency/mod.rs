//! Amount formatting shared by every view of the ledger.

/// Number of decimal places every amount is shown with.
pub const DISPLAY_PRECISION: usize = 2;

/// Formats an amount with two decimals, e.g. `1000.00` or `-400.00`.
pub fn format_amount(value: f64) -> String {
    format!("{:.*}", DISPLAY_PRECISION, normalize_zero(value))
}

/// Formats an amount with an explicit `+` for positive values, e.g.
/// `+1000.00`, `-400.00`.
pub fn format_signed_amount(value: f64) -> String {
    let value = normalize_zero(value);
    if value > 0.0 {
        format!("+{}", format_amount(value))
    } else {
        format_amount(value)
    }
}

/// Collapses values that round to zero (including `-0.0`) to a plain `0.0`
/// so they never print as `-0.00`.
fn normalize_zero(value: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_PRECISION as i32);
    if (value * scale).round() == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_amounts_use_two_decimals() {
        assert_eq!(format_amount(1000.0), "1000.00");
        assert_eq!(format_amount(400.5), "400.50");
        assert_eq!(format_amount(-12.346), "-12.35");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn signed_amounts_prefix_positive_values() {
        assert_eq!(format_signed_amount(1000.0), "+1000.00");
        assert_eq!(format_signed_amount(-400.0), "-400.00");
        assert_eq!(format_signed_amount(0.0), "0.00");
        assert_eq!(format_signed_amount(0.004), "0.00");
    }
}
