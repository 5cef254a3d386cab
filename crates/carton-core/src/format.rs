//! # Format Module
//!
//! Locale-style number formatting for cart output boundaries.
//!
//! ## Where Formatting Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Pricing folds run on raw f64 values, start to finish.             │
//! │                                                                     │
//! │  price ──► conditions fold ──► × quantity ──► Σ items ──► total    │
//! │                                                              │      │
//! │                                                              ▼      │
//! │                                               format_amount() here  │
//! │                                                                     │
//! │  Formatting NEVER happens mid-fold; only the outermost `_formatted`│
//! │  accessor renders a string.                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Format Config
// =============================================================================

/// Display/formatting options for monetary output.
///
/// Threaded through the cart constructor and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Whether `_formatted` accessors format at all. When false they
    /// render the plain float.
    pub format_numbers: bool,

    /// Number of decimal places to keep.
    pub decimals: u8,

    /// Decimal separator, e.g. "." or ",".
    pub dec_point: String,

    /// Thousands separator, e.g. "," or " ".
    pub thousands_sep: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            format_numbers: true,
            decimals: 2,
            dec_point: ".".to_string(),
            thousands_sep: ",".to_string(),
        }
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount according to the configuration.
///
/// Rounds half away from zero to `decimals` places, keeps the decimal
/// count fixed, and groups the integer part in threes.
///
/// ## Example
/// ```rust
/// use carton_core::format::{format_amount, FormatConfig};
///
/// let config = FormatConfig::default();
/// assert_eq!(format_amount(1234567.891, &config), "1,234,567.89");
/// assert_eq!(format_amount(0.5, &config), "0.50");
/// ```
pub fn format_amount(value: f64, config: &FormatConfig) -> String {
    if !config.format_numbers {
        return value.to_string();
    }

    let factor = 10f64.powi(i32::from(config.decimals));
    // f64::round rounds half away from zero, matching the reference output.
    let rounded = (value.abs() * factor).round() / factor;
    let negative = value < 0.0 && rounded != 0.0;

    let fixed = format!("{:.*}", usize::from(config.decimals), rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.len();
    let mut out = String::with_capacity(fixed.len() + digits / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push_str(&config.thousands_sep);
        }
        out.push(digit);
    }
    if let Some(frac_part) = frac_part {
        out.push_str(&config.dec_point);
        out.push_str(frac_part);
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormatConfig::default();
        assert!(config.format_numbers);
        assert_eq!(config.decimals, 2);
        assert_eq!(config.dec_point, ".");
        assert_eq!(config.thousands_sep, ",");
    }

    #[test]
    fn test_grouping_and_fixed_decimals() {
        let config = FormatConfig::default();
        assert_eq!(format_amount(0.0, &config), "0.00");
        assert_eq!(format_amount(5.0, &config), "5.00");
        assert_eq!(format_amount(1234567.891, &config), "1,234,567.89");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 0.125 is exactly representable, so this exercises the tie case.
        let config = FormatConfig::default();
        assert_eq!(format_amount(0.125, &config), "0.13");
        assert_eq!(format_amount(-0.125, &config), "-0.13");
    }

    #[test]
    fn test_custom_separators() {
        let config = FormatConfig {
            format_numbers: true,
            decimals: 2,
            dec_point: ",".to_string(),
            thousands_sep: ".".to_string(),
        };
        assert_eq!(format_amount(1234.5, &config), "1.234,50");
    }

    #[test]
    fn test_zero_decimals() {
        let config = FormatConfig {
            format_numbers: true,
            decimals: 0,
            dec_point: ".".to_string(),
            thousands_sep: ",".to_string(),
        };
        assert_eq!(format_amount(1234.56, &config), "1,235");
    }

    #[test]
    fn test_formatting_disabled() {
        let config = FormatConfig {
            format_numbers: false,
            ..FormatConfig::default()
        };
        assert_eq!(format_amount(1234.5, &config), "1234.5");
    }

    #[test]
    fn test_negative_rounding_to_zero_drops_sign() {
        let config = FormatConfig::default();
        assert_eq!(format_amount(-0.001, &config), "0.00");
    }
}
