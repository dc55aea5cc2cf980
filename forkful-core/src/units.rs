//! Fixed-factor measurement conversion.
//!
//! Only four unit pairs are defined. Every other pair, including any
//! identity pair, falls through to a factor of 1: the input amount comes
//! back unchanged and callers get no failure signal.
//!
//! The factors are rounded to four significant figures and the gram/cup
//! pair conflates mass and volume. Both are long-standing observable
//! behavior; keep them verbatim.

const OZ_PER_GRAM: f64 = 0.0353;
const GRAMS_PER_OZ: f64 = 28.3495;
const CUPS_PER_GRAM: f64 = 0.004226;
const GRAMS_PER_CUP: f64 = 236.588;

/// Convert `amount` from one measurement unit to another.
///
/// Unknown pairs (and `from_unit == to_unit`) return the amount unchanged.
/// Unit names are not validated; any two strings are accepted.
pub fn convert(amount: f64, from_unit: &str, to_unit: &str) -> f64 {
    let factor = match (from_unit, to_unit) {
        ("g", "oz") => OZ_PER_GRAM,
        ("oz", "g") => GRAMS_PER_OZ,
        ("g", "cup") => CUPS_PER_GRAM,
        ("cup", "g") => GRAMS_PER_CUP,
        _ => 1.0,
    };
    amount * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_grams_to_ounces() {
        assert_close(convert(100.0, "g", "oz"), 3.53);
    }

    #[test]
    fn test_ounces_to_grams() {
        assert_close(convert(1.0, "oz", "g"), 28.3495);
    }

    #[test]
    fn test_grams_to_cups() {
        assert_close(convert(100.0, "g", "cup"), 0.4226);
    }

    #[test]
    fn test_cups_to_grams() {
        assert_close(convert(2.0, "cup", "g"), 473.176);
    }

    #[test]
    fn test_unknown_pair_is_identity() {
        assert_close(convert(7.5, "tbsp", "ml"), 7.5);
        assert_close(convert(3.0, "", "g"), 3.0);
    }

    #[test]
    fn test_identity_pair_is_identity() {
        // No defined pair has from == to, so these always hit the
        // default factor, even for units that appear in the table.
        assert_close(convert(42.0, "g", "g"), 42.0);
        assert_close(convert(42.0, "oz", "oz"), 42.0);
        assert_close(convert(42.0, "cup", "cup"), 42.0);
        assert_close(convert(42.0, "furlong", "furlong"), 42.0);
    }

    #[test]
    fn test_reverse_of_undefined_direction_is_identity() {
        // Only the four listed directions convert; e.g. oz -> cup is not
        // defined in either direction.
        assert_close(convert(5.0, "oz", "cup"), 5.0);
        assert_close(convert(5.0, "cup", "oz"), 5.0);
    }
}
