//! # EAN-8 Code Derivation
//!
//! Derives a complete 8-digit EAN-8 code from an arbitrary input string.
//!
//! ## Derivation Rule
//!
//! ```text
//! input            "ABC123456"
//! digits only      "123456"        (non-digits stripped)
//! last six         "123456"        (left-padded with 0 if fewer)
//! data digits      "0123456"       (prefixed with 0 -> 7 digits)
//! check digit      5               (weighted sum, see below)
//! final code       "01234565"
//! ```
//!
//! ## Check Digit
//!
//! Positions 1/3/5/7 (1-indexed) weigh 3, the rest weigh 1:
//!
//! ```text
//! 3*0 + 1 + 3*2 + 3 + 3*4 + 5 + 3*6 = 45
//! check = (10 - 45 % 10) % 10 = 5
//! ```
//!
//! The output is always exactly 8 numeric digits.

/// Compute the EAN-8 check digit for 7 data digits.
///
/// Non-digit characters contribute 0 so the function is total, but callers
/// are expected to pass digits only (as [`ean8_code`] does).
///
/// ## Example
///
/// ```
/// use imprenta::zpl::ean8;
///
/// assert_eq!(ean8::check_digit("0123456"), 5);
/// ```
pub fn check_digit(data7: &str) -> u8 {
    let sum: u32 = data7
        .chars()
        .take(7)
        .enumerate()
        .map(|(i, c)| {
            let digit = c.to_digit(10).unwrap_or(0);
            // 1-indexed odd positions carry weight 3
            if i % 2 == 0 { digit * 3 } else { digit }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Derive a full 8-digit EAN-8 code from an arbitrary input string.
///
/// Keeps the last 6 ASCII digits of the input (left-padding with zeros when
/// fewer), prefixes `0` to form the 7 data digits, and appends the computed
/// check digit.
///
/// ## Example
///
/// ```
/// use imprenta::zpl::ean8;
///
/// assert_eq!(ean8::ean8_code("ABC123456"), "01234565");
/// assert_eq!(ean8::ean8_code("42").len(), 8);
/// ```
pub fn ean8_code(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();

    let last_six: String = if digits.len() >= 6 {
        digits[digits.len() - 6..].iter().collect()
    } else {
        let mut s = "0".repeat(6 - digits.len());
        s.extend(digits.iter());
        s
    };

    let data7 = format!("0{}", last_six);
    format!("{}{}", data7, check_digit(&data7))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        // "ABC123456" -> "123456" -> "0123456" -> check 5
        assert_eq!(ean8_code("ABC123456"), "01234565");
    }

    #[test]
    fn test_check_digit_worked_example() {
        // 3*0 + 1 + 3*2 + 3 + 3*4 + 5 + 3*6 = 45 -> (10 - 5) % 10 = 5
        assert_eq!(check_digit("0123456"), 5);
    }

    #[test]
    fn test_check_digit_zero_sum() {
        // Sum divisible by 10 -> check digit 0, not 10
        assert_eq!(check_digit("0000000"), 0);
    }

    #[test]
    fn test_always_eight_digits() {
        for input in ["", "x", "1", "12345", "999999999999", "a1b2c3d4"] {
            let code = ean8_code(input);
            assert_eq!(code.len(), 8, "input {:?}", input);
            assert!(code.chars().all(|c| c.is_ascii_digit()), "input {:?}", input);
        }
    }

    #[test]
    fn test_short_input_left_padded() {
        // "42" -> "000042" -> "0000042"
        let code = ean8_code("42");
        assert!(code.starts_with("0000042"));
    }

    #[test]
    fn test_long_input_keeps_last_six() {
        // Only the last 6 digits survive
        let code = ean8_code("9876543210");
        assert!(code.starts_with("0543210"));
    }

    #[test]
    fn test_self_consistency() {
        // Re-deriving the check digit from the first 7 digits of any
        // generated code reproduces the 8th digit
        for input in ["ABC123456", "7", "", "55555555", "sku-0042"] {
            let code = ean8_code(input);
            let derived = check_digit(&code[..7]);
            assert_eq!(derived, code.as_bytes()[7] - b'0', "input {:?}", input);
        }
    }

    #[test]
    fn test_check_digit_range() {
        for input in ["0", "19", "456", "808080", "31415926"] {
            let code = ean8_code(input);
            let check = code.as_bytes()[7] - b'0';
            assert!(check <= 9);
        }
    }
}
