//! Patient document (CPF) validation and display formatting.
//!
//! The registration form collects a CPF; the backend stores whatever it is
//! given, so structural validation happens on the client side. Only the
//! algorithm lives here; form wiring is the caller's concern.

use thiserror::Error;

/// CPF validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("CPF must contain exactly 11 digits")]
    WrongLength,

    #[error("CPF cannot be a single repeated digit")]
    RepeatedDigits,

    #[error("CPF check digits do not match")]
    CheckDigit,
}

/// Validate a CPF, ignoring punctuation
///
/// Accepts both the bare 11-digit form and the `000.000.000-00` display
/// form; anything that is not a digit is stripped before checking.
pub fn validate_cpf(input: &str) -> Result<(), DocumentError> {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return Err(DocumentError::WrongLength);
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(DocumentError::RepeatedDigits);
    }

    if check_digit(&digits[..9], 10) != digits[9] || check_digit(&digits[..10], 11) != digits[10] {
        return Err(DocumentError::CheckDigit);
    }

    Ok(())
}

/// Boolean wrapper over [`validate_cpf`]
pub fn is_valid_cpf(input: &str) -> bool {
    validate_cpf(input).is_ok()
}

/// Progressive display formatting for a partially typed CPF
///
/// Takes the digits typed so far and renders as much of the
/// `000.000.000-00` mask as they fill.
pub fn format_cpf(digits: &str) -> String {
    let d: String = digits.chars().filter(|c| c.is_ascii_digit()).collect();

    match d.len() {
        0..=3 => d,
        4..=6 => format!("{}.{}", &d[..3], &d[3..]),
        7..=9 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
        _ => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..11.min(d.len())]),
    }
}

/// Weighted modulus-11 check digit over a digit prefix
fn check_digit(digits: &[u32], initial_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (initial_weight - i as u32))
        .sum();

    let rest = sum % 11;
    if rest < 2 {
        0
    } else {
        11 - rest
    }
}
