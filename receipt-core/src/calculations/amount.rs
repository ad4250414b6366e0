//! Fee parsing and payable-amount computation.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::models::{PaymentInput, PaymentType};

/// Error returned when a fee field does not hold a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid fee '{input}': {reason}")]
pub struct ParseFeeError {
    input: String,
    reason: String,
}

/// Plain digits, or digits in `,`-separated groups of three, with an
/// optional fractional part.
static FEE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+|\d{1,3}(,\d{3})+)(\.\d+)?$").expect("fee pattern is valid")
});

/// Parses a fee field into a [`Decimal`].
///
/// The text must match the fee layout exactly: `"1500"`, `"1,500"` and
/// `"2500.50"` parse; signs, `_`, stray separators and surrounding
/// whitespace do not. Empty input is an error; callers that want a default
/// use [`fee_or_zero`].
pub fn parse_fee(s: &str) -> Result<Decimal, ParseFeeError> {
    if !FEE_PATTERN.is_match(s) {
        return Err(ParseFeeError {
            input: s.to_string(),
            reason: "expected digits with optional `,` thousands groups".to_string(),
        });
    }
    s.replace(',', "")
        .parse()
        .map_err(|e: rust_decimal::Error| ParseFeeError {
            input: s.to_string(),
            reason: e.to_string(),
        })
}

/// Returns `true` for text that parses as a fee of zero or more.
///
/// This is the acceptance check for amounts that are printed as entered.
pub fn is_non_negative_fee(s: &str) -> bool {
    parse_fee(s).is_ok_and(|fee| fee >= Decimal::ZERO)
}

/// Parses a fee, treating empty or non-numeric text as zero.
pub fn fee_or_zero(s: &str) -> Decimal {
    if s.trim().is_empty() {
        return Decimal::ZERO;
    }
    parse_fee(s).unwrap_or_else(|e| {
        warn!(input = %s, error = %e, "non-numeric fee treated as zero");
        Decimal::ZERO
    })
}

/// Formats an amount without trailing fractional zeros (`700.50` -> `700.5`).
pub fn format_fee(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Computes the payable amount for the submitted payment fields.
///
/// | Input                 | Amount                                         |
/// |-----------------------|------------------------------------------------|
/// | flat                  | the entered amount exactly as entered          |
/// | `monthly`             | the monthly fee exactly as entered             |
/// | `newStudent`          | admission fee + monthly fee, non-numeric as 0  |
/// | no valid payment type | `"0"`                                          |
///
/// # Example
///
/// ```
/// use receipt_core::{PaymentInput, calculations::calculate_total_amount};
///
/// let input = PaymentInput::Typed {
///     payment_type: "newStudent".to_string(),
///     monthly_fee: String::new(),
///     admission_fee: "500".to_string(),
///     new_student_monthly_fee: "200".to_string(),
/// };
///
/// assert_eq!(calculate_total_amount(&input), "700");
/// ```
pub fn calculate_total_amount(payment: &PaymentInput) -> String {
    match payment {
        PaymentInput::Flat { payment_amount } => payment_amount.clone(),
        PaymentInput::Typed {
            monthly_fee,
            admission_fee,
            new_student_monthly_fee,
            ..
        } => match payment.payment_type() {
            Some(PaymentType::Monthly) => monthly_fee.clone(),
            Some(PaymentType::NewStudent) => {
                format_fee(fee_or_zero(admission_fee) + fee_or_zero(new_student_monthly_fee))
            }
            None => "0".to_string(),
        },
    }
}
