//! Amount calculations for submitted payments.
//!
//! Fee fields arrive as raw text; this module turns them into the payable
//! amount shown on the receipt.

pub mod amount;

pub use amount::{
    ParseFeeError, calculate_total_amount, fee_or_zero, format_fee, is_non_negative_fee,
    parse_fee,
};
