use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{District, MonthSelection, PaymentInput};

/// A validated payment, frozen at submit time.
///
/// Invoices are only produced by [`crate::InvoiceBuilder`] and are never
/// mutated afterwards; a later submit replaces the displayed invoice
/// wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub student_name: String,
    pub district: District,
    pub grade: String,
    /// Empty when the deployment does not collect subjects.
    pub subjects: Vec<String>,
    /// Selected months in the order they were picked.
    pub months: Vec<MonthSelection>,
    pub date: NaiveDate,
    pub payment: PaymentInput,
    /// Non-negative amount, formatted without trailing zeros.
    pub payment_amount: String,
}
