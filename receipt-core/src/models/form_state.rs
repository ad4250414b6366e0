use serde::{Deserialize, Serialize};

use super::{MonthSelection, PaymentInput};
use crate::selection::SelectionSet;

/// The live, editable payment entry.
///
/// Text fields hold exactly what was typed or picked; nothing is parsed until
/// the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub student_name: String,
    pub district: String,
    pub grade: String,
    pub subjects: SelectionSet<String>,
    pub months: SelectionSet<MonthSelection>,
    /// ISO calendar date (`YYYY-MM-DD`) as produced by a date input.
    pub date: String,
    pub payment: PaymentInput,
}

impl FormState {
    /// An empty form whose payment fields take the shape of `payment`.
    pub fn empty(payment: PaymentInput) -> Self {
        Self {
            student_name: String::new(),
            district: String::new(),
            grade: String::new(),
            subjects: SelectionSet::new(),
            months: SelectionSet::new(),
            date: String::new(),
            payment,
        }
    }

    /// Clears every field, keeping the payment fields' variant.
    pub fn reset(&mut self) {
        let payment = match self.payment {
            PaymentInput::Flat { .. } => PaymentInput::empty_flat(),
            PaymentInput::Typed { .. } => PaymentInput::empty_typed(),
        };
        *self = Self::empty(payment);
    }
}
