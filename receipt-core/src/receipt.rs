//! Printable receipt derived from an [`Invoice`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    format::{format_amount, format_date, format_months, receipt_file_name},
    models::Invoice,
};

/// School identity and fixed wording printed on every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub school_name: String,
    pub subtitle: String,
    pub currency_prefix: String,
    pub currency_suffix: String,
    pub payment_note: String,
    pub thank_you: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            school_name: "ARADENA".to_string(),
            subtitle: "SCHOOL of Music".to_string(),
            currency_prefix: "Rs.".to_string(),
            currency_suffix: "/=".to_string(),
            payment_note: "Note: Kindly pay your fee before 10th of every month.".to_string(),
            thank_you: "Thank You For Your Payment!".to_string(),
        }
    }
}

/// Text content of a receipt, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptView {
    pub school_name: String,
    pub subtitle: String,
    pub date_line: String,
    /// Lines of the "Payment Details" box, in display order.
    pub details: Vec<String>,
    pub amount: String,
    pub payment_note: String,
    pub thank_you: String,
    pub file_name: String,
}

impl ReceiptView {
    pub fn new(
        invoice: &Invoice,
        branding: &Branding,
    ) -> Self {
        let mut details = vec![
            format!("Student Name: {}", invoice.student_name),
            format!("Grade: {}", invoice.grade),
        ];
        if !invoice.subjects.is_empty() {
            details.push(format!("Subjects: {}", invoice.subjects.join(", ")));
        }
        details.push(format!("Paid Month: {}", format_months(&invoice.months)));
        details.push(invoice.district.to_string());

        Self {
            school_name: branding.school_name.clone(),
            subtitle: branding.subtitle.clone(),
            date_line: format!("Date: {}", format_date(invoice.date)),
            details,
            amount: format_amount(
                &invoice.payment_amount,
                &branding.currency_prefix,
                &branding.currency_suffix,
            ),
            payment_note: branding.payment_note.clone(),
            thank_you: branding.thank_you.clone(),
            file_name: receipt_file_name(&invoice.student_name, invoice.date),
        }
    }
}

impl fmt::Display for ReceiptView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.school_name)?;
        writeln!(f, "{}", self.subtitle)?;
        writeln!(f)?;
        writeln!(f, "Receipt    {}", self.date_line)?;
        writeln!(f)?;
        writeln!(f, "Payment Details:")?;
        for line in &self.details {
            writeln!(f, "  {line}")?;
        }
        writeln!(f)?;
        writeln!(f, "Amount")?;
        writeln!(f, "  {}", self.amount)?;
        writeln!(f)?;
        writeln!(f, "{}", self.payment_note)?;
        write!(f, "{}", self.thank_you)
    }
}
