//! Loads the payment form from a TOML document.
//!
//! The document stands in for a user filling the form field by field:
//!
//! ```toml
//! student_name = "Anne O'Neil"
//! district = "Colombo"
//! grade = "Grade 2"
//! date = "2024-03-05"
//! subjects = ["Violin"]          # only for deployments that collect them
//!
//! [[months]]
//! month = "March"                # full name or "Mar"
//! year = 2024
//!
//! [payment]
//! policy = "flat"
//! payment_amount = "3000"
//! ```
//!
//! Missing fields stay empty so that validation reports them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use receipt_core::{MonthSelection, PaymentInput, PaymentSession, SelectionSet};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FormFileError {
    #[error("cannot read form '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid form document: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormDocument {
    pub student_name: String,
    pub district: String,
    pub grade: String,
    pub date: String,
    pub subjects: SelectionSet<String>,
    pub months: SelectionSet<MonthSelection>,
    /// Absent means the deployment's empty payment fields.
    pub payment: Option<PaymentInput>,
}

impl FormDocument {
    pub fn from_toml_str(s: &str) -> Result<Self, FormFileError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, FormFileError> {
        let text = fs::read_to_string(path).map_err(|source| FormFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Enters the document into the session's form.
    ///
    /// Months and subjects go through the accumulator one at a time, so the
    /// session sees the same de-duplicated selections a user would build.
    pub fn apply(
        self,
        session: &mut PaymentSession,
    ) {
        let payment = self
            .payment
            .unwrap_or_else(|| session.catalog().empty_payment());

        let form = session.form_mut();
        form.student_name = self.student_name;
        form.district = self.district;
        form.grade = self.grade;
        form.date = self.date;
        form.payment = payment;

        for selection in &self.months {
            if !form.is_month_selected(selection.month, selection.year) {
                form.toggle_month(selection.month, selection.year);
            }
        }
        for subject in &self.subjects {
            if !form.subjects.contains(subject) {
                form.toggle_subject(subject);
            }
        }
        debug!(
            months = form.months.len(),
            subjects = form.subjects.len(),
            "form document applied"
        );
    }
}
