//! Turns a submitted form into an immutable [`Invoice`].
//!
//! Building is all-or-nothing: either every rule in
//! [`crate::validation::validate`] passes and an invoice comes back, or the
//! full set of field errors does and nothing is built.
//!
//! # Example
//!
//! ```
//! use receipt_core::{Catalog, InvoiceBuilder, Month, PaymentInput};
//!
//! let catalog = Catalog::flat_amount();
//! let mut form = catalog.empty_form();
//! form.student_name = "Anne O'Neil".to_string();
//! form.district = "Colombo".to_string();
//! form.grade = "Grade 2".to_string();
//! form.toggle_month(Month::March, 2024);
//! form.date = "2024-03-05".to_string();
//! form.payment = PaymentInput::Flat { payment_amount: "3000".to_string() };
//!
//! let invoice = InvoiceBuilder::new(&catalog).build(&form).unwrap();
//!
//! assert_eq!(invoice.payment_amount, "3000");
//! ```

use tracing::{debug, warn};

use crate::{
    calculations::calculate_total_amount,
    catalog::Catalog,
    models::{FormState, Invoice},
    validation::{ValidationErrors, check_form},
};

/// Validates forms against a deployment's [`Catalog`] and builds invoices.
#[derive(Debug, Clone)]
pub struct InvoiceBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> InvoiceBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Validates `form` and, if every rule passes, snapshots it into an
    /// [`Invoice`] with the computed payment amount.
    ///
    /// # Errors
    ///
    /// Returns every failing field as [`ValidationErrors`]. The form is
    /// never modified.
    pub fn build(
        &self,
        form: &FormState,
    ) -> Result<Invoice, ValidationErrors> {
        let checked = check_form(form, self.catalog).inspect_err(|errors| {
            warn!(
                failing = errors.len(),
                fields = %errors.fields().map(|f| f.as_str()).collect::<Vec<_>>().join(","),
                "form rejected"
            );
        })?;

        let payment_amount = calculate_total_amount(&form.payment);
        debug!(%payment_amount, "computed payment amount");

        let subjects = if self.catalog.collects_subjects() {
            form.subjects.iter().cloned().collect()
        } else {
            Vec::new()
        };

        Ok(Invoice {
            student_name: form.student_name.clone(),
            district: checked.district,
            grade: form.grade.clone(),
            subjects,
            months: form.months.iter().copied().collect(),
            date: checked.date,
            payment: form.payment.clone(),
            payment_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        models::{District, Month, MonthSelection, PaymentInput},
        validation::Field,
    };

    fn filled_form(catalog: &Catalog) -> FormState {
        let mut form = catalog.empty_form();
        form.student_name = "Kavya Raj".to_string();
        form.district = "Jaffna".to_string();
        form.grade = "Grade 5".to_string();
        form.toggle_month(Month::April, 2024);
        form.toggle_month(Month::February, 2024);
        form.date = "2024-04-02".to_string();
        form
    }

    #[test]
    fn build_snapshots_every_field() {
        let catalog = Catalog::flat_amount();
        let mut form = filled_form(&catalog);
        form.payment = PaymentInput::Flat {
            payment_amount: "4500".to_string(),
        };

        let invoice = InvoiceBuilder::new(&catalog).build(&form).unwrap();

        assert_eq!(
            invoice,
            Invoice {
                student_name: "Kavya Raj".to_string(),
                district: District::Jaffna,
                grade: "Grade 5".to_string(),
                subjects: Vec::new(),
                months: vec![
                    MonthSelection::new(Month::April, 2024),
                    MonthSelection::new(Month::February, 2024),
                ],
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                payment: form.payment.clone(),
                payment_amount: "4500".to_string(),
            }
        );
    }

    #[test]
    fn build_computes_new_student_total() {
        let catalog = Catalog::typed_with_subjects();
        let mut form = filled_form(&catalog);
        form.toggle_subject("Keyboard");
        form.payment = PaymentInput::Typed {
            payment_type: "newStudent".to_string(),
            monthly_fee: String::new(),
            admission_fee: "500".to_string(),
            new_student_monthly_fee: "200".to_string(),
        };

        let invoice = InvoiceBuilder::new(&catalog).build(&form).unwrap();

        assert_eq!(invoice.payment_amount, "700");
        assert_eq!(invoice.subjects, vec!["Keyboard".to_string()]);
    }

    #[test]
    fn build_uses_monthly_fee_for_monthly_payment() {
        let catalog = Catalog::typed_with_subjects();
        let mut form = filled_form(&catalog);
        form.toggle_subject("Vocal");
        form.payment = PaymentInput::Typed {
            payment_type: "monthly".to_string(),
            monthly_fee: "2500".to_string(),
            admission_fee: String::new(),
            new_student_monthly_fee: String::new(),
        };

        let invoice = InvoiceBuilder::new(&catalog).build(&form).unwrap();

        assert_eq!(invoice.payment_amount, "2500");
    }

    #[test]
    fn build_rejects_missing_admission_fee_without_computing() {
        let catalog = Catalog::typed_with_subjects();
        let mut form = filled_form(&catalog);
        form.toggle_subject("Vocal");
        form.payment = PaymentInput::Typed {
            payment_type: "newStudent".to_string(),
            monthly_fee: String::new(),
            admission_fee: String::new(),
            new_student_monthly_fee: "200".to_string(),
        };

        let errors = InvoiceBuilder::new(&catalog).build(&form).unwrap_err();

        assert!(errors.contains(Field::AdmissionFee));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn build_leaves_form_untouched_on_failure() {
        let catalog = Catalog::flat_amount();
        let mut form = filled_form(&catalog);
        form.student_name = String::new();
        let before = form.clone();

        let result = InvoiceBuilder::new(&catalog).build(&form);

        assert!(result.is_err());
        assert_eq!(form, before);
    }
}
