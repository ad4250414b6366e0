//! Field-scoped validation of a submitted payment form.
//!
//! Every rule runs on every submit; the caller gets one entry per failing
//! field so all problems can be shown at once. When two rules fail for the
//! same field, the rule checked later replaces the earlier entry.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::{
    calculations::is_non_negative_fee,
    catalog::{Catalog, PricingPolicy},
    format::parse_form_date,
    models::{District, FormState, PaymentInput, PaymentType},
};

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    StudentName,
    District,
    Grade,
    Months,
    Subjects,
    Date,
    PaymentAmount,
    PaymentType,
    MonthlyFee,
    AdmissionFee,
    NewStudentMonthlyFee,
}

impl Field {
    /// Key the presentation layer uses for the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StudentName => "studentName",
            Self::District => "district",
            Self::Grade => "grade",
            Self::Months => "months",
            Self::Subjects => "subjects",
            Self::Date => "date",
            Self::PaymentAmount => "paymentAmount",
            Self::PaymentType => "paymentType",
            Self::MonthlyFee => "monthlyFee",
            Self::AdmissionFee => "admissionFee",
            Self::NewStudentMonthlyFee => "newStudentMonthlyFee",
        }
    }

    /// Human-readable field name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StudentName => "Student Name",
            Self::District => "District",
            Self::Grade => "Grade",
            Self::Months => "Month",
            Self::Subjects => "Subject",
            Self::Date => "Date",
            Self::PaymentAmount => "Payment Amount",
            Self::PaymentType => "Payment Type",
            Self::MonthlyFee => "Monthly Fee",
            Self::AdmissionFee => "Admission Fee",
            Self::NewStudentMonthlyFee => "Monthly Fee",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The field is missing or holds a value outside its option list.
    Required,
    /// The field is present but malformed.
    Format,
}

/// A recoverable problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn required(field: Field) -> Self {
        let message = match field {
            Field::Months => "At least one month is required".to_string(),
            Field::Subjects => "At least one subject is required".to_string(),
            other => format!("{} is required", other.label()),
        };
        Self {
            field,
            kind: ErrorKind::Required,
            message,
        }
    }

    pub fn format(
        field: Field,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            kind: ErrorKind::Format,
            message: message.into(),
        }
    }
}

/// Errors of one submit attempt, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error`, replacing any earlier entry for the same field.
    pub fn insert(
        &mut self,
        error: ValidationError,
    ) {
        self.0.insert(error.field, error);
    }

    pub fn get(
        &self,
        field: Field,
    ) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    /// Message for `field`, if it failed.
    pub fn message(
        &self,
        field: Field,
    ) -> Option<&str> {
        self.get(field).map(|e| e.message.as_str())
    }

    pub fn contains(
        &self,
        field: Field,
    ) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.values()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let messages: Vec<String> = self
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Runs every rule against `form` and collects the failures.
pub fn validate(
    form: &FormState,
    catalog: &Catalog,
) -> ValidationErrors {
    check_form(form, catalog).err().unwrap_or_default()
}

/// Typed values read off a form that passed every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CheckedFields {
    pub district: District,
    pub date: NaiveDate,
}

/// Runs every rule and, when none fail, returns the parsed district and date.
pub(crate) fn check_form(
    form: &FormState,
    catalog: &Catalog,
) -> Result<CheckedFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if form.student_name.trim().is_empty() {
        errors.insert(ValidationError::required(Field::StudentName));
    }
    if form.student_name.chars().any(|c| c.is_ascii_digit()) {
        errors.insert(ValidationError::format(
            Field::StudentName,
            "Student name cannot contain numbers",
        ));
    }

    let district = District::parse(&form.district);
    if district.is_none() {
        errors.insert(ValidationError::required(Field::District));
    }

    if !catalog.has_grade(&form.grade) {
        errors.insert(ValidationError::required(Field::Grade));
    }

    if form.months.is_empty() {
        errors.insert(ValidationError::required(Field::Months));
    }

    if catalog.collects_subjects() {
        validate_subjects(form, catalog, &mut errors);
    }

    let date = if form.date.trim().is_empty() {
        errors.insert(ValidationError::required(Field::Date));
        None
    } else {
        let parsed = parse_form_date(&form.date).ok();
        if parsed.is_none() {
            errors.insert(ValidationError::format(
                Field::Date,
                "Date must be a valid calendar date",
            ));
        }
        parsed
    };

    validate_payment(&form.payment, catalog.pricing, &mut errors);

    match (district, date) {
        (Some(district), Some(date)) if errors.is_empty() => Ok(CheckedFields { district, date }),
        _ => Err(errors),
    }
}

fn validate_subjects(
    form: &FormState,
    catalog: &Catalog,
    errors: &mut ValidationErrors,
) {
    if form.subjects.is_empty() {
        errors.insert(ValidationError::required(Field::Subjects));
        return;
    }
    if let Some(unknown) = form.subjects.iter().find(|s| !catalog.has_subject(s)) {
        errors.insert(ValidationError::format(
            Field::Subjects,
            format!("Unknown subject: {unknown}"),
        ));
    }
}

fn validate_payment(
    payment: &PaymentInput,
    pricing: PricingPolicy,
    errors: &mut ValidationErrors,
) {
    match (pricing, payment) {
        (PricingPolicy::Flat, PaymentInput::Flat { payment_amount }) => {
            check_amount(Field::PaymentAmount, payment_amount, errors);
        }
        (
            PricingPolicy::Typed,
            PaymentInput::Typed {
                payment_type,
                monthly_fee,
                admission_fee,
                new_student_monthly_fee,
            },
        ) => match PaymentType::parse(payment_type) {
            Some(PaymentType::Monthly) => {
                check_amount(Field::MonthlyFee, monthly_fee, errors);
            }
            Some(PaymentType::NewStudent) => {
                check_amount(Field::AdmissionFee, admission_fee, errors);
                check_amount(Field::NewStudentMonthlyFee, new_student_monthly_fee, errors);
            }
            None => errors.insert(ValidationError::required(Field::PaymentType)),
        },
        (PricingPolicy::Flat, PaymentInput::Typed { .. }) => {
            errors.insert(ValidationError::required(Field::PaymentAmount));
        }
        (PricingPolicy::Typed, PaymentInput::Flat { .. }) => {
            errors.insert(ValidationError::required(Field::PaymentType));
        }
    }
}

/// Amount fields must be present and hold a number of zero or more.
fn check_amount(
    field: Field,
    value: &str,
    errors: &mut ValidationErrors,
) {
    if value.is_empty() {
        errors.insert(ValidationError::required(field));
    } else if !is_non_negative_fee(value) {
        errors.insert(ValidationError::format(
            field,
            format!("{} must be a non-negative number", field.label()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Month;

    fn valid_flat_form() -> FormState {
        let mut form = Catalog::flat_amount().empty_form();
        form.student_name = "Anne O'Neil".to_string();
        form.district = "Colombo".to_string();
        form.grade = "Grade 3".to_string();
        form.toggle_month(Month::March, 2024);
        form.date = "2024-03-05".to_string();
        form.payment = PaymentInput::Flat {
            payment_amount: "3000".to_string(),
        };
        form
    }

    fn valid_typed_form(payment: PaymentInput) -> FormState {
        let mut form = valid_flat_form();
        form.toggle_subject("Violin");
        form.payment = payment;
        form
    }

    fn typed(
        payment_type: &str,
        monthly_fee: &str,
        admission_fee: &str,
        new_student_monthly_fee: &str,
    ) -> PaymentInput {
        PaymentInput::Typed {
            payment_type: payment_type.to_string(),
            monthly_fee: monthly_fee.to_string(),
            admission_fee: admission_fee.to_string(),
            new_student_monthly_fee: new_student_monthly_fee.to_string(),
        }
    }

    fn failing_fields(errors: &ValidationErrors) -> Vec<&'static str> {
        errors.fields().map(|f| f.as_str()).collect()
    }

    #[test]
    fn valid_flat_form_passes() {
        let errors = validate(&valid_flat_form(), &Catalog::flat_amount());

        assert!(errors.is_empty(), "unexpected errors: {errors}");
    }

    #[test]
    fn check_form_returns_parsed_district_and_date() {
        let mut form = valid_flat_form();
        form.date = "2024-03-05T10:30".to_string();

        let checked = check_form(&form, &Catalog::flat_amount()).unwrap();

        assert_eq!(
            checked,
            CheckedFields {
                district: District::Colombo,
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            }
        );
    }

    #[test]
    fn check_form_fails_with_same_errors_as_validate() {
        let catalog = Catalog::flat_amount();
        let mut form = valid_flat_form();
        form.district = "Kandy".to_string();

        let errors = check_form(&form, &catalog).unwrap_err();

        assert_eq!(errors, validate(&form, &catalog));
        assert_eq!(failing_fields(&errors), vec!["district"]);
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let catalog = Catalog::flat_amount();

        let errors = validate(&catalog.empty_form(), &catalog);

        assert_eq!(
            failing_fields(&errors),
            vec![
                "studentName",
                "district",
                "grade",
                "months",
                "date",
                "paymentAmount"
            ]
        );
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Required));
        assert_eq!(
            errors.message(Field::Months),
            Some("At least one month is required")
        );
        assert_eq!(
            errors.message(Field::PaymentAmount),
            Some("Payment Amount is required")
        );
    }

    #[test]
    fn whitespace_name_is_required_error() {
        let mut form = valid_flat_form();
        form.student_name = "   ".to_string();

        let errors = validate(&form, &Catalog::flat_amount());

        assert_eq!(
            errors.get(Field::StudentName),
            Some(&ValidationError::required(Field::StudentName))
        );
        assert_eq!(
            errors.message(Field::StudentName),
            Some("Student Name is required")
        );
    }

    #[test]
    fn name_with_digit_is_format_error() {
        let mut form = valid_flat_form();
        form.student_name = "John3".to_string();

        let errors = validate(&form, &Catalog::flat_amount());

        let error = errors.get(Field::StudentName).unwrap();
        assert_eq!(error.kind, ErrorKind::Format);
        assert_eq!(error.message, "Student name cannot contain numbers");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn district_outside_enumeration_is_required_error() {
        let mut form = valid_flat_form();
        form.district = "Kandy".to_string();

        let errors = validate(&form, &Catalog::flat_amount());

        assert_eq!(failing_fields(&errors), vec!["district"]);
    }

    #[test]
    fn grade_outside_catalog_is_required_error() {
        let mut form = valid_flat_form();
        form.grade = "Grade 12".to_string();

        let errors = validate(&form, &Catalog::flat_amount());

        assert_eq!(failing_fields(&errors), vec!["grade"]);
    }

    #[test]
    fn malformed_date_is_format_error() {
        let mut form = valid_flat_form();
        form.date = "2024-13-01".to_string();

        let errors = validate(&form, &Catalog::flat_amount());

        assert_eq!(errors.get(Field::Date).unwrap().kind, ErrorKind::Format);
    }

    #[test]
    fn negative_flat_amount_is_format_error() {
        let mut form = valid_flat_form();
        form.payment = PaymentInput::Flat {
            payment_amount: "-100".to_string(),
        };

        let errors = validate(&form, &Catalog::flat_amount());

        assert_eq!(
            errors.message(Field::PaymentAmount),
            Some("Payment Amount must be a non-negative number")
        );
    }

    #[test]
    fn loosely_formatted_amounts_are_format_errors() {
        for amount in ["1,,0,0", "1_000", " 3000 ", "+5", "1,5"] {
            let mut form = valid_flat_form();
            form.payment = PaymentInput::Flat {
                payment_amount: amount.to_string(),
            };

            let errors = validate(&form, &Catalog::flat_amount());

            assert_eq!(
                errors.get(Field::PaymentAmount).map(|e| e.kind),
                Some(ErrorKind::Format),
                "accepted {amount:?}"
            );
        }
    }

    #[test]
    fn loosely_formatted_monthly_fee_is_format_error() {
        let form = valid_typed_form(typed("monthly", "2,,5_00", "", ""));

        let errors = validate(&form, &Catalog::typed_with_subjects());

        assert_eq!(failing_fields(&errors), vec!["monthlyFee"]);
        assert_eq!(
            errors.message(Field::MonthlyFee),
            Some("Monthly Fee must be a non-negative number")
        );
    }

    #[test]
    fn subjects_ignored_when_not_collected() {
        let form = valid_flat_form();

        let errors = validate(&form, &Catalog::flat_amount());

        assert!(!errors.contains(Field::Subjects));
    }

    #[test]
    fn subjects_required_when_collected() {
        let mut form = valid_typed_form(typed("monthly", "2500", "", ""));
        form.remove_subject("Violin");

        let errors = validate(&form, &Catalog::typed_with_subjects());

        assert_eq!(failing_fields(&errors), vec!["subjects"]);
    }

    #[test]
    fn unknown_subject_is_format_error() {
        let mut form = valid_typed_form(typed("monthly", "2500", "", ""));
        form.toggle_subject("Theremin");

        let errors = validate(&form, &Catalog::typed_with_subjects());

        assert_eq!(
            errors.message(Field::Subjects),
            Some("Unknown subject: Theremin")
        );
    }

    #[test]
    fn typed_monthly_requires_monthly_fee_only() {
        let form = valid_typed_form(typed("monthly", "", "", ""));

        let errors = validate(&form, &Catalog::typed_with_subjects());

        assert_eq!(failing_fields(&errors), vec!["monthlyFee"]);
    }

    #[test]
    fn typed_new_student_checks_both_fees_independently() {
        let form = valid_typed_form(typed("newStudent", "", "", ""));

        let errors = validate(&form, &Catalog::typed_with_subjects());

        assert_eq!(
            failing_fields(&errors),
            vec!["admissionFee", "newStudentMonthlyFee"]
        );
    }

    #[test]
    fn typed_new_student_with_missing_admission_fee() {
        let form = valid_typed_form(typed("newStudent", "", "", "200"));

        let errors = validate(&form, &Catalog::typed_with_subjects());

        assert_eq!(failing_fields(&errors), vec!["admissionFee"]);
        assert_eq!(
            errors.message(Field::AdmissionFee),
            Some("Admission Fee is required")
        );
    }

    #[test]
    fn typed_unknown_payment_type_is_required_error() {
        let form = valid_typed_form(typed("weekly", "2500", "", ""));

        let errors = validate(&form, &Catalog::typed_with_subjects());

        assert_eq!(failing_fields(&errors), vec!["paymentType"]);
    }

    #[test]
    fn payment_shape_must_match_pricing_policy() {
        let form = valid_flat_form();

        let errors = validate(&form, &Catalog::typed_with_subjects());

        assert!(errors.contains(Field::PaymentType));
    }

    #[test]
    fn display_lists_field_and_message() {
        let mut errors = ValidationErrors::new();
        errors.insert(ValidationError::required(Field::Grade));
        errors.insert(ValidationError::required(Field::District));

        assert_eq!(
            errors.to_string(),
            "district: District is required; grade: Grade is required"
        );
    }
}
