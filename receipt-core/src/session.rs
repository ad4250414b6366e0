//! The editing session behind one payment form.
//!
//! [`PaymentSession`] owns the live [`FormState`], the month picker, the
//! errors from the last submit and the invoice currently on display. A
//! presentation layer holds one session and calls into it once per user
//! interaction.

use tracing::{debug, info};

use crate::{
    builder::InvoiceBuilder,
    catalog::Catalog,
    export::{
        ExportError, ExportGate, ExportOutcome, ExportRequest, RECEIPT_EXPORT_SETTINGS,
        ReceiptExporter,
    },
    format::format_selection_summary,
    models::{FormState, Invoice, Month},
    receipt::{Branding, ReceiptView},
    validation::ValidationErrors,
};

/// Visibility and year of the month picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPicker {
    pub open: bool,
    pub year: i32,
}

impl MonthPicker {
    pub fn new(year: i32) -> Self {
        Self { open: false, year }
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Hides the picker. Selected months are kept.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn previous_year(&mut self) {
        self.year -= 1;
    }

    pub fn next_year(&mut self) {
        self.year += 1;
    }
}

#[derive(Debug)]
pub struct PaymentSession {
    catalog: Catalog,
    branding: Branding,
    form: FormState,
    picker: MonthPicker,
    errors: ValidationErrors,
    invoice: Option<Invoice>,
    show_invoice: bool,
    export_gate: ExportGate,
}

impl PaymentSession {
    /// Starts a session with an empty form. `current_year` seeds the month
    /// picker.
    pub fn new(
        catalog: Catalog,
        branding: Branding,
        current_year: i32,
    ) -> Self {
        let form = catalog.empty_form();
        Self {
            catalog,
            branding,
            form,
            picker: MonthPicker::new(current_year),
            errors: ValidationErrors::new(),
            invoice: None,
            show_invoice: false,
            export_gate: ExportGate::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Direct access for editing the scalar text fields.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn picker(&self) -> &MonthPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut MonthPicker {
        &mut self.picker
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        self.invoice.as_ref()
    }

    pub fn is_invoice_shown(&self) -> bool {
        self.show_invoice && self.invoice.is_some()
    }

    pub fn is_exporting(&self) -> bool {
        self.export_gate.is_in_flight()
    }

    /// Receipt for the displayed invoice.
    pub fn receipt(&self) -> Option<ReceiptView> {
        self.invoice
            .as_ref()
            .map(|invoice| ReceiptView::new(invoice, &self.branding))
    }

    /// Toggles `month` in the year the picker currently shows.
    pub fn toggle_month(
        &mut self,
        month: Month,
    ) {
        self.form.toggle_month(month, self.picker.year);
    }

    pub fn remove_month(
        &mut self,
        month: Month,
        year: i32,
    ) {
        self.form.remove_month(month, year);
    }

    /// Whether `month` is selected in the year the picker currently shows.
    pub fn is_month_selected(
        &self,
        month: Month,
    ) -> bool {
        self.form.is_month_selected(month, self.picker.year)
    }

    pub fn month_summary(&self) -> String {
        format_selection_summary(self.form.months.len())
    }

    pub fn toggle_subject(
        &mut self,
        subject: &str,
    ) {
        self.form.toggle_subject(subject);
    }

    pub fn remove_subject(
        &mut self,
        subject: &str,
    ) {
        self.form.remove_subject(subject);
    }

    /// Validates the form and, on success, replaces the displayed invoice
    /// and resets the form.
    ///
    /// # Errors
    ///
    /// Returns the errors of this attempt; they replace the previous ones.
    /// The form and any earlier invoice are left as they were.
    pub fn submit(&mut self) -> Result<&Invoice, &ValidationErrors> {
        match InvoiceBuilder::new(&self.catalog).build(&self.form) {
            Ok(invoice) => {
                info!(
                    student = %invoice.student_name,
                    amount = %invoice.payment_amount,
                    months = invoice.months.len(),
                    "invoice created"
                );
                self.form.reset();
                self.picker.close();
                self.errors = ValidationErrors::new();
                self.show_invoice = true;
                Ok(self.invoice.insert(invoice))
            }
            Err(errors) => {
                self.errors = errors;
                Err(&self.errors)
            }
        }
    }

    /// Sends the displayed receipt to `exporter`.
    ///
    /// A request made while another export is still running is ignored.
    /// The running flag is cleared however the export ends.
    ///
    /// # Errors
    ///
    /// Returns whatever the exporter failed with. The invoice is unchanged,
    /// so the user can simply try again.
    pub async fn export(
        &self,
        exporter: &dyn ReceiptExporter,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(receipt) = self.receipt() else {
            return Ok(ExportOutcome::NothingToExport);
        };
        let Some(_in_flight) = self.export_gate.try_begin() else {
            debug!("export already in flight; ignoring request");
            return Ok(ExportOutcome::AlreadyInFlight);
        };

        let request = ExportRequest {
            receipt: &receipt,
            file_name: &receipt.file_name,
            settings: RECEIPT_EXPORT_SETTINGS,
        };
        exporter.export(&request).await?;

        info!(file_name = %receipt.file_name, "receipt exported");
        Ok(ExportOutcome::Exported {
            file_name: receipt.file_name.clone(),
        })
    }
}
