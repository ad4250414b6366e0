use receipt_core::{PaymentSession, ValidationErrors};

use crate::{config::AppConfig, form_file::FormDocument};

/// Builds a session from the config and enters `document` into its form.
/// `year` seeds the month picker.
pub fn prepare_session(
    config: AppConfig,
    document: FormDocument,
    year: i32,
) -> PaymentSession {
    let mut session = PaymentSession::new(config.catalog, config.branding, year);
    document.apply(&mut session);
    session
}

/// One line per failing field, in form order.
pub fn render_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|error| format!("  {:<24} {}\n", error.field.label(), error.message))
        .collect()
}
