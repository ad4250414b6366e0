pub mod builder;
pub mod calculations;
pub mod catalog;
pub mod export;
pub mod format;
pub mod models;
pub mod receipt;
pub mod selection;
pub mod session;
pub mod validation;

pub use builder::InvoiceBuilder;
pub use catalog::{Catalog, PricingPolicy, SubjectPolicy};
pub use export::{ExportError, ExportOutcome, ExportRequest, ReceiptExporter};
pub use models::*;
pub use receipt::{Branding, ReceiptView};
pub use selection::SelectionSet;
pub use session::{MonthPicker, PaymentSession};
pub use validation::{ErrorKind, Field, ValidationError, ValidationErrors};
