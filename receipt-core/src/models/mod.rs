mod district;
mod form_state;
mod invoice;
mod month;
mod payment;

pub use district::{District, UnknownDistrict};
pub use form_state::FormState;
pub use invoice::Invoice;
pub use month::{Month, MonthSelection, UnknownMonth};
pub use payment::{PaymentInput, PaymentType, UnknownPaymentType};
