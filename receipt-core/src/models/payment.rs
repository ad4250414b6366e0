use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment type '{0}'")]
pub struct UnknownPaymentType(pub String);

/// Discriminator of the typed pricing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "newStudent")]
    NewStudent,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::NewStudent => "newStudent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Self::Monthly),
            "newStudent" => Some(Self::NewStudent),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentType {
    type Error = UnknownPaymentType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| UnknownPaymentType(value.to_string()))
    }
}

/// Raw payment fields as typed into the form.
///
/// The variant follows the deployment's pricing policy: a single flat amount,
/// or a payment type that selects which fee fields apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PaymentInput {
    Flat {
        #[serde(default)]
        payment_amount: String,
    },
    Typed {
        #[serde(default)]
        payment_type: String,
        #[serde(default)]
        monthly_fee: String,
        #[serde(default)]
        admission_fee: String,
        #[serde(default)]
        new_student_monthly_fee: String,
    },
}

impl PaymentInput {
    pub fn empty_flat() -> Self {
        Self::Flat {
            payment_amount: String::new(),
        }
    }

    pub fn empty_typed() -> Self {
        Self::Typed {
            payment_type: String::new(),
            monthly_fee: String::new(),
            admission_fee: String::new(),
            new_student_monthly_fee: String::new(),
        }
    }

    /// The selected payment type, if the input is typed and the
    /// discriminator holds a known value.
    pub fn payment_type(&self) -> Option<PaymentType> {
        match self {
            Self::Flat { .. } => None,
            Self::Typed { payment_type, .. } => PaymentType::parse(payment_type),
        }
    }
}
