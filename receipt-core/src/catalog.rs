//! Product configuration for a deployment of the payment form.
//!
//! Two things vary between deployments: how the payable amount is entered
//! ([`PricingPolicy`]) and whether subjects are collected
//! ([`SubjectPolicy`]). The grade and subject option lists vary as well.

use serde::{Deserialize, Serialize};

use crate::models::{FormState, PaymentInput};

const DEFAULT_GRADES: [&str; 9] = [
    "Basic Level",
    "Grade 1",
    "Grade 2",
    "Grade 3",
    "Grade 4",
    "Grade 5",
    "Grade 6",
    "Grade 7",
    "Grade 8",
];

const DEFAULT_SUBJECTS: [&str; 6] = ["Keyboard", "Violin", "Vocal", "Guitar", "Piano", "Drums"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// A single amount typed by the user.
    #[default]
    Flat,
    /// A payment type choosing between a monthly fee and a new-student
    /// admission plus first month.
    Typed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectPolicy {
    #[default]
    NotCollected,
    /// At least one subject from the catalog must be picked.
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub pricing: PricingPolicy,
    pub subject_policy: SubjectPolicy,
    pub grades: Vec<String>,
    /// Subject options. Defaults to the full list when omitted, whatever the
    /// subject policy.
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,
}

fn default_subjects() -> Vec<String> {
    DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect()
}

impl Catalog {
    /// Flat amount, no subjects: the single-amount receipt form.
    pub fn flat_amount() -> Self {
        Self {
            pricing: PricingPolicy::Flat,
            subject_policy: SubjectPolicy::NotCollected,
            grades: DEFAULT_GRADES.iter().map(|g| g.to_string()).collect(),
            subjects: Vec::new(),
        }
    }

    /// Monthly / new-student pricing with required subjects.
    pub fn typed_with_subjects() -> Self {
        Self {
            pricing: PricingPolicy::Typed,
            subject_policy: SubjectPolicy::Required,
            grades: DEFAULT_GRADES.iter().map(|g| g.to_string()).collect(),
            subjects: default_subjects(),
        }
    }

    pub fn has_grade(
        &self,
        grade: &str,
    ) -> bool {
        self.grades.iter().any(|g| g == grade)
    }

    pub fn has_subject(
        &self,
        subject: &str,
    ) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// A catalog that requires subjects but offers none can never accept a
    /// form.
    pub fn is_usable(&self) -> bool {
        !(self.collects_subjects() && self.subjects.is_empty())
    }

    pub fn collects_subjects(&self) -> bool {
        self.subject_policy == SubjectPolicy::Required
    }

    /// Empty payment fields for this deployment's pricing policy.
    pub fn empty_payment(&self) -> PaymentInput {
        match self.pricing {
            PricingPolicy::Flat => PaymentInput::empty_flat(),
            PricingPolicy::Typed => PaymentInput::empty_typed(),
        }
    }

    pub fn empty_form(&self) -> FormState {
        FormState::empty(self.empty_payment())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::flat_amount()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_flat_without_subjects() {
        let catalog = Catalog::default();

        assert_eq!(catalog.pricing, PricingPolicy::Flat);
        assert!(!catalog.collects_subjects());
        assert!(catalog.has_grade("Basic Level"));
        assert!(catalog.has_grade("Grade 8"));
        assert!(!catalog.has_grade("Grade 9"));
    }

    #[test]
    fn empty_form_matches_pricing_policy() {
        assert_eq!(
            Catalog::typed_with_subjects().empty_form().payment,
            PaymentInput::empty_typed()
        );
        assert_eq!(
            Catalog::flat_amount().empty_form().payment,
            PaymentInput::empty_flat()
        );
    }

    #[test]
    fn required_subjects_without_options_is_unusable() {
        let mut catalog = Catalog::typed_with_subjects();
        assert!(catalog.is_usable());

        catalog.subjects.clear();
        assert!(!catalog.is_usable());

        catalog.subject_policy = SubjectPolicy::NotCollected;
        assert!(catalog.is_usable());
    }

    #[test]
    fn typed_catalog_lists_subjects() {
        let catalog = Catalog::typed_with_subjects();

        assert!(catalog.has_subject("Violin"));
        assert!(!catalog.has_subject("violin"));
    }
}
