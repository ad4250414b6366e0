//! Multi-select accumulation for the payment form.
//!
//! Months (tagged with a year) and subjects are picked one toggle at a time.
//! Both live in a [`SelectionSet`], an insertion-ordered collection that
//! never holds the same value twice. Every operation here is total: toggling
//! adds or removes, and removing an absent value does nothing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::models::{FormState, Month, MonthSelection};

/// De-duplicated, insertion-ordered collection of selected values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<T> {
    items: Vec<T>,
}

impl<T> SelectionSet<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> SelectionSet<T> {
    pub fn contains(
        &self,
        value: &T,
    ) -> bool {
        self.items.contains(value)
    }

    /// Adds `value` unless it is already present. Returns `true` if added.
    pub fn insert(
        &mut self,
        value: T,
    ) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Removes `value` if present. Returns `true` if something was removed.
    pub fn remove(
        &mut self,
        value: &T,
    ) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != value);
        self.items.len() != before
    }

    /// Removes `value` when present, otherwise appends it.
    /// Returns `true` when the value is selected afterwards.
    pub fn toggle(
        &mut self,
        value: T,
    ) -> bool {
        if self.remove(&value) {
            false
        } else {
            self.items.push(value);
            true
        }
    }
}

impl<T> Default for SelectionSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> FromIterator<T> for SelectionSet<T> {
    /// Keeps the first occurrence of each value.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<'a, T> IntoIterator for &'a SelectionSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for SelectionSet<T> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<'de, T> Deserialize<'de> for SelectionSet<T>
where
    T: Deserialize<'de> + PartialEq,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

impl FormState {
    /// Selects `(month, current_year)`, or deselects it if already selected.
    pub fn toggle_month(
        &mut self,
        month: Month,
        current_year: i32,
    ) {
        let selection = MonthSelection::new(month, current_year);
        let selected = self.months.toggle(selection);
        debug!(%selection, selected, count = self.months.len(), "toggled month");
    }

    pub fn remove_month(
        &mut self,
        month: Month,
        year: i32,
    ) {
        if self.months.remove(&MonthSelection::new(month, year)) {
            debug!(%month, year, "removed month");
        }
    }

    pub fn is_month_selected(
        &self,
        month: Month,
        year: i32,
    ) -> bool {
        self.months.contains(&MonthSelection::new(month, year))
    }

    pub fn toggle_subject(
        &mut self,
        subject: &str,
    ) {
        let selected = self.subjects.toggle(subject.to_string());
        debug!(subject, selected, count = self.subjects.len(), "toggled subject");
    }

    pub fn remove_subject(
        &mut self,
        subject: &str,
    ) {
        if self.subjects.remove(&subject.to_string()) {
            debug!(subject, "removed subject");
        }
    }
}
