//! # Selection State
//!
//! The user's current choice of values per facet.
//!
//! Values are kept with set semantics: toggling the same value on twice
//! stores it once, and order is irrelevant. A facet whose last value is
//! removed loses its entry, so [`Selection::is_empty`] and the number of
//! keys stay in agreement.
//!
//! Facet identifiers arrive as raw markup keys. Keys outside the registry
//! are dropped with a debug log and never produce an error.

use std::collections::{BTreeMap, BTreeSet};

use crate::facets::Facet;
use crate::model::FacetInput;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    values: BTreeMap<Facet, BTreeSet<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection induced by every checked input.
    pub fn from_inputs(inputs: &[FacetInput]) -> Self {
        let mut selection = Self::new();
        for input in inputs.iter().filter(|i| i.checked) {
            match input.facet_key.as_deref() {
                Some(key) => selection.toggle(key, &input.value, true),
                None => tracing::debug!(input = %input.id, "input has no facet key"),
            }
        }
        selection
    }

    /// Add or remove `value` for the facet named by its markup key.
    pub fn toggle(&mut self, facet_key: &str, value: &str, checked: bool) {
        match facet_key.parse::<Facet>() {
            Ok(facet) => self.toggle_facet(facet, value, checked),
            Err(error) => tracing::debug!(%error, "ignoring input"),
        }
    }

    pub fn toggle_facet(&mut self, facet: Facet, value: &str, checked: bool) {
        if checked {
            self.values
                .entry(facet)
                .or_default()
                .insert(value.to_string());
        } else if let Some(set) = self.values.get_mut(&facet) {
            set.remove(value);
            if set.is_empty() {
                self.values.remove(&facet);
            }
        }
    }

    /// Total number of selected values across all facets.
    pub fn active_count(&self) -> usize {
        self.values.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn selected(&self, facet: Facet) -> Option<&BTreeSet<String>> {
        self.values.get(&facet)
    }

    /// Facets with at least one selected value, in registry order.
    pub fn active_facets(&self) -> impl Iterator<Item = (Facet, &BTreeSet<String>)> {
        self.values.iter().map(|(facet, set)| (*facet, set))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_is_empty() {
        let selection = Selection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.active_count(), 0);
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut selection = Selection::new();
        selection.toggle("kategorie", "tractors", true);
        selection.toggle("vyrobce", "Claas", true);
        selection.toggle("vyrobce", "Fendt", true);
        assert_eq!(selection.active_count(), 3);
        assert!(selection
            .selected(Facet::Manufacturer)
            .unwrap()
            .contains("Fendt"));

        selection.toggle("vyrobce", "Fendt", false);
        assert_eq!(selection.active_count(), 2);
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut selection = Selection::new();
        selection.toggle("typ", "trailed", true);
        selection.toggle("typ", "trailed", true);
        assert_eq!(selection.active_count(), 1);
    }

    #[test]
    fn removing_last_value_empties_selection() {
        let mut selection = Selection::new();
        selection.toggle("rok", "2015", true);
        selection.toggle("rok", "2015", false);
        assert!(selection.is_empty());
        assert!(selection.selected(Facet::Year).is_none());
    }

    #[test]
    fn unchecking_unselected_value_is_noop() {
        let mut selection = Selection::new();
        selection.toggle("model", "X", false);
        assert!(selection.is_empty());
    }

    #[test]
    fn unknown_facet_is_ignored() {
        let mut selection = Selection::new();
        selection.toggle("barva", "red", true);
        assert!(selection.is_empty());
        assert_eq!(selection.active_count(), 0);
    }

    #[test]
    fn from_inputs_uses_checked_known_inputs() {
        let mut keyless = FacetInput::new("i4", "typ", "x").checked();
        keyless.facet_key = None;
        let inputs = vec![
            FacetInput::new("i1", "kategorie", "tractors").checked(),
            FacetInput::new("i2", "kategorie", "combines"),
            FacetInput::new("i3", "barva", "red").checked(),
            keyless,
            FacetInput::new("i5", "rok", "2020").checked(),
        ];

        let selection = Selection::from_inputs(&inputs);
        assert_eq!(selection.active_count(), 2);
        assert!(selection.selected(Facet::Category).unwrap().contains("tractors"));
        assert!(selection.selected(Facet::Year).unwrap().contains("2020"));
    }

    #[test]
    fn clear_empties_everything() {
        let mut selection = Selection::new();
        selection.toggle("kategorie", "tractors", true);
        selection.toggle("rok", "2010", true);
        selection.clear();
        assert_eq!(selection, Selection::new());
    }

    #[test]
    fn active_facets_follow_registry_order() {
        let mut selection = Selection::new();
        selection.toggle("rok", "2010", true);
        selection.toggle("kategorie", "tractors", true);
        let facets: Vec<_> = selection.active_facets().map(|(f, _)| f).collect();
        assert_eq!(facets, vec![Facet::Category, Facet::Year]);
    }
}
