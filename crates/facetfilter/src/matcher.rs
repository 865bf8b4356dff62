//! Match evaluation.
//!
//! [`matches`] decides whether a single item survives the current selection.
//! [`evaluate`] runs it over a whole listing and produces a [`VisibilitySet`].
//! Both are pure: they read the selection and the items, nothing else.
//!
//! Facets combine with AND, values within a facet with OR. A facet with no
//! selected values does not constrain anything.

use std::collections::BTreeSet;

use crate::facets::{Facet, FacetKind, YearBuckets};
use crate::index::ItemIndex;
use crate::model::{Item, ItemId};
use crate::selection::Selection;

/// Which branch produced a [`VisibilitySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalPath {
    /// Empty selection: every item shown without per-item evaluation.
    ShowAll,
    /// Every item was checked against the selection.
    Evaluated,
}

/// The show/hide outcome for one listing, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySet {
    pub visible: Vec<ItemId>,
    pub hidden: Vec<ItemId>,
    pub path: EvalPath,
}

impl VisibilitySet {
    pub fn show_all(index: &ItemIndex) -> Self {
        Self {
            visible: index.ids().cloned().collect(),
            hidden: Vec::new(),
            path: EvalPath::ShowAll,
        }
    }

    pub fn is_visible(&self, id: &ItemId) -> bool {
        self.visible.contains(id)
    }

    pub fn len(&self) -> usize {
        self.visible.len() + self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Check whether `item` satisfies every facet that has a selection.
pub fn matches(selection: &Selection, item: &Item, buckets: &YearBuckets) -> bool {
    selection
        .active_facets()
        .all(|(facet, values)| facet_matches(facet, values, item, buckets))
}

fn facet_matches(
    facet: Facet,
    values: &BTreeSet<String>,
    item: &Item,
    buckets: &YearBuckets,
) -> bool {
    match facet.kind() {
        FacetKind::Categorical => item
            .attr(facet)
            .is_some_and(|value| values.contains(value)),
        FacetKind::YearRange => {
            let Some(year) = item.year() else {
                return false;
            };
            // Unknown labels select nothing
            values
                .iter()
                .filter_map(|label| buckets.get(label))
                .any(|bucket| bucket.contains(year))
        }
    }
}

/// Compute visibility for every item in the listing.
pub fn evaluate(selection: &Selection, index: &ItemIndex, buckets: &YearBuckets) -> VisibilitySet {
    if selection.is_empty() {
        return VisibilitySet::show_all(index);
    }

    let (visible, hidden): (Vec<&Item>, Vec<&Item>) = index
        .iter()
        .partition(|item| matches(selection, item, buckets));

    VisibilitySet {
        visible: visible.into_iter().map(|item| item.id.clone()).collect(),
        hidden: hidden.into_iter().map(|item| item.id.clone()).collect(),
        path: EvalPath::Evaluated,
    }
}
