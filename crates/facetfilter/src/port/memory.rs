use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{Badge, ListingPort};
use crate::error::{Anchor, FilterError, Result};
use crate::model::{FacetInput, InputId, Item, ItemId};

/// Default class marking an item hidden by the filter.
pub const HIDDEN_CLASS: &str = "hidden-filter";

/// A listed item as it appears in markup: an id and its `data-*` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMarkup {
    pub id: ItemId,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl ItemMarkup {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            data: BTreeMap::new(),
        }
    }

    /// Add a facet attribute by markup key (`"kategorie"` becomes `data-kategorie`).
    pub fn data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(format!("data-{}", key), value.into());
        self
    }

    pub fn to_item(&self) -> Item {
        Item::from_data_attrs(
            self.id.clone(),
            self.data.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

fn default_true() -> bool {
    true
}

/// Serialized form of a listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default = "default_true")]
    pub panel: bool,
    #[serde(default = "default_true")]
    pub badge: bool,
    #[serde(default = "default_true")]
    pub indicator: bool,
    #[serde(default)]
    pub inputs: Vec<FacetInput>,
    #[serde(default)]
    pub items: Vec<ItemMarkup>,
}

/// Observable state of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelView {
    pub open: bool,
    /// `None` when the page has no indicator arrow.
    pub indicator_rotated: Option<bool>,
}

/// In-memory listing page.
///
/// Uses `RefCell` for interior mutability since the engine is single-threaded.
/// Every write is recorded so tests can inspect the resulting page.
pub struct MemListing {
    items: Vec<ItemMarkup>,
    inputs: RefCell<Vec<FacetInput>>,
    classes: RefCell<BTreeMap<ItemId, BTreeSet<String>>>,
    panel: RefCell<Option<PanelView>>,
    /// `None` when the page has no badge.
    badge: RefCell<Option<Badge>>,
    query: Option<String>,
    hidden_class: RefCell<String>,
    simulate_failure: RefCell<bool>,
    marker_writes: RefCell<usize>,
}

impl Default for MemListing {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            inputs: RefCell::new(Vec::new()),
            classes: RefCell::new(BTreeMap::new()),
            panel: RefCell::new(Some(PanelView {
                open: false,
                indicator_rotated: Some(false),
            })),
            badge: RefCell::new(Some(Badge::Hidden)),
            query: None,
            hidden_class: RefCell::new(HIDDEN_CLASS.to_string()),
            simulate_failure: RefCell::new(false),
            marker_writes: RefCell::new(0),
        }
    }
}

impl MemListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: PageSnapshot) -> Self {
        let mut listing = Self::new()
            .with_inputs(snapshot.inputs)
            .with_items(snapshot.items);
        listing.query = snapshot.query;
        if !snapshot.panel {
            listing = listing.without_panel();
        } else if !snapshot.indicator {
            listing = listing.without_indicator();
        }
        if !snapshot.badge {
            listing = listing.without_badge();
        }
        listing
    }

    /// Load a page from its JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: PageSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn with_items(mut self, items: Vec<ItemMarkup>) -> Self {
        let classes = self.classes.get_mut();
        for item in &items {
            classes.entry(item.id.clone()).or_default();
        }
        self.items = items;
        self
    }

    pub fn with_inputs(self, inputs: Vec<FacetInput>) -> Self {
        *self.inputs.borrow_mut() = inputs;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn without_panel(self) -> Self {
        *self.panel.borrow_mut() = None;
        self
    }

    pub fn without_indicator(self) -> Self {
        if let Some(panel) = self.panel.borrow_mut().as_mut() {
            panel.indicator_rotated = None;
        }
        self
    }

    pub fn without_badge(self) -> Self {
        *self.badge.borrow_mut() = None;
        self
    }

    /// Make every port call fail with an unexpected error.
    pub fn set_simulate_failure(&self, simulate: bool) {
        *self.simulate_failure.borrow_mut() = simulate;
    }

    /// Drop an item's element while keeping it in [`ListingPort::items`], as
    /// when a card is removed between the read and the write.
    pub fn detach_item(&self, id: &str) {
        self.classes.borrow_mut().remove(&ItemId::new(id));
    }

    /// Simulate the user clicking a checkbox.
    pub fn click_input(&self, id: &str) -> bool {
        let mut inputs = self.inputs.borrow_mut();
        match inputs.iter_mut().find(|i| i.id.0 == id) {
            Some(input) => {
                input.checked = !input.checked;
                true
            }
            None => false,
        }
    }

    // --- Inspection ---

    pub fn is_hidden(&self, id: &str) -> bool {
        self.classes
            .borrow()
            .get(&ItemId::new(id))
            .is_some_and(|c| c.contains(self.hidden_class.borrow().as_str()))
    }

    /// Ids of items without the hidden marker, in listing order.
    pub fn visible_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !self.is_hidden(&item.id.0))
            .map(|item| item.id.0.clone())
            .collect()
    }

    pub fn item_classes(&self, id: &str) -> Vec<String> {
        self.classes
            .borrow()
            .get(&ItemId::new(id))
            .map(|c| c.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.inputs
            .borrow()
            .iter()
            .any(|i| i.id.0 == id && i.checked)
    }

    pub fn badge(&self) -> Option<Badge> {
        *self.badge.borrow()
    }

    pub fn panel(&self) -> Option<PanelView> {
        *self.panel.borrow()
    }

    /// Number of per-item marker writes so far.
    pub fn marker_writes(&self) -> usize {
        *self.marker_writes.borrow()
    }

    fn check_failure(&self) -> Result<()> {
        if *self.simulate_failure.borrow() {
            return Err(FilterError::Listing("Simulated listing failure".to_string()));
        }
        Ok(())
    }
}

impl ListingPort for MemListing {
    fn facet_inputs(&self) -> Result<Vec<FacetInput>> {
        self.check_failure()?;
        Ok(self.inputs.borrow().clone())
    }

    fn items(&self) -> Result<Vec<Item>> {
        self.check_failure()?;
        Ok(self.items.iter().map(ItemMarkup::to_item).collect())
    }

    fn query_string(&self) -> Result<Option<String>> {
        self.check_failure()?;
        Ok(self.query.clone())
    }

    fn has_panel(&self) -> bool {
        self.panel.borrow().is_some()
    }

    fn set_hidden_class(&self, class: &str) {
        *self.hidden_class.borrow_mut() = class.to_string();
    }

    fn set_item_visible(&self, id: &ItemId, visible: bool) -> Result<()> {
        self.check_failure()?;
        let mut classes = self.classes.borrow_mut();
        let Some(item_classes) = classes.get_mut(id) else {
            return Err(FilterError::MissingAnchor(Anchor::Item(id.clone())));
        };
        let hidden_class = self.hidden_class.borrow();
        if visible {
            item_classes.remove(hidden_class.as_str());
        } else {
            item_classes.insert(hidden_class.clone());
        }
        *self.marker_writes.borrow_mut() += 1;
        Ok(())
    }

    fn set_badge(&self, badge: Badge) -> Result<()> {
        self.check_failure()?;
        match self.badge.borrow_mut().as_mut() {
            Some(current) => {
                *current = badge;
                Ok(())
            }
            None => Err(FilterError::MissingAnchor(Anchor::Badge)),
        }
    }

    fn set_input_checked(&self, id: &InputId, checked: bool) -> Result<()> {
        self.check_failure()?;
        let mut inputs = self.inputs.borrow_mut();
        match inputs.iter_mut().find(|i| &i.id == id) {
            Some(input) => {
                input.checked = checked;
                Ok(())
            }
            None => Err(FilterError::MissingAnchor(Anchor::Input(id.clone()))),
        }
    }

    fn set_panel_open(&self, open: bool) -> Result<()> {
        self.check_failure()?;
        match self.panel.borrow_mut().as_mut() {
            Some(panel) => {
                panel.open = open;
                if let Some(rotated) = panel.indicator_rotated.as_mut() {
                    *rotated = open;
                }
                Ok(())
            }
            None => Err(FilterError::MissingAnchor(Anchor::Panel)),
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A machinery listing with one input per facet value in use.
    ///
    /// | Item | Category | Manufacturer | Drivetrain | Year |
    /// |------|----------|--------------|------------|------|
    /// | t1 | tractors | Fendt | 4x4 | 2022 |
    /// | t2 | tractors | John Deere | 4x2 | 2016 |
    /// | c1 | combines | Claas | 4x2 | 2012 |
    /// | c2 | combines | John Deere | 4x4 | 2021 |
    /// | l1 | loaders | Manitou | | |
    pub fn machinery_listing() -> MemListing {
        MemListing::new()
            .with_items(vec![
                ItemMarkup::new("t1")
                    .data("kategorie", "tractors")
                    .data("vyrobce", "Fendt")
                    .data("system", "4x4")
                    .data("rok", "2022"),
                ItemMarkup::new("t2")
                    .data("kategorie", "tractors")
                    .data("vyrobce", "John Deere")
                    .data("system", "4x2")
                    .data("rok", "2016"),
                ItemMarkup::new("c1")
                    .data("kategorie", "combines")
                    .data("vyrobce", "Claas")
                    .data("system", "4x2")
                    .data("rok", "2012"),
                ItemMarkup::new("c2")
                    .data("kategorie", "combines")
                    .data("vyrobce", "John Deere")
                    .data("system", "4x4")
                    .data("rok", "2021"),
                ItemMarkup::new("l1")
                    .data("kategorie", "loaders")
                    .data("vyrobce", "Manitou"),
            ])
            .with_inputs(vec![
                FacetInput::new("cat-tractors", "kategorie", "tractors"),
                FacetInput::new("cat-combines", "kategorie", "combines"),
                FacetInput::new("cat-loaders", "kategorie", "loaders"),
                FacetInput::new("mfr-fendt", "vyrobce", "Fendt"),
                FacetInput::new("mfr-deere", "vyrobce", "John Deere"),
                FacetInput::new("mfr-claas", "vyrobce", "Claas"),
                FacetInput::new("sys-4x4", "system", "4x4"),
                FacetInput::new("year-2020", "rok", "2020"),
                FacetInput::new("year-2015", "rok", "2015"),
                FacetInput::new("year-2010", "rok", "2010"),
                FacetInput::new("color-red", "barva", "red"),
            ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::Facet;

    #[test]
    fn items_are_parsed_from_markup() {
        let listing = fixtures::machinery_listing();
        let items = listing.items().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[2].attr(Facet::Manufacturer), Some("Claas"));
        assert_eq!(items[2].year(), Some(2012));
        assert_eq!(items[4].year(), None);
    }

    #[test]
    fn hidden_marker_round_trip() {
        let listing = fixtures::machinery_listing();
        let id = ItemId::new("t1");

        listing.set_item_visible(&id, false).unwrap();
        assert!(listing.is_hidden("t1"));
        assert_eq!(listing.item_classes("t1"), vec![HIDDEN_CLASS.to_string()]);

        listing.set_item_visible(&id, true).unwrap();
        assert!(!listing.is_hidden("t1"));
        assert_eq!(listing.marker_writes(), 2);
    }

    #[test]
    fn custom_hidden_class() {
        let listing = fixtures::machinery_listing();
        listing.set_hidden_class("is-filtered");
        listing.set_item_visible(&ItemId::new("c1"), false).unwrap();
        assert_eq!(listing.item_classes("c1"), vec!["is-filtered".to_string()]);
        assert!(listing.is_hidden("c1"));
    }

    #[test]
    fn detached_item_is_missing_anchor() {
        let listing = fixtures::machinery_listing();
        listing.detach_item("t2");
        assert_eq!(listing.items().unwrap().len(), 5);
        let err = listing
            .set_item_visible(&ItemId::new("t2"), false)
            .unwrap_err();
        assert!(matches!(err, FilterError::MissingAnchor(Anchor::Item(ref id)) if id.0 == "t2"));
    }

    #[test]
    fn unknown_item_is_missing_anchor() {
        let listing = MemListing::new();
        let err = listing
            .set_item_visible(&ItemId::new("ghost"), false)
            .unwrap_err();
        assert!(matches!(err, FilterError::MissingAnchor(Anchor::Item(_))));
    }

    #[test]
    fn missing_badge_and_panel() {
        let listing = MemListing::new().without_badge().without_panel();
        assert!(!listing.has_panel());
        assert!(listing.set_badge(Badge::Count(1)).unwrap_err().is_missing_anchor());
        assert!(listing.set_panel_open(true).unwrap_err().is_missing_anchor());
    }

    #[test]
    fn panel_rotates_indicator() {
        let listing = MemListing::new();
        listing.set_panel_open(true).unwrap();
        assert_eq!(
            listing.panel(),
            Some(PanelView {
                open: true,
                indicator_rotated: Some(true)
            })
        );

        let listing = MemListing::new().without_indicator();
        listing.set_panel_open(true).unwrap();
        assert_eq!(listing.panel().unwrap().indicator_rotated, None);
    }

    #[test]
    fn simulated_failure_affects_every_call() {
        let listing = fixtures::machinery_listing();
        listing.set_simulate_failure(true);
        assert!(matches!(listing.items(), Err(FilterError::Listing(_))));
        assert!(matches!(listing.facet_inputs(), Err(FilterError::Listing(_))));
        assert!(matches!(
            listing.set_badge(Badge::Hidden),
            Err(FilterError::Listing(_))
        ));
    }

    #[test]
    fn click_input_toggles() {
        let listing = fixtures::machinery_listing();
        assert!(listing.click_input("cat-loaders"));
        assert!(listing.is_checked("cat-loaders"));
        assert!(listing.click_input("cat-loaders"));
        assert!(!listing.is_checked("cat-loaders"));
        assert!(!listing.click_input("nope"));
    }

    #[test]
    fn snapshot_from_json() {
        let json = r#"{
            "query": "?kategorie=combines",
            "badge": false,
            "inputs": [
                {"id": "f1", "filter": "kategorie", "value": "combines"},
                {"id": "f2", "value": "orphan", "checked": true}
            ],
            "items": [
                {"id": "m1", "data": {"data-kategorie": "combines", "data-rok": "2018"}}
            ]
        }"#;

        let listing = MemListing::from_json(json).unwrap();
        assert!(listing.has_panel());
        assert_eq!(listing.badge(), None);
        assert_eq!(listing.query_string().unwrap().as_deref(), Some("?kategorie=combines"));

        let inputs = listing.facet_inputs().unwrap();
        assert_eq!(inputs[0].facet(), Some(Facet::Category));
        assert_eq!(inputs[1].facet_key, None);
        assert!(inputs[1].checked);

        let items = listing.items().unwrap();
        assert_eq!(items[0].year(), Some(2018));
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let err = MemListing::from_json("{ not json").err().unwrap();
        assert!(matches!(err, FilterError::Snapshot(_)));
    }
}
