//! # Domain Model: Listing Items and Facet Inputs
//!
//! This module defines what the engine reads from a page: listed [`Item`]s and
//! the checkbox-like [`FacetInput`]s that drive the selection.
//!
//! ## The Markup Contract
//!
//! ```text
//! <input type="checkbox" data-filter="vyrobce" value="Claas">
//! <div class="machine-card" data-kategorie="combines" data-vyrobce="Claas" data-rok="2017">
//! ```
//!
//! - An input belongs to the facet named by its `data-filter` key. Inputs
//!   with a missing or unknown key are kept as-is and ignored downstream.
//! - An item carries one `data-<key>` attribute per facet. Categorical values
//!   are kept verbatim (no trimming, no case folding).
//! - The year attribute is parsed as an integer after trimming. A value that
//!   does not parse is treated as absent, which fails any year selection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::facets::{Facet, FacetKind};

/// Identifier of a listed item, as assigned by the page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a facet input element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputId(pub String);

impl InputId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A checkbox-like input carrying a facet key and a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetInput {
    pub id: InputId,
    /// Raw `data-filter` value. Not validated here.
    #[serde(default, rename = "filter")]
    pub facet_key: Option<String>,
    pub value: String,
    #[serde(default)]
    pub checked: bool,
}

impl FacetInput {
    pub fn new(id: impl Into<String>, facet_key: &str, value: impl Into<String>) -> Self {
        Self {
            id: InputId::new(id),
            facet_key: Some(facet_key.to_string()),
            value: value.into(),
            checked: false,
        }
    }

    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// The facet this input belongs to, if its key is recognized.
    pub fn facet(&self) -> Option<Facet> {
        self.facet_key.as_deref().and_then(Facet::from_key)
    }
}

/// A listed entity with one attribute value per facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    attrs: BTreeMap<Facet, String>,
    year: Option<i32>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            attrs: BTreeMap::new(),
            year: None,
        }
    }

    /// Set a categorical attribute. Setting `Facet::Year` parses the value.
    pub fn with(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.set(facet, value.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Build an item from its markup attributes (`data-kategorie`, `data-rok`, ...).
    ///
    /// Attributes that do not name a facet are ignored.
    pub fn from_data_attrs<'a, I>(id: impl Into<ItemId>, attrs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut item = Item::new(id);
        for (name, value) in attrs {
            let Some(facet) = name.strip_prefix("data-").and_then(Facet::from_key) else {
                continue;
            };
            item.set(facet, value.to_string());
        }
        item
    }

    fn set(&mut self, facet: Facet, value: String) {
        match facet.kind() {
            FacetKind::YearRange => self.year = value.trim().parse().ok(),
            FacetKind::Categorical => {
                self.attrs.insert(facet, value);
            }
        }
    }

    /// The categorical value for `facet`. Always `None` for the year facet.
    pub fn attr(&self, facet: Facet) -> Option<&str> {
        self.attrs.get(&facet).map(String::as_str)
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}
