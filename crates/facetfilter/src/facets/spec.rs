//! Facet specifications and registry.
//!
//! This module defines the closed set of facets: their markup keys, their
//! human names, and how their values are compared.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// How a facet's selected values are compared against an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    /// Exact string equality against the item's attribute
    Categorical,

    /// Selected values are bucket labels; the item's year must fall inside one
    YearRange,
}

/// One independent filtering dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Category,
    Manufacturer,
    Type,
    Model,
    Drivetrain,
    Year,
}

/// Specification for a single facet.
#[derive(Debug, Clone)]
pub struct FacetSpec {
    pub facet: Facet,

    /// The key used in markup: `data-filter="<key>"` on inputs and
    /// `data-<key>` on items.
    pub key: &'static str,

    /// English name, used in logs.
    pub name: &'static str,

    pub kind: FacetKind,
}

impl FacetSpec {
    const fn new(facet: Facet, key: &'static str, name: &'static str) -> Self {
        Self {
            facet,
            key,
            name,
            kind: FacetKind::Categorical,
        }
    }

    const fn year_range(mut self) -> Self {
        self.kind = FacetKind::YearRange;
        self
    }
}

/// Registry of all facets.
///
/// This is the single source of truth for facet metadata. The order here is
/// the order in which facets are evaluated.
pub const FACETS: &[FacetSpec] = &[
    FacetSpec::new(Facet::Category, "kategorie", "category"),
    FacetSpec::new(Facet::Manufacturer, "vyrobce", "manufacturer"),
    FacetSpec::new(Facet::Type, "typ", "type"),
    FacetSpec::new(Facet::Model, "model", "model"),
    FacetSpec::new(Facet::Drivetrain, "system", "drivetrain"),
    FacetSpec::new(Facet::Year, "rok", "year").year_range(),
];

impl Facet {
    pub const ALL: [Facet; 6] = [
        Facet::Category,
        Facet::Manufacturer,
        Facet::Type,
        Facet::Model,
        Facet::Drivetrain,
        Facet::Year,
    ];

    /// Look up a facet by its markup key. Matching is exact.
    pub fn from_key(key: &str) -> Option<Facet> {
        FACETS.iter().find(|spec| spec.key == key).map(|spec| spec.facet)
    }

    pub fn spec(self) -> &'static FacetSpec {
        // FACETS holds one entry per variant, in declaration order
        &FACETS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> FacetKind {
        self.spec().kind
    }

    /// The item attribute carrying this facet's value, e.g. `data-vyrobce`.
    pub fn data_attribute(self) -> String {
        format!("data-{}", self.key())
    }
}

impl FromStr for Facet {
    type Err = FilterError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Facet::from_key(key).ok_or_else(|| FilterError::UnrecognizedFacet(key.to_string()))
    }
}

/// All facets compared by exact string equality.
pub fn categorical_facets() -> impl Iterator<Item = Facet> {
    FACETS
        .iter()
        .filter(|spec| spec.kind == FacetKind::Categorical)
        .map(|spec| spec.facet)
}
