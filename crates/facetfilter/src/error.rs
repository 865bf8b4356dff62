use std::fmt;

use thiserror::Error;

use crate::model::{InputId, ItemId};

/// A page element the engine writes to or reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// The filter panel (`#filter-panel`).
    Panel,
    /// The active-selection badge (`#filter-count`).
    Badge,
    /// A facet input that disappeared between read and write.
    Input(InputId),
    /// A listed item that disappeared between read and write.
    Item(ItemId),
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Panel => write!(f, "filter panel"),
            Anchor::Badge => write!(f, "filter badge"),
            Anchor::Input(id) => write!(f, "facet input {}", id),
            Anchor::Item(id) => write!(f, "listing item {}", id),
        }
    }
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Missing page anchor: {0}")]
    MissingAnchor(Anchor),

    #[error("Unrecognized facet: {0}")]
    UnrecognizedFacet(String),

    #[error("Invalid year bucket {label}: {min_year} is after {max_year}")]
    InvalidBucket {
        label: String,
        min_year: i32,
        max_year: i32,
    },

    #[error("Duplicate year bucket label: {0}")]
    DuplicateBucket(String),

    #[error("Year buckets {0} and {1} overlap")]
    OverlappingBuckets(String, String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Listing error: {0}")]
    Listing(String),
}

impl FilterError {
    /// True for the "feature not present on this page" class of failures.
    pub fn is_missing_anchor(&self) -> bool {
        matches!(self, FilterError::MissingAnchor(_))
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
