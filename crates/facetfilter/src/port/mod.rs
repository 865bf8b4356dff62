//! # Listing Port
//!
//! This module defines the seam between the engine and the page. The
//! [`ListingPort`] trait is everything the controller may read from or write
//! to the listing; nothing else in the crate touches the page.
//!
//! ## Anchors
//!
//! Pages opt into filtering by carrying the expected elements. When one is
//! absent the port reports [`FilterError::MissingAnchor`] and the controller
//! treats the feature as not present on that page:
//!
//! - **Panel** (required): without it every controller operation is a no-op.
//! - **Badge** (optional): badge updates are skipped, filtering still works.
//! - **Indicator arrow** (optional): handled inside `set_panel_open`.
//!
//! ## Implementations
//!
//! - [`memory::MemListing`]: in-memory page, also loadable from a JSON
//!   snapshot. Used by tests and headless hosts.
//!
//! [`FilterError::MissingAnchor`]: crate::error::FilterError::MissingAnchor

use crate::error::Result;
use crate::model::{FacetInput, InputId, Item, ItemId};

pub mod memory;

/// What the active-selection badge should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Hidden,
    Count(usize),
}

impl Badge {
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            Badge::Hidden
        } else {
            Badge::Count(count)
        }
    }
}

/// Abstract interface to the listing page.
///
/// All methods take `&self`; implementations that record writes use interior
/// mutability since the engine is single-threaded.
pub trait ListingPort {
    // --- Reads ---

    /// All facet inputs inside the filter panel, in document order.
    fn facet_inputs(&self) -> Result<Vec<FacetInput>>;

    /// All listed items, in listing order.
    fn items(&self) -> Result<Vec<Item>>;

    /// The raw query string of the page URL, with or without the leading `?`.
    fn query_string(&self) -> Result<Option<String>>;

    /// Whether the page carries the filter panel at all.
    fn has_panel(&self) -> bool;

    // --- Writes ---

    /// The class that marks an item as hidden by the filter. Set once when the
    /// controller is built, before any visibility write.
    fn set_hidden_class(&self, class: &str);

    /// Remove (`true`) or add (`false`) the hidden marker on an item.
    fn set_item_visible(&self, id: &ItemId, visible: bool) -> Result<()>;

    fn set_badge(&self, badge: Badge) -> Result<()>;

    fn set_input_checked(&self, id: &InputId, checked: bool) -> Result<()>;

    /// Show or hide the filter panel, rotating the indicator if present.
    fn set_panel_open(&self, open: bool) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_hidden_at_zero() {
        assert_eq!(Badge::from_count(0), Badge::Hidden);
        assert_eq!(Badge::from_count(1), Badge::Count(1));
        assert_eq!(Badge::from_count(12), Badge::Count(12));
    }
}
