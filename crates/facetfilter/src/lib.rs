//! # Facetfilter Architecture
//!
//! Facetfilter is the filtering core of a product-listing page. A user ticks
//! values across independent facets (category, manufacturer, type, model,
//! drivetrain, year range) and the engine decides which listed items stay
//! visible.
//!
//! The engine knows nothing about browsers. Everything it reads or writes
//! goes through the [`port::ListingPort`] trait, so the same core runs against
//! a real page adapter, a JSON snapshot, or a test double.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Controller (controller.rs)                                 │
//! │  - Owns Selection, surface state, last VisibilitySet        │
//! │  - Every public method is a failure boundary                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Pure Core (selection.rs, matcher.rs, index.rs, facets/)    │
//! │  - Selection State, Match Evaluator, Item Index, Registry   │
//! │  - No I/O, never touches the port                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Port (port/)                                               │
//! │  - ListingPort trait                                        │
//! │  - MemListing (in-memory page, JSON snapshots)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Matching Rules
//!
//! - Facets combine with AND, values within a facet with OR.
//! - Categorical facets compare strings exactly.
//! - The year facet selects labelled buckets; see [`facets::YearBuckets`].
//! - An empty selection shows everything without evaluating items.
//!
//! ## Usage
//!
//! ```
//! use facetfilter::config::FilterConfig;
//! use facetfilter::controller::FilterController;
//! use facetfilter::model::FacetInput;
//! use facetfilter::port::memory::{ItemMarkup, MemListing};
//!
//! let listing = MemListing::new()
//!     .with_items(vec![
//!         ItemMarkup::new("t1").data("kategorie", "tractors").data("rok", "2022"),
//!         ItemMarkup::new("c1").data("kategorie", "combines").data("rok", "2022"),
//!     ])
//!     .with_inputs(vec![FacetInput::new("f1", "kategorie", "tractors").checked()]);
//!
//! let settings = FilterConfig::default().settings().unwrap();
//! let mut controller = FilterController::new(listing, settings);
//! controller.apply();
//!
//! assert_eq!(controller.port().visible_ids(), vec!["t1"]);
//! ```
//!
//! ## Module Overview
//!
//! - [`controller`]: Page-level state and the event entry points
//! - [`selection`]: Selection State, the chosen values per facet
//! - [`matcher`]: Match Evaluator and visibility partitioning
//! - [`index`]: Read-only ordered Item Index
//! - [`facets`]: Facet registry and year buckets
//! - [`model`]: Core data types (`Item`, `FacetInput`, ids)
//! - [`port`]: Listing port trait and the in-memory page
//! - [`config`]: Layered configuration
//! - [`error`]: Error types

pub mod config;
pub mod controller;
pub mod error;
pub mod facets;
pub mod index;
pub mod matcher;
pub mod model;
pub mod port;
pub mod selection;
