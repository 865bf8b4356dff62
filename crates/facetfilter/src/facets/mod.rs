//! # Facet Registry
//!
//! The closed set of filtering dimensions and the year-bucket table.
//!
//! | Facet | Markup key | Kind |
//! |-------|------------|------|
//! | `Category` | `kategorie` | categorical |
//! | `Manufacturer` | `vyrobce` | categorical |
//! | `Type` | `typ` | categorical |
//! | `Model` | `model` | categorical |
//! | `Drivetrain` | `system` | categorical |
//! | `Year` | `rok` | year range |
//!
//! Markup keys are what pages carry: `data-filter="vyrobce"` on an input and
//! `data-vyrobce="Claas"` on a listing item. Anything outside this table is
//! not a facet and is ignored by the engine.

mod buckets;
mod spec;

pub use buckets::{default_buckets, YearBucket, YearBuckets};
pub use spec::{categorical_facets, Facet, FacetKind, FacetSpec, FACETS};
