//! # Configuration
//!
//! Filter configuration is managed by [`confique`], which handles layered
//! loading from a TOML file, environment variables and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `FACETFILTER_QUERY_PARAM`, `FACETFILTER_HIDDEN_CLASS`.
//! 2. **Config file**: an optional TOML file supplied by the host.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `query_param` | `kategorie` | URL parameter that pre-selects a category |
//! | `hidden_class` | `hidden-filter` | Class marking an item hidden by the filter |
//! | `year_buckets` | 2020, 2015, 2010 | Labelled year intervals for the year facet |
//!
//! ```toml
//! query_param = "category"
//!
//! [[year_buckets]]
//! label = "2020"
//! min_year = 2020
//! max_year = 2025
//! ```

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::facets::{default_buckets, YearBucket, YearBuckets};

/// Configuration for the filter engine.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Query parameter whose value pre-selects a category at load.
    #[config(env = "FACETFILTER_QUERY_PARAM", default = "kategorie")]
    pub query_param: String,

    /// Class applied to items hidden by the filter.
    #[config(env = "FACETFILTER_HIDDEN_CLASS", default = "hidden-filter")]
    pub hidden_class: String,

    /// Year buckets. When absent, the built-in table is used.
    pub year_buckets: Option<Vec<YearBucket>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            query_param: "kategorie".to_string(),
            hidden_class: "hidden-filter".to_string(),
            year_buckets: None,
        }
    }
}

impl FilterConfig {
    /// Load from the environment and an optional TOML file.
    ///
    /// A missing file is not an error; confique skips it.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = FilterConfig::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Year buckets, using defaults if not configured.
    pub fn year_buckets(&self) -> Vec<YearBucket> {
        self.year_buckets.clone().unwrap_or_else(default_buckets)
    }

    /// Validate and resolve into the settings the controller runs with.
    pub fn settings(&self) -> Result<FilterSettings> {
        Ok(FilterSettings {
            query_param: self.query_param.clone(),
            hidden_class: self.hidden_class.clone(),
            buckets: YearBuckets::new(self.year_buckets())?,
        })
    }
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    pub query_param: String,
    pub hidden_class: String,
    pub buckets: YearBuckets,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            query_param: "kategorie".to_string(),
            hidden_class: "hidden-filter".to_string(),
            buckets: YearBuckets::default(),
        }
    }
}
