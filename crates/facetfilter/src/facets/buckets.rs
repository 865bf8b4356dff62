//! Year buckets.
//!
//! The year facet does not compare years for equality. Its inputs carry a
//! bucket label (e.g. `"2020"`) and an item matches when its year falls inside
//! the labelled interval. Intervals are inclusive on both ends and must not
//! overlap, so a year belongs to at most one bucket.

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// A labelled, inclusive year interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBucket {
    pub label: String,
    pub min_year: i32,
    pub max_year: i32,
}

impl YearBucket {
    pub fn new(label: impl Into<String>, min_year: i32, max_year: i32) -> Self {
        Self {
            label: label.into(),
            min_year,
            max_year,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min_year && year <= self.max_year
    }

    fn overlaps(&self, other: &YearBucket) -> bool {
        self.min_year <= other.max_year && other.min_year <= self.max_year
    }
}

/// The built-in bucket table, used when configuration provides none.
pub fn default_buckets() -> Vec<YearBucket> {
    vec![
        YearBucket::new("2020", 2020, 2025),
        YearBucket::new("2015", 2015, 2019),
        YearBucket::new("2010", 2010, 2014),
    ]
}

/// A validated bucket table: unique labels, disjoint intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearBuckets {
    buckets: Vec<YearBucket>,
}

impl Default for YearBuckets {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
        }
    }
}

impl YearBuckets {
    pub fn new(buckets: Vec<YearBucket>) -> Result<Self> {
        for (i, bucket) in buckets.iter().enumerate() {
            if bucket.min_year > bucket.max_year {
                return Err(FilterError::InvalidBucket {
                    label: bucket.label.clone(),
                    min_year: bucket.min_year,
                    max_year: bucket.max_year,
                });
            }
            for earlier in &buckets[..i] {
                if earlier.label == bucket.label {
                    return Err(FilterError::DuplicateBucket(bucket.label.clone()));
                }
                if earlier.overlaps(bucket) {
                    return Err(FilterError::OverlappingBuckets(
                        earlier.label.clone(),
                        bucket.label.clone(),
                    ));
                }
            }
        }
        Ok(Self { buckets })
    }

    /// Look up a bucket by the label carried on a year input.
    pub fn get(&self, label: &str) -> Option<&YearBucket> {
        self.buckets.iter().find(|b| b.label == label)
    }

    /// The single bucket containing `year`, if any.
    pub fn bucket_for_year(&self, year: i32) -> Option<&YearBucket> {
        self.buckets.iter().find(|b| b.contains(year))
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearBucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
