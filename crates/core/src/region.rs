//! High-density region selection.
//!
//! The densest block seeds the region. Any other block joins when it lies
//! within its own leash of a member, where the leash grows linearly with the
//! block's text length between `min_leash` and `max_leash`. Joining is
//! repeated until a full scan adds nothing, so distant blocks can be pulled
//! in through intermediate ones. The result is the contiguous index span
//! covering every member.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::density::BlockRecord;
use crate::{PithError, Result};

/// Parameters of the clamped linear map from text length to leash distance.
///
/// # Example
///
/// ```rust
/// use pith_core::LeashParams;
///
/// let params = LeashParams::default();
/// assert_eq!(params.leash(50), 5);
/// assert_eq!(params.leash(2000), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeashParams {
    pub min_length: f64,
    pub max_length: f64,
    pub min_leash: f64,
    pub max_leash: f64,
}

impl Default for LeashParams {
    fn default() -> Self {
        Self { min_length: 0.0, max_length: 400.0, min_leash: 0.0, max_leash: 40.0 }
    }
}

impl LeashParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PithError::InvalidConfig`] unless `max_length > min_length`,
    /// `max_leash >= min_leash` and every value is finite.
    pub fn new(min_length: f64, max_length: f64, min_leash: f64, max_leash: f64) -> Result<Self> {
        let params = Self { min_length, max_length, min_leash, max_leash };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if ![self.min_length, self.max_length, self.min_leash, self.max_leash].iter().all(|v| v.is_finite()) {
            return Err(PithError::InvalidConfig("leash parameters must be finite".to_string()));
        }
        if self.max_length <= self.min_length {
            return Err(PithError::InvalidConfig(format!(
                "max_length ({}) must be greater than min_length ({})",
                self.max_length, self.min_length
            )));
        }
        if self.max_leash < self.min_leash {
            return Err(PithError::InvalidConfig(format!(
                "max_leash ({}) must not be less than min_leash ({})",
                self.max_leash, self.min_leash
            )));
        }
        Ok(())
    }

    /// Allowed index distance for a block of `len` bytes
    pub fn leash(&self, len: i64) -> usize {
        let span = self.max_length - self.min_length;
        let raw = (self.max_leash - self.min_leash) * (len as f64 - self.min_length) / span + self.min_leash;

        let clamped = if raw < self.min_leash {
            self.min_leash
        } else if raw > self.max_leash {
            self.max_leash
        } else {
            raw
        };

        if clamped.is_nan() || clamped <= 0.0 { 0 } else { clamped.trunc() as usize }
    }
}

/// The selected span of the density table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Index of the record with the longest text
    pub smax: usize,
    pub start: usize,
    pub end: usize,
    /// Every index that joined, in ascending order
    #[serde(skip)]
    pub members: BTreeSet<usize>,
}

impl Region {
    /// Indices of the contiguous span, both ends included
    pub fn span(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Select the high-density region of a density table.
///
/// # Errors
///
/// Returns [`PithError::EmptyDensity`] if `records` is empty.
pub fn select_region(records: &[BlockRecord], params: &LeashParams) -> Result<Region> {
    let smax = densest(records).ok_or(PithError::EmptyDensity)?;

    let leashes: Vec<usize> = records.iter().map(|r| params.leash(r.len() as i64)).collect();
    let mut members = BTreeSet::from([smax]);

    loop {
        let mut grew = false;
        for (i, &leash) in leashes.iter().enumerate() {
            if members.contains(&i) {
                continue;
            }
            if members.iter().any(|&j| i.abs_diff(j) < leash) {
                members.insert(i);
                grew = true;
            }
        }
        if !grew {
            break;
        }
    }

    let start = members.first().copied().unwrap_or(smax);
    let end = members.last().copied().unwrap_or(smax);
    debug!(smax, start, end, members = members.len(), "selected region");

    Ok(Region { smax, start, end, members })
}

/// First index holding the longest text
fn densest(records: &[BlockRecord]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, record) in records.iter().enumerate() {
        match best {
            Some((_, len)) if record.len() <= len => {}
            _ => best = Some((i, record.len())),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_tree::DomTree;
    use rstest::rstest;

    fn records(lengths: &[usize]) -> Vec<BlockRecord> {
        let block = DomTree::new().root();
        lengths.iter().map(|&n| BlockRecord { block, text: "x".repeat(n) }).collect()
    }

    #[rstest]
    #[case(50, 5)]
    #[case(-50, 0)]
    #[case(2000, 40)]
    #[case(400, 40)]
    #[case(0, 0)]
    #[case(6, 0)]
    #[case(10, 1)]
    #[case(399, 39)]
    fn test_default_leash(#[case] len: i64, #[case] expected: usize) {
        assert_eq!(LeashParams::default().leash(len), expected);
    }

    #[test]
    fn test_leash_with_raised_floor() {
        let params = LeashParams::new(100.0, 200.0, 2.0, 6.0).unwrap();
        assert_eq!(params.leash(0), 2);
        assert_eq!(params.leash(150), 4);
        assert_eq!(params.leash(1000), 6);
    }

    #[rstest]
    #[case(0.0, 0.0, 0.0, 40.0)]
    #[case(400.0, 0.0, 0.0, 40.0)]
    #[case(0.0, 400.0, 40.0, 0.0)]
    #[case(0.0, f64::INFINITY, 0.0, 40.0)]
    #[case(f64::NAN, 400.0, 0.0, 40.0)]
    fn test_invalid_params_rejected(#[case] a: f64, #[case] b: f64, #[case] c: f64, #[case] d: f64) {
        assert!(matches!(LeashParams::new(a, b, c, d), Err(PithError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let result = select_region(&[], &LeashParams::default());
        assert!(matches!(result, Err(PithError::EmptyDensity)));
    }

    #[test]
    fn test_smax_ties_resolve_to_first() {
        let region = select_region(&records(&[0, 30, 30, 0]), &LeashParams::default()).unwrap();
        assert_eq!(region.smax, 1);
    }

    #[test]
    fn test_long_neighbour_joins() {
        // body, div, 60-byte p, 500-byte p
        let region = select_region(&records(&[0, 0, 60, 500]), &LeashParams::default()).unwrap();

        assert_eq!(region.smax, 3);
        assert_eq!((region.start, region.end), (2, 3));
        assert_eq!(region.members, BTreeSet::from([2, 3]));
    }

    #[test]
    fn test_short_neighbour_stays_out() {
        let region = select_region(&records(&[0, 0, 6, 500]), &LeashParams::default()).unwrap();
        assert_eq!((region.start, region.end), (3, 3));
    }

    #[test]
    fn test_growth_reaches_fixed_point_through_intermediates() {
        // index 5 (leash 2) only reaches index 3 once index 4 (leash 2) has
        // joined from smax at 3; index 7 (leash 3) then reaches index 5.
        let region = select_region(&records(&[0, 0, 0, 400, 20, 20, 0, 30]), &LeashParams::default()).unwrap();

        assert_eq!(region.smax, 3);
        assert_eq!(region.members, BTreeSet::from([3, 4, 5, 7]));
        assert_eq!(region.span(), 3..=7);
    }

    #[test]
    fn test_lower_index_joins_on_a_later_scan() {
        // index 2 (leash 3) is too far from smax at 5 and only reaches index 4
        // (leash 2), which joins after index 2 was already scanned.
        let region = select_region(&records(&[0, 0, 30, 0, 20, 400]), &LeashParams::default()).unwrap();

        assert_eq!(region.smax, 5);
        assert_eq!(region.members, BTreeSet::from([2, 4, 5]));
        assert_eq!(region.span(), 2..=5);
    }

    #[test]
    fn test_region_contains_smax() {
        let tables: [&[usize]; 4] = [&[0], &[5, 0, 0], &[0, 12, 300, 0, 90, 1, 44], &[400, 400, 400]];
        for lengths in tables {
            let region = select_region(&records(lengths), &LeashParams::default()).unwrap();
            assert!(region.start <= region.smax && region.smax <= region.end, "{:?}", lengths);
            assert!(region.members.contains(&region.smax));
        }
    }
}
