// pathvcf: Convert paired-path variant caller output to VCF.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Decide the mapping status of the two paths of a variant.
//!
//! The number of mismatches allowed for a placement is raised from 0 until
//! one of the thresholds gives a decision or the configured maximum is
//! reached. At each threshold `t` a path's placements are its primary
//! alignment and the alternative hits listed by the mapper, counted if they
//! have at most `t` mismatches:
//!
//!   - no placements for either path: unmapped, try the next threshold.
//!   - more than one placement for a path: multiple.
//!   - otherwise at least one path is placed uniquely: ok.
//!
use crate::Filter;
use crate::parser::sam::AlignmentRecord;

/// Outcome of [validate] at a single threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Ok,
    Multiple,
    Unmapped,
    /// A mapped path has no mismatch count.
    Indeterminate,
}

/// How many of the two paths have alternative placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiFlag {
    None,
    One,
    Multi,
}

impl MultiFlag {
    pub fn from_pair(
        up: &AlignmentRecord,
        low: &AlignmentRecord,
    ) -> Self {
        match (up.has_alternate_hits(), low.has_alternate_hits()) {
            (false, false) => MultiFlag::None,
            (true, true) => MultiFlag::Multi,
            _ => MultiFlag::One,
        }
    }
}

impl std::fmt::Display for MultiFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MultiFlag::None => write!(f, "none"),
            MultiFlag::One => write!(f, "one"),
            MultiFlag::Multi => write!(f, "multi"),
        }
    }
}

/// Mapping status of a pair of paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub filter: Filter,
    /// Threshold at which the pair was placed, None unless `filter` is PASS.
    pub mismatch_used: Option<u32>,
    pub multi: MultiFlag,
    /// Only one of the paths is mapped, and with more mismatches than allowed.
    pub dmax: bool,
}

/// Classify the placements of `up` and `low` allowing `threshold` mismatches.
pub fn validate(
    up: &AlignmentRecord,
    low: &AlignmentRecord,
    threshold: u32,
) -> Validation {
    let (Some(up_hits), Some(low_hits)) = (up.placements(), low.placements()) else {
        return Validation::Indeterminate
    };
    let n_up = up_hits.iter().filter(|nm| **nm <= threshold).count();
    let n_low = low_hits.iter().filter(|nm| **nm <= threshold).count();

    match (n_up, n_low) {
        (0, 0) => Validation::Unmapped,
        (n_up, n_low) if n_up > 1 || n_low > 1 => Validation::Multiple,
        _ => Validation::Ok,
    }
}

/// Decide the mapping status of a pair.
///
/// Sweeps the threshold from 0 to `max_mismatches` (inclusive) and stops at
/// the first threshold where [validate] returns anything but
/// [Unmapped](Validation::Unmapped). Thresholds above the largest mismatch
/// count of any placement give the same outcome and are not evaluated.
///
/// ## Usage
///
/// ```rust
/// use pathvcf::Filter;
/// use pathvcf::parser::sam::read_sam;
/// use pathvcf::reconcile::reconcile;
///
/// let up = read_sam(b"SNP_higher_path_1|C1_5\t0\tchr1\t100\t60\t5M\t*\t0\t0\tACAGT\t*\tNM:i:2").unwrap();
/// let low = read_sam(b"SNP_lower_path_1|C1_2\t4\t*\t0\t0\t*\t*\t0\t0\tACGGT\t*").unwrap();
///
/// let got = reconcile(&up, &low, 3);
///
/// assert_eq!(got.filter, Filter::Pass);
/// assert_eq!(got.mismatch_used, Some(2));
/// ```
///
pub fn reconcile(
    up: &AlignmentRecord,
    low: &AlignmentRecord,
    max_mismatches: u32,
) -> Reconciliation {
    let mut outcome = Validation::Unmapped;
    let mut decided_at: Option<u32> = None;
    let largest: u32 = [up.placements(), low.placements()].into_iter().flatten().flatten().max().unwrap_or(0);
    for threshold in 0..=max_mismatches.min(largest) {
        outcome = validate(up, low, threshold);
        if outcome != Validation::Unmapped {
            decided_at = Some(threshold);
            break;
        }
    }

    let (filter, mismatch_used) = match outcome {
        Validation::Ok => (Filter::Pass, decided_at),
        Validation::Multiple => (Filter::Multiple, None),
        Validation::Unmapped => (Filter::Unmapped, None),
        Validation::Indeterminate => (Filter::Problem, None),
    };

    let dmax = outcome == Validation::Unmapped && up.is_mapped() != low.is_mapped();

    Reconciliation {
        filter, mismatch_used, dmax,
        multi: MultiFlag::from_pair(up, low),
    }
}
