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

//! Combine the per-dataset coverage and genotypes of the two paths.
use crate::PathPair;
use crate::PathSide;
use crate::headers::variant::GenotypeCall;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct CoverageMismatch {
    pub variant_id: u64,
    pub reason: String,
}

impl std::fmt::Display for CoverageMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "inconsistent datasets in variant {}: {}", self.variant_id, self.reason)
    }
}

impl std::error::Error for CoverageMismatch {}

/// Coverage and genotypes of a variant in each dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedCoverage {
    /// Sum of the coverage of both paths.
    pub depth: Vec<u32>,
    /// Genotype of each dataset, None if the caller did not genotype it.
    pub genotypes: Vec<Option<GenotypeCall>>,
    /// Coverage of the higher path followed by the lower path.
    pub per_path: Vec<u32>,
}

impl CombinedCoverage {
    /// True if any dataset has genotype likelihoods.
    pub fn has_likelihoods(&self) -> bool {
        self.genotypes.iter().any(|x| x.as_ref().is_some_and(|call| call.likelihoods.is_some()))
    }
}

/// Combine the coverage of the paths of `pair`.
///
/// Genotypes are taken from the descriptor of the `reference` path (the
/// higher path if None), or from the other path if the reference path has
/// no genotypes.
///
/// Terminates with a [CoverageMismatch] if the paths list coverage for a
/// different number of datasets, or if the genotypes do not cover every
/// dataset.
///
/// ## Usage
///
/// ```rust
/// use pathvcf::{PathPair, PathRecord};
/// use pathvcf::coverage::combine;
/// use pathvcf::headers::variant::parse_variant_header;
///
/// let up = PathRecord { header: parse_variant_header("SNP_higher_path_1|C1_5|C2_3").unwrap(), sequence: b"ACAGT".to_vec(), alignment: None };
/// let low = PathRecord { header: parse_variant_header("SNP_lower_path_1|C1_2|C2_7").unwrap(), sequence: b"ACGGT".to_vec(), alignment: None };
/// let pair = PathPair::new(up, low).unwrap();
///
/// let got = combine(&pair, None).unwrap();
/// assert_eq!(got.depth, vec![7, 10]);
/// assert_eq!(got.per_path, vec![5, 3, 2, 7]);
/// ```
///
pub fn combine(
    pair: &PathPair,
    reference: Option<PathSide>,
) -> Result<CombinedCoverage, E> {
    let up = &pair.up.header.coverage;
    let low = &pair.low.header.coverage;
    if up.len() != low.len() {
        return Err(Box::new(CoverageMismatch {
            variant_id: pair.variant_id(),
            reason: format!("coverage for {} and {} datasets", up.len(), low.len()),
        }))
    }

    let depth: Vec<u32> = up.iter().zip(low.iter()).map(|(x, y)| x.saturating_add(*y)).collect();
    let per_path: Vec<u32> = up.iter().chain(low.iter()).copied().collect();

    let side = reference.unwrap_or(PathSide::Up);
    let calls = if pair.path(side).header.genotypes.is_empty() {
        &pair.path(side.other()).header.genotypes
    } else {
        &pair.path(side).header.genotypes
    };
    if !calls.is_empty() && calls.len() != depth.len() {
        return Err(Box::new(CoverageMismatch {
            variant_id: pair.variant_id(),
            reason: format!("genotypes for {} of {} datasets", calls.len(), depth.len()),
        }))
    }
    let genotypes: Vec<Option<GenotypeCall>> = (0..depth.len()).map(|i| calls.get(i).cloned()).collect();

    Ok(CombinedCoverage { depth, genotypes, per_path })
}
