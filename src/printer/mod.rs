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

//! Printer for outputting [VcfRecord](crate::VcfRecord)s as VCF data lines.
//!
//! The meta-information and column header lines are built by
//! [build_vcf_header](crate::headers::vcf::build_vcf_header) and written by
//! [format_vcf_header](crate::headers::vcf::format_vcf_header).
//!
//! ## Usage
//!
//! ```rust
//! use pathvcf::{Filter, Info, Sample, VariantType, VcfRecord};
//! use pathvcf::printer::vcf::format_vcf_file;
//!
//! let record = VcfRecord {
//!     chrom: Some("chr1".to_string()),
//!     pos: Some(102),
//!     id: 12,
//!     ref_allele: "A".to_string(),
//!     alt_allele: "G".to_string(),
//!     qual: Some(60),
//!     filter: Some(Filter::Pass),
//!     info: Info { variant_type: Some(VariantType::Snp), coverage: vec![5, 2], ..Default::default() },
//!     samples: vec![Sample { genotype: "0/1".to_string(), depth: 7, likelihoods: None }],
//! };
//!
//! let mut output: Vec<u8> = Vec::new();
//! format_vcf_file(&[record], &mut output).unwrap();
//!
//! assert_eq!(output, b"chr1\t102\t12\tA\tG\t60\tPASS\tTy=SNP;C=5,2\tGT:DP\t0/1:7\n".to_vec());
//! ```
//!

// Format specific implementations
pub mod vcf;
