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

//! pathvcf is a library and a command-line client for converting the
//! output of paired-path variant callers into [VCF](https://samtools.github.io/hts-specs/VCFv4.1.pdf).
//!
//! A paired-path caller reports every variant as two sequences: the higher
//! ("up") and the lower ("low") path. Each path carries a descriptor in its
//! identifier with the variant id, the coverage of the path in each input
//! dataset, the positions of the polymorphisms, and optionally genotypes.
//!
//! Two inputs are supported:
//!   - [SAM](https://samtools.github.io/hts-specs/SAMv1.pdf) produced by
//!     aligning both paths of every variant to a reference genome with a
//!     short-read mapper (aligned mode).
//!   - The FASTA file written by the caller (ghost mode). No reference is
//!     involved and the alleles are reported relative to the higher path.
//!
//! ## Usage
//!
//! ### Command line
//!
//! ```text
//! pathvcf --input variants.sam --output variants.vcf --mismatches 3
//! pathvcf --input variants.fa --output variants.vcf
//! ```
//!
//! ### Rust API
//!
//! [convert_from_read_to_write] converts an entire stream. For access to one
//! variant at a time, the following are provided:
//!
//!   - [Parser](parser::Parser): reads one [PathPair] at a time from a [Read].
//!   - [reconcile](reconcile::reconcile): decides the mapping status of a pair.
//!   - [emit_records](classify::emit_records): turns a pair into [VcfRecord]s.
//!   - [format_vcf_line](printer::vcf::format_vcf_line): formats a [VcfRecord].
//!

use std::io::Read;
use std::io::Write;

use headers::variant::Extensions;
use headers::variant::VariantHeader;
use headers::vcf::build_vcf_header;
use headers::vcf::format_vcf_header;
use parser::sam::AlignmentRecord;
use printer::vcf::format_vcf_line;
use reconcile::MultiFlag;
use reconcile::Reconciliation;

pub mod allele;
pub mod classify;
pub mod coverage;
pub mod format;
pub mod headers;
pub mod parser;
pub mod printer;
pub mod reconcile;

type E = Box<dyn std::error::Error>;

/// Raised when two consecutive records do not describe the same variant.
#[derive(Debug, Clone)]
pub struct PairMismatch {
    pub up: String,
    pub low: String,
    pub reason: String,
}

impl std::fmt::Display for PairMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "two consecutive records do not store the same variant ({}):\n{}\n{}", self.reason, self.up, self.low)
    }
}

impl std::error::Error for PairMismatch {}

/// Raised when a variant declares a different number of datasets than the
/// variants before it.
#[derive(Debug, Clone)]
pub struct SampleCountMismatch {
    pub variant_id: u64,
    pub expected: usize,
    pub got: usize,
}

impl std::fmt::Display for SampleCountMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "variant {} has coverage for {} datasets, expected {}", self.variant_id, self.got, self.expected)
    }
}

impl std::error::Error for SampleCountMismatch {}

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Largest number of mismatches considered when deciding the mapping status.
    pub max_mismatches: u32,
    /// Value of the `##fileDate` line.
    pub file_date: String,
}

impl Default for Config {
    fn default() -> Self {
        Config { max_mismatches: 3, file_date: String::new() }
    }
}

/// Which of the two paths of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSide {
    /// The higher path.
    Up,
    /// The lower path.
    Low,
}

impl PathSide {
    pub fn other(self) -> Self {
        match self {
            PathSide::Up => PathSide::Low,
            PathSide::Low => PathSide::Up,
        }
    }
}

/// One path of a variant.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    pub header: VariantHeader,
    /// Path sequence in the orientation written by the caller.
    pub sequence: Vec<u8>,
    pub alignment: Option<AlignmentRecord>,
}

impl PathRecord {
    /// Build from an alignment, undoing the reverse complement applied by
    /// the mapper to reverse strand alignments.
    pub fn from_alignment(
        header: VariantHeader,
        alignment: AlignmentRecord,
    ) -> Self {
        let sequence = if alignment.is_reverse() {
            allele::reverse_complement(&alignment.sequence)
        } else {
            alignment.sequence.clone()
        };
        PathRecord { header, sequence, alignment: Some(alignment) }
    }
}

/// The two paths of one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPair {
    pub up: PathRecord,
    pub low: PathRecord,
}

impl PathPair {
    /// Pair two consecutive records.
    ///
    /// The records are swapped if the lower path was written first.
    ///
    /// Terminates with a [PairMismatch] if the variant ids or the path types
    /// of the records differ, or if both are the same path of the variant.
    ///
    pub fn new(
        first: PathRecord,
        second: PathRecord,
    ) -> Result<Self, E> {
        let (up, low) = if first.header.side == PathSide::Low && second.header.side == PathSide::Up {
            (second, first)
        } else {
            (first, second)
        };

        let reason = if up.header.variant_id != low.header.variant_id {
            Some(format!("variant ids {} and {}", up.header.variant_id, low.header.variant_id))
        } else if up.header.path_type != low.header.path_type {
            Some(format!("path types {} and {}", up.header.path_type, low.header.path_type))
        } else if up.header.side == low.header.side {
            Some(format!("path sides {:?} and {:?}", up.header.side, low.header.side))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(Box::new(PairMismatch {
                up: up.header.descriptor.clone(),
                low: low.header.descriptor.clone(),
                reason,
            }))
        }

        Ok(PathPair { up, low })
    }

    pub fn path(
        &self,
        side: PathSide,
    ) -> &PathRecord {
        match side {
            PathSide::Up => &self.up,
            PathSide::Low => &self.low,
        }
    }

    pub fn variant_id(&self) -> u64 {
        self.up.header.variant_id
    }

    /// Both alignments, or None in ghost mode.
    pub fn alignments(&self) -> Option<(&AlignmentRecord, &AlignmentRecord)> {
        Some((self.up.alignment.as_ref()?, self.low.alignment.as_ref()?))
    }
}

/// Mapping status reported in the FILTER column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Pass,
    Multiple,
    Unmapped,
    /// The mapping status could not be determined.
    Problem,
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Filter::Pass => write!(f, "PASS"),
            Filter::Multiple => write!(f, "MULTIPLE"),
            Filter::Unmapped => write!(f, "."),
            Filter::Problem => write!(f, "PROBLEM"),
        }
    }
}

/// Value of the `Ty` INFO key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantType {
    Snp,
    Insertion,
    Deletion,
}

impl std::fmt::Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VariantType::Snp => write!(f, "SNP"),
            VariantType::Insertion => write!(f, "INS"),
            VariantType::Deletion => write!(f, "DEL"),
        }
    }
}

/// Contents of the INFO column.
///
/// Keys set to None (and `dmax` set to false) are left out of the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    /// `Ty`, None if the reference path of an indel is undefined.
    pub variant_type: Option<VariantType>,
    /// `Rk`
    pub rank: Option<f64>,
    /// `DT`, -1 if the mapping was not decided.
    pub mismatches: Option<i64>,
    /// `UL`, `UR`, `CL` and `CR`
    pub extensions: Extensions,
    /// `C`, coverage of the higher path in each dataset followed by the lower path.
    pub coverage: Vec<u32>,
    /// `Genome`
    pub genome: Option<String>,
    /// `Sd`, 1 for reverse and 0 for forward alignments.
    pub strand: Option<u8>,
    /// `MULTI`
    pub multi: Option<MultiFlag>,
    /// `DMAX`
    pub dmax: bool,
}

/// Values of the FORMAT keys for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub genotype: String,
    pub depth: u32,
    pub likelihoods: Option<String>,
}

/// A single VCF data line.
#[derive(Debug, Clone, PartialEq)]
pub struct VcfRecord {
    pub chrom: Option<String>,
    /// 1-based
    pub pos: Option<usize>,
    pub id: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub qual: Option<u8>,
    pub filter: Option<Filter>,
    pub info: Info,
    pub samples: Vec<Sample>,
}

/// Counts reported at the end of a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub pairs: usize,
    pub records: usize,
    pub pass: usize,
    pub multiple: usize,
    pub unmapped: usize,
    pub problem: usize,
}

impl Summary {
    fn add(
        &mut self,
        record: &VcfRecord,
    ) {
        self.records += 1;
        match record.filter {
            Some(Filter::Pass) => self.pass += 1,
            Some(Filter::Multiple) => self.multiple += 1,
            Some(Filter::Unmapped) => self.unmapped += 1,
            Some(Filter::Problem) => self.problem += 1,
            None => (),
        }
    }
}

/// Convert the two paths of one variant into VCF records.
///
/// Decides the mapping status with [reconcile](reconcile::reconcile) if the
/// paths were aligned and emits the records with
/// [emit_records](classify::emit_records).
///
pub fn convert_pair(
    config: &Config,
    pair: &PathPair,
) -> Result<Vec<VcfRecord>, E> {
    let reconciliation: Option<Reconciliation> = pair.alignments().map(|(up, low)| {
        reconcile::reconcile(up, low, config.max_mismatches)
    });
    classify::emit_records(pair, reconciliation.as_ref())
}

/// Convert paired-path data from [Read] to VCF written to [Write].
///
/// Writes the VCF header, with one sample column per dataset in the first
/// variant, and the records of every variant in input order.
///
/// ## Errors
///
/// Stops at the first pair that cannot be converted. Nothing is written for
/// that pair, but the records of the variants before it have already been
/// written to `conn_out`.
///
/// ## Usage
///
/// ```rust
/// use pathvcf::{convert_from_read_to_write, Config};
/// use pathvcf::format::Mode;
/// use std::io::Cursor;
///
/// let mut input_bytes: Vec<u8> = Vec::new();
/// input_bytes.append(&mut b">SNP_higher_path_1|P_1:2_A/G|C1_5|C2_3|rank_0.5\nACAGT\n".to_vec());
/// input_bytes.append(&mut b">SNP_lower_path_1|P_1:2_A/G|C1_2|C2_7|rank_0.5\nACGGT\n".to_vec());
/// let mut input: Cursor<Vec<u8>> = Cursor::new(input_bytes);
///
/// let config = Config { max_mismatches: 3, file_date: "20250101".to_string() };
/// let mut output: Vec<u8> = Vec::new();
/// let summary = convert_from_read_to_write(&config, Mode::Ghost, &mut input, &mut output).unwrap();
///
/// let text = String::from_utf8(output).unwrap();
/// let mut lines = text.lines().rev();
/// assert_eq!(lines.next(), Some("SNP_higher_path_1\t3\t1\tA\tG\t.\t.\tTy=SNP;Rk=0.5;C=5,3,2,7\tGT:DP\t./.:7\t./.:10"));
/// assert_eq!(lines.next(), Some("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tG1\tG2"));
/// assert_eq!(summary.pairs, 1);
/// assert_eq!(summary.records, 1);
/// ```
///
pub fn convert_from_read_to_write<R: Read + Send, W: Write>(
    config: &Config,
    mode: format::Mode,
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<Summary, E> {
    let mut parser = parser::Parser::new(conn_in, mode)?;

    let mut next = parser.read_pair()?;
    let n_samples = next.as_ref().map_or(0, |pair| pair.up.header.coverage.len());
    let header = build_vcf_header(&config.file_date, n_samples)?;
    format_vcf_header(&header, conn_out)?;

    let mut summary = Summary::default();
    while let Some(pair) = next {
        let got = pair.up.header.coverage.len();
        if got != n_samples {
            return Err(Box::new(SampleCountMismatch { variant_id: pair.variant_id(), expected: n_samples, got }))
        }

        let records = convert_pair(config, &pair)?;
        for record in records.iter() {
            format_vcf_line(record, conn_out)?;
            summary.add(record);
        }
        summary.pairs += 1;

        next = parser.read_pair()?;
    }

    conn_out.flush()?;
    Ok(summary)
}

// Tests
#[cfg(test)]
mod tests {

    fn sam_input(lines: &[&str]) -> Vec<u8> {
        let mut bytes: Vec<u8> = b"@HD\tVN:1.6\tSO:unsorted\n@SQ\tSN:chr1\tLN:1000\n".to_vec();
        for line in lines {
            bytes.append(&mut line.as_bytes().to_vec());
            bytes.push(b'\n');
        }
        bytes
    }

    fn data_lines(output: &[u8]) -> Vec<String> {
        String::from_utf8(output.to_vec()).unwrap()
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.to_string())
            .collect()
    }

    #[test]
    fn convert_from_read_to_write_simple_snp() {
        use super::{convert_from_read_to_write, Config};
        use crate::format::Mode;
        use std::io::Cursor;

        let data = sam_input(&[
            "SNP_higher_path_12|P_1:2_A/G|C1_5|C2_3|G1_0/1|G2_0/0|rank_0.9\t0\tchr1\t100\t60\t5M\t*\t0\t0\tACAGT\t*\tNM:i:0\tMD:Z:5",
            "SNP_lower_path_12|P_1:2_A/G|C1_2|C2_7|G1_0/1|G2_0/0|rank_0.9\t0\tchr1\t100\t60\t5M\t*\t0\t0\tACGGT\t*\tNM:i:1\tMD:Z:2A2",
        ]);
        let mut input = Cursor::new(data);
        let mut output: Vec<u8> = Vec::new();
        let config = Config { max_mismatches: 3, file_date: "20250101".to_string() };

        let summary = convert_from_read_to_write(&config, Mode::Aligned, &mut input, &mut output).unwrap();

        let expected = vec![
            "chr1\t102\t12\tA\tG\t60\tPASS\tTy=SNP;Rk=0.9;DT=0;C=5,3,2,7;Genome=A;Sd=0;MULTI=none\tGT:DP\t0/1:7\t0/0:10".to_string(),
        ];
        assert_eq!(data_lines(&output), expected);
        assert_eq!(summary.pairs, 1);
        assert_eq!(summary.pass, 1);
    }

    #[test]
    fn convert_from_read_to_write_close_snps() {
        use super::{convert_from_read_to_write, Config};
        use crate::format::Mode;
        use std::io::Cursor;

        let data = sam_input(&[
            "SNP_higher_path_4|P_1:1_C/T,P_2:3_G/A|nb_pol_2|C1_6|G1_0/1\t0\tchr1\t10\t42\t5M\t*\t0\t0\tACAGT\t*\tNM:i:0",
            "SNP_lower_path_4|P_1:1_C/T,P_2:3_G/A|nb_pol_2|C1_4|G1_0/1\t4\t*\t0\t0\t*\t*\t0\t0\tATAAT\t*",
        ]);
        let mut input = Cursor::new(data);
        let mut output: Vec<u8> = Vec::new();
        let config = Config { max_mismatches: 2, file_date: "20250101".to_string() };

        convert_from_read_to_write(&config, Mode::Aligned, &mut input, &mut output).unwrap();

        let expected = vec![
            "chr1\t11\t4\tC\tT\t42\tPASS\tTy=SNP;DT=0;C=6,4;Genome=C;Sd=0;MULTI=none\tGT:DP\t0|1:10".to_string(),
            "chr1\t13\t4\tG\tA\t42\tPASS\tTy=SNP;DT=0;C=6,4;Genome=G;Sd=0;MULTI=none\tGT:DP\t0|1:10".to_string(),
        ];
        assert_eq!(data_lines(&output), expected);
    }

    #[test]
    fn convert_from_read_to_write_aborts_on_id_mismatch() {
        use super::{convert_from_read_to_write, Config};
        use crate::format::Mode;
        use std::io::Cursor;

        let data = sam_input(&[
            "SNP_higher_path_11|C1_5\t0\tchr1\t100\t60\t5M\t*\t0\t0\tACAGT\t*\tNM:i:0",
            "SNP_lower_path_12|C1_2\t0\tchr1\t100\t60\t5M\t*\t0\t0\tACGGT\t*\tNM:i:1",
        ]);
        let mut input = Cursor::new(data);
        let mut output: Vec<u8> = Vec::new();
        let config = Config { max_mismatches: 3, file_date: "20250101".to_string() };

        let got = convert_from_read_to_write(&config, Mode::Aligned, &mut input, &mut output);

        assert!(got.is_err());
        assert!(got.unwrap_err().to_string().contains("variant ids 11 and 12"));
        assert!(data_lines(&output).is_empty());
    }

    #[test]
    fn convert_from_read_to_write_is_deterministic() {
        use super::{convert_from_read_to_write, Config};
        use crate::format::Mode;
        use std::io::Cursor;

        let data = sam_input(&[
            "INDEL_higher_path_2|P_1:4_3|C1_5\t16\tchr1\t200\t30\t8M\t*\t0\t0\tAACGTTGC\t*\tNM:i:0",
            "INDEL_lower_path_2|P_1:4_3|C1_1\t4\t*\t0\t0\t*\t*\t0\t0\tGCAAGAACCGT\t*",
            "SNP_higher_path_3|C1_5\t4\t*\t0\t0\t*\t*\t0\t0\tACAGT\t*",
            "SNP_lower_path_3|C1_1\t4\t*\t0\t0\t*\t*\t0\t0\tACGGT\t*",
        ]);
        let config = Config { max_mismatches: 1, file_date: "20250101".to_string() };

        let mut first: Vec<u8> = Vec::new();
        convert_from_read_to_write(&config, Mode::Aligned, &mut Cursor::new(data.clone()), &mut first).unwrap();
        let mut second: Vec<u8> = Vec::new();
        convert_from_read_to_write(&config, Mode::Aligned, &mut Cursor::new(data), &mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(data_lines(&first).len(), 2);
    }

    #[test]
    fn convert_from_read_to_write_rejects_changing_sample_count() {
        use super::{convert_from_read_to_write, Config};
        use crate::format::Mode;
        use std::io::Cursor;

        let data = b">SNP_higher_path_1|C1_5|C2_3\nACAGT\n>SNP_lower_path_1|C1_2|C2_7\nACGGT\n>SNP_higher_path_2|C1_5\nACAGT\n>SNP_lower_path_2|C1_2\nACGGT\n".to_vec();
        let config = Config { max_mismatches: 3, file_date: "20250101".to_string() };
        let mut output: Vec<u8> = Vec::new();

        let got = convert_from_read_to_write(&config, Mode::Ghost, &mut Cursor::new(data), &mut output);

        assert!(got.is_err());
        assert_eq!(data_lines(&output).len(), 1);
    }

    #[test]
    fn path_pair_swaps_lower_first() {
        use super::{PathPair, PathRecord, PathSide};
        use crate::headers::variant::parse_variant_header;

        let low = PathRecord { header: parse_variant_header("SNP_lower_path_1|C1_2").unwrap(), sequence: b"ACGGT".to_vec(), alignment: None };
        let up = PathRecord { header: parse_variant_header("SNP_higher_path_1|C1_5").unwrap(), sequence: b"ACAGT".to_vec(), alignment: None };

        let got = PathPair::new(low, up).unwrap();

        assert_eq!(got.up.header.side, PathSide::Up);
        assert_eq!(got.low.sequence, b"ACGGT".to_vec());
        assert!(got.alignments().is_none());
    }

    #[test]
    fn path_pair_rejects_same_side_twice() {
        use super::{PathPair, PathRecord};
        use crate::headers::variant::parse_variant_header;

        let first = PathRecord { header: parse_variant_header("SNP_higher_path_1|C1_5").unwrap(), sequence: b"ACAGT".to_vec(), alignment: None };
        let second = PathRecord { header: parse_variant_header("SNP_higher_path_1|C1_2").unwrap(), sequence: b"ACGGT".to_vec(), alignment: None };

        let got = PathPair::new(first, second);

        assert!(got.is_err());
        assert!(got.unwrap_err().to_string().contains("path sides Up and Up"));
    }

    #[test]
    fn convert_from_read_to_write_rejects_two_higher_paths() {
        use super::{convert_from_read_to_write, Config};
        use crate::format::Mode;
        use std::io::Cursor;

        let data = b">SNP_higher_path_1|C1_5\nACAGT\n>SNP_higher_path_1|C1_2\nACGGT\n".to_vec();
        let config = Config { max_mismatches: 3, file_date: "20250101".to_string() };
        let mut output: Vec<u8> = Vec::new();

        let got = convert_from_read_to_write(&config, Mode::Ghost, &mut Cursor::new(data), &mut output);

        assert!(got.is_err());
        assert!(data_lines(&output).is_empty());
    }

    #[test]
    fn pair_mismatch_reports_whole_descriptors() {
        use super::{convert_from_read_to_write, Config};
        use crate::format::Mode;
        use std::io::Cursor;

        let data = b">SNP_higher_path_1|P_1:2_A/G|C1_5|rank_0.5\nACAGT\n>SNP_lower_path_2|P_1:2_A/G|C1_2|rank_0.5\nACGGT\n".to_vec();
        let config = Config { max_mismatches: 3, file_date: "20250101".to_string() };
        let mut output: Vec<u8> = Vec::new();

        let got = convert_from_read_to_write(&config, Mode::Ghost, &mut Cursor::new(data), &mut output);
        let message = got.unwrap_err().to_string();

        assert!(message.contains("SNP_higher_path_1|P_1:2_A/G|C1_5|rank_0.5"));
        assert!(message.contains("SNP_lower_path_2|P_1:2_A/G|C1_2|rank_0.5"));
    }

    #[test]
    fn convert_from_read_to_write_tied_best_hits() {
        use super::{convert_from_read_to_write, Config};
        use crate::format::Mode;
        use std::io::Cursor;

        let data = sam_input(&[
            "SNP_higher_path_12|C1_5\t0\tchr1\t100\t0\t5M\t*\t0\t0\tACAGT\t*\tNM:i:0\tX0:i:3",
            "SNP_lower_path_12|C1_2\t4\t*\t0\t0\t*\t*\t0\t0\tACGGT\t*",
        ]);
        let mut output: Vec<u8> = Vec::new();
        let config = Config { max_mismatches: 3, file_date: "20250101".to_string() };

        let summary = convert_from_read_to_write(&config, Mode::Aligned, &mut Cursor::new(data), &mut output).unwrap();

        let expected = vec![
            ".\t.\t12\tA\tG\t.\tMULTIPLE\tTy=SNP;DT=-1;C=5,2;Genome=.;MULTI=one\tGT:DP\t./.:7".to_string(),
        ];
        assert_eq!(data_lines(&output), expected);
        assert_eq!(summary.multiple, 1);
        assert_eq!(summary.pass, 0);
    }

    #[test]
    fn path_pair_rejects_different_types() {
        use super::{PathPair, PathRecord};
        use crate::headers::variant::parse_variant_header;

        let up = PathRecord { header: parse_variant_header("SNP_higher_path_1|C1_5").unwrap(), sequence: b"ACAGT".to_vec(), alignment: None };
        let low = PathRecord { header: parse_variant_header("INDEL_lower_path_1|C1_2").unwrap(), sequence: b"ACGGGT".to_vec(), alignment: None };

        assert!(PathPair::new(up, low).is_err());
    }
}
