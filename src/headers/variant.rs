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

//! Parser for the variant descriptors written by the path caller.
//!
//! Each path of a variant carries a descriptor in its identifier. The
//! descriptor is a `|` separated list of tagged fields, for example
//!
//! ```text
//! SNP_higher_path_12|P_1:30_A/G|high|nb_pol_1|left_unitig_length_86|right_unitig_length_261|C1_5|C2_3|Q1_0|Q2_0|G1_0/1:12,0,34|G2_1/1:80,9,0|rank_0.51803
//! ```
//!
//! The first field is required and names the path type (`SNP` or `INDEL`),
//! the path side (`higher` or `lower`) and the variant id. At least one
//! `C<i>_<n>` coverage field is required. Everything else is optional.
//!
use std::str::FromStr;

use crate::PathSide;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct HeaderParseError {
    pub descriptor: String,
    pub reason: String,
}

impl std::fmt::Display for HeaderParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "invalid variant descriptor '{}': {}", self.descriptor, self.reason)
    }
}

impl std::error::Error for HeaderParseError {}

/// Type of the variant as declared by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    Snp,
    Indel,
}

impl FromStr for PathType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SNP" => Ok(PathType::Snp),
            "INDEL" => Ok(PathType::Indel),
            _ => Err(format!("'{}' is not a valid path type", s)),
        }
    }
}

impl std::fmt::Display for PathType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PathType::Snp => write!(f, "SNP"),
            PathType::Indel => write!(f, "INDEL"),
        }
    }
}

/// One polymorphic position of a SNP path.
///
/// `position` is the 0-based offset of the site in the path sequence as
/// written by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnpSite {
    pub position: usize,
    pub up_base: u8,
    pub low_base: u8,
}

/// Indel event declared by an INDEL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndelSite {
    pub position: usize,
    pub length: usize,
    pub ambiguity: Option<usize>,
}

/// Genotype of a single dataset, optionally with its likelihoods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenotypeCall {
    pub gt: String,
    pub likelihoods: Option<String>,
}

/// Lengths of the unitigs and contigs extending the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extensions {
    pub left_unitig: Option<usize>,
    pub right_unitig: Option<usize>,
    pub left_contig: Option<usize>,
    pub right_contig: Option<usize>,
}

/// Parsed variant descriptor of one path.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantHeader {
    /// The whole descriptor as read from the input.
    pub descriptor: String,
    /// First field of the descriptor, eg. `SNP_higher_path_12`.
    pub name: String,
    pub path_type: PathType,
    pub side: PathSide,
    /// Shared by both paths of a variant.
    pub variant_id: u64,
    pub rank: Option<f64>,
    /// Read coverage in each dataset, in declared order.
    pub coverage: Vec<u32>,
    pub sites: Vec<SnpSite>,
    pub indel: Option<IndelSite>,
    pub genotypes: Vec<GenotypeCall>,
    /// Value of the `nb_pol` field.
    pub declared_polymorphisms: Option<usize>,
    pub extensions: Extensions,
}

impl VariantHeader {
    /// Close SNPs are reported as a phased group.
    pub fn is_cluster(&self) -> bool {
        self.path_type == PathType::Snp && self.sites.len() > 1
    }
}

fn parse_name(
    name: &str,
) -> Result<(PathType, PathSide, u64), String> {
    let mut parts = name.split('_');
    let path_type = parts.next().unwrap_or_default().parse::<PathType>()?;
    let side = match parts.next() {
        Some("higher") | Some("upper") => PathSide::Up,
        Some("lower") => PathSide::Low,
        other => return Err(format!("unknown path side {:?}", other)),
    };
    if parts.next() != Some("path") {
        return Err(format!("'{}' is not a path name", name));
    }
    let id = parts.next().ok_or("missing variant id")?;
    let variant_id = id.parse::<u64>().map_err(|_| format!("variant id '{}' is not a number", id))?;
    if parts.next().is_some() {
        return Err(format!("trailing data after variant id in '{}'", name));
    }
    Ok((path_type, side, variant_id))
}

fn parse_number<T: FromStr>(
    key: &str,
    value: &str,
) -> Result<T, String> {
    value.parse::<T>().map_err(|_| format!("{} value '{}' is not a number", key, value))
}

/// Splits `C12_5` into (12, "5") for `prefix` 'C'.
fn indexed_field(
    field: &str,
    prefix: char,
) -> Option<(&str, &str)> {
    let rest = field.strip_prefix(prefix)?;
    let (index, value) = rest.split_once('_')?;
    if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
        Some((index, value))
    } else {
        None
    }
}

fn check_index(
    key: char,
    index: &str,
    expected: usize,
) -> Result<(), String> {
    let got = parse_number::<usize>(&key.to_string(), index)?;
    if got != expected {
        return Err(format!("expected {}{} but found {}{}", key, expected, key, got));
    }
    Ok(())
}

fn single_base(
    allele: &str,
) -> Result<u8, String> {
    match allele.as_bytes() {
        [base] => Ok(*base),
        _ => Err(format!("'{}' is not a single nucleotide", allele)),
    }
}

fn parse_snp_site(
    index: usize,
    entry: &str,
) -> Result<SnpSite, String> {
    let (key, rest) = entry.split_once(':').ok_or_else(|| format!("malformed site '{}'", entry))?;
    check_index('P', key.trim_start_matches("P_"), index)?;
    let (position, alleles) = rest.split_once('_').ok_or_else(|| format!("malformed site '{}'", entry))?;
    let (up, low) = alleles.split_once('/').ok_or_else(|| format!("malformed alleles in '{}'", entry))?;
    Ok(SnpSite {
        position: parse_number(key, position)?,
        up_base: single_base(up)?,
        low_base: single_base(low)?,
    })
}

fn parse_indel_site(
    entry: &str,
) -> Result<IndelSite, String> {
    let (key, rest) = entry.split_once(':').ok_or_else(|| format!("malformed site '{}'", entry))?;
    check_index('P', key.trim_start_matches("P_"), 1)?;
    let mut values = rest.split('_');
    let position = parse_number(key, values.next().unwrap_or_default())?;
    let length = parse_number(key, values.next().ok_or_else(|| format!("missing indel length in '{}'", entry))?)?;
    let ambiguity = values.next().map(|x| parse_number(key, x)).transpose()?;
    Ok(IndelSite { position, length, ambiguity })
}

fn parse_fields(
    descriptor: &str,
) -> Result<VariantHeader, String> {
    let mut fields = descriptor.split('|');
    let name = fields.next().unwrap_or_default();
    let (path_type, side, variant_id) = parse_name(name)?;

    let mut header = VariantHeader {
        descriptor: descriptor.to_string(),
        name: name.to_string(),
        path_type, side, variant_id,
        rank: None,
        coverage: Vec::new(),
        sites: Vec::new(),
        indel: None,
        genotypes: Vec::new(),
        declared_polymorphisms: None,
        extensions: Extensions::default(),
    };

    for field in fields {
        if field.starts_with("P_") {
            for entry in field.split(',') {
                match path_type {
                    PathType::Snp => {
                        let site = parse_snp_site(header.sites.len() + 1, entry)?;
                        header.sites.push(site);
                    },
                    PathType::Indel => {
                        if header.indel.is_some() {
                            return Err("INDEL path declares more than one site".to_string());
                        }
                        header.indel = Some(parse_indel_site(entry)?);
                    },
                }
            }
        } else if let Some(value) = field.strip_prefix("nb_pol_") {
            header.declared_polymorphisms = Some(parse_number("nb_pol", value)?);
        } else if let Some(value) = field.strip_prefix("left_unitig_length_") {
            header.extensions.left_unitig = Some(parse_number("left_unitig_length", value)?);
        } else if let Some(value) = field.strip_prefix("right_unitig_length_") {
            header.extensions.right_unitig = Some(parse_number("right_unitig_length", value)?);
        } else if let Some(value) = field.strip_prefix("left_contig_length_") {
            header.extensions.left_contig = Some(parse_number("left_contig_length", value)?);
        } else if let Some(value) = field.strip_prefix("right_contig_length_") {
            header.extensions.right_contig = Some(parse_number("right_contig_length", value)?);
        } else if let Some(value) = field.strip_prefix("rank_") {
            header.rank = Some(parse_number("rank", value)?);
        } else if let Some((index, value)) = indexed_field(field, 'C') {
            check_index('C', index, header.coverage.len() + 1)?;
            header.coverage.push(parse_number(field, value)?);
        } else if let Some((index, value)) = indexed_field(field, 'G') {
            check_index('G', index, header.genotypes.len() + 1)?;
            let call = match value.split_once(':') {
                Some((gt, likelihoods)) => GenotypeCall { gt: gt.to_string(), likelihoods: Some(likelihoods.to_string()) },
                None => GenotypeCall { gt: value.to_string(), likelihoods: None },
            };
            header.genotypes.push(call);
        } else if indexed_field(field, 'Q').is_some() || field == "high" || field == "low" {
            // Read qualities and the complexity tag are not reported.
        } else {
            log::debug!("Ignoring unknown descriptor field '{}'", field);
        }
    }

    if header.coverage.is_empty() {
        return Err("no coverage fields".to_string());
    }
    if let Some(n_pol) = header.declared_polymorphisms {
        if path_type == PathType::Snp && header.sites.len() < n_pol {
            return Err(format!("nb_pol is {} but only {} sites are listed", n_pol, header.sites.len()));
        }
    }

    Ok(header)
}

/// Parse a variant descriptor.
///
/// A leading `>` record marker is stripped. Trailing whitespace and any
/// text after the first whitespace character are ignored.
///
/// Terminates with a [HeaderParseError] if the first field is not a path
/// name, a numeric field does not contain a number, the dataset indexes are
/// out of order, or the descriptor has no coverage fields.
///
pub fn parse_variant_header(
    descriptor: &str,
) -> Result<VariantHeader, E> {
    let trimmed = descriptor.trim_start_matches('>');
    let trimmed = trimmed.split_whitespace().next().unwrap_or_default();
    let mut header = parse_fields(trimmed).map_err(|reason| {
        Box::new(HeaderParseError { descriptor: descriptor.to_string(), reason }) as Box<dyn std::error::Error>
    })?;
    header.descriptor = descriptor.trim_end().to_string();
    Ok(header)
}
