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

//! Classify a variant and emit its VCF records.
//!
//! Every pair is classified into exactly one [Variant] and the records are
//! built from the classification in a single match. Simple SNPs and indels
//! produce one record; close SNPs produce one record per site.
//!
use crate::Filter;
use crate::Info;
use crate::PathPair;
use crate::PathSide;
use crate::Sample;
use crate::VariantType;
use crate::VcfRecord;
use crate::allele::{indel_alleles, reference_path, resolve_indel, resolve_snp, ResolvedAllele};
use crate::coverage::{combine, CombinedCoverage};
use crate::headers::variant::PathType;
use crate::reconcile::Reconciliation;

type E = Box<dyn std::error::Error>;

/// Shape of a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// A single SNP.
    SimpleSnp(ResolvedAllele),
    /// SNPs close enough to share a path, reported as a phased group.
    CloseSnpCluster(Vec<ResolvedAllele>),
    /// The other path carries bases missing from the reference path.
    Insertion(ResolvedAllele),
    /// The reference path carries bases missing from the other path.
    Deletion(ResolvedAllele),
    /// Indel whose reference path is undefined.
    UnplacedIndel(ResolvedAllele),
    /// Variant read from the caller output without alignments.
    Ghost { variant_type: VariantType, phased: bool, alleles: Vec<ResolvedAllele> },
}

fn warn_indel_length(
    pair: &PathPair,
    allele: &ResolvedAllele,
) {
    let observed = allele.reference_allele.len().abs_diff(allele.alternate_allele.len());
    if let Some(site) = pair.up.header.indel {
        if site.length != observed {
            log::warn!("Variant {} declares an indel of length {} but the paths differ by {}", pair.variant_id(), site.length, observed);
        }
    }
}

fn classify_ghost(
    pair: &PathPair,
) -> Result<Variant, E> {
    match pair.up.header.path_type {
        PathType::Snp => {
            let sites = &pair.up.header.sites;
            let alleles: Vec<ResolvedAllele> = if sites.is_empty() {
                let offset = pair.up.sequence.len() / 2;
                let mut allele = resolve_snp(pair, None, offset, None)?;
                allele.position = Some(offset + 1);
                vec![allele]
            } else {
                sites.iter().map(|site| -> Result<ResolvedAllele, E> {
                    let mut allele = resolve_snp(pair, None, site.position, Some((site.up_base, site.low_base)))?;
                    allele.position = Some(site.position + 1);
                    Ok(allele)
                }).collect::<Result<Vec<ResolvedAllele>, E>>()?
            };
            Ok(Variant::Ghost { variant_type: VariantType::Snp, phased: alleles.len() > 1, alleles })
        },
        PathType::Indel => {
            let (reference_allele, alternate_allele, anchor) = indel_alleles(pair.variant_id(), &pair.up.sequence, &pair.low.sequence)?;
            let variant_type = if reference_allele.len() < alternate_allele.len() { VariantType::Insertion } else { VariantType::Deletion };
            let allele = ResolvedAllele {
                reference_path: None,
                reference_allele, alternate_allele,
                position: Some(anchor + 1),
                reverse_complemented: [false, false],
                genome: None,
            };
            warn_indel_length(pair, &allele);
            Ok(Variant::Ghost { variant_type, phased: false, alleles: vec![allele] })
        },
    }
}

/// Classify a pair.
///
/// Pairs without a `reconciliation` are classified as [Variant::Ghost].
/// Otherwise the alleles are resolved against the `reference` path.
///
pub fn classify(
    pair: &PathPair,
    reconciliation: Option<&Reconciliation>,
    reference: Option<PathSide>,
) -> Result<Variant, E> {
    if reconciliation.is_none() {
        return classify_ghost(pair)
    }

    match pair.up.header.path_type {
        PathType::Snp if pair.up.header.is_cluster() => {
            let alleles = pair.up.header.sites.iter().map(|site| {
                resolve_snp(pair, reference, site.position, Some((site.up_base, site.low_base)))
            }).collect::<Result<Vec<ResolvedAllele>, E>>()?;
            Ok(Variant::CloseSnpCluster(alleles))
        },
        PathType::Snp => {
            let offset = pair.up.sequence.len() / 2;
            Ok(Variant::SimpleSnp(resolve_snp(pair, reference, offset, None)?))
        },
        PathType::Indel => {
            let allele = resolve_indel(pair, reference)?;
            warn_indel_length(pair, &allele);
            if reference.is_none() {
                Ok(Variant::UnplacedIndel(allele))
            } else if allele.reference_allele.len() < allele.alternate_allele.len() {
                Ok(Variant::Insertion(allele))
            } else {
                Ok(Variant::Deletion(allele))
            }
        },
    }
}

fn build_samples(
    coverage: &CombinedCoverage,
    phased: bool,
) -> Vec<Sample> {
    coverage.depth.iter().zip(coverage.genotypes.iter()).map(|(depth, call)| {
        let genotype = call.as_ref().map_or("./.".to_string(), |x| {
            if phased { x.gt.replace('/', "|") } else { x.gt.clone() }
        });
        Sample {
            genotype,
            depth: *depth,
            likelihoods: call.as_ref().and_then(|x| x.likelihoods.clone()),
        }
    }).collect()
}

fn build_record(
    pair: &PathPair,
    reconciliation: Option<&Reconciliation>,
    reference: Option<PathSide>,
    coverage: &CombinedCoverage,
    allele: &ResolvedAllele,
    variant_type: Option<VariantType>,
    phased: bool,
) -> VcfRecord {
    let mut info = Info {
        variant_type,
        rank: pair.up.header.rank.or(pair.low.header.rank),
        extensions: pair.up.header.extensions,
        coverage: coverage.per_path.clone(),
        ..Default::default()
    };

    let (chrom, qual, filter) = match reconciliation {
        Some(reconciliation) => {
            let aln = reference.and_then(|side| pair.path(side).alignment.as_ref());
            info.mismatches = Some(reconciliation.mismatch_used.map_or(-1, i64::from));
            info.genome = Some(allele.genome.as_ref().map_or(".".to_string(), |x| String::from_utf8_lossy(x).to_string()));
            info.strand = aln.map(|x| x.is_reverse() as u8);
            info.multi = Some(reconciliation.multi);
            info.dmax = reconciliation.dmax;
            (aln.and_then(|x| x.reference_name.clone()), aln.and_then(|x| x.mapping_quality), Some(reconciliation.filter))
        },
        None => (Some(pair.up.header.name.clone()), None, None),
    };

    VcfRecord {
        chrom,
        pos: allele.position,
        id: pair.variant_id(),
        ref_allele: String::from_utf8_lossy(&allele.reference_allele).to_string(),
        alt_allele: String::from_utf8_lossy(&allele.alternate_allele).to_string(),
        qual,
        filter,
        info,
        samples: build_samples(coverage, phased),
    }
}

/// Emit the VCF records of a pair.
///
/// `reconciliation` is the mapping status of the pair decided by
/// [reconcile](crate::reconcile::reconcile), or None if the paths were not
/// aligned.
///
/// Returns the records in site order. Nothing is returned if any site of
/// the pair cannot be resolved.
///
pub fn emit_records(
    pair: &PathPair,
    reconciliation: Option<&Reconciliation>,
) -> Result<Vec<VcfRecord>, E> {
    let reference = reconciliation.and_then(|x| reference_path(pair, x));
    let variant = classify(pair, reconciliation, reference)?;
    let coverage = combine(pair, reference)?;

    log::debug!("Variant {}: {:?} reference path {:?}", pair.variant_id(), reconciliation.map(|x| x.filter), reference);
    if reconciliation.is_some_and(|x| x.filter == Filter::Problem) {
        log::warn!("Could not decide the mapping status of variant {}", pair.variant_id());
    }

    let record = |allele: &ResolvedAllele, variant_type: Option<VariantType>, phased: bool| {
        build_record(pair, reconciliation, reference, &coverage, allele, variant_type, phased)
    };

    let records = match &variant {
        Variant::SimpleSnp(allele) => vec![record(allele, Some(VariantType::Snp), false)],
        Variant::CloseSnpCluster(alleles) => alleles.iter().map(|x| record(x, Some(VariantType::Snp), true)).collect(),
        Variant::Insertion(allele) => vec![record(allele, Some(VariantType::Insertion), false)],
        Variant::Deletion(allele) => vec![record(allele, Some(VariantType::Deletion), false)],
        Variant::UnplacedIndel(allele) => vec![record(allele, None, false)],
        Variant::Ghost { variant_type, phased, alleles } => alleles.iter().map(|x| record(x, Some(*variant_type), *phased)).collect(),
    };

    Ok(records)
}

// Tests
#[cfg(test)]
mod tests {
    use noodles_sam::alignment::record::cigar::op::Kind;
    use crate::{PathPair, PathRecord};
    use crate::headers::variant::parse_variant_header;
    use crate::parser::sam::{AlignmentRecord, Strand};

    fn mapped(strand: Strand, sequence: &[u8]) -> AlignmentRecord {
        AlignmentRecord {
            name: String::new(),
            reference_name: Some("chr2".to_string()),
            position: Some(1000),
            strand,
            mapping_quality: Some(37),
            mismatches: Some(0),
            best_hits: None,
            alternate_hits: Vec::new(),
            cigar: vec![(Kind::Match, sequence.len())],
            sequence: sequence.to_vec(),
            mismatch_string: None,
            is_secondary: false,
        }
    }

    fn unmapped(sequence: &[u8]) -> AlignmentRecord {
        AlignmentRecord {
            name: String::new(),
            reference_name: None,
            position: None,
            strand: Strand::Unmapped,
            mapping_quality: None,
            mismatches: None,
            best_hits: None,
            alternate_hits: Vec::new(),
            cigar: Vec::new(),
            sequence: sequence.to_vec(),
            mismatch_string: None,
            is_secondary: false,
        }
    }

    fn aligned_pair(up: &str, up_aln: AlignmentRecord, low: &str, low_aln: AlignmentRecord) -> PathPair {
        PathPair::new(
            PathRecord::from_alignment(parse_variant_header(up).unwrap(), up_aln),
            PathRecord::from_alignment(parse_variant_header(low).unwrap(), low_aln),
        ).unwrap()
    }

    fn ghost_pair(up: &str, up_seq: &[u8], low: &str, low_seq: &[u8]) -> PathPair {
        PathPair::new(
            PathRecord { header: parse_variant_header(up).unwrap(), sequence: up_seq.to_vec(), alignment: None },
            PathRecord { header: parse_variant_header(low).unwrap(), sequence: low_seq.to_vec(), alignment: None },
        ).unwrap()
    }

    fn passed() -> crate::reconcile::Reconciliation {
        use crate::Filter;
        use crate::reconcile::{MultiFlag, Reconciliation};
        Reconciliation { filter: Filter::Pass, mismatch_used: Some(0), multi: MultiFlag::None, dmax: false }
    }

    #[test]
    fn emit_records_one_record_per_cluster_site() {
        use super::emit_records;

        let data = aligned_pair(
            "SNP_higher_path_5|P_1:1_C/T,P_2:3_G/A,P_3:5_T/C|nb_pol_3|C1_3", mapped(Strand::Forward, b"ACAGTTA"),
            "SNP_lower_path_5|P_1:1_C/T,P_2:3_G/A,P_3:5_T/C|nb_pol_3|C1_4", unmapped(b"ATAATCA"),
        );
        let got = emit_records(&data, Some(&passed())).unwrap();

        assert_eq!(got.len(), 3);
        assert_eq!(got.iter().map(|x| x.pos).collect::<Vec<Option<usize>>>(), vec![Some(1001), Some(1003), Some(1005)]);
        assert!(got.iter().all(|x| x.id == 5 && x.samples[0].genotype == "./."));
    }

    #[test]
    fn emit_records_insertion_relative_to_reference() {
        use crate::VariantType;
        use super::emit_records;

        let up_seq = b"ACGTACGTACGTACGTACGT";
        let low_seq = b"ACGTACGTACTTTGTACGTACGT";
        let data = aligned_pair(
            "INDEL_higher_path_8|P_1:9_3|C1_3", mapped(Strand::Forward, up_seq),
            "INDEL_lower_path_8|P_1:9_3|C1_4", unmapped(low_seq),
        );
        let got = emit_records(&data, Some(&passed())).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].info.variant_type, Some(VariantType::Insertion));
        assert_eq!(got[0].ref_allele, "C");
        assert_eq!(got[0].alt_allele, "CTTT");
        assert_eq!(got[0].alt_allele.len() - got[0].ref_allele.len(), 3);
        assert_eq!(got[0].pos, Some(1009));
        assert_eq!(got[0].chrom.as_deref(), Some("chr2"));
        assert_eq!(got[0].qual, Some(37));
    }

    #[test]
    fn emit_records_deletion_on_reverse_strand() {
        use crate::VariantType;
        use super::emit_records;

        // Forward strand: reference path AAGGCCTT, other path AAGTT.
        let data = aligned_pair(
            "INDEL_higher_path_9|C1_3", unmapped(b"AACTT"),
            "INDEL_lower_path_9|C1_4", mapped(Strand::Reverse, b"AAGGCCTT"),
        );
        let got = emit_records(&data, Some(&passed())).unwrap();

        assert_eq!(got[0].info.variant_type, Some(VariantType::Deletion));
        assert_eq!(got[0].ref_allele, "GGCC");
        assert_eq!(got[0].alt_allele, "G");
        assert_eq!(got[0].pos, Some(1002));
        assert_eq!(got[0].info.strand, Some(1));
    }

    #[test]
    fn emit_records_unplaced_indel_has_no_type() {
        use crate::Filter;
        use crate::reconcile::{MultiFlag, Reconciliation};
        use super::emit_records;

        let data = aligned_pair(
            "INDEL_higher_path_9|C1_3", unmapped(b"AAGTT"),
            "INDEL_lower_path_9|C1_4", unmapped(b"AAGGCCTT"),
        );
        let reconciliation = Reconciliation { filter: Filter::Unmapped, mismatch_used: None, multi: MultiFlag::None, dmax: false };
        let got = emit_records(&data, Some(&reconciliation)).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].info.variant_type, None);
        assert_eq!(got[0].info.mismatches, Some(-1));
        assert_eq!(got[0].chrom, None);
        assert_eq!(got[0].pos, None);
        assert_eq!(got[0].ref_allele, "G");
        assert_eq!(got[0].alt_allele, "GGCC");
    }

    #[test]
    fn emit_records_ghost_cluster_is_phased() {
        use crate::VariantType;
        use super::emit_records;

        let data = ghost_pair(
            "SNP_higher_path_3|P_1:1_C/T,P_2:3_G/A|C1_1|C2_2|G1_0/1|G2_1/1:50,3,0", b"ACAGT",
            "SNP_lower_path_3|P_1:1_C/T,P_2:3_G/A|C1_3|C2_4|G1_0/1|G2_1/1:50,3,0", b"ATAAT",
        );
        let got = emit_records(&data, None).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[1].chrom.as_deref(), Some("SNP_higher_path_3"));
        assert_eq!(got[1].pos, Some(4));
        assert_eq!((got[1].ref_allele.as_str(), got[1].alt_allele.as_str()), ("G", "A"));
        assert_eq!(got[1].info.variant_type, Some(VariantType::Snp));
        assert_eq!(got[1].filter, None);
        assert_eq!(got[1].info.mismatches, None);
        assert_eq!(got[1].samples[0].genotype, "0|1");
        assert_eq!(got[1].samples[1].genotype, "1|1");
        assert_eq!(got[1].samples[1].likelihoods.as_deref(), Some("50,3,0"));
        assert_eq!(got[1].samples[1].depth, 6);
    }

    #[test]
    fn emit_records_ghost_indel() {
        use crate::VariantType;
        use super::emit_records;

        let data = ghost_pair("INDEL_lower_path_4|C1_1", b"ACGTTTAC", "INDEL_higher_path_4|C1_2", b"ACGTAC");
        let got = emit_records(&data, None).unwrap();

        assert_eq!(got[0].info.variant_type, Some(VariantType::Insertion));
        assert_eq!(got[0].ref_allele, "T");
        assert_eq!(got[0].alt_allele, "TTT");
        assert_eq!(got[0].pos, Some(4));
    }
}
