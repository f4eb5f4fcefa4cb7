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

//! Resolve the reference and alternate alleles of a variant.
//!
//! The reference allele comes from the path that was placed uniquely on the
//! reference genome. Coordinates and bases are reported on the forward
//! strand of the reference, so alleles from a path aligned to the reverse
//! strand are reverse complemented.
//!
use noodles_sam::alignment::record::cigar::op::Kind;

use crate::PathPair;
use crate::PathSide;
use crate::parser::sam::AlignmentRecord;
use crate::reconcile::Reconciliation;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct AlleleError {
    pub variant_id: u64,
    pub reason: String,
}

impl std::fmt::Display for AlleleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "cannot resolve the alleles of variant {}: {}", self.variant_id, self.reason)
    }
}

impl std::error::Error for AlleleError {}

/// Alleles of one variant site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAllele {
    /// None if neither or both paths qualify as the reference.
    pub reference_path: Option<PathSide>,
    pub reference_allele: Vec<u8>,
    pub alternate_allele: Vec<u8>,
    /// 1-based coordinate of the site.
    pub position: Option<usize>,
    /// Alignment strand of the up and low paths.
    pub reverse_complemented: [bool; 2],
    /// Reference genome base at the site.
    pub genome: Option<Vec<u8>>,
}

/// Complement a nucleotide, preserving case.
pub fn complement(
    base: u8,
) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        _ => base,
    }
}

/// Reverse complement a sequence, preserving case.
///
/// ```rust
/// use pathvcf::allele::reverse_complement;
///
/// assert_eq!(reverse_complement(b"AACGTn"), b"nACGTT".to_vec());
/// assert_eq!(reverse_complement(b"acGT"), b"ACgt".to_vec());
/// ```
pub fn reverse_complement(
    seq: &[u8],
) -> Vec<u8> {
    seq.iter().rev().map(|base| complement(*base)).collect()
}

fn consumes(
    kind: Kind,
) -> (bool, bool) {
    // (read, reference)
    match kind {
        Kind::Match | Kind::SequenceMatch | Kind::SequenceMismatch => (true, true),
        Kind::Insertion | Kind::SoftClip => (true, false),
        Kind::Deletion | Kind::Skip => (false, true),
        Kind::HardClip | Kind::Pad => (false, false),
    }
}

/// 1-based reference coordinate of the base at `offset` in the stored sequence.
///
/// Bases in a leading soft clip are placed before the alignment start and
/// bases in a trailing soft clip after its end. A base inside an insertion
/// is placed on the reference base preceding the insertion.
///
/// Returns None if the alignment has no position or `offset` is past the
/// end of the CIGAR.
///
pub fn reference_position(
    aln: &AlignmentRecord,
    offset: usize,
) -> Option<usize> {
    let start = aln.position?;
    if aln.cigar.is_empty() {
        return Some(start + offset)
    }

    let mut query: usize = 0;
    let mut reference: usize = start;
    for (kind, len) in aln.cigar.iter() {
        let (on_read, on_reference) = consumes(*kind);
        if on_read && offset < query + len {
            return if on_reference {
                Some(reference + offset - query)
            } else if reference == start {
                reference.checked_sub(query + len - offset).filter(|pos| *pos > 0)
            } else if *kind == Kind::SoftClip {
                Some(reference + offset - query)
            } else {
                Some(reference - 1)
            }
        }
        if on_read {
            query += len;
        }
        if on_reference {
            reference += len;
        }
    }
    None
}

/// Reference genome base under the stored sequence base at `offset`.
///
/// Walks the `MD` tag of the alignment. Without an `MD` tag the read base
/// is returned if the alignment has no mismatches.
///
pub fn genome_base(
    aln: &AlignmentRecord,
    offset: usize,
) -> Option<u8> {
    let read_base = *aln.sequence.get(offset)?;
    let target = reference_position(aln, offset)?.checked_sub(aln.position?)?;

    let Some(md) = aln.mismatch_string.as_ref() else {
        return (aln.mismatches == Some(0)).then_some(read_base)
    };

    let mut ref_offset: usize = 0;
    let mut bytes = md.bytes().peekable();
    while let Some(byte) = bytes.next() {
        if byte.is_ascii_digit() {
            let mut matches = (byte - b'0') as usize;
            while let Some(digit) = bytes.next_if(u8::is_ascii_digit) {
                matches = matches * 10 + (digit - b'0') as usize;
            }
            if target < ref_offset + matches {
                return Some(read_base)
            }
            ref_offset += matches;
        } else if byte == b'^' {
            while bytes.next_if(u8::is_ascii_alphabetic).is_some() {
                ref_offset += 1;
            }
        } else {
            if target == ref_offset {
                return Some(byte)
            }
            ref_offset += 1;
        }
    }
    None
}

/// Pick the path that is used as the reference allele.
///
/// A path qualifies if the pair was placed (PASS) at threshold `t`, and the
/// path is mapped with at most `t` mismatches and without alternative hits.
/// Returns None unless exactly one path qualifies.
///
pub fn reference_path(
    pair: &PathPair,
    reconciliation: &Reconciliation,
) -> Option<PathSide> {
    let threshold = reconciliation.mismatch_used?;
    let qualifies = |aln: Option<&AlignmentRecord>| -> bool {
        aln.is_some_and(|aln| {
            aln.is_mapped()
                && !aln.has_alternate_hits()
                && aln.mismatches.is_some_and(|nm| nm <= threshold)
        })
    };
    match (qualifies(pair.up.alignment.as_ref()), qualifies(pair.low.alignment.as_ref())) {
        (true, false) => Some(PathSide::Up),
        (false, true) => Some(PathSide::Low),
        _ => None,
    }
}

fn strands(
    pair: &PathPair,
) -> [bool; 2] {
    [
        pair.up.alignment.as_ref().is_some_and(|x| x.is_reverse()),
        pair.low.alignment.as_ref().is_some_and(|x| x.is_reverse()),
    ]
}

fn base_at(
    pair: &PathPair,
    side: PathSide,
    offset: usize,
) -> Result<u8, E> {
    pair.path(side).sequence.get(offset).copied().ok_or_else(|| -> E {
        Box::new(AlleleError {
            variant_id: pair.variant_id(),
            reason: format!("site at offset {} is outside the {:?} path of length {}", offset, side, pair.path(side).sequence.len()),
        })
    })
}

/// Resolve one SNP site.
///
/// `offset` is the 0-based position of the site in the caller orientation.
/// `bases` gives the (up, low) bases of the site; if None they are read from
/// the path sequences.
///
/// With a reference path the alleles and the coordinate are taken from it
/// and converted to the forward strand. Without one the up base is the
/// reference allele, the low base the alternate, and the position is unknown.
///
pub fn resolve_snp(
    pair: &PathPair,
    reference: Option<PathSide>,
    offset: usize,
    bases: Option<(u8, u8)>,
) -> Result<ResolvedAllele, E> {
    let up_base = base_at(pair, PathSide::Up, offset)?;
    let low_base = base_at(pair, PathSide::Low, offset)?;
    let (up_base, low_base) = bases.unwrap_or((up_base, low_base));

    let base_of = |side: PathSide| if side == PathSide::Up { up_base } else { low_base };

    let mut res = ResolvedAllele {
        reference_path: reference,
        reference_allele: vec![up_base],
        alternate_allele: vec![low_base],
        position: None,
        reverse_complemented: strands(pair),
        genome: None,
    };

    if let Some(side) = reference {
        if let Some(aln) = pair.path(side).alignment.as_ref() {
            let len = pair.path(side).sequence.len();
            let (stored_offset, ref_base, alt_base) = if aln.is_reverse() {
                (len - 1 - offset, complement(base_of(side)), complement(base_of(side.other())))
            } else {
                (offset, base_of(side), base_of(side.other()))
            };
            res.reference_allele = vec![ref_base];
            res.alternate_allele = vec![alt_base];
            res.position = reference_position(aln, stored_offset);
            res.genome = genome_base(aln, stored_offset).map(|base| vec![base]);
        }
    }

    Ok(res)
}

/// Alleles of an indel between two sequences in the same orientation.
///
/// The event is placed after the longest common prefix of the sequences
/// and anchored to the base before it, or to the base after it if the
/// sequences differ from the first base on.
///
/// Returns the alleles of `ref_seq` and `alt_seq` and the 0-based offset of
/// the anchor.
///
pub fn indel_alleles(
    variant_id: u64,
    ref_seq: &[u8],
    alt_seq: &[u8],
) -> Result<(Vec<u8>, Vec<u8>, usize), E> {
    let error = |reason: String| -> E { Box::new(AlleleError { variant_id, reason }) };

    let ref_is_shorter = ref_seq.len() < alt_seq.len();
    let (shorter, longer) = if ref_is_shorter { (ref_seq, alt_seq) } else { (alt_seq, ref_seq) };
    if shorter.len() == longer.len() {
        return Err(error(format!("both paths have length {}", shorter.len())))
    }
    if shorter.is_empty() {
        return Err(error("empty path sequence".to_string()))
    }

    let diff = longer.len() - shorter.len();
    let prefix = shorter.iter().zip(longer.iter()).take_while(|(a, b)| a == b).count();

    let (short_allele, long_allele, anchor) = if prefix > 0 {
        (longer[(prefix - 1)..prefix].to_vec(), longer[(prefix - 1)..(prefix + diff)].to_vec(), prefix - 1)
    } else {
        let mut long_allele = longer[0..diff].to_vec();
        long_allele.push(shorter[0]);
        (shorter[0..1].to_vec(), long_allele, 0)
    };

    if ref_is_shorter {
        Ok((short_allele, long_allele, anchor))
    } else {
        Ok((long_allele, short_allele, anchor))
    }
}

/// Resolve an indel.
///
/// Both path sequences are put on the strand the reference path aligned to
/// before the inserted or deleted segment is located, so the alleles are
/// reported on the forward strand of the reference. Without a reference path
/// the up path is used as the reference allele in the caller orientation.
///
pub fn resolve_indel(
    pair: &PathPair,
    reference: Option<PathSide>,
) -> Result<ResolvedAllele, E> {
    let nominal = reference.unwrap_or(PathSide::Up);
    let aln = reference.and_then(|side| pair.path(side).alignment.as_ref());
    let reverse = aln.is_some_and(|x| x.is_reverse());

    let orient = |seq: &[u8]| if reverse { reverse_complement(seq) } else { seq.to_vec() };
    let ref_seq = orient(pair.path(nominal).sequence.as_slice());
    let alt_seq = orient(pair.path(nominal.other()).sequence.as_slice());

    let (reference_allele, alternate_allele, anchor) = indel_alleles(pair.variant_id(), &ref_seq, &alt_seq)?;

    Ok(ResolvedAllele {
        reference_path: reference,
        reference_allele, alternate_allele,
        position: aln.and_then(|x| reference_position(x, anchor)),
        reverse_complemented: strands(pair),
        genome: None,
    })
}
