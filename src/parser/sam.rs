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
use bstr::ByteSlice;
use noodles_sam as sam;
use noodles_sam::alignment::record::cigar::op::Kind;
use noodles_sam::alignment::record::data::field::{Tag, Value};

type E = Box<dyn std::error::Error>;

const ALTERNATE_HITS: Tag = Tag::new(b'X', b'A');
const BEST_HITS: Tag = Tag::new(b'X', b'0');

#[derive(Debug, Clone)]
pub struct SamRecordError {
    pub line: String,
    pub reason: String,
}

impl std::fmt::Display for SamRecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "invalid SAM record '{}': {}", self.line, self.reason)
    }
}

impl std::error::Error for SamRecordError {}

/// Orientation of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
    Unmapped,
}

/// An alternative placement listed in the `XA` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateHit {
    pub reference_name: String,
    pub position: usize,
    pub strand: Strand,
    pub mismatches: u32,
}

/// Alignment of one path against the reference.
///
/// `sequence` is stored as written by the mapper, ie. reverse complemented
/// for reverse strand alignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub name: String,
    pub reference_name: Option<String>,
    /// 1-based leftmost aligned position.
    pub position: Option<usize>,
    pub strand: Strand,
    pub mapping_quality: Option<u8>,
    /// Value of the `NM` tag.
    pub mismatches: Option<u32>,
    /// Value of the `X0` tag.
    pub best_hits: Option<u32>,
    pub alternate_hits: Vec<AlternateHit>,
    pub cigar: Vec<(Kind, usize)>,
    pub sequence: Vec<u8>,
    /// Value of the `MD` tag.
    pub mismatch_string: Option<String>,
    /// Secondary or supplementary alignment.
    pub is_secondary: bool,
}

impl AlignmentRecord {
    pub fn is_mapped(&self) -> bool {
        self.strand != Strand::Unmapped
    }

    pub fn is_reverse(&self) -> bool {
        self.strand == Strand::Reverse
    }

    /// True if the mapper reported other placements for the path.
    pub fn has_alternate_hits(&self) -> bool {
        !self.alternate_hits.is_empty() || self.best_hits.is_some_and(|n| n > 1)
    }

    /// Mismatch counts of the primary placement and of every alternative one.
    ///
    /// The primary placement is counted once for each tied best hit in `X0`,
    /// since the mapper leaves `XA` out when there are too many of them.
    ///
    /// Returns None if the primary alignment is mapped but has no `NM` tag.
    pub fn placements(&self) -> Option<Vec<u32>> {
        let ties = self.best_hits.unwrap_or(1).max(1) as usize;
        let mut res: Vec<u32> = Vec::with_capacity(self.alternate_hits.len() + ties);
        if self.is_mapped() {
            let primary = self.mismatches?;
            res.extend(std::iter::repeat(primary).take(ties));
        }
        res.extend(self.alternate_hits.iter().map(|hit| hit.mismatches));
        Some(res)
    }
}

fn record_error(
    line: &[u8],
    reason: String,
) -> E {
    Box::new(SamRecordError { line: line.to_str_lossy().to_string(), reason })
}

fn int_value(
    line: &[u8],
    tag: &str,
    value: &Value<'_>,
) -> Result<u32, E> {
    value.as_int()
        .and_then(|x| u32::try_from(x).ok())
        .ok_or_else(|| record_error(line, format!("{} is not a non-negative integer", tag)))
}

fn parse_alternate_hits(
    line: &[u8],
    xa: &str,
) -> Result<Vec<AlternateHit>, E> {
    let mut hits: Vec<AlternateHit> = Vec::new();
    for entry in xa.split(';').filter(|x| !x.is_empty()) {
        let fields: Vec<&str> = entry.split(',').collect();
        if fields.len() < 4 {
            return Err(record_error(line, format!("malformed XA entry '{}'", entry)));
        }
        let (strand, position) = if let Some(pos) = fields[1].strip_prefix('+') {
            (Strand::Forward, pos)
        } else if let Some(pos) = fields[1].strip_prefix('-') {
            (Strand::Reverse, pos)
        } else {
            return Err(record_error(line, format!("malformed XA position '{}'", fields[1])));
        };
        let position = position.parse::<usize>().map_err(|_| record_error(line, format!("malformed XA position '{}'", fields[1])))?;
        let mismatches = fields[3].parse::<u32>().map_err(|_| record_error(line, format!("malformed XA mismatches '{}'", fields[3])))?;
        hits.push(AlternateHit { reference_name: fields[0].to_string(), position, strand, mismatches });
    }
    Ok(hits)
}

/// Parse a line from a [SAM](https://samtools.github.io/hts-specs/SAMv1.pdf) file.
///
/// Reads the fields needed to place one path of a variant: the flags,
/// position, CIGAR, sequence, and the `NM`, `MD`, `X0` and `XA` tags.
///
/// Returns the [alignment](AlignmentRecord) on the line.
///
pub fn read_sam(
    line: &[u8],
) -> Result<AlignmentRecord, E> {
    let record = sam::Record::try_from(line)?;

    let name: String = record.name().ok_or_else(|| record_error(line, "missing read name".to_string()))?.to_string();

    let flags = record.flags()?;
    let strand = if flags.is_unmapped() {
        Strand::Unmapped
    } else if flags.is_reverse_complemented() {
        Strand::Reverse
    } else {
        Strand::Forward
    };

    let reference_name: Option<String> = record.reference_sequence_name().map(|x| x.to_string());
    let position: Option<usize> = record.alignment_start().transpose()?.map(usize::from);
    let mapping_quality: Option<u8> = record.mapping_quality().transpose()?.map(u8::from);

    let cigar = record.cigar().iter().map(|op| {
        op.map(|op| (op.kind(), op.len()))
    }).collect::<Result<Vec<(Kind, usize)>, _>>()?;

    let sequence: Vec<u8> = match record.sequence().as_ref() {
        b"*" => Vec::new(),
        seq => seq.to_vec(),
    };

    let data = record.data();
    let mismatches = match data.get(&Tag::EDIT_DISTANCE).transpose()? {
        Some(value) => Some(int_value(line, "NM", &value)?),
        None => None,
    };
    let best_hits = match data.get(&BEST_HITS).transpose()? {
        Some(value) => Some(int_value(line, "X0", &value)?),
        None => None,
    };
    let mismatch_string = match data.get(&Tag::MISMATCHED_POSITIONS).transpose()? {
        Some(Value::String(md)) => Some(md.to_str()?.to_string()),
        Some(_) => return Err(record_error(line, "MD is not a string".to_string())),
        None => None,
    };
    let alternate_hits = match data.get(&ALTERNATE_HITS).transpose()? {
        Some(Value::String(xa)) => parse_alternate_hits(line, xa.to_str()?)?,
        Some(_) => return Err(record_error(line, "XA is not a string".to_string())),
        None => Vec::new(),
    };

    Ok(AlignmentRecord {
        name, reference_name, position, strand, mapping_quality,
        mismatches, best_hits, alternate_hits, cigar, sequence, mismatch_string,
        is_secondary: flags.is_secondary() || flags.is_supplementary(),
    })
}
