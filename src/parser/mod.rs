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

//! Read the paths of each variant from the input.
//!
//! Both paths of a variant are stored as consecutive records, either as SAM
//! records produced by aligning the paths to a reference or as the FASTA
//! records written by the caller. [Parser] reads them two at a time.
//!

// Format specific implementations
pub mod fasta;
pub mod sam;

use crate::PathPair;
use crate::PathRecord;
use crate::format::Mode;
use crate::headers::variant::parse_variant_header;
use crate::parser::fasta::read_fasta;
use crate::parser::sam::read_sam;

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use needletail::FastxReader;
use needletail::errors::ParseErrorKind;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct UnpairedRecord {
    pub name: String,
}

impl std::fmt::Display for UnpairedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "input ended before the second path of {}", self.name)
    }
}

impl std::error::Error for UnpairedRecord {}

enum Source<'a> {
    Sam(Box<dyn BufRead + 'a>),
    // None if the input was empty.
    Fasta(Option<Box<dyn FastxReader + 'a>>),
}

/// Reads [PathPair]s from SAM or FASTA input.
pub struct Parser<'a> {
    source: Source<'a>,
    line: Vec<u8>,
    pub mode: Mode,
}

impl<'a> Parser<'a> {
    pub fn new<R: Read + Send>(
        conn: &'a mut R,
        mode: Mode,
    ) -> Result<Self, E> {
        let source = match mode {
            Mode::Aligned => Source::Sam(Box::new(BufReader::new(conn))),
            Mode::Ghost => match needletail::parse_fastx_reader(conn) {
                Ok(reader) => Source::Fasta(Some(reader)),
                Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => Source::Fasta(None),
                Err(e) => return Err(Box::new(e)),
            },
        };
        Ok(Self { source, line: Vec::new(), mode })
    }
}

impl Parser<'_> {
    /// Read the next path.
    ///
    /// Skips SAM header lines, empty lines and secondary or supplementary
    /// alignments.
    ///
    /// Returns None at the end of the input.
    pub fn read_record(
        &mut self,
    ) -> Result<Option<PathRecord>, E> {
        match &mut self.source {
            Source::Sam(reader) => {
                loop {
                    self.line.clear();
                    if reader.read_until(b'\n', &mut self.line)? == 0 {
                        return Ok(None)
                    }
                    while self.line.last().is_some_and(|x| *x == b'\n' || *x == b'\r') {
                        self.line.pop();
                    }
                    if self.line.is_empty() || self.line[0] == b'@' {
                        continue
                    }
                    let aln = read_sam(&self.line)?;
                    if aln.is_secondary {
                        log::debug!("Skipping secondary alignment of {}", aln.name);
                        continue
                    }
                    let header = parse_variant_header(&aln.name)?;
                    return Ok(Some(PathRecord::from_alignment(header, aln)))
                }
            },
            Source::Fasta(reader) => {
                let Some(reader) = reader.as_mut() else {
                    return Ok(None)
                };
                match reader.next() {
                    Some(record) => {
                        let record = record?;
                        Ok(Some(read_fasta(record.id(), &record.seq())?))
                    },
                    None => Ok(None),
                }
            },
        }
    }

    /// Read the two paths of the next variant.
    ///
    /// Terminates with an [UnpairedRecord] if the input ends after the first
    /// path, or with a [PairMismatch](crate::PairMismatch) if the two records
    /// belong to different variants.
    ///
    /// Returns None at the end of the input.
    ///
    pub fn read_pair(
        &mut self,
    ) -> Result<Option<PathPair>, E> {
        let Some(first) = self.read_record()? else {
            return Ok(None)
        };
        let Some(second) = self.read_record()? else {
            return Err(Box::new(UnpairedRecord { name: first.header.name }))
        };
        Ok(Some(PathPair::new(first, second)?))
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<PathPair, E>;

    fn next(
        &mut self,
    ) -> Option<Result<PathPair, E>> {
        self.read_pair().transpose()
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_pair_sam() {
        use super::Parser;
        use crate::format::Mode;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"@HD\tVN:1.6\tSO:unsorted\n@SQ\tSN:chr1\tLN:1000\n".to_vec();
        data.append(&mut b"SNP_lower_path_1|C1_2\t0\tchr1\t100\t60\t5M\t*\t0\t0\tACGGT\t*\tNM:i:1\r\n".to_vec());
        data.append(&mut b"SNP_lower_path_1|C1_2\t256\tchr1\t500\t0\t5M\t*\t0\t0\tACGGT\t*\tNM:i:1\n".to_vec());
        data.append(&mut b"\n".to_vec());
        data.append(&mut b"SNP_higher_path_1|C1_5\t16\tchr1\t100\t60\t5M\t*\t0\t0\tACTGT\t*\tNM:i:0\n".to_vec());

        let mut input = Cursor::new(data);
        let mut parser = Parser::new(&mut input, Mode::Aligned).unwrap();

        let got = parser.read_pair().unwrap().unwrap();
        assert_eq!(got.variant_id(), 1);
        assert_eq!(got.up.header.coverage, vec![5]);
        assert_eq!(got.up.sequence, b"ACAGT".to_vec());
        assert_eq!(got.low.alignment.as_ref().unwrap().position, Some(100));
        assert!(parser.read_pair().unwrap().is_none());
    }

    #[test]
    fn read_pair_rejects_unpaired_record() {
        use super::Parser;
        use crate::format::Mode;
        use std::io::Cursor;

        let data: Vec<u8> = b"SNP_higher_path_1|C1_5\t4\t*\t0\t0\t*\t*\t0\t0\tACAGT\t*\n".to_vec();
        let mut input = Cursor::new(data);
        let mut parser = Parser::new(&mut input, Mode::Aligned).unwrap();

        let got = parser.read_pair();
        assert!(got.is_err());
        assert!(got.unwrap_err().to_string().contains("SNP_higher_path_1"));
    }

    #[test]
    fn iterate_fasta_pairs() {
        use super::Parser;
        use crate::PathPair;
        use crate::format::Mode;
        use std::io::Cursor;

        let data: Vec<u8> = b">SNP_higher_path_1|C1_5\nACAGT\n>SNP_lower_path_1|C1_2\nACGGT\n>INDEL_higher_path_2|C1_1\nACGTAC\n>INDEL_lower_path_2|C1_3\nACGTTTAC\n".to_vec();
        let mut input = Cursor::new(data);
        let parser = Parser::new(&mut input, Mode::Ghost).unwrap();

        let got: Vec<PathPair> = parser.map(|x| x.unwrap()).collect();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].low.sequence, b"ACGGT".to_vec());
        assert_eq!(got[1].variant_id(), 2);
        assert!(got[1].alignments().is_none());
    }

    #[test]
    fn empty_fasta_has_no_pairs() {
        use super::Parser;
        use crate::format::Mode;
        use std::io::Cursor;

        let mut input = Cursor::new(Vec::<u8>::new());
        let mut parser = Parser::new(&mut input, Mode::Ghost).unwrap();

        assert!(parser.read_pair().unwrap().is_none());
    }
}
