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

use crate::PathRecord;
use crate::headers::variant::parse_variant_header;

type E = Box<dyn std::error::Error>;

/// Build a path from a FASTA record written by the caller.
///
/// `id` is the identifier line without the `>` marker and holds the
/// variant descriptor. The path has no alignment.
///
pub fn read_fasta(
    id: &[u8],
    seq: &[u8],
) -> Result<PathRecord, E> {
    let descriptor = std::str::from_utf8(id)?;
    let header = parse_variant_header(descriptor)?;
    Ok(PathRecord { header, sequence: seq.to_vec(), alignment: None })
}
