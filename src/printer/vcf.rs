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

use std::io::Write;

use crate::Info;
use crate::VcfRecord;

type E = Box<dyn std::error::Error>;

const MISSING: &str = ".";

fn or_missing<T: std::fmt::Display>(
    value: Option<T>,
) -> String {
    value.map_or(MISSING.to_string(), |x| x.to_string())
}

/// Format the INFO column
///
/// Keys are written in a fixed order and keys without a value are left out.
/// `Ty` is always written and is `.` if the type is undecided.
///
pub fn format_info(
    info: &Info,
) -> String {
    let mut fields: Vec<String> = Vec::new();
    fields.push(format!("Ty={}", or_missing(info.variant_type)));
    if let Some(rank) = info.rank {
        fields.push(format!("Rk={}", rank));
    }
    if let Some(mismatches) = info.mismatches {
        fields.push(format!("DT={}", mismatches));
    }
    let extensions = [
        ("UL", info.extensions.left_unitig),
        ("UR", info.extensions.right_unitig),
        ("CL", info.extensions.left_contig),
        ("CR", info.extensions.right_contig),
    ];
    for (key, value) in extensions {
        if let Some(value) = value {
            fields.push(format!("{}={}", key, value));
        }
    }
    if !info.coverage.is_empty() {
        let coverage: Vec<String> = info.coverage.iter().map(|x| x.to_string()).collect();
        fields.push(format!("C={}", coverage.join(",")));
    }
    if let Some(genome) = info.genome.as_ref() {
        fields.push(format!("Genome={}", genome));
    }
    if let Some(strand) = info.strand {
        fields.push(format!("Sd={}", strand));
    }
    if let Some(multi) = info.multi {
        fields.push(format!("MULTI={}", multi));
    }
    if info.dmax {
        fields.push("DMAX".to_string());
    }
    fields.join(";")
}

/// Format a single record as a VCF data line
///
/// Writes the line containing the contents of `record` to `conn`. Missing
/// values are written as `.`. The FORMAT column is `GT:DP`, or `GT:DP:PL`
/// if any sample has genotype likelihoods, and is left out without samples.
///
pub fn format_vcf_line<W: Write>(
    record: &VcfRecord,
    conn: &mut W,
) -> Result<(), E> {
    let with_likelihoods = record.samples.iter().any(|x| x.likelihoods.is_some());

    let mut columns: Vec<String> = vec![
        or_missing(record.chrom.as_ref()),
        or_missing(record.pos),
        record.id.to_string(),
        record.ref_allele.clone(),
        record.alt_allele.clone(),
        or_missing(record.qual),
        or_missing(record.filter),
        format_info(&record.info),
    ];
    if !record.samples.is_empty() {
        columns.push(if with_likelihoods { "GT:DP:PL".to_string() } else { "GT:DP".to_string() });
    }
    columns.extend(record.samples.iter().map(|sample| {
        if with_likelihoods {
            format!("{}:{}:{}", sample.genotype, sample.depth, or_missing(sample.likelihoods.as_ref()))
        } else {
            format!("{}:{}", sample.genotype, sample.depth)
        }
    }));

    let mut formatted = columns.join("\t");
    formatted += "\n";
    conn.write_all(formatted.as_bytes())?;
    Ok(())
}

/// Format all records in `records` to `conn`
pub fn format_vcf_file<W: Write>(
    records: &[VcfRecord],
    conn: &mut W,
) -> Result<(), E> {
    for record in records {
        format_vcf_line(record, conn)?;
    }
    Ok(())
}
