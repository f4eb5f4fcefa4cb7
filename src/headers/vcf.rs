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

use noodles_vcf as vcf;

type E = Box<dyn std::error::Error>;

const META_LINES: [&str; 19] = [
    "##ALT=<ID=REF,Description=\"Allele of the path aligned with the fewest mismatches\">",
    "##ALT=<ID=ALT,Description=\"Allele of the other path\">",
    "##FILTER=<ID=MULTIPLE,Description=\"At least one path has several placements within the mismatch threshold\">",
    "##FILTER=<ID=PROBLEM,Description=\"Mapping status could not be determined\">",
    "##INFO=<ID=Ty,Number=1,Type=String,Description=\"SNP, INS, DEL or .\">",
    "##INFO=<ID=Rk,Number=1,Type=Float,Description=\"Rank of the variant\">",
    "##INFO=<ID=DT,Number=1,Type=Integer,Description=\"Mismatches allowed when the mapping was decided, -1 if undecided\">",
    "##INFO=<ID=UL,Number=1,Type=Integer,Description=\"Length of the left unitig\">",
    "##INFO=<ID=UR,Number=1,Type=Integer,Description=\"Length of the right unitig\">",
    "##INFO=<ID=CL,Number=1,Type=Integer,Description=\"Length of the left contig\">",
    "##INFO=<ID=CR,Number=1,Type=Integer,Description=\"Length of the right contig\">",
    "##INFO=<ID=C,Number=.,Type=Integer,Description=\"Coverage of each path by dataset, higher path first\">",
    "##INFO=<ID=Genome,Number=1,Type=String,Description=\"Reference genome allele at the variant position, . for indels\">",
    "##INFO=<ID=Sd,Number=1,Type=Integer,Description=\"Reverse (1) or forward (0) alignment of the reference path\">",
    "##INFO=<ID=MULTI,Number=1,Type=String,Description=\"Paths with alternative placements: none, one or multi\">",
    "##INFO=<ID=DMAX,Number=0,Type=Flag,Description=\"Only one path mapped at the maximum number of mismatches\">",
    "##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">",
    "##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Combined depth of both paths\">",
    "##FORMAT=<ID=PL,Number=G,Type=Integer,Description=\"Phred-scaled genotype likelihoods\">",
];

/// Name of the sample column for the dataset at `index`.
pub fn sample_name(
    index: usize,
) -> String {
    format!("G{}", index + 1)
}

/// Build the header of a VCF file
///
/// The header declares VCFv4.1, the file date and the ALT, FILTER, INFO and
/// FORMAT keys used in the records, and has one sample column per dataset.
///
pub fn build_vcf_header(
    file_date: &str,
    n_samples: usize,
) -> Result<vcf::Header, E> {
    let mut text: String = String::new();
    text += "##fileformat=VCFv4.1\n";
    text += &format!("##fileDate={}\n", file_date);
    text += &format!("##source={}-{}\n", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    for line in META_LINES {
        text += line;
        text += "\n";
    }

    let mut columns: Vec<String> = ["#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO"].iter().map(|x| x.to_string()).collect();
    if n_samples > 0 {
        columns.push("FORMAT".to_string());
        columns.extend((0..n_samples).map(sample_name));
    }
    text += &columns.join("\t");
    text += "\n";

    let header: vcf::Header = text.parse()?;
    Ok(header)
}

/// Format `header` as the meta-information and column header lines
pub fn format_vcf_header<W: Write>(
    header: &vcf::Header,
    conn: &mut W,
) -> Result<(), E> {
    let mut writer = vcf::io::Writer::new(conn);
    writer.write_header(header)?;
    Ok(())
}
