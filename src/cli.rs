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
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version)]
#[command(about = "Convert paired-path variant caller output to VCF")]
pub struct Cli {
    // Input .sam (aligned mode) or .fasta (ghost mode) file, optionally gzipped
    #[arg(short = 'i', long = "input", required = true, help = "Input .sam or .fasta file")]
    pub input_file: PathBuf,

    // Output file path
    #[arg(short = 'o', long = "output", required = true, help = "Output .vcf file")]
    pub out_file: PathBuf,

    // Largest number of mismatches considered when deciding the mapping status
    #[arg(short = 'n', long = "mismatches", default_value_t = 3)]
    pub max_mismatches: u32,

    // Value of the ##fileDate line, defaults to the current date
    #[arg(long = "date", required = false)]
    pub file_date: Option<String>,

    // Verbosity
    #[arg(long = "verbose", default_value_t = false)]
    pub verbose: bool,
}
