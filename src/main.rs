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
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;

use clap::Parser;
use flate2::read::MultiGzDecoder;

use pathvcf::format::{check_output_path, is_gzipped, Mode};

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()
    .unwrap();
}

fn run(
    cli: &cli::Cli,
) -> Result<pathvcf::Summary, E> {
    // Check both paths before creating the output
    let mode = Mode::from_path(&cli.input_file)?;
    check_output_path(&cli.out_file)?;

    let file_date = match cli.file_date.as_ref() {
        Some(date) => date.clone(),
        None => chrono::Local::now().format("%Y%m%d").to_string(),
    };
    let config = pathvcf::Config { max_mismatches: cli.max_mismatches, file_date };

    let f = File::open(&cli.input_file)?;
    // needletail decompresses gzipped fasta on its own
    let mut conn_in: Box<dyn Read + Send> = if mode == Mode::Aligned && is_gzipped(&cli.input_file) {
        Box::new(MultiGzDecoder::new(f))
    } else {
        Box::new(f)
    };

    let mut conn_out = BufWriter::new(File::create(&cli.out_file)?);

    log::info!("Converting {} to {}", cli.input_file.display(), cli.out_file.display());
    pathvcf::convert_from_read_to_write(&config, mode, &mut conn_in, &mut conn_out)
}

fn main() {
    let cli = cli::Cli::parse();
    init_log(if cli.verbose { 2 } else { 1 });

    match run(&cli) {
        Ok(summary) => {
            log::info!("Wrote {} records for {} variants", summary.records, summary.pairs);
            log::info!("PASS: {}, MULTIPLE: {}, unmapped: {}, PROBLEM: {}", summary.pass, summary.multiple, summary.unmapped, summary.problem);
        },
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        },
    }
}
