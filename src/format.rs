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

//! Decide the input mode and check the output path from file extensions.
use std::path::Path;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct UnrecognizedExtension {
    pub path: String,
    pub expected: String,
}

impl std::fmt::Display for UnrecognizedExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "unrecognized extension in '{}', expected {}", self.path, self.expected)
    }
}

impl std::error::Error for UnrecognizedExtension {}

/// How the paths of a variant are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// SAM records of the paths aligned to a reference genome.
    Aligned,
    /// FASTA records written by the caller, no reference.
    Ghost,
}

impl Mode {
    /// Decide the mode from the extension of `path`.
    ///
    /// `.sam` selects [Mode::Aligned] and `.fa`, `.fasta` or `.fna` select
    /// [Mode::Ghost]. Each may be followed by `.gz`.
    ///
    /// ```rust
    /// use pathvcf::format::Mode;
    /// use std::path::Path;
    ///
    /// assert_eq!(Mode::from_path(Path::new("variants.sam.gz")).unwrap(), Mode::Aligned);
    /// assert_eq!(Mode::from_path(Path::new("variants.fa")).unwrap(), Mode::Ghost);
    /// assert!(Mode::from_path(Path::new("variants.bam")).is_err());
    /// ```
    ///
    pub fn from_path(
        path: &Path,
    ) -> Result<Self, E> {
        let name = path.file_name().map(|x| x.to_string_lossy().to_ascii_lowercase()).unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        match Path::new(name).extension().and_then(|x| x.to_str()) {
            Some("sam") => Ok(Mode::Aligned),
            Some("fa") | Some("fasta") | Some("fna") => Ok(Mode::Ghost),
            _ => Err(Box::new(UnrecognizedExtension {
                path: path.display().to_string(),
                expected: ".sam, .fa, .fasta or .fna (optionally gzipped)".to_string(),
            })),
        }
    }
}

/// True if `path` ends in `.gz`.
pub fn is_gzipped(
    path: &Path,
) -> bool {
    path.extension().is_some_and(|x| x.eq_ignore_ascii_case("gz"))
}

/// Terminates with an [UnrecognizedExtension] unless `path` ends in `.vcf`.
pub fn check_output_path(
    path: &Path,
) -> Result<(), E> {
    if path.extension().is_some_and(|x| x.eq_ignore_ascii_case("vcf")) {
        Ok(())
    } else {
        Err(Box::new(UnrecognizedExtension { path: path.display().to_string(), expected: ".vcf".to_string() }))
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn mode_from_path_aligned() {
        use super::Mode;
        use std::path::Path;

        assert_eq!(Mode::from_path(Path::new("run/variants.sam")).unwrap(), Mode::Aligned);
        assert_eq!(Mode::from_path(Path::new("variants.SAM.gz")).unwrap(), Mode::Aligned);
    }

    #[test]
    fn mode_from_path_ghost() {
        use super::Mode;
        use std::path::Path;

        assert_eq!(Mode::from_path(Path::new("variants.fasta")).unwrap(), Mode::Ghost);
        assert_eq!(Mode::from_path(Path::new("variants.fna.gz")).unwrap(), Mode::Ghost);
    }

    #[test]
    fn mode_from_path_rejects_unknown() {
        use super::Mode;
        use std::path::Path;

        assert!(Mode::from_path(Path::new("variants.gz")).is_err());
        assert!(Mode::from_path(Path::new("variants")).is_err());
        assert!(Mode::from_path(Path::new("variants.txt")).is_err());
    }

    #[test]
    fn check_output_path_requires_vcf() {
        use super::check_output_path;
        use std::path::Path;

        assert!(check_output_path(Path::new("out/variants.vcf")).is_ok());
        assert!(check_output_path(Path::new("variants.vcf.gz")).is_err());
        assert!(check_output_path(Path::new("variants.txt")).is_err());
    }

    #[test]
    fn is_gzipped_checks_last_extension() {
        use super::is_gzipped;
        use std::path::Path;

        assert!(is_gzipped(Path::new("variants.sam.gz")));
        assert!(!is_gzipped(Path::new("variants.sam")));
    }
}
