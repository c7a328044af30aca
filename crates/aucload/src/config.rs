//! Command-line configuration.

use std::fmt::{self, Display};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Convert JSON auction listing archives into `|`-separated relation files
/// (`Items.dat`, `Users.dat`, `Categories.dat`, `Bids.dat`) ready for bulk
/// loading.
#[derive(Clone, Debug, Parser)]
#[command(name = "aucload", version, about)]
pub struct Config {
    /// Listing archive files to convert.  Arguments that do not end in
    /// `.json` are ignored.
    #[arg(value_name = "FILE", required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory receiving the four relation files.  Created if missing;
    /// existing relation files are appended to, not replaced.
    #[arg(long, env = "AUCLOAD_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// What to do when an input file cannot be read or parsed.
    #[arg(
        long,
        env = "AUCLOAD_FILE_ERRORS",
        value_enum,
        default_value_t = ErrorPolicy::Abort
    )]
    pub file_errors: ErrorPolicy,

    /// What to do when a single record inside a file cannot be converted.
    #[arg(
        long,
        env = "AUCLOAD_RECORD_ERRORS",
        value_enum,
        default_value_t = ErrorPolicy::Abort
    )]
    pub record_errors: ErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            output_dir: PathBuf::from("."),
            file_errors: ErrorPolicy::Abort,
            record_errors: ErrorPolicy::Abort,
        }
    }
}

/// Failure handling for one stage of a run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ErrorPolicy {
    /// Fail the whole run at the first error.
    #[default]
    Abort,
    /// Log the error, skip the offending unit and continue.
    Skip,
}

impl Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = match self {
            ErrorPolicy::Abort => "abort",
            ErrorPolicy::Skip => "skip",
        };
        write!(f, "{policy}")
    }
}
