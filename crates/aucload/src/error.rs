//! Errors raised while converting archives.
//!
//! [`RecordError`] covers a single listing that cannot become relation rows;
//! [`FileError`] covers a whole input file.  A `RecordError` escalates into
//! `FileError::Record`, which carries enough context (record position, item
//! id, a snippet of the raw JSON) to find the offender in a multi-megabyte
//! archive.

use std::error::Error as StdError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;

use thiserror::Error as ThisError;

use crate::normalize::datetime::TimestampError;

/// When quoting a bad record back in an error message, keep at most this
/// many bytes of it.
const MAX_RECORD_LEN_IN_ERRMSG: usize = 512;

/// A single listing that cannot be converted into relation rows.
///
/// Conversion is all or nothing, so any of these means the record
/// contributes no rows at all.
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RecordError {
    /// A field the relations cannot be built without is absent or null.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A timestamp field does not have the `Mon-DD-YY HH:MM:SS` shape.
    #[error("field '{field}' holds malformed timestamp '{value}': {source}")]
    MalformedTimestamp {
        field: String,
        value: String,
        #[source]
        source: TimestampError,
    },

    /// The record is not valid JSON for the listing shape at all.
    #[error("invalid listing record: {error}")]
    Deserialize { error: String },
}

impl RecordError {
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn malformed_timestamp(field: &str, value: &str, source: TimestampError) -> Self {
        Self::MalformedTimestamp {
            field: field.to_string(),
            value: value.to_string(),
            source,
        }
    }

    pub fn deserialize(error: &serde_json::Error) -> Self {
        Self::Deserialize {
            error: error.to_string(),
        }
    }
}

/// Failure to convert one input file.
#[derive(Debug)]
pub enum FileError {
    /// The file cannot be read at all.
    Read { source: io::Error },

    /// The file is not a JSON listing archive.
    Parse { source: serde_json::Error },

    /// One record in the `Items` array cannot be converted.
    Record {
        /// 1-based position of the record in the `Items` array.
        event_number: u64,
        /// The record's item id, when it got far enough to have one.
        item_id: Option<String>,
        /// Truncated copy of the raw record.
        snippet: String,
        source: RecordError,
    },

    /// Rows could not be appended to an output relation.
    Write { source: io::Error },
}

impl FileError {
    pub fn read(source: io::Error) -> Self {
        Self::Read { source }
    }

    pub fn parse(source: serde_json::Error) -> Self {
        Self::Parse { source }
    }

    pub fn record(
        event_number: u64,
        item_id: Option<String>,
        raw: &str,
        source: RecordError,
    ) -> Self {
        Self::Record {
            event_number,
            item_id,
            snippet: truncate_snippet(raw),
            source,
        }
    }

    pub fn write(source: io::Error) -> Self {
        Self::Write { source }
    }
}

impl Display for FileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { source } => {
                write!(f, "cannot read input file: {source}")
            }
            Self::Parse { source } => {
                write!(f, "not a JSON listing archive: {source}")
            }
            Self::Record {
                event_number,
                item_id,
                snippet,
                source,
            } => {
                write!(f, "record #{event_number}")?;
                if let Some(id) = item_id {
                    write!(f, " (item '{id}')")?;
                }
                write!(f, ": {source}\nInvalid record: {snippet}")
            }
            Self::Write { source } => {
                write!(f, "cannot append output rows: {source}")
            }
        }
    }
}

impl StdError for FileError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Read { source } | Self::Write { source } => Some(source),
            Self::Parse { source } => Some(source),
            Self::Record { source, .. } => Some(source),
        }
    }
}

fn truncate_snippet(raw: &str) -> String {
    if raw.len() <= MAX_RECORD_LEN_IN_ERRMSG {
        return raw.to_string();
    }
    let mut end = MAX_RECORD_LEN_IN_ERRMSG;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &raw[..end])
}
