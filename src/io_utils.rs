//! Error reporting for the `bagtag` binary.
//!
//! Every failure is printed as one line: what was being done, the cause,
//! and a hint on how to fix the input.

use std::fmt;
use std::io;
use std::path::Path;

use serde_json::error::Category;

use crate::{BagTagError, RangeError};

#[derive(Debug)]
pub struct CliError {
    pub context: String,
    pub cause: String,
    pub hint: Option<&'static str>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.cause)?;
        match self.hint {
            Some(hint) => write!(f, ". {hint}"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

fn io_hint(kind: io::ErrorKind) -> &'static str {
    use io::ErrorKind::*;
    match kind {
        NotFound => "Check that the path points to an existing record, payload or config file.",
        PermissionDenied => "Check that the file is readable by the current user.",
        InvalidData => "Records and config files are UTF-8 JSON, payloads are Base45 text.",
        _ => "Check the path and try again.",
    }
}

/// Failure to read `path`.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        context: format!("{operation} '{}'", path.display()),
        cause: err.to_string(),
        hint: Some(io_hint(err.kind())),
        source: Some(Box::new(err)),
    }
}

/// Error without an underlying cause.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        context: "error".to_string(),
        cause: msg.to_string(),
        hint: None,
        source: None,
    }
}

fn json_hint(category: Category) -> &'static str {
    match category {
        Category::Syntax | Category::Eof => "The record file is not well-formed JSON.",
        Category::Data => {
            "Expected an object with version, flights and optional lpn/uuid; \
             dates are YYYY-MM-DD."
        }
        Category::Io => "The record could not be read.",
    }
}

/// Malformed or mistyped JSON record.
pub fn json_cli_error(context: &str, err: serde_json::Error) -> CliError {
    CliError {
        context: context.to_string(),
        cause: err.to_string(),
        hint: Some(json_hint(err.classify())),
        source: Some(Box::new(err)),
    }
}

/// Codec failure, with a hint that depends on the error kind.
pub fn bagtag_cli_error(context: &str, err: BagTagError) -> CliError {
    CliError {
        context: context.to_string(),
        cause: err.to_string(),
        hint: Some(cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Actionable hint for a codec error.
pub fn cli_hint(err: &BagTagError) -> &'static str {
    use BagTagError::*;
    match err {
        Range(RangeError::Truncated { .. }) => "The payload is incomplete, scan the tag again.",
        Range(RangeError::InvalidDate { .. }) | InvalidCode { .. } => {
            "The payload is corrupted or not a bag tag."
        }
        Range(RangeError::Identifier(_)) => {
            "Write the uuid as 8-4-4-4-12 hex digits separated by hyphens."
        }
        Range(RangeError::DesignatorLength(_)) => {
            "Use a two or three character airline code, e.g. LH or EWG."
        }
        Range(RangeError::BufferOverflow { .. }) => "Raise the capacity.",
        Range(_) => "Check the field against its allowed range.",
        InvalidCharacter { .. } => "Use upper case letters and digits only.",
        Transform(_) => "Verify the text was copied completely.",
        Config(_) => "Raise --capacity or the capacity in the config file.",
    }
}
