//! Rendering of node responses on stdout.

use std::io::Write;

use serde_json::Value;

use crate::AppError;

/// Prints `value`: JSON strings raw, anything else as indented JSON.
pub(crate) fn write_value<W: Write>(out: &mut W, value: &Value) -> Result<(), AppError> {
    if let Value::String(text) = value {
        return write_line(out, text);
    }
    serde_json::to_writer_pretty(&mut *out, value).map_err(AppError::Render)?;
    writeln!(out).map_err(AppError::Output)
}

pub(crate) fn write_line<W: Write>(out: &mut W, line: &str) -> Result<(), AppError> {
    writeln!(out, "{line}").map_err(AppError::Output)
}
