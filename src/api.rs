use crate::error::{JotError, ParseError};
use crate::parser::Parser;
use crate::value::Json;
use log::debug;
use std::io::Read;

/// Parses JSON source text into a [`Json`] tree.
///
/// This is the primary entry point for processing JSON data. The accepted
/// grammar carries the crate's documented leniencies: optional and trailing
/// commas, a liberal number scan, and the `\0` string escape.
///
/// # Errors
///
/// Returns a [`ParseError`] with a source span when the text does not
/// parse. Use [`read`] for the lenient form that swallows the failure.
pub fn try_read(source: &str) -> Result<Json, ParseError> {
    Parser::new(source).parse_document()
}

/// Like [`try_read`], with a document name used in error reporting.
///
/// # Errors
///
/// Returns a [`ParseError`] whose diagnostic names `name` as the source.
pub fn try_read_named(source: &str, name: &str) -> Result<Json, ParseError> {
    Parser::new_with_name(source, name.to_string()).parse_document()
}

/// Parses JSON source text, collapsing any failure to `Null`.
///
/// A genuine top-level `null` literal and a parse failure are therefore
/// indistinguishable here; callers that need to tell them apart use
/// [`try_read`]. The swallowed failure is recorded at debug level.
pub fn read(source: &str) -> Json {
    match try_read(source) {
        Ok(value) => value,
        Err(error) => {
            debug!("parse failure swallowed by lenient read: {error}");
            Json::Null
        }
    }
}

/// Reads all available bytes from a byte source and parses them.
///
/// # Errors
///
/// Returns [`JotError::Io`] when the source cannot be drained,
/// [`JotError::Encoding`] when the bytes are not valid UTF-8, and a
/// wrapped [`ParseError`] when the text does not parse.
pub fn try_read_from<R: Read>(source: &mut R) -> Result<Json, JotError> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes).map_err(|_| JotError::Encoding)?;
    try_read_named(&text, "byte source").map_err(JotError::from)
}

/// Lenient form of [`try_read_from`]: any failure collapses to `Null`.
pub fn read_from<R: Read>(source: &mut R) -> Json {
    match try_read_from(source) {
        Ok(value) => value,
        Err(error) => {
            debug!("read failure swallowed by lenient read_from: {error}");
            Json::Null
        }
    }
}
