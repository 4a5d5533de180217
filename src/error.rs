use miette::{Diagnostic, NamedSource, SourceSpan};
use std::io;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum JotError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Patch(#[from] PatchError),

    #[error("Failed to read from the byte source")]
    #[diagnostic(code(read::io))]
    Io(#[from] io::Error),

    #[error("Byte source is not valid UTF-8")]
    #[diagnostic(
        code(read::encoding),
        help("The parser consumes UTF-8 text; transcode the source first.")
    )]
    Encoding,
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Unexpected character")]
    #[diagnostic(
        code(parse::unexpected_character),
        help("The parser found a character it did not expect in this position.")
    )]
    UnexpectedCharacter {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected {expected}, but found this")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Unexpected end of input")]
    #[diagnostic(
        code(parse::unexpected_eof),
        help("The input ended in the middle of a value.")
    )]
    UnexpectedEnd {
        #[source_code]
        src: NamedSource<String>,
        #[label("Input ended unexpectedly here")]
        span: SourceSpan,
    },

    #[error("Unterminated string")]
    #[diagnostic(
        code(parse::unterminated_string),
        help("Every string needs a closing '\"' before the end of input.")
    )]
    UnterminatedString {
        #[source_code]
        src: NamedSource<String>,
        #[label("This string is never closed")]
        span: SourceSpan,
    },

    #[error("Control character in string")]
    #[diagnostic(
        code(parse::control_character),
        help("Bytes below 0x20 must be written as escape sequences.")
    )]
    ControlCharacter {
        #[source_code]
        src: NamedSource<String>,
        #[label("Raw control byte here")]
        span: SourceSpan,
    },

    #[error("Invalid escape sequence")]
    #[diagnostic(
        code(parse::invalid_escape),
        help(r#"Supported escapes are \0 \\ \" \/ \b \f \n \r \t and \uXXXX."#)
    )]
    InvalidEscape {
        #[source_code]
        src: NamedSource<String>,
        #[label("Unrecognized escape")]
        span: SourceSpan,
    },

    #[error("Invalid unicode escape")]
    #[diagnostic(
        code(parse::invalid_unicode_escape),
        help(r"\u escapes must use four hex digits, and surrogate halves must pair up.")
    )]
    InvalidUnicodeEscape {
        #[source_code]
        src: NamedSource<String>,
        #[label("This escape sequence does not decode to a valid codepoint")]
        span: SourceSpan,
    },
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum PatchError {
    #[error("Patch document is missing its \"{field}\" field")]
    #[diagnostic(
        code(patch::missing_field),
        help("A patch needs \"op\" and \"path\"; \"insert\" and \"set\" also need \"value\".")
    )]
    MissingField { field: &'static str },

    #[error("Unknown patch operation \"{op}\"")]
    #[diagnostic(
        code(patch::unknown_op),
        help("Supported operations are \"insert\", \"set\" and \"remove\".")
    )]
    UnknownOp { op: String },

    #[error("Cannot remove the document root")]
    #[diagnostic(
        code(patch::empty_path),
        help("\"remove\" needs a path with at least one segment.")
    )]
    EmptyPath,

    #[error("Path \"{path}\" does not address an existing value")]
    #[diagnostic(code(patch::unresolved_path))]
    UnresolvedPath { path: String },

    #[error("\"{segment}\" is not a valid array index")]
    #[diagnostic(code(patch::invalid_index))]
    InvalidIndex { segment: String },

    #[error("Path \"{path}\" does not lead to an array or object")]
    #[diagnostic(code(patch::not_a_container))]
    NotAContainer { path: String },
}
