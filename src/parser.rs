use crate::error::ParseError;
use crate::unicode;
use crate::utils;
use crate::value::{Json, Property};
use miette::{NamedSource, SourceSpan};

/// A recursive descent parser for JSON text.
///
/// The whole buffer is consumed in a single pass over a byte cursor. The
/// accepted grammar is deliberately lenient: commas between elements are
/// optional, trailing commas are tolerated, and the number scan accepts
/// more than the strict JSON grammar. Input after the first complete value
/// is not inspected.
#[derive(Debug)]
pub struct Parser<'a> {
    source_text: &'a str,
    position: usize,
    name: String,
    utf16_buffer: Vec<u16>,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::new_with_name(source_text, "source.json".to_string())
    }

    pub fn new_with_name(source_text: &'a str, name: String) -> Self {
        Self {
            source_text,
            position: 0,
            name,
            utf16_buffer: Vec::new(),
        }
    }

    // === Main Parsing Methods ===

    /// Document ::= Value?
    ///
    /// Empty input parses to `Null`.
    pub fn parse_document(&mut self) -> Result<Json, ParseError> {
        if self.source_text.is_empty() {
            return Ok(Json::Null);
        }
        self.parse_value()
    }

    /// Value ::= "null" | "false" | "true" | String | Number | Array | Object
    fn parse_value(&mut self) -> Result<Json, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.err_unexpected_end()),
            Some(b'n') => self.parse_literal("null", Json::Null),
            Some(b'f') => self.parse_literal("false", Json::Boolean(false)),
            Some(b't') => self.parse_literal("true", Json::Boolean(true)),
            Some(b'"') => Ok(Json::String(self.parse_string()?)),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(_) => self.parse_number(),
        }
    }

    /// Literals are only accepted when followed by whitespace, a separator
    /// or the end of input, so `nullx` never parses as `null`.
    fn parse_literal(&mut self, literal: &'static str, value: Json) -> Result<Json, ParseError> {
        let end = self.position + literal.len();
        let matched = self
            .source_text
            .as_bytes()
            .get(self.position..end)
            .is_some_and(|bytes| bytes == literal.as_bytes());
        if matched && self.is_literal_end(end) {
            self.position = end;
            Ok(value)
        } else {
            Err(self.err_unexpected("a value"))
        }
    }

    fn is_literal_end(&self, at: usize) -> bool {
        match self.byte_at(at) {
            None => true,
            Some(byte) => matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}'),
        }
    }

    /// Number ::= liberal floating point text
    ///
    /// More tolerant than the strict JSON number grammar: a leading `+`, a
    /// bare leading or trailing dot and case-insensitive infinities are all
    /// accepted.
    fn parse_number(&mut self) -> Result<Json, ParseError> {
        let rest = &self.source_text.as_bytes()[self.position..];
        match utils::scan_f64(rest) {
            Some((value, length)) => {
                self.position += length;
                Ok(Json::Number(value))
            }
            None => Err(self.err_unexpected("a value")),
        }
    }

    /// String ::= '"' { raw octets | Escape } '"'
    ///
    /// Raw bytes below 0x20 fail the parse.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.position;
        if !self.skip_byte(b'"') {
            return Err(self.err_unexpected("a string"));
        }
        let mut buffer: Vec<u8> = Vec::new();
        loop {
            let run_start = self.position;
            while let Some(byte) = self.peek() {
                if byte < 0x20 || byte == b'"' || byte == b'\\' {
                    break;
                }
                self.position += 1;
            }
            buffer.extend_from_slice(&self.source_text.as_bytes()[run_start..self.position]);
            match self.peek() {
                None => return Err(self.err_unterminated_string(start)),
                Some(byte) if byte < 0x20 => return Err(self.err_control_character()),
                Some(b'"') => {
                    self.position += 1;
                    break;
                }
                _ => self.parse_escape(&mut buffer)?,
            }
        }
        match String::from_utf8(buffer) {
            Ok(text) => Ok(text),
            Err(_) => Err(self.err_invalid_unicode(start)),
        }
    }

    /// Escape ::= "\" ( '0' | '\' | '"' | '/' | 'b' | 'f' | 'n' | 'r' | 't' )
    ///          | UnicodeEscape
    fn parse_escape(&mut self, buffer: &mut Vec<u8>) -> Result<(), ParseError> {
        let escape_start = self.position;
        match self.byte_at(self.position + 1) {
            // \0 is not valid JSON, but \u0000 is
            Some(b'0') => buffer.push(0x00),
            Some(b'\\') => buffer.push(b'\\'),
            Some(b'"') => buffer.push(b'"'),
            Some(b'/') => buffer.push(b'/'),
            Some(b'b') => buffer.push(0x08),
            Some(b'f') => buffer.push(0x0C),
            Some(b'n') => buffer.push(b'\n'),
            Some(b'r') => buffer.push(b'\r'),
            Some(b't') => buffer.push(b'\t'),
            Some(b'u') => return self.parse_unicode_escape(buffer),
            _ => return Err(self.err_invalid_escape(escape_start)),
        }
        self.position += 2;
        Ok(())
    }

    /// UnicodeEscape ::= ( "\u" HexQuad )+
    ///
    /// Consecutive `\uXXXX` escapes are collected into a single UTF-16
    /// sequence before decoding, so surrogate pairs become one codepoint.
    fn parse_unicode_escape(&mut self, buffer: &mut Vec<u8>) -> Result<(), ParseError> {
        let escape_start = self.position;
        self.utf16_buffer.clear();
        while self.byte_at(self.position) == Some(b'\\')
            && self.byte_at(self.position + 1) == Some(b'u')
        {
            match self.read_hex_quad(self.position + 2) {
                Some(unit) => {
                    self.utf16_buffer.push(unit);
                    self.position += 6;
                }
                None => break,
            }
        }
        if self.utf16_buffer.is_empty() {
            return Err(self.err_invalid_unicode(escape_start));
        }
        let mut offset = 0;
        while offset < self.utf16_buffer.len() {
            let Some((codepoint, used)) = unicode::decode_utf16(&self.utf16_buffer[offset..])
            else {
                return Err(self.err_invalid_unicode(escape_start));
            };
            if !unicode::is_valid_codepoint(codepoint) {
                return Err(self.err_invalid_unicode(escape_start));
            }
            let encoded = unicode::encode_utf8(codepoint);
            if encoded.is_empty() {
                return Err(self.err_invalid_unicode(escape_start));
            }
            buffer.extend_from_slice(encoded.as_bytes());
            offset += used;
        }
        Ok(())
    }

    fn read_hex_quad(&self, at: usize) -> Option<u16> {
        let bytes = self.source_text.as_bytes().get(at..at + 4)?;
        let mut unit: u16 = 0;
        for &byte in bytes {
            let digit = (byte as char).to_digit(16)?;
            unit = (unit << 4) | digit as u16;
        }
        Some(unit)
    }

    /// Array ::= "[" { Value [","] } "]"
    ///
    /// A comma is only recognized immediately after an element; whitespace
    /// is skipped at the top of the loop, before each element.
    fn parse_array(&mut self) -> Result<Json, ParseError> {
        if !self.skip_byte(b'[') {
            return Err(self.err_unexpected("an array"));
        }
        let mut elements = Vec::new();
        loop {
            self.skip_whitespace();
            if self.skip_byte(b']') {
                break;
            }
            if self.at_end() {
                return Err(self.err_unexpected_end());
            }
            elements.push(self.parse_value()?);
            self.skip_byte(b',');
        }
        Ok(Json::Array(elements))
    }

    /// Object ::= "{" { String ":" Value [","] } "}"
    fn parse_object(&mut self) -> Result<Json, ParseError> {
        if !self.skip_byte(b'{') {
            return Err(self.err_unexpected("an object"));
        }
        let mut properties = Vec::new();
        loop {
            self.skip_whitespace();
            if self.skip_byte(b'}') {
                break;
            }
            if self.at_end() {
                return Err(self.err_unexpected_end());
            }
            let name = self.parse_string()?;
            self.skip_whitespace();
            if !self.skip_byte(b':') {
                return Err(self.err_unexpected("':' after a property name"));
            }
            let value = self.parse_value()?;
            properties.push(Property::new(name, value));
            self.skip_whitespace();
            self.skip_byte(b',');
        }
        Ok(Json::Object(properties))
    }

    // === Cursor Helper Methods ===

    fn peek(&self) -> Option<u8> {
        self.byte_at(self.position)
    }

    fn byte_at(&self, at: usize) -> Option<u8> {
        self.source_text.as_bytes().get(at).copied()
    }

    fn at_end(&self) -> bool {
        self.position >= self.source_text.len()
    }

    fn skip_byte(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.position += 1;
        }
    }

    // === Error Helper Methods ===

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.source_text.to_string())
    }

    fn span_here(&self) -> SourceSpan {
        let length = self
            .source_text
            .get(self.position..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        (self.position, length).into()
    }

    fn span_from(&self, start: usize) -> SourceSpan {
        let length = self
            .position
            .saturating_sub(start)
            .max(1)
            .min(self.source_text.len().saturating_sub(start));
        (start, length).into()
    }

    fn err_unexpected(&self, expected: &str) -> ParseError {
        if self.at_end() {
            return self.err_unexpected_end();
        }
        ParseError::UnexpectedCharacter {
            src: self.named_source(),
            span: self.span_here(),
            expected: expected.to_string(),
        }
    }

    fn err_unexpected_end(&self) -> ParseError {
        ParseError::UnexpectedEnd {
            src: self.named_source(),
            span: (self.source_text.len().saturating_sub(1), 0).into(),
        }
    }

    fn err_unterminated_string(&self, start: usize) -> ParseError {
        ParseError::UnterminatedString {
            src: self.named_source(),
            span: self.span_from(start),
        }
    }

    fn err_control_character(&self) -> ParseError {
        ParseError::ControlCharacter {
            src: self.named_source(),
            span: self.span_here(),
        }
    }

    fn err_invalid_escape(&self, at: usize) -> ParseError {
        ParseError::InvalidEscape {
            src: self.named_source(),
            span: self.span_from(at),
        }
    }

    fn err_invalid_unicode(&self, at: usize) -> ParseError {
        ParseError::InvalidUnicodeEscape {
            src: self.named_source(),
            span: self.span_from(at),
        }
    }
}
