use crate::utils;
use crate::value::{Json, Property};
use std::fmt;
use std::io;

/// Controls how [`Json::write_with`] lays out its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// Separator between a property name and its value.
    pub colon: String,
    /// Separator between elements.
    pub comma: String,
    /// One level of indentation. Indentation is only emitted when this
    /// string is non-empty, so compact output is a true special case.
    pub indent: String,
    /// Line terminator between elements.
    pub newline: String,
    /// Significant digits used when rendering numbers. The general format
    /// is not guaranteed to round-trip extreme magnitudes exactly.
    pub precision: usize,
}

impl Format {
    /// Single-line output with no spacing at all.
    pub fn compact() -> Self {
        Format {
            colon: ":".to_string(),
            comma: ",".to_string(),
            indent: String::new(),
            newline: String::new(),
            precision: 6,
        }
    }

    /// Multi-line output indented by four spaces.
    pub fn indented() -> Self {
        Self::indented_with("    ")
    }

    /// Multi-line output with a caller-provided indent unit.
    pub fn indented_with(indent: &str) -> Self {
        Format {
            colon: ": ".to_string(),
            comma: ",".to_string(),
            indent: indent.to_string(),
            newline: "\n".to_string(),
            precision: 6,
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::indented()
    }
}

impl Json {
    /// Renders the value with the default indented format.
    pub fn write(&self) -> String {
        self.write_with(&Format::indented())
    }

    /// Renders the value under a format configuration.
    pub fn write_with(&self, format: &Format) -> String {
        let mut out = String::new();
        render(&mut out, format, self, 0);
        out
    }

    /// Renders the value into a character sink.
    pub fn write_to<W: io::Write>(&self, sink: &mut W, format: &Format) -> io::Result<()> {
        sink.write_all(self.write_with(format).as_bytes())
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.write())
    }
}

/// Escape sequences for the 32 control codepoints, indexed by codepoint.
const CONTROL_ESCAPES: [&str; 32] = [
    "\\u0000", "\\u0001", "\\u0002", "\\u0003", "\\u0004", "\\u0005", "\\u0006", "\\u0007",
    "\\b", "\\t", "\\n", "\\u000B", "\\f", "\\r", "\\u000E", "\\u000F", "\\u0010", "\\u0011",
    "\\u0012", "\\u0013", "\\u0014", "\\u0015", "\\u0016", "\\u0017", "\\u0018", "\\u0019",
    "\\u001A", "\\u001B", "\\u001C", "\\u001D", "\\u001E", "\\u001F",
];

fn render(out: &mut String, format: &Format, value: &Json, depth: usize) {
    match value {
        Json::Null => out.push_str("null"),
        Json::Boolean(true) => out.push_str("true"),
        Json::Boolean(false) => out.push_str("false"),
        Json::Number(number) => out.push_str(&utils::format_number(*number, format.precision)),
        Json::String(text) => render_string(out, text),
        Json::Array(elements) => render_array(out, format, elements, depth),
        Json::Object(properties) => render_object(out, format, properties, depth),
    }
}

fn render_string(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\u{0000}'..='\u{001F}' => out.push_str(CONTROL_ESCAPES[ch as usize]),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7F}' => out.push_str("\\u007F"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn render_indent(out: &mut String, indent: &str, depth: usize) {
    if !indent.is_empty() {
        for _ in 0..depth {
            out.push_str(indent);
        }
    }
}

// Empty containers render as `[]`/`{}` with no internal whitespace, in any
// format.
fn render_array(out: &mut String, format: &Format, elements: &[Json], depth: usize) {
    out.push('[');
    if !elements.is_empty() {
        let inner = depth + 1;
        for (position, element) in elements.iter().enumerate() {
            if position > 0 {
                out.push_str(&format.comma);
            }
            out.push_str(&format.newline);
            render_indent(out, &format.indent, inner);
            render(out, format, element, inner);
        }
        out.push_str(&format.newline);
        render_indent(out, &format.indent, depth);
    }
    out.push(']');
}

fn render_object(out: &mut String, format: &Format, properties: &[Property], depth: usize) {
    out.push('{');
    if !properties.is_empty() {
        let inner = depth + 1;
        for (position, property) in properties.iter().enumerate() {
            if position > 0 {
                out.push_str(&format.comma);
            }
            out.push_str(&format.newline);
            render_indent(out, &format.indent, inner);
            render_string(out, property.name());
            out.push_str(&format.colon);
            render(out, format, property.value(), inner);
        }
        out.push_str(&format.newline);
        render_indent(out, &format.indent, depth);
    }
    out.push('}');
}
