//! JSON rendering helpers
//!
//! Two renderings are needed: the indented form used for every file the tool
//! writes (collections, scratch documents, the links registry) and the
//! canonical form that spec hashes are computed over. The canonical form
//! matches `json.dumps(data, sort_keys=True)` byte for byte, the text behind
//! every hash already stored in a links registry.

use crate::error::ApiError;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::io;
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// Render a value with four-space indentation.
pub fn to_indented_string<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a value to `path` with four-space indentation.
pub fn write_indented<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ApiError> {
    let text = to_indented_string(value)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::io(parent, e))?;
        }
    }
    std::fs::write(path, text).map_err(|e| ApiError::io(path, e))
}

/// Read and parse a JSON file.
pub fn read_value(path: &Path) -> Result<Value, ApiError> {
    let text = std::fs::read_to_string(path).map_err(|e| ApiError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Render `value` canonically: keys sorted at every level, `", "` and `": "`
/// separators, non-ASCII and DEL escaped as `\uXXXX`. Integer literals keep
/// their exact digits (`-0` becomes `0`); other numbers are rendered as
/// shortest repr floats with `json.dumps` exponent rules.
pub fn to_canonical_string(value: &Value) -> Result<String, ApiError> {
    let sorted = sort_keys(value);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, CanonicalFormatter);
    sorted.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (key, child) in entries {
                sorted.insert(key.clone(), sort_keys(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() && ch != '\u{7f}' {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(float_repr(value).as_bytes())
    }

    // Every `Value` number arrives here as its source literal.
    fn write_number_str<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        value: &str,
    ) -> io::Result<()> {
        writer.write_all(number_repr(value).as_bytes())
    }
}

/// Integers print as parsed ints do, anything with a fraction or exponent
/// as a float.
fn number_repr(literal: &str) -> String {
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if digits.bytes().all(|b| b == b'0') {
            return "0".to_string();
        }
        return literal.to_string();
    }
    match literal.parse::<f64>() {
        Ok(value) => float_repr(value),
        Err(_) => literal.to_string(),
    }
}

/// Shortest round-trip float text, laid out the way `json.dumps` does:
/// positional for decimal exponents in `-4..16`, otherwise `d.ddde+XX`.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }
    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e-7"
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        let text = if point <= 0 {
            format!("0.{}{}", "0".repeat((-point) as usize), digits)
        } else if point as usize >= digits.len() {
            format!(
                "{}{}.0",
                digits,
                "0".repeat(point as usize - digits.len())
            )
        } else {
            let (int_part, frac_part) = digits.split_at(point as usize);
            format!("{}.{}", int_part, frac_part)
        };
        format!("{}{}", sign, text)
    } else {
        let (lead, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() {
            lead.to_string()
        } else {
            format!("{}.{}", lead, rest)
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exponent.abs())
    }
}
